pub mod blank;
pub mod blocks;
pub mod package;
pub mod style;
pub mod xml;

pub use blocks::{Block, Cell, Paragraph, Row, Run, Table, TextContainer};
pub use package::{Document, DOCX_CONTENT_TYPE};
pub use style::Alignment;
