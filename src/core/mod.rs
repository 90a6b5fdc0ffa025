pub mod financials;
pub mod format;
pub mod generator;
pub mod items_table;
pub mod substitution;
pub mod template;

/// Monospace family applied to table cells and, finally, to every body run.
pub const FONT_FAMILY: &str = "Courier New";

pub use crate::domain::model::{GeneratedInvoice, InvoiceRequest, LineItem};
pub use crate::domain::ports::{ConfigProvider, Storage, TemplateSource};
pub use crate::utils::error::Result;
pub use generator::{GeneratorSettings, InvoiceGenerator};
