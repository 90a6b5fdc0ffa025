pub mod config;
pub mod core;
pub mod docx;
pub mod domain;
pub mod handler;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::lambda::LambdaConfig;
pub use config::toml_config::TomlConfig;
pub use config::CliConfig;

pub use crate::core::generator::{render_invoice, GeneratorSettings, InvoiceGenerator};
pub use crate::core::template::{fallback_template, HttpTemplateSource};
pub use domain::model::{GeneratedInvoice, InvoiceRequest, LineItem, SenderProfile};
pub use utils::error::{InvoiceError, Result};
