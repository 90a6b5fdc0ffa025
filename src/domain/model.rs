use crate::docx::DOCX_CONTENT_TYPE;
use crate::utils::error::{InvoiceError, Result};
use crate::utils::validation::validate_required_fields;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level request keys that must be present, checked in this order.
pub const REQUIRED_FIELDS: [&str; 4] = ["client_info", "invoice_details", "items", "financials"];

pub const CLIENT_NAME_TOKEN: &str = "{{client_name}}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub client_info: Map<String, Value>,
    pub invoice_details: Map<String, Value>,
    pub financials: Map<String, Value>,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub apply_late_fee: bool,
    #[serde(default)]
    pub mark_as_paid: bool,
    #[serde(default = "default_invoice_number")]
    pub invoice_number: String,
}

fn default_invoice_number() -> String {
    "INV".to_string()
}

impl InvoiceRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        let payload: Value = serde_json::from_str(body)?;
        Self::from_value(payload)
    }

    pub fn from_value(payload: Value) -> Result<Self> {
        validate_required_fields(&payload, &REQUIRED_FIELDS)?;
        serde_json::from_value(payload).map_err(|e| InvoiceError::InvalidRequestError {
            message: e.to_string(),
        })
    }

    /// Client name used in the output filename, before sanitizing.
    pub fn client_name(&self) -> String {
        self.client_info
            .get(CLIENT_NAME_TOKEN)
            .map(render_value)
            .unwrap_or_else(|| "Client".to_string())
    }
}

/// Text form of a caller-supplied substitution value.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Static sender and bank lines of the built-in template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderProfile {
    pub company: String,
    pub phone: String,
    pub email: String,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
}

impl Default for SenderProfile {
    fn default() -> Self {
        Self {
            company: "Your Company".to_string(),
            phone: "+62 000 0000 0000".to_string(),
            email: "billing@example.com".to_string(),
            bank_name: "Your Bank".to_string(),
            account_name: "Account Holder".to_string(),
            account_number: "0000000000".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedInvoice {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl GeneratedInvoice {
    pub fn content_type(&self) -> &'static str {
        DOCX_CONTENT_TYPE
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}
