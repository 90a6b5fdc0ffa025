use crate::docx::blank::{document_with_body, grid_table};
use crate::docx::xml::Element;
use crate::docx::{Document, Paragraph, Table, TextContainer};
use crate::domain::model::SenderProfile;
use crate::domain::ports::TemplateSource;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Some template hosts reject requests without a browser-like agent.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const HEADING_SIZE: u32 = 24;

/// Downloads the template `.docx` over HTTP(S). One attempt per call.
pub struct HttpTemplateSource {
    client: Client,
    url: Option<String>,
    timeout: Duration,
}

impl HttpTemplateSource {
    pub fn new(url: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.filter(|u| !u.trim().is_empty()),
            timeout,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self) -> Result<Document, FetchError> {
        let url = self.url.as_deref().ok_or(FetchError::NotConfigured)?;

        tracing::debug!("Downloading template from: {}", url);
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        tracing::debug!("Template response status: {}", response.status());
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        Document::from_bytes(&bytes).map_err(FetchError::Malformed)
    }
}

/// Loads the configured template, falling back to the built-in one on any
/// failure. Never fails.
pub async fn acquire_template<T>(source: &T, sender: &SenderProfile) -> Document
where
    T: TemplateSource + ?Sized,
{
    match source.fetch().await {
        Ok(doc) => {
            tracing::info!("📄 Using downloaded template");
            doc
        }
        Err(FetchError::NotConfigured) => {
            tracing::info!("📄 No template URL configured, using embedded template");
            fallback_template(sender)
        }
        Err(e) => {
            tracing::warn!("⚠️ Could not load template ({}), using embedded template", e);
            fallback_template(sender)
        }
    }
}

/// The built-in invoice layout: header block, a 2×4 line-items table, a
/// 5×2 financial summary table and bank details.
pub fn fallback_template(sender: &SenderProfile) -> Document {
    let mut blocks = vec![heading("INVOICE")];

    blocks.extend(
        [
            format!("From: {}", sender.company),
            format!("{} | {}", sender.phone, sender.email),
            String::new(),
            "Issued to:".to_string(),
            "{{client_name}}".to_string(),
            "{{client_phone}}".to_string(),
            "{{client_email}}".to_string(),
            "{{client_address}}".to_string(),
            String::new(),
            "Invoice No: {{invoice_number}}".to_string(),
            "Date: {{invoice_date}}".to_string(),
            "Due Date: {{due_date}}".to_string(),
            String::new(),
        ]
        .iter()
        .map(|line| text_paragraph(line)),
    );

    blocks.push(filled_table(&[
        ["DESCRIPTION", "UNIT PRICE", "QUANTITY", "TOTAL"],
        ["{{service_description}}", "{{unit_price}}", "{{quantity}}", "{{total}}"],
    ]));
    blocks.push(text_paragraph(""));

    blocks.push(filled_table(&[
        ["SUBTOTAL", "[subtotal]"],
        ["TAX", "[tax]"],
        ["DISCOUNT", "[discount]"],
        ["{{LATE FEE:}}", "[latefee]"],
        ["GRAND TOTAL", "[grandtotal]"],
    ]));
    blocks.push(text_paragraph(""));

    blocks.extend(
        [
            "Bank Details:".to_string(),
            format!("Bank Name: {}", sender.bank_name),
            format!("Account Name: {}", sender.account_name),
            format!("Account No: {}", sender.account_number),
        ]
        .iter()
        .map(|line| text_paragraph(line)),
    );

    document_with_body(blocks)
}

fn text_paragraph(text: &str) -> Element {
    let mut element = Element::new("w:p");
    if !text.is_empty() {
        Paragraph::new(&mut element).add_run(text);
    }
    element
}

fn heading(text: &str) -> Element {
    let mut element = Element::new("w:p");
    {
        let mut paragraph = Paragraph::new(&mut element);
        let mut run = paragraph.add_run(text);
        run.set_bold(true);
        run.set_font_size(HEADING_SIZE);
    }
    element
}

fn filled_table<const N: usize>(rows: &[[&str; N]]) -> Element {
    let mut element = grid_table(rows.len(), N);
    {
        let mut table = Table::new(&mut element);
        for (mut row, texts) in table.rows().zip(rows) {
            for (mut cell, text) in row.cells().zip(texts) {
                cell.set_text(text);
            }
        }
    }
    element
}
