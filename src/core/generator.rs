use crate::core::financials::style_financial_table;
use crate::core::format::{sanitize_filename, strip_path_separators};
use crate::core::items_table::rebuild_items_table;
use crate::core::substitution::{build_substitutions, replace_placeholders};
use crate::core::template::{acquire_template, HttpTemplateSource};
use crate::core::FONT_FAMILY;
use crate::docx::Document;
use crate::domain::model::{GeneratedInvoice, InvoiceRequest, SenderProfile};
use crate::domain::ports::{ConfigProvider, TemplateSource};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Duration;

/// Read-only settings captured once from a `ConfigProvider` at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub template_url: Option<String>,
    pub paid_stamp_url: Option<String>,
    pub signature_url: Option<String>,
    pub timeout: Duration,
    pub sender: SenderProfile,
}

impl GeneratorSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let owned = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Self {
            template_url: owned(config.template_url()),
            paid_stamp_url: owned(config.paid_stamp_url()),
            signature_url: owned(config.signature_url()),
            timeout: Duration::from_secs(config.timeout_seconds()),
            sender: config.sender_profile(),
        }
    }
}

pub struct InvoiceGenerator<T: TemplateSource> {
    source: T,
    sender: SenderProfile,
    monitor: SystemMonitor,
}

impl<T: TemplateSource> InvoiceGenerator<T> {
    pub fn new(source: T, sender: SenderProfile) -> Self {
        Self::with_monitoring(source, sender, false)
    }

    pub fn with_monitoring(source: T, sender: SenderProfile, enable_monitoring: bool) -> Self {
        Self {
            source,
            sender,
            monitor: SystemMonitor::new(enable_monitoring),
        }
    }

    /// Builds one invoice document. Template problems and styling problems
    /// degrade the output; only structural failures are returned.
    pub async fn generate(&self, request: &InvoiceRequest) -> Result<GeneratedInvoice> {
        tracing::info!(
            "🧾 Generating invoice {} ({} items)",
            request.invoice_number,
            request.items.len()
        );
        self.monitor.log_stats("Start");

        let doc = acquire_template(&self.source, &self.sender).await;
        self.monitor.log_stats("Template");

        let invoice = render_invoice(doc, request)?;
        self.monitor.log_stats("Render");
        self.monitor.log_final_stats();

        tracing::info!(
            "✅ Generated {} ({} bytes)",
            invoice.filename,
            invoice.bytes.len()
        );
        Ok(invoice)
    }
}

impl InvoiceGenerator<HttpTemplateSource> {
    pub fn from_settings(settings: &GeneratorSettings, enable_monitoring: bool) -> Self {
        if let Some(url) = &settings.paid_stamp_url {
            tracing::debug!("Paid stamp asset: {}", url);
        }
        if let Some(url) = &settings.signature_url {
            tracing::debug!("Signature asset: {}", url);
        }

        let source = HttpTemplateSource::new(settings.template_url.clone(), settings.timeout);
        Self::with_monitoring(source, settings.sender.clone(), enable_monitoring)
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C, enable_monitoring: bool) -> Self {
        Self::from_settings(&GeneratorSettings::from_provider(config), enable_monitoring)
    }
}

/// Fills a template in place and serializes it.
pub fn render_invoice(mut doc: Document, request: &InvoiceRequest) -> Result<GeneratedInvoice> {
    let substitutions = build_substitutions(request);
    replace_placeholders(&mut doc, &substitutions);

    if request.items.is_empty() && doc.table_count() == 0 {
        tracing::debug!("Template has no tables and the request has no items");
    } else {
        rebuild_items_table(&mut doc, &request.items)?;
    }

    if let Err(e) = style_financial_table(&mut doc, request.apply_late_fee) {
        tracing::warn!("⚠️ Could not style financial table: {}", e);
    }

    normalize_fonts(&mut doc);

    let bytes = doc.to_bytes()?;
    Ok(GeneratedInvoice {
        filename: output_filename(request),
        bytes,
    })
}

/// Sets the invoice font on every run of every body paragraph.
pub fn normalize_fonts(doc: &mut Document) {
    for mut paragraph in doc.paragraphs() {
        for mut run in paragraph.runs() {
            run.set_font_name(FONT_FAMILY);
        }
    }
}

pub fn output_filename(request: &InvoiceRequest) -> String {
    let prefix = if request.mark_as_paid {
        "Paid_Invoice"
    } else {
        "Invoice"
    };
    format!(
        "{}_{}_{}.docx",
        prefix,
        strip_path_separators(&request.invoice_number),
        sanitize_filename(&request.client_name())
    )
}
