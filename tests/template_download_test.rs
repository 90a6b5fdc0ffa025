use docx_invoice::core::template::BROWSER_USER_AGENT;
use docx_invoice::docx::{Document, TextContainer};
use docx_invoice::domain::ports::TemplateSource;
use docx_invoice::utils::error::FetchError;
use docx_invoice::{
    fallback_template, HttpTemplateSource, InvoiceGenerator, InvoiceRequest, SenderProfile,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn remote_template_bytes() -> Vec<u8> {
    let sender = SenderProfile {
        company: "Remote Template Co".to_string(),
        ..SenderProfile::default()
    };
    fallback_template(&sender).to_bytes().unwrap()
}

fn sample_request() -> InvoiceRequest {
    InvoiceRequest::from_value(json!({
        "client_info": {"{{client_name}}": "Acme"},
        "invoice_details": {},
        "financials": {},
        "items": [{"description": "Design", "unit_price": 1000000, "quantity": 1, "total": 1000000}],
        "invoice_number": "001"
    }))
    .unwrap()
}

fn generator(url: String, timeout: Duration) -> InvoiceGenerator<HttpTemplateSource> {
    InvoiceGenerator::new(
        HttpTemplateSource::new(Some(url), timeout),
        SenderProfile::default(),
    )
}

fn sender_line(bytes: &[u8]) -> String {
    let mut doc = Document::from_bytes(bytes).unwrap();
    let line = doc
        .paragraphs()
        .map(|p| p.text())
        .find(|text| text.starts_with("From: "));
    line.unwrap()
}

#[tokio::test]
async fn test_downloaded_template_is_used() {
    let server = MockServer::start();
    let template_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/template.docx")
            .header("user-agent", BROWSER_USER_AGENT);
        then.status(200)
            .header("Content-Type", DOCX_MIME)
            .body(remote_template_bytes());
    });

    let invoice = generator(server.url("/template.docx"), Duration::from_secs(5))
        .generate(&sample_request())
        .await
        .unwrap();

    template_mock.assert();
    assert_eq!(sender_line(&invoice.bytes), "From: Remote Template Co");

    let mut doc = Document::from_bytes(&invoice.bytes).unwrap();
    let mut items = doc.table(0).unwrap();
    assert_eq!(items.row_count(), 2);
    assert_eq!(items.row(1).unwrap().cell(1).unwrap().text(), "Rp 1.000.000");
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start();
    let template_mock = server.mock(|when, then| {
        when.method(GET).path("/template.docx");
        then.status(500).body("internal error");
    });

    let source = HttpTemplateSource::new(Some(server.url("/template.docx")), Duration::from_secs(5));
    assert!(matches!(source.fetch().await, Err(FetchError::Status(_))));

    let invoice = generator(server.url("/template.docx"), Duration::from_secs(5))
        .generate(&sample_request())
        .await
        .unwrap();

    // one request from the direct fetch, one from the generator: no retries
    template_mock.assert_hits(2);
    assert_eq!(invoice.filename, "Invoice_001_Acme.docx");
    assert_eq!(sender_line(&invoice.bytes), "From: Your Company");
}

#[tokio::test]
async fn test_slow_host_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow.docx");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(remote_template_bytes());
    });

    let invoice = generator(server.url("/slow.docx"), Duration::from_millis(300))
        .generate(&sample_request())
        .await
        .unwrap();

    assert_eq!(sender_line(&invoice.bytes), "From: Your Company");
}

#[tokio::test]
async fn test_malformed_template_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken.docx");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>Sign in to continue</html>");
    });

    let source = HttpTemplateSource::new(Some(server.url("/broken.docx")), Duration::from_secs(5));
    assert!(matches!(source.fetch().await, Err(FetchError::Malformed(_))));

    let invoice = generator(server.url("/broken.docx"), Duration::from_secs(5))
        .generate(&sample_request())
        .await
        .unwrap();

    let mut doc = Document::from_bytes(&invoice.bytes).unwrap();
    assert_eq!(doc.table_count(), 2);
    assert_eq!(doc.table(0).unwrap().row_count(), 2);
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    // nothing listens on the discard port
    let invoice = generator(
        "http://127.0.0.1:9/template.docx".to_string(),
        Duration::from_secs(2),
    )
    .generate(&sample_request())
    .await
    .unwrap();

    assert_eq!(sender_line(&invoice.bytes), "From: Your Company");
}
