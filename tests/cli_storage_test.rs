use docx_invoice::domain::ports::Storage;
use docx_invoice::{
    CliConfig, InvoiceGenerator, InvoiceRequest, LocalStorage, TomlConfig,
};
use std::io::{Read, Write};
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

const REQUEST_JSON: &str = r#"{
    "client_info": {"{{client_name}}": "Acme Corp", "{{client_email}}": "ap@acme.test"},
    "invoice_details": {"{{invoice_date}}": "2024-05-01", "{{due_date}}": "2024-05-15"},
    "financials": {"[subtotal]": "Rp 2.500.000", "[grandtotal]": "Rp 2.500.000"},
    "items": [
        {"description": "Logo design", "unit_price": 1500000, "quantity": 1, "total": 1500000},
        {"description": "Revisions", "unit_price": 500000, "quantity": 2, "total": 1000000}
    ],
    "invoice_number": "2024-05"
}"#;

#[tokio::test]
async fn test_generated_invoice_is_written_to_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().to_string_lossy().into_owned();

    let config = CliConfig {
        request: PathBuf::from("request.json"),
        output_dir: Some(output_dir.clone()),
        template_url: None,
        paid_stamp_url: None,
        signature_url: None,
        timeout_seconds: Some(2),
        config: None,
        verbose: false,
        monitor: true,
        sender: None,
    };

    let request = InvoiceRequest::from_json(REQUEST_JSON).unwrap();
    let generator = InvoiceGenerator::from_config(&config, config.monitor);
    let invoice = generator.generate(&request).await.unwrap();

    let storage = LocalStorage::new(config.output_dir().to_string());
    let written = storage
        .write_file(&invoice.filename, &invoice.bytes)
        .await
        .unwrap();

    assert!(written.ends_with("Invoice_2024-05_Acme_Corp.docx"));
    let full_path = temp_dir.path().join("Invoice_2024-05_Acme_Corp.docx");
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();

    let file_names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(file_names.contains(&"[Content_Types].xml".to_string()));
    assert!(file_names.contains(&"word/document.xml".to_string()));

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document_xml)
        .unwrap();

    assert!(document_xml.contains("Acme Corp"));
    assert!(document_xml.contains("Logo design"));
    assert!(document_xml.contains("Rp 1.500.000"));
    assert!(document_xml.contains("2024-05-15"));
    assert!(!document_xml.contains("{{service_description}}"));
    assert!(!document_xml.contains("{{LATE FEE:}}"));
    assert!(!document_xml.contains("[latefee]"));
}

#[tokio::test]
async fn test_sender_profile_from_config_file() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(
            br#"
[sender]
company = "Studio Rupa"
email = "halo@rupa.test"

[output]
directory = "./unused"
"#,
        )
        .unwrap();

    let file = TomlConfig::from_file(config_file.path()).unwrap();
    let config = CliConfig {
        request: PathBuf::from("request.json"),
        output_dir: None,
        template_url: None,
        paid_stamp_url: None,
        signature_url: None,
        timeout_seconds: None,
        config: Some(config_file.path().to_path_buf()),
        verbose: false,
        monitor: false,
        sender: None,
    }
    .with_file_defaults(&file);

    let request = InvoiceRequest::from_json(REQUEST_JSON).unwrap();
    let invoice = InvoiceGenerator::from_config(&config, false)
        .generate(&request)
        .await
        .unwrap();

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(invoice.bytes)).unwrap();
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut document_xml)
        .unwrap();

    assert!(document_xml.contains("From: Studio Rupa"));
    assert!(document_xml.contains("halo@rupa.test"));
    assert_eq!(config.output_dir(), "./unused");
}

#[tokio::test]
async fn test_invoice_number_cannot_leave_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("a").join("b").join("output");
    let storage = LocalStorage::new(output_dir.to_string_lossy().into_owned());

    let mut payload: serde_json::Value = serde_json::from_str(REQUEST_JSON).unwrap();
    payload["invoice_number"] = serde_json::json!("x/../../../escaped");
    let request = InvoiceRequest::from_value(payload).unwrap();

    let config = CliConfig {
        request: PathBuf::from("request.json"),
        output_dir: None,
        template_url: None,
        paid_stamp_url: None,
        signature_url: None,
        timeout_seconds: None,
        config: None,
        verbose: false,
        monitor: false,
        sender: None,
    };
    let invoice = InvoiceGenerator::from_config(&config, false)
        .generate(&request)
        .await
        .unwrap();
    let written = storage
        .write_file(&invoice.filename, &invoice.bytes)
        .await
        .unwrap();

    assert_eq!(invoice.filename, "Invoice_x_.._.._.._escaped_Acme_Corp.docx");
    assert!(std::path::Path::new(&written).starts_with(&output_dir));
    assert!(output_dir.join(&invoice.filename).exists());
    assert!(!temp_dir.path().join("a").join("escaped_Acme_Corp.docx").exists());
}
