use crate::domain::model::{GeneratedInvoice, InvoiceRequest};
use crate::domain::ports::TemplateSource;
use crate::utils::error::InvoiceError;
use crate::InvoiceGenerator;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

const ALLOWED_HEADERS: &str = "Content-Type";
const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Proxy-integration response returned by the function.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl Response {
    fn with_cors(status_code: u16, body: String) -> Self {
        let headers = HashMap::from([("Access-Control-Allow-Origin".to_string(), "*".to_string())]);
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    fn json(status_code: u16, body: Value) -> Self {
        let mut response = Self::with_cors(status_code, body.to_string());
        response
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        response
    }

    pub fn preflight() -> Self {
        let mut response = Self::with_cors(200, String::new());
        response.headers.extend([
            ("Access-Control-Allow-Headers".to_string(), ALLOWED_HEADERS.to_string()),
            ("Access-Control-Allow-Methods".to_string(), ALLOWED_METHODS.to_string()),
        ]);
        response
    }

    pub fn method_not_allowed() -> Self {
        Self::json(405, json!({ "error": "Method not allowed" }))
    }

    pub fn error(err: &InvoiceError) -> Self {
        Self::json(err.status_code(), json!({ "error": err.to_string() }))
    }

    pub fn invoice(invoice: &GeneratedInvoice) -> Self {
        let mut response = Self::with_cors(200, STANDARD.encode(&invoice.bytes));
        response.is_base64_encoded = true;
        response.headers.extend([
            ("Content-Type".to_string(), invoice.content_type().to_string()),
            ("Content-Disposition".to_string(), invoice.content_disposition()),
        ]);
        response
    }
}

/// Accepts either the invoice JSON itself or a proxy event whose `body`
/// carries it (optionally base64 encoded).
pub fn parse_request(payload: Value) -> Result<InvoiceRequest, InvoiceError> {
    let body = match payload.get("body") {
        Some(Value::String(body)) => body.clone(),
        // a proxy event without a body is an empty request
        _ if is_proxy_event(&payload) => "{}".to_string(),
        _ => return InvoiceRequest::from_value(payload),
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return InvoiceRequest::from_json(&body);
    }

    let decoded = STANDARD
        .decode(body.trim())
        .map_err(|e| InvoiceError::InvalidRequestError {
            message: format!("body is not valid base64: {}", e),
        })?;
    let text = String::from_utf8(decoded).map_err(|e| InvoiceError::InvalidRequestError {
        message: format!("body is not valid UTF-8: {}", e),
    })?;
    InvoiceRequest::from_json(&text)
}

fn is_proxy_event(payload: &Value) -> bool {
    payload.get("httpMethod").is_some()
}

/// Runs one invocation. Proxy events are dispatched on `httpMethod`; a bare
/// invoice payload is treated as a POST.
pub async fn handle<T: TemplateSource>(
    generator: &InvoiceGenerator<T>,
    payload: Value,
) -> Response {
    match payload.get("httpMethod").and_then(Value::as_str) {
        Some("OPTIONS") => return Response::preflight(),
        Some("POST") | None => {}
        Some(method) => {
            tracing::warn!("⚠️ Rejected {} request", method);
            return Response::method_not_allowed();
        }
    }

    let result = match parse_request(payload) {
        Ok(request) => generator.generate(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(invoice) => Response::invoice(&invoice),
        Err(e) => {
            if e.status_code() >= 500 {
                tracing::error!("❌ Invoice generation failed: {}", e);
            } else {
                tracing::warn!("⚠️ Rejected request: {}", e);
            }
            Response::error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpTemplateSource, SenderProfile};
    use std::time::Duration;

    fn offline_generator() -> InvoiceGenerator<HttpTemplateSource> {
        InvoiceGenerator::new(
            HttpTemplateSource::new(None, Duration::from_secs(1)),
            SenderProfile::default(),
        )
    }

    fn invoice_payload() -> Value {
        json!({
            "client_info": {"{{client_name}}": "Acme"},
            "invoice_details": {},
            "financials": {},
            "items": [{"description": "Design", "unit_price": 1000000, "quantity": 1, "total": 1000000}],
            "invoice_number": "001"
        })
    }

    fn proxy_event(method: &str, body: Option<String>, base64: bool) -> Value {
        json!({
            "httpMethod": method,
            "body": body,
            "isBase64Encoded": base64
        })
    }

    fn error_message(response: &Response) -> String {
        let body: Value = serde_json::from_str(&response.body).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_raw_payload_is_parsed_directly() {
        let request = parse_request(invoice_payload()).unwrap();
        assert_eq!(request.invoice_number, "001");
        assert_eq!(request.items.len(), 1);
    }

    #[test]
    fn test_proxy_body_is_parsed() {
        let event = proxy_event("POST", Some(invoice_payload().to_string()), false);
        let request = parse_request(event).unwrap();
        assert_eq!(request.client_name(), "Acme");
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let encoded = STANDARD.encode(invoice_payload().to_string());
        let request = parse_request(proxy_event("POST", Some(encoded), true)).unwrap();
        assert_eq!(request.invoice_number, "001");
    }

    #[test]
    fn test_invalid_base64_is_a_bad_request() {
        let err = parse_request(proxy_event("POST", Some("%%%".to_string()), true)).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidRequestError { .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_invalid_utf8_is_a_bad_request() {
        let encoded = STANDARD.encode([0xffu8, 0xfe, 0xfd]);
        let err = parse_request(proxy_event("POST", Some(encoded), true)).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_proxy_event_without_body_reports_missing_field() {
        let err = parse_request(proxy_event("POST", None, false)).unwrap_err();
        assert!(matches!(err, InvoiceError::MissingFieldError { .. }));
    }

    #[tokio::test]
    async fn test_preflight_returns_cors_headers() {
        let response = handle(&offline_generator(), proxy_event("OPTIONS", None, false)).await;

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(response.headers["Access-Control-Allow-Methods"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_other_methods_are_rejected() {
        let response = handle(&offline_generator(), proxy_event("GET", None, false)).await;

        assert_eq!(response.status_code, 405);
        assert_eq!(error_message(&response), "Method not allowed");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Content-Type"], "application/json");
    }

    #[tokio::test]
    async fn test_successful_response_shape() {
        let event = proxy_event("POST", Some(invoice_payload().to_string()), false);
        let response = handle(&offline_generator(), event).await;

        assert_eq!(response.status_code, 200);
        assert!(response.is_base64_encoded);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            response.headers["Content-Disposition"],
            "attachment; filename=\"Invoice_001_Acme.docx\""
        );
        let bytes = STANDARD.decode(&response.body).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["statusCode"], 200);
        assert_eq!(serialized["isBase64Encoded"], true);
    }

    #[tokio::test]
    async fn test_bad_request_carries_cors_header() {
        let event = proxy_event("POST", Some("{\"client_info\": ".to_string()), false);
        let response = handle(&offline_generator(), event).await;

        assert_eq!(response.status_code, 400);
        assert!(error_message(&response).starts_with("Invalid JSON in request body"));
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert!(!response.is_base64_encoded);
    }
}
