use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("XML processing failed: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON in request body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid request: {message}")]
    InvalidRequestError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Document error: {message}")]
    DocumentError { message: String },

    #[error("Styling error: {message}")]
    StylingError { message: String },
}

/// Template download failures. Every variant is recoverable: the caller
/// switches to the built-in template.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no template URL configured")]
    NotConfigured,

    #[error("template request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("template host answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("downloaded template is not a readable .docx: {0}")]
    Malformed(#[source] InvoiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Styling,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl InvoiceError {
    pub fn document(message: impl Into<String>) -> Self {
        Self::DocumentError {
            message: message.into(),
        }
    }

    pub fn styling(message: impl Into<String>) -> Self {
        Self::StylingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedJson(_)
            | Self::MissingFieldError { .. }
            | Self::InvalidRequestError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::StylingError { .. } => ErrorCategory::Styling,
            Self::ZipError(_) | Self::XmlError(_) | Self::IoError(_) | Self::DocumentError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Styling => ErrorSeverity::Low,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// HTTP status reported at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MalformedJson(_) => "Check that the request body is valid JSON",
            Self::MissingFieldError { .. } => {
                "Include client_info, invoice_details, items and financials in the request"
            }
            Self::InvalidRequestError { .. } => {
                "Check the field types: items need description, unit_price, quantity and total"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the template URL, asset URLs and timeout settings"
            }
            Self::StylingError { .. } => "Check that the template has a 5-row financial table",
            Self::DocumentError { .. } | Self::XmlError(_) | Self::ZipError(_) => {
                "Check that the template is a valid .docx with an items table and a financial table"
            }
            Self::IoError(_) => "Check file permissions and the output directory",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Styling => format!("Invoice styling incomplete: {}", self),
            ErrorCategory::Internal => format!("Invoice generation failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
