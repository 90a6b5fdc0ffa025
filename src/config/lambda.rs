use crate::core::template::DEFAULT_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::utils::error::{InvoiceError, Result};
use std::env;

/// Settings of the function deployment, read from the environment once at
/// cold start.
#[derive(Debug, Clone, Default)]
pub struct LambdaConfig {
    pub template_url: Option<String>,
    pub paid_stamp_url: Option<String>,
    pub signature_url: Option<String>,
    pub timeout_seconds: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let timeout_seconds = match env::var("TEMPLATE_TIMEOUT_SECONDS") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| InvoiceError::InvalidConfigValueError {
                    field: "TEMPLATE_TIMEOUT_SECONDS".to_string(),
                    value,
                    reason: "must be a whole number of seconds".to_string(),
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            template_url: non_empty_var("INVOICE_TEMPLATE_URL"),
            paid_stamp_url: non_empty_var("PAID_STAMP_URL"),
            signature_url: non_empty_var("SIGNATURE_URL"),
            timeout_seconds,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ConfigProvider for LambdaConfig {
    fn template_url(&self) -> Option<&str> {
        self.template_url.as_deref()
    }

    fn paid_stamp_url(&self) -> Option<&str> {
        self.paid_stamp_url.as_deref()
    }

    fn signature_url(&self) -> Option<&str> {
        self.signature_url.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_optional_url("INVOICE_TEMPLATE_URL", self.template_url())?;
        validate_optional_url("PAID_STAMP_URL", self.paid_stamp_url())?;
        validate_optional_url("SIGNATURE_URL", self.signature_url())?;
        validate_range("TEMPLATE_TIMEOUT_SECONDS", self.timeout_seconds, 1, 300)?;

        Ok(())
    }
}
