use crate::core::template::DEFAULT_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::domain::model::SenderProfile;
use crate::utils::error::{InvoiceError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    pub sender: Option<SenderProfile>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub paid_stamp_url: Option<String>,
    pub signature_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InvoiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InvoiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables are kept.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InvoiceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn template_url(&self) -> Option<&str> {
        self.template.url.as_deref().filter(|u| !u.is_empty())
    }

    fn paid_stamp_url(&self) -> Option<&str> {
        self.assets.paid_stamp_url.as_deref().filter(|u| !u.is_empty())
    }

    fn signature_url(&self) -> Option<&str> {
        self.assets.signature_url.as_deref().filter(|u| !u.is_empty())
    }

    fn timeout_seconds(&self) -> u64 {
        self.template.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn sender_profile(&self) -> SenderProfile {
        self.sender.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_optional_url("template.url", self.template_url())?;
        validate_optional_url("assets.paid_stamp_url", self.paid_stamp_url())?;
        validate_optional_url("assets.signature_url", self.signature_url())?;
        validate_range("template.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        if let Some(directory) = &self.output.directory {
            validate_path("output.directory", directory)?;
        }
        if let Some(sender) = &self.sender {
            validate_non_empty_string("sender.company", &sender.company)?;
        }
        Ok(())
    }
}
