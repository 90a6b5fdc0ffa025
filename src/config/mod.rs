pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::template::DEFAULT_TIMEOUT_SECONDS;
use crate::core::ConfigProvider;
use crate::domain::model::SenderProfile;
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "./output";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "docx-invoice"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Generate a .docx invoice from a JSON request")
)]
pub struct CliConfig {
    /// Invoice request JSON file
    #[cfg_attr(feature = "cli", arg(long))]
    pub request: PathBuf,

    /// Directory the generated document is written to
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_dir: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, env = "INVOICE_TEMPLATE_URL"))]
    pub template_url: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, env = "PAID_STAMP_URL"))]
    pub paid_stamp_url: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, env = "SIGNATURE_URL"))]
    pub signature_url: Option<String>,

    /// Template download timeout
    #[cfg_attr(feature = "cli", arg(long, env = "TEMPLATE_TIMEOUT_SECONDS"))]
    pub timeout_seconds: Option<u64>,

    /// TOML configuration file; command-line values take precedence
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<PathBuf>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU and memory usage per phase"))]
    pub monitor: bool,

    #[cfg_attr(feature = "cli", arg(skip))]
    #[serde(default)]
    pub sender: Option<SenderProfile>,
}

impl CliConfig {
    /// Fills every value not given on the command line from a TOML config.
    pub fn with_file_defaults(mut self, file: &toml_config::TomlConfig) -> Self {
        if self.template_url.is_none() {
            self.template_url = file.template.url.clone();
        }
        if self.timeout_seconds.is_none() {
            self.timeout_seconds = file.template.timeout_seconds;
        }
        if self.paid_stamp_url.is_none() {
            self.paid_stamp_url = file.assets.paid_stamp_url.clone();
        }
        if self.signature_url.is_none() {
            self.signature_url = file.assets.signature_url.clone();
        }
        if self.output_dir.is_none() {
            self.output_dir = file.output.directory.clone();
        }
        if self.sender.is_none() {
            self.sender = file.sender.clone();
        }
        self
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }
}

impl ConfigProvider for CliConfig {
    fn template_url(&self) -> Option<&str> {
        self.template_url.as_deref().filter(|u| !u.is_empty())
    }

    fn paid_stamp_url(&self) -> Option<&str> {
        self.paid_stamp_url.as_deref().filter(|u| !u.is_empty())
    }

    fn signature_url(&self) -> Option<&str> {
        self.signature_url.as_deref().filter(|u| !u.is_empty())
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn sender_profile(&self) -> SenderProfile {
        self.sender.clone().unwrap_or_default()
    }
}

impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        use crate::utils::validation::*;

        validate_optional_url("template_url", self.template_url())?;
        validate_optional_url("paid_stamp_url", self.paid_stamp_url())?;
        validate_optional_url("signature_url", self.signature_url())?;
        validate_range("timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validate_path("request", &self.request.to_string_lossy())?;
        validate_path("output_dir", self.output_dir())?;

        Ok(())
    }
}
