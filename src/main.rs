use anyhow::Context;
use clap::Parser;
use docx_invoice::domain::ports::Storage;
use docx_invoice::utils::error::{ErrorSeverity, InvoiceError};
use docx_invoice::utils::{logger, validation::Validate};
use docx_invoice::{CliConfig, InvoiceGenerator, InvoiceRequest, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting docx-invoice CLI");

    if let Some(path) = config.config.clone() {
        let file = TomlConfig::from_file(&path)
            .and_then(|file| file.validate().map(|_| file))
            .with_context(|| format!("loading config file {}", path.display()))?;
        tracing::info!("📁 Loaded config file: {}", path.display());
        config = config.with_file_defaults(&file);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let generator = InvoiceGenerator::from_config(&config, config.monitor);
    let storage = LocalStorage::new(config.output_dir().to_string());

    match run(&config, &generator, &storage).await {
        Ok(output_path) => {
            tracing::info!("✅ Invoice generated successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("{}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Invoice generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 2,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(
    config: &CliConfig,
    generator: &InvoiceGenerator<docx_invoice::HttpTemplateSource>,
    storage: &LocalStorage,
) -> Result<String, InvoiceError> {
    let body = std::fs::read_to_string(&config.request)?;
    let request = InvoiceRequest::from_json(&body)?;

    let invoice = generator.generate(&request).await?;
    storage.write_file(&invoice.filename, &invoice.bytes).await
}
