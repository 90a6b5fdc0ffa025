use docx_invoice::handler::{self, Response};
use docx_invoice::utils::{logger, validation::Validate};
use docx_invoice::{HttpTemplateSource, InvoiceGenerator, LambdaConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn function_handler(
    generator: &InvoiceGenerator<HttpTemplateSource>,
    event: LambdaEvent<Value>,
) -> Result<Response, Error> {
    tracing::info!("Received invoice request {}", event.context.request_id);

    let response = handler::handle(generator, event.payload).await;
    tracing::info!("Responding with status {}", response.status_code);
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let generator = InvoiceGenerator::from_config(&config, false);
    let generator = &generator;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(generator, event).await
    }))
    .await
}
