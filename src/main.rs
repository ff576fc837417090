mod adapters;
mod core;
mod global_constants;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::adapters::{AzureReadOcrClient, OpenAiChatClient};
use crate::core::models::{AppSettings, PrescriptionRecord, ServiceCredentials};
use crate::core::orchestrators::{
    HandwritingExtractor, PrescriptionPipeline, PrescriptionStructurer,
};

#[derive(Debug, Parser)]
#[command(name = "prescription-reader", version, about)]
struct Cli {
    /// Prescription image to read
    #[arg(default_value = global_constants::DEFAULT_IMAGE_PATH)]
    image: PathBuf,

    /// Directory for the Extracted_<stem>.txt/.json outputs
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Give up on the OCR job after this many status checks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_poll_attempts: Option<u32>,
}

fn load_settings(cli: &Cli) -> AppSettings {
    let mut settings = AppSettings::load().unwrap_or_else(|e| {
        log::warn!("[MAIN] Failed to load settings: {}, using defaults", e);
        AppSettings::default()
    });

    settings.apply_environment_overrides(|key| std::env::var(key).ok());

    if let Some(output_dir) = &cli.output_dir {
        settings.output_directory = Some(output_dir.clone());
    }
    if let Some(max_attempts) = cli.max_poll_attempts {
        settings.poll_policy.max_attempts = max_attempts;
    }

    settings
}

fn build_pipeline(settings: &AppSettings, credentials: &ServiceCredentials) -> PrescriptionPipeline {
    let output_directory = settings.resolved_output_directory();

    let ocr_client = Arc::new(AzureReadOcrClient::new(
        credentials.azure_endpoint.clone(),
        credentials.azure_api_key.clone(),
    ));
    let chat_client = Arc::new(OpenAiChatClient::new(
        settings.openai_base_url.clone(),
        credentials.openai_api_key.clone(),
        settings.openai_model.clone(),
    ));

    PrescriptionPipeline::build(
        HandwritingExtractor::build(
            ocr_client,
            settings.poll_policy.clone(),
            output_directory.clone(),
        ),
        PrescriptionStructurer::build(chat_client, settings.temperature, output_directory),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_NAME);

    let settings = load_settings(&cli);
    let credentials = ServiceCredentials::from_environment();
    log::debug!("[MAIN] Credentials: {:?}", credentials);

    let pipeline = build_pipeline(&settings, &credentials);

    match pipeline.run(&cli.image).await {
        Ok(Some(record)) => {
            let summary = PrescriptionRecord::from_value(&record);
            log::info!(
                "[MAIN] Structured prescription for '{}' with {} medicine(s)",
                summary.name,
                summary.medicines.len()
            );

            match serde_json::to_string_pretty(&record) {
                Ok(pretty) => println!("\nFinal Structured Data:\n{}", pretty),
                Err(e) => log::error!("[MAIN] Failed to render structured data: {}", e),
            }
        }
        Ok(None) => {
            log::info!("[MAIN] No text extracted, nothing to structure");
        }
        Err(e) => {
            log::error!("[MAIN] Pipeline failed ({}): {}", e.kind(), e);
            std::process::exit(1);
        }
    }
}
