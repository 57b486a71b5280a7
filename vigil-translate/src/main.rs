use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;
use vigil_core::common::error::VigilError;
use vigil_core::config::StorageConfig;
use vigil_translate::client::{TranslatorClient, TranslatorConfig};
use vigil_translate::docflow::{container_url, DocumentTranslation};
use vigil_translate::languages;

#[derive(Parser)]
#[command(name = "vigil-translate")]
#[command(about = "Translation workflows against the managed translation collaborator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a piece of text inline
    Text {
        /// Text to translate
        #[arg(long)]
        text: String,
        /// Source language code; omit to auto-detect
        #[arg(long)]
        from: Option<String>,
        /// Comma-separated target language codes (e.g. en,es)
        #[arg(long)]
        to: String,
    },
    /// Print the supported-language glossary
    Languages,
    /// Translate a document through the batch workflow
    Document {
        /// Local file to translate
        #[arg(long)]
        file: PathBuf,
        /// Target language code
        #[arg(long)]
        target_lang: String,
        /// Blob name in the cloud; defaults to the file name
        #[arg(long)]
        blob_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    vigil_core::observability::logging::init_logging("vigil-translate");

    match cli.command {
        Commands::Languages => {
            languages::print_glossary();
        }
        Commands::Text { text, from, to } => {
            let client = TranslatorClient::new(load_translator_config());
            let targets: Vec<String> = to
                .split(',')
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect();

            let replies = client.translate(&text, from.as_deref(), &targets).await?;

            println!("--- TRANSLATION COMPLETE ---");
            for reply in replies {
                if from.is_none() {
                    if let Some(detected) = &reply.detected_language {
                        println!("Detected source language: {}", detected.language);
                    }
                }
                println!("Original text: {}", text);
                for translation in reply.translations {
                    let name = languages::name_for(&translation.to).unwrap_or(&translation.to);
                    println!("Translation ({}): {}", name, translation.text);
                }
            }
        }
        Commands::Document {
            file,
            target_lang,
            blob_name,
        } => {
            let storage = match StorageConfig::from_env() {
                Ok(StorageConfig::Http { endpoint, sas_token }) => {
                    StorageConfig::Http { endpoint, sas_token }
                }
                Ok(StorageConfig::Fs { .. }) => fatal_config(VigilError::Config {
                    message: "document translation requires remote storage \
                              (STORAGE_ENDPOINT and STORAGE_SAS_TOKEN)"
                        .to_string(),
                }),
                Err(err) => fatal_config(err),
            };
            let endpoint = match &storage {
                StorageConfig::Http { endpoint, .. } => endpoint.clone(),
                StorageConfig::Fs { .. } => unreachable!(),
            };
            let source_container = required_env("SOURCE_CONTAINER");
            let target_container = required_env("TARGET_CONTAINER");

            let flow = DocumentTranslation {
                client: TranslatorClient::new(load_translator_config()),
                source: vigil_core::store::open_store(&storage, &source_container),
                target: vigil_core::store::open_store(&storage, &target_container),
                source_url: container_url(&endpoint, &source_container),
                target_url: container_url(&endpoint, &target_container),
            };

            let blob_name = blob_name.unwrap_or_else(|| {
                file.file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| "document".to_string())
            });

            let output = flow.run(&file, &blob_name, &target_lang).await?;
            println!("✅ Translation complete: {}", output.display());
        }
    }

    Ok(())
}

fn load_translator_config() -> TranslatorConfig {
    match TranslatorConfig::from_env() {
        Ok(config) => config,
        Err(err) => fatal_config(err),
    }
}

fn required_env(name: &str) -> String {
    match env::var(name) {
        Ok(value) => value,
        Err(_) => fatal_config(VigilError::Config {
            message: format!("missing required environment variable {}", name),
        }),
    }
}

fn fatal_config(err: VigilError) -> ! {
    error!(error = %err, "configuration error, refusing to start");
    std::process::exit(1);
}
