mod adapters;
mod app;
mod core;
mod global_constants;
mod ports;
mod presentation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::app::CloudOcrApp;
use crate::core::models::{AnnotationOptions, AppSettings};
use crate::global_constants::{APPLICATION_NAME, LOG_TAG_APP};

/// Pick a picture, send it to the cloud OCR function and print the text.
#[derive(Parser, Debug)]
#[command(name = "cloud-ocr-demo", version, about)]
struct Cli {
    /// Settings file to use instead of the per-user one.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Annotate this picture once and exit.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Send the English language hint.
    #[arg(long, requires = "image")]
    english: bool,

    /// Send the handwriting language hint.
    #[arg(long, requires = "image")]
    handwritten: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    log::info!("{} Starting {}", LOG_TAG_APP, APPLICATION_NAME);

    let settings_path = match cli.config {
        Some(path) => path,
        None => AppSettings::default_path()?,
    };
    let settings = AppSettings::load_from(&settings_path)?;

    match cli.image {
        Some(image) => {
            let options = AnnotationOptions {
                use_english_hint: cli.english,
                use_handwritten_hint: cli.handwritten,
            };
            let text = CloudOcrApp::run_once(&settings, image, options).await?;
            println!("{}", text);
            Ok(())
        }
        None => CloudOcrApp::run_interactive(&settings).await,
    }
}
