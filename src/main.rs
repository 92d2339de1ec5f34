//! # vptoken
//!
//! Presents the configured credential to the verifier, then prints the
//! `Streetlight` entities returned by the context broker.
//!
//! Exits with status 0 on success and 1 on any failure, after writing a single
//! diagnostic line to stderr.

use std::process::ExitCode;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;
use vptoken::signer::RsaSigner;
use vptoken::{Config, PresentationFlow, TimeWindow, VerifiableCredential};

#[tokio::main]
async fn main() -> ExitCode {
    // captured before any other work so every timestamp agrees
    let window = TimeWindow::now();

    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match run(&window).await {
        Ok(entities) => {
            match serde_json::to_string_pretty(&entities) {
                Ok(pretty) => println!("{pretty}"),
                Err(_) => println!("{entities}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let stage = e.stage();
            let err = anyhow!(e).context(format!("{stage} failed"));
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(window: &TimeWindow) -> vptoken::Result<serde_json::Value> {
    let config = Config::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let vc = VerifiableCredential::load(&config.credential_path).await?;
    let signer = RsaSigner::from_pem(&config.private_key)?;

    PresentationFlow::new(signer, config.endpoints).run(&vc, window).await
}
