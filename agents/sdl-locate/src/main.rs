//! SDL Locality Agent
//!
//! Operator tool for the two checks a mount needs before talking to the SDL
//! API: where am I running, and is this SDL response usable.
//!
//! # Usage
//! ```bash
//! # Detect cloud and region from the instance metadata service
//! sdl-locate detect
//!
//! # Skip detection
//! sdl-locate detect --location ncbi
//!
//! # Validate a saved SDL response
//! sdl-locate validate --payload response.json --accession SRR000001
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sdl_core::sdl::{self, SDL_VERSION};
use sdl_core::{LocalityResolver, Locator, ProbeConfig};

// ============================================================
// CLI Definition
// ============================================================

#[derive(Parser)]
#[command(name = "sdl-locate")]
#[command(about = "Cloud locality detection and SDL response checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect which cloud and region this process runs in
    Detect {
        /// Force a location instead of probing (e.g., ncbi, s3.us-east-1)
        #[arg(long, env = "SDL_LOCATION")]
        location: Option<String>,

        /// Override the AWS metadata host
        #[arg(long, env = "SDL_AWS_METADATA_BASE")]
        aws_base: Option<String>,

        /// Override the GCP metadata host
        #[arg(long, env = "SDL_GCP_METADATA_BASE")]
        gcp_base: Option<String>,

        /// Audience for the GCP identity token
        #[arg(long, env = "SDL_TOKEN_AUDIENCE")]
        audience: Option<String>,
    },

    /// Validate a saved SDL API response and print the resulting accessions
    Validate {
        /// Path to the SDL response body
        #[arg(long)]
        payload: PathBuf,

        /// Accessions that were requested (repeatable)
        #[arg(long = "accession", required = true)]
        accessions: Vec<String>,

        /// SDL protocol version to expect
        #[arg(long, env = "SDL_VERSION", default_value = SDL_VERSION)]
        expected_version: String,
    },
}

#[derive(Serialize)]
struct LocalityReport {
    cloud: String,
    region: String,
    locality_type: String,
    has_locality: bool,
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

// ============================================================
// Main Entry Point
// ============================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cli.verbose)));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    match cli.command {
        Commands::Detect {
            location,
            aws_base,
            gcp_base,
            audience,
        } => {
            let locator = match location {
                Some(location) => {
                    info!(%location, "Using forced location");
                    Locator::manual(location)
                }
                None => {
                    let mut config = ProbeConfig::default();
                    if let Some(base) = aws_base {
                        config = config.aws_base(&base);
                    }
                    if let Some(base) = gcp_base {
                        config = config.gcp_base(&base);
                    }
                    if let Some(audience) = audience {
                        config = config.audience(audience);
                    }

                    LocalityResolver::new(config)
                        .context("Failed to initialize metadata client")?
                        .resolve()
                        .await?
                }
            };

            let region = locator
                .region()
                .await
                .context("Failed to resolve region")?;
            let locality = locator.locality().await;

            let report = LocalityReport {
                cloud: locator.cloud_name().to_string(),
                region,
                locality_type: locator.locality_type().to_string(),
                has_locality: !locality.is_empty(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Validate {
            payload,
            accessions,
            expected_version,
        } => {
            let body = std::fs::read(&payload)
                .with_context(|| format!("Failed to read {}", payload.display()))?;

            let requested: HashSet<String> = accessions.into_iter().collect();
            let envelope = sdl::parse_response(&body).context("Failed to decode SDL response")?;
            let accepted = sdl::transfigure_response(envelope, &expected_version, &requested)
                .context("SDL response rejected")?;

            info!("✅ Accepted {} accessions", accepted.len());
            println!("{}", serde_json::to_string_pretty(&accepted)?);
        }
    }

    Ok(())
}
