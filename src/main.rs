//! MediTrack
//!
//! Main entry point: serve the HTTP API or classify a single reading.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use meditrack::api::{self, AppState};
use meditrack::config::{self, Config};
use meditrack::core::{HealthLogService, VitalStatusEvaluator};
use meditrack::db::InMemoryHealthLogStore;
use meditrack::models::{VitalType, VitalValue};
use meditrack::notifications::InMemoryDispatcher;

#[derive(Parser)]
#[command(name = "meditrack", about = "MediTrack vital-sign status service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Classify one reading, e.g. `classify blood_pressure 145/95`
    Classify { vital_type: VitalType, value: String },
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { vital_type, value } => {
            // Without a config/ directory, classify against the built-in thresholds.
            let config = config::load_config_if_present().context("failed to load configuration")?;
            init_tracing(config.as_ref().map_or(false, |c| c.log.json));

            let evaluator = match &config {
                Some(config) => evaluator_from(config),
                None => VitalStatusEvaluator::default(),
            };
            let evaluation = evaluator.assess(vital_type, &VitalValue::from(value.as_str()))?;
            println!(
                "{} {} -> {} (alertable: {})",
                vital_type, value, evaluation.status, evaluation.alertable
            );
        }
        Commands::Serve => {
            let config = config::load_config().context("failed to load configuration")?;
            init_tracing(config.log.json);
            let evaluator = evaluator_from(&config);
            serve(config, evaluator).await?;
        }
    }

    Ok(())
}

fn evaluator_from(config: &Config) -> VitalStatusEvaluator {
    VitalStatusEvaluator::new(Arc::new(config.thresholds.clone()))
        .with_missing_as_normal(config.evaluator.missing_as_normal)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn serve(config: Config, evaluator: VitalStatusEvaluator) -> Result<()> {
    let health_logs = HealthLogService::new(
        evaluator,
        Arc::new(InMemoryHealthLogStore::new()),
        Arc::new(InMemoryDispatcher::new()),
    );
    let state = web::Data::new(AppState::new(health_logs));

    info!(host = %config.server.host, port = config.server.port, "starting MediTrack API");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .configure(api::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))
    .context("failed to bind server address")?
    .run()
    .await
    .context("server terminated")
}
