use chrono::Utc;
use clap::Parser;
use importer::{SeedDocument, SeedLoader, SeedValidator};
use std::path::PathBuf;
use storage::{Database, Stores};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fittrack-import")]
#[command(about = "FitTrack seed data importer", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed document to import
    file: PathBuf,

    /// Only validate the document, do not touch the database
    #[arg(long)]
    validate_only: bool,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "fittrack_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Reading seed document: {}", cli.file.display());
    let json = tokio::fs::read_to_string(&cli.file).await?;
    let seed = SeedDocument::from_json(&json)?;

    tracing::info!(
        "Loaded seed document v{} with {} entries",
        seed.format_version,
        seed.len()
    );

    tracing::info!("Validating seed document...");
    let now = Utc::now();
    let report = SeedValidator::validate(&seed, now)?;
    report.log_warnings();
    tracing::info!("✓ Validation successful!");

    if cli.validate_only {
        return Ok(());
    }

    let database_url = cli
        .database_url
        .ok_or("DATABASE_URL is required unless --validate-only is set")?;

    tracing::info!("Connecting to database...");
    let db = Database::new(&database_url, cli.max_connections).await?;
    db.run_migrations().await?;

    let stores = Stores::postgres(&db);
    let summary = SeedLoader::new(&stores, &db).load(seed, now).await?;

    tracing::info!(
        "✓ Import completed successfully! {} workout plan(s), {} workout(s), {} goal(s), {} personal record(s)",
        summary.workout_plans,
        summary.workouts,
        summary.goals,
        summary.personal_records
    );

    Ok(())
}
