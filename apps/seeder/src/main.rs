//! CLI entry point for seeding demo posts.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use quill_infra::{
    DatabaseConfig, DatabaseConnection, PostgresAuthorRepository, PostgresPostRepository,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod demo;
mod seed;

use seed::Seeder;

#[derive(Parser)]
#[command(name = "seed-posts")]
#[command(about = "Generate demo authors and posts", long_about = None)]
struct Cli {
    /// Number of posts to create
    #[arg(short, long, default_value_t = 25)]
    count: usize,

    /// Delete all existing posts first
    #[arg(long)]
    clear: bool,

    /// Apply pending migrations before seeding
    #[arg(long)]
    migrate: bool,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = DatabaseConnection::init(&DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
        connect_timeout: std::time::Duration::from_secs(10),
    })
    .await
    .context("failed to connect to database")?;

    if cli.migrate {
        Migrator::up(&db.conn, None)
            .await
            .context("failed to apply migrations")?;
        tracing::info!("Migrations applied");
    }

    let seeder = Seeder::new(
        Arc::new(PostgresPostRepository::new(db.conn.clone())),
        Arc::new(PostgresAuthorRepository::new(db.conn.clone())),
    );
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let summary = seeder
        .run(cli.count, cli.clear, &mut rng, chrono::Utc::now())
        .await
        .context("seeding failed")?;

    tracing::info!(
        published = summary.published,
        drafts = summary.drafts,
        authors_created = summary.authors_created,
        cleared = summary.cleared,
        "Generation complete"
    );
    Ok(())
}
