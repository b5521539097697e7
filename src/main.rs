use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use opsdesk::api;
use opsdesk::backup::BackupScheduler;
use opsdesk::config::{OpsdeskPaths, Settings};
use opsdesk::context::AppContext;
use opsdesk::store::Datasets;

#[derive(Parser)]
#[command(
    name = "opsdesk",
    version,
    about = "Small business-management backend",
    long_about = "opsdesk serves work orders, quotes, a financial ledger and \
                  dashboard KPIs over HTTP, with token-based authentication \
                  and scheduled backups of the in-memory datasets."
)]
struct Cli {
    /// Address to bind the HTTP server to (overrides the settings file)
    #[arg(long, env = "OPSDESK_BIND")]
    bind: Option<String>,

    /// Base data directory (overrides the default platform path)
    #[arg(long, env = "OPSDESK_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Start with empty datasets instead of the demo records
    #[arg(long)]
    no_sample_data: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("opsdesk=info")),
        )
        .init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => OpsdeskPaths::with_base_dir(dir),
        None => OpsdeskPaths::new()?,
    };
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(&paths)?;
    let bind_addr = cli.bind.unwrap_or_else(|| settings.bind_addr.clone());

    let datasets = if cli.no_sample_data {
        Datasets::new()
    } else {
        Datasets::with_sample_data()
    };

    let ctx = AppContext::new(&paths, settings, datasets)?;

    // The scheduler holds the shared datasets for the process lifetime;
    // its timer tasks stop with the process.
    let _scheduler = BackupScheduler::start(
        ctx.datasets.clone(),
        ctx.backup_root.clone(),
        ctx.settings.retention_days,
    );

    let app = api::router(ctx);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "opsdesk listening");

    axum::serve(listener, app).await?;

    Ok(())
}
