//! Command handlers

use std::sync::Arc;

use stockroom_api::AppState;
use stockroom_app::{importer, seed, Config, LogSink};
use stockroom_store::Store;
use stockroom_types::{Error, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::output;

pub fn execute(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            addr,
            database_url,
            seed: seed_first,
        } => serve(addr, database_url, seed_first).await,
        Commands::Import {
            file,
            dataset,
            replace_inventory,
            format,
        } => {
            let config = Config::load()?;
            let store = Store::open(&config.database_url).await?;
            let data = std::fs::read(&file)?;
            let filename = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "upload.csv".to_string());
            let report = importer::import_csv(
                &store,
                &data,
                &filename,
                dataset.as_deref(),
                replace_inventory,
            )
            .await?;
            output::print_import_report(format, &report)
        }
        Commands::Seed => {
            let config = Config::load()?;
            let store = Store::open(&config.database_url).await?;
            if seed::apply(&store).await? {
                println!("Seeded demo dataset into {}", config.database_url);
            } else {
                println!("Database already has data; nothing to do");
            }
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn serve(addr: Option<String>, database_url: Option<String>, seed_first: bool) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(addr) = addr {
        config.addr = addr;
    }
    if let Some(database_url) = database_url {
        config.database_url = database_url;
    }

    let store = Store::open(&config.database_url).await?;
    if seed_first && seed::apply(&store).await? {
        tracing::info!("seeded demo dataset");
    }

    let bind_addr: std::net::SocketAddr = config
        .addr
        .parse()
        .map_err(|e| Error::Server(format!("invalid bind address '{}': {e}", config.addr)))?;

    let state = AppState {
        store,
        config: Arc::new(config),
        events: Arc::new(LogSink),
    };
    let app = stockroom_api::router(state);

    tracing::info!(%bind_addr, "listening");
    axum::Server::bind(&bind_addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| Error::Server(e.to_string()))?;
    Ok(())
}
