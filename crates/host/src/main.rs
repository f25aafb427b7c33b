//! Console host for the destroy plugin.
//!
//! Stands in for a game server: it owns an in-memory permission table and
//! entity list, builds the plugin against them, and feeds it one console
//! line at a time from stdin. Chat delivered to actors is printed to stdout;
//! logs go to stderr (filter with `RUST_LOG`).
//!
//! ```bash
//! printf 'spawn 12\ngrant 7 destroy.use\nchat 7 /destroy\nhit 7 12\n' | cargo run -p destroy-host
//! ```

mod console;
mod world;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use destroy_runtime::{DestroyPlugin, FileConfigRepository, RuntimeConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

use console::ConsoleCommand;
use world::ServerWorld;

/// Console host for the destroy plugin
#[derive(Parser)]
#[command(name = "destroy")]
#[command(about = "Drive the destroy plugin from a line-oriented console", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (overrides DESTROY_CONFIG_PATH / DESTROY_DATA_DIR)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let runtime_config = match cli.config {
        Some(path) => RuntimeConfig::new(path),
        None => RuntimeConfig::from_env(),
    };

    tracing::info!("Config file: {}", runtime_config.config_path.display());

    let world = Arc::new(ServerWorld::new());
    let plugin = DestroyPlugin::builder()
        .config_repository(Arc::new(FileConfigRepository::new(
            &runtime_config.config_path,
        )))
        .permissions(world.clone())
        .destroyer(world.clone())
        .messenger(world.clone())
        .build()?;

    run_console(&plugin, &world).await?;

    plugin.shutdown();
    tracing::info!("Console host shutdown complete");
    Ok(())
}

async fn run_console(plugin: &DestroyPlugin, world: &ServerWorld) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            }
        };

        let quit = command == ConsoleCommand::Quit;
        for output in console::execute(plugin, world, command) {
            println!("{output}");
        }
        if quit {
            break;
        }
    }

    Ok(())
}
