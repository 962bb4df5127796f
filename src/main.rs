use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use statebridge::config::{BridgeConfig, ConfigError, DEFAULT_MOUNT, DEFAULT_SLOT_KEY, LoadPolicy};
use statebridge::runtime::{ChannelRuntime, InitialValue};
use statebridge::store::FileStore;
use statebridge::{BridgeError, MountTarget, StateBridge, StoreError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "statebridge", about = "Persist an application's emitted state to a key-value slot")]
struct Cli {
    /// Directory holding slot files.
    #[arg(long, env = "STATEBRIDGE_STORE_DIR", default_value = ".statebridge")]
    store_dir: PathBuf,

    /// Slot key.
    #[arg(long, env = "STATEBRIDGE_KEY", default_value = DEFAULT_SLOT_KEY)]
    key: String,

    /// Mount target passed to the runtime.
    #[arg(long, env = "STATEBRIDGE_MOUNT", default_value = DEFAULT_MOUNT)]
    mount: String,

    /// `fresh-start` or `surface`.
    #[arg(long, env = "STATEBRIDGE_LOAD_POLICY", default_value = "fresh-start")]
    load_policy: LoadPolicy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the persisted model, or `null` if nothing is stored.
    Show,
    /// Persist each JSON line read from stdin as the latest model.
    Run,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BridgeConfig { key: cli.key, mount: MountTarget::new(cli.mount), load_policy: cli.load_policy };
    config.validate()?;

    let store = FileStore::open(&cli.store_dir)?;
    tracing::info!(store = %store.root().display(), key = %config.key, "statebridge starting");

    match cli.command {
        Command::Show => run_show(store, &config),
        Command::Run => run_stdin(store, &config).await,
    }
}

fn run_show(store: FileStore, config: &BridgeConfig) -> Result<(), CliError> {
    let bridge: StateBridge<FileStore> = StateBridge::new(store, config);
    match bridge.load()? {
        InitialValue::Absent => println!("null"),
        InitialValue::Restored(model) => println!("{}", serde_json::to_string_pretty(&model)?),
    }
    Ok(())
}

async fn run_stdin(store: FileStore, config: &BridgeConfig) -> Result<(), CliError> {
    let mut bridge: StateBridge<FileStore> = StateBridge::new(store, config);
    let (tx, mut runtime) = ChannelRuntime::<Value>::new();
    let handle = bridge.start(&mut runtime)?;
    if let InitialValue::Restored(model) = handle.initial() {
        eprintln!("restored: {model}");
    }

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut line_no = 0usize;
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "stdin read failed");
                    break;
                }
            };
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(&line) {
                Ok(model) => {
                    if tx.send(model).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(line = line_no, error = %e, "skipping invalid JSON line"),
            }
        }
    });

    let summary = handle.run().await;
    eprintln!("persisted {} emissions ({} failed) to {}", summary.persisted, summary.failed, config.key);
    Ok(())
}
