use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sender_config::ConfigLoader;
use sender_core::BundleSender;
use sender_relay::{AlloyChain, MevShareRelay};
use sender_types::{BundleEntry, SenderConfig, StaticEntries};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sender-service")]
#[command(about = "MEV-Share bundle sender", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/sender.toml")]
	config: PathBuf,

	#[arg(long, env = "SENDER_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Submit a bundle of pre-signed transactions and watch for inclusion
	Send {
		/// JSON file with the signed bundle entries: [{ "tx": "0x..", "canRevert": bool }]
		#[arg(short, long, value_name = "FILE")]
		entries: PathBuf,

		/// Pin the first targeted block instead of using head + 1
		#[arg(long)]
		target_block: Option<u64>,
	},
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level);

	let config = load_config(&cli.config).await?;

	match cli.command {
		Commands::Send {
			entries,
			target_block,
		} => send_bundle(config, &entries, target_block).await,
		Commands::Validate => {
			info!("Configuration is valid");
			Ok(())
		}
	}
}

async fn load_config(path: &Path) -> Result<SenderConfig> {
	info!("Loading configuration from: {:?}", path);
	ConfigLoader::new()
		.with_file(path)
		.load()
		.await
		.context("Failed to load configuration")
}

async fn send_bundle(
	config: SenderConfig,
	entries_path: &Path,
	target_block: Option<u64>,
) -> Result<()> {
	let entries = read_entries(entries_path).await?;
	info!(
		sender = %config.sender.name,
		txs = entries.len(),
		relay = %config.relay.url,
		"Submitting bundle"
	);

	let chain = Arc::new(AlloyChain::connect_http(&config.chain.rpc_url)?);
	let relay = Arc::new(MevShareRelay::from_config(&config.relay)?);

	let sender = BundleSender::builder()
		.with_chain(chain)
		.with_relay(relay)
		.with_config(&config)
		.build()?;

	// Ctrl-C stops the inclusion watch instead of killing the process
	// mid-report.
	let canceller = sender.canceller();
	tokio::spawn(async move {
		if signal::ctrl_c().await.is_ok() {
			warn!("Interrupt received, stopping inclusion watch");
			let _ = canceller.send(());
		}
	});

	let outcome = sender
		.run(&StaticEntries(entries), config.privacy.clone(), target_block)
		.await?;

	match &outcome.receipt {
		Some(receipt) => info!(
			block = receipt.block_number,
			status = ?receipt.status,
			"Bundle included"
		),
		None => info!(
			max_block = outcome.bundle.inclusion.max_block,
			"Bundle not included within the target window"
		),
	}

	println!("{}", serde_json::to_string_pretty(&outcome)?);
	Ok(())
}

async fn read_entries(path: &Path) -> Result<Vec<BundleEntry>> {
	let content = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("Failed to read entries file {:?}", path))?;
	let entries: Vec<BundleEntry> =
		serde_json::from_str(&content).context("Failed to parse entries file")?;
	Ok(entries)
}

fn setup_tracing(log_level: &str) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}
