use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ens_claims_core::{AggregateResult, BatchVerifier, VerifierConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod batch;
mod fixture;
mod prover;

use batch::BatchFile;
use fixture::FixtureProvider;

#[derive(Parser)]
#[command(
    name = "ens-claims",
    version,
    about = "Verify and prove batches of ENS registration claims"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the verifier natively, without producing a proof
    Verify(InputArgs),
    /// Prove the batch in the zkVM and verify the receipt
    Prove(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Claim batch JSON (block_numbers, tx_idxs, log_idxs, optional num_claims)
    #[arg(long)]
    batch: PathBuf,
    /// Attested block and receipt values for every claimed log
    #[arg(long)]
    attestations: PathBuf,
    /// Verifier settings JSON; defaults to the Sepolia ENS controller
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<VerifierConfig> {
    let Some(path) = path else {
        return Ok(VerifierConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn log_result(result: &AggregateResult) {
    info!(
        first_claim_id = %result.first_claim_id,
        last_claim_id = %result.last_claim_id,
        referrer_id = %result.referrer_id,
        total_value = %result.total_value,
        "claim batch verified"
    );
}

fn main() -> Result<()> {
    // Keep risc0 internals quiet unless RUST_LOG asks otherwise
    let mut filter = EnvFilter::new("info,risc0_zkvm=warn,risc0_circuit_rv32im=warn");
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        if let Ok(parsed) = env_filter.parse() {
            filter = filter.add_directive(parsed);
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let (args, prove) = match cli.command {
        Commands::Verify(args) => (args, false),
        Commands::Prove(args) => (args, true),
    };

    let config = load_config(args.config.as_deref())?;
    let batch = BatchFile::load(&args.batch)?.into_batch()?;
    let provider = FixtureProvider::load(&args.attestations)?;

    if prove {
        let input = prover::guest_input(config, batch, &provider)?;
        let (_receipt, result) = prover::prove(&input)?;
        log_result(&result);
    } else {
        let result = BatchVerifier::new(config)
            .verify(&batch, &provider)
            .context("claim batch rejected")?;
        log_result(&result);
    }

    Ok(())
}
