use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kdag_consensus::processes::coinbase_manager::subsidy_table::generate_subsidy_table;
use kdag_consensus::processes::coinbase_manager::{CoinbaseManager, SECONDS_PER_MONTH};
use kdag_consensus::{ConsensusParams, SUBSIDY_BY_DEFLATIONARY_MONTH};
use kdag_storage::MemoryStorage;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the deflationary subsidy table regenerated from a base subsidy.
    Generate(GenerateArgs),
    /// Compare the regenerated table with the one compiled into consensus.
    Check(CheckArgs),
    /// Print the subsidy a block at a DAA score may mint.
    Subsidy(SubsidyArgs),
    /// Print the effective consensus params as TOML.
    Params(ParamsArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Rust,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Network {
    Mainnet,
    Devnet,
}

impl Network {
    fn base_params(self) -> ConsensusParams {
        match self {
            Network::Mainnet => ConsensusParams::mainnet(),
            Network::Devnet => ConsensusParams::devnet(),
        }
    }
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Base subsidy in sompi for month zero (defaults to the compiled-in table's).
    #[arg(long)]
    base: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Rust)]
    format: Format,

    /// Values per line in Rust output
    #[arg(long, default_value_t = 8)]
    per_line: usize,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    #[arg(long)]
    base: Option<u64>,

    /// Allowed per-entry difference caused by floating point pow()
    #[arg(long, default_value_t = 1)]
    tolerance: u64,
}

#[derive(Debug, Parser)]
struct SubsidyArgs {
    daa_score: u64,

    #[command(flatten)]
    params: ParamsArgs,
}

#[derive(Debug, Parser)]
struct ParamsArgs {
    #[arg(long, value_enum, default_value_t = Network::Mainnet)]
    network: Network,

    /// TOML file layered over the network preset
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ParamsArgs {
    fn load(&self) -> Result<ConsensusParams> {
        ConsensusParams::load_with_base(self.network.base_params(), self.config.as_deref())
            .context("loading consensus params")
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().cmd {
        Command::Generate(args) => generate(args),
        Command::Check(args) => check(args),
        Command::Subsidy(args) => subsidy(args),
        Command::Params(args) => {
            let params = args.load()?;
            print!("{}", toml::to_string_pretty(&params)?);
            Ok(())
        }
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let base = args.base.unwrap_or(SUBSIDY_BY_DEFLATIONARY_MONTH[0]);
    let table = generate_subsidy_table(base);
    info!(base, months = table.len(), "generated subsidy table");

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&table)?),
        Format::Rust => {
            println!("pub static SUBSIDY_BY_DEFLATIONARY_MONTH: [u64; {}] = [", table.len());
            for chunk in table.chunks(args.per_line.max(1)) {
                let line: Vec<String> = chunk.iter().map(|v| format!("{v},")).collect();
                println!("    {}", line.join(" "));
            }
            println!("];");
        }
    }
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    let base = args.base.unwrap_or(SUBSIDY_BY_DEFLATIONARY_MONTH[0]);
    let generated = generate_subsidy_table(base);

    if generated.len() != SUBSIDY_BY_DEFLATIONARY_MONTH.len() {
        warn!(
            generated = generated.len(),
            compiled = SUBSIDY_BY_DEFLATIONARY_MONTH.len(),
            "table lengths differ"
        );
    }

    let mut mismatches = 0usize;
    for (month, (generated, compiled)) in generated
        .iter()
        .zip(SUBSIDY_BY_DEFLATIONARY_MONTH.iter())
        .enumerate()
    {
        if generated.abs_diff(*compiled) > args.tolerance {
            mismatches += 1;
            warn!(month, generated, compiled, "subsidy mismatch");
        }
    }

    if mismatches > 0 || generated.len() != SUBSIDY_BY_DEFLATIONARY_MONTH.len() {
        bail!("compiled-in table does not match base subsidy {base} ({mismatches} mismatching months)");
    }
    info!(base, months = generated.len(), "compiled-in table matches");
    Ok(())
}

fn subsidy(args: SubsidyArgs) -> Result<()> {
    let params = args.params.load()?;
    let storage = Arc::new(MemoryStorage::new());
    let manager = CoinbaseManager::new(
        &params,
        storage.clone(),
        storage.clone(),
        storage.clone(),
        storage,
        tracing::Span::none(),
    );

    let subsidy = manager.subsidy_at_daa_score(args.daa_score);
    let month = args
        .daa_score
        .checked_sub(params.deflationary_phase_daa_score)
        .map(|elapsed| elapsed / SECONDS_PER_MONTH);
    match month {
        Some(month) => println!("daa_score={} month={} subsidy={}", args.daa_score, month, subsidy),
        None => println!("daa_score={} pre-deflationary subsidy={}", args.daa_score, subsidy),
    }
    Ok(())
}
