use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use clap::Parser;
use colored::*;
use miette::{miette, Context, IntoDiagnostic, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::Level;

use bloomset::simulation::{self, SimulationConfig, DEFAULT_KEY_LENGTH, DEFAULT_NUM_KEYS};
use bloomset::DEFAULT_BASE_SEED;

/// Measure the false positive rate of a Bloom filter with random keys
#[derive(Parser, Debug)]
#[command(name = "bloomset", version, about, long_about = None)]
struct Cli {
    /// Number of bits in the filter (prompted for when omitted)
    #[arg(short = 'm', long)]
    size: Option<u32>,

    /// Number of hash functions (prompted for when omitted)
    #[arg(short = 'k', long)]
    hashes: Option<u32>,

    /// Number of random keys to insert, and to probe
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_KEYS)]
    keys: usize,

    /// Length of every generated key
    #[arg(long, default_value_t = DEFAULT_KEY_LENGTH)]
    key_length: usize,

    /// Seed for key generation, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Base seed of the hash functions
    #[arg(long, default_value_t = DEFAULT_BASE_SEED)]
    base_seed: u32,

    /// Print the filter's bytes after inserting
    #[arg(long)]
    print: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let filter_size = match cli.size {
        Some(size) => size,
        None => prompt(&mut input, "Enter size of the bloom filter: ")?,
    };
    let num_hashes = match cli.hashes {
        Some(hashes) => hashes,
        None => prompt(&mut input, "Enter the number of hash functions to be used: ")?,
    };

    if num_hashes == 0 {
        warn("no hash functions: every key will be reported as present");
    }

    let config = SimulationConfig {
        filter_size,
        num_hashes,
        num_keys: cli.keys,
        key_length: cli.key_length,
        base_seed: cli.base_seed,
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (bloom, stats) = simulation::run(&config, &mut rng)
        .wrap_err_with(|| format!("could not simulate a bloom filter of {filter_size} bits"))?;

    if cli.print {
        bloom.print();
    }

    println!("\n{}", "Statistics:".bold());
    info(&format!("FilterSize: {}", stats.filter_size));
    info(&format!("HashFnsSize: {}", stats.num_hashes));
    info(&format!(
        "FalsePositives: {} out of {} non existing keys and {} existing keys.",
        stats.false_positives, stats.non_existent_keys, stats.existing_keys
    ));
    info(&format!(
        "Observed rate: {:.6} (estimated {:.6}, fill ratio {:.4})",
        stats.observed_rate(),
        stats.estimated_rate,
        stats.fill_ratio
    ));

    if stats.false_negatives > 0 {
        return Err(miette!(
            "{} inserted keys were reported absent",
            stats.false_negatives
        ));
    }

    success("no false negatives");

    Ok(())
}

/// Ask for a single value on stdin until the line parses.
fn prompt<T, R>(input: &mut R, question: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    R: BufRead,
{
    println!("{}", question);
    io::stdout().flush().into_diagnostic()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .into_diagnostic()
        .wrap_err("failed to read from stdin")?;

    if read == 0 {
        return Err(miette!("unexpected end of input while reading: {question}"));
    }

    line.trim()
        .parse::<T>()
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid number: {:?}", line.trim()))
}

fn success(msg: &str) {
    println!("{} {}", "✔".bright_green().bold(), msg.normal());
}

fn warn(msg: &str) {
    eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.yellow());
}

fn info(msg: &str) {
    println!("{} {}", "➤".bright_cyan().bold(), msg.cyan());
}
