//! bitseq CLI tool for inspecting and exploring bit sequences.

use anyhow::{bail, Context, Result};
use bitseq::{compress, uncompress, BitSequence, RankSelect};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "bitseq")]
#[command(about = "Bit sequence toolkit for local search", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the layout, counts and decoded values of a sequence
    Inspect(InspectArgs),
    /// Enumerate every sequence at an exact flip distance
    Neighbours(NeighboursArgs),
    /// Draw random sequences from a Hamming neighbourhood
    Sample(SampleArgs),
    /// Fold bounded fixed-width chunks into one compact integer
    Recode(RecodeArgs),
}

/// Show the layout, counts and decoded values of a sequence
#[derive(Debug, Parser)]
struct InspectArgs {
    /// Bits as '0'/'1' text ('|' separators are ignored)
    bits: String,

    /// Contract the range FIRST..LAST before inspecting
    #[arg(long, num_args = 2, value_names = ["FIRST", "LAST"])]
    contract: Option<Vec<usize>>,
}

/// Enumerate every sequence at an exact flip distance
#[derive(Debug, Parser)]
struct NeighboursArgs {
    /// Bits as '0'/'1' text
    bits: String,

    /// Number of flipped bits
    #[arg(short, long, default_value = "1")]
    radius: usize,

    /// Stop after this many neighbours
    #[arg(short, long)]
    limit: Option<usize>,
}

/// Draw random sequences from a Hamming neighbourhood
#[derive(Debug, Parser)]
struct SampleArgs {
    /// Bits as '0'/'1' text
    bits: String,

    /// Smallest distance
    #[arg(short, long, default_value = "1")]
    lower: usize,

    /// Largest distance
    #[arg(short, long)]
    upper: usize,

    /// Number of samples
    #[arg(short, long, default_value = "1")]
    count: usize,

    /// Random seed for reproducible sampling
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Fold bounded fixed-width chunks into one compact integer
#[derive(Debug, Parser)]
struct RecodeArgs {
    /// Bits as '0'/'1' text
    bits: String,

    /// Width of each chunk
    #[arg(short = 'b', long)]
    chunk_bits: usize,

    /// Largest value any chunk may hold
    #[arg(short, long)]
    max_value: u64,
}

fn parse_bits(text: &str) -> Result<BitSequence> {
    text.parse()
        .with_context(|| format!("invalid bit string '{}'", text))
}

fn inspect(args: InspectArgs) -> Result<()> {
    let mut data = parse_bits(&args.bits)?;
    if let Some(range) = args.contract {
        let &[first, last] = range.as_slice() else {
            bail!("--contract takes exactly two positions");
        };
        data.contract(first, last)
            .with_context(|| format!("cannot contract [{}, {})", first, last))?;
    }

    println!("{}", data);
    println!("stored bits:  {}", data.number_of_bits());
    println!("logical bits: {}", data.length());
    println!("ones:         {}", data.number_of_ones());
    println!("zeros:        {}", data.number_of_zeros());
    if let Some(subs) = data.substitutions() {
        for pos in subs.positions() {
            println!(
                "placeholder {} stands for {} bits",
                pos,
                subs.weight(pos).unwrap_or(0)
            );
        }
    }
    let ones: Vec<String> = (0..data.rank1(data.number_of_bits()))
        .filter_map(|k| data.select1(k))
        .map(|p| p.to_string())
        .collect();
    println!("set positions: [{}]", ones.join(", "));
    println!("unsigned:     {}", data.biguint_value());
    println!("fraction:     {}", data.normalized_double_value());
    Ok(())
}

fn neighbours(args: NeighboursArgs) -> Result<()> {
    let data = parse_bits(&args.bits)?;
    let total = data.number_of_data_on_circle(args.radius)?;
    tracing::info!(radius = args.radius, total = %total, "enumerating neighbours");
    let limit = args.limit.unwrap_or(usize::MAX);
    for n in data.neighbours(args.radius)?.take(limit) {
        println!("{}", n);
    }
    Ok(())
}

fn sample(args: SampleArgs) -> Result<()> {
    let data = parse_bits(&args.bits)?;
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let ball = data.number_of_data_in_neighbourhood(args.lower, args.upper)?;
    tracing::info!(lower = args.lower, upper = args.upper, size = %ball, "sampling neighbourhood");
    for _ in 0..args.count {
        let n = data.random_select_in_neighbourhood(args.lower, args.upper, &mut rng)?;
        let d = n.hamming_distance_to(&data)?;
        println!("{}  distance {}", n, d);
    }
    Ok(())
}

fn recode(args: RecodeArgs) -> Result<()> {
    let data = parse_bits(&args.bits)?;
    let packed = compress(&data, args.chunk_bits, args.max_value)
        .context("recoding failed")?;
    println!("{}", packed);
    println!("value: {}", packed.biguint_value());
    println!(
        "{} bits -> {} bits",
        data.number_of_bits(),
        packed.number_of_bits()
    );
    let restored = uncompress(
        data.number_of_bits(),
        &packed,
        args.chunk_bits,
        args.max_value,
    )?;
    if restored != data {
        bail!("round trip mismatch: {}", restored);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => inspect(args),
        Command::Neighbours(args) => neighbours(args),
        Command::Sample(args) => sample(args),
        Command::Recode(args) => recode(args),
    }
}
