use checkroll_cli::{load_table, read_text_auto};
use clap::Parser;
use engine::api::{parse_request, tier_stats_on};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tier-stats")]
#[command(about = "Monte Carlo sim: tier frequencies of a check request")]
struct Args {
    /// Path to a request JSON, e.g. {"kind":"combined","first":60,"second":40}
    #[arg(long)]
    request: PathBuf,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Optional threshold table YAML (falls back to the built-in table)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let text = read_text_auto(&args.request)?;
    let request = parse_request(&text)?;
    let table = load_table(args.table.as_deref())?;
    let stats = tier_stats_on(&table, &request, args.seed, args.trials)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("trials: {}", stats.samples);
    for (tier, count) in &stats.tiers {
        let pct = 100.0 * f64::from(*count) / f64::from(stats.samples);
        println!("{:<18} {:>7} ({:>5.1}%)", tier, count, pct);
    }
    if stats.unjudged > 0 {
        println!("{:<18} {:>7}", "unjudged", stats.unjudged);
    }
    if let Some(mean) = stats.mean_total {
        println!("mean total: {:.2}", mean);
    }
    Ok(())
}
