use checkroll_cli::{load_table, read_text_auto};
use clap::{Args, Parser, Subcommand};
use engine::api::{parse_request, CheckRequest};
use engine::{Dice, TierKey, TierText};
use std::path::PathBuf;
use tracing::Level;

#[derive(Subcommand)]
enum Cmd {
    /// Percentile skill check (roll under the target)
    Skill {
        /// Variant name or alias from the loaded table
        #[arg(long, default_value = "standard")]
        variant: String,
        /// Skill value; omit for an unjudged 1D100
        #[arg(long)]
        target: Option<i32>,
        /// Draws at or above this break the equipment (0 = off)
        #[arg(long, default_value_t = 0)]
        broken: i32,
    },
    /// Resistance table check: target = modifier * 5 + 50
    Resist {
        /// Variant name or alias from the loaded table
        #[arg(long, default_value = "standard")]
        variant: String,
        /// Active minus passive characteristic
        #[arg(long, allow_hyphen_values = true)]
        modifier: i32,
    },
    /// One percentile draw against two skills
    Combined {
        /// Variant name or alias from the loaded table
        #[arg(long, default_value = "standard")]
        variant: String,
        #[arg(long)]
        first: i32,
        #[arg(long)]
        second: i32,
    },
    /// d20 ability check, keeps the highest die
    Ability(D20Args),
    /// d20 action check, keeps the highest die
    Action(D20Args),
    /// Bucketed d6 damage: 1-3 count 0, 4-6 count 10
    Darkness {
        #[arg(long, default_value_t = 1)]
        dice: i32,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        modifier: i32,
    },
    /// Evaluate a request given as JSON, printing the report as JSON
    Json {
        /// File holding a request such as {"kind":"skill","target":60}
        #[arg(long)]
        file: PathBuf,
    },
    /// List the variants of the loaded threshold table
    Variants,
}

#[derive(Args)]
struct D20Args {
    #[arg(long, default_value_t = 1)]
    dice: i32,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    modifier: i32,
    /// Meet or beat this total
    #[arg(long)]
    target: Option<i32>,
}

#[derive(Parser)]
#[command(name = "checkroll")]
#[command(about = "Tiered dice check harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    /// RNG seed for determinism
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,
    /// Threshold table YAML (defaults to the built-in table)
    #[arg(long, global = true)]
    table: Option<PathBuf>,
    /// Print the report as JSON instead of a trace line
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Log evaluation steps to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

/// English labels for the trace line.
struct EnglishText;

impl TierText for EnglishText {
    fn resolve(&self, key: TierKey) -> String {
        match key {
            TierKey::CriticalSpecial => "Critical/Special",
            TierKey::Critical => "Critical",
            TierKey::Special => "Special",
            TierKey::Success => "Success",
            TierKey::BrokenFumble => "Fumble/Broken",
            TierKey::Broken => "Broken",
            TierKey::Fumble => "Fumble",
            TierKey::Failure => "Failure",
            TierKey::PartialSuccess => "Partial Success",
            TierKey::AutomaticSuccess => "Automatic Success",
            TierKey::AutomaticFailure => "Automatic Failure",
            TierKey::DirectHit => "Direct Hit",
            TierKey::BasicEffect => "Basic Effect Only",
        }
        .to_string()
    }

    fn broken_number_label(&self) -> String {
        "Broken Number".to_string()
    }
}

fn to_request(cmd: Cmd) -> Option<CheckRequest> {
    let req = match cmd {
        Cmd::Skill {
            variant,
            target,
            broken,
        } => CheckRequest::Skill {
            variant,
            target,
            broken_number: broken,
        },
        Cmd::Resist { variant, modifier } => CheckRequest::Resistance {
            variant,
            modifier,
        },
        Cmd::Combined {
            variant,
            first,
            second,
        } => CheckRequest::Combined {
            variant,
            first,
            second,
        },
        Cmd::Ability(a) => CheckRequest::Ability {
            dice_count: a.dice,
            modifier: a.modifier,
            target: a.target,
        },
        Cmd::Action(a) => CheckRequest::Action {
            dice_count: a.dice,
            modifier: a.modifier,
            target: a.target,
        },
        Cmd::Darkness { dice, modifier } => CheckRequest::Darkness {
            dice_count: dice,
            modifier,
        },
        Cmd::Json { .. } | Cmd::Variants => return None,
    };
    Some(req)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let table = load_table(cli.table.as_deref())?;
    let mut dice = Dice::from_seed(cli.seed);

    match cli.cmd {
        Cmd::Variants => {
            for system in table.systems() {
                for name in table.variant_names(system)? {
                    let t = table.resolve(system, name)?;
                    println!(
                        "{system}/{name}: critical={} fumble={} special={}%",
                        t.critical, t.fumble, t.special_percentage
                    );
                }
            }
        }
        Cmd::Json { file } => {
            let text = read_text_auto(&file)?;
            let request = parse_request(&text)?;
            let report = request.evaluate(&mut dice, &table)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        cmd => {
            if let Some(request) = to_request(cmd) {
                let report = request.evaluate(&mut dice, &table)?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{}", report.render(&EnglishText));
                }
            }
        }
    }
    Ok(())
}
