use std::fs;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ThresholdTable;
use crate::content::DEFAULT_TABLE;
use crate::systems::d20::{d20_check, darkness_attack, D20Check};
use crate::systems::percentile::{combined_check, resistance_check, skill_check};
use crate::trace::{CheckReport, TierKey};
use crate::{Dice, DrawSource};

const MAX_SAMPLES: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    #[default]
    None,
    /// `<=`
    AtMost,
    /// `>=`
    AtLeast,
}

/// Fields an upstream command parser pulls out of user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedCommand {
    pub target: i32,
    pub modifier: i32,
    pub comparator: Comparator,
    /// 0 when the command gave no count.
    pub dice_count: i32,
    pub broken_number: i32,
    /// Only combined rolls carry one.
    pub second_target: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckRequest {
    Skill {
        #[serde(default = "default_variant")]
        variant: String,
        #[serde(default)]
        target: Option<i32>,
        #[serde(default)]
        broken_number: i32,
    },
    Resistance {
        #[serde(default = "default_variant")]
        variant: String,
        modifier: i32,
    },
    Combined {
        #[serde(default = "default_variant")]
        variant: String,
        first: i32,
        second: i32,
    },
    Ability {
        #[serde(default = "one")]
        dice_count: i32,
        #[serde(default)]
        modifier: i32,
        #[serde(default)]
        target: Option<i32>,
    },
    Action {
        #[serde(default = "one")]
        dice_count: i32,
        #[serde(default)]
        modifier: i32,
        #[serde(default)]
        target: Option<i32>,
    },
    Darkness {
        #[serde(default = "one")]
        dice_count: i32,
        #[serde(default)]
        modifier: i32,
    },
}

fn default_variant() -> String {
    "standard".to_string()
}

fn one() -> i32 {
    1
}

impl CheckRequest {
    /// Request for a command code (`CC`, `RESB`, `AB`, ...) and its parsed
    /// fields. `None` means this code or comparator is not handled here, so a
    /// dispatcher should try another handler; it is not an error.
    pub fn from_extracted(code: &str, cmd: &ExtractedCommand) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        let dice_count = if cmd.dice_count == 0 { 1 } else { cmd.dice_count };
        match code.as_str() {
            "CC" | "CCB" => match cmd.comparator {
                Comparator::AtLeast => None,
                Comparator::None => Some(CheckRequest::Skill {
                    variant: code.clone(),
                    target: None,
                    broken_number: cmd.broken_number,
                }),
                Comparator::AtMost => Some(CheckRequest::Skill {
                    variant: code.clone(),
                    target: Some(cmd.target),
                    broken_number: cmd.broken_number,
                }),
            },
            "RES" | "RESB" => (cmd.comparator == Comparator::None).then(|| CheckRequest::Resistance {
                variant: code.clone(),
                modifier: cmd.modifier,
            }),
            "CBR" | "CBRB" => cmd.second_target.map(|second| CheckRequest::Combined {
                variant: code.clone(),
                first: cmd.target,
                second,
            }),
            "AB" | "DC" => {
                let target = match cmd.comparator {
                    Comparator::AtMost => return None,
                    Comparator::None => None,
                    Comparator::AtLeast => Some(cmd.target),
                };
                Some(if code == "AB" {
                    CheckRequest::Ability {
                        dice_count,
                        modifier: cmd.modifier,
                        target,
                    }
                } else {
                    CheckRequest::Action {
                        dice_count,
                        modifier: cmd.modifier,
                        target,
                    }
                })
            }
            "DK" => (cmd.comparator == Comparator::None).then_some(CheckRequest::Darkness {
                dice_count,
                modifier: cmd.modifier,
            }),
            _ => None,
        }
    }

    pub fn evaluate(
        &self,
        source: &mut impl DrawSource,
        table: &ThresholdTable,
    ) -> crate::Result<CheckReport> {
        match self {
            CheckRequest::Skill {
                variant,
                target,
                broken_number,
            } => skill_check(source, table, variant, *target, *broken_number),
            CheckRequest::Resistance { variant, modifier } => {
                resistance_check(source, table, variant, *modifier)
            }
            CheckRequest::Combined {
                variant,
                first,
                second,
            } => combined_check(source, table, variant, *first, *second),
            CheckRequest::Ability {
                dice_count,
                modifier,
                target,
            } => d20_check(source, table, D20Check::Ability, *dice_count, *modifier, *target),
            CheckRequest::Action {
                dice_count,
                modifier,
                target,
            } => d20_check(source, table, D20Check::Action, *dice_count, *modifier, *target),
            CheckRequest::Darkness {
                dice_count,
                modifier,
            } => darkness_attack(source, *dice_count, *modifier),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RollConfig {
    pub request: CheckRequest,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(default)]
    pub table_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TierStats {
    pub samples: u32,
    /// Tier key -> count, in tier precedence order.
    pub tiers: IndexMap<String, u32>,
    pub unjudged: u32,
    pub successes: u32,
    pub mean_total: Option<f64>,
}

/// Parse a bare request such as `{"kind":"skill","target":60}`.
pub fn parse_request(json: &str) -> Result<CheckRequest> {
    serde_json::from_str(json).context("invalid check request JSON")
}

/// Parse a full [`RollConfig`] (request, seed, table) from JSON.
pub fn parse_roll_config(json: &str) -> Result<RollConfig> {
    serde_json::from_str(json).context("invalid roll config JSON")
}

/// Evaluate one request with dice seeded from `cfg.seed`.
pub fn roll(cfg: RollConfig) -> Result<CheckReport> {
    let table = load_table(cfg.table_id.as_deref(), cfg.table_path.as_deref())?;
    let mut dice = Dice::from_seed(cfg.seed);
    cfg.request
        .evaluate(&mut dice, &table)
        .with_context(|| format!("evaluating {:?}", cfg.request))
}

/// Tier frequencies over `samples` trials; trial `i` uses seed `cfg.seed + i`.
pub fn tier_stats(cfg: RollConfig, samples: u32) -> Result<TierStats> {
    let table = load_table(cfg.table_id.as_deref(), cfg.table_path.as_deref())?;
    tier_stats_on(&table, &cfg.request, cfg.seed, samples)
}

/// [`tier_stats`] against an already loaded table.
pub fn tier_stats_on(
    table: &ThresholdTable,
    request: &CheckRequest,
    seed: u64,
    samples: u32,
) -> Result<TierStats> {
    if samples == 0 || samples > MAX_SAMPLES {
        bail!("samples must be within 1..={}, got {}", MAX_SAMPLES, samples);
    }

    let mut counts: IndexMap<TierKey, u32> = TierKey::ALL.iter().map(|k| (*k, 0)).collect();
    let mut unjudged = 0;
    let mut successes = 0;
    let mut total_sum = 0i64;
    let mut totals_seen = 0u32;

    for i in 0..samples {
        let mut dice = Dice::from_seed(seed.wrapping_add(u64::from(i)));
        let report = request.evaluate(&mut dice, table)?;
        match report.tier {
            Some(key) => *counts.entry(key).or_default() += 1,
            None => unjudged += 1,
        }
        if report.success {
            successes += 1;
        }
        if let Some(total) = report.total {
            total_sum += i64::from(total);
            totals_seen += 1;
        }
    }
    tracing::debug!(samples, successes, unjudged, "tier stats collected");

    Ok(TierStats {
        samples,
        tiers: counts
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .map(|(k, n)| (k.as_str().to_string(), n))
            .collect(),
        unjudged,
        successes,
        mean_total: (totals_seen > 0).then(|| total_sum as f64 / f64::from(totals_seen)),
    })
}

/// A table file wins over a builtin id; neither means the default builtin.
pub fn load_table(table_id: Option<&str>, table_path: Option<&str>) -> Result<ThresholdTable> {
    if let Some(path) = table_path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read threshold table: {}", path))?;
        return ThresholdTable::from_yaml_str(&text)
            .with_context(|| format!("failed to parse threshold table: {}", path));
    }
    let id = table_id.unwrap_or(DEFAULT_TABLE);
    ThresholdTable::builtin(id).with_context(|| format!("loading builtin table '{}'", id))
}
