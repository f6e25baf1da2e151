//! Reduces a handful of raw die faces to the value a check uses.

use serde::{Deserialize, Serialize};

use crate::error::{CheckError, Result};
use crate::DrawSource;

/// Upper bound on dice per check.
pub const MAX_DICE: i32 = 100;

/// Faces `..=up_to` (above the previous bucket) map to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub up_to: i32,
    pub value: i32,
}

/// Step function over die faces: contiguous buckets in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct BucketRule {
    buckets: Vec<Bucket>,
}

impl BucketRule {
    pub fn new(buckets: Vec<Bucket>) -> Result<Self> {
        if buckets.is_empty() {
            return Err(CheckError::invalid("bucket rule needs at least one bucket"));
        }
        if buckets[0].up_to < 1 {
            return Err(CheckError::invalid(format!(
                "first bucket must cover face 1, ends at {}",
                buckets[0].up_to
            )));
        }
        if let Some(pair) = buckets.windows(2).find(|w| w[1].up_to <= w[0].up_to) {
            return Err(CheckError::invalid(format!(
                "bucket bounds must ascend, {} follows {}",
                pair[1].up_to, pair[0].up_to
            )));
        }
        Ok(Self { buckets })
    }

    /// Two buckets: `1..=low_max` -> `low`, everything above up to `die_size` -> `high`.
    pub fn split(low_max: i32, low: i32, high: i32, die_size: i32) -> Result<Self> {
        Self::new(vec![
            Bucket {
                up_to: low_max,
                value: low,
            },
            Bucket {
                up_to: die_size,
                value: high,
            },
        ])
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Highest face the rule maps.
    pub fn covers_up_to(&self) -> i32 {
        self.buckets.last().map_or(0, |b| b.up_to)
    }

    pub fn map(&self, face: i32) -> Result<i32> {
        if face < 1 {
            return Err(CheckError::invalid(format!("face {face} is below 1")));
        }
        self.buckets
            .iter()
            .find(|b| face <= b.up_to)
            .map(|b| b.value)
            .ok_or_else(|| CheckError::invalid(format!("face {face} falls outside every bucket")))
    }
}

impl TryFrom<Vec<Bucket>> for BucketRule {
    type Error = CheckError;

    fn try_from(buckets: Vec<Bucket>) -> Result<Self> {
        Self::new(buckets)
    }
}

impl From<BucketRule> for Vec<Bucket> {
    fn from(rule: BucketRule) -> Self {
        rule.buckets
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "buckets", rename_all = "snake_case")]
pub enum SelectionRule {
    TakeHighest,
    BucketSum(BucketRule),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// What feeds classification or aggregation.
    pub value: i32,
    /// Every face rolled, ascending.
    pub draws: Vec<i32>,
    /// Per-face contributions: the kept maximum, or one bucket value per face.
    pub kept: Vec<i32>,
}

/// Reduce already-rolled faces. Pure; `draws` is sorted for the trace.
pub fn select_from(rule: &SelectionRule, mut draws: Vec<i32>, die_size: i32) -> Result<Selection> {
    check_die_size(die_size)?;
    if draws.is_empty() {
        return Err(CheckError::invalid("no draws to select from"));
    }
    if let Some(face) = draws.iter().find(|f| !(1..=die_size).contains(*f)) {
        return Err(CheckError::invalid(format!("face {face} outside 1..={die_size}")));
    }
    draws.sort_unstable();

    let selection = match rule {
        SelectionRule::TakeHighest => {
            let highest = draws[draws.len() - 1];
            Selection {
                value: highest,
                kept: vec![highest],
                draws,
            }
        }
        SelectionRule::BucketSum(buckets) => {
            let kept = draws
                .iter()
                .map(|&face| buckets.map(face))
                .collect::<Result<Vec<_>>>()?;
            let value = kept
                .iter()
                .try_fold(0i32, |acc, v| acc.checked_add(*v))
                .ok_or_else(|| CheckError::invalid("bucket sum overflows i32"))?;
            Selection {
                value,
                kept,
                draws,
            }
        }
    };
    tracing::debug!(?rule, value = selection.value, draws = ?selection.draws, "dice selected");
    Ok(selection)
}

/// Roll `n` dice of `die_size` faces and reduce them per `rule`.
pub fn select_draw(
    source: &mut impl DrawSource,
    rule: &SelectionRule,
    n: i32,
    die_size: i32,
) -> Result<Selection> {
    if !(1..=MAX_DICE).contains(&n) {
        tracing::warn!(n, "rejected dice count");
        return Err(CheckError::invalid(format!("dice count must be within 1..={MAX_DICE}, got {n}")));
    }
    check_die_size(die_size)?;
    if let SelectionRule::BucketSum(buckets) = rule {
        if buckets.covers_up_to() < die_size {
            return Err(CheckError::invalid(format!(
                "bucket rule stops at {} but the die has {} faces",
                buckets.covers_up_to(),
                die_size
            )));
        }
    }
    let draws = source.draw_many(n as usize, die_size);
    select_from(rule, draws, die_size)
}

fn check_die_size(die_size: i32) -> Result<()> {
    if die_size < 1 {
        tracing::warn!(die_size, "rejected die size");
        return Err(CheckError::invalid(format!("die size must be at least 1, got {die_size}")));
    }
    Ok(())
}
