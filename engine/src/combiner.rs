use serde::{Deserialize, Serialize};

use crate::classifier::{evaluate_check, Classification, Outcome};
use crate::config::CheckConfig;
use crate::selector::Selection;
use crate::trace::TierKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinedTier {
    FullSuccess,
    PartialSuccess,
    Failure,
}

impl CombinedTier {
    pub fn key(self) -> TierKey {
        match self {
            CombinedTier::FullSuccess => TierKey::Success,
            CombinedTier::PartialSuccess => TierKey::PartialSuccess,
            CombinedTier::Failure => TierKey::Failure,
        }
    }
}

/// One draw judged against two targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedVerdict {
    pub draw: i32,
    pub first: Classification,
    pub second: Classification,
    pub tier: CombinedTier,
    /// Either side critical. Display only; the tier ignores it.
    pub critical: bool,
    /// Either side fumbled. Display only.
    pub fumble: bool,
}

impl CombinedVerdict {
    pub fn any_success(&self) -> bool {
        self.first.is_success() || self.second.is_success()
    }
}

/// A side with no skill (target <= 0) is judged an ordinary failure rather
/// than left unjudged, so it still counts toward the rank.
fn judge_side(config: &CheckConfig, draw: i32) -> Classification {
    let mut side = evaluate_check(config, draw);
    if side.outcome == Outcome::Unjudged {
        side.outcome = Outcome::Failure;
        side.fumble = draw >= config.fumble_floor();
    }
    side
}

/// Judge `draw` against both targets with the broken number disabled.
pub fn combine(config: &CheckConfig, draw: i32, target_a: i32, target_b: i32) -> CombinedVerdict {
    let base = config.with_broken_number(0);
    let first = judge_side(&base.with_target(target_a), draw);
    let second = judge_side(&base.with_target(target_b), draw);

    let tier = match (first.is_success(), second.is_success()) {
        (true, true) => CombinedTier::FullSuccess,
        (true, false) | (false, true) => CombinedTier::PartialSuccess,
        (false, false) => CombinedTier::Failure,
    };
    tracing::debug!(draw, target_a, target_b, ?tier, "combined roll");

    CombinedVerdict {
        draw,
        first,
        second,
        tier,
        critical: first.critical || second.critical,
        fumble: first.fumble || second.fumble,
    }
}

/// Bucket-summed damage plus a flat modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTotal {
    pub draws: Vec<i32>,
    pub mapped: Vec<i32>,
    pub subtotal: i32,
    pub modifier: i32,
    pub total: i32,
}

pub fn aggregate_damage(selection: Selection, modifier: i32) -> DamageTotal {
    let subtotal = selection.value;
    DamageTotal {
        draws: selection.draws,
        mapped: selection.kept,
        subtotal,
        modifier,
        total: subtotal.saturating_add(modifier),
    }
}
