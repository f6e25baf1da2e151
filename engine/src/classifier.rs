use serde::{Deserialize, Serialize};

use crate::config::CheckConfig;
use crate::trace::TierKey;
use crate::DrawSource;

/// Resistance targets below this fail without a roll.
pub const AUTO_FAILURE_BELOW: i32 = 5;
/// Resistance targets above this succeed without a roll.
pub const AUTO_SUCCESS_ABOVE: i32 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// No target: the draw is reported but not judged.
    Unjudged,
    Success,
    Failure,
}

/// One draw judged against one target.
///
/// `critical` and `special` only ever accompany `Success`; `fumble` and
/// `broken` only accompany `Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub draw: i32,
    pub target: i32,
    pub outcome: Outcome,
    pub critical: bool,
    pub special: bool,
    pub fumble: bool,
    pub broken: bool,
}

type TierRule = (fn(&Classification) -> bool, TierKey);

/// Evaluated top-down; the first matching predicate names the tier.
const TIER_PRIORITY: [TierRule; 8] = [
    (|c| c.critical && c.special, TierKey::CriticalSpecial),
    (|c| c.critical, TierKey::Critical),
    (|c| c.special, TierKey::Special),
    (|c| c.outcome == Outcome::Success, TierKey::Success),
    (|c| c.broken && c.fumble, TierKey::BrokenFumble),
    (|c| c.broken, TierKey::Broken),
    (|c| c.fumble, TierKey::Fumble),
    (|c| c.outcome == Outcome::Failure, TierKey::Failure),
];

impl Classification {
    pub fn unjudged(draw: i32, target: i32) -> Self {
        Self {
            draw,
            target,
            outcome: Outcome::Unjudged,
            critical: false,
            special: false,
            fumble: false,
            broken: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }

    /// Most specific tier, or `None` for an unjudged roll.
    pub fn tier(&self) -> Option<TierKey> {
        TIER_PRIORITY
            .iter()
            .find(|(applies, _)| applies(self))
            .map(|(_, key)| *key)
    }
}

/// Judge a percentile draw against `config`.
pub fn evaluate_check(config: &CheckConfig, draw: i32) -> Classification {
    let target = config.target_value;
    let mut result = Classification::unjudged(draw, target);
    if target <= 0 {
        tracing::debug!(draw, "no target, roll left unjudged");
        return result;
    }

    if draw <= target && draw < 100 {
        result.outcome = Outcome::Success;
        result.special = config.special_threshold().is_some_and(|s| draw <= s);
        result.critical = draw <= config.critical_threshold;
    } else {
        result.outcome = Outcome::Failure;
        // A target of 100 or more never fumbles.
        result.fumble = target < 100 && draw >= config.fumble_floor();
    }

    if config.broken_number > 0 && draw >= config.broken_number {
        result.outcome = Outcome::Failure;
        result.broken = true;
        result.special = false;
        result.critical = false;
    }

    tracing::debug!(
        draw,
        target,
        broken_number = config.broken_number,
        tier = ?result.tier(),
        "check classified"
    );
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResistanceOutcome {
    AutomaticSuccess { target: i32 },
    AutomaticFailure { target: i32 },
    Rolled(Classification),
}

impl ResistanceOutcome {
    pub fn target(&self) -> i32 {
        match self {
            ResistanceOutcome::AutomaticSuccess { target }
            | ResistanceOutcome::AutomaticFailure { target } => *target,
            ResistanceOutcome::Rolled(c) => c.target,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            ResistanceOutcome::AutomaticSuccess { .. } => true,
            ResistanceOutcome::AutomaticFailure { .. } => false,
            ResistanceOutcome::Rolled(c) => c.is_success(),
        }
    }

    pub fn tier(&self) -> Option<TierKey> {
        match self {
            ResistanceOutcome::AutomaticSuccess { .. } => Some(TierKey::AutomaticSuccess),
            ResistanceOutcome::AutomaticFailure { .. } => Some(TierKey::AutomaticFailure),
            ResistanceOutcome::Rolled(c) => c.tier(),
        }
    }
}

/// `modifier * 5 + 50`, saturating.
pub fn resistance_target(modifier: i32) -> i32 {
    modifier.saturating_mul(5).saturating_add(50)
}

/// Resistance-table check. Only the thresholds of `config` are used; target
/// comes from `modifier` and the broken number is ignored. Extreme targets
/// short-circuit without touching `source`.
pub fn evaluate_resistance(
    source: &mut impl DrawSource,
    config: &CheckConfig,
    modifier: i32,
) -> ResistanceOutcome {
    let target = resistance_target(modifier);
    if target < AUTO_FAILURE_BELOW {
        tracing::debug!(modifier, target, "resistance: automatic failure");
        return ResistanceOutcome::AutomaticFailure { target };
    }
    if target > AUTO_SUCCESS_ABOVE {
        tracing::debug!(modifier, target, "resistance: automatic success");
        return ResistanceOutcome::AutomaticSuccess { target };
    }

    let config = config.with_target(target).with_broken_number(0);
    let draw = source.draw(100);
    ResistanceOutcome::Rolled(evaluate_check(&config, draw))
}
