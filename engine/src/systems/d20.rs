//! Additive d20 checks (roll n, keep the highest, add a modifier, meet or
//! beat the target) and the bucketed d6 darkness attack.

use serde::{Deserialize, Serialize};

use crate::combiner::aggregate_damage;
use crate::config::{ThresholdTable, D20};
use crate::error::Result;
use crate::selector::{select_draw, BucketRule, SelectionRule};
use crate::trace::{format_modifier, CheckReport, TierKey, Token};
use crate::DrawSource;

pub const DARKNESS_DIE: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum D20Check {
    /// Critical on the top faces, direct hit on success, basic effect otherwise.
    Ability,
    /// Plain success or failure.
    Action,
}

impl D20Check {
    pub fn code(self) -> &'static str {
        match self {
            D20Check::Ability => "AB",
            D20Check::Action => "DC",
        }
    }

    fn variant(self) -> &'static str {
        match self {
            D20Check::Ability => "ability",
            D20Check::Action => "action",
        }
    }

    fn success_key(self) -> TierKey {
        match self {
            D20Check::Ability => TierKey::DirectHit,
            D20Check::Action => TierKey::Success,
        }
    }

    fn failure_key(self) -> TierKey {
        match self {
            D20Check::Ability => TierKey::BasicEffect,
            D20Check::Action => TierKey::Failure,
        }
    }
}

/// Faces 1-3 deal nothing, 4-6 deal 10.
pub fn darkness_buckets() -> Result<BucketRule> {
    BucketRule::split(3, 0, 10, DARKNESS_DIE)
}

pub fn d20_check(
    source: &mut impl DrawSource,
    table: &ThresholdTable,
    kind: D20Check,
    dice_count: i32,
    modifier: i32,
    target: Option<i32>,
) -> Result<CheckReport> {
    let thresholds = table.resolve(D20, kind.variant())?;
    let die_size = table.die_size(D20)?;
    let selection = select_draw(source, &SelectionRule::TakeHighest, dice_count, die_size)?;
    let kept = selection.value;
    let total = kept.saturating_add(modifier);

    // A kept top face is critical whether or not there is a target.
    let critical = thresholds.critical > 0 && kept > die_size - thresholds.critical;
    let tier = match target {
        _ if critical => Some(TierKey::Critical),
        None => None,
        Some(t) if total >= t => Some(kind.success_key()),
        Some(_) => Some(kind.failure_key()),
    };

    let mut tokens = vec![Token::expr(format!(
        "({}{}{}{})",
        count_prefix(dice_count),
        kind.code(),
        format_modifier(modifier),
        target.map(|t| format!(">={t}")).unwrap_or_default()
    ))];
    if dice_count > 1 {
        tokens.push(Token::Draws {
            values: selection.draws.clone(),
        });
    }
    tokens.push(Token::Derived {
        value: kept,
        parts: selection.kept,
        modifier,
    });
    tokens.push(Token::Number { value: total });
    tokens.extend(tier.map(|key| Token::Tier { key }));

    tracing::debug!(?kind, kept, total, ?target, ?tier, "d20 check");

    let mut report = CheckReport::new(tokens);
    report.tier = tier;
    report.total = Some(total);
    report.critical = critical;
    report.success = critical || tier == Some(kind.success_key());
    report.failure = tier == Some(kind.failure_key());
    Ok(report)
}

/// `nDK+m`: bucketed d6 damage plus a flat modifier. No tier.
pub fn darkness_attack(source: &mut impl DrawSource, dice_count: i32, modifier: i32) -> Result<CheckReport> {
    let rule = SelectionRule::BucketSum(darkness_buckets()?);
    let selection = select_draw(source, &rule, dice_count, DARKNESS_DIE)?;
    let damage = aggregate_damage(selection, modifier);

    let mut report = CheckReport::new(vec![
        Token::expr(format!("({}DK{})", count_prefix(dice_count), format_modifier(modifier))),
        Token::Draws {
            values: damage.draws.clone(),
        },
        Token::Draws {
            values: damage.mapped.clone(),
        },
        Token::Derived {
            value: damage.subtotal,
            parts: damage.mapped,
            modifier,
        },
        Token::Number {
            value: damage.total,
        },
    ]);
    report.total = Some(damage.total);
    Ok(report)
}

fn count_prefix(dice_count: i32) -> String {
    if dice_count > 1 {
        dice_count.to_string()
    } else {
        String::new()
    }
}
