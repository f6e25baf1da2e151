//! Roll-under 1D100 handlers: skill check, resistance table, combined roll.

use crate::classifier::{evaluate_check, evaluate_resistance, Classification, ResistanceOutcome};
use crate::combiner::combine;
use crate::config::{ThresholdTable, PERCENTILE};
use crate::error::{CheckError, Result};
use crate::trace::{CheckReport, Token};
use crate::DrawSource;

const D100: i32 = 100;

/// Skill check. Without a target the draw is reported unjudged.
pub fn skill_check(
    source: &mut impl DrawSource,
    table: &ThresholdTable,
    variant: &str,
    target: Option<i32>,
    broken_number: i32,
) -> Result<CheckReport> {
    let config = table.config(PERCENTILE, variant)?;
    if broken_number < 0 {
        return Err(CheckError::invalid(format!(
            "broken number cannot be negative, got {broken_number}"
        )));
    }

    let Some(target) = target else {
        let draw = source.draw(D100);
        let mut report = CheckReport::new(vec![Token::expr("(1D100)"), Token::Number { value: draw }]);
        report.total = Some(draw);
        return Ok(report);
    };

    let config = config.with_target(target).with_broken_number(broken_number);
    let draw = source.draw(D100);
    let judged = evaluate_check(&config, draw);

    let expr = Token::Expr {
        text: format!("(1D100<={target})"),
        broken_number: (broken_number > 0).then_some(broken_number),
    };
    Ok(report_for(expr, &judged))
}

/// Resistance-table check, `RES(x-y)` style. The modifier is the stat difference.
pub fn resistance_check(
    source: &mut impl DrawSource,
    table: &ThresholdTable,
    variant: &str,
    modifier: i32,
) -> Result<CheckReport> {
    let config = table.config(PERCENTILE, variant)?;
    let outcome = evaluate_resistance(source, &config, modifier);
    let expr = Token::expr(format!("(1d100<={})", outcome.target()));

    let report = match outcome {
        ResistanceOutcome::Rolled(judged) => report_for(expr, &judged),
        auto => {
            let mut tokens = vec![expr];
            tokens.extend(auto.tier().map(|key| Token::Tier { key }));
            let mut report = CheckReport::new(tokens);
            report.tier = auto.tier();
            report.success = auto.is_success();
            report.failure = !auto.is_success();
            report
        }
    };
    Ok(report)
}

/// One draw against two skills.
pub fn combined_check(
    source: &mut impl DrawSource,
    table: &ThresholdTable,
    variant: &str,
    target_a: i32,
    target_b: i32,
) -> Result<CheckReport> {
    let config = table.config(PERCENTILE, variant)?;

    let draw = source.draw(D100);
    let verdict = combine(&config, draw, target_a, target_b);
    let tiers = [verdict.first, verdict.second]
        .iter()
        .filter_map(Classification::tier)
        .collect();

    let mut report = CheckReport::new(vec![
        Token::expr(format!("(1d100<={target_a},{target_b})")),
        Token::Judged { draw, tiers },
        Token::Tier {
            key: verdict.tier.key(),
        },
    ]);
    report.tier = Some(verdict.tier.key());
    report.total = Some(draw);
    report.success = verdict.any_success();
    report.failure = !verdict.any_success();
    report.critical = verdict.critical;
    report.fumble = verdict.fumble;
    Ok(report)
}

fn report_for(expr: Token, judged: &Classification) -> CheckReport {
    let tier = judged.tier();
    let mut tokens = vec![expr, Token::Number { value: judged.draw }];
    tokens.extend(tier.map(|key| Token::Tier { key }));

    let mut report = CheckReport::new(tokens);
    report.tier = tier;
    report.total = Some(judged.draw);
    report.success = judged.is_success();
    report.failure = judged.is_failure();
    report.critical = judged.critical;
    report.fumble = judged.fumble;
    report
}
