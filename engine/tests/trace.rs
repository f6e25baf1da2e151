use engine::systems::d20::{d20_check, darkness_attack, D20Check};
use engine::systems::percentile::{combined_check, resistance_check, skill_check};
use engine::trace::{format_modifier, render};
use engine::{Dice, KeyText, ThresholdTable, TierKey, TierText, Token};

struct English;

impl TierText for English {
    fn resolve(&self, key: TierKey) -> String {
        match key {
            TierKey::BrokenFumble => "Fumble/Broken".to_string(),
            TierKey::Broken => "Broken".to_string(),
            TierKey::Success => "Success".to_string(),
            other => other.as_str().to_uppercase(),
        }
    }

    fn broken_number_label(&self) -> String {
        "Broken No.".to_string()
    }
}

fn table() -> ThresholdTable {
    ThresholdTable::standard().unwrap()
}

#[test]
fn skill_check_line() {
    let mut dice = Dice::from_scripted(vec![1]);
    let report = skill_check(&mut dice, &table(), "CC", Some(80), 0).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(1D100<=80) ＞ 1 ＞ critical_special");
}

#[test]
fn skill_check_without_target() {
    let mut dice = Dice::from_scripted(vec![42]);
    let report = skill_check(&mut dice, &table(), "CC", None, 0).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(1D100) ＞ 42");
    assert_eq!(report.tier, None);
}

#[test]
fn broken_number_shows_in_the_expression() {
    let mut dice = Dice::from_scripted(vec![95]);
    let report = skill_check(&mut dice, &table(), "CC", Some(80), 90).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(1D100<=80) broken_number[90] ＞ 95 ＞ broken");
}

#[test]
fn resolver_controls_the_words() {
    let mut dice = Dice::from_scripted(vec![100]);
    let report = skill_check(&mut dice, &table(), "CC", Some(50), 90).unwrap();
    insta::assert_snapshot!(report.render(&English), @"(1D100<=50) Broken No.[90] ＞ 100 ＞ Fumble/Broken");
}

#[test]
fn resistance_lines() {
    let mut dice = Dice::from_scripted(vec![]);
    let auto = resistance_check(&mut dice, &table(), "RES", -10).unwrap();
    insta::assert_snapshot!(auto.render(&KeyText), @"(1d100<=0) ＞ automatic_failure");

    let mut dice = Dice::from_scripted(vec![33]);
    let rolled = resistance_check(&mut dice, &table(), "RESB", 1).unwrap();
    insta::assert_snapshot!(rolled.render(&KeyText), @"(1d100<=55) ＞ 33 ＞ success");
}

#[test]
fn combined_line() {
    let mut dice = Dice::from_scripted(vec![40]);
    let report = combined_check(&mut dice, &table(), "CBR", 50, 30).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(1d100<=50,30) ＞ 40[success,failure] ＞ partial_success");
}

#[test]
fn combined_zero_skill_side_just_fails() {
    let mut dice = Dice::from_scripted(vec![30]);
    let report = combined_check(&mut dice, &table(), "CBR", 0, 50).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(1d100<=0,50) ＞ 30[failure,success] ＞ partial_success");
    assert!(report.success);
}

#[test]
fn ability_line_lists_every_die() {
    let mut dice = Dice::from_scripted(vec![5, 18]);
    let report = d20_check(&mut dice, &table(), D20Check::Ability, 2, 5, Some(14)).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(2AB+5>=14) ＞ [5,18] ＞ 18[18]+5 ＞ 23 ＞ direct_hit");
}

#[test]
fn single_die_line_skips_the_draw_list() {
    let mut dice = Dice::from_scripted(vec![9]);
    let report = d20_check(&mut dice, &table(), D20Check::Action, 1, -2, Some(10)).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(DC-2>=10) ＞ 9[9]-2 ＞ 7 ＞ failure");
}

#[test]
fn darkness_line() {
    let mut dice = Dice::from_scripted(vec![5, 2]);
    let report = darkness_attack(&mut dice, 2, 3).unwrap();
    insta::assert_snapshot!(report.render(&KeyText), @"(2DK+3) ＞ [2,5] ＞ [0,10] ＞ 10[0,10]+3 ＞ 13");
}

#[test]
fn modifiers_print_signed_or_not_at_all() {
    assert_eq!(format_modifier(0), "");
    assert_eq!(format_modifier(4), "+4");
    assert_eq!(format_modifier(-4), "-4");
    assert_eq!(format_modifier(i32::MIN), "-2147483648");
}

#[test]
fn tokens_join_with_the_fixed_separator() {
    let tokens = vec![
        Token::expr("(x)"),
        Token::Number { value: 3 },
        Token::Tier {
            key: TierKey::AutomaticSuccess,
        },
    ];
    assert_eq!(render(&tokens, &KeyText), "(x) ＞ 3 ＞ automatic_success");
}

#[test]
fn every_tier_key_has_a_distinct_name() {
    let mut names = TierKey::ALL.iter().map(|k| k.as_str()).collect::<Vec<_>>();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), TierKey::ALL.len());
}
