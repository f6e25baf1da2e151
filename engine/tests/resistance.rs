use engine::{
    evaluate_resistance, resistance_target, resolve_config, Dice, Outcome, ResistanceOutcome,
    TierKey,
};

#[test]
fn target_is_five_per_point_around_fifty() {
    assert_eq!(resistance_target(0), 50);
    assert_eq!(resistance_target(-10), 0);
    assert_eq!(resistance_target(3), 65);
    assert_eq!(resistance_target(i32::MAX), i32::MAX);
}

#[test]
fn minus_ten_fails_automatically_without_a_draw() {
    let cfg = resolve_config("standard").unwrap();
    let mut dice = Dice::from_scripted(vec![]);
    let res = evaluate_resistance(&mut dice, &cfg, -10);
    assert_eq!(res, ResistanceOutcome::AutomaticFailure { target: 0 });
    assert_eq!(res.tier(), Some(TierKey::AutomaticFailure));
    assert!(!res.is_success());
    assert_eq!(dice.drawn(), 0);
}

#[test]
fn plus_ten_succeeds_automatically_without_a_draw() {
    let cfg = resolve_config("standard").unwrap();
    let mut dice = Dice::from_scripted(vec![]);
    let res = evaluate_resistance(&mut dice, &cfg, 10);
    assert_eq!(res, ResistanceOutcome::AutomaticSuccess { target: 100 });
    assert!(res.is_success());
    assert_eq!(dice.drawn(), 0);
}

#[test]
fn shortcut_bounds_are_exclusive() {
    let cfg = resolve_config("standard").unwrap();

    let mut dice = Dice::from_scripted(vec![5]);
    let low = evaluate_resistance(&mut dice, &cfg, -9);
    assert!(matches!(low, ResistanceOutcome::Rolled(c) if c.target == 5 && c.is_success()));
    assert_eq!(dice.drawn(), 1);

    let mut dice = Dice::from_scripted(vec![96]);
    let high = evaluate_resistance(&mut dice, &cfg, 9);
    assert!(matches!(high, ResistanceOutcome::Rolled(c) if c.target == 95 && c.is_failure()));
}

#[test]
fn zero_modifier_is_an_ordinary_check_against_fifty() {
    let cfg = resolve_config("standard").unwrap();

    let mut dice = Dice::from_scripted(vec![50]);
    let ResistanceOutcome::Rolled(pass) = evaluate_resistance(&mut dice, &cfg, 0) else {
        panic!("expected a rolled check");
    };
    assert_eq!(pass.target, 50);
    assert_eq!(pass.tier(), Some(TierKey::Success));

    let mut dice = Dice::from_scripted(vec![51]);
    let fail = evaluate_resistance(&mut dice, &cfg, 0);
    assert_eq!(fail.tier(), Some(TierKey::Failure));
}

#[test]
fn broken_number_does_not_apply_to_resistance() {
    let cfg = resolve_config("broadened").unwrap().with_broken_number(10);
    let mut dice = Dice::from_scripted(vec![30]);
    let ResistanceOutcome::Rolled(res) = evaluate_resistance(&mut dice, &cfg, 0) else {
        panic!("expected a rolled check");
    };
    assert_eq!(res.outcome, Outcome::Success);
    assert!(!res.broken);
}
