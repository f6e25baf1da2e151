use engine::selector::select_from;
use engine::{aggregate_damage, combine, resolve_config, BucketRule, CombinedTier, SelectionRule};

#[test]
fn forty_against_fifty_and_thirty_is_partial() {
    let cfg = resolve_config("standard").unwrap();
    let v = combine(&cfg, 40, 50, 30);
    assert!(v.first.is_success());
    assert!(v.second.is_failure());
    assert_eq!(v.tier, CombinedTier::PartialSuccess);
    assert!(v.any_success());
}

#[test]
fn tier_counts_successes() {
    let cfg = resolve_config("standard").unwrap();
    assert_eq!(combine(&cfg, 25, 50, 30).tier, CombinedTier::FullSuccess);
    assert_eq!(combine(&cfg, 31, 30, 50).tier, CombinedTier::PartialSuccess);
    assert_eq!(combine(&cfg, 60, 50, 30).tier, CombinedTier::Failure);
}

#[test]
fn critical_and_fumble_are_ored_for_display() {
    let cfg = resolve_config("standard").unwrap();

    let crit = combine(&cfg, 1, 50, 30);
    assert!(crit.critical);
    assert_eq!(crit.tier, CombinedTier::FullSuccess);

    // The 100 target cannot fumble, the 50 target can.
    let fumble = combine(&cfg, 100, 50, 100);
    assert!(fumble.first.fumble);
    assert!(!fumble.second.fumble);
    assert!(fumble.fumble);
    assert_eq!(fumble.tier, CombinedTier::Failure);
}

#[test]
fn broken_number_is_disabled_for_combined_rolls() {
    let cfg = resolve_config("standard").unwrap().with_broken_number(30);
    let v = combine(&cfg, 40, 50, 30);
    assert!(!v.first.broken && !v.second.broken);
    assert_eq!(v.tier, CombinedTier::PartialSuccess);
}

#[test]
fn combining_is_pure() {
    let cfg = resolve_config("broadened").unwrap();
    assert_eq!(combine(&cfg, 44, 45, 60), combine(&cfg, 44, 45, 60));
}

#[test]
fn damage_total_adds_the_modifier_to_bucket_sum() {
    let rule = SelectionRule::BucketSum(BucketRule::split(3, 0, 10, 6).unwrap());
    let selection = select_from(&rule, vec![6, 2, 4], 6).unwrap();
    let dmg = aggregate_damage(selection, 5);
    assert_eq!(dmg.draws, vec![2, 4, 6]);
    assert_eq!(dmg.mapped, vec![0, 10, 10]);
    assert_eq!(dmg.subtotal, 20);
    assert_eq!(dmg.total, 25);

    let selection = select_from(&rule, vec![1], 6).unwrap();
    assert_eq!(aggregate_damage(selection, -3).total, -3);
}

#[test]
fn zero_target_side_is_an_ordinary_failure() {
    let cfg = resolve_config("standard").unwrap();
    let v = combine(&cfg, 30, 0, 50);
    assert!(v.first.is_failure());
    assert!(!v.first.fumble);
    assert_eq!(v.tier, CombinedTier::PartialSuccess);

    let high = combine(&cfg, 100, 0, 0);
    assert!(high.first.fumble && high.second.fumble);
    assert_eq!(high.tier, CombinedTier::Failure);
}
