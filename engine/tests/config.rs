use engine::config::{D20, PERCENTILE};
use engine::{resolve_config, CheckError, ThresholdTable, Thresholds};

#[test]
fn presets_carry_their_thresholds() {
    let table = ThresholdTable::standard().unwrap();
    assert_eq!(
        table.resolve(PERCENTILE, "standard").unwrap(),
        Thresholds {
            critical: 1,
            fumble: 1,
            special_percentage: 20
        }
    );
    assert_eq!(
        table.resolve(PERCENTILE, "broadened").unwrap(),
        Thresholds {
            critical: 5,
            fumble: 5,
            special_percentage: 20
        }
    );
}

#[test]
fn command_aliases_resolve_case_insensitively() {
    let table = ThresholdTable::standard().unwrap();
    let standard = table.resolve(PERCENTILE, "standard").unwrap();
    let broadened = table.resolve(PERCENTILE, "broadened").unwrap();
    for alias in ["CC", "cc", "RES", "CBR"] {
        assert_eq!(table.resolve(PERCENTILE, alias).unwrap(), standard, "{alias}");
    }
    for alias in ["CCB", "resb", "CbRb"] {
        assert_eq!(table.resolve(PERCENTILE, alias).unwrap(), broadened, "{alias}");
    }
}

#[test]
fn unknown_variant_is_a_configuration_error() {
    let err = resolve_config("lenient").unwrap_err();
    assert_eq!(
        err,
        CheckError::Configuration {
            system: "percentile".into(),
            variant: "lenient".into()
        }
    );
    assert!(err.to_string().contains("lenient"));
}

#[test]
fn unknown_system_is_reported() {
    let table = ThresholdTable::standard().unwrap();
    assert!(matches!(
        table.resolve("tarot", "standard"),
        Err(CheckError::UnknownSystem(_))
    ));
}

#[test]
fn variants_keep_declaration_order() {
    let table = ThresholdTable::standard().unwrap();
    assert_eq!(
        table.variant_names(PERCENTILE).unwrap(),
        vec!["standard", "broadened", "plain"]
    );
    assert_eq!(table.systems().collect::<Vec<_>>(), vec![PERCENTILE, D20]);
    assert_eq!(table.die_size(D20).unwrap(), 20);
}

#[test]
fn resolved_config_starts_without_target_or_broken_number() {
    let cfg = resolve_config("CCB").unwrap();
    assert_eq!(cfg.target_value, 0);
    assert_eq!(cfg.broken_number, 0);

    let aimed = cfg.with_target(55).with_broken_number(97);
    assert_eq!(aimed.target_value, 55);
    assert_eq!(aimed.broken_number, 97);
    assert_eq!(cfg.target_value, 0, "with_* returns a new value");
}

#[test]
fn custom_tables_load_from_yaml() {
    let src = r#"
percentile:
  die_size: 100
  variants:
    house:
      aliases: [HR]
      critical: 3
      fumble: 2
"#;
    let table = ThresholdTable::from_yaml_str(src).unwrap();
    let t = table.resolve(PERCENTILE, "hr").unwrap();
    assert_eq!((t.critical, t.fumble, t.special_percentage), (3, 2, 0));
}

#[test]
fn malformed_tables_are_rejected() {
    let unknown_field = "percentile:\n  die_size: 100\n  variants:\n    x:\n      critical: 1\n      fumble: 1\n      crit: 2\n";
    assert!(matches!(
        ThresholdTable::from_yaml_str(unknown_field),
        Err(CheckError::Table(_))
    ));

    let no_variants = "percentile:\n  die_size: 100\n  variants: {}\n";
    assert!(ThresholdTable::from_yaml_str(no_variants).is_err());

    let zero_die = "d20:\n  die_size: 0\n  variants:\n    a:\n      critical: 0\n      fumble: 0\n";
    assert!(ThresholdTable::from_yaml_str(zero_die).is_err());

    assert!(ThresholdTable::builtin("missing").is_err());
}
