//! Threshold presets and the per-check configuration built from them.
//!
//! A [`ThresholdTable`] is data: game system -> named variants, each carrying
//! critical / fumble / special numbers. Variants are looked up by name or by
//! any of their command aliases (`CC`, `CCB`, ...), case-insensitively.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::content::{builtin_tables, DEFAULT_TABLE};
use crate::error::{CheckError, Result};

/// Roll-under 1D100 system.
pub const PERCENTILE: &str = "percentile";
/// Additive d20 system.
pub const D20: &str = "d20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub critical: i32,
    pub fumble: i32,
    #[serde(default)]
    pub special_percentage: i32,
}

/// Everything one evaluation needs. Built fresh per check and never mutated;
/// the `with_*` methods return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// `<= 0` means the roll has no target and is not judged.
    pub target_value: i32,
    pub critical_threshold: i32,
    pub fumble_threshold: i32,
    /// 0..=100, 0 disables the special tier.
    pub special_percentage: i32,
    /// 0 disables the broken-number override.
    pub broken_number: i32,
}

impl CheckConfig {
    pub fn from_thresholds(t: Thresholds) -> Self {
        Self {
            target_value: 0,
            critical_threshold: t.critical,
            fumble_threshold: t.fumble,
            special_percentage: t.special_percentage,
            broken_number: 0,
        }
    }

    #[must_use]
    pub fn with_target(self, target_value: i32) -> Self {
        Self {
            target_value,
            ..self
        }
    }

    #[must_use]
    pub fn with_broken_number(self, broken_number: i32) -> Self {
        Self {
            broken_number,
            ..self
        }
    }

    /// `floor(target * special% / 100)` clamped to `1..=100`, or `None` when
    /// the variant has no special tier.
    pub fn special_threshold(&self) -> Option<i32> {
        if self.special_percentage <= 0 {
            return None;
        }
        let raw = (i64::from(self.target_value) * i64::from(self.special_percentage)).div_euclid(100);
        Some(raw.clamp(1, 100) as i32)
    }

    /// Lowest failing draw that counts as a fumble.
    pub fn fumble_floor(&self) -> i32 {
        101 - self.fumble_threshold
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariantEntry {
    #[serde(default)]
    aliases: Vec<String>,
    critical: i32,
    fumble: i32,
    #[serde(default)]
    special_percentage: i32,
}

impl VariantEntry {
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            critical: self.critical,
            fumble: self.fumble,
            special_percentage: self.special_percentage,
        }
    }

    fn matches(&self, name: &str, wanted: &str) -> bool {
        name.eq_ignore_ascii_case(wanted) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(wanted))
    }

    fn validate(&self, system: &str, name: &str) -> Result<()> {
        let fields = [
            ("critical", self.critical),
            ("fumble", self.fumble),
            ("special_percentage", self.special_percentage),
        ];
        for (field, value) in fields {
            if !(0..=100).contains(&value) {
                return Err(CheckError::table(format!(
                    "{system}.{name}.{field} must be within 0..=100, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SystemEntry {
    die_size: i32,
    variants: IndexMap<String, VariantEntry>,
}

#[derive(Debug, Clone)]
pub struct ThresholdTable {
    systems: IndexMap<String, SystemEntry>,
}

impl ThresholdTable {
    pub fn from_yaml_str(src: &str) -> Result<Self> {
        let systems: IndexMap<String, SystemEntry> =
            serde_yaml::from_str(src).map_err(|e| CheckError::table(e.to_string()))?;
        for (system, entry) in &systems {
            if entry.die_size < 1 {
                return Err(CheckError::table(format!(
                    "{system}.die_size must be at least 1, got {}",
                    entry.die_size
                )));
            }
            if entry.variants.is_empty() {
                return Err(CheckError::table(format!("{system} declares no variants")));
            }
            for (name, variant) in &entry.variants {
                variant.validate(system, name)?;
            }
        }
        tracing::debug!(systems = systems.len(), "threshold table loaded");
        Ok(Self { systems })
    }

    /// A table compiled into the crate (see [`crate::content`]).
    pub fn builtin(id: &str) -> Result<Self> {
        let tables = builtin_tables();
        let src = tables
            .get(id)
            .ok_or_else(|| CheckError::table(format!("no builtin table '{id}'")))?;
        Self::from_yaml_str(src)
    }

    pub fn standard() -> Result<Self> {
        Self::builtin(DEFAULT_TABLE)
    }

    pub fn systems(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    /// Variant names of `system` in declaration order.
    pub fn variant_names(&self, system: &str) -> Result<Vec<&str>> {
        Ok(self.system(system)?.variants.keys().map(String::as_str).collect())
    }

    pub fn die_size(&self, system: &str) -> Result<i32> {
        Ok(self.system(system)?.die_size)
    }

    pub fn resolve(&self, system: &str, variant: &str) -> Result<Thresholds> {
        self.system(system)?
            .variants
            .iter()
            .find(|(name, entry)| entry.matches(name, variant))
            .map(|(_, entry)| entry.thresholds())
            .ok_or_else(|| {
                tracing::warn!(system, variant, "unknown variant");
                CheckError::Configuration {
                    system: system.to_string(),
                    variant: variant.to_string(),
                }
            })
    }

    /// Resolve a variant straight into a [`CheckConfig`] with no target set.
    pub fn config(&self, system: &str, variant: &str) -> Result<CheckConfig> {
        self.resolve(system, variant).map(CheckConfig::from_thresholds)
    }

    fn system(&self, system: &str) -> Result<&SystemEntry> {
        self.systems
            .get(system)
            .ok_or_else(|| CheckError::UnknownSystem(system.to_string()))
    }
}

/// Percentile variant from the built-in table, e.g. `"standard"`, `"CCB"`.
pub fn resolve_config(variant: &str) -> Result<CheckConfig> {
    ThresholdTable::standard()?.config(PERCENTILE, variant)
}
