use std::collections::HashMap;

/// Id of the table used when a caller names none.
pub const DEFAULT_TABLE: &str = "standard";

pub fn builtin_tables() -> HashMap<&'static str, &'static str> {
    HashMap::from([(DEFAULT_TABLE, include_str!("../content/thresholds.yaml"))])
}
