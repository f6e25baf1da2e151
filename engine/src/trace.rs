//! Structured trace of a check: ordered display tokens plus the tier keys a
//! text resolver turns into words. Nothing here picks phrases; [`TierText`]
//! implementations do.

use serde::{Deserialize, Serialize};

/// Joins the tokens of one trace line.
pub const SEPARATOR: &str = " ＞ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKey {
    CriticalSpecial,
    Critical,
    Special,
    Success,
    BrokenFumble,
    Broken,
    Fumble,
    Failure,
    PartialSuccess,
    AutomaticSuccess,
    AutomaticFailure,
    DirectHit,
    BasicEffect,
}

impl TierKey {
    pub const ALL: [TierKey; 13] = [
        TierKey::CriticalSpecial,
        TierKey::Critical,
        TierKey::Special,
        TierKey::Success,
        TierKey::BrokenFumble,
        TierKey::Broken,
        TierKey::Fumble,
        TierKey::Failure,
        TierKey::PartialSuccess,
        TierKey::AutomaticSuccess,
        TierKey::AutomaticFailure,
        TierKey::DirectHit,
        TierKey::BasicEffect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TierKey::CriticalSpecial => "critical_special",
            TierKey::Critical => "critical",
            TierKey::Special => "special",
            TierKey::Success => "success",
            TierKey::BrokenFumble => "broken_fumble",
            TierKey::Broken => "broken",
            TierKey::Fumble => "fumble",
            TierKey::Failure => "failure",
            TierKey::PartialSuccess => "partial_success",
            TierKey::AutomaticSuccess => "automatic_success",
            TierKey::AutomaticFailure => "automatic_failure",
            TierKey::DirectHit => "direct_hit",
            TierKey::BasicEffect => "basic_effect",
        }
    }
}

/// Turns tier keys (and the few fixed labels a trace needs) into text.
pub trait TierText {
    fn resolve(&self, key: TierKey) -> String;

    /// Label printed before a broken number in the expression token.
    fn broken_number_label(&self) -> String {
        "broken_number".to_string()
    }
}

/// Resolves every key to its own snake_case name.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyText;

impl TierText for KeyText {
    fn resolve(&self, key: TierKey) -> String {
        key.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// The request echoed back, e.g. `(1D100<=80)`.
    Expr {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        broken_number: Option<i32>,
    },
    /// Raw faces, e.g. `[3,5,18]`.
    Draws { values: Vec<i32> },
    /// A value with its contributing parts and modifier, e.g. `18[18]+5`.
    Derived {
        value: i32,
        parts: Vec<i32>,
        modifier: i32,
    },
    Number { value: i32 },
    /// One draw judged against several targets, e.g. `40[success,failure]`.
    Judged { draw: i32, tiers: Vec<TierKey> },
    Tier { key: TierKey },
}

impl Token {
    pub fn expr(text: impl Into<String>) -> Self {
        Token::Expr {
            text: text.into(),
            broken_number: None,
        }
    }

    pub fn render(&self, text: &impl TierText) -> String {
        match self {
            Token::Expr {
                text: expr,
                broken_number: Some(n),
            } => format!("{} {}[{}]", expr, text.broken_number_label(), n),
            Token::Expr { text: expr, .. } => expr.clone(),
            Token::Draws { values } => format!("[{}]", join(values)),
            Token::Derived {
                value,
                parts,
                modifier,
            } => format!("{}[{}]{}", value, join(parts), format_modifier(*modifier)),
            Token::Number { value } => value.to_string(),
            Token::Judged { draw, tiers } => {
                let labels = tiers.iter().map(|k| text.resolve(*k)).collect::<Vec<_>>();
                format!("{}[{}]", draw, labels.join(","))
            }
            Token::Tier { key } => text.resolve(*key),
        }
    }
}

/// Render tokens into one line joined by [`SEPARATOR`].
pub fn render(tokens: &[Token], text: &impl TierText) -> String {
    tokens
        .iter()
        .map(|t| t.render(text))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// What a handler hands back: flags for the caller, tokens for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub tokens: Vec<Token>,
    pub tier: Option<TierKey>,
    pub total: Option<i32>,
    pub success: bool,
    pub failure: bool,
    pub critical: bool,
    pub fumble: bool,
}

impl CheckReport {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tier: None,
            total: None,
            success: false,
            failure: false,
            critical: false,
            fumble: false,
        }
    }

    pub fn render(&self, text: &impl TierText) -> String {
        render(&self.tokens, text)
    }
}

/// `+5`, `-2`, or nothing for zero.
pub fn format_modifier(modifier: i32) -> String {
    match modifier {
        0 => String::new(),
        m if m > 0 => format!("+{}", m),
        m => format!("-{}", m.unsigned_abs()),
    }
}

fn join(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
