use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod classifier;
pub mod combiner;
pub mod config;
pub mod content;
pub mod error;
pub mod selector;
pub mod systems;
pub mod trace;

pub use classifier::{
    evaluate_check, evaluate_resistance, resistance_target, Classification, Outcome,
    ResistanceOutcome,
};
pub use combiner::{aggregate_damage, combine, CombinedTier, CombinedVerdict, DamageTotal};
pub use config::{resolve_config, CheckConfig, ThresholdTable, Thresholds};
pub use error::{CheckError, Result};
pub use selector::{select_draw, select_from, Bucket, BucketRule, Selection, SelectionRule};
pub use trace::{CheckReport, KeyText, TierKey, TierText, Token};

/// Uniform die source. Every check asks it exactly as many times as it has dice.
pub trait DrawSource {
    /// One draw in `1..=max`.
    fn draw(&mut self, max: i32) -> i32;

    /// `n` independent draws in `1..=max`, in the order they were rolled.
    fn draw_many(&mut self, n: usize, max: i32) -> Vec<i32> {
        (0..n).map(|_| self.draw(max)).collect()
    }
}

enum Source {
    Seeded(ChaCha8Rng),
    Scripted(VecDeque<i32>),
}

pub struct Dice {
    source: Source,
    drawn: usize,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)),
            drawn: 0,
        }
    }

    /// Replays the given faces in order. Intended for tests and replays.
    ///
    /// # Panics
    ///
    /// `draw` panics once every scripted face has been served.
    pub fn from_scripted(rolls: Vec<i32>) -> Self {
        Self {
            source: Source::Scripted(rolls.into()),
            drawn: 0,
        }
    }

    /// Number of draws handed out so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl DrawSource for Dice {
    fn draw(&mut self, max: i32) -> i32 {
        let served = self.drawn;
        let face = match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(1..=max.max(1)),
            Source::Scripted(queue) => queue
                .pop_front()
                .unwrap_or_else(|| panic!("scripted dice exhausted after {served} draws")),
        };
        self.drawn += 1;
        tracing::trace!(max, face, "draw");
        face
    }
}
