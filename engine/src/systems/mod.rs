//! Game-system handlers: a typed request in, a [`crate::CheckReport`] out.

pub mod d20;
pub mod percentile;
