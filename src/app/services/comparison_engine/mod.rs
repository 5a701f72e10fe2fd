//! Two-pass comparison of partner rows against authoritative trips
//!
//! This module implements the matching core: a candidate-key index built
//! from authoritative records, a partner-to-authoritative pass that
//! classifies every normalized row, an authoritative-to-partner pass that
//! finds unclaimed records, and field-level difference detection with
//! severity scoring.
//!
//! The module is organized into logical components:
//! - [`engine`] - the `ComparisonEngine` orchestration and summary assembly
//! - [`key_index`] - candidate-key map construction and leg-payload handling
//! - [`field_diff`] - per-field comparators producing differences
//!
//! The whole pipeline is a synchronous pure computation: each `compare`
//! call allocates its own maps and lists, so concurrent callers never
//! share state.

pub mod engine;
pub mod field_diff;
pub mod key_index;

#[cfg(test)]
mod tests;

// Re-export main types for easy access
pub use engine::ComparisonEngine;
pub use key_index::KeyIndex;
