//! Identifier generation for CRM entities.
//!
//! Every entity collection owns one [`IdGenerator`]. Identifiers are assigned by the store at
//! creation time and are never supplied by callers.
//!
//! Two schemes are supported:
//! - **Sequential** (default): a human-readable prefix followed by a per-collection counter,
//!   for example `P-1029`, `S007`, `LAB-2026-006`. The counter only moves forward and any
//!   candidate that is already taken is skipped, so uniqueness holds for any call sequence.
//! - **Uuid**: the prefix followed by 32 lowercase hex characters, for example
//!   `INV-550e8400e29b41d4a716446655440000`.
//!
//! The counter of a generator should be advanced past pre-existing identifiers with
//! [`IdGenerator::observe`] before new identifiers are handed out.

mod generator;

pub use generator::{IdGenerator, IdPattern, IdScheme};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The sequential counter cannot advance any further
    #[error("identifier sequence exhausted for prefix '{0}'")]
    Exhausted(&'static str),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
