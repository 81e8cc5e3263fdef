//! Error types for `roster-core`.
//!
//! The `Display` strings of the first three variants are surfaced verbatim to
//! HTTP clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Activity not found")]
  ActivityNotFound(String),

  #[error("Student is already signed up")]
  AlreadySignedUp { activity: String, email: String },

  #[error("Student is not signed up for this activity")]
  NotSignedUp { activity: String, email: String },

  #[error("invalid seed: {0}")]
  InvalidSeed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
