//! Core types and trait definitions for the Roster activity directory.
//!
//! This crate is free of HTTP and runtime dependencies. Storage backends
//! implement [`directory::ActivityDirectory`]; the API layer depends only on
//! that trait.

// Native `async fn` in traits; the trait spells out its `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod activity;
pub mod directory;
pub mod error;
pub mod seed;

pub use error::{Error, Result};
