//! In-memory backend for the Roster activity directory.
//!
//! The directory lives for the process lifetime; nothing is persisted.

mod store;

pub use roster_core::{Error, Result};
pub use store::MemoryDirectory;
