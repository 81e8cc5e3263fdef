//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::directory::ActivityDirectory`]. Static files, redirects and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(roster_api::api_router(directory.clone()))
//! ```

pub mod activities;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use roster_core::directory::ActivityDirectory;

pub use error::ApiError;

/// Build a fully-materialised API router for `directory`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(directory: Arc<S>) -> Router<()>
where
  S: ActivityDirectory + 'static,
  ApiError: From<S::Error>,
{
  Router::new()
    .route("/activities", get(activities::list::<S>))
    .route(
      "/activities/{activity_name}/signup",
      post(activities::signup::<S>),
    )
    .route(
      "/activities/{activity_name}/unregister",
      delete(activities::unregister::<S>),
    )
    .with_state(directory)
}
