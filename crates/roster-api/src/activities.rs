//! Handlers for `/activities` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/activities` | Every activity, keyed by name |
//! | `POST`   | `/activities/{activity_name}/signup` | `?email=` required |
//! | `DELETE` | `/activities/{activity_name}/unregister` | `?email=` required |
//!
//! `activity_name` arrives percent-encoded (`Soccer%20Team`); the [`Path`]
//! extractor decodes it before lookup.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use roster_core::{activity::Listing, directory::ActivityDirectory};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EmailParams {
  pub email: String,
}

/// Success body of the mutating endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
  pub message: String,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /activities`
pub async fn list<S>(State(directory): State<Arc<S>>) -> Result<Json<Listing>, ApiError>
where
  S: ActivityDirectory,
  ApiError: From<S::Error>,
{
  let listing = directory.list_activities().await?;
  Ok(Json(listing))
}

// ─── Signup ───────────────────────────────────────────────────────────────────

/// `POST /activities/{activity_name}/signup?email=<email>`
pub async fn signup<S>(
  State(directory): State<Arc<S>>,
  Path(activity_name): Path<String>,
  Query(params): Query<EmailParams>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: ActivityDirectory,
  ApiError: From<S::Error>,
{
  directory.signup(&activity_name, &params.email).await?;
  Ok(Json(MessageBody {
    message: format!("Signed up {} for {activity_name}", params.email),
  }))
}

// ─── Unregister ───────────────────────────────────────────────────────────────

/// `DELETE /activities/{activity_name}/unregister?email=<email>`
pub async fn unregister<S>(
  State(directory): State<Arc<S>>,
  Path(activity_name): Path<String>,
  Query(params): Query<EmailParams>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: ActivityDirectory,
  ApiError: From<S::Error>,
{
  directory.unregister(&activity_name, &params.email).await?;
  Ok(Json(MessageBody {
    message: format!("Unregistered {} from {activity_name}", params.email),
  }))
}
