//! The `ActivityDirectory` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-memory`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::activity::Listing;

/// Abstraction over the activity directory.
///
/// The set of activities is fixed once the directory is built; only rosters
/// change. Each mutating call is a single check-then-mutate step that either
/// fully succeeds or leaves the roster untouched.
///
/// All methods return `Send` futures so the trait can be used behind `axum`
/// on a multi-threaded tokio runtime.
pub trait ActivityDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Snapshot every activity, in directory order.
  fn list_activities(
    &self,
  ) -> impl Future<Output = Result<Listing, Self::Error>> + Send + '_;

  /// Append `email` to the roster of `activity_name`.
  ///
  /// Fails if the activity does not exist or the email is already on its
  /// roster. Capacity is not checked.
  fn signup<'a>(
    &'a self,
    activity_name: &'a str,
    email: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove `email` from the roster of `activity_name`.
  ///
  /// Fails if the activity does not exist or the email is not on its roster.
  fn unregister<'a>(
    &'a self,
    activity_name: &'a str,
    email: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
