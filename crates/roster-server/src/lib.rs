//! HTTP server for the Roster activity directory.
//!
//! Combines the JSON API from `roster-api` with the root redirect and the
//! static front-end mount, and owns configuration and seed loading.

use std::{fs, path::{Path, PathBuf}, sync::Arc};

use anyhow::Context as _;
use axum::{Router, response::Redirect, routing::get};
use roster_api::ApiError;
use roster_core::{activity::Listing, directory::ActivityDirectory};
use roster_store_memory::MemoryDirectory;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Where `GET /` sends the browser.
pub const INDEX_PATH: &str = "/static/index.html";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Directory served under `/static`.
  pub static_dir: PathBuf,
  /// JSON seed file; the built-in activities are used when unset.
  pub seed_path:  Option<PathBuf>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8000,
      static_dir: PathBuf::from("static"),
      seed_path:  None,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Whether the redirect target exists under `static_dir`. A relative
  /// `static_dir` resolves against the working directory.
  pub fn has_static_index(&self) -> bool {
    self.static_dir.join("index.html").is_file()
  }
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Parse a seed document shaped like the `GET /activities` response.
pub fn parse_seed(raw: &str) -> anyhow::Result<MemoryDirectory> {
  let listing: Listing = serde_json::from_str(raw).context("malformed seed JSON")?;
  let directory = MemoryDirectory::new(listing).context("seed rejected")?;
  Ok(directory)
}

/// Build the directory from `seed_path`, or from the built-in activities when
/// no path is given.
pub fn load_directory(seed_path: Option<&Path>) -> anyhow::Result<MemoryDirectory> {
  let Some(path) = seed_path else {
    return Ok(MemoryDirectory::seeded());
  };
  let raw = fs::read_to_string(path)
    .with_context(|| format!("failed to read seed file {}", path.display()))?;
  parse_seed(&raw).with_context(|| format!("invalid seed file {}", path.display()))
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(directory: Arc<S>, config: &ServerConfig) -> Router
where
  S: ActivityDirectory + 'static,
  ApiError: From<S::Error>,
{
  Router::new()
    .route("/", get(root_redirect))
    .merge(roster_api::api_router(directory))
    .nest_service("/static", ServeDir::new(&config.static_dir))
    .layer(TraceLayer::new_for_http())
}

async fn root_redirect() -> Redirect { Redirect::temporary(INDEX_PATH) }

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::Value;
  use tower::ServiceExt as _;

  fn config() -> ServerConfig {
    ServerConfig {
      static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
      ..ServerConfig::default()
    }
  }

  fn app(directory: Arc<MemoryDirectory>) -> Router { router(directory, &config()) }

  async fn oneshot_raw(
    app:    Router,
    method: &str,
    uri:    &str,
  ) -> axum::response::Response {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    app.oneshot(req).await.unwrap()
  }

  async fn json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn participants(directory: &Arc<MemoryDirectory>, name: &str) -> Vec<String> {
    let resp = oneshot_raw(app(directory.clone()), "GET", "/activities").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    serde_json::from_value(body[name]["participants"].clone()).unwrap()
  }

  // ── Root ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_redirects_to_index() {
    let resp = oneshot_raw(app(Arc::new(MemoryDirectory::seeded())), "GET", "/").await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "/static/index.html");
  }

  #[tokio::test]
  async fn static_index_is_served() {
    let resp =
      oneshot_raw(app(Arc::new(MemoryDirectory::seeded())), "GET", INDEX_PATH).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html  = std::str::from_utf8(&bytes).unwrap();
    assert!(html.contains("Mergington High School"), "{html}");
  }

  // ── GET /activities ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_contains_seeded_activities_with_all_fields() {
    let resp = oneshot_raw(app(Arc::new(MemoryDirectory::seeded())), "GET", "/activities").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json(resp).await;
    for name in ["Soccer Team", "Basketball Club", "Drama Club", "Chess Club"] {
      let activity = &body[name];
      assert!(activity["description"].is_string(), "{name}");
      assert!(activity["schedule"].is_string(), "{name}");
      assert!(activity["max_participants"].is_u64(), "{name}");
      assert!(activity["participants"].is_array(), "{name}");
    }
  }

  // ── Signup ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn signup_new_participant() {
    let directory = Arc::new(MemoryDirectory::seeded());
    let resp = oneshot_raw(
      app(directory.clone()),
      "POST",
      "/activities/Soccer%20Team/signup?email=newstudent@mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let message = json(resp).await["message"].as_str().unwrap().to_string();
    assert_eq!(message, "Signed up newstudent@mergington.edu for Soccer Team");

    let roster = participants(&directory, "Soccer Team").await;
    assert_eq!(roster.len(), 3);
    assert!(roster.contains(&"newstudent@mergington.edu".to_string()));
  }

  #[tokio::test]
  async fn signup_duplicate_participant_returns_400() {
    let directory = Arc::new(MemoryDirectory::seeded());
    let resp = oneshot_raw(
      app(directory.clone()),
      "POST",
      "/activities/Soccer%20Team/signup?email=alex@mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let detail = json(resp).await["detail"].as_str().unwrap().to_lowercase();
    assert!(detail.contains("already signed up"), "{detail}");
    assert_eq!(participants(&directory, "Soccer Team").await.len(), 2);
  }

  #[tokio::test]
  async fn signup_nonexistent_activity_returns_404() {
    let resp = oneshot_raw(
      app(Arc::new(MemoryDirectory::seeded())),
      "POST",
      "/activities/NonExistent%20Activity/signup?email=student@mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let detail = json(resp).await["detail"].as_str().unwrap().to_lowercase();
    assert!(detail.contains("not found"), "{detail}");
  }

  #[tokio::test]
  async fn encoded_and_literal_names_resolve_alike() {
    let directory = Arc::new(MemoryDirectory::seeded());
    let first = oneshot_raw(
      app(directory.clone()),
      "POST",
      "/activities/Soccer%20Team/signup?email=another@mergington.edu",
    ).await;
    assert_eq!(first.status(), StatusCode::OK);

    // The same participant through a differently-encoded path is a duplicate.
    let second = oneshot_raw(
      app(directory.clone()),
      "POST",
      "/activities/Soccer%20Tea%6D/signup?email=another@mergington.edu",
    ).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn encoded_email_is_decoded() {
    let directory = Arc::new(MemoryDirectory::seeded());
    let resp = oneshot_raw(
      app(directory.clone()),
      "POST",
      "/activities/Drama%20Club/signup?email=first.last%2Btag%40mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let roster = participants(&directory, "Drama Club").await;
    assert!(roster.contains(&"first.last+tag@mergington.edu".to_string()), "{roster:?}");
  }

  // ── Unregister ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unregister_existing_participant() {
    let directory = Arc::new(MemoryDirectory::seeded());
    let resp = oneshot_raw(
      app(directory.clone()),
      "DELETE",
      "/activities/Soccer%20Team/unregister?email=alex@mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let message = json(resp).await["message"].as_str().unwrap().to_string();
    assert_eq!(message, "Unregistered alex@mergington.edu from Soccer Team");
    assert_eq!(
      participants(&directory, "Soccer Team").await,
      vec!["sarah@mergington.edu".to_string()]
    );
  }

  #[tokio::test]
  async fn unregister_non_registered_participant_returns_400() {
    let resp = oneshot_raw(
      app(Arc::new(MemoryDirectory::seeded())),
      "DELETE",
      "/activities/Soccer%20Team/unregister?email=notregistered@mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let detail = json(resp).await["detail"].as_str().unwrap().to_lowercase();
    assert!(detail.contains("not signed up"), "{detail}");
  }

  #[tokio::test]
  async fn unregister_from_nonexistent_activity_returns_404() {
    let resp = oneshot_raw(
      app(Arc::new(MemoryDirectory::seeded())),
      "DELETE",
      "/activities/NonExistent%20Activity/unregister?email=student@mergington.edu",
    ).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Flows ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn signup_and_unregister_flow_restores_roster() {
    let directory = Arc::new(MemoryDirectory::seeded());
    let before = participants(&directory, "Basketball Club").await;

    let up = oneshot_raw(
      app(directory.clone()),
      "POST",
      "/activities/Basketball%20Club/signup?email=testflow@mergington.edu",
    ).await;
    assert_eq!(up.status(), StatusCode::OK);
    assert_eq!(participants(&directory, "Basketball Club").await.len(), before.len() + 1);

    let down = oneshot_raw(
      app(directory.clone()),
      "DELETE",
      "/activities/Basketball%20Club/unregister?email=testflow@mergington.edu",
    ).await;
    assert_eq!(down.status(), StatusCode::OK);
    assert_eq!(participants(&directory, "Basketball Club").await, before);
  }

  // ── Static directory ────────────────────────────────────────────────────────

  #[test]
  fn has_static_index_finds_bundled_front_end() {
    assert!(config().has_static_index());
  }

  #[test]
  fn has_static_index_reports_missing_directory() {
    let cfg = ServerConfig {
      static_dir: PathBuf::from("/nonexistent/roster-static"),
      ..ServerConfig::default()
    };
    assert!(!cfg.has_static_index());
  }

  #[test]
  fn example_config_static_dir_resolves_from_workspace_root() {
    let cfg: ServerConfig = config::Config::builder()
      .add_source(config::File::from_str(
        include_str!("../config.example.toml"),
        config::FileFormat::Toml,
      ))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    assert!(
      workspace_root.join(&cfg.static_dir).join("index.html").is_file(),
      "{}",
      cfg.static_dir.display()
    );
  }

  // ── Seeding ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn parse_seed_builds_directory_in_file_order() {
    let raw = r#"{
      "Robotics": {
        "description": "Build robots",
        "schedule": "Thursdays, 4:00 PM - 6:00 PM",
        "max_participants": 10,
        "participants": ["ada@mergington.edu"]
      },
      "Art Club": {
        "description": "Paint",
        "schedule": "Mondays",
        "max_participants": 15
      }
    }"#;
    let directory = parse_seed(raw).unwrap();
    let listing   = directory.list_activities().await.unwrap();
    assert_eq!(listing.names().collect::<Vec<_>>(), vec!["Robotics", "Art Club"]);
  }

  #[test]
  fn parse_seed_rejects_duplicate_participants() {
    let raw = r#"{"X": {"description":"d","schedule":"s","max_participants":2,
      "participants":["a@b.edu","a@b.edu"]}}"#;
    assert!(parse_seed(raw).is_err());
  }

  #[test]
  fn load_directory_without_path_uses_builtin_seed() {
    let directory = load_directory(None).unwrap();
    assert_eq!(directory.len(), 6);
  }

  #[test]
  fn load_directory_reports_missing_file() {
    let err = load_directory(Some(Path::new("/nonexistent/roster-seed.json"))).unwrap_err();
    assert!(format!("{err:#}").contains("roster-seed.json"), "{err:#}");
  }
}
