//! Async HTTP client wrapping the roster JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Method, Response, Url};
use roster_core::activity::Listing;
use serde::Deserialize;

/// Async HTTP client for the roster JSON API.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: Url,
}

#[derive(Deserialize)]
struct MessageBody {
  message: String,
}

#[derive(Deserialize)]
struct DetailBody {
  detail: String,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self> {
    let base_url = Url::parse(base_url)
      .with_context(|| format!("invalid server URL {base_url:?}"))?;
    if base_url.cannot_be_a_base() {
      return Err(anyhow!("server URL {base_url} cannot carry a path"));
    }
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url })
  }

  /// Join `segments` onto the base URL, percent-encoding each one.
  pub fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  /// `GET /activities`
  pub async fn list_activities(&self) -> Result<Listing> {
    let resp = self
      .client
      .get(self.url(&["activities"]))
      .send()
      .await
      .context("GET /activities failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /activities → {}", resp.status()));
    }
    resp.json().await.context("deserialising activities")
  }

  /// `POST /activities/{activity}/signup?email=<email>`
  pub async fn signup(&self, activity: &str, email: &str) -> Result<String> {
    self.roster_call(Method::POST, activity, "signup", email).await
  }

  /// `DELETE /activities/{activity}/unregister?email=<email>`
  pub async fn unregister(&self, activity: &str, email: &str) -> Result<String> {
    self
      .roster_call(Method::DELETE, activity, "unregister", email)
      .await
  }

  async fn roster_call(
    &self,
    method: Method,
    activity: &str,
    action: &str,
    email: &str,
  ) -> Result<String> {
    let url = self.url(&["activities", activity, action]);
    tracing::debug!(%method, %url, email, "sending request");
    let resp = self
      .client
      .request(method.clone(), url)
      .query(&[("email", email)])
      .send()
      .await
      .with_context(|| format!("{method} {action} failed"))?;

    if !resp.status().is_success() {
      return Err(error_from(resp).await);
    }
    let body: MessageBody = resp.json().await.context("deserialising reply")?;
    Ok(body.message)
  }
}

/// Prefer the server's `detail` message; fall back to the bare status.
async fn error_from(resp: Response) -> anyhow::Error {
  let status = resp.status();
  match resp.json::<DetailBody>().await {
    Ok(body) => anyhow!("{} ({status})", body.detail),
    Err(_) => anyhow!("server returned {status}"),
  }
}
