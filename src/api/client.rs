//! HTTP client for the inventory REST API

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::pagination::{parse_audit_page, AuditQuery, Page};
use crate::audit::{AuditRecord, RelationCatalog, CATALOG_SOURCES};
use crate::config::Settings;
use crate::error::{AssetDeskError, AssetDeskResult};
use crate::permissions::Capability;

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin JSON client with bearer-token auth
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is not absolute http(s).
    pub fn new(base_url: &str, token: Option<String>) -> AssetDeskResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            AssetDeskError::Config(format!("Invalid API URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AssetDeskError::Config(format!(
                "API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_settings(settings: &Settings) -> AssetDeskResult<Self> {
        Self::new(&settings.api_base_url, settings.api_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> AssetDeskResult<Value> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(AssetDeskError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetDeskError::Api {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AssetDeskError::Json(format!("Invalid response from {}: {}", url, e)))
    }

    /// Fetch one page of the audit log
    ///
    /// Only viewers who can manage the system may read the audit log.
    pub async fn fetch_audits(
        &self,
        query: &AuditQuery,
        viewer: &Capability,
    ) -> AssetDeskResult<Page<AuditRecord>> {
        viewer.require_manage_system("Viewing the audit log")?;

        let body = self.get_json("audits", &query.to_pairs()).await?;
        let page = parse_audit_page(body);

        tracing::info!(
            records = page.data.len(),
            page = page.pagination.current_page,
            last_page = page.pagination.last_page,
            "Fetched audit page"
        );
        Ok(page)
    }

    /// Load relation names from the listing endpoints
    ///
    /// Listings are fetched concurrently; one that fails is logged and left
    /// out, so ids from it are shown unresolved.
    pub async fn fetch_catalog(&self) -> RelationCatalog {
        let [employees, roles, units, devices] = CATALOG_SOURCES;
        let results = tokio::join!(
            self.get_json(employees.endpoint, &[]),
            self.get_json(roles.endpoint, &[]),
            self.get_json(units.endpoint, &[]),
            self.get_json(devices.endpoint, &[]),
        );

        let mut catalog = RelationCatalog::new();
        let outcomes = [
            (employees, results.0),
            (roles, results.1),
            (units, results.2),
            (devices, results.3),
        ];
        for (source, result) in outcomes {
            match result {
                Ok(body) => {
                    let added = catalog.fill_from_listing(&source, &body);
                    tracing::debug!(endpoint = source.endpoint, added, "Loaded relation names");
                }
                Err(e) => {
                    tracing::warn!(endpoint = source.endpoint, error = %e, "Could not load relation names");
                }
            }
        }
        catalog
    }
}

/// Prefer the API's `message` field over the raw body
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}
