use crate::aibom_aggregation::domain::TargetDescriptor;
use crate::ports::outbound::AibomSource;
use crate::shared::error::AibomError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

/// Default Snyk REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.snyk.io";

/// REST API version sent with every request
const API_VERSION: &str = "2024-10-15";

const JSONAPI_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Page size for target and organization listings
const PAGE_LIMIT: u32 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base back-off between retries, multiplied by the attempt number
const RETRY_DELAY_MS: u64 = 500;

/// Scope of a scan: one organization, or every organization of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiScope {
    Organization(String),
    Group(String),
}

/// Outcome of a single request attempt
enum Attempt {
    Retryable(anyhow::Error),
    Fatal(anyhow::Error),
}

/// SnykAibomClient adapter for the Snyk REST AI-BOM API
///
/// Implements the AibomSource port. AI-BOM generation is asynchronous on
/// the server side: a job is created, polled until it finishes, and the
/// resulting document is then downloaded.
pub struct SnykAibomClient {
    client: reqwest::Client,
    base_url: String,
    scope: ApiScope,
    max_retries: u32,
    poll_interval: Duration,
    max_polls: u32,
}

impl SnykAibomClient {
    /// Creates a client authenticated with `api_token`
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(api_url: &str, api_token: &str, scope: ApiScope) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", api_token)).map_err(|_| {
            AibomError::MissingConfiguration {
                name: "SNYK_API_TOKEN".to_string(),
                hint: "The API token contains characters that are not allowed in an HTTP header"
                    .to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(JSONAPI_CONTENT_TYPE));

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("aibom-tools/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
            scope,
            max_retries: 3,
            poll_interval: Duration::from_secs(2),
            max_polls: 90,
        })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest{}", self.base_url, path)
    }

    fn versioned_url(&self, path: &str) -> String {
        format!("{}?version={}", self.rest_url(path), API_VERSION)
    }

    /// Resolves a `links.next` value, which Snyk returns as a path relative
    /// to either the host or the `/rest` prefix
    fn resolve_link(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else if link.starts_with("/rest/") {
            format!("{}{}", self.base_url, link)
        } else {
            self.rest_url(link)
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        self.send_with_retry(url, || self.client.get(url)).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let payload = serde_json::to_vec(body)?;
        self.send_with_retry(url, || {
            self.client
                .post(url)
                .header(CONTENT_TYPE, JSONAPI_CONTENT_TYPE)
                .body(payload.clone())
        })
        .await
    }

    /// Sends a request, retrying transport errors, 429 and 5xx responses
    /// with a linear back-off
    async fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Value>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match Self::send_once(url, build()).await {
                Ok(value) => return Ok(value),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retryable(e)) => {
                    tracing::debug!(url, attempt, error = %e, "retrying Snyk API request");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64))
                            .await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No request attempted for {}", url)))
    }

    async fn send_once(url: &str, request: reqwest::RequestBuilder) -> std::result::Result<Value, Attempt> {
        let api_error = |details: String| -> anyhow::Error {
            AibomError::ApiError {
                endpoint: url.to_string(),
                details,
            }
            .into()
        };

        let response = request
            .send()
            .await
            .map_err(|e| Attempt::Retryable(api_error(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = api_error(format!("HTTP {}: {}", status, truncate(&body, 300)));
            return Err(if is_retryable(status) {
                Attempt::Retryable(error)
            } else {
                Attempt::Fatal(error)
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Attempt::Fatal(api_error(format!("Invalid JSON response: {}", e))))
    }

    /// Follows `links.next` and concatenates every page's `data` array
    async fn get_all_pages(&self, first_url: String) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next.take() {
            let page = self.get_json(&url).await?;
            if let Some(data) = page.get("data").and_then(Value::as_array) {
                items.extend(data.iter().cloned());
            }
            next = next_link(&page).map(|link| self.resolve_link(link));
        }

        Ok(items)
    }

    async fn list_org_targets(&self, org_id: &str) -> Result<Vec<TargetDescriptor>> {
        let url = format!(
            "{}&limit={}",
            self.versioned_url(&format!("/orgs/{}/targets", urlencoding::encode(org_id))),
            PAGE_LIMIT
        );
        let items = self.get_all_pages(url).await?;
        Ok(items
            .iter()
            .filter_map(|item| parse_target(item, org_id))
            .collect())
    }

    async fn list_group_orgs(&self, group_id: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}&limit={}",
            self.versioned_url(&format!("/groups/{}/orgs", urlencoding::encode(group_id))),
            PAGE_LIMIT
        );
        let items = self.get_all_pages(url).await?;
        Ok(items
            .iter()
            .filter_map(|item| item.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    /// Creates an AI-BOM job and returns its id
    async fn start_job(&self, target: &TargetDescriptor) -> Result<String> {
        let url = self.versioned_url(&format!(
            "/orgs/{}/ai_boms",
            urlencoding::encode(&target.org_id)
        ));
        let body = json!({
            "data": {
                "type": "ai_bom",
                "attributes": {"target_id": target.id}
            }
        });

        let response = self.post_json(&url, &body).await?;
        response
            .pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AibomError::ApiError {
                    endpoint: url,
                    details: "Response does not contain a job id (data.id)".to_string(),
                }
                .into()
            })
    }

    /// Polls a job until it yields an AI-BOM id or the document itself
    async fn await_job(&self, org_id: &str, job_id: &str) -> Result<JobResult> {
        let url = self.versioned_url(&format!(
            "/orgs/{}/ai_bom_jobs/{}",
            urlencoding::encode(org_id),
            urlencoding::encode(job_id)
        ));

        for _ in 0..self.max_polls {
            let response = self.get_json(&url).await?;
            match job_state(&response, job_id) {
                JobState::Pending => tokio::time::sleep(self.poll_interval).await,
                JobState::Done(result) => return Ok(result),
                JobState::Failed(reason) => {
                    return Err(AibomError::ApiError {
                        endpoint: url,
                        details: format!("AI-BOM job {} failed: {}", job_id, reason),
                    }
                    .into())
                }
            }
        }

        Err(AibomError::ApiError {
            endpoint: url,
            details: format!(
                "AI-BOM job {} did not finish after {} polls",
                job_id, self.max_polls
            ),
        }
        .into())
    }
}

#[async_trait]
impl AibomSource for SnykAibomClient {
    async fn list_targets(&self) -> Result<Vec<TargetDescriptor>> {
        match &self.scope {
            ApiScope::Organization(org_id) => self.list_org_targets(org_id).await,
            ApiScope::Group(group_id) => {
                let mut targets = Vec::new();
                for org_id in self.list_group_orgs(group_id).await? {
                    targets.extend(self.list_org_targets(&org_id).await?);
                }
                Ok(targets)
            }
        }
    }

    async fn fetch_aibom(&self, target: &TargetDescriptor) -> Result<Value> {
        let job_id = self.start_job(target).await?;
        tracing::debug!(target_name = %target.name, job_id = %job_id, "AI-BOM job created");

        match self.await_job(&target.org_id, &job_id).await? {
            JobResult::Document(document) => Ok(document),
            JobResult::AibomId(aibom_id) => {
                let url = self.versioned_url(&format!(
                    "/orgs/{}/ai_boms/{}",
                    urlencoding::encode(&target.org_id),
                    urlencoding::encode(&aibom_id)
                ));
                self.get_json(&url).await
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum JobResult {
    /// The job finished; the AI-BOM must be downloaded by id
    AibomId(String),
    /// The poll was redirected to the finished AI-BOM itself
    Document(Value),
}

#[derive(Debug, PartialEq)]
enum JobState {
    Pending,
    Done(JobResult),
    Failed(String),
}

/// Interprets one job poll response
fn job_state(response: &Value, job_id: &str) -> JobState {
    if response.pointer("/data/attributes/components").is_some() {
        return JobState::Done(JobResult::Document(response.clone()));
    }

    let status = response
        .pointer("/data/attributes/status")
        .and_then(Value::as_str)
        .unwrap_or("processing");

    match status {
        "finished" | "completed" => {
            let aibom_id = response
                .pointer("/data/relationships/ai_bom/data/id")
                .and_then(Value::as_str)
                .unwrap_or(job_id);
            JobState::Done(JobResult::AibomId(aibom_id.to_string()))
        }
        "errored" | "failed" => JobState::Failed(
            response
                .pointer("/data/attributes/error")
                .and_then(Value::as_str)
                .unwrap_or(status)
                .to_string(),
        ),
        _ => JobState::Pending,
    }
}

/// Builds a descriptor from one `/targets` item; items without an id are dropped
fn parse_target(item: &Value, org_id: &str) -> Option<TargetDescriptor> {
    let id = item.get("id").and_then(Value::as_str)?;
    let name = item
        .pointer("/attributes/display_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(id);
    // Targets with no integration (e.g. CLI uploads) are not SCM targets
    let integration_type = item
        .pointer("/relationships/integration/data/attributes/integration_type")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    Some(TargetDescriptor::new(
        id,
        name,
        org_id,
        Some(integration_type.to_string()),
    ))
}

fn next_link(page: &Value) -> Option<&str> {
    page.pointer("/links/next")
        .and_then(Value::as_str)
        .filter(|link| !link.is_empty())
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(scope: ApiScope) -> SnykAibomClient {
        SnykAibomClient::new("https://api.example.test/", "secret-token", scope).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client(ApiScope::Organization("org-1".to_string()));
        assert_eq!(client.base_url, "https://api.example.test");
    }

    #[test]
    fn test_client_rejects_token_with_newline() {
        let result = SnykAibomClient::new(
            DEFAULT_API_URL,
            "bad\ntoken",
            ApiScope::Organization("org-1".to_string()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_versioned_url() {
        let client = client(ApiScope::Organization("org-1".to_string()));
        assert_eq!(
            client.versioned_url("/orgs/org-1/targets"),
            format!("https://api.example.test/rest/orgs/org-1/targets?version={}", API_VERSION)
        );
    }

    #[test]
    fn test_resolve_link_variants() {
        let client = client(ApiScope::Group("g".to_string()));
        assert_eq!(
            client.resolve_link("/rest/orgs/o/targets?starting_after=x"),
            "https://api.example.test/rest/orgs/o/targets?starting_after=x"
        );
        assert_eq!(
            client.resolve_link("/orgs/o/targets?starting_after=x"),
            "https://api.example.test/rest/orgs/o/targets?starting_after=x"
        );
        assert_eq!(
            client.resolve_link("https://other.test/rest/x"),
            "https://other.test/rest/x"
        );
    }

    #[test]
    fn test_parse_target() {
        let item = json!({
            "id": "t-1",
            "attributes": {"display_name": "acme/web"},
            "relationships": {
                "integration": {"data": {"attributes": {"integration_type": "github"}}}
            }
        });

        let target = parse_target(&item, "org-1").unwrap();
        assert_eq!(target.id, "t-1");
        assert_eq!(target.name, "acme/web");
        assert_eq!(target.org_id, "org-1");
        assert_eq!(target.integration_type.as_deref(), Some("github"));
        assert!(target.is_supported());
    }

    #[test]
    fn test_parse_target_without_integration_is_unsupported() {
        let target = parse_target(&json!({"id": "t-2"}), "org-1").unwrap();
        assert_eq!(target.name, "t-2");
        assert!(!target.is_supported());
    }

    #[test]
    fn test_parse_target_without_id() {
        assert!(parse_target(&json!({"attributes": {}}), "org-1").is_none());
    }

    #[test]
    fn test_next_link() {
        assert_eq!(
            next_link(&json!({"links": {"next": "/orgs/o/targets?page=2"}})),
            Some("/orgs/o/targets?page=2")
        );
        assert_eq!(next_link(&json!({"links": {"next": ""}})), None);
        assert_eq!(next_link(&json!({"links": {}})), None);
    }

    #[test]
    fn test_job_state_pending() {
        let response = json!({"data": {"attributes": {"status": "processing"}}});
        assert_eq!(job_state(&response, "job-1"), JobState::Pending);
    }

    #[test]
    fn test_job_state_finished_with_relationship() {
        let response = json!({"data": {
            "attributes": {"status": "finished"},
            "relationships": {"ai_bom": {"data": {"id": "bom-9"}}}
        }});
        assert_eq!(
            job_state(&response, "job-1"),
            JobState::Done(JobResult::AibomId("bom-9".to_string()))
        );
    }

    #[test]
    fn test_job_state_redirected_to_document() {
        let response = json!({"data": {"attributes": {"components": []}}});
        assert!(matches!(
            job_state(&response, "job-1"),
            JobState::Done(JobResult::Document(_))
        ));
    }

    #[test]
    fn test_job_state_errored() {
        let response = json!({"data": {"attributes": {"status": "errored", "error": "clone failed"}}});
        assert_eq!(
            job_state(&response, "job-1"),
            JobState::Failed("clone failed".to_string())
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
