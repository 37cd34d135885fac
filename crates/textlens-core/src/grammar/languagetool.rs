//! LanguageTool HTTP client.
//!
//! Talks to a LanguageTool server (`POST /v2/check`). The response is decoded
//! into private wire records and converted to [`GrammarIssue`] at the
//! boundary, so nothing outside this module depends on the server's JSON
//! shape.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use super::{GrammarIssue, GrammarService};
use crate::error::{ServiceError, ServiceResult};

const SERVICE_NAME: &str = "LanguageTool";

/// Default server address (a LanguageTool server started locally).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8081";

/// Default language code.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a LanguageTool server.
///
/// The HTTP client is built on the first call to [`GrammarService::check`]
/// and reused afterwards.
#[derive(Debug)]
pub struct LanguageToolClient {
    base_url: String,
    language: String,
    timeout: Duration,
    http: OnceLock<reqwest::blocking::Client>,
}

impl LanguageToolClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: OnceLock::new(),
        }
    }

    /// Set the language code sent with each request (e.g. `en-GB`).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The `/v2/check` endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/v2/check", self.base_url)
    }

    fn http(&self) -> ServiceResult<&reqwest::blocking::Client> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        tracing::debug!(timeout = ?self.timeout, "building LanguageTool HTTP client");
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("textlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::ClientInit(e.to_string()))?;
        Ok(self.http.get_or_init(|| client))
    }
}

impl GrammarService for LanguageToolClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len(), language = %self.language))]
    fn check(&self, text: &str) -> ServiceResult<Vec<GrammarIssue>> {
        let endpoint = self.endpoint();
        let response = self
            .http()?
            .post(&endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .map_err(|source| ServiceError::Unavailable {
                service: SERVICE_NAME.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), endpoint, "LanguageTool request failed");
            return Err(ServiceError::Status {
                service: SERVICE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| ServiceError::Unavailable {
            service: SERVICE_NAME.to_string(),
            source,
        })?;
        let issues = parse_response(&body)?;
        tracing::debug!(issues = issues.len(), "LanguageTool check complete");
        Ok(issues)
    }
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    message: String,
    #[serde(default)]
    replacements: Vec<WireReplacement>,
    offset: usize,
    length: usize,
    context: WireContext,
    rule: WireRule,
}

#[derive(Debug, Deserialize)]
struct WireReplacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WireContext {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireRule {
    id: String,
    category: WireCategory,
}

#[derive(Debug, Deserialize)]
struct WireCategory {
    id: String,
}

impl From<WireMatch> for GrammarIssue {
    fn from(m: WireMatch) -> Self {
        Self {
            message: m.message,
            context: m.context.text,
            category: m.rule.category.id,
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
            rule_id: Some(m.rule.id),
            offset: m.offset,
            length: m.length,
        }
    }
}

/// Decode a `/v2/check` response body.
///
/// # Errors
///
/// Returns [`ServiceError::Decode`] if the body is not a valid response.
pub fn parse_response(body: &str) -> ServiceResult<Vec<GrammarIssue>> {
    let response: CheckResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Decode {
            service: SERVICE_NAME.to_string(),
            reason: e.to_string(),
        })?;
    Ok(response.matches.into_iter().map(GrammarIssue::from).collect())
}
