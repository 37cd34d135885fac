//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the same analysis the CLI performs as MCP tools over stdio. Tools
//! delegate to a shared [`Session`]; grammar checks run on tokio's blocking
//! pool because a grammar service may make blocking HTTP calls.
//!
//! # Tools
//!
//! - `get_info` - package name and version
//! - `analyze_text` - statistics
//! - `word_frequency` - most frequent words
//! - `check_grammar` - grammar issues
//! - `submit_text` - full report
//! - `writing_tips` - static writing tips

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use textlens_core::tips::WRITING_TIPS;
use textlens_core::{AnalysisError, Session, frequency};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for tools that take only text.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TextParams {
    /// The text to analyze.
    pub text: String,
}

/// Parameters for the `word_frequency` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct WordFrequencyParams {
    /// The text to analyze.
    pub text: String,
    /// Number of words to return. Defaults to the configured value.
    pub top_n: Option<usize>,
}

/// MCP server exposing text analysis.
#[derive(Clone)]
pub struct TextlensServer {
    session: Arc<Session>,
    max_input: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for TextlensServer {
    fn default() -> Self {
        Self::new(
            Arc::new(Session::default()),
            Some(textlens_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

fn analysis_error(err: &AnalysisError) -> McpError {
    match err {
        AnalysisError::InvalidArgument { .. } => McpError::invalid_params(err.to_string(), None),
        AnalysisError::Service(_) => McpError::internal_error(err.to_string(), None),
    }
}

#[tool_router]
impl TextlensServer {
    /// Create a server backed by `session`.
    pub fn new(session: Arc<Session>, max_input: Option<usize>) -> Self {
        Self {
            session,
            max_input,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        match self.max_input {
            Some(max) if text.len() > max => Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            )),
            _ => Ok(()),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "grammar_service": self.session.grammar().name(),
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Word, character and sentence counts with sentiment.
    #[tool(
        description = "Compute word count, character count, sentence count and sentiment (positive, negative or neutral) for text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let stats = self
            .session
            .analyzer()
            .analyze(&params.text)
            .map_err(|e| analysis_error(&e))?;

        tracing::info!(tool = "analyze_text", words = stats.word_count, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&stats)?)]))
    }

    /// Most frequent words.
    #[tool(
        description = "Count case-insensitive word frequencies. Returns the most frequent words, most frequent first."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn word_frequency(
        &self,
        Parameters(params): Parameters<WordFrequencyParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let top_n = params.top_n.unwrap_or_else(|| self.session.top_n());
        let entries =
            frequency::word_frequency(&params.text, top_n).map_err(|e| analysis_error(&e))?;

        tracing::info!(tool = "word_frequency", entries = entries.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&entries)?)]))
    }

    /// Grammar issues.
    #[tool(
        description = "Check text for grammar, spelling, punctuation and style issues. Returns each issue with its context, category and suggested replacements."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn check_grammar(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let session = Arc::clone(&self.session);
        let issues = tokio::task::spawn_blocking(move || session.grammar().check(&params.text))
            .await
            .map_err(|e| McpError::internal_error(format!("grammar task failed: {e}"), None))?
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        tracing::info!(tool = "check_grammar", issues = issues.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&issues)?)]))
    }

    /// Full report.
    #[tool(
        description = "Analyze text in one pass: statistics, grammar issues and word frequencies. Returns null for blank text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn submit_text(
        &self,
        Parameters(params): Parameters<TextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(&params.text)?;
        let session = Arc::clone(&self.session);
        let report = tokio::task::spawn_blocking(move || session.submit(&params.text))
            .await
            .map_err(|e| McpError::internal_error(format!("analysis task failed: {e}"), None))?
            .map_err(|e| analysis_error(&e))?;

        tracing::info!(tool = "submit_text", analyzed = report.is_some(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Writing tips.
    #[tool(description = "List general tips for better writing.")]
    fn writing_tips(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &WRITING_TIPS,
        )?)]))
    }
}

#[tool_handler]
impl ServerHandler for TextlensServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use submit_text for a full report, or the individual tools for statistics, grammar and word frequency.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use textlens_core::error::{ServiceError, ServiceResult};
    use textlens_core::{GrammarIssue, GrammarService, TextAnalyzer};

    struct Down;

    impl GrammarService for Down {
        fn name(&self) -> &str {
            "down"
        }

        fn check(&self, _text: &str) -> ServiceResult<Vec<GrammarIssue>> {
            Err(ServiceError::Status {
                service: "down".to_string(),
                status: 502,
            })
        }
    }

    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json(result: &CallToolResult) -> serde_json::Value {
        serde_json::from_str(extract_text(result).expect("text content")).expect("valid JSON")
    }

    fn text(s: &str) -> Parameters<TextParams> {
        Parameters(TextParams {
            text: s.to_string(),
        })
    }

    #[test]
    fn server_info_has_correct_name() {
        let info = ServerHandler::get_info(&TextlensServer::default());
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains(env!("CARGO_PKG_NAME")));
    }

    #[test]
    fn get_info_tool_formats() {
        let server = TextlensServer::default();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "text".to_string(),
            }))
            .unwrap();
        assert!(extract_text(&result).unwrap().contains(env!("CARGO_PKG_VERSION")));

        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .unwrap();
        let value = json(&result);
        assert_eq!(value["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(value["grammar_service"], "builtin");
    }

    #[test]
    fn analyze_text_tool_returns_statistics() {
        let result = TextlensServer::default()
            .analyze_text(text("I love this. It is wonderful."))
            .unwrap();
        let value = json(&result);
        assert_eq!(value["word_count"], 6);
        assert_eq!(value["sentence_count"], 2);
        assert_eq!(value["sentiment_label"], "Positive");
    }

    #[test]
    fn word_frequency_tool_respects_top_n() {
        let result = TextlensServer::default()
            .word_frequency(Parameters(WordFrequencyParams {
                text: "the cat the dog the".to_string(),
                top_n: Some(1),
            }))
            .unwrap();
        let value = json(&result);
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["word"], "the");
        assert_eq!(value[0]["count"], 3);
    }

    #[test]
    fn word_frequency_tool_rejects_zero() {
        let result = TextlensServer::default().word_frequency(Parameters(WordFrequencyParams {
            text: "words".to_string(),
            top_n: Some(0),
        }));
        assert!(result.is_err());
    }

    #[test]
    fn oversize_input_is_rejected() {
        let server = TextlensServer::new(Arc::new(Session::default()), Some(8));
        assert!(server.analyze_text(text("far more than eight bytes")).is_err());
    }

    #[tokio::test]
    async fn check_grammar_tool_lists_issues() {
        let result = TextlensServer::default()
            .check_grammar(text("I saw the the movie."))
            .await
            .unwrap();
        let value = json(&result);
        let issues = value.as_array().unwrap();
        assert!(!issues.is_empty());
        assert!(issues.iter().any(|i| i["category"] == "TYPOS"));
    }

    #[tokio::test]
    async fn submit_text_tool_returns_report() {
        let result = TextlensServer::default()
            .submit_text(text("The cat sat on the mat."))
            .await
            .unwrap();
        let value = json(&result);
        assert_eq!(value["statistics"]["word_count"], 6);
        assert!(value["issues"].is_array());
        assert_eq!(value["frequencies"][0]["word"], "the");
    }

    #[tokio::test]
    async fn submit_text_tool_returns_null_for_blank_text() {
        let result = TextlensServer::default()
            .submit_text(text("   "))
            .await
            .unwrap();
        assert!(json(&result).is_null());
    }

    #[tokio::test]
    async fn grammar_failure_becomes_tool_error() {
        let session = Session::new(Arc::new(Down), TextAnalyzer::default(), 10).unwrap();
        let server = TextlensServer::new(Arc::new(session), None);
        assert!(server.submit_text(text("Some text.")).await.is_err());
        assert!(server.check_grammar(text("Some text.")).await.is_err());
    }

    #[test]
    fn writing_tips_tool_lists_tips() {
        let result = TextlensServer::default().writing_tips().unwrap();
        assert_eq!(json(&result).as_array().unwrap().len(), WRITING_TIPS.len());
    }
}
