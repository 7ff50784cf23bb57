//! MCP (Model Context Protocol) server.
//!
//! Exposes the page checks to AI assistants over stdio. Every tool takes raw
//! HTML, parses it with the same code path as the CLI, and returns the core
//! report serialized as JSON.
//!
//! Input problems (oversized or blank HTML, unknown check names) are returned
//! as `invalid_params`; serialization failures as `internal_error`.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use seo_lens_core::{
    AuditCheck, AuditRequest, Config, NoopAdvisor, PageDocument, analyze_content,
    analyze_keyword_usage, html, run_audit,
};

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

/// Parameters for the `analyze_content` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeContentParams {
    /// The page HTML.
    pub html: String,
    /// URL the page is served at.
    pub url: Option<String>,
    /// Language hint, overriding the page's lang attribute.
    pub lang: Option<String>,
}

/// Parameters for the `analyze_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeKeywordsParams {
    /// The page HTML.
    pub html: String,
    /// Comma-separated keywords. Falls back to the configured list.
    pub keywords: Option<String>,
    /// URL the page is served at.
    pub url: Option<String>,
}

/// Parameters for the `audit_page` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AuditPageParams {
    /// The page HTML.
    pub html: String,
    /// URL the page is served at.
    pub url: Option<String>,
    /// Comma-separated keywords. Falls back to the configured list.
    pub keywords: Option<String>,
    /// Checks to run: title, meta-description, headings, images, content,
    /// keywords. Omit for all checks.
    pub checks: Option<Vec<String>>,
}

/// MCP server exposing page audits.
#[derive(Clone)]
pub struct PageServer {
    config: Config,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for PageServer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_router]
impl PageServer {
    /// Create a server that applies `config` to every request.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Parse `source`, enforcing the size limit and rejecting blank input.
    fn page(
        &self,
        source: &str,
        url: Option<&str>,
        lang: Option<&str>,
    ) -> Result<PageDocument, McpError> {
        if let Some(max) = self.config.input_limit()
            && source.len() > max
        {
            return Err(McpError::invalid_params(
                format!(
                    "input too large: {} bytes (limit: {max} bytes)",
                    source.len()
                ),
                None,
            ));
        }
        if source.trim().is_empty() {
            return Err(McpError::invalid_params("html is empty", None));
        }

        let mut page = html::parse_page(source, url);
        if let Some(lang) = lang {
            page.language = Some(lang.to_string());
        } else if page.language.is_none() {
            page.language.clone_from(&self.config.language);
        }
        Ok(page)
    }

    fn keywords(&self, requested: Option<String>) -> Option<String> {
        requested.or_else(|| self.config.keywords.clone())
    }

    /// Get server information.
    #[tool(description = "Get server name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        if params.format == "json" {
            return to_json(&info);
        }
        let text = format!(
            "{} v{}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Readability scores and long passages for a page.
    #[tool(
        description = "Analyze the paragraph content of an HTML page. Returns Flesch reading ease, LIX, average sentence length, and long paragraphs and sentences."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_content(
        &self,
        Parameters(params): Parameters<AnalyzeContentParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_content", bytes = params.html.len(), "executing MCP tool");

        let page = self.page(&params.html, params.url.as_deref(), params.lang.as_deref())?;
        let report = analyze_content(&page, &self.config.content_options(), &NoopAdvisor);

        tracing::info!(
            tool = "analyze_content",
            paragraphs = report.paragraph_count,
            "MCP tool completed"
        );
        to_json(&report)
    }

    /// Keyword density, placement and overlap for a page.
    #[tool(
        description = "Check where keywords appear on an HTML page (title, meta description, URL, headings, first paragraph), their density, and how much they overlap."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_keywords(
        &self,
        Parameters(params): Parameters<AnalyzeKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_keywords", keywords = ?params.keywords, "executing MCP tool");

        let page = self.page(&params.html, params.url.as_deref(), None)?;
        let input = self.keywords(params.keywords).unwrap_or_default();
        let report = analyze_keyword_usage(&page, &input)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "analyze_keywords",
            keywords = report.keywords.len(),
            "MCP tool completed"
        );
        to_json(&report)
    }

    /// Full audit of a page.
    #[tool(
        description = "Audit an HTML page: title and meta description length, heading structure, image alt text, content readability, and keyword usage."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn audit_page(
        &self,
        Parameters(params): Parameters<AuditPageParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "audit_page", checks = ?params.checks, "executing MCP tool");

        let checks = params
            .checks
            .unwrap_or_default()
            .iter()
            .map(|name| name.parse::<AuditCheck>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let page = self.page(&params.html, params.url.as_deref(), None)?;
        let request = AuditRequest {
            checks,
            keywords: self.keywords(params.keywords),
            content: self.config.content_options(),
        };
        let report = run_audit(&page, &request, &NoopAdvisor);

        tracing::info!(tool = "audit_page", checks = report.checks.len(), "MCP tool completed");
        to_json(&report)
    }
}

#[tool_handler]
impl ServerHandler for PageServer {
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
                "{} MCP server. Pass page HTML to analyze_content, analyze_keywords or audit_page.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
