//! Full page audit.
//!
//! Runs the enabled checks over one document, orchestrated by [`run_audit`].
//! Every check is independent; a disabled check leaves its field `None`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::advisor::Advisor;
use crate::content::{ContentOptions, ContentReport, analyze_content};
use crate::document::Document;
use crate::error::AnalysisError;
use crate::keywords::{KeywordUsageReport, analyze_keyword_usage};
use crate::structure::{
    HeadingsReport, ImagesReport, MetaDescriptionReport, TitleReport, analyze_headings,
    analyze_images, analyze_meta_description, analyze_title,
};

/// One independent audit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum AuditCheck {
    /// Title length.
    Title,
    /// Meta description length.
    MetaDescription,
    /// Heading structure.
    Headings,
    /// Image alt text.
    Images,
    /// Content readability.
    Content,
    /// Keyword usage.
    Keywords,
}

impl AuditCheck {
    /// Every check, in report order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::MetaDescription,
        Self::Headings,
        Self::Images,
        Self::Content,
        Self::Keywords,
    ];

    /// Kebab-case name, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::MetaDescription => "meta-description",
            Self::Headings => "headings",
            Self::Images => "images",
            Self::Content => "content",
            Self::Keywords => "keywords",
        }
    }
}

impl fmt::Display for AuditCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuditCheck {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| AnalysisError::UnknownCheck {
                name: s.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// What to audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditRequest {
    /// Checks to run; empty runs all of them.
    pub checks: Vec<AuditCheck>,
    /// Comma-separated keyword list for the keyword check.
    pub keywords: Option<String>,
    /// Limits for the content check.
    pub content: ContentOptions,
}

impl AuditRequest {
    /// The checks that will run, in report order.
    pub fn enabled_checks(&self) -> Vec<AuditCheck> {
        AuditCheck::ALL
            .into_iter()
            .filter(|c| self.checks.is_empty() || self.checks.contains(c))
            .collect()
    }
}

/// Outcome of the keyword check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeywordAudit {
    /// Keywords were analyzed.
    Analyzed(KeywordUsageReport),
    /// The keyword input was missing or blank.
    NoKeywords,
}

/// Results of every check that ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    /// URL path of the audited page.
    pub url_path: String,
    /// Language hint of the page.
    pub language: String,
    /// Checks that ran.
    pub checks: Vec<AuditCheck>,
    /// Title check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleReport>,
    /// Meta description check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<MetaDescriptionReport>,
    /// Heading structure check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headings: Option<HeadingsReport>,
    /// Image alt text check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImagesReport>,
    /// Content readability check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentReport>,
    /// Keyword usage check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordAudit>,
}

/// Run every enabled check over `document`.
#[tracing::instrument(skip_all, fields(checks = ?request.checks))]
pub fn run_audit<D: Document + ?Sized>(
    document: &D,
    request: &AuditRequest,
    advisor: &dyn Advisor,
) -> AuditReport {
    let checks = request.enabled_checks();
    let enabled = |check: AuditCheck| checks.contains(&check);

    let title = enabled(AuditCheck::Title).then(|| analyze_title(document));
    let meta_description =
        enabled(AuditCheck::MetaDescription).then(|| analyze_meta_description(document));
    let headings = enabled(AuditCheck::Headings).then(|| analyze_headings(document));
    let images = enabled(AuditCheck::Images).then(|| analyze_images(document));
    let content = enabled(AuditCheck::Content)
        .then(|| analyze_content(document, &request.content, advisor));

    let keywords = enabled(AuditCheck::Keywords).then(|| {
        let input = request.keywords.as_deref().unwrap_or_default();
        match analyze_keyword_usage(document, input) {
            Ok(report) => KeywordAudit::Analyzed(report),
            Err(e) => {
                tracing::info!(error = %e, "skipping keyword analysis");
                KeywordAudit::NoKeywords
            }
        }
    });

    AuditReport {
        url_path: document.url_path().to_string(),
        language: document.language_hint(),
        checks,
        title,
        meta_description,
        headings,
        images,
        content,
        keywords,
    }
}
