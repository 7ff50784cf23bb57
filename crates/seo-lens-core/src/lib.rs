//! Core library for seo-lens.
//!
//! Heuristic on-page audits over a parsed web page: content readability,
//! keyword placement and overlap, and the structural checks (title, meta
//! description, headings, image alt text). Everything here is synchronous
//! and side-effect free apart from configuration discovery.
//!
//! # Modules
//!
//! - [`document`] - The read-only [`Document`] view analyzers work on
//! - [`html`] - Builds a [`PageDocument`] from an HTML string
//! - [`text`], [`syllables`], [`readability`] - Segmentation and scoring
//! - [`keywords`] - Keyword occurrence, placement and similarity
//! - [`content`] - Readability report with long passage detection
//! - [`structure`] - Title, meta description, heading and image checks
//! - [`audit`] - Runs any set of checks into one [`AuditReport`]
//! - [`report`] - Graded findings and recommendations for display
//! - [`advisor`] - Port for optional rewrite suggestions
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use seo_lens_core::{analyze_keyword_usage, html, report};
//!
//! let page = html::parse_page(
//!     "<html><head><title>Solar energy</title></head>\
//!      <body><h1>Solar energy</h1><p>Solar energy is cheap.</p></body></html>",
//!     Some("https://example.com/solar-energy"),
//! );
//! let usage = analyze_keyword_usage(&page, "solar energy").unwrap();
//! assert!(usage.keywords[0].in_url);
//!
//! for finding in report::keyword_section(&usage).findings {
//!     println!("{:?} {}", finding.severity, finding.message);
//! }
//! ```
#![deny(unsafe_code)]

pub mod advisor;
pub mod audit;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod html;
pub mod keywords;
pub mod readability;
pub mod report;
pub mod structure;
pub mod syllables;
pub mod text;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use advisor::{Advisor, NoopAdvisor, SuggestionConstraints, SuggestionKind};
pub use audit::{AuditCheck, AuditReport, AuditRequest, KeywordAudit, run_audit};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use content::{ContentOptions, ContentReport, analyze_content};
pub use document::{Document, HeadingLevel, Image, PageDocument};
pub use error::{AdvisorError, AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use keywords::{KeywordPlacement, KeywordUsageReport, analyze_keyword_usage, parse_keywords};
pub use readability::{ReadabilityMetrics, compute_metrics};
pub use report::{Finding, Section, Severity};
