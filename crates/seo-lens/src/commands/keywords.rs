//! Keywords command: density, placement and overlap.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use seo_lens_core::error::AnalysisError;
use seo_lens_core::report::keyword_section;
use seo_lens_core::{Config, analyze_keyword_usage};

use super::{PageArgs, load_page, print_sections};

/// Arguments for the `keywords` subcommand.
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Comma-separated keywords (falls back to the configured list)
    #[arg(short, long)]
    pub keywords: Option<String>,
}

/// Analyze keyword usage on a page.
///
/// An empty keyword list is reported and is not an error.
#[instrument(name = "cmd_keywords", skip_all, fields(file = %args.page.file))]
pub fn cmd_keywords(args: KeywordsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let input = args
        .keywords
        .as_deref()
        .or(config.keywords.as_deref())
        .unwrap_or_default();
    debug!(keywords = input, "executing keywords command");

    let page = load_page(&args.page, config)?;

    match analyze_keyword_usage(&page, input) {
        Ok(report) if global_json => println!("{}", serde_json::to_string_pretty(&report)?),
        Ok(report) => print_sections(&[keyword_section(&report)]),
        Err(AnalysisError::NoKeywords) if global_json => {
            println!(
                "{}",
                serde_json::json!({ "keywords": [], "message": "no keywords provided" })
            );
        }
        Err(AnalysisError::NoKeywords) => {
            println!("{}", "no keywords provided".yellow());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
