//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use owo_colors::OwoColorize;

use seo_lens_core::error::AnalysisError;
use seo_lens_core::html;
use seo_lens_core::report::{Section, Severity};
use seo_lens_core::{Config, PageDocument};

pub mod audit;
pub mod content;
pub mod info;
pub mod keywords;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file, rejecting it before reading when it exceeds `max_bytes`.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

/// Page source options shared by the analysis commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// HTML file to analyze.
    pub file: camino::Utf8PathBuf,

    /// URL the page is served at (only its path is used)
    #[arg(long)]
    pub url: Option<String>,

    /// Language hint, overriding the page's lang attribute (e.g. sv)
    #[arg(long)]
    pub lang: Option<String>,
}

/// Read and parse the page named by `args`.
///
/// `--lang` overrides the page's `lang` attribute; the configured language
/// only fills in when the page declares none.
pub fn load_page(args: &PageArgs, config: &Config) -> anyhow::Result<PageDocument> {
    let source = read_input_file(&args.file, config.input_limit())?;
    if source.trim().is_empty() {
        return Err(AnalysisError::EmptyInput).with_context(|| format!("{} is empty", args.file));
    }

    let mut page = html::parse_page(&source, args.url.as_deref());
    if let Some(lang) = &args.lang {
        page.language = Some(lang.clone());
    } else if page.language.is_none() {
        page.language.clone_from(&config.language);
    }
    Ok(page)
}

/// Print report sections in the terminal format.
pub fn print_sections(sections: &[Section]) {
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", section.title.bold().underline());
        for finding in &section.findings {
            println!("  {} {}", marker(finding.severity), finding.message);
        }
        if !section.recommendations.is_empty() {
            println!("  {}", "Recommendations:".bold());
            for recommendation in &section.recommendations {
                println!("    - {recommendation}");
            }
        }
    }
}

fn marker(severity: Severity) -> String {
    match severity {
        Severity::Success => "✓".green().to_string(),
        Severity::Warning => "!".yellow().to_string(),
        Severity::Error => "✗".red().to_string(),
        Severity::Info => "·".dimmed().to_string(),
    }
}
