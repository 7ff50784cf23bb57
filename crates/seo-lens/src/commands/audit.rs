//! Audit command: every check over one page.

use std::io::IsTerminal;
use std::time::Duration;

use clap::Args;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use seo_lens_core::report::{Severity, audit_sections};
use seo_lens_core::{AuditCheck, AuditRequest, Config, NoopAdvisor, run_audit};

use super::{PageArgs, load_page, print_sections};

/// Arguments for the `audit` subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Comma-separated keywords (falls back to the configured list)
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Only run these checks (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub checks: Vec<AuditCheck>,
}

/// Audit a page and print one section per check.
#[instrument(name = "cmd_audit", skip_all, fields(file = %args.page.file))]
pub fn cmd_audit(args: AuditArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let request = AuditRequest {
        checks: args.checks,
        keywords: args.keywords.or_else(|| config.keywords.clone()),
        content: config.content_options(),
    };
    debug!(checks = ?request.enabled_checks(), "executing audit command");

    let spinner = (!global_json && std::io::stderr().is_terminal()).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Auditing {}", args.page.file));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let page = load_page(&args.page, config);
    let report = page.map(|page| run_audit(&page, &request, &NoopAdvisor));

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = report?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "Audit of".bold(), report.url_path.cyan());
    println!();
    let sections = audit_sections(&report);
    print_sections(&sections);

    let errors: usize = sections.iter().map(|s| s.count(Severity::Error)).sum();
    let warnings: usize = sections.iter().map(|s| s.count(Severity::Warning)).sum();
    println!();
    if errors == 0 && warnings == 0 {
        println!("{}", "No issues found".green());
    } else {
        println!(
            "{} error(s), {} warning(s)",
            errors.to_string().red(),
            warnings.to_string().yellow()
        );
    }
    Ok(())
}
