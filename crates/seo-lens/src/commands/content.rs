//! Content command: readability scores and long passage detection.

use clap::Args;
use tracing::{debug, instrument};

use seo_lens_core::report::content_section;
use seo_lens_core::{Config, ContentOptions, NoopAdvisor, analyze_content};

use super::{PageArgs, load_page, print_sections};

/// Arguments for the `content` subcommand.
#[derive(Args, Debug)]
pub struct ContentArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Flag paragraphs longer than this many words
    #[arg(long, value_name = "WORDS")]
    pub max_paragraph_words: Option<usize>,

    /// Flag sentences longer than this many words
    #[arg(long, value_name = "WORDS")]
    pub max_sentence_words: Option<usize>,
}

impl ContentArgs {
    fn options(&self, config: &Config) -> ContentOptions {
        let configured = config.content_options();
        ContentOptions {
            long_paragraph_words: self
                .max_paragraph_words
                .unwrap_or(configured.long_paragraph_words),
            long_sentence_words: self
                .max_sentence_words
                .unwrap_or(configured.long_sentence_words),
        }
    }
}

/// Analyze the readability of a page's paragraph content.
#[instrument(name = "cmd_content", skip_all, fields(file = %args.page.file))]
pub fn cmd_content(args: ContentArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let options = args.options(config);
    debug!(?options, "executing content command");

    let page = load_page(&args.page, config)?;
    let report = analyze_content(&page, &options, &NoopAdvisor);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_sections(&[content_section(&report)]);
    }
    Ok(())
}
