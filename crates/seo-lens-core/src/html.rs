//! HTML adapter.
//!
//! Parses an HTML string with `scraper` and materializes the parts the
//! analyzers read into a [`PageDocument`]. Text is whitespace-collapsed;
//! `<script>`, `<style>`, `<noscript>` and `<template>` content never counts
//! as visible text.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::document::{Heading, HeadingLevel, Image, PageDocument};

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("head > title").expect("valid selector"));
static META: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("valid selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));
static HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector"));
static PARAGRAPHS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static IMAGES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid selector"));

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements whose boundaries separate words; inline elements join their text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Parse `html` into a [`PageDocument`].
///
/// `url` only supplies the URL path. Anything [`url::Url`] cannot parse is
/// used as the path verbatim; `None` yields `/`.
#[tracing::instrument(skip(html), fields(html_len = html.len()))]
pub fn parse_page(html: &str, url: Option<&str>) -> PageDocument {
    let dom = Html::parse_document(html);

    let title = dom
        .select(&TITLE)
        .next()
        .map(visible_text)
        .filter(|t| !t.is_empty());

    let body = dom.select(&BODY).next().unwrap_or_else(|| dom.root_element());

    let headings: Vec<Heading> = body
        .select(&HEADINGS)
        .filter_map(|el| {
            HeadingLevel::from_tag(el.value().name()).map(|level| Heading {
                level,
                text: visible_text(el),
            })
        })
        .collect();

    let paragraphs: Vec<String> = body.select(&PARAGRAPHS).map(visible_text).collect();

    let images: Vec<Image> = body.select(&IMAGES).map(image).collect();

    let page = PageDocument {
        title,
        meta_description: meta_description(&dom),
        url_path: url.map_or_else(|| "/".to_string(), url_path),
        language: dom
            .root_element()
            .value()
            .attr("lang")
            .map(str::to_string),
        body_text: visible_text(body),
        headings,
        paragraphs,
        images,
    };

    tracing::debug!(
        headings = page.headings.len(),
        paragraphs = page.paragraphs.len(),
        images = page.images.len(),
        "page parsed"
    );
    page
}

/// `name="description"`, falling back to `property="og:description"`.
fn meta_description(dom: &Html) -> Option<String> {
    meta_content(dom, "name", "description")
        .or_else(|| meta_content(dom, "property", "og:description"))
}

fn meta_content(dom: &Html, attr: &str, value: &str) -> Option<String> {
    dom.select(&META)
        .filter(|el| {
            el.value()
                .attr(attr)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
        })
        .filter_map(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .find(|content| !content.is_empty())
}

fn url_path(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(parsed) => parsed.path().to_string(),
        Err(e) => {
            tracing::debug!(url = raw, error = %e, "using url as a bare path");
            raw.to_string()
        }
    }
}

fn image(el: ElementRef<'_>) -> Image {
    let attr = |name: &str| el.value().attr(name).map(str::to_string);
    Image {
        src: attr("src").unwrap_or_default(),
        alt: attr("alt"),
        aria_label: attr("aria-label"),
        title: attr("title"),
    }
}

/// Whitespace-collapsed text of `el`, skipping hidden elements.
///
/// Text nodes are concatenated as-is, like `textContent`; only block element
/// boundaries add a space.
fn visible_text(el: ElementRef<'_>) -> String {
    let mut buf = String::new();
    push_visible_text(el, &mut buf);
    collapse_whitespace(&buf)
}

fn push_visible_text(el: ElementRef<'_>, buf: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(element) if !HIDDEN_ELEMENTS.contains(&element.name()) => {
                let block = BLOCK_ELEMENTS.contains(&element.name());
                if block {
                    buf.push(' ');
                }
                if let Some(child) = ElementRef::wrap(child) {
                    push_visible_text(child, buf);
                }
                if block {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="sv-SE">
<head>
  <title>  Solar Energy
     Guide </title>
  <meta name="description" content="Everything about solar energy.">
  <style>body { color: red; }</style>
</head>
<body>
  <h1>Solar energy</h1>
  <p>Solar <b>energy</b> is growing.</p>
  <script>var energy = "not visible";</script>
  <h2>Why it matters</h2>
  <p>It is cheap.</p>
  <img src="panel.jpg" alt="Solar panel">
  <img src="spacer.gif" alt="">
  <img src="chart.png">
  <noscript><p>Enable scripts</p></noscript>
</body>
</html>"#;

    #[test]
    fn extracts_structure() {
        let page = parse_page(PAGE, Some("https://example.com/guides/solar-energy?x=1"));

        assert_eq!(page.title(), Some("Solar Energy Guide"));
        assert_eq!(page.meta_description(), Some("Everything about solar energy."));
        assert_eq!(page.url_path(), "/guides/solar-energy");
        assert_eq!(page.language(), Some("sv-SE"));
        assert_eq!(page.language_hint(), "sv");

        assert_eq!(page.headings(HeadingLevel::H1), vec!["Solar energy"]);
        assert_eq!(page.headings(HeadingLevel::H2), vec!["Why it matters"]);
        assert_eq!(page.images().len(), 3);
        assert_eq!(page.images()[1].alt.as_deref(), Some(""));
        assert!(page.images()[2].alt.is_none());
    }

    #[test]
    fn paragraphs_in_order_with_inline_markup() {
        let page = parse_page(PAGE, None);
        assert_eq!(page.paragraphs()[0], "Solar energy is growing.");
        assert_eq!(page.paragraphs()[1], "It is cheap.");
    }

    #[test]
    fn inline_markup_keeps_punctuation_attached() {
        let html = r#"<p>Read about <a href="/x">solar energy</a>. It is <b>cheap</b>, clean.</p>"#;
        let page = parse_page(html, None);
        assert_eq!(page.paragraphs()[0], "Read about solar energy. It is cheap, clean.");
        assert_eq!(
            crate::readability::compute_metrics(&page.paragraphs()[0]).word_count,
            8
        );
    }

    #[test]
    fn inline_markup_inside_a_word_does_not_split_it() {
        let page = parse_page("<p>Sol<em>ar</em> power</p>", None);
        assert_eq!(page.paragraphs()[0], "Solar power");
    }

    #[test]
    fn block_boundaries_separate_words() {
        let html = "<body><div>First</div><div>Second<br>Third</div><ul><li>a</li><li>b</li></ul></body>";
        let page = parse_page(html, None);
        assert_eq!(page.body_text(), "First Second Third a b");
    }

    #[test]
    fn title_inside_inline_svg_is_ignored() {
        let html = r#"<html><head><title>Page title</title></head>
            <body><svg><title>Icon</title></svg><p>Text</p></body></html>"#;
        assert_eq!(parse_page(html, None).title(), Some("Page title"));

        let html = r#"<html><head></head>
            <body><svg><title>Icon</title></svg><p>Text</p></body></html>"#;
        assert!(parse_page(html, None).title().is_none());
    }

    #[test]
    fn body_text_skips_hidden_elements() {
        let page = parse_page(PAGE, None);
        let body = page.body_text();
        assert!(body.contains("Solar energy is growing."));
        assert!(!body.contains("not visible"));
        assert!(!body.contains("Enable scripts"));
        assert!(!body.contains("color: red"));
    }

    #[test]
    fn og_description_fallback() {
        let html = r#"<html><head>
            <meta property="og:description" content="From Open Graph">
            </head><body></body></html>"#;
        let page = parse_page(html, None);
        assert_eq!(page.meta_description(), Some("From Open Graph"));
    }

    #[test]
    fn name_description_wins_over_og() {
        let html = r#"<html><head>
            <meta property="og:description" content="From Open Graph">
            <meta name="Description" content="From meta name">
            </head><body></body></html>"#;
        let page = parse_page(html, None);
        assert_eq!(page.meta_description(), Some("From meta name"));
    }

    #[test]
    fn url_handling() {
        assert_eq!(parse_page("", None).url_path(), "/");
        assert_eq!(parse_page("", Some("/blog/post")).url_path(), "/blog/post");
        assert_eq!(parse_page("", Some("https://example.com")).url_path(), "/");
    }

    #[test]
    fn empty_document_is_valid() {
        let page = parse_page("", None);
        assert!(page.title().is_none());
        assert!(page.meta_description().is_none());
        assert!(page.paragraphs().is_empty());
        assert!(page.all_headings().is_empty());
        assert!(page.body_text().is_empty());
        assert_eq!(page.language_hint(), "en");
    }
}
