//! Read-only access to a parsed page.
//!
//! Analyzers depend only on the [`Document`] trait. [`PageDocument`] is the
//! owned implementation produced by the HTML adapter ([`crate::html`]) and
//! built by hand in tests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Language hint used when a page declares no `lang` attribute.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Heading levels `<h1>` through `<h6>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
}

impl HeadingLevel {
    /// All levels, outermost first.
    pub const ALL: [Self; 6] = [Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];

    /// Numeric rank, 1 for `<h1>`.
    pub const fn rank(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    /// Parse an element name such as `"h2"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }

    /// Lowercase tag name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// A heading element in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Heading {
    /// Heading level.
    pub level: HeadingLevel,
    /// Text content.
    pub text: String,
}

/// An `<img>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    /// The `src` attribute (empty when absent).
    pub src: String,
    /// The `alt` attribute. `Some("")` marks a decorative image.
    pub alt: Option<String>,
    /// The `aria-label` attribute.
    pub aria_label: Option<String>,
    /// The `title` attribute.
    pub title: Option<String>,
}

impl Image {
    /// Accessible name, falling back from `alt` to `aria-label` to `title`.
    ///
    /// An explicitly empty `alt` wins: it marks the image as decorative.
    pub fn accessible_name(&self) -> Option<&str> {
        if let Some(alt) = self.alt.as_deref() {
            return Some(alt.trim());
        }
        self.aria_label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    }

    /// Whether the image is marked decorative with `alt=""`.
    pub fn is_decorative(&self) -> bool {
        self.alt.as_deref().is_some_and(|alt| alt.trim().is_empty())
    }
}

/// Read-only view of a parsed page.
pub trait Document {
    /// Visible text of the whole body.
    fn body_text(&self) -> &str;

    /// `<title>` text, if present and non-empty.
    fn title(&self) -> Option<&str>;

    /// Meta description, if present and non-empty.
    fn meta_description(&self) -> Option<&str>;

    /// Path component of the page URL (`/` when unknown).
    fn url_path(&self) -> &str;

    /// Every heading in document order.
    fn all_headings(&self) -> &[Heading];

    /// Paragraph texts in document order.
    fn paragraphs(&self) -> &[String];

    /// Images in document order.
    fn images(&self) -> &[Image];

    /// Raw `lang` attribute of the root element.
    fn language(&self) -> Option<&str>;

    /// Heading texts at one level, in document order.
    fn headings(&self, level: HeadingLevel) -> Vec<&str> {
        self.all_headings()
            .iter()
            .filter(|h| h.level == level)
            .map(|h| h.text.as_str())
            .collect()
    }

    /// Language hint for readability rules, derived from [`Document::language`].
    fn language_hint(&self) -> String {
        language_hint(self.language())
    }
}

/// Derive a language hint from a `lang` attribute.
///
/// Lowercases and keeps everything before the first `-`; `"sv-SE"` becomes
/// `"sv"`. Missing or blank attributes yield [`DEFAULT_LANGUAGE`].
pub fn language_hint(lang: Option<&str>) -> String {
    lang.map(str::trim)
        .and_then(|l| l.split('-').next())
        .map(str::to_lowercase)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// An owned, fully materialized page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageDocument {
    /// Page title.
    pub title: Option<String>,
    /// Meta description.
    pub meta_description: Option<String>,
    /// URL path.
    pub url_path: String,
    /// Raw `lang` attribute.
    pub language: Option<String>,
    /// Visible body text.
    pub body_text: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// Paragraph texts.
    pub paragraphs: Vec<String>,
    /// Images.
    pub images: Vec<Image>,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self {
            title: None,
            meta_description: None,
            url_path: "/".to_string(),
            language: None,
            body_text: String::new(),
            headings: Vec::new(),
            paragraphs: Vec::new(),
            images: Vec::new(),
        }
    }
}

impl PageDocument {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the meta description.
    pub fn with_meta_description<S: Into<String>>(mut self, description: S) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    /// Set the URL path.
    pub fn with_url_path<S: Into<String>>(mut self, path: S) -> Self {
        self.url_path = path.into();
        self
    }

    /// Set the `lang` attribute.
    pub fn with_language<S: Into<String>>(mut self, lang: S) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Set the body text explicitly.
    pub fn with_body_text<S: Into<String>>(mut self, body: S) -> Self {
        self.body_text = body.into();
        self
    }

    /// Append a heading.
    pub fn with_heading<S: Into<String>>(mut self, level: HeadingLevel, text: S) -> Self {
        self.headings.push(Heading {
            level,
            text: text.into(),
        });
        self
    }

    /// Append a paragraph.
    pub fn with_paragraph<S: Into<String>>(mut self, text: S) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    /// Append an image.
    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    /// Rebuild the body text from headings and paragraphs.
    ///
    /// Handy for hand-built pages whose body is exactly their blocks.
    pub fn with_body_from_blocks(mut self) -> Self {
        let blocks: Vec<&str> = self
            .headings
            .iter()
            .map(|h| h.text.as_str())
            .chain(self.paragraphs.iter().map(String::as_str))
            .collect();
        self.body_text = blocks.join(" ");
        self
    }
}

impl Document for PageDocument {
    fn body_text(&self) -> &str {
        &self.body_text
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn meta_description(&self) -> Option<&str> {
        self.meta_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    fn url_path(&self) -> &str {
        &self.url_path
    }

    fn all_headings(&self) -> &[Heading] {
        &self.headings
    }

    fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    fn images(&self) -> &[Image] {
        &self.images
    }

    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
