//! Typed site description model.
//!
//! Walks the parsed DOM into [`SiteDescription`]. Entry and category
//! fields are attribute-encoded; the introduction is either marked
//! `auto="true"` (content lives in an external HTML fragment) or carries
//! inline `<p>` children. Status labels are validated here, so a bad
//! status fails at load time rather than mid-render.

use crate::dom::{Document, DomError, Element};

/// The full parsed input for one documentation site.
///
/// Built once from `main.xml` and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDescription {
    /// Language code for the `<html lang>` attribute
    pub language: String,

    /// Site name, used as page title and top-level heading
    pub site_name: String,

    /// Stylesheet base name, resolved against the stylesheet directory
    pub stylesheet_name: String,

    /// Introduction block, if the document declares one
    pub introduction: Option<Introduction>,

    /// Guide categories in document order; empty when the `<guides>`
    /// element is absent or has no categories
    pub categories: Vec<GuideCategory>,
}

/// How the introduction section gets its content.
#[derive(Debug, Clone, PartialEq)]
pub enum Introduction {
    /// `auto="true"`: content comes from `content/introduction.html`
    External,

    /// Inline `<p>` children, in document order; trusted raw HTML
    Inline(Vec<String>),
}

/// A named, identified grouping of guide entries.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideCategory {
    /// Display name
    pub name: String,

    /// Identifier, used as output directory and anchor name
    pub id: String,

    /// Entries in document order
    pub entries: Vec<GuideEntry>,
}

/// One documentation page's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideEntry {
    /// Display name
    pub name: String,

    /// Identifier, used as the linked page's file name
    pub id: String,

    /// Completion status
    pub status: Status,

    /// Free-form completeness figure, typically a percentage
    pub completeness: String,
}

/// Completion status of a guide entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Complete,
    Incomplete,
    WithErrors,
    NotStarted,
}

impl Status {
    /// Parse a status label. Any label outside the fixed set is an
    /// input error.
    pub fn parse(label: &str) -> Result<Self, SchemaError> {
        match label {
            "Complete" => Ok(Self::Complete),
            "Incomplete" => Ok(Self::Incomplete),
            "With errors" => Ok(Self::WithErrors),
            "Not started" => Ok(Self::NotStarted),
            other => Err(SchemaError::UnknownStatus(other.to_string())),
        }
    }

    /// Display glyph for this status.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Complete => "✔️",
            Self::Incomplete => "🛠️",
            Self::WithErrors => "⚠️",
            Self::NotStarted => "🚫",
        }
    }
}

/// Errors raised while walking the document into the typed model.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Malformed document: {0}")]
    Dom(#[from] DomError),

    #[error("Missing required element <{0}>")]
    MissingElement(String),

    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("Unknown guide status '{0}'")]
    UnknownStatus(String),
}

/// Parse a site description document.
pub fn parse_description(source: &str) -> Result<SiteDescription, SchemaError> {
    let document = Document::parse(source)?;

    let content = document
        .find("content")
        .ok_or_else(|| SchemaError::MissingElement("content".to_string()))?;

    let language = require_text(content, "language")?;
    let site_name = require_text(content, "site_name")?;
    let stylesheet_name = require_text(content, "stylesheet_name")?;

    let introduction = content
        .find("introduction")
        .map(parse_introduction)
        .transpose()?;

    let categories = match content.find("guides") {
        Some(guides) => guides
            .find_all("category")
            .into_iter()
            .map(parse_category)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(SiteDescription {
        language,
        site_name,
        stylesheet_name,
        introduction,
        categories,
    })
}

fn parse_introduction(element: &Element) -> Result<Introduction, SchemaError> {
    if element.attr("auto") == Some("true") {
        return Ok(Introduction::External);
    }

    let paragraphs = element
        .find_all("p")
        .into_iter()
        .map(|p| Ok(p.text()?.to_string()))
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(Introduction::Inline(paragraphs))
}

fn parse_category(element: &Element) -> Result<GuideCategory, SchemaError> {
    let entries = element
        .find_all("entry")
        .into_iter()
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GuideCategory {
        name: require_attr(element, "name")?,
        id: require_attr(element, "id")?,
        entries,
    })
}

fn parse_entry(element: &Element) -> Result<GuideEntry, SchemaError> {
    Ok(GuideEntry {
        name: require_attr(element, "name")?,
        id: require_attr(element, "id")?,
        status: Status::parse(&require_attr(element, "status")?)?,
        completeness: require_attr(element, "completeness")?,
    })
}

fn require_text(parent: &Element, tag: &str) -> Result<String, SchemaError> {
    let element = parent
        .find(tag)
        .ok_or_else(|| SchemaError::MissingElement(tag.to_string()))?;

    Ok(element.text()?.to_string())
}

fn require_attr(element: &Element, name: &str) -> Result<String, SchemaError> {
    element
        .attr(name)
        .map(str::to_string)
        .ok_or_else(|| SchemaError::MissingAttribute {
            element: element.name.clone(),
            attribute: name.to_string(),
        })
}
