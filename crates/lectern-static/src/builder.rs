//! Index page builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use lectern_xml::{parse_description, GuideEntry, Introduction, SchemaError, SiteDescription, Status};

use crate::assets::copy_stylesheet;
use crate::markup::Markup;

const NO_CATEGORIES: &str = "There are no guide categories!";
const NO_ENTRIES: &str = "There are no guide entries!";
const NO_INTRODUCTION: &str = "No introduction text found!";

const LEGEND: [&str; 4] = [
    "✔️ — Guide complete",
    "🛠️ — Guide incomplete",
    "⚠️ — Guide contains errors",
    "🚫 — Guide not started yet",
];

/// Configuration for building an index page.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source directory holding `main.xml` and `content/`
    pub source_dir: PathBuf,

    /// Output directory
    pub target_dir: PathBuf,

    /// Directory holding named stylesheets, relative to the invocation
    /// directory unless overridden
    pub stylesheet_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            target_dir: PathBuf::from("site"),
            stylesheet_dir: PathBuf::from("stylesheets"),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of guide categories rendered
    pub categories: usize,

    /// Number of guide entries rendered
    pub entries: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Path of the written index page
    pub output_path: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read site description: {0}")]
    ReadError(String),

    #[error("Malformed site description: {0}")]
    Schema(#[from] SchemaError),

    #[error("Missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Builds the index page and its supporting assets in one pass.
pub struct IndexBuilder {
    config: BuildConfig,
}

impl IndexBuilder {
    /// Create a new index builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the index page.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let site = self.load_description()?;

        let htmldata_dir = self.config.target_dir.join(".htmldata");
        fs::create_dir_all(&htmldata_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        copy_stylesheet(&self.config.stylesheet_dir, &site.stylesheet_name, &htmldata_dir)?;

        let fragment = if matches!(site.introduction, Some(Introduction::External)) {
            self.load_introduction()
        } else {
            None
        };

        let page = render_page(&site, fragment.as_deref());

        let output_path = self.config.target_dir.join("index.html");
        fs::write(&output_path, page.render())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::info!("Wrote {}", output_path.display());

        Ok(BuildResult {
            categories: site.categories.len(),
            entries: site.categories.iter().map(|c| c.entries.len()).sum(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_path,
        })
    }

    fn load_description(&self) -> Result<SiteDescription, BuildError> {
        let path = self.config.source_dir.join("main.xml");
        let source = fs::read_to_string(&path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

        Ok(parse_description(&source)?)
    }

    /// A missing or empty fragment is not an error; the page renders a
    /// placeholder message instead.
    fn load_introduction(&self) -> Option<String> {
        let path = self.config.source_dir.join("content").join("introduction.html");

        match fs::read_to_string(&path) {
            Ok(data) if !data.is_empty() => Some(data),
            Ok(_) => None,
            Err(_) => {
                tracing::warn!("Introduction fragment not found: {}", path.display());
                None
            }
        }
    }
}

/// Render the index page for a site description. Pure: all file content
/// (the external introduction fragment included) is resolved by the
/// caller.
fn render_page(site: &SiteDescription, fragment: Option<&str>) -> Markup {
    let mut doc = Markup::new();

    doc.element("html", &[("lang", &site.language)], |html| {
        html.element("head", &[], |head| {
            head.element("title", &[], |title| title.text(&site.site_name));
            head.void("meta", &[("charset", "UTF-8")]);
            head.void(
                "meta",
                &[
                    ("name", "viewport"),
                    ("content", "height=device-width, initial-scale=0.9"),
                ],
            );
            head.void("link", &[("rel", "stylesheet"), ("href", ".htmldata/style.css")]);
        });

        html.element("body", &[], |body| {
            body.element("header", &[], |header| {
                header.element("h1", &[], |h| h.text(&site.site_name));
            });

            render_introduction(body, site, fragment);
            render_legend(body);
            render_guides(body, site);
        });
    });

    doc
}

fn render_introduction(body: &mut Markup, site: &SiteDescription, fragment: Option<&str>) {
    let Some(introduction) = &site.introduction else {
        return;
    };

    body.element("section", &[("id", "introduction")], |section| {
        section.element("h2", &[], |h| h.text("Introduction"));

        match introduction {
            Introduction::External => match fragment {
                Some(data) => section.raw(data),
                None => section.text(NO_INTRODUCTION),
            },
            Introduction::Inline(paragraphs) if !paragraphs.is_empty() => {
                for paragraph in paragraphs {
                    section.element("p", &[], |p| p.raw(paragraph));
                }
            }
            Introduction::Inline(_) => section.text(NO_INTRODUCTION),
        }
    });
}

fn render_legend(body: &mut Markup) {
    body.element("section", &[("id", "legend")], |section| {
        section.element("h2", &[], |h| h.text("Legend"));
        section.element("ul", &[], |list| {
            for line in LEGEND {
                list.element("li", &[], |item| item.text(line));
            }
        });
    });
}

fn render_guides(body: &mut Markup, site: &SiteDescription) {
    body.element("main", &[("id", "guides")], |main| {
        main.element("h2", &[], |h| h.text("Guides"));

        if site.categories.is_empty() {
            main.element("p", &[], |p| p.text(NO_CATEGORIES));
            return;
        }

        for category in &site.categories {
            main.element("div", &[("id", &category.id)], |block| {
                block.element("h3", &[], |h| h.text(&category.name));

                if category.entries.is_empty() {
                    block.element("p", &[], |p| p.text(NO_ENTRIES));
                    return;
                }

                block.element("table", &[], |table| {
                    for entry in &category.entries {
                        table.element("tr", &[], |row| {
                            row.element("td", &[], |cell| cell.text(entry.status.icon()));
                            row.element("td", &[], |cell| cell.text(&entry.completeness));
                            row.element("td", &[], |cell| {
                                let href = entry_href(&category.id, entry);
                                cell.element("a", &[("href", &href)], |link| {
                                    link.text(&entry.name);
                                });
                            });
                        });
                    }
                });
            });
        }
    });
}

/// Link target for an entry. Unstarted and zero-percent guides have no
/// page to link to, so the href collapses to a placeholder.
fn entry_href(category_id: &str, entry: &GuideEntry) -> String {
    if entry.status == Status::NotStarted || entry.completeness == "0%" {
        "#".to_string()
    } else {
        format!(".htmldata/pages/{}/{}.html", category_id, entry.id)
    }
}
