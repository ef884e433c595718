//! Defines [`GeneratedPage`], the value type for a virtual output page. The
//! generators only ever construct pages and append them to the build's page
//! list; once appended, a page is never mutated or removed.

use std::path::PathBuf;

/// The frontmatter of a generated page. These are plain fields rather than
/// a free-form map; the writer and the layout template know exactly which
/// keys exist.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatter {
    /// Human-readable page title.
    pub title: Option<String>,

    /// The tag whose posts the page lists. For alias pages this is already
    /// the canonical tag, so the page content matches the canonical page.
    pub tag: Option<String>,

    /// For alias pages, the real tag the page's content is sourced from.
    pub canonical_tag: Option<String>,

    /// The layout template to render the page with; `None` writes the
    /// content verbatim.
    pub layout: Option<String>,

    /// Whether the page belongs in the sitemap. Redirect pages opt out.
    pub sitemap: bool,
}

/// How a page's content comes to be.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// Rendered through the layout named in the frontmatter at write time.
    Layout,

    /// A complete document written to disk verbatim.
    Raw(String),
}

/// A virtual output page: where it goes and what it holds.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedPage {
    /// Directory relative to the output root.
    pub directory: PathBuf,

    /// File name within `directory`.
    pub filename: String,

    /// The page's frontmatter.
    pub data: FrontMatter,

    /// The page's content.
    pub content: Content,
}

impl GeneratedPage {
    /// The page's path relative to the output root.
    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}
