//! Responsible for rendering [`GeneratedPage`]s to disk. Layout pages go
//! through the tag template with a value object carrying the frontmatter
//! and the tag's post summaries; raw pages are written verbatim.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use gtmpl::Template;
use gtmpl_value::Value;
use tracing::debug;

use crate::page::{Content, FrontMatter, GeneratedPage};
use crate::post::Post;
use crate::site::Site;

/// Renders and writes generated pages under an output directory.
pub struct Writer<'a> {
    /// The template for tag listing pages.
    pub tag_template: &'a Template,

    /// The root of the site's output tree. Page directories are joined
    /// onto this.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// Writes every page, creating directories on first use. The page list
    /// is consumed read-only; the site snapshot supplies the post lists
    /// that layout pages render.
    pub fn write_pages(&self, site: &Site, pages: &[GeneratedPage]) -> Result<()> {
        let mut seen_dirs: HashSet<PathBuf> = HashSet::new();
        for page in pages {
            let dir = self.output_directory.join(&page.directory);
            if seen_dirs.insert(dir.clone()) {
                std::fs::create_dir_all(&dir)?;
            }
            debug!(path = %page.output_path().display(), "writing page");
            self.write_page(site, page, &dir.join(&page.filename))?;
        }
        Ok(())
    }

    fn write_page(&self, site: &Site, page: &GeneratedPage, path: &Path) -> Result<()> {
        match &page.content {
            Content::Raw(document) => {
                std::fs::write(path, document)?;
            }
            Content::Layout => {
                let context = gtmpl::Context::from(page_value(site, &page.data))
                    .map_err(Error::Template)?;
                self.tag_template
                    .execute(&mut std::fs::File::create(path)?, &context)?;
            }
        }
        Ok(())
    }
}

/// Converts a layout page's frontmatter into a template [`Value`]: the
/// frontmatter fields plus the summaries of the posts carrying the page's
/// tag. Alias pages carry the canonical tag in `tag`, so their post list
/// matches the canonical page's.
fn page_value(site: &Site, data: &FrontMatter) -> Value {
    let tag = data.tag.as_deref().unwrap_or_default();
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert(
        "title".to_owned(),
        Value::String(data.title.clone().unwrap_or_default()),
    );
    m.insert("tag".to_owned(), Value::String(tag.to_owned()));
    m.insert(
        "canonical_tag".to_owned(),
        match &data.canonical_tag {
            Some(canonical) => Value::String(canonical.clone()),
            None => Value::Nil,
        },
    );
    m.insert(
        "posts".to_owned(),
        Value::Array(site.tagged_posts(tag).map(summary_value).collect()),
    );
    Value::Object(m)
}

/// Converts a [`Post`] into the summary [`Value`] the tag template renders
/// one list entry from.
fn summary_value(post: &Post) -> Value {
    let (summary, summarized) = post.summary();
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("url".to_owned(), Value::String(post.url.clone()));
    m.insert("title".to_owned(), Value::String(post.title.clone()));
    m.insert(
        "date".to_owned(),
        Value::String(post.date.format("%Y-%m-%d").to_string()),
    );
    m.insert("summary".to_owned(), Value::String(summary.to_owned()));
    m.insert("summarized".to_owned(), Value::Bool(summarized));
    Value::Object(m)
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(url: &str, title: &str, tags: &[&str]) -> Post {
        Post {
            url: url.to_owned(),
            title: title.to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            tags: tags.iter().map(|&t| t.to_owned()).collect(),
            body: String::new(),
        }
    }

    fn tag_template() -> Template {
        let mut template = Template::default();
        template
            .parse("{{.title}}:{{range .posts}}[{{.title}}]{{end}}")
            .unwrap();
        template
    }

    #[test]
    fn test_write_layout_page() -> Result<()> {
        let site = Site::new(vec![
            post("/2024/06/01/newer/", "Newer", &["gossip"]),
            post("/2024/01/01/older/", "Older", &["gossip"]),
        ]);
        let mut pages = Vec::new();
        crate::tag_index::generate(&site, &mut pages);

        let dir = tempfile::tempdir()?;
        let template = tag_template();
        let writer = Writer {
            tag_template: &template,
            output_directory: dir.path(),
        };
        writer.write_pages(&site, &pages)?;

        let rendered = std::fs::read_to_string(dir.path().join("tag/gossip/index.html"))?;
        assert_eq!(rendered, "Posts tagged 'gossip':[Newer][Older]");
        Ok(())
    }

    #[test]
    fn test_alias_page_renders_canonical_posts() -> Result<()> {
        let site = Site::new(vec![post("/2024/01/01/p/", "Dive", &["deep_dive"])]);
        let mut pages = Vec::new();
        crate::tag_index::generate(&site, &mut pages);

        let dir = tempfile::tempdir()?;
        let template = tag_template();
        let writer = Writer {
            tag_template: &template,
            output_directory: dir.path(),
        };
        writer.write_pages(&site, &pages)?;

        let canonical = std::fs::read_to_string(dir.path().join("tag/deep_dive/index.html"))?;
        let alias = std::fs::read_to_string(dir.path().join("tag/deep-dive/index.html"))?;
        assert_eq!(canonical, alias);
        assert!(alias.contains("[Dive]"));
        Ok(())
    }

    #[test]
    fn test_write_raw_page() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let template = tag_template();
        let writer = Writer {
            tag_template: &template,
            output_directory: dir.path(),
        };
        let page = GeneratedPage {
            directory: PathBuf::from("2024/03/15/hello-world-"),
            filename: "index.html".to_owned(),
            data: FrontMatter::default(),
            content: Content::Raw("<!DOCTYPE html>".to_owned()),
        };
        writer.write_pages(&Site::new(Vec::new()), &[page])?;

        let written =
            std::fs::read_to_string(dir.path().join("2024/03/15/hello-world-/index.html"))?;
        assert_eq!(written, "<!DOCTYPE html>");
        Ok(())
    }
}
