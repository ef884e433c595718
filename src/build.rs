//! Exports the [`build_site`] function which stitches together the
//! high-level steps of the build: parsing the posts ([`crate::post`]),
//! running the generators ([`crate::tag_index`], [`crate::redirect`],
//! [`crate::slug_index`]), and rendering the generated pages to disk
//! ([`crate::write`]). The whole build is synchronous and one-shot; the
//! first error aborts it.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use gtmpl::Template;
use tracing::info;

use crate::config::Config;
use crate::page::GeneratedPage;
use crate::post::{self, Error as ParseError};
use crate::redirect;
use crate::site::Site;
use crate::slug_index::{self, Error as SlugIndexError};
use crate::tag_index;
use crate::write::{Error as WriteError, Writer};

/// Builds all generated output for the site: tag listing pages (with their
/// alias pages), trailing-hyphen redirect pages, and the slug index.
pub fn build_site(config: &Config, output_directory: &Path) -> Result<()> {
    let posts = post::scan_posts(&config.posts_source_directory)?;
    info!(posts = posts.len(), "parsed posts");

    let tag_template = parse_template(config.tag_template.iter())?;

    let site = Site::new(posts);

    // Generators append to the page list; no page is mutated or removed
    // after it lands here.
    let mut pages: Vec<GeneratedPage> = Vec::new();
    tag_index::generate(&site, &mut pages);
    redirect::generate(&site, &config.site_root, &mut pages)?;
    info!(pages = pages.len(), "generated pages");

    // Only `tag/` is regenerated wholesale. The rest of the output tree is
    // overlaid file by file, which is also what keeps `slugs.json` intact
    // between builds.
    std::fs::create_dir_all(output_directory)?;
    rmdir(&output_directory.join("tag"))?;

    slug_index::write_slug_index(&site.posts, output_directory)?;

    let writer = Writer {
        tag_template: &tag_template,
        output_directory,
    };
    writer.write_pages(&site, &pages)?;

    Ok(())
}

// Loads the template file contents, concatenates them, and parses the
// result into a template.
fn parse_template<P: AsRef<Path>>(template_files: impl Iterator<Item = P>) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(&template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the site's generated output.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during post parsing.
    Parse(ParseError),

    /// Returned for errors writing generated pages to disk.
    Write(WriteError),

    /// Returned for errors building or writing the slug index.
    SlugIndex(SlugIndexError),

    /// Returned when a canonical URL can't be joined onto the site root.
    Redirect(url::ParseError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::SlugIndex(err) => err.fmt(f),
            Error::Redirect(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::SlugIndex(err) => Some(err),
            Error::Redirect(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<SlugIndexError> for Error {
    /// Converts [`SlugIndexError`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: SlugIndexError) -> Error {
        Error::SlugIndex(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts [`url::ParseError`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: url::ParseError) -> Error {
        Error::Redirect(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(root: &Path) -> std::io::Result<()> {
        std::fs::write(
            root.join("tattle.yaml"),
            "site_root: https://example.org/\n",
        )?;
        std::fs::create_dir(root.join("theme"))?;
        std::fs::write(root.join("theme/theme.yaml"), "tag_template: [tag.html]\n")?;
        std::fs::write(
            root.join("theme/tag.html"),
            "{{.title}}:{{range .posts}}[{{.title}}]{{end}}",
        )?;
        std::fs::create_dir(root.join("_posts"))
    }

    fn write_post(root: &Path, file_name: &str, title: &str, tag: &str) -> std::io::Result<()> {
        std::fs::write(
            root.join("_posts").join(file_name),
            format!("---\ntitle: {}\ntags: [{}]\n---\nBody.\n", title, tag),
        )
    }

    #[test]
    fn test_rebuild_replaces_tag_pages_and_keeps_other_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path();
        write_project(root)?;
        write_post(root, "2024-03-15-hello-world.md", "Hello World", "gossip")?;
        let config = Config::from_project_file(&root.join("tattle.yaml")).unwrap();
        let out = root.join("_site");

        build_site(&config, &out)?;
        let gossip = std::fs::read_to_string(out.join("tag/gossip/index.html"))?;
        assert_eq!(gossip.trim_end(), "Posts tagged 'gossip':[Hello World]");
        assert!(out.join("slugs.json").exists());
        assert!(out.join("2024/03/15/hello-world-/index.html").exists());

        // Retag the site: the old post goes away, a new one arrives.
        std::fs::remove_file(root.join("_posts/2024-03-15-hello-world.md"))?;
        write_post(root, "2024-04-01-fresh-scoop.md", "Fresh Scoop", "news")?;
        build_site(&config, &out)?;

        // `tag/` is rebuilt from scratch; everything written elsewhere in
        // the output tree survives the rebuild.
        assert!(out.join("tag/news/index.html").exists());
        assert!(!out.join("tag/gossip").exists());
        assert!(out.join("slugs.json").exists());
        assert!(out.join("2024/03/15/hello-world-/index.html").exists());
        assert!(out.join("2024/04/01/fresh-scoop-/index.html").exists());
        Ok(())
    }
}
