//! Defines the [`Post`] type and the logic for parsing posts from the file
//! system into memory. A post is a markdown file named `YYYY-MM-DD-slug.md`
//! whose YAML frontmatter carries the title and an optional tag list; the
//! date and slug come from the file name (and from them, the canonical URL).

use std::{fmt, fs::read_to_string, path::Path};

use chrono::NaiveDate;
use pulldown_cmark::{html, Parser};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::permalink::Permalink;

const MARKDOWN_EXTENSION: &str = ".md";

/// The frontmatter fields a post source file may carry between its `---`
/// fences. Everything else about a post derives from the file name.
#[derive(Deserialize)]
struct FrontMatter {
    title: String,

    #[serde(default)]
    tags: Vec<String>,
}

/// A parsed blog post. The generators only ever read posts; nothing mutates
/// one after parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The canonical site-absolute URL, e.g. `/2024/03/15/hello-world/`.
    pub url: String,

    /// The post title from the frontmatter.
    pub title: String,

    /// The publication date from the file name.
    pub date: NaiveDate,

    /// The post's tags, verbatim from the frontmatter. May be empty.
    pub tags: Vec<String>,

    /// The post body rendered from markdown to HTML.
    pub body: String,
}

impl Post {
    /// Parses a post from a source file name and its contents.
    pub fn from_str(file_name: &str, input: &str) -> Result<Post> {
        let stem = file_name.trim_end_matches(MARKDOWN_EXTENSION);
        let permalink = Permalink::from_post_file_name(stem)
            .ok_or_else(|| Error::InvalidFileName(file_name.to_owned()))?;

        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: FrontMatter = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;

        let mut body = String::new();
        html::push_html(&mut body, Parser::new(&input[body_start..]));

        Ok(Post {
            url: permalink.canonical(),
            title: frontmatter.title,
            date: permalink.date(),
            tags: frontmatter.tags,
            body,
        })
    }

    /// Returns the post body up to the fold marker, if any, along with
    /// whether the body was actually cut short.
    pub fn summary(&self) -> (&str, bool) {
        const FOLD_TAG: &str = "<!-- more -->";
        match self.body.find(FOLD_TAG) {
            Some(i) => (&self.body[..i], true),
            None => (&self.body, false),
        }
    }
}

fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Err(Error::FrontmatterMissingStartFence);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::FrontmatterMissingEndFence),
        Some(offset) => Ok((
            FENCE.len(),                        // yaml_start
            FENCE.len() + offset,               // yaml_stop
            FENCE.len() + offset + FENCE.len(), // body_start
        )),
    }
}

/// Walks `dir` and returns the posts it contains, newest first.
pub fn scan_posts(dir: &Path) -> Result<Vec<Post>> {
    let mut posts: Vec<Post> = Vec::new();

    for result in WalkDir::new(dir) {
        let entry = result?;
        if !entry.file_type().is_file() {
            continue;
        }
        let os_file_name = entry.file_name();
        let file_name = os_file_name.to_string_lossy();
        if !file_name.ends_with(MARKDOWN_EXTENSION) {
            continue;
        }
        let contents = read_to_string(entry.path())?;
        posts.push(
            Post::from_str(&file_name, &contents)
                .map_err(|e| Error::Annotated(entry.path().display().to_string(), Box::new(e)))?,
        );
    }

    // Newest first; ties broken by URL so the order is reproducible.
    posts.sort_by(|a, b| (b.date, &b.url).cmp(&(a.date, &a.url)));

    Ok(posts)
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file name doesn't follow the
    /// `YYYY-MM-DD-slug.md` convention.
    InvalidFileName(String),

    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one
    /// was missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidFileName(name) => {
                write!(f, "Post file name must be `YYYY-MM-DD-slug.md`: {}", name)
            }
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidFileName(_) => None,
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible directory-walking functions.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
