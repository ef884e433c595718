//! Writes `slugs.json`, an index of every post's URL and slug. A sidecar
//! search script on the site fetches this file to map slugs back to URLs.
//! The file lives at the output root, outside anything the build cleans, so
//! it survives between builds.

use std::fmt;
use std::fs::File;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::post::Post;

/// The slug index's file name under the output root.
pub const SLUG_INDEX_FILE: &str = "slugs.json";

/// One entry of the slug index.
#[derive(Debug, PartialEq, Serialize)]
pub struct SlugRecord {
    pub url: String,
    pub slug: String,
}

/// The slug for a site-absolute URL: the lowercased last path segment with
/// its extension stripped.
pub fn slug_of(url: &str) -> String {
    let base = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let base = match base.rfind('.') {
        Some(i) => &base[..i],
        None => base,
    };
    base.to_lowercase()
}

/// Builds the index records, one per post, in post order.
pub fn records(posts: &[Post]) -> Vec<SlugRecord> {
    posts
        .iter()
        .map(|post| SlugRecord {
            url: post.url.clone(),
            slug: slug_of(&post.url),
        })
        .collect()
}

/// Serializes the index to `<output_directory>/slugs.json`. Any failure
/// here is fatal to the build.
pub fn write_slug_index(posts: &[Post], output_directory: &Path) -> Result<()> {
    let path = output_directory.join(SLUG_INDEX_FILE);
    serde_json::to_writer(File::create(&path)?, &records(posts))?;
    info!(posts = posts.len(), path = %path.display(), "wrote slug index");
    Ok(())
}

/// The result of a slug-index operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error building or writing the slug index.
#[derive(Debug)]
pub enum Error {
    /// An error serializing the index as JSON.
    Json(serde_json::Error),

    /// An error writing the output file.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Json(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for serialization.
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts an [`std::io::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible I/O operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
