//! Generates redirect pages for the trailing-hyphen legacy URLs. An old
//! syndication bug published post links with a stray `-` before the final
//! `/` (or `.html`), and those links are still out in the wild; for every
//! post on the dated permalink grammar we publish a tiny static page at the
//! broken path that meta-refreshes to the canonical URL.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::page::{Content, FrontMatter, GeneratedPage};
use crate::permalink::Permalink;
use crate::site::Site;

/// Appends one redirect page per post whose URL parses under the dated
/// permalink grammar. Posts outside the grammar get no redirect.
pub fn generate(
    site: &Site,
    site_root: &Url,
    pages: &mut Vec<GeneratedPage>,
) -> Result<(), url::ParseError> {
    for post in &site.posts {
        match Permalink::parse(&post.url) {
            Some(permalink) => pages.push(redirect_page(&permalink, site_root)?),
            None => debug!(url = %post.url, "URL outside the dated permalink grammar; no redirect"),
        }
    }
    Ok(())
}

fn redirect_page(
    permalink: &Permalink,
    site_root: &Url,
) -> Result<GeneratedPage, url::ParseError> {
    let canonical = permalink.canonical();
    let absolute = site_root.join(&canonical)?;
    let (directory, filename) = split_output_path(&permalink.trailing_hyphen());
    Ok(GeneratedPage {
        directory,
        filename,
        data: FrontMatter {
            layout: None,
            sitemap: false,
            ..FrontMatter::default()
        },
        content: Content::Raw(redirect_html(&canonical, &absolute)),
    })
}

// One rule for both permalink styles: directory-style URLs get an
// `index.html` under the chomped path; otherwise split at the last `/`.
fn split_output_path(broken: &str) -> (PathBuf, String) {
    let relative = broken.trim_start_matches('/');
    if let Some(directory) = relative.strip_suffix('/') {
        return (PathBuf::from(directory), "index.html".to_owned());
    }
    match relative.rfind('/') {
        Some(i) => (PathBuf::from(&relative[..i]), relative[i + 1..].to_owned()),
        None => (PathBuf::new(), relative.to_owned()),
    }
}

fn redirect_html(canonical: &str, absolute: &Url) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Redirecting...</title>
  <meta http-equiv="refresh" content="0; url={canonical}">
  <link rel="canonical" href="{absolute}">
</head>
<body>
  <p>Redirecting to <a href="{canonical}">{canonical}</a></p>
</body>
</html>
"#,
        canonical = canonical,
        absolute = absolute,
    )
}
