//! Generates the tag listing pages. Two passes: one page per real tag at
//! `tag/<tag>/index.html`, then alias pages for the underscore/hyphen
//! spelling variants the blog has used over the years. An alias page is
//! only created when the alias doesn't name a real tag, so a real tag's
//! page is never shadowed by an alias.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::page::{Content, FrontMatter, GeneratedPage};
use crate::site::Site;

/// The alternate spelling a tag's inbound links may use, under the blog's
/// two historical slugging conventions: underscore tags were once published
/// hyphenated, and the hyphenated `source-*` tags were once published with
/// underscores. Returns `None` for tags with no alternate spelling.
pub fn alias_of(tag: &str) -> Option<String> {
    if tag.contains('_') {
        Some(tag.replace('_', "-"))
    } else if tag.starts_with("source-") {
        Some(tag.replace('-', "_"))
    } else {
        None
    }
}

/// Appends one listing page per tag, then the non-colliding alias pages.
pub fn generate(site: &Site, pages: &mut Vec<GeneratedPage>) {
    for tag in site.tags() {
        pages.push(tag_page(tag, None));
    }

    // Two distinct tags can share an alias (e.g. `a_b-c` and `a-b_c` both
    // alias to `a-b-c`); the first one claims the path.
    let mut claimed: HashSet<String> = HashSet::new();
    for tag in site.tags() {
        if let Some(alias) = alias_of(tag) {
            if site.has_tag(&alias) {
                debug!(tag = %tag, alias = %alias, "alias names a real tag; skipping");
                continue;
            }
            if !claimed.insert(alias.clone()) {
                debug!(tag = %tag, alias = %alias, "alias path already claimed; skipping");
                continue;
            }
            pages.push(tag_page(&alias, Some(tag)));
        }
    }
}

fn tag_page(tag: &str, canonical: Option<&str>) -> GeneratedPage {
    // Alias pages display and list the canonical tag; the alias only
    // decides the URL.
    let display = canonical.unwrap_or(tag);
    GeneratedPage {
        directory: Path::new("tag").join(tag),
        filename: "index.html".to_owned(),
        data: FrontMatter {
            title: Some(format!("Posts tagged '{}'", display)),
            tag: Some(display.to_owned()),
            canonical_tag: canonical.map(str::to_owned),
            layout: Some("tag".to_owned()),
            sitemap: true,
        },
        content: Content::Layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Post;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn post(url: &str, tags: &[&str]) -> Post {
        Post {
            url: url.to_owned(),
            title: url.to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            tags: tags.iter().map(|&t| t.to_owned()).collect(),
            body: String::new(),
        }
    }

    fn generated(tags: &[&[&str]]) -> Vec<GeneratedPage> {
        let posts = tags
            .iter()
            .enumerate()
            .map(|(i, &tags)| post(&format!("/2024/03/15/post-{}/", i), tags))
            .collect();
        let mut pages = Vec::new();
        generate(&Site::new(posts), &mut pages);
        pages
    }

    fn page_dirs(pages: &[GeneratedPage]) -> Vec<&Path> {
        pages.iter().map(|p| p.directory.as_path()).collect()
    }

    #[test]
    fn test_alias_of() {
        assert_eq!(alias_of("deep_dive"), Some("deep-dive".to_owned()));
        assert_eq!(alias_of("source-page-six"), Some("source_page_six".to_owned()));
        // Underscore replacement wins when both rules could apply.
        assert_eq!(alias_of("source-a_b"), Some("source-a-b".to_owned()));
        assert_eq!(alias_of("gossip"), None);
    }

    #[test]
    fn test_underscore_tag_gets_hyphen_alias() {
        let pages = generated(&[&["deep_dive"]]);
        assert_eq!(
            page_dirs(&pages),
            vec![Path::new("tag/deep_dive"), Path::new("tag/deep-dive")],
        );

        let alias = &pages[1];
        assert_eq!(alias.data.canonical_tag.as_deref(), Some("deep_dive"));
        assert_eq!(alias.data.tag.as_deref(), Some("deep_dive"));
        assert_eq!(alias.data.title.as_deref(), Some("Posts tagged 'deep_dive'"));
    }

    #[test]
    fn test_alias_skipped_when_it_names_a_real_tag() {
        let pages = generated(&[&["deep_dive"], &["deep-dive"]]);
        assert_eq!(
            page_dirs(&pages),
            vec![Path::new("tag/deep-dive"), Path::new("tag/deep_dive")],
        );
    }

    #[test]
    fn test_source_tag_gets_underscore_alias() {
        let pages = generated(&[&["source-page-six"]]);
        assert_eq!(
            page_dirs(&pages),
            vec![
                Path::new("tag/source-page-six"),
                Path::new("tag/source_page_six"),
            ],
        );
        assert_eq!(
            pages[1].data.canonical_tag.as_deref(),
            Some("source-page-six"),
        );
    }

    #[test]
    fn test_source_alias_skipped_when_underscored_name_is_a_real_tag() {
        let pages = generated(&[&["source-page-six"], &["source_page_six"]]);
        // `source_page_six` aliases back to `source-page-six`, also a real
        // tag, so neither direction produces an alias page.
        assert_eq!(
            page_dirs(&pages),
            vec![
                Path::new("tag/source-page-six"),
                Path::new("tag/source_page_six"),
            ],
        );
    }

    #[test]
    fn test_first_tag_claims_a_shared_alias_path() {
        let pages = generated(&[&["a_b-c"], &["a-b_c"]]);
        assert_eq!(
            page_dirs(&pages),
            vec![
                Path::new("tag/a-b_c"),
                Path::new("tag/a_b-c"),
                Path::new("tag/a-b-c"),
            ],
        );
        // `a-b_c` sorts before `a_b-c`, so it gets the shared alias.
        assert_eq!(pages[2].data.canonical_tag.as_deref(), Some("a-b_c"));
    }

    #[test]
    fn test_plain_tag_gets_no_alias() {
        let pages = generated(&[&["gossip"]]);
        assert_eq!(page_dirs(&pages), vec![Path::new("tag/gossip")]);
        assert_eq!(pages[0].data.canonical_tag, None);
        assert_eq!(pages[0].data.layout.as_deref(), Some("tag"));
        assert!(pages[0].data.sitemap);
    }

    #[test]
    fn test_empty_tag_produces_no_page() {
        let pages = generated(&[&[""]]);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_output_paths() {
        let pages = generated(&[&["gossip"]]);
        assert_eq!(pages[0].output_path(), PathBuf::from("tag/gossip/index.html"));
    }
}
