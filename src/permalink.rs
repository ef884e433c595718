//! Explicit parsing for the blog's dated permalink grammar:
//! `/YYYY/MM/DD/slug/` (directory style) or `/YYYY/MM/DD/slug.html` (file
//! style). Older revisions of the site matched these URLs with regular
//! expressions scattered across the generators; here the grammar is parsed
//! once into a [`Permalink`] value and the generators branch on that.

use chrono::NaiveDate;
use std::fmt;

/// Whether a permalink ends in a trailing slash or a `.html` suffix. The
/// blog has published under both conventions, so both must keep working.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// `/YYYY/MM/DD/slug/`
    Directory,

    /// `/YYYY/MM/DD/slug.html`
    Html,
}

/// A post URL decomposed into its date, slug, and trailing style. A
/// `Permalink` can print itself in canonical form ([`Permalink::canonical`])
/// or in the legacy trailing-hyphen form ([`Permalink::trailing_hyphen`])
/// that broken inbound links still point at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permalink {
    date: NaiveDate,
    slug: String,
    style: Style,
}

impl Permalink {
    /// Constructs a permalink from its parts. Returns `None` for an empty
    /// slug, since the grammar has no URL for one.
    pub fn new(date: NaiveDate, slug: &str, style: Style) -> Option<Permalink> {
        if slug.is_empty() {
            return None;
        }
        Some(Permalink {
            date,
            slug: slug.to_owned(),
            style,
        })
    }

    /// Parses a site-absolute URL against the grammar. URLs that don't
    /// match (wrong prefix shape, non-digit date fields, out-of-range
    /// dates, empty slugs, no trailing marker) return `None`.
    pub fn parse(url: &str) -> Option<Permalink> {
        let rest = url.strip_prefix('/')?;
        let (style, rest) = if let Some(stripped) = rest.strip_suffix(".html") {
            (Style::Html, stripped)
        } else if let Some(stripped) = rest.strip_suffix('/') {
            (Style::Directory, stripped)
        } else {
            return None;
        };

        let mut segments = rest.splitn(4, '/');
        let year = digits(segments.next()?, 4)?;
        let month = digits(segments.next()?, 2)?;
        let day = digits(segments.next()?, 2)?;
        let slug = segments.next()?;
        let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
        Permalink::new(date, slug, style)
    }

    /// Parses a post source file name of the form `YYYY-MM-DD-slug` (the
    /// extension must already be stripped). Posts named this way publish
    /// under the directory-style permalink.
    pub fn from_post_file_name(stem: &str) -> Option<Permalink> {
        let mut segments = stem.splitn(4, '-');
        let year = digits(segments.next()?, 4)?;
        let month = digits(segments.next()?, 2)?;
        let day = digits(segments.next()?, 2)?;
        let slug = segments.next()?;
        let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
        Permalink::new(date, slug, Style::Directory)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// The canonical URL for the post.
    pub fn canonical(&self) -> String {
        match self.style {
            Style::Directory => format!("/{}/{}/", self.date.format("%Y/%m/%d"), self.slug),
            Style::Html => format!("/{}/{}.html", self.date.format("%Y/%m/%d"), self.slug),
        }
    }

    /// The legacy URL with a stray `-` before the terminal `/` or `.html`.
    /// Old syndicated links point here; the redirect generator publishes a
    /// page at this path that bounces to [`Permalink::canonical`].
    pub fn trailing_hyphen(&self) -> String {
        match self.style {
            Style::Directory => format!("/{}/{}-/", self.date.format("%Y/%m/%d"), self.slug),
            Style::Html => format!("/{}/{}-.html", self.date.format("%Y/%m/%d"), self.slug),
        }
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

// A fixed-width run of ASCII digits. `str::parse` alone would admit `+`/`-`
// signs, which the grammar does not.
fn digits(segment: &str, width: usize) -> Option<u32> {
    if segment.len() != width || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
