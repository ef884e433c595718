//! The library code for `tattle`, the generator that backfills my blog's
//! static build with the pages the main pipeline doesn't produce. The
//! architecture can be broken down into three distinct steps:
//!
//! 1. Parsing posts from source files on disk ([`crate::post`]) into an
//!    immutable site snapshot ([`crate::site`])
//! 2. Running the generators, each of which reads the snapshot and appends
//!    virtual pages ([`crate::page`]) to the build's page list:
//!    - one listing page per tag, plus alias pages for the underscore and
//!      hyphen spelling variants of tag names ([`crate::tag_index`])
//!    - one meta-refresh redirect page per post for the legacy
//!      trailing-hyphen URLs ([`crate::redirect`])
//!    - the `slugs.json` index of post URLs and slugs
//!      ([`crate::slug_index`]), written directly rather than appended
//! 3. Rendering the page list to disk ([`crate::write`]): tag pages through
//!    the theme's tag template, redirect pages verbatim
//!
//! The generators are independent of one another: each consumes the same
//! read-only snapshot and only ever appends output. [`crate::permalink`]
//! holds the dated URL grammar they share.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod page;
pub mod permalink;
pub mod post;
pub mod redirect;
pub mod site;
pub mod slug_index;
pub mod tag_index;
pub mod write;
