//! Defines [`Site`], the read-only snapshot the generators consume: the
//! ordered post list plus a tag index over it. Generators never mutate the
//! snapshot; they append [`crate::page::GeneratedPage`]s to a sink owned by
//! the build.

use std::collections::BTreeMap;

use crate::post::Post;

/// An immutable view of the parsed posts and their tags.
pub struct Site {
    /// All posts, newest first.
    pub posts: Vec<Post>,

    // tag name -> indices into `posts`, preserving post order.
    tags: BTreeMap<String, Vec<usize>>,
}

impl Site {
    /// Indexes `posts` (assumed already sorted newest-first) by tag. Empty
    /// tag names are never indexed and so never produce a page.
    pub fn new(posts: Vec<Post>) -> Site {
        let mut tags: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, post) in posts.iter().enumerate() {
            for tag in &post.tags {
                if tag.is_empty() {
                    continue;
                }
                tags.entry(tag.clone()).or_insert_with(Vec::new).push(i);
            }
        }
        Site { posts, tags }
    }

    /// Iterates over tag names in a stable (lexicographic) order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Whether `name` is a real tag on at least one post.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// The posts carrying `name`, newest first. Unknown tags yield nothing.
    pub fn tagged_posts<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Post> {
        self.tags
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.posts[i])
    }
}
