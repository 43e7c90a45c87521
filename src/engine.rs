//! Filter and search over the content model.
//!
//! The engine holds the reader's filter state (one active tag, a search
//! query, the "show all" flag) and derives the visible posts and series from
//! a [`ContentModel`]. It never mutates the model.
//!
//! Tag filtering applies to the standalone grid only; series are narrowed by
//! the search query alone.

use crate::model::{ContentModel, Series};
use crate::types::Post;

/// Number of standalone posts on the home grid before "show more".
pub const PREVIEW_LIMIT: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    active_filter: Option<String>,
    /// Always stored lowercased.
    search_query: String,
    show_all: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_filter(&self) -> Option<&str> {
        self.active_filter.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Activate `tag`, or clear it if it is already the active one.
    ///
    /// Only one tag is ever active: a different tag replaces the current one.
    pub fn toggle_filter(&mut self, tag: &str) {
        if self.active_filter.as_deref() == Some(tag) {
            self.active_filter = None;
        } else {
            self.active_filter = Some(tag.to_string());
        }
    }

    pub fn set_search_query(&mut self, text: &str) {
        self.search_query = text.to_lowercase();
    }

    /// Reveal the truncated remainder of the home grid for the rest of the
    /// session.
    pub fn show_all_posts(&mut self) {
        self.show_all = true;
    }

    /// True when the home grid is cut to [`PREVIEW_LIMIT`] for the given
    /// `show_all` value.
    fn truncates(&self, show_all: bool) -> bool {
        !show_all && self.active_filter.is_none() && self.search_query.is_empty()
    }

    /// Standalone posts that pass the active tag and the search query.
    ///
    /// Without a filter or query and with `show_all` false, only the first
    /// [`PREVIEW_LIMIT`] posts are returned.
    pub fn visible_posts<'a>(&self, model: &'a ContentModel, show_all: bool) -> Vec<&'a Post> {
        let filtered = model
            .standalone_posts()
            .filter(|post| match self.active_filter.as_deref() {
                Some(tag) => post.tags.iter().any(|t| t == tag),
                None => true,
            })
            .filter(|post| self.post_matches_query(post));

        if self.truncates(show_all) {
            filtered.take(PREVIEW_LIMIT).collect()
        } else {
            filtered.collect()
        }
    }

    /// Series whose name, description, or any member's title or excerpt
    /// contains the search query. All series when the query is empty.
    pub fn visible_series<'a>(&self, model: &'a ContentModel) -> Vec<&'a Series> {
        if self.search_query.is_empty() {
            return model.series().iter().collect();
        }
        let q = self.search_query.as_str();
        model
            .series()
            .iter()
            .filter(|s| {
                contains(&s.name, q)
                    || contains(&s.description, q)
                    || model
                        .series_posts(s)
                        .iter()
                        .any(|p| contains(&p.title, q) || contains(&p.excerpt, q))
            })
            .collect()
    }

    /// Whether the "show more" control belongs on the home grid.
    pub fn show_more_visible(&self, model: &ContentModel) -> bool {
        self.truncates(self.show_all) && model.standalone_count() > PREVIEW_LIMIT
    }

    fn post_matches_query(&self, post: &Post) -> bool {
        let q = self.search_query.as_str();
        q.is_empty()
            || contains(&post.title, q)
            || contains(&post.excerpt, q)
            || post.tags.iter().any(|t| contains(t, q))
    }
}

/// Case-insensitive substring test; `needle` is already lowercased.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
