//! Content model: raw records → posts → series.
//!
//! Posts are the only owned entities. A [`Series`] is a derived index over
//! the post list (name, description, member ids) and is rebuilt from scratch
//! whenever the posts change, so there is nothing to keep in sync.
//!
//! ## Normalization rules
//!
//! - Records whose title is missing or `""` are rejected. Any other title,
//!   whitespace included, is kept verbatim.
//! - Ids are assigned 1, 2, 3… over the *accepted* records, in source order.
//! - String fields default to empty; `series`, `series_description` and
//!   `image_url` are `None` when the cell is missing or `""`.
//! - Tags come from a comma-separated field, trimmed, empties dropped.

use crate::types::{Post, PostId, RawRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A named group of posts sharing a `series` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    /// First non-empty `series_description` among the members, else empty.
    pub description: String,
    /// Member post ids in load order.
    pub posts: Vec<PostId>,
}

/// Map raw records to posts, dropping records without a title.
pub fn build_posts(records: Vec<RawRecord>) -> Vec<Post> {
    let mut posts = Vec::with_capacity(records.len());
    for (row, record) in records.into_iter().enumerate() {
        let title = record.title.unwrap_or_default();
        if title.is_empty() {
            debug!(row = row + 1, "skipping record without a title");
            continue;
        }
        let id = PostId(posts.len() as u32 + 1);
        posts.push(Post {
            id,
            title,
            date: record.date.unwrap_or_default(),
            read_time: record.read_time.unwrap_or_default(),
            excerpt: record.excerpt.unwrap_or_default(),
            content: record.content.unwrap_or_default(),
            tags: split_tags(record.tags.as_deref()),
            series: non_empty(record.series),
            series_description: non_empty(record.series_description),
            image_url: non_empty(record.image_url),
        });
    }
    posts
}

/// Group posts by series name in order of first appearance.
pub fn build_series(posts: &[Post]) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    let mut slots: BTreeMap<&str, usize> = BTreeMap::new();

    for post in posts {
        let Some(name) = post.series.as_deref() else {
            continue;
        };
        let slot = *slots.entry(name).or_insert_with(|| {
            series.push(Series {
                name: name.to_string(),
                description: String::new(),
                posts: Vec::new(),
            });
            series.len() - 1
        });
        let entry = &mut series[slot];
        if entry.description.is_empty()
            && let Some(desc) = post.series_description.as_deref()
        {
            entry.description = desc.to_string();
        }
        entry.posts.push(post.id);
    }
    series
}

fn split_tags(csv: Option<&str>) -> Vec<String> {
    csv.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The loaded posts plus their derived series index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentModel {
    posts: Vec<Post>,
    series: Vec<Series>,
    #[serde(skip)]
    series_by_name: BTreeMap<String, usize>,
    /// Records dropped for having no title.
    rejected: usize,
}

impl ContentModel {
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let total = records.len();
        let posts = build_posts(records);
        let rejected = total - posts.len();
        if rejected > 0 {
            debug!(rejected, accepted = posts.len(), "dropped untitled records");
        }
        Self::from_posts(posts, rejected)
    }

    fn from_posts(posts: Vec<Post>, rejected: usize) -> Self {
        let series = build_series(&posts);
        let series_by_name = series
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        ContentModel {
            posts,
            series,
            series_by_name,
            rejected,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        // Ids are dense from 1, so the id is also the position.
        let idx = (id.0 as usize).checked_sub(1)?;
        self.posts.get(idx).filter(|p| p.id == id)
    }

    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series_by_name.get(name).map(|&i| &self.series[i])
    }

    /// Resolve a series' member ids to posts, in load order.
    pub fn series_posts<'a>(&'a self, series: &Series) -> Vec<&'a Post> {
        series.posts.iter().filter_map(|&id| self.post(id)).collect()
    }

    pub fn standalone_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.is_standalone())
    }

    pub fn standalone_count(&self) -> usize {
        self.standalone_posts().count()
    }

    /// Every distinct tag, in order of first appearance.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = std::collections::BTreeSet::new();
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .map(String::as_str)
            .collect()
    }
}
