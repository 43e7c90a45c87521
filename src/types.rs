//! Shared types passed between the source adapter, the content model and the
//! renderer.
//!
//! A [`RawRecord`] is one spreadsheet row exactly as the source delivered it.
//! A [`Post`] is the normalized essay built from an accepted record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a loaded post.
///
/// Ids are 1-based and dense over the accepted records of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u32);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the content source.
///
/// Column order in the sheet is
/// `[title, date, read_time, excerpt, content, tags, series, series_description, image_url]`.
/// Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: Option<String>,
    pub date: Option<String>,
    pub read_time: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    pub series: Option<String>,
    pub series_description: Option<String>,
    pub image_url: Option<String>,
}

impl RawRecord {
    /// Number of positional columns a sheet row carries.
    pub const COLUMNS: usize = 9;

    /// Build a record from positional cells, in sheet column order.
    ///
    /// Missing trailing cells are treated as absent; extra cells are ignored.
    pub fn from_cells(mut cells: Vec<Option<String>>) -> Self {
        cells.resize(Self::COLUMNS, None);
        let mut it = cells.into_iter();
        let mut next = || it.next().flatten();
        RawRecord {
            title: next(),
            date: next(),
            read_time: next(),
            excerpt: next(),
            content: next(),
            tags: next(),
            series: next(),
            series_description: next(),
            image_url: next(),
        }
    }
}

/// A single essay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub date: String,
    pub read_time: String,
    pub excerpt: String,
    /// Rich text body (markdown or raw HTML).
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Name of the series this post belongs to; `None` for standalone posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Post {
    pub fn is_standalone(&self) -> bool {
        self.series.is_none()
    }

    /// `"Feb 8, 2026 · 3 min read"`, skipping whichever half is empty.
    pub fn meta_line(&self) -> String {
        match (self.date.is_empty(), self.read_time.is_empty()) {
            (false, false) => format!("{} \u{b7} {}", self.date, self.read_time),
            (false, true) => self.date.clone(),
            (true, false) => self.read_time.clone(),
            (true, true) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_maps_columns_in_order() {
        let cells = (0..RawRecord::COLUMNS)
            .map(|i| Some(format!("c{i}")))
            .collect();
        let record = RawRecord::from_cells(cells);
        assert_eq!(record.title.as_deref(), Some("c0"));
        assert_eq!(record.tags.as_deref(), Some("c5"));
        assert_eq!(record.image_url.as_deref(), Some("c8"));
    }

    #[test]
    fn from_cells_pads_short_rows() {
        let record = RawRecord::from_cells(vec![Some("Only a title".into())]);
        assert_eq!(record.title.as_deref(), Some("Only a title"));
        assert_eq!(record.series, None);
        assert_eq!(record.image_url, None);
    }

    #[test]
    fn from_cells_ignores_extra_columns() {
        let mut cells: Vec<Option<String>> = vec![None; RawRecord::COLUMNS];
        cells.push(Some("overflow".into()));
        let record = RawRecord::from_cells(cells);
        assert_eq!(record, RawRecord::default());
    }

    #[test]
    fn meta_line_joins_date_and_read_time() {
        let post = crate::test_helpers::post(1, "T");
        assert_eq!(post.meta_line(), "Jan 1, 2026 \u{b7} 3 min read");

        let bare = Post {
            date: String::new(),
            ..post
        };
        assert_eq!(bare.meta_line(), "3 min read");
    }
}
