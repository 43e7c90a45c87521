//! Shared test utilities for the sheet-essays test suite.
//!
//! Record builders cover the common row shapes (plain, tagged, in a series),
//! and the extractors turn model/frame output into plain vectors that read
//! well in `assert_eq!`.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let session = session_from(vec![
//!     tagged_record("Tokyo", "travel"),
//!     series_record("Berlin", "Field Notes", Some("desc")),
//! ]);
//! assert_eq!(main_titles(&session), vec!["Tokyo"]);
//! ```

use crate::model::ContentModel;
use crate::session::{Frame, Session};
use crate::types::{Post, PostId, RawRecord};

// =========================================================================
// Record builders
// =========================================================================

/// A record with only a title.
pub fn record(title: &str) -> RawRecord {
    RawRecord {
        title: Some(title.to_string()),
        ..RawRecord::default()
    }
}

/// A standalone record with a comma-separated tag field.
pub fn tagged_record(title: &str, tags: &str) -> RawRecord {
    RawRecord {
        tags: Some(tags.to_string()),
        ..record(title)
    }
}

/// A record belonging to `series`, optionally carrying a series description.
pub fn series_record(title: &str, series: &str, description: Option<&str>) -> RawRecord {
    RawRecord {
        series: Some(series.to_string()),
        series_description: description.map(String::from),
        ..record(title)
    }
}

/// A fully populated standalone record whose excerpt mentions its title.
pub fn full_record(title: &str, tags: &str) -> RawRecord {
    RawRecord {
        date: Some("Jan 1, 2026".to_string()),
        read_time: Some("3 min read".to_string()),
        excerpt: Some(format!("An excerpt about {title}.")),
        content: Some(format!("<p>{title} body</p>")),
        ..tagged_record(title, tags)
    }
}

/// `n` standalone records titled `Post 1` … `Post n`.
pub fn numbered_records(n: usize) -> Vec<RawRecord> {
    (1..=n).map(|i| record(&format!("Post {i}"))).collect()
}

/// A standalone post built directly, bypassing the model.
pub fn post(id: u32, title: &str) -> Post {
    Post {
        id: PostId(id),
        title: title.to_string(),
        date: "Jan 1, 2026".to_string(),
        read_time: "3 min read".to_string(),
        excerpt: String::new(),
        content: String::new(),
        tags: Vec::new(),
        series: None,
        series_description: None,
        image_url: None,
    }
}

pub fn session_from(records: Vec<RawRecord>) -> Session {
    Session::new(ContentModel::from_records(records))
}

// =========================================================================
// Extractors
// =========================================================================

pub fn post_ids(posts: &[Post]) -> Vec<u32> {
    posts.iter().map(|p| p.id.0).collect()
}

pub fn titles(posts: &[&Post]) -> Vec<String> {
    posts.iter().map(|p| p.title.clone()).collect()
}

/// Titles of the standalone grid in the session's current main frame.
/// Panics if the session is not on the main view.
pub fn main_titles(session: &Session) -> Vec<String> {
    match session.frame() {
        Frame::Main { posts, .. } => titles(&posts),
        other => panic!("expected main frame, got {}", other.name()),
    }
}

/// Series names visible in the current main or series-only frame.
pub fn frame_series_names(session: &Session) -> Vec<String> {
    match session.frame() {
        Frame::Main { series, .. } | Frame::SeriesOnly { series } => {
            series.iter().map(|s| s.name.clone()).collect()
        }
        other => panic!("expected a series grid, got {}", other.name()),
    }
}
