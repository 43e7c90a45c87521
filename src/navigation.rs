//! Navigation state machine.
//!
//! ```text
//!            open_series_only            open_series(name)
//!   Main ───────────────────▶ SeriesOnly ─────────────────▶ SeriesDetail(name)
//!    ▲                                                          │
//!    │ go_home (from any state)               open_article(id)  ▼
//!    └──────────────────────────────────────────────── ArticleDetail(id)
//! ```
//!
//! `open_series` and `open_article` are accepted from every state. Lookups
//! that do not resolve leave the state untouched. Every accepted transition
//! asks the renderer to scroll to the top.
//!
//! The subscribe modal is independent of all of this: see [`SubscribeModal`].

use crate::model::ContentModel;
use crate::types::PostId;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// Standalone grid plus series grid.
    #[default]
    Main,
    /// Series grid alone.
    SeriesOnly,
    SeriesDetail(String),
    ArticleDetail(PostId),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Main => write!(f, "main"),
            View::SeriesOnly => write!(f, "series-only"),
            View::SeriesDetail(name) => write!(f, "series:{name}"),
            View::ArticleDetail(id) => write!(f, "article:{id}"),
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The view changed (or was re-entered); the page scrolls to the top.
    Moved,
    /// The target did not resolve; nothing happened.
    Ignored,
}

impl Transition {
    pub fn scrolls_to_top(self) -> bool {
        matches!(self, Transition::Moved)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    pub fn open_series_only(&mut self) -> Transition {
        self.move_to(View::SeriesOnly)
    }

    pub fn open_series(&mut self, model: &ContentModel, name: &str) -> Transition {
        match model.series_named(name) {
            Some(series) => self.move_to(View::SeriesDetail(series.name.clone())),
            None => Transition::Ignored,
        }
    }

    pub fn open_article(&mut self, model: &ContentModel, id: PostId) -> Transition {
        match model.post(id) {
            Some(post) => self.move_to(View::ArticleDetail(post.id)),
            None => Transition::Ignored,
        }
    }

    pub fn go_home(&mut self) -> Transition {
        self.move_to(View::Main)
    }

    /// Drop back to `Main` if the current detail view no longer resolves
    /// against `model`. Returns true if the view changed.
    pub fn revalidate(&mut self, model: &ContentModel) -> bool {
        let stale = match &self.current {
            View::SeriesDetail(name) => model.series_named(name).is_none(),
            View::ArticleDetail(id) => model.post(*id).is_none(),
            View::Main | View::SeriesOnly => false,
        };
        if stale {
            self.current = View::Main;
        }
        stale
    }

    fn move_to(&mut self, view: View) -> Transition {
        self.current = view;
        Transition::Moved
    }
}

/// Where a click landed relative to the subscribe modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the modal's content box.
    Content,
    /// On the backdrop around it.
    Outside,
}

/// The subscribe prompt: open or closed, nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscribeModal {
    open: bool,
}

impl SubscribeModal {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Outside {
            self.close();
        }
    }
}
