//! The reader's session: content model plus all interactive state.
//!
//! A [`Session`] is created once the content has loaded and is the only
//! place state lives. Each user action is a method that updates the state
//! and returns a [`Step`]: the [`Frame`] to draw next and whether the page
//! should scroll to the top. Renderers only ever see frames.
//!
//! ## Actions
//!
//! | Action | Method | Textual command |
//! |--------|--------|-----------------|
//! | select a tag | [`Session::select_tag`] | `tag travel` |
//! | type in search | [`Session::set_query`] | `search berlin` / `search` |
//! | reveal hidden posts | [`Session::show_all_posts`] | `more` |
//! | open a series | [`Session::open_series`] | `series Field Notes` |
//! | open an article | [`Session::open_article`] | `article 3` |
//! | series list | [`Session::open_series_only_view`] | `series-only` |
//! | home | [`Session::go_home`] | `home` |
//! | subscribe prompt | [`Session::open_subscribe`] / [`Session::close_subscribe`] | `subscribe` / `close` |
//! | click around the prompt | [`Session::click_subscribe`] | `click outside` / `click inside` |
//!
//! ## Reloads
//!
//! Content can be reloaded while a session is live. Loads are ticketed:
//! [`Session::begin_load`] hands out a ticket and [`Session::finish_load`]
//! applies records only for the most recently started load, so a slow early
//! load cannot overwrite a newer one.

use crate::engine::FilterState;
use crate::model::{ContentModel, Series};
use crate::navigation::{ClickTarget, Navigator, SubscribeModal, Transition, View};
use crate::types::{Post, PostId, RawRecord};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Everything a renderer needs to draw the current view.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<'a> {
    Main {
        posts: Vec<&'a Post>,
        series: Vec<&'a Series>,
        show_more: bool,
        active_filter: Option<&'a str>,
        query: &'a str,
        tags: Vec<&'a str>,
    },
    SeriesOnly {
        series: Vec<&'a Series>,
    },
    SeriesDetail {
        series: &'a Series,
        posts: Vec<&'a Post>,
    },
    Article {
        post: &'a Post,
    },
}

impl Frame<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Frame::Main { .. } => "main",
            Frame::SeriesOnly { .. } => "series-only",
            Frame::SeriesDetail { .. } => "series",
            Frame::Article { .. } => "article",
        }
    }
}

/// Outcome of one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<'a> {
    pub frame: Frame<'a>,
    pub scroll_to_top: bool,
    /// Whether the subscribe prompt is showing over the frame.
    pub subscribe_open: bool,
}

/// A user action in value form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTag(String),
    SetQuery(String),
    ShowAllPosts,
    OpenSeries(String),
    OpenArticle(PostId),
    OpenSeriesOnly,
    GoHome,
    OpenSubscribe,
    CloseSubscribe,
    Click(ClickTarget),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("article id must be a number, got '{0}'")]
    BadId(String),
    #[error("click target must be 'inside' or 'outside', got '{0}'")]
    BadClickTarget(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, rest)) => (c, rest.trim()),
            None => (line, ""),
        };
        let required = |name: &'static str| {
            if arg.is_empty() {
                Err(ActionParseError::MissingArgument(name))
            } else {
                Ok(arg.to_string())
            }
        };

        match command {
            "" => Err(ActionParseError::Empty),
            "tag" => required("tag").map(Action::SelectTag),
            // An empty search clears the query.
            "search" => Ok(Action::SetQuery(arg.to_string())),
            "more" => Ok(Action::ShowAllPosts),
            "series" => required("series").map(Action::OpenSeries),
            "article" => {
                let raw = required("article")?;
                raw.parse::<u32>()
                    .map(|n| Action::OpenArticle(PostId(n)))
                    .map_err(|_| ActionParseError::BadId(raw))
            }
            "series-only" => Ok(Action::OpenSeriesOnly),
            "home" => Ok(Action::GoHome),
            "subscribe" => Ok(Action::OpenSubscribe),
            "close" => Ok(Action::CloseSubscribe),
            "click" => match required("click")?.as_str() {
                "outside" => Ok(Action::Click(ClickTarget::Outside)),
                "inside" => Ok(Action::Click(ClickTarget::Content)),
                other => Err(ActionParseError::BadClickTarget(other.to_string())),
            },
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

/// Identifies one content load; see [`Session::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct Session {
    model: ContentModel,
    filters: FilterState,
    nav: Navigator,
    subscribe: SubscribeModal,
    latest_load: u64,
}

impl Session {
    pub fn new(model: ContentModel) -> Self {
        Session {
            model,
            filters: FilterState::new(),
            nav: Navigator::new(),
            subscribe: SubscribeModal::default(),
            latest_load: 0,
        }
    }

    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view(&self) -> &View {
        self.nav.current()
    }

    pub fn subscribe_open(&self) -> bool {
        self.subscribe.is_open()
    }

    /// Project the current state into a frame.
    pub fn frame(&self) -> Frame<'_> {
        let model = &self.model;
        match self.nav.current() {
            View::Main => self.main_frame(),
            View::SeriesOnly => Frame::SeriesOnly {
                series: self.filters.visible_series(model),
            },
            View::SeriesDetail(name) => match model.series_named(name) {
                Some(series) => Frame::SeriesDetail {
                    series,
                    posts: model.series_posts(series),
                },
                None => self.main_frame(),
            },
            View::ArticleDetail(id) => match model.post(*id) {
                Some(post) => Frame::Article { post },
                None => self.main_frame(),
            },
        }
    }

    // Also the fallback for a detail view that stopped resolving.
    fn main_frame(&self) -> Frame<'_> {
        Frame::Main {
            posts: self.filters.visible_posts(&self.model, self.filters.show_all()),
            series: self.filters.visible_series(&self.model),
            show_more: self.filters.show_more_visible(&self.model),
            active_filter: self.filters.active_filter(),
            query: self.filters.search_query(),
            tags: self.model.all_tags(),
        }
    }

    fn step(&self, scroll_to_top: bool) -> Step<'_> {
        Step {
            frame: self.frame(),
            scroll_to_top,
            subscribe_open: self.subscribe.is_open(),
        }
    }

    fn navigated(&self, transition: Transition) -> Step<'_> {
        if transition == Transition::Ignored {
            debug!(view = %self.nav.current(), "navigation target not found");
        }
        self.step(transition.scrolls_to_top())
    }

    // ---------------------------------------------------------------------
    // Filter and search actions
    // ---------------------------------------------------------------------

    pub fn select_tag(&mut self, tag: &str) -> Step<'_> {
        self.filters.toggle_filter(tag);
        self.step(false)
    }

    pub fn set_query(&mut self, text: &str) -> Step<'_> {
        self.filters.set_search_query(text);
        self.step(false)
    }

    pub fn show_all_posts(&mut self) -> Step<'_> {
        self.filters.show_all_posts();
        self.step(false)
    }

    // ---------------------------------------------------------------------
    // Navigation actions
    // ---------------------------------------------------------------------

    pub fn open_series(&mut self, name: &str) -> Step<'_> {
        let t = self.nav.open_series(&self.model, name);
        self.navigated(t)
    }

    pub fn open_article(&mut self, id: PostId) -> Step<'_> {
        let t = self.nav.open_article(&self.model, id);
        self.navigated(t)
    }

    pub fn open_series_only_view(&mut self) -> Step<'_> {
        let t = self.nav.open_series_only();
        self.navigated(t)
    }

    pub fn go_home(&mut self) -> Step<'_> {
        let t = self.nav.go_home();
        self.navigated(t)
    }

    // ---------------------------------------------------------------------
    // Subscribe prompt
    // ---------------------------------------------------------------------

    pub fn open_subscribe(&mut self) -> Step<'_> {
        self.subscribe.open();
        self.step(false)
    }

    pub fn close_subscribe(&mut self) -> Step<'_> {
        self.subscribe.close();
        self.step(false)
    }

    pub fn click_subscribe(&mut self, target: ClickTarget) -> Step<'_> {
        self.subscribe.click(target);
        self.step(false)
    }

    /// Apply an action in value form.
    pub fn dispatch(&mut self, action: &Action) -> Step<'_> {
        match action {
            Action::SelectTag(tag) => self.select_tag(tag),
            Action::SetQuery(text) => self.set_query(text),
            Action::ShowAllPosts => self.show_all_posts(),
            Action::OpenSeries(name) => self.open_series(name),
            Action::OpenArticle(id) => self.open_article(*id),
            Action::OpenSeriesOnly => self.open_series_only_view(),
            Action::GoHome => self.go_home(),
            Action::OpenSubscribe => self.open_subscribe(),
            Action::CloseSubscribe => self.close_subscribe(),
            Action::Click(target) => self.click_subscribe(*target),
        }
    }

    // ---------------------------------------------------------------------
    // Reloads
    // ---------------------------------------------------------------------

    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        LoadTicket(self.latest_load)
    }

    /// Replace the content with `records` if `ticket` belongs to the most
    /// recently started load. Returns whether the records were applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, records: Vec<RawRecord>) -> bool {
        if ticket.0 != self.latest_load {
            debug!(ticket = ticket.0, latest = self.latest_load, "discarding stale load");
            return false;
        }
        self.model = ContentModel::from_records(records);
        self.nav.revalidate(&self.model);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn field_notes_session() -> Session {
        session_from(vec![
            series_record("Tokyo", "Field Notes", Some("desc A")),
            series_record("Berlin", "Field Notes", None),
            tagged_record("Mornings", "reflection"),
            tagged_record("Books", "books, reflection"),
        ])
    }

    #[test]
    fn initial_frame_is_main() {
        let session = field_notes_session();
        assert_eq!(session.view(), &View::Main);
        assert_eq!(main_titles(&session), vec!["Mornings", "Books"]);
        assert_eq!(frame_series_names(&session), vec!["Field Notes"]);
        match session.frame() {
            Frame::Main { tags, show_more, .. } => {
                assert_eq!(tags, vec!["reflection", "books"]);
                assert!(!show_more);
            }
            other => panic!("unexpected {}", other.name()),
        }
    }

    #[test]
    fn select_tag_reports_active_filter() {
        let mut session = field_notes_session();
        let step = session.select_tag("books");
        assert!(!step.scroll_to_top);
        match step.frame {
            Frame::Main {
                posts,
                active_filter,
                ..
            } => {
                assert_eq!(titles(&posts), vec!["Books"]);
                assert_eq!(active_filter, Some("books"));
            }
            other => panic!("unexpected {}", other.name()),
        }
    }

    #[test]
    fn series_detail_lists_members_in_order() {
        let mut session = field_notes_session();
        let step = session.open_series("Field Notes");
        assert!(step.scroll_to_top);
        match step.frame {
            Frame::SeriesDetail { series, posts } => {
                assert_eq!(series.description, "desc A");
                assert_eq!(titles(&posts), vec!["Tokyo", "Berlin"]);
            }
            other => panic!("unexpected {}", other.name()),
        }
    }

    #[test]
    fn unknown_article_keeps_view() {
        let mut session = field_notes_session();
        session.open_series("Field Notes");
        let step = session.open_article(PostId(999));
        assert!(!step.scroll_to_top);
        assert_eq!(step.frame.name(), "series");
        assert_eq!(session.view(), &View::SeriesDetail("Field Notes".into()));
    }

    #[test]
    fn article_then_home() {
        let mut session = field_notes_session();
        let step = session.open_article(PostId(3));
        match step.frame {
            Frame::Article { post } => assert_eq!(post.title, "Mornings"),
            other => panic!("unexpected {}", other.name()),
        }
        assert!(session.go_home().scroll_to_top);
        assert_eq!(session.view(), &View::Main);
    }

    #[test]
    fn search_applies_to_series_only_view() {
        let mut session = field_notes_session();
        session.open_series_only_view();
        session.set_query("nothing matches");
        assert!(frame_series_names(&session).is_empty());
        session.set_query("berlin");
        assert_eq!(frame_series_names(&session), vec!["Field Notes"]);
    }

    #[test]
    fn filter_state_survives_navigation() {
        let mut session = field_notes_session();
        session.select_tag("books");
        session.open_article(PostId(4));
        session.go_home();
        assert_eq!(main_titles(&session), vec!["Books"]);
    }

    #[test]
    fn subscribe_is_orthogonal_to_navigation() {
        let mut session = field_notes_session();
        session.open_series("Field Notes");
        let step = session.open_subscribe();
        assert!(!step.scroll_to_top);
        assert!(session.subscribe_open());
        assert_eq!(session.view(), &View::SeriesDetail("Field Notes".into()));

        session.click_subscribe(ClickTarget::Content);
        assert!(session.subscribe_open());
        session.click_subscribe(ClickTarget::Outside);
        assert!(!session.subscribe_open());

        session.open_subscribe();
        session.go_home();
        assert!(session.subscribe_open());
        session.close_subscribe();
        assert!(!session.subscribe_open());
    }

    #[test]
    fn dispatch_matches_methods() {
        let mut a = field_notes_session();
        let mut b = field_notes_session();
        let actions = [
            Action::SelectTag("reflection".into()),
            Action::SetQuery("Books".into()),
            Action::OpenSeries("Field Notes".into()),
            Action::OpenArticle(PostId(2)),
        ];
        for action in &actions {
            a.dispatch(action);
        }
        b.select_tag("reflection");
        b.set_query("Books");
        b.open_series("Field Notes");
        b.open_article(PostId(2));
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.filters(), b.filters());
    }

    fn parse(line: &str) -> Result<Action, ActionParseError> {
        line.parse()
    }

    #[test]
    fn parse_actions() {
        assert_eq!(parse("tag travel"), Ok(Action::SelectTag("travel".into())));
        assert_eq!(parse("tag slow living"), Ok(Action::SelectTag("slow living".into())));
        assert_eq!(parse("search"), Ok(Action::SetQuery(String::new())));
        assert_eq!(parse("  search  Berlin "), Ok(Action::SetQuery("Berlin".into())));
        assert_eq!(parse("more"), Ok(Action::ShowAllPosts));
        assert_eq!(
            parse("series Field Notes"),
            Ok(Action::OpenSeries("Field Notes".into()))
        );
        assert_eq!(parse("article 3"), Ok(Action::OpenArticle(PostId(3))));
        assert_eq!(parse("series-only"), Ok(Action::OpenSeriesOnly));
        assert_eq!(parse("home"), Ok(Action::GoHome));
        assert_eq!(parse("subscribe"), Ok(Action::OpenSubscribe));
        assert_eq!(parse("close"), Ok(Action::CloseSubscribe));
        assert_eq!(parse("click outside"), Ok(Action::Click(ClickTarget::Outside)));
        assert_eq!(parse("click inside"), Ok(Action::Click(ClickTarget::Content)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse(""), Err(ActionParseError::Empty));
        assert_eq!(
            parse("dance"),
            Err(ActionParseError::Unknown("dance".into()))
        );
        assert_eq!(
            parse("tag"),
            Err(ActionParseError::MissingArgument("tag"))
        );
        assert_eq!(
            parse("article three"),
            Err(ActionParseError::BadId("three".into()))
        );
        assert_eq!(
            parse("click nowhere"),
            Err(ActionParseError::BadClickTarget("nowhere".into()))
        );
    }

    #[test]
    fn latest_load_wins() {
        let mut session = field_notes_session();
        let first = session.begin_load();
        let second = session.begin_load();

        assert!(session.finish_load(second, vec![record("Newest")]));
        assert!(!session.finish_load(first, vec![record("Stale")]));
        assert_eq!(main_titles(&session), vec!["Newest"]);
    }

    #[test]
    fn reload_resets_unresolvable_view() {
        let mut session = field_notes_session();
        session.open_series("Field Notes");
        let ticket = session.begin_load();
        session.finish_load(ticket, vec![record("No series here")]);
        assert_eq!(session.view(), &View::Main);
    }

    #[test]
    fn reload_keeps_resolvable_view() {
        let mut session = field_notes_session();
        session.open_article(PostId(1));
        let ticket = session.begin_load();
        session.finish_load(ticket, vec![record("Replacement")]);
        assert_eq!(session.view(), &View::ArticleDetail(PostId(1)));
        match session.frame() {
            Frame::Article { post } => assert_eq!(post.title, "Replacement"),
            other => panic!("unexpected {}", other.name()),
        }
    }
}
