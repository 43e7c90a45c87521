//! HTML rendering of session frames.
//!
//! Every function here is a pure projection of a [`Frame`] (plus the site
//! chrome) into markup; nothing feeds back into the session.
//!
//! ## Pages
//!
//! - **Main**: tag filter bar, standalone essay grid, "view all" link when
//!   the grid is truncated, series grid.
//! - **Series only**: the series grid by itself.
//! - **Series detail**: series title, description, member essays.
//! - **Article**: meta line, title, tags, series badge, body.
//!
//! All pages share the header (home / series / subscribe), the optional
//! setup notice, and the subscribe prompt. The prompt is a `:target` modal:
//! it opens on `#subscribe`, and its backdrop is a link that closes it, so
//! a click outside the content box dismisses it without any script.
//!
//! ## Links
//!
//! The static site is flat, so every link is a sibling file; see [`Links`].
//!
//! Uses [maud](https://maud.lambda.xyz/); all interpolated text is escaped.
//! Post bodies are markdown or raw HTML and go through pulldown-cmark, which
//! passes HTML through untouched.

use crate::config::SiteMeta;
use crate::model::{ContentModel, Series};
use crate::naming::SlugTable;
use crate::session::Frame;
use crate::types::{Post, PostId};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

pub const CSS_STATIC: &str = include_str!("../static/style.css");

/// File names of every page in the static site.
#[derive(Debug, Clone)]
pub struct Links {
    series: SlugTable,
    tags: SlugTable,
}

impl Links {
    pub const HOME: &'static str = "index.html";
    pub const ALL_POSTS: &'static str = "all.html";
    pub const SERIES_INDEX: &'static str = "series.html";

    pub fn for_model(model: &ContentModel) -> Self {
        Links {
            series: SlugTable::from_names(model.series().iter().map(|s| s.name.as_str())),
            tags: SlugTable::from_names(model.all_tags()),
        }
    }

    pub fn series(&self, name: &str) -> String {
        format!("series-{}.html", self.series.get(name).unwrap_or("untitled"))
    }

    pub fn tag(&self, tag: &str) -> String {
        format!("tag-{}.html", self.tags.get(tag).unwrap_or("untitled"))
    }

    pub fn article(id: PostId) -> String {
        format!("essay-{id}.html")
    }
}

/// Site-wide pieces shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub site: &'a SiteMeta,
    pub css: &'a str,
    /// Show the "connect your sheet" banner.
    pub setup_notice: bool,
    /// Render the subscribe prompt already open.
    pub subscribe_open: bool,
}

/// Render whichever page the frame describes.
pub fn render_frame(frame: &Frame<'_>, chrome: &Chrome<'_>, links: &Links) -> Markup {
    match frame {
        Frame::Main {
            posts,
            series,
            show_more,
            active_filter,
            query,
            tags,
        } => render_main(
            &MainView {
                posts,
                series,
                show_more: *show_more,
                active_filter: *active_filter,
                query: *query,
                tags,
            },
            chrome,
            links,
        ),
        Frame::SeriesOnly { series } => render_series_only(series, chrome, links),
        Frame::SeriesDetail { series, posts } => render_series_detail(series, posts, chrome),
        Frame::Article { post } => render_article(post, chrome, links),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, chrome: &Chrome<'_>, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(chrome.css)) }
            }
            body class=[body_class] {
                (site_header(chrome.site, body_class))
                @if chrome.setup_notice {
                    (setup_notice())
                }
                (content)
                (subscribe_modal(chrome.site, chrome.subscribe_open))
            }
        }
    }
}

/// Site title plus the home / series / subscribe navigation.
fn site_header(site: &SiteMeta, current: Option<&str>) -> Markup {
    let series_current = current == Some("series-only-view");
    html! {
        header.site-header {
            a.site-title href=(Links::HOME) { (site.title) }
            @if !site.tagline.is_empty() {
                p.site-tagline { (site.tagline) }
            }
            nav.site-nav {
                a.nav-link href=(Links::HOME) { "Essays" }
                a.nav-link.active[series_current] href=(Links::SERIES_INDEX) { "Series" }
                a.nav-link.subscribe-link href="#subscribe" { "Subscribe" }
            }
        }
    }
}

fn setup_notice() -> Markup {
    html! {
        div.config-notice role="note" {
            strong { "Showing sample essays. " }
            "Set " code { "source.sheet_id" } " or " code { "source.file" }
            " in config.toml to publish your own."
        }
    }
}

fn subscribe_modal(site: &SiteMeta, open: bool) -> Markup {
    html! {
        div.modal.active[open] id="subscribe" {
            a.modal-backdrop href="#" aria-label="Close" {}
            div.modal-content role="dialog" aria-labelledby="subscribe-title" {
                a.modal-close href="#" { "\u{d7}" }
                h2 id="subscribe-title" { "Subscribe" }
                p { "New essays in your inbox, a few times a month." }
                @if let Some(url) = &site.subscribe_url {
                    form.subscribe-form action=(url) method="post" {
                        input type="email" name="email" placeholder="you@example.com" required;
                        button type="submit" { "Subscribe" }
                    }
                }
            }
        }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            div.post-tags {
                @for tag in tags {
                    span.tag { (tag) }
                }
            }
        }
    }
}

/// A clickable essay card. Series detail cards never show the cover image.
fn post_card(post: &Post, with_image: bool) -> Markup {
    html! {
        a.post-card href=(Links::article(post.id)) {
            @if with_image {
                @if let Some(src) = &post.image_url {
                    div.post-image-container {
                        img.post-image src=(src) alt=(post.title) loading="lazy";
                    }
                }
            }
            div.post-content {
                div.post-meta { (post.meta_line()) }
                h2.post-title { (post.title) }
                p.post-excerpt { (post.excerpt) }
                (tag_list(&post.tags))
                span.read-more { "Read Essay" }
            }
        }
    }
}

fn essay_count(n: usize) -> String {
    if n == 1 {
        "1 essay".to_string()
    } else {
        format!("{n} essays")
    }
}

fn series_grid(series: &[&Series], links: &Links) -> Markup {
    html! {
        div.series-grid {
            @for s in series {
                a.series-card href=(links.series(&s.name)) {
                    div {
                        div.series-meta { "Essay Series" }
                        h2.series-title { (s.name) }
                        p.series-description { (s.description) }
                    }
                    div {
                        div.series-count { (essay_count(s.posts.len())) }
                        span.read-more { "View Series" }
                    }
                }
            }
        }
    }
}

fn filter_bar(tags: &[&str], active: Option<&str>, links: &Links) -> Markup {
    html! {
        @if !tags.is_empty() {
            nav.filters aria-label="Filter by tag" {
                @for tag in tags {
                    @let is_active = active == Some(*tag);
                    // Selecting the active tag again clears the filter.
                    @let href = if is_active { Links::HOME.to_string() } else { links.tag(tag) };
                    a.filter-tag.active[is_active] href=(href) { (tag) }
                }
            }
        }
    }
}

/// Markdown (or raw HTML) body to HTML.
pub fn content_html(content: &str) -> String {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Borrowed contents of a main frame.
pub struct MainView<'f, 'a> {
    pub posts: &'f [&'a Post],
    pub series: &'f [&'a Series],
    pub show_more: bool,
    pub active_filter: Option<&'a str>,
    pub query: &'a str,
    pub tags: &'f [&'a str],
}

/// Home page: filters, standalone grid, series grid.
pub fn render_main(view: &MainView<'_, '_>, chrome: &Chrome<'_>, links: &Links) -> Markup {
    let content = html! {
        main.posts-list {
            (filter_bar(view.tags, view.active_filter, links))
            @if !view.query.is_empty() {
                p.search-summary { "Results for \u{201c}" (view.query) "\u{201d}" }
                p.search-hint {
                    "Search isn't available on the published site. Run "
                    code { "sheet-essays browse" }
                    " and type "
                    code { "search <text>" }
                    " to search."
                }
            }
            section.standalone-section {
                @if view.posts.is_empty() {
                    div.no-results {
                        div.no-results-title { "No essays found" }
                        div.no-results-text { "Try adjusting your search or filters" }
                    }
                } @else {
                    div.posts-grid {
                        @for post in view.posts {
                            (post_card(post, true))
                        }
                    }
                }
                @if view.show_more {
                    div.view-all-container {
                        a.view-all href=(Links::ALL_POSTS) { "View All Essays" }
                    }
                }
            }
            @if !view.series.is_empty() {
                section.series-section {
                    h2.section-title { "Series" }
                    (series_grid(view.series, links))
                }
            }
        }
    };
    base_document(&chrome.site.title, chrome, None, content)
}

/// Series grid alone.
pub fn render_series_only(series: &[&Series], chrome: &Chrome<'_>, links: &Links) -> Markup {
    let content = html! {
        main.posts-list {
            section.series-section {
                h1.section-title { "Series" }
                @if series.is_empty() {
                    div.no-results {
                        div.no-results-title { "No series found" }
                    }
                } @else {
                    (series_grid(series, links))
                }
            }
        }
    };
    let title = format!("Series \u{b7} {}", chrome.site.title);
    base_document(&title, chrome, Some("series-only-view"), content)
}

pub fn render_series_detail(series: &Series, posts: &[&Post], chrome: &Chrome<'_>) -> Markup {
    let content = html! {
        main.series-view {
            a.back-link href=(Links::HOME) { "\u{2190} Back to essays" }
            header.series-header {
                div.series-meta { "Essay Series \u{b7} " (essay_count(posts.len())) }
                h1.series-view-title { (series.name) }
                @if !series.description.is_empty() {
                    p.series-view-description { (series.description) }
                }
            }
            div.posts-grid {
                @for post in posts {
                    (post_card(post, false))
                }
            }
        }
    };
    let title = format!("{} \u{b7} {}", series.name, chrome.site.title);
    base_document(&title, chrome, Some("series-detail-view"), content)
}

pub fn render_article(post: &Post, chrome: &Chrome<'_>, links: &Links) -> Markup {
    let body = content_html(&post.content);
    let content = html! {
        main.article-view {
            a.back-link href=(Links::HOME) { "\u{2190} Back to essays" }
            article {
                header.article-header {
                    @if let Some(series) = &post.series {
                        a.series-badge href=(links.series(series)) { (series) }
                    }
                    div.article-meta { (post.meta_line()) }
                    h1.article-title { (post.title) }
                    (tag_list(&post.tags))
                }
                @if let Some(src) = &post.image_url {
                    img.article-image src=(src) alt=(post.title);
                }
                div.article-content {
                    (PreEscaped(body))
                }
            }
        }
    };
    let title = format!("{} \u{b7} {}", post.title, chrome.site.title);
    base_document(&title, chrome, Some("article-view"), content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::test_helpers::*;
    use crate::types::RawRecord;

    fn chrome(site: &SiteMeta) -> Chrome<'_> {
        Chrome {
            site,
            css: "body {}",
            setup_notice: false,
            subscribe_open: false,
        }
    }

    fn render(session: &Session, chrome: &Chrome<'_>) -> String {
        let links = Links::for_model(session.model());
        render_frame(&session.frame(), chrome, &links).into_string()
    }

    fn sample_session() -> Session {
        session_from(vec![
            series_record("Tokyo", "Field Notes", Some("Cities")),
            RawRecord {
                image_url: Some("https://img.example/m.jpg".into()),
                ..full_record("Mornings", "reflection, slow living")
            },
            full_record("Books", "books"),
        ])
    }

    #[test]
    fn base_document_includes_doctype_and_title() {
        let site = SiteMeta::default();
        let html = render(&sample_session(), &chrome(&site));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Essays</title>"));
    }

    #[test]
    fn main_page_lists_standalone_posts_and_series() {
        let site = SiteMeta::default();
        let html = render(&sample_session(), &chrome(&site));
        assert!(html.contains("Mornings"));
        assert!(html.contains("Books"));
        assert!(html.contains(r#"href="essay-2.html""#));
        assert!(html.contains("series-card"));
        assert!(html.contains(r#"href="series-field-notes.html""#));
        assert!(html.contains("1 essay"));
        assert!(!html.contains("View All Essays"));
    }

    #[test]
    fn main_page_filter_bar_links() {
        let site = SiteMeta::default();
        let mut session = sample_session();
        session.select_tag("books");
        let html = render(&session, &chrome(&site));
        assert!(html.contains(r#"href="tag-slow-living.html""#));
        // The active tag links home, which clears it.
        assert!(html.contains(r#"class="filter-tag active""#));
        assert!(!html.contains("tag-books.html"));
    }

    #[test]
    fn cover_image_only_when_present() {
        let site = SiteMeta::default();
        let html = render(&sample_session(), &chrome(&site));
        assert_eq!(html.matches("post-image-container").count(), 1);
        assert!(html.contains("https://img.example/m.jpg"));
    }

    #[test]
    fn empty_grid_shows_no_results() {
        let site = SiteMeta::default();
        let mut session = sample_session();
        session.set_query("zzz");
        let html = render(&session, &chrome(&site));
        assert!(html.contains("No essays found"));
        assert!(html.contains("Results for"));
        assert!(!html.contains("series-section"));
    }

    #[test]
    fn search_hint_points_at_browse() {
        let site = SiteMeta::default();
        let mut session = sample_session();
        let html = render(&session, &chrome(&site));
        assert!(!html.contains("search-hint"));

        session.set_query("tokyo");
        let html = render(&session, &chrome(&site));
        assert!(html.contains("search-hint"));
        assert!(html.contains("<code>sheet-essays browse</code>"));
        assert!(html.contains("<code>search &lt;text&gt;</code>"));
    }

    #[test]
    fn show_more_link_when_truncated() {
        let site = SiteMeta::default();
        let session = session_from(numbered_records(7));
        let html = render(&session, &chrome(&site));
        assert!(html.contains("View All Essays"));
        assert!(html.contains(r#"href="all.html""#));
    }

    #[test]
    fn series_detail_page() {
        let site = SiteMeta::default();
        let mut session = sample_session();
        session.open_series("Field Notes");
        let html = render(&session, &chrome(&site));
        assert!(html.contains("<title>Field Notes \u{b7} Essays</title>"));
        assert!(html.contains("Cities"));
        assert!(html.contains(r#"href="essay-1.html""#));
        assert!(html.contains("Back to essays"));
    }

    #[test]
    fn series_only_page_marks_nav() {
        let site = SiteMeta::default();
        let mut session = sample_session();
        session.open_series_only_view();
        let html = render(&session, &chrome(&site));
        assert!(html.contains(r#"class="nav-link active""#));
        assert!(!html.contains("posts-grid"));
    }

    #[test]
    fn article_page_renders_body_and_badge() {
        let site = SiteMeta::default();
        let mut session = sample_session();
        session.open_article(PostId(1));
        let html = render(&session, &chrome(&site));
        assert!(html.contains("series-badge"));
        assert!(html.contains(r#"href="series-field-notes.html""#));

        session.open_article(PostId(2));
        let html = render(&session, &chrome(&site));
        assert!(html.contains("<p>Mornings body</p>"));
        assert!(!html.contains("series-badge"));
        assert!(html.contains("Jan 1, 2026 \u{b7} 3 min read"));
    }

    #[test]
    fn content_html_converts_markdown_and_keeps_html() {
        assert!(content_html("This is **bold**.").contains("<strong>bold</strong>"));
        assert!(content_html("<p>Raw <em>html</em></p>").contains("<p>Raw <em>html</em></p>"));
    }

    #[test]
    fn setup_notice_and_subscribe_state() {
        let site = SiteMeta {
            subscribe_url: Some("https://example.com/sub".into()),
            ..SiteMeta::default()
        };
        let mut c = chrome(&site);
        let html = render(&sample_session(), &c);
        assert!(!html.contains("config-notice"));
        assert!(html.contains(r#"class="modal""#));
        assert!(html.contains(r#"action="https://example.com/sub""#));

        c.setup_notice = true;
        c.subscribe_open = true;
        let html = render(&sample_session(), &c);
        assert!(html.contains("config-notice"));
        assert!(html.contains(r#"class="modal active""#));
    }

    #[test]
    fn titles_are_escaped() {
        let site = SiteMeta::default();
        let session = session_from(vec![record("<script>alert('x')</script>")]);
        let html = render(&session, &chrome(&site));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn essay_count_pluralizes() {
        assert_eq!(essay_count(1), "1 essay");
        assert_eq!(essay_count(0), "0 essays");
        assert_eq!(essay_count(3), "3 essays");
    }
}
