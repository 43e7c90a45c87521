//! Static site generation.
//!
//! Every page is a frame of a [`Session`] after a short action sequence, so
//! the site shows exactly what an interactive reader would see.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Main view: first 6 standalone essays + series
//! ├── all.html                   # Main view after "View All Essays"
//! ├── tag-{slug}.html            # Main view with one tag filter active
//! ├── series.html                # Series-only view
//! ├── series-{slug}.html         # One page per series
//! ├── essay-{id}.html            # One page per essay
//! └── content.json               # The normalized content model
//! ```
//!
//! The layout is flat so every link is relative and the site works from any
//! directory, including `file://`.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and prefixed with the
//! color variables generated from `config.toml`.

use crate::config::{self, SiteConfig};
use crate::render::{self, CSS_STATIC, Chrome, Links};
use crate::session::Session;
use maud::Markup;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Page counts written by [`generate`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// `index.html`, `all.html` and `series.html`.
    pub views: usize,
    pub tag_pages: usize,
    pub series_pages: usize,
    pub essay_pages: usize,
}

impl GenerateSummary {
    pub fn total(&self) -> usize {
        self.views + self.tag_pages + self.series_pages + self.essay_pages
    }
}

/// Write the whole site for `session` into `output_dir`.
///
/// The session is used as the starting state for every page and is not
/// modified.
pub fn generate(
    session: &Session,
    config: &SiteConfig,
    setup_notice: bool,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    let chrome = Chrome {
        site: &config.site,
        css: &css,
        setup_notice,
        subscribe_open: false,
    };
    let model = session.model();
    let links = Links::for_model(model);
    let mut summary = GenerateSummary::default();

    write_page(output_dir, Links::HOME, render_after(session, &chrome, &links, |s| {
        s.go_home();
    }))?;
    write_page(output_dir, Links::ALL_POSTS, render_after(session, &chrome, &links, |s| {
        s.go_home();
        s.show_all_posts();
    }))?;
    write_page(output_dir, Links::SERIES_INDEX, render_after(session, &chrome, &links, |s| {
        s.open_series_only_view();
    }))?;
    summary.views = 3;

    for tag in model.all_tags() {
        let html = render_after(session, &chrome, &links, |s| {
            s.go_home();
            if s.filters().active_filter() != Some(tag) {
                s.select_tag(tag);
            }
        });
        write_page(output_dir, &links.tag(tag), html)?;
        summary.tag_pages += 1;
    }

    for series in model.series() {
        let html = render_after(session, &chrome, &links, |s| {
            s.open_series(&series.name);
        });
        write_page(output_dir, &links.series(&series.name), html)?;
        summary.series_pages += 1;
    }

    for post in model.posts() {
        let html = render_after(session, &chrome, &links, |s| {
            s.open_article(post.id);
        });
        write_page(output_dir, &Links::article(post.id), html)?;
        summary.essay_pages += 1;
    }

    let json = serde_json::to_string_pretty(model)?;
    fs::write(output_dir.join("content.json"), json)?;

    info!(
        pages = summary.total(),
        output = %output_dir.display(),
        "site generated"
    );
    Ok(summary)
}

/// Render the frame a copy of `session` shows after `act`.
fn render_after(
    session: &Session,
    chrome: &Chrome<'_>,
    links: &Links,
    act: impl FnOnce(&mut Session),
) -> Markup {
    let mut s = session.clone();
    act(&mut s);
    render::render_frame(&s.frame(), chrome, links)
}

fn write_page(output_dir: &Path, name: &str, markup: Markup) -> Result<(), GenerateError> {
    debug!(page = name, "writing");
    fs::write(output_dir.join(name), markup.into_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn build(session: &Session) -> (TempDir, GenerateSummary) {
        let tmp = TempDir::new().unwrap();
        let summary = generate(session, &SiteConfig::default(), false, tmp.path()).unwrap();
        (tmp, summary)
    }

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn writes_every_page_for_sample_content() {
        let session = Session::new(crate::model::ContentModel::from_records(sample::records()));
        let (tmp, summary) = build(&session);

        assert_eq!(summary.views, 3);
        assert_eq!(summary.series_pages, 1);
        assert_eq!(summary.essay_pages, 4);
        // travel, observation, reflection, slow living, books
        assert_eq!(summary.tag_pages, 5);
        assert_eq!(summary.total(), 13);

        for name in [
            "index.html",
            "all.html",
            "series.html",
            "series-field-notes.html",
            "essay-1.html",
            "essay-4.html",
            "tag-slow-living.html",
            "content.json",
        ] {
            assert!(tmp.path().join(name).exists(), "missing {name}");
        }
    }

    #[test]
    fn index_is_truncated_and_all_is_not() {
        let session = session_from(numbered_records(8));
        let (tmp, _) = build(&session);

        let index = read(&tmp, "index.html");
        assert!(index.contains("essay-6.html"));
        assert!(!index.contains("essay-7.html"));
        assert!(index.contains("View All Essays"));

        let all = read(&tmp, "all.html");
        assert!(all.contains("essay-8.html"));
        assert!(!all.contains("View All Essays"));
    }

    #[test]
    fn tag_page_shows_only_tagged_posts() {
        let session = session_from(vec![
            full_record("A", "travel"),
            full_record("B", "travel"),
            full_record("C", "books"),
        ]);
        let (tmp, _) = build(&session);
        let page = read(&tmp, "tag-travel.html");
        assert!(page.contains("essay-1.html"));
        assert!(page.contains("essay-2.html"));
        assert!(!page.contains("essay-3.html"));
        assert!(page.contains(r#"class="filter-tag active""#));
    }

    #[test]
    fn pages_embed_color_variables() {
        let session = session_from(vec![record("Only")]);
        let (tmp, _) = build(&session);
        let index = read(&tmp, "index.html");
        assert!(index.contains("--color-bg: #faf8f5"));
        assert!(index.contains(".posts-grid"));
    }

    #[test]
    fn content_json_lists_posts() {
        let session = session_from(vec![record("First"), series_record("Second", "S", None)]);
        let (tmp, _) = build(&session);
        let value: serde_json::Value = serde_json::from_str(&read(&tmp, "content.json")).unwrap();
        assert_eq!(value["posts"].as_array().unwrap().len(), 2);
        assert_eq!(value["posts"][1]["series"], "S");
        assert_eq!(value["series"][0]["posts"][0], 2);
    }

    #[test]
    fn source_session_is_untouched() {
        let mut session = session_from(numbered_records(3));
        session.open_article(crate::types::PostId(2));
        let before = session.view().clone();
        build(&session);
        assert_eq!(session.view(), &before);
    }

    #[test]
    fn setup_notice_reaches_pages() {
        let session = session_from(vec![record("Only")]);
        let tmp = TempDir::new().unwrap();
        generate(&session, &SiteConfig::default(), true, tmp.path()).unwrap();
        assert!(read(&tmp, "essay-1.html").contains("config-notice"));
    }

    #[test]
    fn empty_model_still_writes_views() {
        let session = session_from(vec![]);
        let (tmp, summary) = build(&session);
        assert_eq!(summary.total(), 3);
        assert!(read(&tmp, "index.html").contains("No essays found"));
    }
}
