//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every essay and series is shown by its identity first (positional index
//! and title), with dates, tags and descriptions as indented context lines.
//! The same entity looks the same in `check`, `browse` and `build`.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Source
//!     Google Sheet 1AbC...
//!
//! Essays
//! 001 Tokyo at 3am
//!     Feb 8, 2026 · 3 min read
//!     Series: Field Notes
//!     Tags: travel, observation
//!
//! Series
//! 001 Field Notes (2 essays)
//!     Observations from different cities and states of mind
//!
//! Loaded 4 essays, 1 series
//! ```
//!
//! ## Browse
//!
//! ```text
//! [main] tag: travel
//! Essays
//! 001 Tokyo at 3am (#1)
//!     Convenience store fluorescence...
//! Series
//! 001 Field Notes (2 essays)
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Field Notes → series-field-notes.html
//! 001 Tokyo at 3am → essay-1.html
//!
//! Generated 13 pages: 4 essays, 1 series, 5 tags
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::generate::GenerateSummary;
use crate::model::{ContentModel, Series};
use crate::render::Links;
use crate::session::{Frame, Step};
use crate::source::Origin;
use crate::types::Post;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// ```text
/// 001 Field Notes (2 essays)
/// ```
fn series_header(index: usize, series: &Series) -> String {
    format!(
        "{} {} ({})",
        format_index(index),
        series.name,
        plural(series.posts.len(), "essay", "essays")
    )
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Collapse HTML content to one line of plain text.
fn plain_text(html: &str) -> String {
    strip_html_tags(html)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Context lines shared by every listing of a post.
fn post_context(post: &Post, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    let mut lines = Vec::new();
    let meta = post.meta_line();
    if !meta.is_empty() {
        lines.push(format!("{pad}{meta}"));
    }
    if let Some(series) = &post.series {
        lines.push(format!("{pad}Series: {series}"));
    }
    if !post.tags.is_empty() {
        lines.push(format!("{pad}Tags: {}", post.tags.join(", ")));
    }
    lines
}

// ============================================================================
// check
// ============================================================================

/// Content inventory: where it came from, every essay, every series.
pub fn format_check_output(model: &ContentModel, origin: &Origin) -> Vec<String> {
    let mut lines = vec!["Source".to_string(), format!("{}{}", indent(1), origin)];

    lines.push(String::new());
    lines.push("Essays".to_string());
    for (i, post) in model.posts().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), post.title));
        lines.extend(post_context(post, 1));
    }

    if !model.series().is_empty() {
        lines.push(String::new());
        lines.push("Series".to_string());
        for (i, series) in model.series().iter().enumerate() {
            lines.push(series_header(i + 1, series));
            if !series.description.is_empty() {
                lines.push(format!("{}{}", indent(1), series.description));
            }
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Loaded {}, {}",
        plural(model.posts().len(), "essay", "essays"),
        plural(model.series().len(), "series", "series")
    );
    if model.rejected() > 0 {
        summary.push_str(&format!(
            " ({} without a title skipped)",
            plural(model.rejected(), "row", "rows")
        ));
    }
    lines.push(summary);
    lines
}

pub fn print_check_output(model: &ContentModel, origin: &Origin) {
    for line in format_check_output(model, origin) {
        println!("{}", line);
    }
}

// ============================================================================
// browse
// ============================================================================

const EXCERPT_WIDTH: usize = 72;
const BODY_WIDTH: usize = 240;

/// Text rendering of one step of a browsing session.
pub fn format_step(step: &Step<'_>) -> Vec<String> {
    let mut lines = format_frame(&step.frame);
    if step.scroll_to_top {
        lines.push("(scrolled to top)".to_string());
    }
    if step.subscribe_open {
        lines.push("[subscribe prompt open]".to_string());
    }
    lines
}

pub fn format_frame(frame: &Frame<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    match frame {
        Frame::Main {
            posts,
            series,
            show_more,
            active_filter,
            query,
            ..
        } => {
            let mut header = "[main]".to_string();
            if let Some(tag) = active_filter {
                header.push_str(&format!(" tag: {tag}"));
            }
            if !query.is_empty() {
                header.push_str(&format!(" search: \"{query}\""));
            }
            lines.push(header);
            lines.push("Essays".to_string());
            if posts.is_empty() {
                lines.push(format!("{}No essays found", indent(1)));
            }
            for (i, post) in posts.iter().enumerate() {
                lines.push(format!("{} {} (#{})", format_index(i + 1), post.title, post.id));
                if !post.excerpt.is_empty() {
                    lines.push(format!("{}{}", indent(1), truncate_desc(&post.excerpt, EXCERPT_WIDTH)));
                }
            }
            if *show_more {
                lines.push(format!("{}(more: view all essays)", indent(1)));
            }
            if !series.is_empty() {
                lines.push("Series".to_string());
                for (i, s) in series.iter().enumerate() {
                    lines.push(series_header(i + 1, s));
                }
            }
        }
        Frame::SeriesOnly { series } => {
            lines.push("[series-only]".to_string());
            for (i, s) in series.iter().enumerate() {
                lines.push(series_header(i + 1, s));
                if !s.description.is_empty() {
                    lines.push(format!("{}{}", indent(1), truncate_desc(&s.description, EXCERPT_WIDTH)));
                }
            }
        }
        Frame::SeriesDetail { series, posts } => {
            lines.push(format!("[series] {}", series.name));
            if !series.description.is_empty() {
                lines.push(format!("{}{}", indent(1), series.description));
            }
            for (i, post) in posts.iter().enumerate() {
                lines.push(format!("{} {} (#{})", format_index(i + 1), post.title, post.id));
                let meta = post.meta_line();
                if !meta.is_empty() {
                    lines.push(format!("{}{}", indent(1), meta));
                }
            }
        }
        Frame::Article { post } => {
            lines.push(format!("[article] #{} {}", post.id, post.title));
            lines.extend(post_context(post, 1));
            let body = plain_text(&post.content);
            if !body.is_empty() {
                lines.push(String::new());
                lines.push(format!("{}{}", indent(1), truncate_desc(&body, BODY_WIDTH)));
            }
        }
    }
    lines
}

pub fn print_step(step: &Step<'_>) {
    for line in format_step(step) {
        println!("{}", line);
    }
}

pub fn print_frame(frame: &Frame<'_>) {
    for line in format_frame(frame) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Page inventory of a generated site, entity first, file second.
pub fn format_generate_output(model: &ContentModel, summary: &GenerateSummary) -> Vec<String> {
    let links = Links::for_model(model);
    let mut lines = vec![
        format!("Home → {}", Links::HOME),
        format!("All essays → {}", Links::ALL_POSTS),
        format!("Series → {}", Links::SERIES_INDEX),
    ];

    let tags = model.all_tags();
    if !tags.is_empty() {
        lines.push(String::new());
        lines.push("Tags".to_string());
        for (i, tag) in tags.iter().enumerate() {
            lines.push(format!("{} {} → {}", format_index(i + 1), tag, links.tag(tag)));
        }
    }

    if !model.series().is_empty() {
        lines.push(String::new());
        lines.push("Series".to_string());
        for (i, series) in model.series().iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                series.name,
                links.series(&series.name)
            ));
        }
    }

    if !model.posts().is_empty() {
        lines.push(String::new());
        lines.push("Essays".to_string());
        for (i, post) in model.posts().iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                post.title,
                Links::article(post.id)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}: {}, {}, {}",
        plural(summary.total(), "page", "pages"),
        plural(summary.essay_pages, "essay", "essays"),
        plural(summary.series_pages, "series", "series"),
        plural(summary.tag_pages, "tag", "tags"),
    ));
    lines
}

pub fn print_generate_output(model: &ContentModel, summary: &GenerateSummary) {
    for line in format_generate_output(model, summary) {
        println!("{}", line);
    }
}
