//! Built-in sample posts.
//!
//! Shown when no content source is configured or the configured one fails,
//! so a fresh install renders something meaningful. The rows go through the
//! same normalization as sheet rows.

use crate::types::RawRecord;

const FIELD_NOTES: &str = "Field Notes";
const FIELD_NOTES_DESC: &str = "Observations from different cities and states of mind";

struct SampleRow {
    title: &'static str,
    date: &'static str,
    read_time: &'static str,
    excerpt: &'static str,
    content: &'static str,
    tags: &'static str,
    series: Option<(&'static str, &'static str)>,
}

const ROWS: &[SampleRow] = &[
    SampleRow {
        title: "Tokyo at 3am",
        date: "Feb 8, 2026",
        read_time: "3 min read",
        excerpt: "Convenience store fluorescence. A salaryman buying instant ramen. Me, jet-lagged and euphoric.",
        content: "<p>Convenience store fluorescence. A salaryman buying instant ramen and a beer. \
Two teenagers laughing over their phones. Me, jet-lagged and euphoric, pretending to read the \
labels on drinks I can't understand.</p>\n\n\
<p>There's something about being in a foreign place at an hour when you should be sleeping that \
makes everything feel significant.</p>\n\n\
<h2>What I'm Noticing</h2>\n\n\
<p>How quiet people are here, even in crowds. How the subway platforms feel more orderly than a \
library back home. How lost feels different when you can't read the signs, not scary but \
<em>sharpening</em>.</p>",
        tags: "travel, observation",
        series: Some((FIELD_NOTES, FIELD_NOTES_DESC)),
    },
    SampleRow {
        title: "Berlin in Winter",
        date: "Feb 1, 2026",
        read_time: "4 min read",
        excerpt: "Grey skies, cold wind, and the best coffee I've ever had from a window the size of a shoebox.",
        content: "<p>Grey skies, cold wind, and the best coffee I've ever had from a window the size \
of a shoebox. Berlin in February feels like the city is daring you to find beauty in the \
bleakness.</p>\n\n\
<p>And you do. In the graffiti that covers everything. In the way people bike in the rain like \
it's nothing. In the <em>sp\u{e4}ti</em> on every corner, open until whenever.</p>\n\n\
<h2>The Pace</h2>\n\n\
<p>Nobody rushes here. Or maybe they do, but differently. There's an efficiency that doesn't \
feel frantic.</p>",
        tags: "travel, observation",
        series: Some((FIELD_NOTES, FIELD_NOTES_DESC)),
    },
    SampleRow {
        title: "On Slow Mornings",
        date: "Jan 28, 2026",
        read_time: "3 min read",
        excerpt: "There's something sacred about the first hour of the day, before the world rushes in.",
        content: "<p>There's something sacred about the first hour of the day, before the world \
rushes in with its demands and notifications. I've been experimenting with a different \
relationship to morning.</p>\n\n\
<p>For the past month, I've been waking up without an alarm and spending that first hour doing \
exactly nothing productive. Coffee, yes. Staring out the window, absolutely.</p>\n\n\
<h2>What Changed</h2>\n\n\
<p>The interesting thing isn't what I'm doing differently, it's what's happening to the rest of \
my day. There's this quality of <em>spaciousness</em> that carries through.</p>",
        tags: "reflection, slow living",
        series: None,
    },
    SampleRow {
        title: "The Books That Broke Me Open",
        date: "Jan 20, 2026",
        read_time: "5 min read",
        excerpt: "Every few years, a book comes along that fundamentally shifts how I see the world.",
        content: "<p>Every few years, a book comes along that fundamentally shifts how I see the \
world. Not in a dramatic, overnight way; more like a slow rewiring.</p>\n\n\
<h2>1. The Rings of Saturn by W.G. Sebald</h2>\n\n\
<p>This book taught me that narrative doesn't have to be linear, that digression can be the \
entire point.</p>\n\n\
<h2>2. Bluets by Maggie Nelson</h2>\n\n\
<p>A meditation on the color blue and on heartbreak, structured as numbered fragments. It's \
formally <em>strange</em> and emotionally devastating.</p>",
        tags: "books, reflection",
        series: None,
    },
];

/// The sample posts as raw records, in display order.
pub fn records() -> Vec<RawRecord> {
    ROWS.iter()
        .map(|row| RawRecord {
            title: Some(row.title.to_string()),
            date: Some(row.date.to_string()),
            read_time: Some(row.read_time.to_string()),
            excerpt: Some(row.excerpt.to_string()),
            content: Some(row.content.to_string()),
            tags: Some(row.tags.to_string()),
            series: row.series.map(|(name, _)| name.to_string()),
            series_description: row.series.map(|(_, desc)| desc.to_string()),
            image_url: None,
        })
        .collect()
}
