//! # Sheet Essays
//!
//! A small essay blog whose content lives in a spreadsheet. Each row is an
//! essay; rows that share a `series` value form a series. Readers browse a
//! grid of standalone essays, filter it by tag or free-text search, open a
//! series or an essay, and can call up a subscribe prompt.
//!
//! # Architecture
//!
//! ```text
//! source     sheet / file / samples  →  Vec<RawRecord>   (never fails)
//! model      Vec<RawRecord>          →  ContentModel     (posts + series index)
//! session    ContentModel + actions  →  Frame            (filters + navigation)
//! render     Frame                   →  HTML
//! generate   Session                 →  dist/            (one page per frame)
//! ```
//!
//! The core (`model`, `engine`, `navigation`, `session`) is synchronous and
//! does no I/O. Every user action is a method on [`session::Session`] that
//! returns the resulting frame; renderers and the text browser are pure
//! projections of that frame.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `RawRecord`, `Post`, `PostId` |
//! | [`model`] | Record normalization, series grouping, lookups |
//! | [`engine`] | Tag filter, search query, "view all" truncation |
//! | [`navigation`] | View state machine and the subscribe prompt |
//! | [`session`] | Context object tying the above together; action parsing; load tickets |
//! | [`source`] | Google Sheets gviz client, local file source, sample fallback |
//! | [`sample`] | Built-in sample essays |
//! | [`config`] | `config.toml` loading, validation, stock config, CSS color variables |
//! | [`naming`] | Slugs for series and tag page names |
//! | [`render`] | Maud templates for every frame |
//! | [`generate`] | Static site writer |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Series Are an Index, Not Owners
//!
//! A post names its series by string; [`model::Series`] holds only post ids
//! in load order. Posts are stored once, and both the standalone grid and the
//! series views borrow from the same vector.
//!
//! ## Loading Never Fails
//!
//! [`source::load`] always returns records. An unconfigured or broken source
//! falls back to the sample essays and reports why in the returned
//! [`source::Origin`], so the site is never empty and the caller decides
//! whether to show the setup notice.
//!
//! ## Static Pages Are Session Frames
//!
//! The generator does not have its own page logic. Each page is the frame a
//! fresh session shows after a short action sequence (`more`, `tag travel`,
//! `article 3`, ...), so the static site and the interactive browser can't
//! drift apart.

pub mod config;
pub mod engine;
pub mod generate;
pub mod model;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod render;
pub mod sample;
pub mod session;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
