//! URL slugs for series names and tags.
//!
//! Series and tags are free text from the sheet ("Field Notes",
//! "slow living"), but the static site needs file names for them. Slugs are
//! lowercase ASCII alphanumerics joined by single dashes:
//!
//! - `"Field Notes"` → `field-notes`
//! - `"slow living"` → `slow-living`
//! - `"Späti & Co."` → `sp-ti-co`
//! - `"???"` → `untitled`
//!
//! Tags are matched exactly, so `"Travel"` and `"travel"` are different tags
//! that slugify the same; [`SlugTable`] hands out `travel`, `travel-2`, … to
//! keep every page distinct.

use std::collections::{BTreeMap, BTreeSet};

/// Lowercase, replace runs of non-alphanumerics with one dash, trim dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Assigns each distinct name a unique slug, first come first served.
#[derive(Debug, Default, Clone)]
pub struct SlugTable {
    by_name: BTreeMap<String, String>,
    taken: BTreeSet<String>,
}

impl SlugTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from names in order; earlier names get the plain slug.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::new();
        for name in names {
            table.insert(name);
        }
        table
    }

    /// The slug for `name`, assigning a fresh one on first sight.
    pub fn insert(&mut self, name: &str) -> &str {
        if !self.by_name.contains_key(name) {
            let base = slugify(name);
            let mut candidate = base.clone();
            let mut n = 2;
            while self.taken.contains(&candidate) {
                candidate = format!("{base}-{n}");
                n += 1;
            }
            self.taken.insert(candidate.clone());
            self.by_name.insert(name.to_string(), candidate);
        }
        &self.by_name[name]
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }
}
