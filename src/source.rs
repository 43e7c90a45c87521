//! Content source adapter.
//!
//! Posts live in a Google Sheet, one row per essay. The sheet is read
//! through its "gviz" query endpoint, which answers with a JavaScript
//! callback wrapping a JSON table:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"status":"ok","table":{"rows":[{"c":[{"v":"Tokyo at 3am"},null,…]}]}});
//! ```
//!
//! The same payload saved to disk (wrapped or bare) can be used instead of
//! the network via `source.file`.
//!
//! Loading never fails: [`load`] falls back to the built-in sample posts when
//! no source is configured or the configured one cannot be read, and reports
//! which of the two happened through [`Origin`].

use crate::config::SourceConfig;
use crate::sample;
use crate::types::RawRecord;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const GVIZ_BASE: &str = "https://docs.google.com/spreadsheets/d";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid sheet URL: {0}")]
    Url(String),
    #[error("response is not a gviz payload")]
    Envelope,
    #[error("sheet query failed: {0}")]
    Query(String),
}

/// Anything that can produce the ordered list of raw rows.
pub trait ContentSource {
    fn load_records(&self) -> Result<Vec<RawRecord>, SourceError>;
}

/// A published Google Sheet read over HTTP.
#[derive(Debug, Clone)]
pub struct SheetSource {
    pub sheet_id: String,
    pub sheet_name: String,
    pub timeout: Duration,
}

impl SheetSource {
    pub fn url(&self) -> Result<reqwest::Url, SourceError> {
        let base = format!("{GVIZ_BASE}/{}/gviz/tq", self.sheet_id);
        reqwest::Url::parse_with_params(
            &base,
            &[("tqx", "out:json"), ("sheet", self.sheet_name.as_str())],
        )
        .map_err(|e| SourceError::Url(e.to_string()))
    }
}

impl ContentSource for SheetSource {
    fn load_records(&self) -> Result<Vec<RawRecord>, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let body = client.get(self.url()?).send()?.error_for_status()?.text()?;
        parse_gviz(&body)
    }
}

/// A gviz payload saved to disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl ContentSource for FileSource {
    fn load_records(&self) -> Result<Vec<RawRecord>, SourceError> {
        let body = fs::read_to_string(&self.path)?;
        parse_gviz(&body)
    }
}

// ============================================================================
// gviz payload
// ============================================================================

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<GvizMessage>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: serde_json::Value,
    /// Formatted value, present for numbers and dates.
    #[serde(default)]
    f: Option<String>,
}

impl GvizCell {
    fn into_text(self) -> Option<String> {
        use serde_json::Value;
        match self.v {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(self.f.unwrap_or_else(|| n.to_string())),
            other => Some(other.to_string()),
        }
    }
}

/// Strip the JavaScript callback around a gviz response, if present.
fn unwrap_envelope(body: &str) -> Result<&str, SourceError> {
    let trimmed = body.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }
    let start = trimmed.find("setResponse(").ok_or(SourceError::Envelope)? + "setResponse(".len();
    let end = trimmed.rfind(')').ok_or(SourceError::Envelope)?;
    if end <= start {
        return Err(SourceError::Envelope);
    }
    Ok(&trimmed[start..end])
}

/// Parse a gviz response body into raw records, one per table row.
pub fn parse_gviz(body: &str) -> Result<Vec<RawRecord>, SourceError> {
    let response: GvizResponse = serde_json::from_str(unwrap_envelope(body)?)?;

    if response.status.as_deref() == Some("error") {
        let message = response
            .errors
            .into_iter()
            .filter_map(|e| e.detailed_message.or(e.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SourceError::Query(message));
    }

    let rows = response.table.map(|t| t.rows).unwrap_or_default();
    Ok(rows
        .into_iter()
        .map(|row| {
            let cells = row
                .c
                .into_iter()
                .map(|cell| cell.and_then(GvizCell::into_text))
                .collect();
            RawRecord::from_cells(cells)
        })
        .collect())
}

// ============================================================================
// Loading with fallback
// ============================================================================

/// Why the sample posts are being shown.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Neither a file nor a sheet id is configured.
    Unconfigured,
    /// The configured source failed; the message says how.
    Failed(String),
}

/// Where the loaded records came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Sheet(String),
    File(PathBuf),
    Fallback(FallbackReason),
}

impl Origin {
    /// True when the reader should see the "connect your sheet" notice.
    pub fn needs_setup_notice(&self) -> bool {
        matches!(self, Origin::Fallback(FallbackReason::Unconfigured))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Sheet(id) => write!(f, "Google Sheet {id}"),
            Origin::File(path) => write!(f, "{}", path.display()),
            Origin::Fallback(FallbackReason::Unconfigured) => {
                write!(f, "sample posts (no source configured)")
            }
            Origin::Fallback(FallbackReason::Failed(msg)) => {
                write!(f, "sample posts (source failed: {msg})")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub records: Vec<RawRecord>,
    pub origin: Origin,
}

/// Load records from the configured source, falling back to the sample
/// posts. `site_dir` anchors a relative `source.file`.
pub fn load(config: &SourceConfig, site_dir: &Path) -> LoadedContent {
    let (source, origin): (Box<dyn ContentSource>, Origin) = if let Some(file) = &config.file {
        let path = site_dir.join(file);
        (
            Box::new(FileSource { path: path.clone() }) as Box<dyn ContentSource>,
            Origin::File(path),
        )
    } else if let Some(id) = config.effective_sheet_id() {
        let sheet = SheetSource {
            sheet_id: id.to_string(),
            sheet_name: config.sheet_name.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        };
        (
            Box::new(sheet) as Box<dyn ContentSource>,
            Origin::Sheet(id.to_string()),
        )
    } else {
        info!("no content source configured, using sample posts");
        return LoadedContent {
            records: sample::records(),
            origin: Origin::Fallback(FallbackReason::Unconfigured),
        };
    };

    match source.load_records() {
        Ok(records) => {
            info!(rows = records.len(), source = %origin, "loaded posts");
            LoadedContent { records, origin }
        }
        Err(err) => {
            warn!(source = %origin, error = %err, "falling back to sample posts");
            LoadedContent {
                records: sample::records(),
                origin: Origin::Fallback(FallbackReason::Failed(err.to_string())),
            }
        }
    }
}
