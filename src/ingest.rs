//! Tabular input → collections.
//!
//! A source row holds a fixed number of deck fields. Each field is turned into
//! a [`Collection`] by a [`DeckNormalizer`]. Rows with a missing or blank field
//! are dropped whole, then the surviving rows are flattened row-major so row
//! `r`, field `f` becomes collection `r * fields + f`.

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::IngestConfig;
use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// Normalizers
// ============================================================================

/// Turns one raw deck field into a set of card ids.
pub trait DeckNormalizer {
    fn normalize(&self, raw: &str) -> Collection;
}

/// Splits a field on a delimiter and cleans up each entry.
#[derive(Debug, Clone)]
pub struct DelimitedNormalizer {
    delimiter: String,
    strip_quantities: bool,
}

impl DelimitedNormalizer {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self { delimiter: delimiter.into(), strip_quantities: true }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            delimiter: config.delimiter.clone(),
            strip_quantities: config.strip_quantities,
        }
    }

    pub fn with_strip_quantities(mut self, strip: bool) -> Self {
        self.strip_quantities = strip;
        self
    }

    fn clean<'a>(&self, entry: &'a str) -> &'a str {
        let entry = entry.trim();
        if self.strip_quantities { strip_quantity(entry) } else { entry }
    }
}

impl DeckNormalizer for DelimitedNormalizer {
    fn normalize(&self, raw: &str) -> Collection {
        raw.split(self.delimiter.as_str())
            .map(|entry| self.clean(entry))
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

/// `"4 Lightning Bolt"` / `"4x Lightning Bolt"` → `"Lightning Bolt"`.
/// Entries without a leading count are returned unchanged.
fn strip_quantity(entry: &str) -> &str {
    let digits = entry.len() - entry.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return entry;
    }
    let rest = &entry[digits..];
    let rest = rest.strip_prefix(['x', 'X']).unwrap_or(rest);
    match rest.strip_prefix(char::is_whitespace) {
        Some(name) if !name.trim().is_empty() => name.trim_start(),
        _ => entry,
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One tabular row: the deck fields in column order. `None` = missing cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckRow {
    pub fields: Vec<Option<String>>,
}

impl DeckRow {
    pub fn new(fields: Vec<Option<String>>) -> Self {
        Self { fields }
    }

    /// Row with every field present.
    pub fn complete<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self { fields: fields.into_iter().map(|f| Some(f.into())).collect() }
    }

    fn is_complete(&self) -> bool {
        !self.fields.is_empty()
            && self
                .fields
                .iter()
                .all(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Counts from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows_seen: usize,
    pub rows_dropped: usize,
    pub collections: usize,
}

/// Read rows from a JSON array of objects keyed by column name.
///
/// A column that is absent, null, or not a string becomes a missing field.
pub fn rows_from_json(json: &str, config: &IngestConfig) -> Result<Vec<DeckRow>> {
    let parsed: JsonValue = serde_json::from_str(json)?;
    let JsonValue::Array(records) = parsed else {
        return Err(Error::Ingest("expected a JSON array of row objects".into()));
    };

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let JsonValue::Object(map) = record else {
                return Err(Error::Ingest(format!("row {i} is not a JSON object")));
            };
            let fields = config
                .deck_columns
                .iter()
                .map(|column| map.get(column).and_then(JsonValue::as_str).map(str::to_owned))
                .collect();
            Ok(DeckRow { fields })
        })
        .collect()
}

/// Normalize complete rows into the flattened collection sequence.
pub fn collections_from_rows(
    rows: &[DeckRow],
    normalizer: &dyn DeckNormalizer,
) -> (Vec<Collection>, IngestSummary) {
    let mut summary = IngestSummary { rows_seen: rows.len(), ..Default::default() };
    let mut collections = Vec::new();

    for row in rows {
        if !row.is_complete() {
            summary.rows_dropped += 1;
            continue;
        }
        for raw in row.fields.iter().flatten() {
            collections.push(normalizer.normalize(raw));
        }
    }
    summary.collections = collections.len();

    if summary.rows_dropped > 0 {
        warn!(
            dropped = summary.rows_dropped,
            seen = summary.rows_seen,
            "dropped rows with missing deck fields"
        );
    }
    debug!(collections = summary.collections, "rows normalized");
    (collections, summary)
}
