//! Run configuration.
//!
//! Every option has a default, so an empty JSON object is a valid config.
//! The config is validated once at the boundary and then passed by value;
//! nothing reads settings from global state.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================================
// Threshold
// ============================================================================

/// The refinement threshold τ (`cluster_percentage`), guaranteed in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold { value })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(d)?;
        Threshold::new(value).map_err(serde::de::Error::custom)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.5)
    }
}

// ============================================================================
// Ingest configuration
// ============================================================================

/// How raw tabular rows become collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Row fields holding one collection each, in flattening order.
    pub deck_columns: Vec<String>,
    /// Separator between card entries inside one field.
    pub delimiter: String,
    /// Drop a leading count such as `4 ` or `2x ` from each entry.
    pub strip_quantities: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            deck_columns: vec![
                "Deck 1 List".into(),
                "Deck 2 List".into(),
                "Deck 3 List".into(),
            ],
            delimiter: "\n".into(),
            strip_quantities: true,
        }
    }
}

// ============================================================================
// Analysis configuration
// ============================================================================

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// τ: minimum share of neighbor memberships a vertex's clusters must cover.
    pub cluster_percentage: Threshold,
    /// Resolution parameter handed to the community detector.
    pub resolution: f64,
    /// Run sweeps on the rayon pool. Ignored without the `parallel` feature.
    pub parallel: bool,
    pub ingest: IngestConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cluster_percentage: Threshold::default(),
            resolution: 1.0,
            parallel: false,
            ingest: IngestConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override τ, validating it.
    pub fn with_cluster_percentage(mut self, value: f64) -> Result<Self> {
        self.cluster_percentage = Threshold::new(value)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        Threshold::new(self.cluster_percentage.get())?;
        if !self.resolution.is_finite() || self.resolution < 0.0 {
            return Err(Error::InvalidResolution { value: self.resolution });
        }
        if self.ingest.deck_columns.is_empty() {
            return Err(Error::Config("ingest.deck_columns must name at least one column".into()));
        }
        if self.ingest.delimiter.is_empty() {
            return Err(Error::Config("ingest.delimiter must not be empty".into()));
        }
        Ok(())
    }
}
