//! Batch configuration types

use std::time::Duration;

use crate::harness::metrics::ReferenceCodec;

/// Configuration for a benchmark batch
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Wall-clock limit for starting new inputs; `None` or zero is unlimited
    pub time_budget: Option<Duration>,
    /// Inputs whose file name contains this are byproducts of an earlier run
    pub artifact_marker: String,
    /// Competing codecs to compare sizes against
    pub references: Vec<ReferenceCodec>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            time_budget: None,
            artifact_marker: ".llr".to_string(),
            references: vec![ReferenceCodec::new("nut", "nut", "build")],
        }
    }
}

impl BatchConfig {
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }
}

/// Builder for BatchConfig
#[derive(Default)]
pub struct BatchConfigBuilder {
    time_budget: Option<Option<Duration>>,
    artifact_marker: Option<String>,
    references: Option<Vec<ReferenceCodec>>,
}

impl BatchConfigBuilder {
    pub fn time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn artifact_marker(mut self, marker: impl Into<String>) -> Self {
        self.artifact_marker = Some(marker.into());
        self
    }

    pub fn references(mut self, references: Vec<ReferenceCodec>) -> Self {
        self.references = Some(references);
        self
    }

    pub fn build(self) -> BatchConfig {
        let default = BatchConfig::default();
        BatchConfig {
            time_budget: self.time_budget.unwrap_or(default.time_budget),
            artifact_marker: self.artifact_marker.unwrap_or(default.artifact_marker),
            references: self.references.unwrap_or(default.references),
        }
    }
}
