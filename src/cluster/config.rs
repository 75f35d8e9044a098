use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KeywordClusterError, Result};
use crate::similarity::NGramWeights;

/// Default minimum combined similarity for joining a cluster
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Default candidate count above which scoring runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Clustering configuration.
///
/// Every field has a default, so partial TOML / JSON files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Minimum combined similarity (0.0 exclusive - 1.0 inclusive, default: 0.5).
    pub threshold: f64,

    /// Weights of the bigram / trigram / four-gram blend (default: 0.5 / 0.3 / 0.2).
    pub weights: NGramWeights,

    /// Remaining candidate count above which one scan is scored in parallel (default: 256).
    ///
    /// Only affects speed, never the result.
    pub parallel_threshold: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            weights: NGramWeights::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ClusterConfig {
    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the n-gram weights.
    pub fn with_weights(mut self, weights: NGramWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the parallel scoring cut-over.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `KeywordClusterError::Validation` if the threshold is not in
    /// (0, 1], or the weights are negative, non-finite, or do not sum to 1.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > 1.0 {
            return Err(KeywordClusterError::validation(format!(
                "threshold must be in (0, 1], got {}",
                self.threshold
            )));
        }
        let w = &self.weights;
        for (name, value) in [("bigram", w.bigram), ("trigram", w.trigram), ("fourgram", w.fourgram)] {
            if !value.is_finite() || value < 0.0 {
                return Err(KeywordClusterError::validation(format!(
                    "{name} weight must be a finite non-negative number, got {value}"
                )));
            }
        }
        if (w.sum() - 1.0).abs() > 1e-9 {
            return Err(KeywordClusterError::validation(format!(
                "n-gram weights must sum to 1, got {}",
                w.sum()
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `KeywordClusterError::Io` if the file can't be read and
    /// `KeywordClusterError::Config` if it is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // 読めない場合は IO エラーをそのまま返す
        let content = std::fs::read_to_string(path)?;

        toml::from_str(&content)
            .map_err(|e| KeywordClusterError::config_with_source(format!("Invalid TOML in {}", path.display()), e))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        serde_json::from_str(&content)
            .map_err(|e| KeywordClusterError::config_with_source(format!("Invalid JSON in {}", path.display()), e))
    }

    /// Load configuration, picking the format from the file extension
    /// (`.json` is JSON, anything else is TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        let config = ClusterConfig::default();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.weights, NGramWeights::default());
        config.validate().unwrap();
    }

    #[test]
    fn rejects_bad_thresholds() {
        for t in [0.0, -0.1, 1.01, f64::NAN, f64::INFINITY] {
            let err = ClusterConfig::default().with_threshold(t).validate().unwrap_err();
            assert!(matches!(err, KeywordClusterError::Validation { .. }), "{t}");
        }
        ClusterConfig::default().with_threshold(1.0).validate().unwrap();
    }

    #[test]
    fn rejects_bad_weights() {
        let unbalanced = ClusterConfig::default().with_weights(NGramWeights::new(0.5, 0.5, 0.5));
        assert!(unbalanced.validate().is_err());
        let negative = ClusterConfig::default().with_weights(NGramWeights::new(1.2, -0.2, 0.0));
        assert!(negative.validate().is_err());
        let bigram_only = ClusterConfig::default().with_weights(NGramWeights::new(1.0, 0.0, 0.0));
        bigram_only.validate().unwrap();
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "threshold = 0.7").unwrap();
        writeln!(file, "[weights]").unwrap();
        writeln!(file, "bigram = 0.6").unwrap();
        writeln!(file, "trigram = 0.2").unwrap();

        let config = ClusterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.threshold, 0.7);
        assert_eq!(config.weights.bigram, 0.6);
        assert_eq!(config.weights.trigram, 0.2);
        assert_eq!(config.weights.fourgram, 0.2);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn json_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"threshold": 0.4, "parallel_threshold": 8}}"#).unwrap();

        let config = ClusterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.threshold, 0.4);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn invalid_file_is_config_error_and_missing_file_is_io_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "threshold = [").unwrap();
        let err = ClusterConfig::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, KeywordClusterError::Config { .. }));

        let err = ClusterConfig::from_toml_file("/nonexistent/keyword-cluster.toml").unwrap_err();
        assert!(matches!(err, KeywordClusterError::Io(_)));
        let err = ClusterConfig::from_file("/nonexistent/keyword-cluster.json").unwrap_err();
        assert!(matches!(err, KeywordClusterError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
