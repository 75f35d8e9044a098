/// This crate is a keyword clustering engine for SEO keyword lists.
/// Keywords are grouped by character n-gram Jaccard similarity and every group
/// is labelled with a search intent.
pub mod cluster;
pub mod error;
pub mod intent;
pub mod similarity;
pub mod utils;

/// Keyword Clustering
/// Greedy single-pass clustering of a keyword list.
/// The first unclustered keyword becomes the seed of a cluster and claims
/// every remaining keyword whose combined similarity to it reaches the
/// threshold (default 0.5).
///
/// The result is sorted by cluster size, largest first.
/// Every distinct input keyword appears in exactly one cluster.
///
/// `KeywordClusterer` is the configurable engine behind `cluster_keywords`:
/// - validated `ClusterConfig` (threshold, n-gram weights, parallel cut-over)
/// - pluggable `IntentClassifier`
/// - memoized n-gram sets and rayon scoring for long keyword lists
pub use cluster::{cluster_keywords, KeywordCluster, KeywordClusterer};

/// Clustering Configuration
/// Serializable configuration of `KeywordClusterer`.
/// Can be loaded from TOML or JSON files.
pub use cluster::config::{ClusterConfig, DEFAULT_SIMILARITY_THRESHOLD};

/// Cluster Summary and Report
/// - `ClusterSummary`: aggregate statistics (sizes, per-intent counts)
/// - `ClusterReport`: clusters plus summary, serializable to JSON / CBOR
pub use cluster::{serde::ClusterReport, summary::ClusterSummary};

/// N-gram Similarity
/// - `ngram_similarity`: Jaccard index of the character n-gram sets of two keywords
/// - `combined_similarity`: `0.5 * sim(2) + 0.3 * sim(3) + 0.2 * sim(4)`
///
/// Both are total: empty strings score 0, identical strings score 1.
pub use similarity::{combined_similarity, ngram_similarity, NGramSet, NGramWeights, DEFAULT_NGRAM_SIZE};

/// N-gram Cache
/// Memoized n-gram sets per keyword.
/// Gives exactly the same scores as the uncached functions.
pub use similarity::cache::{NGramCache, NGramProfile};

/// Search Intent
/// One of informational, navigational, transactional, commercial.
/// Classified by fixed substring patterns checked in priority order
/// transactional → commercial → navigational, falling back to informational.
pub use intent::{classify_keyword_intent, IntentClassifier, PatternIntentClassifier, SearchIntent};

/// Error Type
/// Only configuration and serialization can fail.
pub use error::{KeywordClusterError, Result};

/// Bounded Debug Log
/// Context-scoped ring buffer of log entries, usable as a `tracing` layer.
pub use utils::log_buffer::{LogBuffer, LogEntry};

/// Keyword normalization (lower-case, trim)
pub use utils::normalizer::normalize_keyword;
