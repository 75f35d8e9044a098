pub mod config;
pub mod serde;
pub mod summary;

use ahash::RandomState;
use rayon::prelude::*;
use ::serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    cluster::config::ClusterConfig,
    error::Result,
    intent::{IntentClassifier, PatternIntentClassifier, SearchIntent},
    similarity::{cache::NGramCache, NGramWeights},
};

/// One group of near-duplicate keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCluster {
    /// Seed keyword of the cluster
    pub main_keyword: String,
    /// Keywords that joined the seed, in scan order
    pub similar_keywords: Vec<String>,
    /// Intent of the main keyword
    pub intent: SearchIntent,
    /// Mean combined similarity of the members to the main keyword
    /// 1.0 for a singleton
    pub average_similarity: f64,
}

impl KeywordCluster {
    /// Number of keywords in the cluster, main keyword included
    #[inline]
    pub fn len(&self) -> usize {
        self.similar_keywords.len() + 1
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.similar_keywords.is_empty()
    }

    /// Main keyword first, then the similar ones
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_keyword.as_str()).chain(self.similar_keywords.iter().map(String::as_str))
    }
}

/// Cluster keywords by combined n-gram similarity
///
/// Greedy and order dependent: the first unclustered keyword becomes a seed
/// and claims every remaining keyword whose similarity to it is at least
/// `threshold`. Clusters are returned sorted by member count, largest first
/// (stable for ties).
///
/// Never fails. Empty input gives an empty result, and the threshold is not
/// range-checked here (see [`KeywordClusterer::new`] for a validated engine).
pub fn cluster_keywords<S>(keywords: &[S], threshold: f64) -> Vec<KeywordCluster>
where
    S: AsRef<str>,
{
    let config = ClusterConfig::default().with_threshold(threshold);
    KeywordClusterer::from_config_unchecked(config).cluster(keywords)
}

/// Configured clustering engine
#[derive(Debug, Clone)]
pub struct KeywordClusterer<C = PatternIntentClassifier> {
    config: ClusterConfig,
    classifier: C,
}

impl KeywordClusterer<PatternIntentClassifier> {
    /// Create a clusterer after validating `config`
    ///
    /// # Errors
    ///
    /// Returns `KeywordClusterError::Validation` if `config` is out of range.
    pub fn new(config: ClusterConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejected cluster config");
            return Err(e);
        }
        Ok(Self::from_config_unchecked(config))
    }

    fn from_config_unchecked(config: ClusterConfig) -> Self {
        Self {
            config,
            classifier: PatternIntentClassifier,
        }
    }
}

impl<C> KeywordClusterer<C>
where
    C: IntentClassifier,
{
    /// Replace the intent classifier
    pub fn with_classifier<D: IntentClassifier>(self, classifier: D) -> KeywordClusterer<D> {
        KeywordClusterer {
            config: self.config,
            classifier,
        }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Run the greedy clustering over `keywords`
    ///
    /// Every distinct keyword ends up in exactly one cluster. A keyword
    /// repeated verbatim is consumed together with its first occurrence.
    pub fn cluster<S>(&self, keywords: &[S]) -> Vec<KeywordCluster>
    where
        S: AsRef<str>,
    {
        let threshold = self.config.threshold;
        tracing::debug!(keywords = keywords.len(), threshold, "clustering keywords");

        let cache = NGramCache::from_keywords(keywords);
        // used はテキストで管理する (同じ文字列は一度しか出さない)
        let mut used: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
        let mut clusters = Vec::new();

        for (i, keyword) in keywords.iter().enumerate() {
            let keyword: &str = keyword.as_ref();
            if used.contains(keyword) {
                continue;
            }

            // i より前は全て used 済みなので後ろだけ見れば十分
            let candidates: Vec<&str> = keywords[i + 1..]
                .iter()
                .map(|k| k.as_ref())
                .filter(|other| *other != keyword && !used.contains(other))
                .collect();
            let scores = self.score_candidates(&cache, keyword, &candidates);

            let mut similar_keywords = Vec::new();
            let mut total_similarity = 0.0;
            // accept / used の判定は入力順に逐次で行う
            for (other, score) in candidates.into_iter().zip(scores) {
                if used.contains(other) {
                    continue;
                }
                if score >= threshold {
                    similar_keywords.push(other.to_string());
                    total_similarity += score;
                    used.insert(other);
                }
            }
            used.insert(keyword);

            let average_similarity = if similar_keywords.is_empty() {
                1.0
            } else {
                total_similarity / similar_keywords.len() as f64
            };
            let cluster = KeywordCluster {
                main_keyword: keyword.to_string(),
                intent: self.classifier.classify(keyword),
                similar_keywords,
                average_similarity,
            };
            tracing::trace!(
                main = %cluster.main_keyword,
                members = cluster.similar_keywords.len(),
                intent = %cluster.intent,
                "emitted cluster"
            );
            clusters.push(cluster);
        }

        // stable sort
        clusters.sort_by(|a, b| b.similar_keywords.len().cmp(&a.similar_keywords.len()));
        tracing::debug!(clusters = clusters.len(), "clustering finished");
        clusters
    }

    /// Score every candidate against `keyword`, keeping candidate order
    fn score_candidates(&self, cache: &NGramCache, keyword: &str, candidates: &[&str]) -> Vec<f64> {
        let weights: &NGramWeights = &self.config.weights;
        if candidates.len() > self.config.parallel_threshold {
            candidates
                .par_iter()
                .map(|other| cache.similarity(keyword, other, weights))
                .collect()
        } else {
            candidates
                .iter()
                .map(|other| cache.similarity(keyword, other, weights))
                .collect()
        }
    }
}
