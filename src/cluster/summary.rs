use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{cluster::KeywordCluster, intent::SearchIntent};

/// Aggregate statistics over a clustering result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// keywords across all clusters (main + similar)
    pub total_keywords: usize,
    pub cluster_count: usize,
    pub singleton_count: usize,
    /// member count of the largest cluster, main keyword included
    pub largest_cluster: usize,
    /// mean member count per cluster, 0.0 for no clusters
    pub mean_cluster_size: f64,
    /// clusters per intent, every intent present (0 if unused)
    pub intent_counts: IndexMap<SearchIntent, usize>,
}

impl ClusterSummary {
    pub fn from_clusters(clusters: &[KeywordCluster]) -> Self {
        let mut intent_counts: IndexMap<SearchIntent, usize> =
            SearchIntent::ALL.into_iter().map(|intent| (intent, 0)).collect();
        let mut total_keywords = 0;
        let mut singleton_count = 0;
        let mut largest_cluster = 0;

        for cluster in clusters {
            let size = cluster.len();
            total_keywords += size;
            largest_cluster = largest_cluster.max(size);
            if cluster.is_singleton() {
                singleton_count += 1;
            }
            *intent_counts.entry(cluster.intent).or_insert(0) += 1;
        }

        let mean_cluster_size = if clusters.is_empty() {
            0.0
        } else {
            total_keywords as f64 / clusters.len() as f64
        };

        Self {
            total_keywords,
            cluster_count: clusters.len(),
            singleton_count,
            largest_cluster,
            mean_cluster_size,
            intent_counts,
        }
    }

    /// Clusters of `intent`
    pub fn intent_count(&self, intent: SearchIntent) -> usize {
        self.intent_counts.get(&intent).copied().unwrap_or(0)
    }
}
