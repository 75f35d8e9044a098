use serde::{Deserialize, Serialize};

use crate::{
    cluster::{summary::ClusterSummary, KeywordCluster},
    error::Result,
};

/// クラスタリング結果のシリアライズ用データ構造
/// 呼び出し側が JSON / CBOR でそのまま保存・転送できる形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReport {
    pub summary: ClusterSummary,
    pub clusters: Vec<KeywordCluster>,
}

impl ClusterReport {
    /// summary は clusters から計算する
    pub fn new(clusters: Vec<KeywordCluster>) -> Self {
        Self {
            summary: ClusterSummary::from_clusters(&clusters),
            clusters,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// CBOR (compact binary)
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

impl From<Vec<KeywordCluster>> for ClusterReport {
    fn from(clusters: Vec<KeywordCluster>) -> Self {
        Self::new(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cluster::cluster_keywords, error::KeywordClusterError};

    fn sample() -> ClusterReport {
        ClusterReport::new(cluster_keywords(&["seo tools", "seo tool", "best pizza"], 0.5))
    }

    #[test]
    fn json_field_names() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["clusters"][0];
        assert_eq!(first["mainKeyword"], "seo tools");
        assert_eq!(first["similarKeywords"][0], "seo tool");
        assert_eq!(first["intent"], "informational");
        assert!(first["averageSimilarity"].as_f64().unwrap() > 0.6);
        assert_eq!(value["clusters"][1]["averageSimilarity"], 1.0);
        assert_eq!(value["clusters"][1]["intent"], "commercial");

        assert_eq!(value["summary"]["totalKeywords"], 3);
        assert_eq!(value["summary"]["intentCounts"]["commercial"], 1);
    }

    #[test]
    fn cbor_restores_report() {
        let report = sample();
        let bytes = report.to_cbor().unwrap();
        assert_eq!(ClusterReport::from_cbor(&bytes).unwrap(), report);
    }

    #[test]
    fn broken_input_is_serialization_error() {
        let err = ClusterReport::from_json("{\"clusters\": 3}").unwrap_err();
        assert!(matches!(err, KeywordClusterError::Serialization { .. }));
        let err = ClusterReport::from_cbor(&[0xff, 0x00]).unwrap_err();
        assert!(matches!(err, KeywordClusterError::Serialization { .. }));
    }

    #[test]
    fn pretty_json_is_multiline() {
        let pretty = sample().to_json_pretty().unwrap();
        assert!(pretty.contains('\n'));
        assert!(pretty.contains("\"mainKeyword\": \"seo tools\""));
    }
}
