use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KeywordClusterError, Result};

const TRANSACTIONAL_PATTERNS: &[&str] = &[
    "buy",
    "purchase",
    "order",
    "shop",
    "cart",
    "checkout",
    "discount",
    "coupon",
    "deal",
    "price",
    "cheap",
    "affordable",
    "subscribe",
    "download",
    "free trial",
];

const COMMERCIAL_PATTERNS: &[&str] = &[
    "best",
    "top",
    "review",
    "comparison",
    "vs",
    "versus",
    "alternative",
    "compare",
    "recommended",
    "rating",
];

const NAVIGATIONAL_PATTERNS: &[&str] = &[
    "login",
    "sign in",
    "account",
    "dashboard",
    "portal",
    "official",
    "website",
    "homepage",
];

/// Presumed purpose behind a search query
/// キーワードを lower-case にして固定パターンの部分一致で判定する
/// 優先順: transactional → commercial → navigational → informational
/// 単語境界は見ないので "devs" の中の "vs" にも当たる
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    /// Looking for information (default when nothing else matches)
    #[default]
    Informational,
    /// Looking for a specific site or page
    Navigational,
    /// Ready to buy or act
    Transactional,
    /// Researching before a purchase
    Commercial,
}

impl SearchIntent {
    /// All categories in declaration order
    pub const ALL: [SearchIntent; 4] = [
        SearchIntent::Informational,
        SearchIntent::Navigational,
        SearchIntent::Transactional,
        SearchIntent::Commercial,
    ];

    /// Categories in the order their patterns are checked
    /// informational はパターンを持たないので含めない
    pub const PRIORITY: [SearchIntent; 3] = [
        SearchIntent::Transactional,
        SearchIntent::Commercial,
        SearchIntent::Navigational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchIntent::Informational => "informational",
            SearchIntent::Navigational => "navigational",
            SearchIntent::Transactional => "transactional",
            SearchIntent::Commercial => "commercial",
        }
    }

    /// Fixed pattern list of this category
    /// Informational has none: it is the fallback
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            SearchIntent::Informational => &[],
            SearchIntent::Navigational => NAVIGATIONAL_PATTERNS,
            SearchIntent::Transactional => TRANSACTIONAL_PATTERNS,
            SearchIntent::Commercial => COMMERCIAL_PATTERNS,
        }
    }
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchIntent {
    type Err = KeywordClusterError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_lowercase();
        SearchIntent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == label)
            .ok_or_else(|| KeywordClusterError::validation(format!("Unknown search intent: {s}")))
    }
}

/// Classify the intent of one keyword with the fixed pattern lists
pub fn classify_keyword_intent(keyword: &str) -> SearchIntent {
    let lower = keyword.to_lowercase();
    SearchIntent::PRIORITY
        .into_iter()
        .find(|intent| intent.patterns().iter().any(|p| lower.contains(p)))
        .unwrap_or_default()
}

/// Pluggable intent classification for the clusterer
pub trait IntentClassifier {
    fn classify(&self, keyword: &str) -> SearchIntent;
}

/// Substring pattern matching, see [`classify_keyword_intent`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternIntentClassifier;

impl IntentClassifier for PatternIntentClassifier {
    #[inline]
    fn classify(&self, keyword: &str) -> SearchIntent {
        classify_keyword_intent(keyword)
    }
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> SearchIntent,
{
    fn classify(&self, keyword: &str) -> SearchIntent {
        self(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactional_wins_over_commercial() {
        assert_eq!(classify_keyword_intent("buy cheap shoes"), SearchIntent::Transactional);
        // "best" (commercial) と "price" (transactional) の両方を含む
        assert_eq!(classify_keyword_intent("best price laptop"), SearchIntent::Transactional);
    }

    #[test]
    fn commercial() {
        assert_eq!(classify_keyword_intent("best running shoes"), SearchIntent::Commercial);
        assert_eq!(classify_keyword_intent("Notion vs Obsidian"), SearchIntent::Commercial);
    }

    #[test]
    fn navigational() {
        assert_eq!(classify_keyword_intent("gmail login"), SearchIntent::Navigational);
        assert_eq!(classify_keyword_intent("Sign In to Search Console"), SearchIntent::Navigational);
    }

    #[test]
    fn informational_is_the_default() {
        assert_eq!(classify_keyword_intent("shoe care guide"), SearchIntent::Informational);
        assert_eq!(classify_keyword_intent(""), SearchIntent::Informational);
    }

    #[test]
    fn substring_matching_is_kept() {
        // "devs" に "vs" が含まれる
        assert!("devs hiring".contains("vs"));
        assert_eq!(classify_keyword_intent("devs hiring"), SearchIntent::Commercial);
        // "canvas" は c-a-n-v-a-s なので "vs" を含まない
        assert_eq!(classify_keyword_intent("canvas painting ideas"), SearchIntent::Informational);
        // "border" に "order" が含まれる
        assert_eq!(classify_keyword_intent("border collie"), SearchIntent::Transactional);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for intent in SearchIntent::ALL {
            assert_eq!(intent.as_str().parse::<SearchIntent>().unwrap(), intent);
            assert_eq!(intent.to_string(), intent.as_str());
        }
        assert_eq!(" Commercial ".parse::<SearchIntent>().unwrap(), SearchIntent::Commercial);
        assert!("purchase".parse::<SearchIntent>().is_err());
    }

    #[test]
    fn serde_labels_are_lowercase() {
        let json = serde_json::to_string(&SearchIntent::Transactional).unwrap();
        assert_eq!(json, "\"transactional\"");
        let back: SearchIntent = serde_json::from_str("\"navigational\"").unwrap();
        assert_eq!(back, SearchIntent::Navigational);
    }

    #[test]
    fn closures_are_classifiers() {
        let always_commercial = |_: &str| SearchIntent::Commercial;
        assert_eq!(always_commercial.classify("anything"), SearchIntent::Commercial);
        assert_eq!(PatternIntentClassifier.classify("buy now"), SearchIntent::Transactional);
        assert!(SearchIntent::Informational.patterns().is_empty());
    }
}
