use ahash::RandomState;
use indexmap::IndexMap;

use crate::similarity::{NGramSet, NGramWeights};
use crate::utils::normalizer::KeywordNormalizer;

/// bigram / trigram / four-gram sets of one keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGramProfile {
    pub bigrams: NGramSet,
    pub trigrams: NGramSet,
    pub fourgrams: NGramSet,
}

impl NGramProfile {
    pub fn from_keyword(keyword: &str) -> Self {
        let normalized = keyword.normalized_keyword();
        let [b, t, f] = NGramWeights::SIZES;
        Self {
            bigrams: NGramSet::from_normalized(&normalized, b),
            trigrams: NGramSet::from_normalized(&normalized, t),
            fourgrams: NGramSet::from_normalized(&normalized, f),
        }
    }
}

/// Memoized n-gram profiles keyed by the raw keyword text
///
/// Clustering compares every keyword against every other one, so extracting
/// the n-gram sets once per keyword instead of once per comparison removes
/// most of the allocation work. Scores are identical to
/// [`NGramWeights::score`].
///
/// 構築後は読み取り専用なので rayon から共有できる
#[derive(Debug, Clone, Default)]
pub struct NGramCache {
    profiles: IndexMap<Box<str>, NGramProfile, RandomState>,
}

impl NGramCache {
    pub fn new() -> Self {
        Self {
            profiles: IndexMap::with_hasher(RandomState::new()),
        }
    }

    /// Build a cache holding the profile of every distinct keyword
    pub fn from_keywords<S>(keywords: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let mut cache = Self::new();
        for keyword in keywords {
            cache.insert(keyword.as_ref());
        }
        cache
    }

    /// Compute and store the profile of `keyword` if it is not cached yet
    pub fn insert(&mut self, keyword: &str) -> &NGramProfile {
        self.profiles
            .entry(Box::from(keyword))
            .or_insert_with(|| NGramProfile::from_keyword(keyword))
    }

    pub fn get(&self, keyword: &str) -> Option<&NGramProfile> {
        self.profiles.get(keyword)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Weighted similarity using cached profiles
    /// キャッシュに無いキーワードはその場で計算する (保存はしない)
    pub fn similarity(&self, str1: &str, str2: &str, weights: &NGramWeights) -> f64 {
        if str1.is_empty() || str2.is_empty() {
            return weights.blend(0.0, 0.0, 0.0);
        }
        if str1 == str2 {
            return weights.blend(1.0, 1.0, 1.0);
        }
        match (self.get(str1), self.get(str2)) {
            (Some(a), Some(b)) => Self::blend_profiles(a, b, weights),
            (Some(a), None) => Self::blend_profiles(a, &NGramProfile::from_keyword(str2), weights),
            (None, Some(b)) => Self::blend_profiles(&NGramProfile::from_keyword(str1), b, weights),
            (None, None) => weights.score(str1, str2),
        }
    }

    #[inline]
    fn blend_profiles(a: &NGramProfile, b: &NGramProfile, weights: &NGramWeights) -> f64 {
        weights.blend(
            a.bigrams.jaccard(&b.bigrams),
            a.trigrams.jaccard(&b.trigrams),
            a.fourgrams.jaccard(&b.fourgrams),
        )
    }
}
