pub mod cache;

use ahash::RandomState;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::utils::normalizer::{char_windows, KeywordNormalizer};

/// Default n-gram size for `ngram_similarity`
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Set of overlapping character n-grams of one keyword
/// 重複は潰す (set semantics)、順序は出現順
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NGramSet {
    grams: IndexSet<Box<str>, RandomState>,
}

impl NGramSet {
    /// Extract n-grams from a raw keyword
    /// The keyword is lower-cased and trimmed first
    pub fn from_keyword(keyword: &str, n: usize) -> Self {
        Self::from_normalized(&keyword.normalized_keyword(), n)
    }

    /// Extract n-grams from an already normalized text
    pub fn from_normalized(text: &str, n: usize) -> Self {
        let mut grams = IndexSet::with_hasher(RandomState::new());
        for gram in char_windows(text, n) {
            grams.insert(Box::<str>::from(gram));
        }
        Self { grams }
    }

    /// Jaccard index |A ∩ B| / |A ∪ B|
    /// 両方空なら 0/0 -> 0
    pub fn jaccard(&self, other: &NGramSet) -> f64 {
        // 小さい方から走査する
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        let intersection = small.grams.iter().filter(|g| large.grams.contains(&***g)).count();
        let union = self.len() + other.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    #[inline]
    pub fn contains(&self, gram: &str) -> bool {
        self.grams.contains(gram)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.grams.iter().map(|g| &**g)
    }
}

/// N-gram Jaccard similarity of two keywords, in [0, 1]
///
/// - either side empty -> 0
/// - exactly identical (case-sensitive) -> 1 without extracting n-grams
/// - otherwise both sides are lower-cased and trimmed, and the Jaccard index
///   of their `n`-gram sets is returned
///
/// Total over its input: `n == 0` or a keyword shorter than `n` gives an
/// empty set rather than an error.
pub fn ngram_similarity(str1: &str, str2: &str, n: usize) -> f64 {
    if str1.is_empty() || str2.is_empty() {
        return 0.0;
    }
    if str1 == str2 {
        return 1.0;
    }
    let a = NGramSet::from_keyword(str1, n);
    let b = NGramSet::from_keyword(str2, n);
    a.jaccard(&b)
}

/// Weights of the bigram / trigram / four-gram blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NGramWeights {
    pub bigram: f64,
    pub trigram: f64,
    pub fourgram: f64,
}

impl Default for NGramWeights {
    fn default() -> Self {
        Self {
            bigram: 0.5,
            trigram: 0.3,
            fourgram: 0.2,
        }
    }
}

impl NGramWeights {
    /// n-gram sizes the blend is made of, in weight order
    pub const SIZES: [usize; 3] = [2, 3, 4];

    pub fn new(bigram: f64, trigram: f64, fourgram: f64) -> Self {
        Self {
            bigram,
            trigram,
            fourgram,
        }
    }

    /// Blend three per-size scores
    /// cache 経由でも直接計算でも同じ式を通すこと (結果をビット単位で揃える)
    #[inline]
    pub fn blend(&self, bigram: f64, trigram: f64, fourgram: f64) -> f64 {
        self.bigram * bigram + self.trigram * trigram + self.fourgram * fourgram
    }

    /// Weighted similarity of two keywords
    pub fn score(&self, str1: &str, str2: &str) -> f64 {
        self.blend(
            ngram_similarity(str1, str2, 2),
            ngram_similarity(str1, str2, 3),
            ngram_similarity(str1, str2, 4),
        )
    }

    pub fn sum(&self) -> f64 {
        self.bigram + self.trigram + self.fourgram
    }
}

/// `0.5 * sim(2) + 0.3 * sim(3) + 0.2 * sim(4)`
///
/// Bigrams carry the most weight since SEO keywords are short phrases where
/// longer shared substrings are sparse.
pub fn combined_similarity(str1: &str, str2: &str) -> f64 {
    NGramWeights::default().score(str1, str2)
}
