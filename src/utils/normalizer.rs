/// 比較用にキーワードを正規化するためのトレイト
/// lower-case にして前後の空白を落とす
pub trait KeywordNormalizer {
    /// 正規化済みの文字列を返す
    fn normalized_keyword(&self) -> String;
}

impl KeywordNormalizer for str {
    #[inline]
    fn normalized_keyword(&self) -> String {
        self.to_lowercase().trim().to_string()
    }
}

impl KeywordNormalizer for String {
    #[inline]
    fn normalized_keyword(&self) -> String {
        self.as_str().normalized_keyword()
    }
}

/// Normalize a keyword for comparison (lower-case, trimmed).
#[inline]
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.normalized_keyword()
}

/// `text` を char 単位で `n` 文字ずつスライドしたスライスを返す
/// バイト境界ではなく char 境界で切るので多バイト文字でも壊れない
pub fn char_windows(text: &str, n: usize) -> impl Iterator<Item = &str> + '_ {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = bounds.len() - 1;
    let count = if n == 0 || char_len < n { 0 } else { char_len - n + 1 };
    (0..count).map(move |i| &text[bounds[i]..bounds[i + n]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_keyword("  SEO Tools \t"), "seo tools");
        assert_eq!(normalize_keyword(""), "");
        assert_eq!(normalize_keyword("   "), "");
        assert_eq!("Best Pizza".to_string().normalized_keyword(), "best pizza");
    }

    #[test]
    fn char_windows_slides_over_chars() {
        let grams: Vec<&str> = char_windows("tool", 2).collect();
        assert_eq!(grams, vec!["to", "oo", "ol"]);
    }

    #[test]
    fn char_windows_short_or_zero() {
        assert_eq!(char_windows("ab", 3).count(), 0);
        assert_eq!(char_windows("abc", 0).count(), 0);
        assert_eq!(char_windows("", 1).count(), 0);
        assert_eq!(char_windows("abc", 3).collect::<Vec<_>>(), vec!["abc"]);
    }

    #[test]
    fn char_windows_multibyte() {
        let grams: Vec<&str> = char_windows("café bar", 4).collect();
        assert_eq!(grams[0], "café");
        assert_eq!(grams.len(), 5);
        let jp: Vec<&str> = char_windows("検索意図", 2).collect();
        assert_eq!(jp, vec!["検索", "索意", "意図"]);
    }
}
