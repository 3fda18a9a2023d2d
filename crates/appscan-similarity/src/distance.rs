use appscan_core::types::{DistanceResult, TextPair};

/// Levenshtein distance over Unicode scalar values. Insert, delete and
/// substitute each cost 1. Case-sensitive: lowercase first if needed.
///
/// Only the previous row of the DP table is kept, so memory is
/// O(min(n, m)).
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Iterate over the longer string so the row tracks the shorter one.
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}

/// `((n + m) - distance) / (n + m)`. Identical inputs, including two empty
/// strings, yield `1.0`.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let total = a.chars().count() + b.chars().count();
    let d = distance(a, b);
    (total - d) as f64 / total as f64
}

/// Distance and ratio in one pass.
pub fn compare(a: &str, b: &str) -> DistanceResult {
    let d = distance(a, b);
    let total = a.chars().count() + b.chars().count();
    let ratio = if total == 0 { 1.0 } else { (total - d) as f64 / total as f64 };
    DistanceResult { distance: d, ratio: Some(ratio) }
}

pub fn compare_pair(pair: TextPair<'_>) -> DistanceResult {
    compare(pair.left, pair.right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitten_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("sitting", "kitten"), 3);
    }

    #[test]
    fn empty_sides() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abcd", ""), 4);
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(distance("Kid", "kid"), 1);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(distance("", "日本"), 2);
    }

    #[test]
    fn ratio_values() {
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", "abc"), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
        // (6 + 7 - 3) / 13
        assert!((ratio("kitten", "sitting") - 10.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn compare_matches_individual_ops() {
        let r = compare_pair(TextPair::new("flaw", "lawn"));
        assert_eq!(r.distance, 2);
        assert_eq!(r.ratio, Some(ratio("flaw", "lawn")));
        assert_eq!(compare("", "").ratio, Some(1.0));
    }
}
