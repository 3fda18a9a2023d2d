//! Shared normalization helpers.

/// Normalize an app name for cross-catalog comparison.
///
/// Keeps only ASCII letters, digits and spaces, collapses space runs,
/// trims both ends and lowercases. "Duolingo: Learn Languages" and
/// "Duolingo - Learn Languages" both become "duolingo learn languages".
pub fn normalize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    kept.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Lowercase a free-text field before a case-insensitive comparison.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_variants_normalize_alike() {
        assert_eq!(normalize_name("Duolingo: Learn Languages"), "duolingo learn languages");
        assert_eq!(normalize_name("Duolingo - Learn Languages"), "duolingo learn languages");
    }

    #[test]
    fn strips_non_ascii_and_tabs() {
        assert_eq!(normalize_name("  Café\tBar   ™ "), "cafbar");
        assert_eq!(normalize_name("!!!"), "");
    }

    #[test]
    fn fold_case_is_unicode_aware() {
        assert_eq!(fold_case("ÉCOLE Kids"), "école kids");
    }
}
