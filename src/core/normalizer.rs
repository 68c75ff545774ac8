// src/core/normalizer.rs
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes text for case- and accent-insensitive comparison.
///
/// Decomposes with NFKD, drops combining marks and anything that is not a
/// letter, digit, whitespace or hyphen, then lowercases. Total on any input.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfkd()
        .filter(|&c| !is_combining_mark(c))
        .filter(|&c| is_kept(c))
        .collect();
    stripped.to_lowercase()
}

fn is_kept(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric() || c.is_whitespace() || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_accents() {
        assert_eq!(normalize("café"), "cafe");
        assert_eq!(normalize("Árbol"), "arbol");
        assert_eq!(normalize("ümlaut"), normalize("umlaut"));
    }

    #[test]
    fn removes_punctuation_but_keeps_hyphen_and_spaces() {
        assert_eq!(normalize("Don't stop!"), "dont stop");
        assert_eq!(normalize("well-known"), "well-known");
        assert_eq!(normalize("  a b "), "  a b ");
    }

    #[test]
    fn keeps_digits_and_non_latin_letters() {
        assert_eq!(normalize("Route 66"), "route 66");
        assert_eq!(normalize("中文-key"), "中文-key");
    }

    #[test]
    fn folds_compatibility_forms() {
        // Fullwidth letters and ligatures decompose under NFKD.
        assert_eq!(normalize("ＡＢＣ"), "abc");
        assert_eq!(normalize("ﬁne"), "fine");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!."), "");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn normalize_is_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn ascii_case_does_not_matter(s in "[a-zA-Z0-9 -]{0,24}") {
            prop_assert_eq!(normalize(&s.to_uppercase()), normalize(&s.to_lowercase()));
        }
    }
}
