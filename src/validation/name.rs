//! Collection name validation

/// Check whether a proposed deck or videoscrubbing folder name is
/// syntactically acceptable
///
/// Accepts only non-empty names composed of ASCII letters, digits, hyphens,
/// and whitespace. Everything else, path separators included, is rejected.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_letters_digits_hyphens_spaces() {
        assert!(is_valid_name("my-deck"));
        assert!(is_valid_name("Deck 12"));
        assert!(is_valid_name("a"));
        assert!(is_valid_name("0"));
        assert!(is_valid_name("Third Floor - West Wing"));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_rejects_path_separators_and_punctuation() {
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("a\\b"));
        assert!(!is_valid_name("deck:1"));
        assert!(!is_valid_name("~deck"));
        assert!(!is_valid_name("deck.png"));
        assert!(!is_valid_name("deck_1"));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("deck!"));
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert!(!is_valid_name("décor"));
        assert!(!is_valid_name("デッキ"));
    }
}
