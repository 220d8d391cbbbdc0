//! Deck slot validation
//!
//! A deck file claims an integer floor via its filename stem; at most one
//! file per floor may exist in a deck, and the extension is not part of
//! slot identity (`1.png` and `1.jpg` collide).

use std::fs;
use std::path::Path;

use crate::error::ValidationError;
use crate::validation::{parse_int_prefix, strip_extension};

/// Inclusive floor bounds for deck uploads
///
/// An explicit structure so a `min_floor` of exactly 0 is an ordinary
/// value, never mistaken for "use the default".
#[derive(Debug, Clone, Copy)]
pub struct SlotRules {
    pub min_floor: i64,
    pub max_floor: i64,
}

impl Default for SlotRules {
    fn default() -> Self {
        Self {
            min_floor: 0,
            max_floor: 25,
        }
    }
}

/// Validate that `filename` may join the deck at `deck_path`
///
/// The stem must be a base-10 integer (optional leading minus) within the
/// configured bounds, the deck directory must exist, and no existing file
/// in the deck may already claim the same floor number. Returns the parsed
/// floor on success.
pub fn validate_slot(
    filename: &str,
    deck_path: &Path,
    rules: &SlotRules,
) -> Result<i64, ValidationError> {
    let stem = strip_extension(filename);
    if !is_integer(stem) {
        return Err(ValidationError::NotInteger(filename.to_string()));
    }
    let floor: i64 = stem
        .parse()
        .map_err(|_| ValidationError::NotInteger(filename.to_string()))?;

    if floor < rules.min_floor || floor > rules.max_floor {
        return Err(ValidationError::OutOfRange {
            floor,
            min: rules.min_floor,
            max: rules.max_floor,
        });
    }

    match fs::symlink_metadata(deck_path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) | Err(_) => {
            return Err(ValidationError::DeckNotFound(
                deck_path.to_string_lossy().to_string(),
            ));
        }
    }

    for entry in fs::read_dir(deck_path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if parse_int_prefix(strip_extension(&name)) == Some(floor) {
            return Err(ValidationError::SlotTaken(floor));
        }
    }

    Ok(floor)
}

/// Full-string integer check: optional leading minus, then digits only
fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn deck_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for f in files {
            fs::write(dir.path().join(f), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn test_extension_is_not_slot_identity() {
        let deck = deck_with(&["1.png"]);
        let err = validate_slot("1.jpg", deck.path(), &SlotRules::default()).unwrap_err();
        assert!(matches!(err, ValidationError::SlotTaken(1)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let deck = deck_with(&[]);
        let rules = SlotRules::default();
        assert_eq!(validate_slot("0.png", deck.path(), &rules).unwrap(), 0);
        assert_eq!(validate_slot("25.png", deck.path(), &rules).unwrap(), 25);

        let err = validate_slot("26.png", deck.path(), &rules).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                floor: 26,
                min: 0,
                max: 25
            }
        ));
        let err = validate_slot("-1.png", deck.path(), &rules).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { floor: -1, .. }));
    }

    #[test]
    fn test_min_floor_zero_is_honored() {
        let deck = deck_with(&[]);
        let rules = SlotRules {
            min_floor: 0,
            max_floor: 3,
        };
        assert!(validate_slot("0.png", deck.path(), &rules).is_ok());
        assert!(validate_slot("-1.png", deck.path(), &rules).is_err());
    }

    #[test]
    fn test_negative_bounds() {
        let deck = deck_with(&[]);
        let rules = SlotRules {
            min_floor: -5,
            max_floor: 5,
        };
        assert_eq!(validate_slot("-3.png", deck.path(), &rules).unwrap(), -3);
    }

    #[test]
    fn test_non_integer_stem_rejected() {
        let deck = deck_with(&[]);
        let rules = SlotRules::default();
        assert!(matches!(
            validate_slot("abc.png", deck.path(), &rules),
            Err(ValidationError::NotInteger(_))
        ));
        // Trailing garbage after the digits is not an integer stem
        assert!(matches!(
            validate_slot("1a.png", deck.path(), &rules),
            Err(ValidationError::NotInteger(_))
        ));
        assert!(matches!(
            validate_slot("1.2.png", deck.path(), &rules),
            Err(ValidationError::NotInteger(_))
        ));
    }

    #[test]
    fn test_missing_deck_rejected() {
        let dir = TempDir::new().unwrap();
        let err = validate_slot(
            "1.png",
            &dir.path().join("nonexistent"),
            &SlotRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::DeckNotFound(_)));
    }

    #[test]
    fn test_non_numeric_neighbors_do_not_collide() {
        let deck = deck_with(&["notes.txt", "2.png"]);
        assert!(validate_slot("1.png", deck.path(), &SlotRules::default()).is_ok());
        assert!(matches!(
            validate_slot("2.jpg", deck.path(), &SlotRules::default()),
            Err(ValidationError::SlotTaken(2))
        ));
    }

}
