//! Upload validation
//!
//! Predicates deciding whether a proposed collection name or uploaded file
//! may be accepted: the name character-set check, deck floor-slot
//! validation, and videoscrubbing pair validation.

pub mod name;
pub mod pair;
pub mod slot;

pub use name::is_valid_name;
pub use pair::validate_pair;
pub use slot::{SlotRules, validate_slot};

/// Strip a trailing extension from a filename
///
/// Removes the last `.` and everything after it, but only when that suffix
/// is non-empty and free of further dots and path separators, so
/// `"1.2.png"` becomes `"1.2"` while `"file."` is left untouched.
pub(crate) fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => {
            let suffix = &filename[idx + 1..];
            if !suffix.is_empty() && !suffix.contains('/') {
                &filename[..idx]
            } else {
                filename
            }
        }
        None => filename,
    }
}

/// Parse the leading integer prefix of a string, if any
///
/// Accepts an optional leading minus followed by at least one digit and
/// ignores whatever trails the digits, so `"12.png"` yields 12 and
/// `"abc"` yields nothing.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let end = digits
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .count();
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("1.png"), "1");
        assert_eq!(strip_extension("forward.mp4"), "forward");
        assert_eq!(strip_extension("1.2.png"), "1.2");
        assert_eq!(strip_extension("noext"), "noext");
        assert_eq!(strip_extension("file."), "file.");
        assert_eq!(strip_extension(".png"), "");
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("12.png"), Some(12));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("0"), Some(0));
        assert_eq!(parse_int_prefix("7abc"), Some(7));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }
}
