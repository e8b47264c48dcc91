//! ISBN normalization and validation.
//!
//! Books are stored with their ISBN in canonical form: digits and `X` only,
//! uppercase, 10 or 13 characters. Normalization and validation are separate
//! steps because an input that normalizes to the empty string is a different
//! user error than one with the wrong number of characters.

use std::fmt;

/// Reduce a raw ISBN string to canonical form.
///
/// Uppercases the input and strips every character that is not a digit or
/// `X`. The result may be empty; callers must reject that case before
/// calling [`validate`].
pub fn normalize(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X')
        .collect()
}

/// Validation failure for a normalized ISBN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnError {
    /// Not 10 or 13 characters long.
    Length,
    /// A 13-character ISBN containing `X`.
    XIn13,
    /// A 10-character ISBN with `X` anywhere but the last position.
    XNotLast,
}

impl fmt::Display for IsbnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsbnError::Length => {
                write!(f, "ISBN must be 10 or 13 characters after normalization")
            }
            IsbnError::XIn13 => write!(f, "13-character ISBNs cannot contain X"),
            IsbnError::XNotLast => write!(
                f,
                "X only allowed as the final character of a 10-character ISBN"
            ),
        }
    }
}

impl std::error::Error for IsbnError {}

/// Validate a normalized, non-empty ISBN. Rules are checked in order and the
/// first failure wins.
pub fn validate(isbn: &str) -> Result<(), IsbnError> {
    match isbn.len() {
        13 => {
            if isbn.contains('X') {
                Err(IsbnError::XIn13)
            } else {
                Ok(())
            }
        }
        10 => {
            // Normalized ISBNs are ASCII, so byte indexing is safe here.
            if isbn[..9].contains('X') {
                Err(IsbnError::XNotLast)
            } else {
                Ok(())
            }
        }
        _ => Err(IsbnError::Length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_hyphenated_isbn13() {
        let isbn = normalize("978-0-618-26027-4");
        assert_eq!(isbn, "9780618260274");
        assert_eq!(validate(&isbn), Ok(()));
    }

    #[test]
    fn normalizes_hyphenated_isbn10() {
        let isbn = normalize("0-451-16773-3");
        assert_eq!(isbn, "0451167733");
        assert_eq!(validate(&isbn), Ok(()));
    }

    #[test]
    fn normalize_strips_everything_else() {
        assert_eq!(normalize("abc-def"), "");
        assert_eq!(normalize(" 0 451x16773 "), "0451X16773");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["978-0-618-26027-4", "0-451-16773-3", "055X", "abc-def"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn rejects_bad_lengths() {
        for len in [9, 11, 12, 14] {
            let isbn = "4".repeat(len);
            assert_eq!(validate(&isbn), Err(IsbnError::Length));
        }
    }

    #[test]
    fn x_only_final_in_isbn10() {
        assert_eq!(validate("043942089X"), Ok(()));
        for pos in 0..9 {
            let mut chars: Vec<char> = "0439420891".chars().collect();
            chars[pos] = 'X';
            let isbn: String = chars.into_iter().collect();
            assert_eq!(validate(&isbn), Err(IsbnError::XNotLast), "pos {pos}");
        }
    }

    #[test]
    fn multiple_x_rejected() {
        assert_eq!(validate("X43942089X"), Err(IsbnError::XNotLast));
        assert_eq!(validate("04394XX89X"), Err(IsbnError::XNotLast));
    }

    #[test]
    fn no_x_in_isbn13() {
        assert_eq!(validate("978045152493X"), Err(IsbnError::XIn13));
        assert_eq!(validate("X780451524935"), Err(IsbnError::XIn13));
        assert_eq!(validate("9780451524935"), Ok(()));
    }
}
