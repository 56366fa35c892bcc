//! Rich error types for card number validation.
//!
//! Provides detailed, actionable error messages that explain exactly why validation failed.

use std::fmt;

/// Errors that can occur while validating a card number entered by the user.
///
/// Format failures and checksum failures are kept apart so the caller can
/// word its messages differently for each (see [`ValidationError::is_format_error`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty after trimming surrounding whitespace.
    Empty,

    /// The card number has too few characters.
    TooShort {
        /// The actual number of characters provided.
        length: usize,
        /// The minimum required digits (13).
        minimum: usize,
    },

    /// The card number has too many characters.
    TooLong {
        /// The actual number of characters provided.
        length: usize,
        /// The maximum allowed digits (19).
        maximum: usize,
    },

    /// A character other than an ASCII digit was found.
    InvalidCharacter {
        /// The position in the trimmed input (0-indexed, in characters).
        position: usize,
        /// The invalid character that was found.
        character: char,
    },

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    InvalidChecksum,
}

impl ValidationError {
    /// Returns true for length and character failures, false for checksum failures.
    #[inline]
    pub const fn is_format_error(&self) -> bool {
        !matches!(self, Self::InvalidChecksum)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "card number is empty"),

            Self::TooShort { length, minimum } => {
                write!(
                    f,
                    "card number too short: got {} characters, minimum is {} digits",
                    length, minimum
                )
            }

            Self::TooLong { length, maximum } => {
                write!(
                    f,
                    "card number too long: got {} characters, maximum is {} digits",
                    length, maximum
                )
            }

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only digits allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::InvalidChecksum => {
                write!(f, "invalid checksum (Luhn check failed) - please verify the card number")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ValidationError::Empty.to_string(), "card number is empty");

        assert_eq!(
            ValidationError::TooShort {
                length: 10,
                minimum: 13
            }
            .to_string(),
            "card number too short: got 10 characters, minimum is 13 digits"
        );

        assert_eq!(
            ValidationError::TooLong {
                length: 20,
                maximum: 19
            }
            .to_string(),
            "card number too long: got 20 characters, maximum is 19 digits"
        );

        assert_eq!(
            ValidationError::InvalidCharacter {
                position: 5,
                character: 'x'
            }
            .to_string(),
            "invalid character 'x' at position 5 (only digits allowed)"
        );

        assert_eq!(
            ValidationError::InvalidChecksum.to_string(),
            "invalid checksum (Luhn check failed) - please verify the card number"
        );
    }

    #[test]
    fn test_format_vs_checksum() {
        assert!(ValidationError::Empty.is_format_error());
        assert!(ValidationError::TooShort {
            length: 3,
            minimum: 13
        }
        .is_format_error());
        assert!(ValidationError::InvalidCharacter {
            position: 0,
            character: 'a'
        }
        .is_format_error());
        assert!(!ValidationError::InvalidChecksum.is_format_error());
    }

    #[test]
    fn test_control_character_is_escaped() {
        let err = ValidationError::InvalidCharacter {
            position: 2,
            character: '\t',
        };
        assert!(err.to_string().contains("\\t"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
    }
}
