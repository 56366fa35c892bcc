//! Card number validation steps.
//!
//! The pipeline is format validation ([`validate_format`]) followed by the
//! Luhn checksum; [`check`] runs both. Format validation yields a
//! [`CardDigits`], which the later steps consume without re-reading the text.
//!
//! [`validate_luhn`] and [`extract_bin`] operate on raw text and are kept
//! for callers that hold a string rather than a verified value. Both treat
//! bad input defensively instead of failing loudly.

use crate::card::{CardDigits, BIN_DIGITS, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::error::ValidationError;
use crate::luhn;

/// Validates the format of a card number.
///
/// Surrounding whitespace is trimmed. The remaining text must be between
/// 13 and 19 characters long and consist of ASCII digits only. Length is
/// checked before content, so `"abc"` is reported as too short.
///
/// # Example
///
/// ```
/// use bank_card_validator::{validate_format, ValidationError};
///
/// let card = validate_format("  4532015112830366\n").unwrap();
/// assert_eq!(card.len(), 16);
/// assert_eq!(card.bin(), 453201);
///
/// let err = validate_format("4532 0151 1283 0366").unwrap_err();
/// assert_eq!(err, ValidationError::InvalidCharacter { position: 4, character: ' ' });
/// ```
pub fn validate_format(input: &str) -> Result<CardDigits, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = trimmed.chars().count();
    if length < MIN_CARD_DIGITS {
        return Err(ValidationError::TooShort {
            length,
            minimum: MIN_CARD_DIGITS,
        });
    }
    if length > MAX_CARD_DIGITS {
        return Err(ValidationError::TooLong {
            length,
            maximum: MAX_CARD_DIGITS,
        });
    }

    let mut digits = [0u8; MAX_CARD_DIGITS];
    for (position, character) in trimmed.chars().enumerate() {
        if !character.is_ascii_digit() {
            return Err(ValidationError::InvalidCharacter {
                position,
                character,
            });
        }
        digits[position] = (character as u8) - b'0';
    }

    Ok(CardDigits::new(digits, length as u8))
}

/// Returns true if [`validate_format`] would accept the input.
#[inline]
pub fn is_valid_format(input: &str) -> bool {
    validate_format(input).is_ok()
}

/// Checks a card number against the Luhn checksum.
///
/// The input must consist of ASCII digits only; any other character
/// (including whitespace) makes the check fail. This is a re-check for raw
/// strings; [`check`] is the primary gate.
///
/// ```
/// use bank_card_validator::validate_luhn;
///
/// assert!(validate_luhn("4532015112830366"));
/// assert!(!validate_luhn("1234567890123456"));
/// ```
#[inline]
pub fn validate_luhn(input: &str) -> bool {
    luhn::validate_ascii(input)
}

/// Extracts the 6-digit BIN from the start of a card number.
///
/// The caller is expected to have validated the number already. If the
/// first six characters are missing or are not all ASCII digits, a warning
/// is logged and `0` is returned.
///
/// ```
/// use bank_card_validator::extract_bin;
///
/// assert_eq!(extract_bin("453201xxxxxxxxxx"), 453201);
/// assert_eq!(extract_bin("4532"), 0);
/// ```
pub fn extract_bin(card_number: &str) -> u32 {
    let prefix = match card_number.get(..BIN_DIGITS) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => prefix,
        _ => {
            tracing::warn!(
                input_len = card_number.len(),
                "cannot extract BIN: first {} characters are not all digits",
                BIN_DIGITS
            );
            return 0;
        }
    };

    prefix
        .bytes()
        .fold(0u32, |acc, b| acc * 10 + (b - b'0') as u32)
}

/// Runs format validation followed by the Luhn checksum.
///
/// # Returns
///
/// * `Ok(CardDigits)` - the verified number, ready for BIN lookup
/// * `Err(ValidationError)` - a format error, or `InvalidChecksum`
///
/// # Example
///
/// ```
/// use bank_card_validator::{check, ValidationError};
///
/// let card = check("4532015112830366").unwrap();
/// assert_eq!(card.bin(), 453201);
///
/// assert_eq!(check("1234567890123456").unwrap_err(), ValidationError::InvalidChecksum);
/// ```
pub fn check(input: &str) -> Result<CardDigits, ValidationError> {
    let card = validate_format(input)?;
    if !card.passes_luhn() {
        return Err(ValidationError::InvalidChecksum);
    }
    Ok(card)
}

/// Returns true if the card number passes both format and checksum validation.
#[inline]
pub fn is_valid(input: &str) -> bool {
    check(input).is_ok()
}
