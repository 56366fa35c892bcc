//! PCI-DSS compliant masking utilities.
//!
//! PCI-DSS allows displaying:
//! - First 6 digits (BIN) and last 4 digits
//! - Only the last 4 digits (preferred for customer-facing display)
//!
//! Never display or log the full card number.

use crate::CardDigits;

/// Masks a card number showing only the last 4 digits.
///
/// Format: `****-****-****-1234`, grouped in fours from the left.
///
/// # Example
///
/// ```
/// use bank_card_validator::validate_format;
///
/// let card = validate_format("4532015112830366").unwrap();
/// assert_eq!(card.masked(), "****-****-****-0366");
/// ```
pub fn mask_card(card: &CardDigits) -> String {
    let len = card.len();
    let masked_count = len.saturating_sub(4);

    let mut result = String::with_capacity(len + len / 4);
    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count > 0 && masked_count % 4 == 0 {
        result.push('-');
    }

    result.push_str(&card.last_four());
    result
}

/// Masks a card number showing the BIN (first 6) and last 4 digits.
///
/// Format: `453201******0366`
///
/// ```
/// use bank_card_validator::validate_format;
///
/// let card = validate_format("4532015112830366").unwrap();
/// assert_eq!(card.masked_with_bin(), "453201******0366");
/// ```
pub fn mask_with_bin(card: &CardDigits) -> String {
    let digits = card.digits();
    let len = digits.len();

    let mut result = String::with_capacity(len);
    result.extend(digits[..6].iter().map(|&d| (b'0' + d) as char));
    result.extend(std::iter::repeat('*').take(len - 10));
    result.push_str(&card.last_four());
    result
}

/// Masks an arbitrary input line for log output.
///
/// Every ASCII digit except the last four is replaced with `*`; other
/// characters are kept. Used for input that failed validation and so never
/// became a [`CardDigits`].
pub fn mask_input(input: &str) -> String {
    let total = input.chars().filter(char::is_ascii_digit).count();
    let keep_from = total.saturating_sub(4);

    let mut seen = 0usize;
    input
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen <= keep_from {
                    return '*';
                }
            }
            c
        })
        .collect()
}
