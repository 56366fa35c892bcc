//! Verified card number digits.
//!
//! [`CardDigits`] is the only way a card number travels past format
//! validation: once constructed, the digit count is within bounds and every
//! element is a value in `0..=9`, so the checksum and BIN code never re-check
//! the characters.

use std::fmt;
use zeroize::Zeroize;

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Number of leading digits that form the Bank Identification Number.
pub const BIN_DIGITS: usize = 6;

/// A verified card number with secure memory handling.
///
/// The digits are stored in a fixed-size array that is zeroed when the value
/// is dropped. `Debug` and `Display` only ever show the masked number.
#[derive(Clone)]
pub struct CardDigits {
    digits: [u8; MAX_CARD_DIGITS],
    digit_count: u8,
}

impl CardDigits {
    /// Internal constructor. `digits[..digit_count]` must hold values 0-9 and
    /// `digit_count` must lie within `MIN_CARD_DIGITS..=MAX_CARD_DIGITS`.
    #[inline]
    pub(crate) fn new(digits: [u8; MAX_CARD_DIGITS], digit_count: u8) -> Self {
        debug_assert!((MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&(digit_count as usize)));
        Self {
            digits,
            digit_count,
        }
    }

    /// Returns the number of digits in the card number.
    #[inline]
    pub const fn len(&self) -> usize {
        self.digit_count as usize
    }

    /// Always false; a verified card number has at least 13 digits.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.digit_count == 0
    }

    /// Returns the digit values (0-9), leftmost first.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Prefer `masked()` for display.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.digit_count as usize]
    }

    /// Returns the 6-digit BIN as an integer in `0..=999_999`.
    #[inline]
    pub fn bin(&self) -> u32 {
        self.digits[..BIN_DIGITS]
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32)
    }

    /// Returns the last four digits as a string.
    ///
    /// Safe for logging and display per PCI-DSS requirements.
    pub fn last_four(&self) -> String {
        let len = self.digit_count as usize;
        render(&self.digits[len - 4..len])
    }

    /// Returns true if the number passes the Luhn checksum.
    #[inline]
    pub fn passes_luhn(&self) -> bool {
        crate::luhn::validate(self.digits())
    }

    /// Returns the card number with masking for safe display.
    ///
    /// Format: `****-****-****-0366` (shows only last 4 digits).
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    /// Returns the card number with the BIN visible.
    ///
    /// Format: `453201******0366` (shows first 6 and last 4 digits).
    #[inline]
    pub fn masked_with_bin(&self) -> String {
        crate::mask::mask_with_bin(self)
    }

    /// Returns the full card number as a string.
    ///
    /// # Security Warning
    ///
    /// This method exposes the full card number. Never log the result.
    pub fn number(&self) -> String {
        render(self.digits())
    }
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

impl fmt::Debug for CardDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDigits")
            .field("number", &self.masked())
            .field("length", &self.digit_count)
            .finish()
    }
}

impl fmt::Display for CardDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Drop for CardDigits {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_card(slice: &[u8]) -> CardDigits {
        let mut digits = [0u8; MAX_CARD_DIGITS];
        digits[..slice.len()].copy_from_slice(slice);
        CardDigits::new(digits, slice.len() as u8)
    }

    #[test]
    fn test_bin() {
        let card = make_card(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6]);
        assert_eq!(card.bin(), 453201);

        let card = make_card(&[0, 0, 0, 1, 2, 3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(card.bin(), 123);
    }

    #[test]
    fn test_last_four_and_number() {
        let card = make_card(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6]);
        assert_eq!(card.last_four(), "0366");
        assert_eq!(card.number(), "4532015112830366");
        assert_eq!(card.len(), 16);
        assert!(!card.is_empty());
    }

    #[test]
    fn test_passes_luhn() {
        assert!(make_card(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6]).passes_luhn());
        assert!(!make_card(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6]).passes_luhn());
    }

    #[test]
    fn test_debug_and_display_are_masked() {
        let card = make_card(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6]);
        let debug = format!("{:?}", card);
        let display = card.to_string();

        assert!(!debug.contains("4532015112830366"));
        assert!(debug.contains("****"));
        assert!(!display.contains("4532015112830366"));
        assert!(display.ends_with("0366"));
    }

    #[test]
    fn test_card_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardDigits>();
    }
}
