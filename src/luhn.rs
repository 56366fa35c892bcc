//! Luhn algorithm implementation for card number validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate credit card numbers and other identification numbers.
//!
//! Two entry points are provided: [`validate`] works on digit values that
//! have already been verified (see [`crate::CardDigits`]), while
//! [`validate_ascii`] takes raw text and fails on the first non-digit.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise. An empty slice is
/// never valid.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// # Example
///
/// ```
/// use bank_card_validator::luhn::validate;
///
/// let digits = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6];
/// assert!(validate(&digits));
///
/// let invalid = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 7];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) == 0
}

/// Validates a card number given as text.
///
/// Digits are scanned right to left; any character that is not an ASCII
/// digit fails validation immediately. No whitespace is stripped.
///
/// ```
/// use bank_card_validator::luhn::validate_ascii;
///
/// assert!(validate_ascii("4532015112830366"));
/// assert!(!validate_ascii("1234567890123456"));
/// assert!(!validate_ascii("4532-0151-1283-0366"));
/// ```
pub fn validate_ascii(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, byte) in input.bytes().rev().enumerate() {
        if !byte.is_ascii_digit() {
            return false;
        }
        sum = (sum + weigh(byte - b'0', i)) % 10;
    }

    sum == 0
}

/// Computes the Luhn sum modulo 10 for a sequence of digits.
///
/// Position 0 is the rightmost digit and is never doubled. The sum is
/// reduced at every step, so input length is unbounded.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    residue(digits, 0)
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes what the check digit
/// should be for the number to pass Luhn validation.
///
/// # Example
///
/// ```
/// use bank_card_validator::luhn::generate_check_digit;
///
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(generate_check_digit(&partial), 6);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit shifts one position left once the check digit is appended.
    ((10 - residue(digits, 1)) % 10) as u8
}

/// Luhn sum modulo 10, with the rightmost digit at position `offset`.
#[inline]
fn residue(digits: &[u8], offset: usize) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .fold(0, |sum, (i, &d)| (sum + weigh(d, i + offset)) % 10)
}

/// Contribution of `digit` at `position` (0 = rightmost) to the Luhn sum.
#[inline]
fn weigh(digit: u8, position: usize) -> u32 {
    if position % 2 == 1 {
        DOUBLE_TABLE[digit as usize] as u32
    } else {
        digit as u32
    }
}
