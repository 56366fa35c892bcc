//! Fuzz target for card validation.
//!
//! Tests that validation never panics and that its steps agree.

#![no_main]

use bank_card_validator::{check, extract_bin, is_valid_format, validate_format, validate_luhn};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = extract_bin(data);
    let _ = validate_luhn(data);

    match validate_format(data) {
        Ok(card) => {
            let trimmed = data.trim();
            assert_eq!(card.len(), trimmed.len());
            assert_eq!(card.bin(), extract_bin(trimmed));
            assert_eq!(card.passes_luhn(), validate_luhn(trimmed));
            assert_eq!(check(data).is_ok(), card.passes_luhn());
            assert!(!card.masked().contains(trimmed));
        }
        Err(_) => {
            assert!(!is_valid_format(data));
            assert!(check(data).is_err());
        }
    }
});
