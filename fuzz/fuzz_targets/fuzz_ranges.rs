//! Fuzz target for the bank range loader.
//!
//! Arbitrary bytes must never panic or fail the load; every loaded range
//! must satisfy the BIN bounds.

#![no_main]

use bank_card_validator::directory::{BankLookup, RangeLoader, MAX_BIN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let report = RangeLoader::new()
        .load_report(data)
        .expect("in-memory sources cannot fail to read");

    for range in report.directory.iter() {
        assert!(range.bin_from() <= range.bin_to());
        assert!(range.bin_to() <= MAX_BIN);
        assert!(report.directory.find(range.bin_from()).is_some());
    }
});
