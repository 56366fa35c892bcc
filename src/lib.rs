//! # bank_card_validator
//!
//! Payment card number validation with issuing bank lookup.
//!
//! ## Features
//!
//! - Format validation (13-19 ASCII digits)
//! - Luhn checksum validation
//! - Bank identification from a BIN range table
//! - Card number masking for display
//! - Interactive line-based session (`bankcheck` binary)
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_card_validator::{check, validate_luhn, extract_bin, ValidationError};
//! use bank_card_validator::directory::{BankDirectory, BankLookup};
//!
//! let directory = BankDirectory::parse("TestBank,800000,800999\n").unwrap();
//!
//! // Format + Luhn in one step
//! let card = check("8004560000000002").unwrap();
//! assert_eq!(card.bin(), 800456);
//! assert_eq!(directory.identify(card.bin()), "TestBank");
//!
//! // Safe for logging - never exposes full card number
//! println!("Card: {}", card.masked()); // "****-****-****-0002"
//!
//! // Format and checksum failures are distinct
//! assert!(check("8004-5600-0000-0002").unwrap_err().is_format_error());
//! assert_eq!(check("1234567890123456").unwrap_err(), ValidationError::InvalidChecksum);
//!
//! // String-level helpers
//! assert!(validate_luhn("4532015112830366"));
//! assert_eq!(extract_bin("453201xxxxxxxxxx"), 453201);
//! ```
//!
//! ## Bank Range Files
//!
//! One `name,from,to` record per line, bounds are inclusive 6-digit BINs.
//! Malformed lines are skipped with a warning; see [`directory::RangeLoader`].
//!
//! ```text
//! TestBank,800000,800999
//! Visa Bank,453200,453299
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | `bankcheck` interactive tool (default) |
//!
//! ## Security
//!
//! - Card numbers stored in fixed-size arrays, not heap strings
//! - Automatic memory zeroization when `CardDigits` is dropped
//! - `Debug` and `Display` show masked numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod directory;
pub mod error;
pub mod luhn;
pub mod mask;
pub mod session;
pub mod validate;

// Re-export main types at crate root
pub use card::{CardDigits, BIN_DIGITS, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use directory::{BankDirectory, BankLookup, BankRange, DirectoryError, UNKNOWN_BANK};
pub use error::ValidationError;
pub use session::{OutputFormat, Outcome, Session, SessionState, SessionStats};
pub use validate::{check, extract_bin, is_valid, is_valid_format, validate_format, validate_luhn};
