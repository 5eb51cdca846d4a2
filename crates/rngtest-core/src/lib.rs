//! # rngtest-core
//!
//! Symbol sequences for statistical randomness testing.
//!
//! A [`Sequence`] is an immutable buffer of symbols drawn from one of two
//! alphabets ([`Domain::Binary`] or [`Domain::Decimal`]). Sequences are built
//! once by the ingestion functions in [`ingest`] and then handed read-only to
//! every test in `rngtest-tests`.
//!
//! ## Quick Start
//!
//! ```
//! use rngtest_core::{Domain, parse_sequence};
//!
//! let seq = parse_sequence(Domain::Binary, "1110 0011 0001").unwrap();
//! assert_eq!(seq.len(), 12);
//! assert_eq!(seq.count_of(1), 6);
//! ```
//!
//! Input text is one symbol per ASCII digit; whitespace is ignored so files
//! may be wrapped or grouped freely.

pub mod error;
pub mod ingest;
pub mod sequence;

pub use error::SequenceError;
pub use ingest::{parse_sequence, read_fips_sequence, read_sequence, read_sequence_from};
pub use sequence::{Domain, FIPS_LENGTH, Sequence};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
