//! Ingestion errors.

use thiserror::Error;

use crate::sequence::Domain;

/// Failure to build a [`Sequence`](crate::Sequence) from external input.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("failed to read sequence: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid character {ch:?} at byte offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("symbol {symbol} at position {offset} is outside the {domain} domain")]
    SymbolOutOfRange {
        symbol: u8,
        domain: Domain,
        offset: usize,
    },

    #[error("sequence is empty")]
    Empty,

    #[error("sequence too short: need {needed} symbols, got {got}")]
    TooShort { needed: usize, got: usize },
}
