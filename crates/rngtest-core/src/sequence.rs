//! Immutable symbol buffers and their alphabets.

use std::str::FromStr;
use std::sync::Arc;

use crate::error::SequenceError;

/// Number of bits in a FIPS 140-1 test sample.
pub const FIPS_LENGTH: usize = 20_000;

/// Alphabet a sequence is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Bits: 0 or 1.
    Binary,
    /// Decimal digits: 0 through 9.
    Decimal,
}

impl Domain {
    /// Number of distinct symbols in the alphabet.
    pub fn radix(self) -> usize {
        match self {
            Self::Binary => 2,
            Self::Decimal => 10,
        }
    }

    /// Whether `symbol` belongs to this alphabet.
    pub fn contains(self, symbol: u8) -> bool {
        (symbol as usize) < self.radix()
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Decimal => write!(f, "decimal"),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" | "bin" | "2" => Ok(Self::Binary),
            "decimal" | "dec" | "10" => Ok(Self::Decimal),
            _ => Err(format!("unknown domain '{s}' (expected binary or decimal)")),
        }
    }
}

/// A fixed-length, read-only run of symbols from one [`Domain`].
///
/// Cloning shares the underlying buffer, so a sequence can be handed to
/// several threads without copying. There is no way to mutate the symbols
/// once the sequence exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    domain: Domain,
    symbols: Arc<[u8]>,
}

impl Sequence {
    /// Build a sequence, checking every symbol against `domain`.
    pub fn new(domain: Domain, symbols: Vec<u8>) -> Result<Self, SequenceError> {
        if symbols.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some((offset, &symbol)) = symbols
            .iter()
            .enumerate()
            .find(|&(_, &s)| !domain.contains(s))
        {
            return Err(SequenceError::SymbolOutOfRange {
                symbol,
                domain,
                offset,
            });
        }
        Ok(Self {
            domain,
            symbols: symbols.into(),
        })
    }

    /// Unpack raw bytes into a binary sequence, MSB first per byte.
    pub fn from_packed_bytes(data: &[u8]) -> Result<Self, SequenceError> {
        let mut bits = Vec::with_capacity(data.len() * 8);
        for &byte in data {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1);
            }
        }
        Self::new(Domain::Binary, bits)
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Number of symbols, N.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: empty sequences are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Occurrences of `symbol` in the sequence.
    pub fn count_of(&self, symbol: u8) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.symbols
    }
}
