//! Reading sequences from text.
//!
//! The accepted format is a stream of ASCII digits, one symbol per digit.
//! Whitespace (spaces, tabs, newlines) is skipped so that sequences may be
//! grouped or wrapped. Any other byte is rejected with its offset.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::SequenceError;
use crate::sequence::{Domain, FIPS_LENGTH, Sequence};

/// Parse a sequence held in memory.
pub fn parse_sequence(domain: Domain, text: &str) -> Result<Sequence, SequenceError> {
    read_sequence_from(text.as_bytes(), domain, None)
}

/// Read a whole file as a sequence of `domain` symbols.
pub fn read_sequence(path: impl AsRef<Path>, domain: Domain) -> Result<Sequence, SequenceError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let seq = read_sequence_from(file, domain, None)?;
    log::debug!("read {} {domain} symbols from {}", seq.len(), path.display());
    Ok(seq)
}

/// Read exactly [`FIPS_LENGTH`] bits from a file. Trailing input is ignored.
pub fn read_fips_sequence(path: impl AsRef<Path>) -> Result<Sequence, SequenceError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let seq = read_sequence_from(file, Domain::Binary, Some(FIPS_LENGTH))?;
    log::debug!("read FIPS sample from {}", path.display());
    Ok(seq)
}

/// Read symbols from any reader.
///
/// With `limit`, reading stops once that many symbols have been collected and
/// the rest of the stream is left untouched; a stream that ends early is an
/// error. Without it the reader is drained to EOF.
pub fn read_sequence_from<R: Read>(
    reader: R,
    domain: Domain,
    limit: Option<usize>,
) -> Result<Sequence, SequenceError> {
    let mut reader = BufReader::new(reader);
    let mut symbols = Vec::with_capacity(limit.unwrap_or(0).min(1 << 20));
    let mut offset = 0usize;

    let full = |symbols: &Vec<u8>| limit.is_some_and(|n| symbols.len() >= n);

    while !full(&symbols) {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let mut used = 0;
        for &byte in buf {
            if full(&symbols) {
                break;
            }
            push_symbol(&mut symbols, byte, offset)?;
            offset += 1;
            used += 1;
        }
        reader.consume(used);
    }

    if let Some(needed) = limit {
        if symbols.len() < needed {
            return Err(SequenceError::TooShort {
                needed,
                got: symbols.len(),
            });
        }
    }

    log::debug!("parsed {} {domain} symbols from {offset} bytes", symbols.len());
    Sequence::new(domain, symbols)
}

fn push_symbol(symbols: &mut Vec<u8>, byte: u8, offset: usize) -> Result<(), SequenceError> {
    match byte {
        b'0'..=b'9' => symbols.push(byte - b'0'),
        b if b.is_ascii_whitespace() => {}
        b => {
            return Err(SequenceError::InvalidCharacter {
                ch: b as char,
                offset,
            });
        }
    }
    Ok(())
}
