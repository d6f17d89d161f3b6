//! One-hot encoding against frozen domains, and the output line format.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::DomainSet;
use crate::error::{BinpatError, Result};

/// Bits of one encoded pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPattern {
    /// One entry per bit, each `0` or `1`.
    pub bits: Vec<u8>,
    /// Number of columns whose value was not in the domain (all-zero block).
    pub unmatched: usize,
}

impl EncodedPattern {
    /// True when no bit is set.
    pub fn is_all_zero(&self) -> bool {
        self.bits.iter().all(|&bit| bit == 0)
    }
}

impl DomainSet {
    /// Expand a pattern into its one-hot bits.
    ///
    /// Columns are laid out in order, each block following its domain's
    /// first-seen order. A value missing from its domain leaves the whole
    /// block at zero. Extra pattern columns beyond the domains are ignored;
    /// callers check the length first.
    pub fn encode<V: AsRef<[u8]>>(&self, pattern: &[V]) -> EncodedPattern {
        let mut bits = vec![0u8; self.width()];
        let mut unmatched = 0usize;
        let mut offset = 0usize;
        for (domain, value) in self.domains().iter().zip(pattern) {
            match domain.position(value) {
                Some(position) => bits[offset + position] = 1,
                None => unmatched += 1,
            }
            offset += domain.len();
        }
        EncodedPattern { bits, unmatched }
    }

    /// Map encoded bits back to one value per column.
    ///
    /// An all-zero block decodes to `None`.
    pub fn decode(&self, bits: &[u8]) -> Result<Vec<Option<&[u8]>>> {
        let expected = self.width();
        if bits.len() != expected {
            return Err(BinpatError::WidthMismatch {
                expected,
                actual: bits.len(),
            });
        }
        let mut values = Vec::with_capacity(self.pattern_len());
        let mut offset = 0usize;
        for (column, domain) in self.domains().iter().enumerate() {
            let block = &bits[offset..offset + domain.len()];
            let set: Vec<usize> = block
                .iter()
                .enumerate()
                .filter(|(_, bit)| **bit != 0)
                .map(|(idx, _)| idx)
                .collect();
            let value = match set.as_slice() {
                [] => None,
                [position] => Some(domain.values()[*position].as_slice()),
                _ => {
                    return Err(BinpatError::NotOneHot {
                        column,
                        set: set.len(),
                    });
                }
            };
            values.push(value);
            offset += domain.len();
        }
        Ok(values)
    }
}

/// Writes encoded records as `label,b0,b1,...,bN,` lines.
///
/// Every bit, including the last, is followed by the delimiter. Fields are
/// never quoted.
pub struct PatternWriter<W: Write> {
    writer: csv::Writer<W>,
    written: u64,
}

impl<W: Write> PatternWriter<W> {
    pub fn new(writer: W, delimiter: u8) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);
        Self { writer, written: 0 }
    }

    /// Write one record.
    pub fn write_record(&mut self, label: &[u8], encoded: &EncodedPattern) -> Result<()> {
        self.writer.write_field(label)?;
        for bit in &encoded.bits {
            self.writer.write_field(if *bit == 0 { "0" } else { "1" })?;
        }
        // empty last field gives the trailing delimiter
        self.writer.write_field("")?;
        self.writer.write_record(std::iter::empty::<&[u8]>())?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the inner writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| BinpatError::Write {
                source: err.into_error(),
            })
    }
}

/// Parse one output line back into its label and bits.
pub fn parse_encoded_line(line: &[u8], delimiter: u8) -> Result<(&[u8], Vec<u8>)> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let line = line.strip_suffix(&[delimiter]).unwrap_or(line);
    let mut tokens = line.split(|&byte| byte == delimiter);
    let label = tokens.next().unwrap_or_default();
    if label.len() == line.len() {
        return Ok((label, Vec::new()));
    }
    let mut bits = Vec::new();
    for (position, token) in tokens.enumerate() {
        match token {
            b"0" => bits.push(0),
            b"1" => bits.push(1),
            other => {
                return Err(BinpatError::InvalidBit {
                    position,
                    value: String::from_utf8_lossy(other).into_owned(),
                });
            }
        }
    }
    Ok((label, bits))
}
