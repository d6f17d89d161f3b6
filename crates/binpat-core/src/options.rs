//! Immutable configuration shared by both passes.

use std::fmt;

use crate::error::{BinpatError, Result};

/// Which raw columns are excluded from the pattern.
///
/// Built from the signed `skip` parameter: positive values drop leading
/// columns, negative values drop trailing columns. `skip == 0` belongs to the
/// non-positive branch and keeps nothing, so every pattern is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    /// Drop the first `n` columns; the label is the first raw column.
    Leading(usize),
    /// Drop the last `n` columns; the label is the second-to-last raw column.
    Trailing(usize),
    /// Empty pattern; the label is the second-to-last raw column.
    Zero,
}

impl SkipRule {
    /// Convert the signed command-line value.
    pub fn from_signed(skip: i64) -> Self {
        match skip {
            0 => Self::Zero,
            n if n > 0 => Self::Leading(n.unsigned_abs() as usize),
            n => Self::Trailing(n.unsigned_abs() as usize),
        }
    }

    /// The signed value this rule was built from.
    ///
    /// Counts beyond the `i64` range saturate.
    pub fn as_signed(self) -> i64 {
        match self {
            Self::Leading(n) => i64::try_from(n).unwrap_or(i64::MAX),
            Self::Trailing(n) => i64::try_from(n).map_or(i64::MIN, |n| -n),
            Self::Zero => 0,
        }
    }
}

impl From<i64> for SkipRule {
    fn from(skip: i64) -> Self {
        Self::from_signed(skip)
    }
}

impl fmt::Display for SkipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leading(n) => write!(f, "drop first {n} column(s)"),
            Self::Trailing(n) => write!(f, "drop last {n} column(s)"),
            Self::Zero => f.write_str("empty pattern"),
        }
    }
}

/// Options for reading and encoding a dataset.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Column exclusion rule.
    pub skip: SkipRule,

    /// Field delimiter used for input and output.
    /// Defaults to `,`.
    pub delimiter: u8,

    /// Lines starting with this byte are ignored.
    /// Defaults to `None`.
    pub comment: Option<u8>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            skip: SkipRule::Leading(1),
            delimiter: b',',
            comment: None,
        }
    }
}

impl EncodeOptions {
    /// Create options for the given signed skip value.
    pub fn new(skip: i64) -> Self {
        Self {
            skip: SkipRule::from_signed(skip),
            ..Self::default()
        }
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Skip lines starting with the given byte.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }
}

/// Parse a delimiter or comment marker given as text.
///
/// Accepts a single ASCII character or the escape `\t`.
pub fn parse_single_byte(value: &str) -> Result<u8> {
    if value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(BinpatError::InvalidDelimiter {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_rule_from_signed() {
        assert_eq!(SkipRule::from_signed(1), SkipRule::Leading(1));
        assert_eq!(SkipRule::from_signed(3), SkipRule::Leading(3));
        assert_eq!(SkipRule::from_signed(-2), SkipRule::Trailing(2));
        assert_eq!(SkipRule::from_signed(0), SkipRule::Zero);
        assert_eq!(SkipRule::from_signed(i64::MIN).as_signed(), i64::MIN);
    }

    #[test]
    fn oversized_counts_saturate_when_signed() {
        assert_eq!(SkipRule::Leading(usize::MAX).as_signed(), i64::MAX);
        assert_eq!(SkipRule::Trailing(usize::MAX).as_signed(), i64::MIN);
    }

    #[test]
    fn skip_rule_round_trips_signed_value() {
        for skip in [-4i64, -1, 0, 1, 5] {
            assert_eq!(SkipRule::from(skip).as_signed(), skip);
        }
    }

    #[test]
    fn parses_single_byte_delimiters() {
        assert_eq!(parse_single_byte(",").unwrap(), b',');
        assert_eq!(parse_single_byte(";").unwrap(), b';');
        assert_eq!(parse_single_byte("\\t").unwrap(), b'\t');
        assert!(parse_single_byte("").is_err());
        assert!(parse_single_byte(",,").is_err());
        assert!(parse_single_byte("é").is_err());
    }

    #[test]
    fn builder_sets_fields() {
        let options = EncodeOptions::new(-1)
            .with_delimiter(b';')
            .with_comment(Some(b'#'));
        assert_eq!(options.skip, SkipRule::Trailing(1));
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.comment, Some(b'#'));
    }
}
