//! Per-column value domains discovered during the first pass.
//!
//! A [`Domain`] keeps the distinct values of one pattern column in the order
//! they were first seen. That order is the bit layout of the encoding: the
//! value at position `k` owns bit `k` of the column's block. Membership is
//! decided on byte content, never on allocation identity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BinpatError, Result};
use crate::record::Extracted;

/// Distinct values of one column, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DomainValue>", into = "Vec<DomainValue>")]
pub struct Domain {
    values: Vec<Vec<u8>>,
    positions: HashMap<Vec<u8>, usize>,
}

impl Domain {
    /// Create an empty domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a domain from values already in bit order.
    ///
    /// Fails with [`BinpatError::DuplicateValue`] when a value repeats, since
    /// dropping it would shift every later bit.
    pub fn from_values<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let mut domain = Self::new();
        for value in values {
            let value = value.as_ref();
            if !domain.insert(value) {
                return Err(BinpatError::DuplicateValue {
                    value: String::from_utf8_lossy(value).into_owned(),
                });
            }
        }
        Ok(domain)
    }

    /// Append `value` unless an equal value is already present.
    ///
    /// Returns true when the value was new.
    pub fn insert(&mut self, value: impl AsRef<[u8]>) -> bool {
        let value = value.as_ref();
        if self.positions.contains_key(value) {
            return false;
        }
        self.positions.insert(value.to_vec(), self.values.len());
        self.values.push(value.to_vec());
        true
    }

    /// Bit position of `value` within this column's block.
    pub fn position(&self, value: impl AsRef<[u8]>) -> Option<usize> {
        self.positions.get(value.as_ref()).copied()
    }

    /// Values in bit order.
    pub fn values(&self) -> &[Vec<u8>] {
        &self.values
    }

    /// Values in bit order, as text (invalid UTF-8 replaced).
    pub fn values_lossy(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|value| String::from_utf8_lossy(value).into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One domain value as stored in JSON: a string when it is valid UTF-8,
/// otherwise its raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Text(String),
    Bytes(Vec<u8>),
}

impl DomainValue {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

impl From<Vec<u8>> for DomainValue {
    fn from(value: Vec<u8>) -> Self {
        match String::from_utf8(value) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Bytes(err.into_bytes()),
        }
    }
}

impl TryFrom<Vec<DomainValue>> for Domain {
    type Error = BinpatError;

    fn try_from(values: Vec<DomainValue>) -> Result<Self> {
        Self::from_values(values.into_iter().map(DomainValue::into_bytes))
    }
}

impl From<Domain> for Vec<DomainValue> {
    fn from(domain: Domain) -> Self {
        domain.values.into_iter().map(DomainValue::from).collect()
    }
}

/// Frozen domains for every pattern column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSet {
    domains: Vec<Domain>,
    records: u64,
}

impl DomainSet {
    /// Build a set directly from per-column domains.
    pub fn new(domains: Vec<Domain>, records: u64) -> Self {
        Self { domains, records }
    }

    /// Number of columns in every pattern.
    pub fn pattern_len(&self) -> usize {
        self.domains.len()
    }

    /// Total number of bits in an encoded pattern.
    pub fn width(&self) -> usize {
        self.domains.iter().map(Domain::len).sum()
    }

    /// Number of records seen while building.
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn get(&self, column: usize) -> Option<&Domain> {
        self.domains.get(column)
    }

    /// Starting bit offset of each column block.
    pub fn offsets(&self) -> Vec<usize> {
        let mut offset = 0usize;
        self.domains
            .iter()
            .map(|domain| {
                let start = offset;
                offset += domain.len();
                start
            })
            .collect()
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a set previously written by [`DomainSet::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accumulates domains record by record.
#[derive(Debug, Default)]
pub struct DomainBuilder {
    pattern_len: Option<usize>,
    domains: Vec<Domain>,
    records: u64,
}

impl DomainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern length fixed by the first record, if any was seen.
    pub fn pattern_len(&self) -> Option<usize> {
        self.pattern_len
    }

    /// Add one extracted record, `line` being its 1-based line number.
    pub fn observe(&mut self, line: u64, record: &Extracted<'_>) -> Result<()> {
        if record.label.is_none() {
            return Err(BinpatError::MissingLabel {
                line,
                fields: record.fields,
            });
        }
        let actual = record.pattern.len();
        let expected = *self.pattern_len.get_or_insert_with(|| {
            debug!(line, pattern_len = actual, "pattern length fixed");
            actual
        });
        if self.domains.len() < expected {
            self.domains.resize_with(expected, Domain::new);
        }
        if actual != expected {
            return Err(BinpatError::PatternLengthMismatch {
                line,
                expected,
                actual,
            });
        }
        for (domain, value) in self.domains.iter_mut().zip(&record.pattern) {
            domain.insert(value);
        }
        self.records += 1;
        Ok(())
    }

    /// Freeze the collected domains.
    pub fn finish(self) -> DomainSet {
        DomainSet {
            domains: self.domains,
            records: self.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SkipRule;
    use crate::record::extract_line;

    fn observe_all(lines: &[&str], skip: SkipRule) -> Result<DomainSet> {
        let mut builder = DomainBuilder::new();
        for (idx, line) in lines.iter().enumerate() {
            let extracted = extract_line(line.as_bytes(), b',', skip);
            builder.observe(idx as u64 + 1, &extracted)?;
        }
        Ok(builder.finish())
    }

    #[test]
    fn collects_values_in_first_seen_order() {
        let set = observe_all(&["p,x,s", "e,y,s", "p,x,n"], SkipRule::Leading(1)).unwrap();
        assert_eq!(set.pattern_len(), 2);
        assert_eq!(set.width(), 4);
        assert_eq!(set.records(), 3);
        assert_eq!(set.domains()[0].values_lossy(), ["x", "y"]);
        assert_eq!(set.domains()[1].values_lossy(), ["s", "n"]);
        assert_eq!(set.offsets(), vec![0, 2]);
    }

    #[test]
    fn order_follows_insertion_not_sorting() {
        let set = observe_all(&["l,z", "l,10", "l,2", "l,a"], SkipRule::Leading(1)).unwrap();
        assert_eq!(set.domains()[0].values_lossy(), ["z", "10", "2", "a"]);
        assert_eq!(set.domains()[0].position("2"), Some(2));
    }

    #[test]
    fn membership_uses_string_content() {
        let mut domain = Domain::new();
        let first = String::from("value");
        let second = ["val", "ue"].concat();
        assert!(domain.insert(&first));
        assert!(!domain.insert(&second));
        assert_eq!(domain.len(), 1);
    }

    #[test]
    fn rejects_length_mismatch_with_line_number() {
        let err = observe_all(&["a,b,c", "d,e,f", "g,h"], SkipRule::Leading(1)).unwrap_err();
        match err {
            BinpatError::PatternLengthMismatch {
                line,
                expected,
                actual,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_record_without_label() {
        let err = observe_all(&["a,b", "c"], SkipRule::Trailing(1)).unwrap_err();
        assert!(matches!(err, BinpatError::MissingLabel { line: 2, .. }));
    }

    #[test]
    fn zero_skip_builds_no_columns() {
        let set = observe_all(&["a,b,c", "d,e,f"], SkipRule::Zero).unwrap();
        assert_eq!(set.pattern_len(), 0);
        assert_eq!(set.width(), 0);
        assert_eq!(set.records(), 2);
    }

    #[test]
    fn json_round_trip_keeps_order_and_lookup() {
        let set = observe_all(&["p,x,s", "e,y,s"], SkipRule::Leading(1)).unwrap();
        let json = set.to_json().unwrap();
        let loaded = DomainSet::from_json(&json).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.domains()[0].position("y"), Some(1));
    }

    #[test]
    fn json_keeps_non_utf8_values() {
        let mut domain = Domain::new();
        domain.insert(b"caf\xe9");
        domain.insert("tea");
        let set = DomainSet::new(vec![domain], 2);

        let loaded = DomainSet::from_json(&set.to_json().unwrap()).unwrap();

        assert_eq!(loaded, set);
        assert_eq!(loaded.domains()[0].position(b"caf\xe9"), Some(0));
    }

    #[test]
    fn json_with_repeated_value_is_rejected() {
        let err = DomainSet::from_json(r#"{"domains":[["x","y","x"]],"records":3}"#).unwrap_err();
        let BinpatError::Json { source } = err else {
            panic!("unexpected error: {err}");
        };
        assert!(source.to_string().contains("'x' more than once"));
    }

    #[test]
    fn from_values_rejects_duplicates() {
        assert_eq!(Domain::from_values(["a", "b"]).unwrap().len(), 2);
        assert!(matches!(
            Domain::from_values(["a", "a"]),
            Err(BinpatError::DuplicateValue { ref value }) if value == "a"
        ));
    }
}
