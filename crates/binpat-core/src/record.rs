//! Record extraction: split a raw line and isolate its pattern and label.
//!
//! Records are handled as raw bytes. Values may hold any byte except the
//! delimiter and line terminators, whatever the text encoding of the file.

use crate::options::SkipRule;

/// Pattern and label taken from one raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    /// Tokens kept for encoding.
    pub pattern: Vec<&'a [u8]>,
    /// The carried-through label, absent when the record is too short.
    pub label: Option<&'a [u8]>,
    /// Number of raw fields in the record.
    pub fields: usize,
}

/// Split a raw line on `delimiter`, ignoring a trailing `\n` or `\r\n`.
///
/// An empty line yields a single empty field.
pub fn split_line(line: &[u8], delimiter: u8) -> Vec<&[u8]> {
    let line = line
        .strip_suffix(b"\n")
        .map(|rest| rest.strip_suffix(b"\r").unwrap_or(rest))
        .unwrap_or(line);
    line.split(|&byte| byte == delimiter).collect()
}

/// Apply the skip rule to already split tokens.
///
/// Only one token is ever used as the label, whatever the number of
/// skipped columns.
pub fn extract<'a>(fields: &[&'a [u8]], skip: SkipRule) -> Extracted<'a> {
    let len = fields.len();
    match skip {
        SkipRule::Leading(n) => Extracted {
            pattern: fields[n.min(len)..].to_vec(),
            label: fields.first().copied(),
            fields: len,
        },
        SkipRule::Trailing(n) => Extracted {
            pattern: fields[..len.saturating_sub(n)].to_vec(),
            label: second_to_last(fields),
            fields: len,
        },
        SkipRule::Zero => Extracted {
            pattern: Vec::new(),
            label: second_to_last(fields),
            fields: len,
        },
    }
}

/// Split and extract in one step.
pub fn extract_line(line: &[u8], delimiter: u8, skip: SkipRule) -> Extracted<'_> {
    let fields = split_line(line, delimiter);
    extract(&fields, skip)
}

fn second_to_last<'a>(fields: &[&'a [u8]]) -> Option<&'a [u8]> {
    fields
        .len()
        .checked_sub(2)
        .and_then(|idx| fields.get(idx))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens<'a>(values: &[&'a str]) -> Vec<&'a [u8]> {
        values.iter().copied().map(str::as_bytes).collect()
    }

    #[test]
    fn leading_skip_keeps_tail_and_first_label() {
        let extracted = extract_line(b"p,x,s,n\n", b',', SkipRule::Leading(1));
        assert_eq!(extracted.pattern, tokens(&["x", "s", "n"]));
        assert_eq!(extracted.label, Some(&b"p"[..]));
    }

    #[test]
    fn leading_skip_larger_than_one_still_uses_first_token() {
        let extracted = extract_line(b"id,class,a,b", b',', SkipRule::Leading(2));
        assert_eq!(extracted.pattern, tokens(&["a", "b"]));
        assert_eq!(extracted.label, Some(&b"id"[..]));
    }

    #[test]
    fn trailing_skip_uses_second_to_last_label() {
        let extracted = extract_line(b"a,b,c,yes\r\n", b',', SkipRule::Trailing(1));
        assert_eq!(extracted.pattern, tokens(&["a", "b", "c"]));
        assert_eq!(extracted.label, Some(&b"c"[..]));
    }

    #[test]
    fn zero_skip_yields_empty_pattern() {
        let extracted = extract_line(b"a,b,c", b',', SkipRule::Zero);
        assert!(extracted.pattern.is_empty());
        assert_eq!(extracted.label, Some(&b"b"[..]));
    }

    #[test]
    fn oversized_skip_saturates() {
        let leading = extract_line(b"a,b", b',', SkipRule::Leading(5));
        assert!(leading.pattern.is_empty());
        let trailing = extract_line(b"a,b", b',', SkipRule::Trailing(5));
        assert!(trailing.pattern.is_empty());
    }

    #[test]
    fn short_record_has_no_trailing_label() {
        let extracted = extract_line(b"solo", b',', SkipRule::Trailing(1));
        assert!(extracted.pattern.is_empty());
        assert_eq!(extracted.label, None);
    }

    #[test]
    fn empty_fields_are_kept() {
        let extracted = extract_line(b"p,,x,", b',', SkipRule::Leading(1));
        assert_eq!(extracted.pattern, tokens(&["", "x", ""]));
    }

    #[test]
    fn blank_line_is_one_empty_field() {
        let extracted = extract_line(b"\n", b',', SkipRule::Leading(1));
        assert_eq!(extracted.fields, 1);
        assert!(extracted.pattern.is_empty());
        assert_eq!(extracted.label, Some(&b""[..]));
    }

    #[test]
    fn non_utf8_bytes_are_plain_data() {
        let extracted = extract_line(b"p,caf\xe9,s", b',', SkipRule::Leading(1));
        assert_eq!(extracted.pattern, vec![&b"caf\xe9"[..], &b"s"[..]]);
    }
}
