//! Escaped, delimiter-separated packing primitives.
//!
//! Every packed value is written element by element with a chosen delimiter
//! character appended after each element; occurrences of the delimiter or of
//! the escape character `\` inside an element are prefixed with `\`. Lists
//! are length-prefixed so that empty elements, empty lists, and adjacent
//! lists never bleed into each other. Optional values carry a one-character
//! presence tag (`+` present, `-` absent) ahead of the packed payload, which
//! keeps "absent" distinguishable from "present but empty".

use crate::FingerprintParseError;

/// Escape character used inside packed elements.
pub const ESCAPE: char = '\\';

/// Appends one escaped `value` plus a trailing `delimiter` to `output`.
pub fn pack(output: &mut String, value: &str, delimiter: char) {
    for ch in value.chars() {
        if ch == ESCAPE || ch == delimiter {
            output.push(ESCAPE);
        }
        output.push(ch);
    }
    output.push(delimiter);
}

/// Reads one escaped value terminated by `delimiter` from the front of
/// `input`, returning the value and the unconsumed remainder.
///
/// Input without a terminating delimiter yields everything up to the end;
/// list and tag readers layer stricter truncation checks on top.
#[must_use]
pub fn unpack(input: &str, delimiter: char) -> (String, &str) {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((index, ch)) = chars.next() {
        if ch == ESCAPE {
            if let Some((_, escaped)) = chars.next() {
                value.push(escaped);
            }
        } else if ch == delimiter {
            return (value, &input[index + ch.len_utf8()..]);
        } else {
            value.push(ch);
        }
    }
    (value, "")
}

/// Appends a length-prefixed list of escaped elements to `output`.
pub fn pack_list<S: AsRef<str>>(output: &mut String, values: &[S], delimiter: char) {
    pack(output, &values.len().to_string(), delimiter);
    for value in values {
        pack(output, value.as_ref(), delimiter);
    }
}

/// Reads a length-prefixed list from the front of `input`.
///
/// # Errors
///
/// Returns [`FingerprintParseError::InvalidCount`] when the length prefix is
/// not a decimal count and [`FingerprintParseError::Truncated`] when the
/// input ends before the declared number of elements was read.
pub fn unpack_list(input: &str, delimiter: char) -> Result<(Vec<String>, &str), FingerprintParseError> {
    let (count, mut rest) = unpack(input, delimiter);
    let count: usize = count
        .parse()
        .map_err(|_| FingerprintParseError::InvalidCount { found: count })?;
    // The count comes from stored data; each element consumes at least one
    // input byte, so anything beyond `rest.len()` cannot be satisfied and
    // must not size the allocation.
    let mut values = Vec::with_capacity(count.min(rest.len()));
    for _ in 0..count {
        if rest.is_empty() {
            return Err(FingerprintParseError::Truncated);
        }
        let (value, remainder) = unpack(rest, delimiter);
        values.push(value);
        rest = remainder;
    }
    Ok((values, rest))
}

/// Appends a presence-tagged list: `+` plus the packed list when present,
/// `-` alone when absent.
pub fn pack_tagged_list<S: AsRef<str>>(output: &mut String, values: Option<&[S]>, delimiter: char) {
    match values {
        Some(values) => {
            output.push('+');
            pack_list(output, values, delimiter);
        }
        None => output.push('-'),
    }
}

/// Reads a presence-tagged list from the front of `input`.
pub fn unpack_tagged_list(
    input: &str,
    delimiter: char,
) -> Result<(Option<Vec<String>>, &str), FingerprintParseError> {
    match read_tag(input)? {
        (false, rest) => Ok((None, rest)),
        (true, rest) => {
            let (values, rest) = unpack_list(rest, delimiter)?;
            Ok((Some(values), rest))
        }
    }
}

/// Appends a presence-tagged epoch-millisecond timestamp.
///
/// The presence tag is authoritative: an absent date is written as `-` and
/// is never conflated with epoch zero.
pub fn pack_date(output: &mut String, date: Option<i64>, delimiter: char) {
    match date {
        Some(millis) => {
            output.push('+');
            pack(output, &millis.to_string(), delimiter);
        }
        None => output.push('-'),
    }
}

/// Reads a presence-tagged epoch-millisecond timestamp from the front of
/// `input`.
pub fn unpack_date(input: &str, delimiter: char) -> Result<(Option<i64>, &str), FingerprintParseError> {
    match read_tag(input)? {
        (false, rest) => Ok((None, rest)),
        (true, rest) => {
            let (text, rest) = unpack(rest, delimiter);
            let millis = text
                .parse()
                .map_err(|_| FingerprintParseError::InvalidTimestamp { found: text })?;
            Ok((Some(millis), rest))
        }
    }
}

/// Reads one `+`/`-` presence tag.
fn read_tag(input: &str) -> Result<(bool, &str), FingerprintParseError> {
    let mut chars = input.chars();
    match chars.next() {
        Some('+') => Ok((true, chars.as_str())),
        Some('-') => Ok((false, chars.as_str())),
        Some(found) => Err(FingerprintParseError::InvalidTag { found }),
        None => Err(FingerprintParseError::Truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_escapes_delimiter_and_escape_characters() {
        let mut out = String::new();
        pack(&mut out, "a+b\\c", '+');
        assert_eq!(out, "a\\+b\\\\c+");
    }

    #[test]
    fn unpack_reverses_pack() {
        let mut out = String::new();
        pack(&mut out, "a+b\\c", '+');
        let (value, rest) = unpack(&out, '+');
        assert_eq!(value, "a+b\\c");
        assert!(rest.is_empty());
    }

    #[test]
    fn list_round_trips_with_hostile_elements() {
        let values = ["plain", "with+delim", "with\\escape", ""];
        let mut out = String::new();
        pack_list(&mut out, &values, '+');
        let (decoded, rest) = unpack_list(&out, '+').unwrap();
        assert_eq!(decoded, values);
        assert!(rest.is_empty());
    }

    #[test]
    fn empty_list_differs_from_absent_list() {
        let mut empty = String::new();
        pack_tagged_list::<&str>(&mut empty, Some(&[]), '+');
        let mut absent = String::new();
        pack_tagged_list::<&str>(&mut absent, None, '+');
        assert_ne!(empty, absent);

        let (decoded, _) = unpack_tagged_list(&empty, '+').unwrap();
        assert_eq!(decoded, Some(Vec::new()));
        let (decoded, _) = unpack_tagged_list(&absent, '+').unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn absent_date_is_not_epoch_zero() {
        let mut absent = String::new();
        pack_date(&mut absent, None, '+');
        let mut zero = String::new();
        pack_date(&mut zero, Some(0), '+');
        assert_ne!(absent, zero);

        let (decoded, _) = unpack_date(&absent, '+').unwrap();
        assert_eq!(decoded, None);
        let (decoded, _) = unpack_date(&zero, '+').unwrap();
        assert_eq!(decoded, Some(0));
    }

    #[test]
    fn bad_count_is_reported() {
        let err = unpack_list("notanumber+", '+').unwrap_err();
        assert!(matches!(err, FingerprintParseError::InvalidCount { .. }));
    }

    #[test]
    fn absurd_count_is_truncation_not_allocation() {
        let err = unpack_list("18446744073709551615+", '+').unwrap_err();
        assert_eq!(err, FingerprintParseError::Truncated);

        let err = unpack_list("4294967295+one+", '+').unwrap_err();
        assert_eq!(err, FingerprintParseError::Truncated);
    }

    #[test]
    fn truncated_list_is_reported() {
        let err = unpack_list("3+only+", '+').unwrap_err();
        assert_eq!(err, FingerprintParseError::Truncated);
    }

    #[test]
    fn bad_tag_is_reported() {
        let err = unpack_date("x123+", '+').unwrap_err();
        assert_eq!(err, FingerprintParseError::InvalidTag { found: 'x' });
    }
}
