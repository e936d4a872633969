use std::{fmt, str::FromStr};

use super::{Entries, Perm, MAX_LEN};

/// Error type for parsing a permutation from one-line notation.
#[derive(Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
}

impl ParseError {
    /// Byte offset into the input at which the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Debug)]
enum ParseErrorKind {
    Empty,
    UnexpectedCharacter,
    InvalidNumber,
    RepeatedValue,
    TooLong,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Empty => write!(f, "empty input"),
            ParseErrorKind::UnexpectedCharacter => {
                write!(f, "unexpected character at offset {}", self.offset)
            }
            ParseErrorKind::InvalidNumber => {
                write!(f, "unparseable number at offset {}", self.offset)
            }
            ParseErrorKind::RepeatedValue => {
                write!(f, "repeated value at offset {}", self.offset)
            }
            ParseErrorKind::TooLong => write!(f, "too many entries"),
        }
    }
}

impl FromStr for Perm {
    type Err = ParseError;

    /// Parses one-line notation.
    ///
    /// Input containing whitespace or commas is read as a sequence of
    /// numbers; otherwise every character must be a single digit. In both
    /// forms the values are standardized by rank, so `"3 5 1 2 4"`,
    /// `"35124"` and `"2 4 0 1 3"` all parse to the same permutation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = if s
            .trim()
            .bytes()
            .any(|b| b.is_ascii_whitespace() || b == b',')
        {
            scan_numbers(s)?
        } else {
            scan_digits(s)?
        };

        if values.is_empty() {
            return Err(ParseError {
                kind: ParseErrorKind::Empty,
                offset: 0,
            });
        }
        if values.len() > MAX_LEN {
            return Err(ParseError {
                kind: ParseErrorKind::TooLong,
                offset: 0,
            });
        }

        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_unstable_by_key(|&i| values[i].0);
        for w in order.windows(2) {
            if values[w[0]].0 == values[w[1]].0 {
                return Err(ParseError {
                    kind: ParseErrorKind::RepeatedValue,
                    offset: values[w[0].max(w[1])].1,
                });
            }
        }

        let mut entries: Entries = smallvec::smallvec![0; values.len()];
        for (rank, &idx) in order.iter().enumerate() {
            entries[idx] = rank as u16;
        }
        Ok(Perm::from_raw(entries))
    }
}

/// Scans whitespace- or comma-separated numbers, returning each with its byte
/// offset.
fn scan_numbers(s: &str) -> Result<Vec<(u64, usize)>, ParseError> {
    let bytes = s.as_bytes();
    let mut values = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b',' {
            i += 1;
            continue;
        }
        if !bytes[i].is_ascii_digit() {
            return Err(ParseError {
                kind: ParseErrorKind::UnexpectedCharacter,
                offset: i,
            });
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let value = s[start..i].parse().map_err(|_| ParseError {
            kind: ParseErrorKind::InvalidNumber,
            offset: start,
        })?;
        values.push((value, start));
    }
    Ok(values)
}

/// Scans a run of single digits, one value per digit.
fn scan_digits(s: &str) -> Result<Vec<(u64, usize)>, ParseError> {
    let trimmed = s.trim();
    let lead = s.len() - s.trim_start().len();
    trimmed
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            if b.is_ascii_digit() {
                Ok(((b - b'0') as u64, lead + i))
            } else {
                Err(ParseError {
                    kind: ParseErrorKind::UnexpectedCharacter,
                    offset: lead + i,
                })
            }
        })
        .collect()
}
