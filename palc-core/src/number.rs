//! Numeric fragments inside query tokens
//!
//! A query token may carry a number at its start ("2cups") or at its end
//! ("cup2"). Accepted shapes are integers, decimals and simple fractions:
//! "3", "1.5", "1/2". A sign is never part of a number.
//!
//! Incomplete shapes seen while typing are accepted: "1." reads as 1 and a
//! trailing "1/" reads as 1 until the denominator arrives.

use thiserror::Error;

/// Error type for numeric fragments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A number split off one end of a token, with the text left over
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<'a> {
    pub value: f64,
    pub rest: &'a str,
}

// ========== Parsing ==========

/// Parse a whole string as a number
/// Supports: "123", "3.14", "1/3"
pub fn parse_number(s: &str) -> Result<f64, NumberError> {
    let s = s.trim();
    match scan(s)? {
        Some((len, value)) if len == s.len() => Ok(value),
        _ => Err(NumberError::ParseError(s.to_string())),
    }
}

/// True when the whole string reads as a number
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && parse_number(s).is_ok()
}

/// Split a number off the front of a token ("2cups" -> 2, "cups").
///
/// `Ok(None)` when the token does not start with a digit. A malformed
/// fraction such as "3/x" is an error, so callers keep the token whole.
pub fn split_leading(token: &str) -> Result<Option<Fragment<'_>>, NumberError> {
    Ok(scan(token)?.map(|(len, value)| Fragment {
        value,
        rest: &token[len..],
    }))
}

/// Split the longest number off the end of a token ("cup1/2" -> 0.5, "cup").
///
/// A number glued to a preceding digit, dot or mid-token slash is not a
/// trailing number: "x/3" has none, "/3" has 3.
pub fn split_trailing(token: &str) -> Option<Fragment<'_>> {
    let mut prev: Option<char> = None;
    for (start, c) in token.char_indices() {
        let boundary = match prev {
            None => true,
            Some(p) if p.is_ascii_digit() || p == '.' => false,
            Some('/') => start == 1,
            Some(_) => true,
        };
        prev = Some(c);

        if !boundary || !c.is_ascii_digit() {
            continue;
        }
        if let Ok(Some((len, value))) = scan(&token[start..]) {
            if start + len == token.len() {
                return Some(Fragment {
                    value,
                    rest: &token[..start],
                });
            }
        }
    }
    None
}

/// Split a number off whichever end of the token carries one.
///
/// Tokens starting with a digit only ever yield a leading number.
pub fn split_number(token: &str) -> Result<Option<Fragment<'_>>, NumberError> {
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        split_leading(token)
    } else {
        Ok(split_trailing(token))
    }
}

/// Read `digits ['.' digits*]` or `digits '/' digits*` from the start of `s`.
/// Returns the consumed byte length and the value.
fn scan(s: &str) -> Result<Option<(usize, f64)>, NumberError> {
    let bytes = s.as_bytes();
    let int_len = digits(bytes);
    if int_len == 0 {
        return Ok(None);
    }
    let whole = parse_digits(&s[..int_len])?;

    match bytes.get(int_len) {
        Some(b'.') => {
            let end = int_len + 1 + digits(&bytes[int_len + 1..]);
            let text = s[..end].trim_end_matches('.');
            let value = text
                .parse::<f64>()
                .map_err(|_| NumberError::ParseError(text.to_string()))?;
            Ok(Some((end, value)))
        }
        Some(b'/') => {
            let den_len = digits(&bytes[int_len + 1..]);
            let end = int_len + 1 + den_len;
            if den_len == 0 {
                // "1/" is fine while the denominator is still being typed
                return match bytes.get(end) {
                    None => Ok(Some((end, whole))),
                    Some(_) => Err(NumberError::ParseError(s.to_string())),
                };
            }
            let den = parse_digits(&s[int_len + 1..end])?;
            if den == 0.0 {
                return Err(NumberError::DivisionByZero);
            }
            Ok(Some((end, whole / den)))
        }
        _ => Ok(Some((int_len, whole))),
    }
}

fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_digits(s: &str) -> Result<f64, NumberError> {
    s.parse::<f64>()
        .map_err(|_| NumberError::ParseError(s.to_string()))
}

// ========== Formatting ==========

/// Fixed decimal places ("284.00")
pub fn as_decimal(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// Shortest natural form ("0.5", "80")
pub fn as_plain(value: f64) -> String {
    format!("{}", value)
}
