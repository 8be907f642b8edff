//! Query parser
//!
//! Free text becomes search keys, a scale, an operator and explicit unit
//! requests. Tokens are split on whitespace and commas and lowercased.
//! Each token is, in order:
//! 1. a unit (abbreviation or canonical name), recorded and skipped
//! 2. split against the previous query's token when it only added digits
//! 3. stripped of a leading or trailing number, which becomes the scale
//! 4. stripped of an operator prefix
//! 5. whatever is left is the scale if it is a number, a search key if
//!    it holds a letter or digit, and dropped otherwise
//!
//! An operator between two numbers of one token ("1.5/2") combines them
//! into the scale. Nothing here fails: malformed numbers stay part of
//! the key.

use palc_core::{is_number, parse_number, split_number, Fragment};
use palc_units::UnitRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    #[default]
    Multiply,
    Divide,
}

impl Op {
    /// `None` on division by zero
    pub fn apply(&self, value: f64, scale: f64) -> Option<f64> {
        match self {
            Op::Multiply => Some(value * scale),
            Op::Divide if scale == 0.0 => None,
            Op::Divide => Some(value / scale),
        }
    }

    /// Operator at the start of a token and its byte length
    fn prefix(token: &str) -> Option<(Op, usize)> {
        let mut chars = token.chars();
        let first = chars.next()?;
        let op = match first {
            '×' | '*' => Op::Multiply,
            '÷' | '/' => Op::Divide,
            // "x" only counts when no word follows ("x2", a lone "x")
            'x' if chars.next().map_or(true, |c| c.is_ascii_digit()) => Op::Multiply,
            _ => return None,
        };
        Some((op, first.len_utf8()))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Multiply => write!(f, "x"),
            Op::Divide => write!(f, "/"),
        }
    }
}

/// Parsed query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Lowercase prefix tokens, deduplicated by first occurrence
    pub keys: Vec<String>,
    pub scale: f64,
    pub op: Op,
    /// Canonical names of requested target units
    pub units: Vec<String>,
    /// Raw lowercase tokens, kept as the next call's history
    pub tokens: Vec<String>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            scale: 1.0,
            op: Op::Multiply,
            units: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

impl Query {
    pub fn is_scaled(&self) -> bool {
        self.scale != 1.0
    }

    fn push_key(&mut self, key: &str) {
        let key = key.trim();
        if !key.is_empty() && !self.keys.iter().any(|k| k == key) {
            self.keys.push(key.to_string());
        }
    }
}

/// Split raw input into lowercase tokens
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Parse input, using the previous query's tokens to split appended digits
pub fn parse(input: &str, history: &[String], units: &UnitRegistry) -> Query {
    let mut query = Query {
        tokens: tokenize(input),
        ..Query::default()
    };

    for (i, token) in query.tokens.clone().iter().enumerate() {
        if let Some(unit) = units.resolve(token) {
            query.units.push(unit.to_string());
            continue;
        }

        let mut rest: &str = token;

        if let Some(previous) = history.get(i) {
            if let Some(number) = appended_number(token, previous) {
                let key = &token[..token.len() - number.len()];
                trace!(token = %token, key, "split digits typed after previous token");
                query.push_key(key);
                rest = number;
            }
        }

        let mut leading = None;
        match split_number(rest) {
            Ok(Some(Fragment { value, rest: left })) => {
                query.scale = value;
                if starts_with_digit(rest) {
                    leading = Some(value);
                }
                rest = left;
            }
            Ok(None) => {}
            Err(e) => {
                debug!(token = %token, error = %e, "malformed number kept as key");
                query.push_key(token);
                continue;
            }
        }

        let mut op = None;
        if let Some((found, len)) = Op::prefix(rest) {
            op = Some(found);
            rest = &rest[len..];
        }

        match (parse_number(rest), leading, op) {
            // "1.5/2", "2x3": the operator joins two numbers of one token
            (Ok(right), Some(left), Some(op)) => match op.apply(left, right) {
                Some(value) => query.scale = value,
                None => debug!(token = %token, "division by zero inside token, kept left number"),
            },
            (Ok(value), _, op) => {
                query.op = op.unwrap_or(query.op);
                query.scale = value;
            }
            (Err(_), _, op) => {
                query.op = op.unwrap_or(query.op);
                if rest.chars().any(char::is_alphanumeric) {
                    query.push_key(rest);
                } else if !rest.is_empty() {
                    trace!(token = %token, rest, "punctuation left over, not a key");
                }
            }
        }
    }

    if query.keys.is_empty() && !query.units.is_empty() {
        let unit = query.units.remove(0);
        query.push_key(&unit);
    }

    debug!(
        keys = ?query.keys,
        scale = query.scale,
        op = %query.op,
        units = ?query.units,
        "parsed query"
    );
    query
}

fn starts_with_digit(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit())
}

/// The digits appended to `previous` to form `token`, if that is all that changed.
///
/// The key part of the previous token (its own number stripped) must be a
/// word, not a number, and the appended tail must read as a number.
fn appended_number<'t>(token: &'t str, previous: &str) -> Option<&'t str> {
    if token == previous {
        return None;
    }
    let key = match split_number(previous) {
        Ok(Some(fragment)) if !starts_with_digit(previous) => fragment.rest,
        _ => previous,
    };
    if key.is_empty() || is_number(key) {
        return None;
    }
    let tail = token.strip_prefix(key)?;
    is_number(tail).then_some(tail)
}
