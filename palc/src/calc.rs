//! Unit resolution and value formatting

use crate::query::Op;
use palc_core::{as_decimal, as_plain, Value};
use palc_graph::Path;
use palc_units::ConversionTable;
use std::collections::HashMap;
use tracing::trace;

/// Remembered conversion targets, keyed by the unit they convert from
pub type Preferences = HashMap<String, Vec<String>>;

/// Unit chain for a path.
///
/// Starts from the nearest unit metadata on the path. Explicit units are
/// appended; without them the remembered target for the last unit is.
/// A dimensionless path stays dimensionless.
pub fn resolve_units(path: &Path<'_>, explicit: &[String], preferences: &Preferences) -> Vec<String> {
    let Some(base) = path.unit_chain() else {
        return Vec::new();
    };
    let mut chain = base.to_vec();

    let targets = if explicit.is_empty() {
        chain
            .last()
            .and_then(|unit| preferences.get(unit))
            .cloned()
            .unwrap_or_default()
    } else {
        explicit.to_vec()
    };

    for unit in targets {
        if chain.last() != Some(&unit) {
            chain.push(unit);
        }
    }
    chain
}

/// Record explicit targets for every unit that can reach the first one
pub fn remember_units(preferences: &mut Preferences, explicit: &[String], table: &ConversionTable) {
    let Some(target) = explicit.first() else {
        return;
    };
    for unit in table.reaching(target) {
        preferences.insert(unit.to_string(), explicit.to_vec());
    }
}

/// How a leaf is computed and shown
#[derive(Debug, Clone, Copy)]
pub struct Calculation<'a> {
    pub table: &'a ConversionTable,
    pub scale: f64,
    pub op: Op,
    pub decimals: usize,
}

impl<'a> Calculation<'a> {
    pub fn new(table: &'a ConversionTable) -> Self {
        Self {
            table,
            scale: 1.0,
            op: Op::Multiply,
            decimals: 2,
        }
    }

    pub fn with_scale(mut self, scale: f64, op: Op) -> Self {
        self.scale = scale;
        self.op = op;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Format one leaf as `"<key> = <value><unit>"`.
    ///
    /// Conversions run hop by hop along the chain and stop at the first
    /// pair without a formula; the suffix is the last unit reached. A
    /// scale is applied to the converted value. Text leaves and division
    /// by zero echo the stored value.
    pub fn calculate(&self, key: &str, value: &Value, chain: &[String]) -> String {
        let raw = match value {
            Value::Number(n) => *n,
            Value::Text(text) => return format!("{} = {}", key, text),
        };
        if self.op == Op::Divide && self.scale == 0.0 {
            return format!("{} = {}", key, as_plain(raw));
        }

        let mut converted = raw;
        let mut unit = chain.first().map(|u| u.as_str()).unwrap_or("");
        let mut hops = 0;
        for pair in chain.windows(2) {
            match self.table.find(&pair[0], &pair[1]) {
                Some(formula) => {
                    converted = formula.apply(converted);
                    unit = pair[1].as_str();
                    hops += 1;
                }
                None => {
                    trace!(from = %pair[0], to = %pair[1], "no conversion, stopping chain");
                    break;
                }
            }
        }

        if self.scale != 1.0 {
            // checked above, Divide by zero never reaches here
            let scaled = self.op.apply(converted, self.scale).unwrap_or(converted);
            let singular = if raw == 1.0 && !key.starts_with(|c: char| c.is_ascii_digit()) {
                "1 "
            } else {
                ""
            };
            format!(
                "{}{} {} {} = {}{}",
                singular,
                key,
                self.op,
                as_plain(self.scale),
                as_decimal(scaled, self.decimals),
                unit
            )
        } else if hops > 0 {
            format!("{} = {}{}", key, as_decimal(converted, self.decimals), unit)
        } else {
            format!("{} = {}{}", key, as_plain(raw), unit)
        }
    }
}
