//! Bidirectional conversion table
//!
//! Built once from named one-directional formulas (`"cup_ml"`). Every
//! formula also registers its inverse unless the inverse was given
//! explicitly, so `℉_℃` keeps its own formula instead of a derived one.

use crate::formula::{ConversionError, Formula};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Conversion lookup between canonical unit names
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    /// (from, to) -> formula, both directions
    formulas: HashMap<(String, String), Formula>,
    /// Directly connected units, in registration order
    neighbours: HashMap<String, Vec<String>>,
    /// Canonical unit names, in registration order
    units: Vec<String>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `"from_to"` keyed formulas.
    ///
    /// Registered formulas are inserted first so an explicit `b_a` always
    /// wins over the inverse derived from `a_b`.
    pub fn from_formulas<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, Formula)>,
    ) -> Result<Self, ConversionError> {
        let mut table = Self::new();
        let mut registered = Vec::new();

        for (key, formula) in entries {
            let (from, to) = split_key(key.as_ref())?;
            table.insert(from, to, formula);
            registered.push((from.to_string(), to.to_string(), formula));
        }

        for (from, to, formula) in registered {
            let inverse_key = (to.clone(), from.clone());
            if table.formulas.contains_key(&inverse_key) {
                debug!(from = %to, to = %from, "explicit inverse registered, not deriving");
                continue;
            }
            let inverse = formula.inverse()?;
            table.insert(&to, &from, inverse);
        }

        Ok(table)
    }

    fn insert(&mut self, from: &str, to: &str, formula: Formula) {
        if self
            .formulas
            .insert((from.to_string(), to.to_string()), formula)
            .is_some()
        {
            warn!(from, to, "conversion registered twice, keeping the last one");
        }
        self.remember(from);
        self.remember(to);
        let list = self.neighbours.entry(from.to_string()).or_default();
        if !list.iter().any(|n| n == to) {
            list.push(to.to_string());
        }
    }

    fn remember(&mut self, unit: &str) {
        if !self.units.iter().any(|u| u == unit) {
            self.units.push(unit.to_string());
        }
    }

    /// All canonical unit names known to the table
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|s| s.as_str())
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.units.iter().any(|u| u == unit)
    }

    /// Direct (registered or derived inverse) formula only
    pub fn direct(&self, from: &str, to: &str) -> Option<Formula> {
        self.formulas
            .get(&(from.to_string(), to.to_string()))
            .copied()
    }

    /// Find a formula from one unit to another in at most two hops.
    ///
    /// Tries identity, then a direct formula, then one intermediate unit
    /// in registration order.
    pub fn find(&self, from: &str, to: &str) -> Option<Formula> {
        if from == to {
            return self.contains_unit(from).then(Formula::identity);
        }
        if let Some(formula) = self.direct(from, to) {
            return Some(formula);
        }
        let via = self.neighbours.get(from)?;
        via.iter().find_map(|mid| {
            let first = self.direct(from, mid)?;
            let second = self.direct(mid, to)?;
            Some(first.then(&second))
        })
    }

    /// Convert a value, `None` when the units are not connected
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Option<f64> {
        self.find(from, to).map(|f| f.apply(value))
    }

    pub fn can_convert(&self, from: &str, to: &str) -> bool {
        self.find(from, to).is_some()
    }

    /// Every unit that can be converted into `target`, `target` included
    pub fn reaching<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.units().filter(move |u| self.can_convert(u, target))
    }
}

/// Split `"from_to"` into its two unit names
pub fn split_key(key: &str) -> Result<(&str, &str), ConversionError> {
    match key.split_once('_') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() && !to.contains('_') => {
            Ok((from, to))
        }
        _ => Err(ConversionError::InvalidKey(key.to_string())),
    }
}
