//! Unit registry - canonical names and their abbreviations

use crate::formula::ConversionError;
use std::collections::HashMap;

/// Maps query tokens to canonical unit names.
///
/// A token is a unit when it is an abbreviation (`"f"` -> `"℉"`) or the
/// canonical name itself, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    /// Lowercase canonical name -> canonical name
    units: HashMap<String, String>,
    /// Lowercase abbreviation -> canonical name
    aliases: HashMap<String, String>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry over the given canonical names, with no abbreviations yet
    pub fn with_units<S: AsRef<str>>(units: impl IntoIterator<Item = S>) -> Self {
        let mut registry = Self::new();
        for unit in units {
            registry.register(unit.as_ref());
        }
        registry
    }

    pub fn register(&mut self, unit: &str) {
        self.units.insert(unit.to_lowercase(), unit.to_string());
    }

    /// Add an abbreviation. The target must already be registered.
    pub fn alias(&mut self, alias: &str, unit: &str) -> Result<(), ConversionError> {
        let canonical = self
            .canonical(unit)
            .ok_or_else(|| ConversionError::UnknownUnit(unit.to_string()))?
            .to_string();
        self.aliases.insert(alias.to_lowercase(), canonical);
        Ok(())
    }

    /// Builder form of [`UnitRegistry::alias`]
    pub fn with_alias(mut self, alias: &str, unit: &str) -> Result<Self, ConversionError> {
        self.alias(alias, unit)?;
        Ok(self)
    }

    fn canonical(&self, name: &str) -> Option<&str> {
        self.units.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Canonical unit for a query token, if the token names one
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let key = token.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.aliases
            .get(&key)
            .or_else(|| self.units.get(&key))
            .map(|s| s.as_str())
    }

    pub fn is_unit(&self, token: &str) -> bool {
        self.resolve(token).is_some()
    }
}
