//! Unit algebra for palc
//!
//! Provides:
//! - `Formula`: affine one-directional conversion with exact inverse
//! - `ConversionTable`: bidirectional lookup with one intermediate hop
//! - `UnitRegistry`: abbreviation to canonical unit mapping
//! - `parse_unit_spec`: `"cup_ml"` style unit chains

mod formula;
mod convert;
mod units;
mod parse;

pub use formula::{ConversionError, Formula};
pub use convert::{split_key, ConversionTable};
pub use units::UnitRegistry;
pub use parse::parse_unit_spec;

/// Table and registry built together from one formula set
#[derive(Debug, Clone, Default)]
pub struct UnitAlgebra {
    pub table: ConversionTable,
    pub registry: UnitRegistry,
}

impl UnitAlgebra {
    /// Build from `"from_to"` formulas and `(abbreviation, unit)` pairs.
    /// Every unit named by a formula is a canonical unit.
    pub fn new<K, A, U>(
        formulas: impl IntoIterator<Item = (K, Formula)>,
        abbreviations: impl IntoIterator<Item = (A, U)>,
    ) -> Result<Self, ConversionError>
    where
        K: AsRef<str>,
        A: AsRef<str>,
        U: AsRef<str>,
    {
        let table = ConversionTable::from_formulas(formulas)?;
        let mut registry = UnitRegistry::with_units(table.units());
        for (alias, unit) in abbreviations {
            registry.alias(alias.as_ref(), unit.as_ref())?;
        }
        Ok(Self { table, registry })
    }

    /// Canonical unit for a query token
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.registry.resolve(token)
    }

    pub fn find(&self, from: &str, to: &str) -> Option<Formula> {
        self.table.find(from, to)
    }
}
