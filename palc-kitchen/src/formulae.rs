//! Formula file format
//!
//! ```json
//! {
//!   "formulae": {"cup_ml": 284, "℃_℉": {"factor": 1.8, "offset": 32}},
//!   "abbreviations": {"c": "℃"}
//! }
//! ```
//!
//! A bare number is a proportional factor.

use palc_core::PalcError;
use palc_units::{Formula, UnitAlgebra};
use serde::{Deserialize, Serialize};
use serde_json::Map;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormulaDef {
    Factor(f64),
    Affine(Formula),
}

impl From<FormulaDef> for Formula {
    fn from(def: FormulaDef) -> Self {
        match def {
            FormulaDef::Factor(factor) => Formula::scale(factor),
            FormulaDef::Affine(formula) => formula,
        }
    }
}

/// Named formulas plus abbreviations, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaSet {
    #[serde(default)]
    pub formulae: Map<String, serde_json::Value>,
    #[serde(default)]
    pub abbreviations: Map<String, serde_json::Value>,
}

impl FormulaSet {
    pub fn from_json_str(text: &str) -> Result<Self, PalcError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode every formula and abbreviation, then build the unit algebra
    pub fn build(&self) -> Result<UnitAlgebra, PalcError> {
        let mut formulas = Vec::with_capacity(self.formulae.len());
        for (key, value) in &self.formulae {
            let def: FormulaDef = serde_json::from_value(value.clone())
                .map_err(|e| PalcError::invalid_formula(e.to_string()).at(key))?;
            formulas.push((key.as_str(), Formula::from(def)));
        }

        let mut abbreviations = Vec::with_capacity(self.abbreviations.len());
        for (abbreviation, unit) in &self.abbreviations {
            let unit = unit.as_str().ok_or_else(|| {
                PalcError::invalid_unit("abbreviation must name a unit").at(abbreviation)
            })?;
            abbreviations.push((abbreviation.as_str(), unit));
        }

        Ok(UnitAlgebra::new(formulas, abbreviations)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palc_core::codes;

    #[test]
    fn test_factor_and_affine() {
        let set = FormulaSet::from_json_str(
            r#"{"formulae": {"cup_ml": 284, "c_f": {"factor": 1.8, "offset": 32}}}"#,
        )
        .unwrap();
        let algebra = set.build().unwrap();
        assert_eq!(algebra.find("cup", "ml"), Some(Formula::scale(284.0)));
        assert_eq!(algebra.find("c", "f"), Some(Formula::affine(1.8, 32.0)));
    }

    #[test]
    fn test_offset_defaults_to_zero() {
        let set = FormulaSet::from_json_str(r#"{"formulae": {"oz_gm": {"factor": 28.35}}}"#).unwrap();
        assert_eq!(set.build().unwrap().find("oz", "gm"), Some(Formula::scale(28.35)));
    }

    #[test]
    fn test_bad_formula_located() {
        let set = FormulaSet::from_json_str(r#"{"formulae": {"cup_ml": "lots"}}"#).unwrap();
        let err = set.build().unwrap_err();
        assert_eq!(err.code, codes::INVALID_FORMULA);
        assert_eq!(err.location.as_deref(), Some("cup_ml"));
    }

    #[test]
    fn test_bad_key() {
        let set = FormulaSet::from_json_str(r#"{"formulae": {"cupml": 284}}"#).unwrap();
        assert_eq!(set.build().unwrap_err().code, codes::INVALID_FORMULA);
    }

    #[test]
    fn test_abbreviation_to_unknown_unit() {
        let set = FormulaSet::from_json_str(
            r#"{"formulae": {"cup_ml": 284}, "abbreviations": {"f": "℉"}}"#,
        )
        .unwrap();
        assert_eq!(set.build().unwrap_err().code, codes::UNKNOWN_UNIT);
    }
}
