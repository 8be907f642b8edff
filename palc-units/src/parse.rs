//! Unit spec parsing
//!
//! A unit spec names a single unit (`"℃"`) or a chain joined with
//! underscores (`"cup_ml"`): the value is stored in the first unit and
//! shown converted through the rest.

use crate::formula::ConversionError;

/// Split a unit spec into its chain of unit names
pub fn parse_unit_spec(spec: &str) -> Result<Vec<String>, ConversionError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ConversionError::UnknownUnit(String::new()));
    }
    spec.split('_')
        .map(|part| {
            if part.is_empty() {
                Err(ConversionError::InvalidKey(spec.to_string()))
            } else {
                Ok(part.to_string())
            }
        })
        .collect()
}
