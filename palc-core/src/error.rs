//! Structured errors
//!
//! Only dataset loading can fail. Query evaluation recovers locally and
//! never surfaces an error to the caller.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INVALID_GRAPH: &str = "INVALID_GRAPH";
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const INVALID_FORMULA: &str = "INVALID_FORMULA";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Loading continued without the offending entry
    Warning,
    /// Dataset could not be loaded
    Error,
}

/// Structured error with a code, message and optional hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalcError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Key path inside the dataset, root first ("beef.unit")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub severity: Severity,
}

impl PalcError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            location: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set dataset location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
    }

    pub fn invalid_graph(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_GRAPH, format!("Invalid graph: {}", details.into()))
            .with_suggestion("Graphs are JSON objects whose leaves are numbers or strings")
    }

    pub fn invalid_unit(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_UNIT, format!("Invalid unit: {}", details.into()))
            .with_suggestion("A unit is a name (\"℃\"), a chain (\"cup_ml\") or an object of child name to unit")
    }

    pub fn invalid_formula(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_FORMULA, format!("Invalid formula: {}", details.into()))
            .with_suggestion("Formula keys look like \"from_to\" and need a non-zero factor")
    }

    pub fn unknown_unit(name: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", name))
            .with_suggestion("Abbreviations must point at a unit used by some formula")
    }

    pub fn io(details: impl Into<String>) -> Self {
        Self::new(codes::IO_ERROR, format!("I/O error: {}", details.into()))
    }
}

impl std::fmt::Display for PalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref location) = self.location {
            write!(f, " at {}", location)?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for PalcError {}

impl From<NumberError> for PalcError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse_error(s),
            NumberError::DivisionByZero => Self::div_zero(),
        }
    }
}

impl From<serde_json::Error> for PalcError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string())
    }
}

impl From<std::io::Error> for PalcError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location_and_hint() {
        let err = PalcError::invalid_unit("expected text").at("beef.unit");
        let text = err.to_string();
        assert!(text.starts_with("[INVALID_UNIT]"));
        assert!(text.contains("at beef.unit"));
        assert!(text.contains("suggestion"));
    }

    #[test]
    fn test_from_number_error() {
        let err: PalcError = NumberError::DivisionByZero.into();
        assert_eq!(err.code, codes::DIV_ZERO);
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let err = PalcError::div_zero();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "DIV_ZERO");
        assert!(json.get("location").is_none());
        assert_eq!(json["severity"], "error");
    }
}
