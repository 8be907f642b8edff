//! Engine configuration

use serde::{Deserialize, Serialize};

/// Whether equal entries within one query are collapsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupePolicy {
    /// Every match is reported, even when two keys lead to the same text
    #[default]
    None,
    /// An entry whose kind and text were already emitted is skipped
    DisplayText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Placed between alias fragments
    pub separator: String,
    /// Decimal places for converted and scaled values
    pub decimals: usize,
    pub dedupe: DedupePolicy,
    /// Keep explicit unit requests as targets for later queries
    pub remember_units: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            separator: ", ".to_string(),
            decimals: 2,
            dedupe: DedupePolicy::None,
            remember_units: true,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_dedupe(mut self, dedupe: DedupePolicy) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn with_remember_units(mut self, remember: bool) -> Self {
        self.remember_units = remember;
        self
    }
}
