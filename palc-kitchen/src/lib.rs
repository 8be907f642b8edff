//! palc kitchen dataset
//!
//! The cooking reference searched by palc:
//! - food graph: meats, eggs, water and oven temperatures, cup and weight measures
//! - alias graph: display phrases ("fried chicken", "oil temperature")
//! - formulae: oz/gm, ℃/℉, cup/ml, ml/floz and the unit abbreviations
//!
//! Other datasets in the same JSON shapes load through [`Dataset::from_json_strs`].

mod formulae;

pub use formulae::{FormulaDef, FormulaSet};

use palc_core::PalcError;
use palc_graph::{AliasGraph, DomainGraph};
use palc_units::UnitAlgebra;
use std::sync::LazyLock;
use tracing::debug;

pub const FOOD_JSON: &str = include_str!("../data/food.json");
pub const ALIAS_JSON: &str = include_str!("../data/alias.json");
pub const FORMULAE_JSON: &str = include_str!("../data/formulae.json");

static BUILTIN: LazyLock<Dataset> = LazyLock::new(|| {
    Dataset::from_json_strs(FOOD_JSON, ALIAS_JSON, FORMULAE_JSON)
        .expect("built-in kitchen dataset is valid")
});

/// Everything an engine searches: domain graph, alias graph and units
#[derive(Debug, Clone)]
pub struct Dataset {
    pub graph: DomainGraph,
    pub aliases: AliasGraph,
    pub units: UnitAlgebra,
}

impl Dataset {
    pub fn new(graph: DomainGraph, aliases: AliasGraph, units: UnitAlgebra) -> Self {
        Self { graph, aliases, units }
    }

    /// The built-in kitchen dataset, parsed on first use
    pub fn builtin() -> &'static Dataset {
        &BUILTIN
    }

    /// Load a dataset from the three JSON documents
    pub fn from_json_strs(food: &str, alias: &str, formulae: &str) -> Result<Self, PalcError> {
        let graph = DomainGraph::from_json_str(food)?;
        let aliases = AliasGraph::from_json_str(alias)?;
        let units = FormulaSet::from_json_str(formulae)?.build()?;
        debug!(
            top_level = graph.root().len(),
            units = units.table.units().count(),
            "dataset loaded"
        );
        Ok(Self::new(graph, aliases, units))
    }
}
