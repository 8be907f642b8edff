//! palc - incremental search over a cooking reference
//!
//! Type a few letters, get headings and values; add a number to scale,
//! add a unit to convert:
//!
//! ```
//! use palc::{Engine, Dataset};
//!
//! let mut engine = Engine::new(Dataset::builtin());
//! let line = engine.query("cups").nth(1).unwrap();
//! assert_eq!(line.value, "1 cup = 284.00ml");
//! ```

mod query;
mod calc;
mod entry;
mod options;
mod engine;

pub use query::{parse, tokenize, Op, Query};
pub use calc::{remember_units, resolve_units, Calculation, Preferences};
pub use entry::{Entry, EntryKind};
pub use options::{DedupePolicy, EngineOptions};
pub use engine::{Engine, Results};

pub use palc_core::{PalcError, Value};
pub use palc_graph::{contains, search, AliasGraph, AliasResolver, DomainGraph, Path};
pub use palc_kitchen::Dataset;
pub use palc_units::{ConversionTable, Formula, UnitAlgebra};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        let graph = DomainGraph::from_json(&json!({
            "version": "0.0.1",
            "cups": {"unit": "cup_ml", "1 cup": 1, "1/2 cup": 0.5},
            "chicken": {"fried": {"temp": {"oil": 340, "int": 75}}},
            "water": {"unit": "℃", "boil": 100}
        }))
        .unwrap();
        let aliases = AliasGraph::from_json(&json!({
            "chicken": {"fried": "fried chicken"},
            "temp": {"oil": "oil temperature", "int": "internal temperature"}
        }))
        .unwrap();
        let units = UnitAlgebra::new(
            [
                ("cup_ml", Formula::scale(284.0)),
                ("℃_℉", Formula::affine(1.8, 32.0)),
            ],
            [("f", "℉"), ("c", "℃")],
        )
        .unwrap();
        Dataset::new(graph, aliases, units)
    }

    fn values(results: Results<'_>) -> Vec<String> {
        results.map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_plain_lookup() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        let results: Vec<_> = engine.query("version").collect();
        assert_eq!(results, vec![Entry::node("version = 0.0.1")]);
    }

    #[test]
    fn test_branch_expansion() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        let results: Vec<_> = engine.query("cups").collect();
        assert_eq!(
            results,
            vec![
                Entry::branch("cups"),
                Entry::node("1 cup = 284.00ml"),
                Entry::node("1/2 cup = 142.00ml"),
            ]
        );
    }

    #[test]
    fn test_leaf_under_aliased_branches() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        assert_eq!(
            values(engine.query("oil")),
            vec!["# fried chicken, temp", "  oil = 340"]
        );
    }

    #[test]
    fn test_nested_child_listed_by_alias() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        assert_eq!(
            values(engine.query("fried")),
            vec!["# fried chicken", "  fried chicken, temp"]
        );
    }

    #[test]
    fn test_multi_key_filter() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        assert_eq!(
            values(engine.query("int chicken")),
            vec!["# fried chicken, temp", "  int = 75"]
        );
        assert!(engine.query("int water").next().is_none());
    }

    #[test]
    fn test_heading_once_per_branch() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        // both keys reach the same branch; its children repeat, its heading does not
        assert_eq!(
            values(engine.query("cups cu")),
            vec![
                "# cups",
                "  1 cup = 284.00ml",
                "  1/2 cup = 142.00ml",
                "  1 cup = 284.00ml",
                "  1/2 cup = 142.00ml",
            ]
        );
    }

    #[test]
    fn test_unknown_key_yields_nothing() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        assert!(engine.query("pork").next().is_none());
        assert!(engine.query("").next().is_none());
    }

    #[test]
    fn test_history_updated_even_without_matches() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        let _ = engine.query("Pork Belly");
        assert_eq!(engine.history(), ["pork", "belly"]);
    }

    #[test]
    fn test_explicit_unit_and_memory() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        assert_eq!(values(engine.query("boil")), vec!["# water", "  boil = 100℃"]);
        assert_eq!(values(engine.query("boil f")), vec!["# water", "  boil = 212.00℉"]);
        assert_eq!(values(engine.query("boil")), vec!["# water", "  boil = 212.00℉"]);

        engine.reset();
        assert!(engine.history().is_empty());
        assert_eq!(values(engine.query("boil")), vec!["# water", "  boil = 100℃"]);
    }

    #[test]
    fn test_memory_can_be_disabled() {
        let data = dataset();
        let mut engine =
            Engine::new(&data).with_options(EngineOptions::new().with_remember_units(false));
        let _ = engine.query("boil f").count();
        assert!(engine.preferences().is_empty());
        assert_eq!(values(engine.query("boil")), vec!["# water", "  boil = 100℃"]);
    }

    #[test]
    fn test_results_do_not_borrow_engine() {
        let data = dataset();
        let mut engine = Engine::new(&data);
        let mut first = engine.query("cups");
        let mut second = engine.query("version");
        assert_eq!(first.next(), Some(Entry::branch("cups")));
        assert_eq!(second.next(), Some(Entry::node("version = 0.0.1")));
        assert_eq!(first.next(), Some(Entry::node("1 cup = 284.00ml")));
    }
}
