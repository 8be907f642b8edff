//! Build graphs from JSON documents
//!
//! Object key order is kept (serde_json `preserve_order`), since search
//! results follow it.

use crate::alias::{AliasGraph, AliasNode};
use crate::node::{Branch, Child, DomainGraph, Node, UnitSpec, UNIT_KEY};
use palc_core::{PalcError, Severity, Value};
use palc_units::parse_unit_spec;
use serde_json::Map;
use std::collections::HashMap;
use tracing::warn;

impl DomainGraph {
    /// Build a domain graph from a JSON object
    pub fn from_json(json: &serde_json::Value) -> Result<Self, PalcError> {
        let object = json
            .as_object()
            .ok_or_else(|| PalcError::invalid_graph("root must be an object"))?;
        Ok(Self::new(branch_from_json(object, "")?))
    }

    pub fn from_json_str(text: &str) -> Result<Self, PalcError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(&json)
    }
}

fn branch_from_json(object: &Map<String, serde_json::Value>, at: &str) -> Result<Branch, PalcError> {
    let mut branch = Branch::new();
    for (key, value) in object {
        let location = join(at, key);
        if key == UNIT_KEY {
            branch.unit = Some(unit_from_json(value, &location)?);
            continue;
        }
        let node = match value {
            serde_json::Value::Object(inner) => Node::Branch(branch_from_json(inner, &location)?),
            other => Node::Leaf(Value::from_json(other).ok_or_else(|| {
                PalcError::invalid_graph(format!("unsupported leaf value {}", other)).at(&location)
            })?),
        };
        branch.children.push(Child::new(key.clone(), node));
    }
    Ok(branch)
}

fn unit_from_json(value: &serde_json::Value, at: &str) -> Result<UnitSpec, PalcError> {
    let chain = |spec: &str, at: &str| {
        parse_unit_spec(spec).map_err(|e| PalcError::invalid_unit(e.to_string()).at(at))
    };
    match value {
        serde_json::Value::String(spec) => Ok(UnitSpec::Chain(chain(spec, at)?)),
        serde_json::Value::Object(entries) => {
            let mut per_child = Vec::with_capacity(entries.len());
            for (key, spec) in entries {
                let location = join(at, key);
                let spec = spec
                    .as_str()
                    .ok_or_else(|| PalcError::invalid_unit("expected a unit name").at(&location))?;
                per_child.push((key.clone(), chain(spec, &location)?));
            }
            Ok(UnitSpec::PerChild(per_child))
        }
        _ => Err(PalcError::invalid_unit("expected a unit name or an object").at(at)),
    }
}

impl AliasGraph {
    /// Build an alias graph from a JSON object.
    ///
    /// Entries that are neither phrases nor objects are dropped and logged.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, PalcError> {
        let (graph, dropped) = Self::from_json_with_warnings(json)?;
        for warning in &dropped {
            warn!(warning = %warning, "alias entry dropped");
        }
        Ok(graph)
    }

    /// Like [`AliasGraph::from_json`], also returning one
    /// [`Severity::Warning`] error per dropped entry
    pub fn from_json_with_warnings(json: &serde_json::Value) -> Result<(Self, Vec<PalcError>), PalcError> {
        let object = json
            .as_object()
            .ok_or_else(|| PalcError::invalid_graph("alias root must be an object"))?;
        let mut dropped = Vec::new();
        let root = alias_map_from_json(object, "", &mut dropped);
        Ok((Self::new(root), dropped))
    }

    pub fn from_json_str(text: &str) -> Result<Self, PalcError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json(&json)
    }
}

fn alias_map_from_json(
    object: &Map<String, serde_json::Value>,
    at: &str,
    dropped: &mut Vec<PalcError>,
) -> HashMap<String, AliasNode> {
    let mut map = HashMap::with_capacity(object.len());
    for (key, value) in object {
        let location = join(at, key);
        let node = match value {
            serde_json::Value::String(phrase) => AliasNode::Phrase(phrase.clone()),
            serde_json::Value::Object(inner) => {
                AliasNode::Map(alias_map_from_json(inner, &location, dropped))
            }
            other => {
                dropped.push(
                    PalcError::invalid_graph(format!("alias {} is not a phrase", other))
                        .at(location)
                        .with_severity(Severity::Warning),
                );
                continue;
            }
        };
        map.insert(key.clone(), node);
    }
    map
}

fn join(at: &str, key: &str) -> String {
    if at.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", at, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palc_core::codes;
    use serde_json::json;

    #[test]
    fn test_domain_graph_keeps_order_and_lifts_unit() {
        let graph = DomainGraph::from_json(&json!({
            "cups": {"unit": "cup_ml", "1 cup": 1, "1/2 cup": 0.5},
            "version": "0.0.1"
        }))
        .unwrap();

        let keys: Vec<_> = graph.root().children.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["cups", "version"]);

        let cups = graph.get(&["cups"]).and_then(Node::as_branch).unwrap();
        assert_eq!(cups.len(), 2);
        assert_eq!(cups.unit, Some(UnitSpec::Chain(vec!["cup".into(), "ml".into()])));
        assert_eq!(cups.children[1].key, "1/2 cup");
    }

    #[test]
    fn test_per_child_units() {
        let graph = DomainGraph::from_json(&json!({
            "water": {"unit": {"boil": "℃"}, "boil": 100, "litre": 1}
        }))
        .unwrap();
        let water = graph.get(&["water"]).and_then(Node::as_branch).unwrap();
        let unit = water.unit.as_ref().unwrap();
        assert_eq!(unit.lookup("boil"), Some(&["℃".to_string()][..]));
        assert_eq!(unit.lookup("litre"), None);
    }

    #[test]
    fn test_rejects_bad_leaf() {
        let err = DomainGraph::from_json(&json!({"beef": {"rare": true}})).unwrap_err();
        assert_eq!(err.code, codes::INVALID_GRAPH);
        assert_eq!(err.location.as_deref(), Some("beef.rare"));
    }

    #[test]
    fn test_rejects_bad_unit() {
        let err = DomainGraph::from_json(&json!({"beef": {"unit": 3}})).unwrap_err();
        assert_eq!(err.code, codes::INVALID_UNIT);

        let err = DomainGraph::from_json(&json!({"beef": {"unit": "cup__ml"}})).unwrap_err();
        assert_eq!(err.code, codes::INVALID_UNIT);
        assert_eq!(err.location.as_deref(), Some("beef.unit"));
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(DomainGraph::from_json(&json!([1, 2])).is_err());
        assert!(DomainGraph::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_alias_graph_drops_odd_entries() {
        let aliases = AliasGraph::from_json(&json!({
            "chicken": {"fried": "fried chicken"},
            "count": 3
        }))
        .unwrap();
        assert!(aliases.root().contains_key("chicken"));
        assert!(!aliases.root().contains_key("count"));
    }

    #[test]
    fn test_dropped_alias_entries_are_warnings() {
        let (aliases, dropped) = AliasGraph::from_json_with_warnings(&json!({
            "chicken": {"fried": "fried chicken", "wings": [1, 2]},
            "count": 3
        }))
        .unwrap();
        assert_eq!(aliases.root().len(), 1);

        let locations: Vec<_> = dropped.iter().filter_map(|w| w.location.as_deref()).collect();
        assert_eq!(locations, vec!["chicken.wings", "count"]);
        assert!(dropped.iter().all(|w| w.severity == Severity::Warning));
        assert_eq!(dropped[1].code, codes::INVALID_GRAPH);
    }
}
