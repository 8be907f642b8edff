//! Root-first key paths into a domain graph

use crate::node::{Child, Node, UnitSpec};

/// One walked key and the node found under it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<'g> {
    pub key: &'g str,
    pub lower: &'g str,
    pub node: &'g Node,
    /// Unit metadata of the branch holding this key
    pub unit: Option<&'g UnitSpec>,
}

impl<'g> Step<'g> {
    pub fn new(child: &'g Child, unit: Option<&'g UnitSpec>) -> Self {
        Self {
            key: &child.key,
            lower: &child.lower,
            node: &child.node,
            unit,
        }
    }
}

/// A chain of steps from the graph root to a matched node or branch.
///
/// Paths borrow the graph and are handed out fresh by every search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path<'g> {
    steps: Vec<Step<'g>>,
}

impl<'g> Path<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step<'g>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.steps.iter().map(|s| s.key)
    }

    pub fn last(&self) -> Option<&Step<'g>> {
        self.steps.last()
    }

    /// The terminal node
    pub fn node(&self) -> Option<&'g Node> {
        self.steps.last().map(|s| s.node)
    }

    /// Path without its terminal step
    pub fn parent(&self) -> Path<'g> {
        let end = self.steps.len().saturating_sub(1);
        Path {
            steps: self.steps[..end].to_vec(),
        }
    }

    /// A copy of this path extended by one child of its terminal branch
    pub fn extend(&self, child: &'g Child, unit: Option<&'g UnitSpec>) -> Path<'g> {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(Step::new(child, unit));
        Path { steps }
    }

    pub fn push(&mut self, step: Step<'g>) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<Step<'g>> {
        self.steps.pop()
    }

    /// Nearest unit chain, walking from the terminal step toward the root.
    ///
    /// Each level's unit metadata is looked up with the key walked at that
    /// level; a per-child mapping without that key defers to the next
    /// level up.
    pub fn unit_chain(&self) -> Option<&'g [String]> {
        let terminal = self.steps.last()?.key;
        self.steps.iter().rev().find_map(|step| {
            let unit = step.unit?;
            unit.lookup(step.key).or_else(|| unit.lookup(terminal))
        })
    }

    /// Display the raw keys ("chicken > fried")
    pub fn describe(&self) -> String {
        self.keys().collect::<Vec<_>>().join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{search, DomainGraph};
    use serde_json::json;

    fn graph() -> DomainGraph {
        DomainGraph::from_json(&json!({
            "temperature": {
                "unit": "℃",
                "water": {
                    "unit": {"boil": "℃_℉"},
                    "boil": 100,
                    "freeze": 0
                },
                "oven": {"low": 150}
            },
            "cups": {"unit": "cup_ml", "1 cup": 1},
            "version": "0.0.1"
        }))
        .unwrap()
    }

    fn chain(path: &Path<'_>) -> Option<Vec<String>> {
        path.unit_chain().map(|c| c.to_vec())
    }

    #[test]
    fn test_parent_and_describe() {
        let graph = graph();
        let path = search(&graph, "boil").next().unwrap();
        assert_eq!(path.describe(), "temperature > water > boil");
        assert_eq!(path.parent().describe(), "temperature > water");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_unit_chain_per_child() {
        let graph = graph();
        let path = search(&graph, "boil").next().unwrap();
        assert_eq!(chain(&path), Some(vec!["℃".to_string(), "℉".to_string()]));
    }

    #[test]
    fn test_unit_chain_falls_back_upward() {
        let graph = graph();
        let freeze = search(&graph, "freeze").next().unwrap();
        assert_eq!(chain(&freeze), Some(vec!["℃".to_string()]));

        let low = search(&graph, "low").next().unwrap();
        assert_eq!(chain(&low), Some(vec!["℃".to_string()]));
    }

    #[test]
    fn test_unit_chain_on_branch_path() {
        let graph = graph();
        let cups = search(&graph, "cups").next().unwrap();
        assert_eq!(chain(&cups), None);

        let cups_node = cups.node().and_then(Node::as_branch).unwrap();
        let one = cups.extend(&cups_node.children[0], cups_node.unit.as_ref());
        assert_eq!(chain(&one), Some(vec!["cup".to_string(), "ml".to_string()]));
    }

    #[test]
    fn test_dimensionless() {
        let graph = graph();
        let version = search(&graph, "version").next().unwrap();
        assert_eq!(chain(&version), None);
    }
}
