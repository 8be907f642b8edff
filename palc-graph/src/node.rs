//! Pre-classified domain graph
//!
//! Every node is decided once at load time: a `Branch` with ordered
//! children, or a `Leaf` holding a scalar. The reserved `unit` key never
//! becomes a child; it is lifted into the branch as a [`UnitSpec`].

use palc_core::Value;

/// Reserved key holding unit metadata for its siblings
pub const UNIT_KEY: &str = "unit";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Branch(Branch),
    Leaf(Value),
}

impl Node {
    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(b) => Some(b),
            Node::Leaf(_) => None,
        }
    }
}

/// A keyed child; the lowercase key is computed once for prefix matching
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub key: String,
    pub lower: String,
    pub node: Node,
}

impl Child {
    pub fn new(key: impl Into<String>, node: Node) -> Self {
        let key = key.into();
        let lower = key.to_lowercase();
        Self { key, lower, node }
    }
}

/// Unit metadata attached to a branch
#[derive(Debug, Clone, PartialEq)]
pub enum UnitSpec {
    /// One unit chain for every child (`"unit": "cup_ml"`)
    Chain(Vec<String>),
    /// Chain per child key (`"unit": {"boil": "℃"}`)
    PerChild(Vec<(String, Vec<String>)>),
}

impl UnitSpec {
    /// Chain that applies to the given child key
    pub fn lookup(&self, key: &str) -> Option<&[String]> {
        match self {
            UnitSpec::Chain(chain) => Some(chain),
            UnitSpec::PerChild(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, chain)| chain.as_slice()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    pub children: Vec<Child>,
    pub unit: Option<UnitSpec>,
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a child
    pub fn with_child(mut self, key: impl Into<String>, node: Node) -> Self {
        self.children.push(Child::new(key, node));
        self
    }

    /// Builder: attach unit metadata
    pub fn with_unit(mut self, unit: UnitSpec) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.key == key).map(|c| &c.node)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// The searchable domain graph; immutable once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainGraph {
    root: Branch,
}

impl DomainGraph {
    pub fn new(root: Branch) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Branch {
        &self.root
    }

    /// Walk a key path from the root
    pub fn get(&self, keys: &[&str]) -> Option<&Node> {
        let (first, rest) = keys.split_first()?;
        let mut node = self.root.child(first)?;
        for key in rest {
            node = node.as_branch()?.child(key)?;
        }
        Some(node)
    }
}
