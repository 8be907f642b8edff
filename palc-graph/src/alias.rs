//! Alias graph and display text resolution

use crate::path::Path;
use std::collections::HashMap;

/// Entry in the alias graph
#[derive(Debug, Clone, PartialEq)]
pub enum AliasNode {
    /// Keep matching the next key inside this mapping
    Map(HashMap<String, AliasNode>),
    /// Display phrase replacing the keys of the current span
    Phrase(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasGraph {
    root: HashMap<String, AliasNode>,
}

impl AliasGraph {
    pub fn new(root: HashMap<String, AliasNode>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &HashMap<String, AliasNode> {
        &self.root
    }

    /// Resolve a key sequence into display fragments.
    ///
    /// A span starts at the root of the alias graph and grows while keys
    /// descend through mappings. A phrase replaces the whole span and
    /// closes it. A key with no entry is emitted as is and matching
    /// restarts from the root, though the span stays open.
    pub fn fragments<'s, I>(&'s self, keys: I) -> Vec<&'s str>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut out: Vec<&str> = Vec::new();
        let mut span_start = 0;
        let mut level = &self.root;

        for key in keys {
            match level.get(key) {
                Some(AliasNode::Phrase(phrase)) => {
                    out.truncate(span_start);
                    out.push(phrase);
                    span_start = out.len();
                    level = &self.root;
                }
                Some(AliasNode::Map(next)) => {
                    out.push(key);
                    level = next;
                }
                None => {
                    out.push(key);
                    level = &self.root;
                }
            }
        }
        out.retain(|s| !s.is_empty());
        out
    }
}

/// Turns paths into display text through an alias graph
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    graph: &'a AliasGraph,
    separator: &'a str,
}

impl<'a> AliasResolver<'a> {
    pub fn new(graph: &'a AliasGraph) -> Self {
        Self { graph, separator: ", " }
    }

    /// Builder: set the text placed between fragments
    pub fn with_separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    pub fn resolve(&self, path: &Path<'_>) -> String {
        self.graph
            .fragments(path.keys())
            .join(self.separator)
            .trim()
            .to_string()
    }
}
