//! Depth-first prefix search
//!
//! Pre-order over children in insertion order. A key that starts with
//! the token is yielded and its subtree is not entered; any other branch
//! is descended into. The traversal stack lives in the iterator, so each
//! search is independent and may be dropped at any point.

use crate::node::{Branch, Child, DomainGraph, Node};
use crate::path::{Path, Step};
use std::slice;

struct Frame<'g> {
    branch: &'g Branch,
    children: slice::Iter<'g, Child>,
}

impl<'g> Frame<'g> {
    fn new(branch: &'g Branch) -> Self {
        Self {
            branch,
            children: branch.children.iter(),
        }
    }
}

/// Lazy sequence of paths whose terminal key starts with a token
pub struct PathSearch<'g> {
    token: String,
    stack: Vec<Frame<'g>>,
    path: Path<'g>,
}

impl<'g> PathSearch<'g> {
    pub fn new(graph: &'g DomainGraph, token: &str) -> Self {
        Self {
            token: token.to_lowercase(),
            stack: vec![Frame::new(graph.root())],
            path: Path::new(),
        }
    }
}

impl<'g> Iterator for PathSearch<'g> {
    type Item = Path<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let holder: &'g Branch = frame.branch;
            let unit = holder.unit.as_ref();

            let Some(child) = frame.children.next() else {
                self.stack.pop();
                self.path.pop();
                continue;
            };

            if child.lower.starts_with(&self.token) {
                return Some(self.path.extend(child, unit));
            }
            if let Node::Branch(inner) = &child.node {
                self.path.push(Step::new(child, unit));
                self.stack.push(Frame::new(inner));
            }
        }
    }
}

/// Search a graph for every path whose terminal key starts with `token`
pub fn search<'g>(graph: &'g DomainGraph, token: &str) -> PathSearch<'g> {
    PathSearch::new(graph, token)
}
