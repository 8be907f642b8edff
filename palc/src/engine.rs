//! Search engine
//!
//! `Engine::query` parses the input against the previous call's tokens and
//! returns a lazy [`Results`] sequence. For every key, in query order, the
//! prefix search runs over the domain graph, paths are checked against
//! all keys, and each surviving path becomes entries:
//! - a branch path: its heading, then one entry per direct child
//! - a leaf path: its parent's heading (unless top level), then its value
//!
//! A heading is emitted once per branch path within one query.

use crate::calc::{remember_units, resolve_units, Calculation, Preferences};
use crate::entry::Entry;
use crate::options::{DedupePolicy, EngineOptions};
use crate::query::{parse, Query};
use palc_core::Value;
use palc_graph::{AliasGraph, AliasResolver, Child, Contains, DomainGraph, Node, Path, PathSearch, UnitSpec};
use palc_kitchen::Dataset;
use palc_units::{ConversionTable, UnitAlgebra};
use std::collections::{HashSet, VecDeque};
use std::slice;
use tracing::{debug, trace};

/// Query engine over borrowed datasets, owning per-session state:
/// the previous query's tokens and remembered unit targets.
#[derive(Debug, Clone)]
pub struct Engine<'g> {
    graph: &'g DomainGraph,
    aliases: &'g AliasGraph,
    units: &'g UnitAlgebra,
    options: EngineOptions,
    history: Vec<String>,
    preferences: Preferences,
}

impl<'g> Engine<'g> {
    pub fn new(dataset: &'g Dataset) -> Self {
        Self::from_parts(&dataset.graph, &dataset.aliases, &dataset.units)
    }

    pub fn from_parts(graph: &'g DomainGraph, aliases: &'g AliasGraph, units: &'g UnitAlgebra) -> Self {
        Self {
            graph,
            aliases,
            units,
            options: EngineOptions::default(),
            history: Vec::new(),
            preferences: Preferences::new(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Raw tokens of the last query
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Forget history and remembered units
    pub fn reset(&mut self) {
        self.history.clear();
        self.preferences.clear();
    }

    /// Parse without touching engine state
    pub fn parse(&self, input: &str) -> Query {
        parse(input, &self.history, &self.units.registry)
    }

    /// Run a query. History and unit targets are updated now; the returned
    /// sequence holds no borrow of the engine.
    pub fn query(&mut self, input: &str) -> Results<'g> {
        let query = self.parse(input);
        self.history = query.tokens.clone();

        let preferences = if self.options.remember_units {
            remember_units(&mut self.preferences, &query.units, &self.units.table);
            self.preferences.clone()
        } else {
            Preferences::new()
        };

        Results::new(self, query, preferences)
    }
}

/// Children of a matched branch, listed one per pull
struct Children<'g> {
    path: Path<'g>,
    unit: Option<&'g UnitSpec>,
    iter: slice::Iter<'g, Child>,
}

/// Lazy result sequence of one query
pub struct Results<'g> {
    graph: &'g DomainGraph,
    aliases: &'g AliasGraph,
    table: &'g ConversionTable,
    options: EngineOptions,
    query: Query,
    filter: Contains,
    preferences: Preferences,
    next_key: usize,
    search: Option<PathSearch<'g>>,
    children: Option<Children<'g>>,
    pending: VecDeque<Entry>,
    headings: HashSet<Vec<&'g str>>,
    seen: HashSet<Entry>,
}

impl<'g> Results<'g> {
    fn new(engine: &Engine<'g>, query: Query, preferences: Preferences) -> Self {
        let units: &'g UnitAlgebra = engine.units;
        Self {
            graph: engine.graph,
            aliases: engine.aliases,
            table: &units.table,
            options: engine.options.clone(),
            filter: Contains::new(&query.keys),
            query,
            preferences,
            next_key: 0,
            search: None,
            children: None,
            pending: VecDeque::new(),
            headings: HashSet::new(),
            seen: HashSet::new(),
        }
    }

    /// The parsed query behind this sequence
    pub fn query(&self) -> &Query {
        &self.query
    }

    fn alias(&self, path: &Path<'_>) -> String {
        AliasResolver::new(self.aliases)
            .with_separator(&self.options.separator)
            .resolve(path)
    }

    fn calculate(&self, path: &Path<'_>, key: &str, value: &Value) -> String {
        let chain = resolve_units(path, &self.query.units, &self.preferences);
        Calculation::new(self.table)
            .with_scale(self.query.scale, self.query.op)
            .with_decimals(self.options.decimals)
            .calculate(key, value, &chain)
    }

    fn heading(&mut self, path: &Path<'g>) {
        if self.headings.insert(path.keys().collect()) {
            let text = self.alias(path);
            self.pending.push_back(Entry::branch(text));
        }
    }

    fn expand(&mut self, path: Path<'g>) {
        let Some(step) = path.last().copied() else {
            return;
        };
        match step.node {
            Node::Branch(branch) => {
                self.heading(&path);
                self.children = Some(Children {
                    path,
                    unit: branch.unit.as_ref(),
                    iter: branch.children.iter(),
                });
            }
            Node::Leaf(value) => {
                if path.len() > 1 {
                    self.heading(&path.parent());
                }
                let text = self.calculate(&path, step.key, value);
                self.pending.push_back(Entry::node(text));
            }
        }
    }

    fn child_entry(&self, path: &Path<'g>) -> Option<Entry> {
        let step = path.last()?;
        Some(match step.node {
            Node::Leaf(value) => Entry::node(self.calculate(path, step.key, value)),
            Node::Branch(_) => Entry::node(self.alias(path)),
        })
    }

    fn admit(&mut self, entry: &Entry) -> bool {
        match self.options.dedupe {
            DedupePolicy::None => true,
            DedupePolicy::DisplayText => self.seen.insert(entry.clone()),
        }
    }
}

impl<'g> Iterator for Results<'g> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                if self.admit(&entry) {
                    return Some(entry);
                }
                trace!(value = %entry.value, "duplicate entry skipped");
                continue;
            }

            if let Some(children) = self.children.as_mut() {
                match children.iter.next() {
                    Some(child) => {
                        let path = children.path.extend(child, children.unit);
                        if let Some(entry) = self.child_entry(&path) {
                            self.pending.push_back(entry);
                        }
                    }
                    None => self.children = None,
                }
                continue;
            }

            let Some(search) = self.search.as_mut() else {
                let key = self.query.keys.get(self.next_key)?;
                debug!(key = %key, "searching");
                self.search = Some(PathSearch::new(self.graph, key));
                self.next_key += 1;
                continue;
            };

            match search.next() {
                Some(path) if self.filter.matches(&path) => self.expand(path),
                Some(path) => trace!(path = %path.describe(), "rejected by key filter"),
                None => self.search = None,
            }
        }
    }
}
