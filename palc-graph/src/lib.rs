//! Domain graph search for palc
//!
//! Provides:
//! - `DomainGraph`: pre-classified, insertion-ordered tree of branches and leaves
//! - `search`: lazy depth-first prefix search producing `Path`s
//! - `Contains`: order-independent multi-key path filter
//! - `AliasGraph` / `AliasResolver`: display text for paths

mod node;
mod path;
mod search;
mod filter;
mod alias;
mod load;

pub use node::{Branch, Child, DomainGraph, Node, UnitSpec, UNIT_KEY};
pub use path::{Path, Step};
pub use search::{search, PathSearch};
pub use filter::{contains, Contains};
pub use alias::{AliasGraph, AliasNode, AliasResolver};
