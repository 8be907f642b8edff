//! Multi-key containment filter

use crate::path::Path;

/// Accepts a path when every key prefixes some key on the path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contains {
    keys: Vec<String>,
}

impl Contains {
    pub fn new<S: AsRef<str>>(keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            keys: keys.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn matches(&self, path: &Path<'_>) -> bool {
        self.keys
            .iter()
            .all(|key| path.steps().iter().any(|step| step.lower.starts_with(key.as_str())))
    }
}

/// Predicate form of [`Contains`]
pub fn contains<S: AsRef<str>>(keys: impl IntoIterator<Item = S>) -> impl Fn(&Path<'_>) -> bool {
    let filter = Contains::new(keys);
    move |path| filter.matches(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{search, DomainGraph};
    use serde_json::json;

    fn graph() -> DomainGraph {
        DomainGraph::from_json(&json!({
            "chicken": {"fried": 165, "roast": 180},
            "eggs": {"fried": 70}
        }))
        .unwrap()
    }

    #[test]
    fn test_order_independent() {
        let graph = graph();
        let path = search(&graph, "fried").next().unwrap();
        assert_eq!(path.describe(), "chicken > fried");

        assert!(contains(["fried", "chicken"])(&path));
        assert!(contains(["chicken", "fried"])(&path));
        assert!(!contains(["fried", "eggs"])(&path));
    }

    #[test]
    fn test_prefixes_and_case() {
        let graph = graph();
        let path = search(&graph, "roast").next().unwrap();
        assert!(contains(["chi", "ro"])(&path));
        assert!(contains(["CHI"])(&path));
        assert!(!contains(["chi", "fr"])(&path));
    }

    #[test]
    fn test_empty_keys_accept_everything() {
        let graph = graph();
        let path = search(&graph, "eggs").next().unwrap();
        assert!(Contains::new(Vec::<String>::new()).matches(&path));
    }

    #[test]
    fn test_filters_search_results() {
        let graph = graph();
        let filter = Contains::new(["fried", "eggs"]);
        let hits: Vec<_> = search(&graph, "fried")
            .filter(|p| filter.matches(p))
            .map(|p| p.describe())
            .collect();
        assert_eq!(hits, vec!["eggs > fried"]);
    }
}
