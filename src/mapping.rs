//! Ordered flat mapping of paths to raw string leaves
//!
//! A [`FlatMapping`] is what a flattener emits for one source and what
//! the merge engine produces as the effective view. Entries keep their
//! first-appearance order; writing to an existing path replaces the
//! value in place without moving the entry.

use std::collections::HashMap;

use crate::path::Path;

/// An insertion-ordered mapping from [`Path`] to a raw string leaf.
///
/// Produced once per source and treated as read-only afterward; the
/// merged view is itself a `FlatMapping` built by the merge engine.
#[derive(Debug, Clone, Default)]
pub struct FlatMapping {
    entries: Vec<(Path, String)>,
    index: HashMap<Path, usize>,
}

impl FlatMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write a leaf value. A repeat write at the same path overwrites
    /// the earlier value but keeps the entry's original position.
    pub fn set(&mut self, path: Path, value: impl Into<String>) {
        match self.index.get(&path) {
            Some(&slot) => self.entries[slot].1 = value.into(),
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, value.into()));
            }
        }
    }

    /// Look up the leaf at an exact path.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.index
            .get(path)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    /// Whether any entry exists at `path` or strictly below it.
    pub fn contains_at_or_under(&self, path: &Path) -> bool {
        self.contains(path) || self.entries.iter().any(|(p, _)| path.is_prefix_of(p))
    }

    /// Iterate entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().map(|(p, v)| (p, v.as_str()))
    }

    /// Distinct first segments directly below `prefix`, in
    /// first-appearance order.
    pub fn children(&self, prefix: &Path) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (path, _) in &self.entries {
            if let Some(segment) = prefix.segment_below(path) {
                if !seen.contains(&segment) {
                    seen.push(segment);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_insertion_order() {
        let mut mapping = FlatMapping::new();
        mapping.set(Path::from_dotted("b"), "1");
        mapping.set(Path::from_dotted("a"), "2");
        mapping.set(Path::from_dotted("c"), "3");

        let paths: Vec<String> = mapping.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut mapping = FlatMapping::new();
        mapping.set(Path::from_dotted("a"), "1");
        mapping.set(Path::from_dotted("b"), "2");
        mapping.set(Path::from_dotted("a"), "9");

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&Path::from_dotted("a")), Some("9"));
        let first = mapping.iter().next().map(|(p, v)| (p.to_string(), v.to_string()));
        assert_eq!(first, Some(("a".to_string(), "9".to_string())));
    }

    #[test]
    fn test_contains_at_or_under() {
        let mut mapping = FlatMapping::new();
        mapping.set(Path::from_dotted("pool.size"), "8");

        assert!(mapping.contains_at_or_under(&Path::from_dotted("pool")));
        assert!(mapping.contains_at_or_under(&Path::from_dotted("pool.size")));
        assert!(!mapping.contains_at_or_under(&Path::from_dotted("pool.sizes")));
        assert!(!mapping.contains_at_or_under(&Path::from_dotted("cache")));
    }

    #[test]
    fn test_children_first_appearance_order() {
        let mut mapping = FlatMapping::new();
        mapping.set(Path::from_dotted("hosts.b.port"), "1");
        mapping.set(Path::from_dotted("hosts.a.port"), "2");
        mapping.set(Path::from_dotted("hosts.b.name"), "3");
        mapping.set(Path::from_dotted("other"), "4");

        assert_eq!(mapping.children(&Path::from_dotted("hosts")), vec!["b", "a"]);
        assert!(mapping.children(&Path::from_dotted("other")).is_empty());
    }
}
