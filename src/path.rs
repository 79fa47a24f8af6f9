//! Dotted/indexed paths into a configuration tree
//!
//! A [`Path`] identifies a leaf location in a hierarchical document:
//! an ordered list of segments, where each segment is an object member
//! name or an array index rendered as a decimal string. The empty path
//! denotes the document root (a bare root scalar lands there).

use std::fmt;

/// An immutable location in a configuration tree.
///
/// Two paths are equal iff their segment sequences are equal
/// element-wise. `Display` renders the segments dot-joined, which is
/// also the textual form accepted by [`Path::from_dotted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path (document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-separated path string. An empty string is the root.
    pub fn from_dotted(text: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self {
            segments: text.split('.').map(str::to_string).collect(),
        }
    }

    /// Extend this path with one more segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Extend this path with an array index segment.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether `self` is a strict prefix of `other`.
    ///
    /// The root path is a prefix of every non-root path. A path is
    /// never a prefix of itself.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.segments.len() > self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// The first segment of `other` directly below `self`, if `self`
    /// is a strict prefix of `other`.
    pub fn segment_below<'a>(&self, other: &'a Path) -> Option<&'a str> {
        if self.is_prefix_of(other) {
            Some(&other.segments[self.segments.len()])
        } else {
            None
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Strict push/pop stack of path segments used while walking a source
/// tree.
///
/// Flatteners push a segment when descending into an object member or
/// sequence element and pop it on the way back out; `current()`
/// snapshots the stack as the map key when a leaf is reached. Popping
/// an empty context is a programming error and panics.
#[derive(Debug, Default)]
pub struct PathContext {
    stack: Vec<String>,
}

impl PathContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.stack.push(segment.into());
    }

    /// Pop the most recently pushed segment.
    ///
    /// # Panics
    ///
    /// Panics if the context is empty (a pop without a matching push).
    pub fn pop(&mut self) {
        assert!(
            self.stack.pop().is_some(),
            "PathContext::pop without a matching push"
        );
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Snapshot the current stack as a [`Path`].
    pub fn current(&self) -> Path {
        Path {
            segments: self.stack.clone(),
        }
    }
}
