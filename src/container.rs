//! Configuration container
//!
//! Holds the ordered, append-only list of flattened sources (lowest
//! priority added first) plus each source's provenance, and serves
//! typed bind requests against the lazily computed merged view.
//!
//! The container is single-threaded by design: sources are added
//! during startup, binding happens after all adds, and nothing here
//! performs I/O or suspends.

use std::cell::OnceCell;

use tracing::{debug, warn};

use crate::bind::FromConfig;
use crate::error::ConfigError;
use crate::flatten::flatten_args;
use crate::mapping::FlatMapping;
use crate::merge::merge;
use crate::path::Path;
use crate::source::{FileSource, SourceOrigin};

/// Ordered collection of configuration sources with a cached merged
/// view.
#[derive(Debug, Default)]
pub struct Container {
    sources: Vec<FlatMapping>,
    origins: Vec<SourceOrigin>,
    merged: OnceCell<FlatMapping>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-flattened source at the highest priority so
    /// far. Invalidates the cached merged view.
    pub fn add(&mut self, mapping: FlatMapping) {
        self.add_with_origin(mapping, SourceOrigin::memory());
    }

    /// Append a source together with its provenance.
    pub fn add_with_origin(&mut self, mapping: FlatMapping, origin: SourceOrigin) {
        debug!(
            event = "config.source.added",
            kind = ?origin.kind,
            entries = mapping.len(),
            priority = self.sources.len()
        );
        self.sources.push(mapping);
        self.origins.push(origin);
        let _ = self.merged.take();
    }

    /// Load a file source and append it. An optional source that fails
    /// to load contributes nothing and is not an error.
    pub fn add_file(&mut self, source: &FileSource) -> Result<(), ConfigError> {
        match source.load()? {
            Some((mapping, origin)) => self.add_with_origin(mapping, origin),
            None => warn!(
                event = "config.source.optional_absent",
                path = %source.path().display()
            ),
        }
        Ok(())
    }

    /// Flatten an argument vector (argv without the program name) and
    /// append it.
    pub fn add_args<I, S>(&mut self, argv: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_with_origin(flatten_args(argv), SourceOrigin::command_line());
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Provenance of the added sources, in priority order.
    pub fn origins(&self) -> &[SourceOrigin] {
        &self.origins
    }

    /// The effective merged view, computed on first use and cached
    /// until the next add.
    pub fn merged(&self) -> &FlatMapping {
        self.merged.get_or_init(|| merge(&self.sources))
    }

    /// Bind a typed value from the merged view at the root prefix.
    pub fn get<T: FromConfig>(&self) -> Result<T, ConfigError> {
        self.get_at(&Path::root())
    }

    /// Bind a typed value scoped to a path prefix.
    pub fn get_at<T: FromConfig>(&self, prefix: &Path) -> Result<T, ConfigError> {
        T::from_config(self.merged(), prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::OriginKind;

    fn single(path: &str, value: &str) -> FlatMapping {
        let mut mapping = FlatMapping::new();
        mapping.set(Path::from_dotted(path), value);
        mapping
    }

    #[test]
    fn test_later_source_overrides_earlier() {
        let mut container = Container::new();
        container.add(single("p", "1"));
        container.add(single("p", "2"));

        let bound: String = container.get_at(&Path::from_dotted("p")).unwrap();
        assert_eq!(bound, "2");
    }

    #[test]
    fn test_add_invalidates_cached_view() {
        let mut container = Container::new();
        container.add(single("p", "1"));
        assert_eq!(container.merged().get(&Path::from_dotted("p")), Some("1"));

        container.add(single("p", "2"));
        assert_eq!(container.merged().get(&Path::from_dotted("p")), Some("2"));
    }

    #[test]
    fn test_args_source_is_tracked() {
        let mut container = Container::new();
        container.add_args(["-port", "8080"]);

        assert_eq!(container.source_count(), 1);
        assert_eq!(container.origins()[0].kind, OriginKind::CommandLine);
        let port: u16 = container.get_at(&Path::from_dotted("port")).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_optional_missing_file_contributes_nothing() {
        let mut container = Container::new();
        container
            .add_file(&FileSource::new("/nonexistent/app.json").optional())
            .unwrap();
        assert_eq!(container.source_count(), 0);
    }

    #[test]
    fn test_required_missing_file_is_an_error() {
        let mut container = Container::new();
        let result = container.add_file(&FileSource::new("/nonexistent/app.json"));
        assert!(matches!(result, Err(ConfigError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_get_binds_at_root() {
        let mut container = Container::new();
        container.add(single("limits.read", "10"));
        container.add(single("limits.write", "5"));

        let limits: std::collections::HashMap<String, std::collections::HashMap<String, u32>> =
            container.get().unwrap();
        assert_eq!(limits["limits"]["read"], 10);
        assert_eq!(limits["limits"]["write"], 5);
    }
}
