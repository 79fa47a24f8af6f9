//! Flat-mapping merge engine
//!
//! Folds an ordered sequence of flat mappings into one effective view.
//! Merge is a path-wise union with last-writer-wins: for each exact
//! path, the last source containing it supplies the value, and paths
//! only present in earlier sources are retained. A later source never
//! erases a sibling path it does not set; override is per path, not
//! per subtree.

use tracing::debug;

use crate::mapping::FlatMapping;

/// Merge sources in priority order (lowest priority first).
///
/// Entry order in the result is first-appearance order across the
/// sources, so map binding observes keys in the order they were first
/// contributed.
pub fn merge(sources: &[FlatMapping]) -> FlatMapping {
    let mut merged = FlatMapping::new();
    for source in sources {
        for (path, value) in source.iter() {
            merged.set(path.clone(), value);
        }
    }
    debug!(
        event = "config.merge.computed",
        sources = sources.len(),
        entries = merged.len()
    );
    merged
}
