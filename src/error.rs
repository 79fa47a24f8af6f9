//! Configuration error registry
//!
//! Every binding failure carries the offending path and the target type
//! name so callers can report exactly which setting was bad. Binding
//! either fully succeeds or fails with one of these; no partially
//! populated value is ever returned.

use crate::path::Path;

/// Errors produced while loading, flattening, or binding configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required path has no value in the merged view.
    #[error("missing required value at '{path}' for {target}")]
    MissingValue {
        path: Path,
        target: &'static str,
    },

    /// The leaf text at a path does not parse as the target type.
    #[error("value {text:?} at '{path}' does not parse as {target}")]
    Parse {
        path: Path,
        text: String,
        target: &'static str,
    },

    /// A sequence's index run is not contiguous from zero.
    #[error("sequence at '{path}' has a gap: index {missing} is absent ({target})")]
    SequenceGap {
        path: Path,
        missing: usize,
        target: &'static str,
    },

    /// A discriminator value matched no declared variant.
    #[error("unknown variant tag {tag:?} at '{path}'; expected one of: {expected}")]
    UnknownVariant {
        path: Path,
        tag: String,
        expected: String,
    },

    /// Two variants declared the same resolution-key value. This is a
    /// declaration error, detected when the resolver is built and
    /// independent of any input data.
    #[error("ambiguous variant declaration for {target}: tag {tag:?} declared more than once")]
    AmbiguousVariant {
        tag: String,
        target: &'static str,
    },

    /// A non-optional source could not be read.
    #[error("source '{path}' unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// A source was read but its document syntax did not parse.
    #[error("failed to parse source '{path}': {reason}")]
    Syntax { path: String, reason: String },
}
