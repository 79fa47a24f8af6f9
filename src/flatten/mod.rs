//! Source flatteners
//!
//! Each flattener walks one source's hierarchical data and emits an
//! ordered [`FlatMapping`](crate::FlatMapping) of dotted/indexed paths
//! to raw string leaves. Two source kinds are supported: parsed
//! structured documents (JSON, or TOML converted to the same tree) and
//! command-line argument vectors.

mod args;
mod document;

pub use args::flatten_args;
pub use document::{flatten_document, toml_to_json};
