//! flatconf - layered configuration flattening, merge, and binding
//!
//! Aggregates configuration from heterogeneous sources (JSON/TOML
//! documents, command-line arguments, in-memory mappings) into one
//! strongly-typed object graph:
//!
//! 1. Each source is flattened into an ordered mapping of
//!    dotted/indexed paths to raw string leaves.
//! 2. Sources merge path-wise with last-writer-wins override; a later
//!    source never erases sibling paths it does not set.
//! 3. Target types reconstruct themselves from the merged view through
//!    [`FromConfig`]: primitives, optionals, sequences, string-keyed
//!    maps, tuples, records, enums, and discriminator-selected
//!    polymorphic types.
//!
//! ```
//! use flatconf::{ConfigError, Container, FlatMapping, FromConfig, Path, Section};
//!
//! #[derive(Debug, PartialEq)]
//! struct Settings {
//!     port: u16,
//!     peers: Vec<String>,
//! }
//!
//! impl FromConfig for Settings {
//!     fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
//!         let section = Section::new(view, prefix);
//!         Ok(Self {
//!             port: section.member_or("port", 8080)?,
//!             peers: section.member("peers")?,
//!         })
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.add_args(["-peers", "a", "-peers", "b", "-port", "9000"]);
//! let settings: Settings = container.get()?;
//! assert_eq!(settings.port, 9000);
//! assert_eq!(settings.peers, vec!["a", "b"]);
//! # Ok::<(), flatconf::ConfigError>(())
//! ```

pub mod bind;
pub mod container;
pub mod error;
pub mod flatten;
pub mod mapping;
pub mod merge;
pub mod path;
pub mod source;

pub use bind::{bind_enum, DiscriminatorResolver, FromConfig, Section, Variant};
pub use container::Container;
pub use error::ConfigError;
pub use flatten::{flatten_args, flatten_document, toml_to_json};
pub use mapping::FlatMapping;
pub use merge::merge;
pub use path::{Path, PathContext};
pub use source::{FileFormat, FileSource, OriginKind, SourceOrigin};
