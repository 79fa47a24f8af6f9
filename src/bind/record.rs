//! Record binding helpers
//!
//! Records bind by naming each member explicitly; extra paths under a
//! record's prefix that match no member are ignored, so newer sources
//! can carry settings an older binary does not know about.

use crate::bind::FromConfig;
use crate::error::ConfigError;
use crate::mapping::FlatMapping;
use crate::path::Path;

/// A record's view of the merged mapping, scoped to its prefix.
///
/// ```
/// use flatconf::{ConfigError, FlatMapping, FromConfig, Path, Section};
///
/// struct Server {
///     host: String,
///     port: u16,
///     replicas: Vec<String>,
/// }
///
/// impl FromConfig for Server {
///     fn from_config(view: &FlatMapping, prefix: &Path) -> Result<Self, ConfigError> {
///         let section = Section::new(view, prefix);
///         Ok(Self {
///             host: section.member("host")?,
///             port: section.member_or("port", 8080)?,
///             replicas: section.member("replicas")?,
///         })
///     }
/// }
/// ```
pub struct Section<'a> {
    view: &'a FlatMapping,
    prefix: &'a Path,
}

impl<'a> Section<'a> {
    pub fn new(view: &'a FlatMapping, prefix: &'a Path) -> Self {
        Self { view, prefix }
    }

    /// Bind a required member at `prefix.name`.
    pub fn member<T: FromConfig>(&self, name: &str) -> Result<T, ConfigError> {
        T::from_config(self.view, &self.prefix.child(name))
    }

    /// Bind a member, using `default` when no entry exists at or under
    /// its path.
    pub fn member_or<T: FromConfig>(&self, name: &str, default: T) -> Result<T, ConfigError> {
        self.member_or_else(name, || default)
    }

    /// Bind a member, computing the default lazily.
    pub fn member_or_else<T, F>(&self, name: &str, default: F) -> Result<T, ConfigError>
    where
        T: FromConfig,
        F: FnOnce() -> T,
    {
        let path = self.prefix.child(name);
        if !self.view.contains_at_or_under(&path) {
            return Ok(default());
        }
        T::from_config(self.view, &path)
    }

    /// The prefix this section is scoped to.
    pub fn prefix(&self) -> &Path {
        self.prefix
    }
}
