//! File source loading with provenance
//!
//! Reads a JSON or TOML file, flattens it, and records where the data
//! came from: origin kind, file path, and a SHA-256 digest of the raw
//! bytes. A source marked optional turns any load failure into a
//! skipped source instead of an error.

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::ConfigError;
use crate::flatten::{flatten_document, toml_to_json};
use crate::mapping::FlatMapping;

/// Where a flat mapping came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OriginKind {
    /// Added directly as an in-memory mapping.
    Memory,
    File,
    CommandLine,
}

/// Provenance of one added source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOrigin {
    pub kind: OriginKind,

    /// File path (None for memory/command-line sources).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw file bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl SourceOrigin {
    pub fn memory() -> Self {
        Self {
            kind: OriginKind::Memory,
            path: None,
            digest: None,
        }
    }

    pub fn command_line() -> Self {
        Self {
            kind: OriginKind::CommandLine,
            path: None,
            digest: None,
        }
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &FsPath) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A configuration file to load, parse, and flatten.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Option<FileFormat>,
    optional: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            optional: false,
        }
    }

    /// Treat a missing or unreadable file as a no-op instead of an
    /// error.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Override the extension-based format detection.
    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// Load, parse, and flatten the file.
    ///
    /// Returns `Ok(None)` when the source is optional and could not be
    /// loaded; otherwise a non-optional failure is
    /// [`ConfigError::SourceUnavailable`] (unreadable) or
    /// [`ConfigError::Syntax`] (unparsable).
    pub fn load(&self) -> Result<Option<(FlatMapping, SourceOrigin)>, ConfigError> {
        match self.try_load() {
            Ok(loaded) => Ok(Some(loaded)),
            Err(err) if self.optional => {
                warn!(
                    event = "config.source.skipped",
                    path = %self.path.display(),
                    reason = %err
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn try_load(&self) -> Result<(FlatMapping, SourceOrigin), ConfigError> {
        let display = self.path.display().to_string();

        let bytes = fs::read(&self.path).map_err(|e| ConfigError::SourceUnavailable {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let text = String::from_utf8(bytes).map_err(|e| ConfigError::Syntax {
            path: display.clone(),
            reason: format!("invalid UTF-8: {e}"),
        })?;

        let format = self
            .format
            .or_else(|| FileFormat::from_path(&self.path))
            .ok_or_else(|| ConfigError::Syntax {
                path: display.clone(),
                reason: "unknown file format (expected .json or .toml)".to_string(),
            })?;

        let tree = match format {
            FileFormat::Json => {
                serde_json::from_str(&text).map_err(|e| ConfigError::Syntax {
                    path: display.clone(),
                    reason: e.to_string(),
                })?
            }
            FileFormat::Toml => {
                let table: toml::Value =
                    toml::from_str(&text).map_err(|e| ConfigError::Syntax {
                        path: display.clone(),
                        reason: e.to_string(),
                    })?;
                toml_to_json(table)
            }
        };

        let origin = SourceOrigin {
            kind: OriginKind::File,
            path: Some(display),
            digest: Some(digest),
        };
        Ok((flatten_document(&tree), origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_load_json_file() {
        let file = temp_file(".json", r#"{"server": {"port": 8080}}"#);
        let (mapping, origin) = FileSource::new(file.path()).load().unwrap().unwrap();

        assert_eq!(mapping.get(&Path::from_dotted("server.port")), Some("8080"));
        assert_eq!(origin.kind, OriginKind::File);
        assert!(origin.digest.is_some());
    }

    #[test]
    fn test_load_toml_file() {
        let file = temp_file(".toml", "overall_seconds = 900\n[cache]\nmode = \"on\"\n");
        let (mapping, _) = FileSource::new(file.path()).load().unwrap().unwrap();

        assert_eq!(mapping.get(&Path::from_dotted("overall_seconds")), Some("900"));
        assert_eq!(mapping.get(&Path::from_dotted("cache.mode")), Some("on"));
    }

    #[test]
    fn test_missing_required_file_is_unavailable() {
        let result = FileSource::new("/nonexistent/app.json").load();
        assert!(matches!(
            result,
            Err(ConfigError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let result = FileSource::new("/nonexistent/app.json").optional().load();
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_unparsable_optional_file_is_skipped() {
        let file = temp_file(".json", "{not json");
        let result = FileSource::new(file.path()).optional().load();
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_unparsable_required_file_is_syntax_error() {
        let file = temp_file(".json", "{not json");
        assert!(matches!(
            FileSource::new(file.path()).load(),
            Err(ConfigError::Syntax { .. })
        ));
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let file = temp_file(".cfg", r#"{"a": 1}"#);
        let (mapping, _) = FileSource::new(file.path())
            .format(FileFormat::Json)
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(mapping.get(&Path::from_dotted("a")), Some("1"));
    }

    #[test]
    fn test_unknown_extension_without_format() {
        let file = temp_file(".cfg", "whatever");
        assert!(matches!(
            FileSource::new(file.path()).load(),
            Err(ConfigError::Syntax { .. })
        ));
    }
}
