//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file '{path}' does not exist")]
    NotFound { path: String },

    /// The file exists but could not be read.
    #[error("failed to read configuration file '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file contents are not valid TOML.
    #[error("failed to parse configuration file '{path}'")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// An immutable, hierarchical configuration tree loaded from a TOML file.
///
/// Top-level tables are keyed by application name; each section holds flat
/// string-valued keys. Values are queried by dotted path.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: toml::Value,
}

impl ConfigTree {
    /// Load and parse a configuration file.
    ///
    /// A missing file is reported as [`ConfigError::NotFound`] so embedding
    /// hosts can recover; this never terminates the process.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse a configuration tree from in-memory TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let root = content.parse::<toml::Value>()?;
        Ok(Self { root })
    }

    /// Look up a value by dotted path (e.g. `"shop.dbdriver"`).
    ///
    /// Returns `None` if any path segment is absent or a non-table value is
    /// traversed before the final segment.
    pub fn get(&self, path: &str) -> Option<&toml::Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    /// Look up a string value by dotted path.
    ///
    /// Returns `None` when the path is absent or the value is not a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[shop]
dbdriver = "sqlite3"
dbpath = "shop.db"
retries = 3
"#;

    #[test]
    fn test_dotted_lookup() {
        let tree = ConfigTree::parse(SAMPLE).unwrap();
        assert_eq!(tree.get_str("shop.dbdriver"), Some("sqlite3"));
        assert_eq!(tree.get_str("shop.dbpath"), Some("shop.db"));
    }

    #[test]
    fn test_absent_paths() {
        let tree = ConfigTree::parse(SAMPLE).unwrap();
        assert!(tree.get("shop.dbserver").is_none());
        assert!(tree.get("blog.dbdriver").is_none());
        // traversing through a leaf must not panic
        assert!(tree.get("shop.dbdriver.nested").is_none());
    }

    #[test]
    fn test_non_string_value() {
        let tree = ConfigTree::parse(SAMPLE).unwrap();
        assert!(tree.get("shop.retries").is_some());
        assert_eq!(tree.get_str("shop.retries"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigTree::load("/nonexistent/warden-test.toml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_parse_error() {
        assert!(ConfigTree::parse("not [valid toml").is_err());
    }
}
