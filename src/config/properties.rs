//! Per-application property resolution.
//!
//! # Responsibilities
//! - Resolve `app.property` paths against a loaded [`ConfigTree`]
//! - Report absence as a typed error carrying both identifiers
//!
//! # Design Decisions
//! - Pure read: no caching, no mutation
//! - A value that exists but is not a string counts as absent; the
//!   recognized datastore keys are string-valued by contract
//! - Fallback policy belongs to the caller; this never substitutes `""`

use thiserror::Error;

use crate::config::tree::ConfigTree;

/// A requested property is absent from the application's config section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("configuration missing '{property}' under [{app}]")]
pub struct PropertyNotFound {
    pub app: String,
    pub property: String,
}

/// Resolve `property` for `app` as a string.
pub fn resolve_property(
    tree: &ConfigTree,
    app: &str,
    property: &str,
) -> Result<String, PropertyNotFound> {
    tree.get_str(&format!("{app}.{property}"))
        .map(str::to_owned)
        .ok_or_else(|| PropertyNotFound {
            app: app.to_string(),
            property: property.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ConfigTree {
        ConfigTree::parse(
            r#"
[shop]
dbdriver = "sqlite3"
dbport = 5432
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_present() {
        let tree = sample_tree();
        assert_eq!(
            resolve_property(&tree, "shop", "dbdriver").unwrap(),
            "sqlite3"
        );
    }

    #[test]
    fn test_resolve_absent() {
        let tree = sample_tree();
        let err = resolve_property(&tree, "shop", "dbserver").unwrap_err();
        assert_eq!(err.app, "shop");
        assert_eq!(err.property, "dbserver");
    }

    #[test]
    fn test_resolve_unknown_app() {
        let tree = sample_tree();
        assert!(resolve_property(&tree, "blog", "dbdriver").is_err());
    }

    #[test]
    fn test_non_string_is_not_found() {
        let tree = sample_tree();
        let err = resolve_property(&tree, "shop", "dbport").unwrap_err();
        assert_eq!(err.property, "dbport");
    }
}
