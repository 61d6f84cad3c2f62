//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → tree.rs (load & parse into an immutable tree)
//!     → properties.rs (dotted `app.property` lookups)
//!     → consumed by the datastore builder and embedding hosts
//! ```
//!
//! # Design Decisions
//! - The tree is immutable once loaded; a `ConfigTree` value cannot exist
//!   before a successful load, so "query before load" is unrepresentable
//! - Lookups are dynamic (path-based), not schema-based: sections are keyed
//!   by application name and are not known at compile time
//! - A missing property is an error for the caller to handle, never an
//!   implicit empty string

pub mod properties;
pub mod tree;

pub use properties::{resolve_property, PropertyNotFound};
pub use tree::{ConfigError, ConfigTree};
