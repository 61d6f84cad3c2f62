//! Network address resolution.
//!
//! # Data Flow
//! ```text
//! application name
//!     → address.rs (UPPER(app)_HOST / UPPER(app)_PORT env lookup)
//!     → ListenAddress { host, port }
//!     → bound by the http subsystem at composition time
//! ```
//!
//! # Design Decisions
//! - Pure function of name + process environment; no caching, so an
//!   environment change is observed on the next call
//! - App names are validated against the charset that can form an env-var
//!   prefix, instead of silently producing a malformed lookup

pub mod address;

pub use address::{resolve_address, valid_app_name, ListenAddress, DEFAULT_HOST, DEFAULT_PORT};
