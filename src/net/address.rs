//! Environment-derived listening addresses.
//!
//! # Responsibilities
//! - Derive `host:port` for an application from `<APP>_HOST` / `<APP>_PORT`
//! - Fall back to fixed defaults when either variable is unset
//! - Validate that an application name can form an env-var prefix

use std::env;
use std::fmt;

/// Host used when `<APP>_HOST` is unset.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port used when `<APP>_PORT` is unset.
pub const DEFAULT_PORT: &str = "7990";

/// A resolved listening address.
///
/// The port stays a string: it comes straight from the environment and is
/// only ever joined back into a `host:port` bind target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddress {
    pub host: String,
    pub port: String,
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// True when `app` is non-empty ASCII alphanumeric/underscore with a
/// leading letter. Only such names uppercase into valid env-var prefixes.
pub fn valid_app_name(app: &str) -> bool {
    let mut chars = app.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolve the listening address for `app` from the process environment.
///
/// The convention is `UPPER(app)_HOST` and `UPPER(app)_PORT`, defaulting to
/// [`DEFAULT_HOST`] and [`DEFAULT_PORT`]. Reads the environment on every
/// call.
pub fn resolve_address(app: &str) -> ListenAddress {
    let prefix = app.to_uppercase();
    ListenAddress {
        host: env::var(format!("{prefix}_HOST")).unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        port: env::var(format!("{prefix}_PORT")).unwrap_or_else(|_| DEFAULT_PORT.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns distinct env-var names so parallel execution cannot
    // interfere.

    #[test]
    fn test_defaults() {
        let addr = resolve_address("addrdefault");
        assert_eq!(addr.host, DEFAULT_HOST);
        assert_eq!(addr.port, DEFAULT_PORT);
        assert_eq!(addr.to_string(), "127.0.0.1:7990");
    }

    #[test]
    fn test_host_override() {
        env::set_var("ADDRHOSTY_HOST", "0.0.0.0");
        let addr = resolve_address("addrhosty");
        assert_eq!(addr.host, "0.0.0.0");
        assert_eq!(addr.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_override() {
        env::set_var("ADDRPORTY_PORT", "9000");
        let addr = resolve_address("addrporty");
        assert_eq!(addr.host, DEFAULT_HOST);
        assert_eq!(addr.port, "9000");
    }

    #[test]
    fn test_no_caching() {
        env::set_var("ADDRFRESH_PORT", "9001");
        assert_eq!(resolve_address("addrfresh").port, "9001");
        env::set_var("ADDRFRESH_PORT", "9002");
        assert_eq!(resolve_address("addrfresh").port, "9002");
    }

    #[test]
    fn test_valid_app_names() {
        assert!(valid_app_name("shop"));
        assert!(valid_app_name("shop_v2"));
        assert!(valid_app_name("Shop2"));
        assert!(!valid_app_name(""));
        assert!(!valid_app_name("2shop"));
        assert!(!valid_app_name("_shop"));
        assert!(!valid_app_name("shop-api"));
        assert!(!valid_app_name("shop.api"));
    }
}
