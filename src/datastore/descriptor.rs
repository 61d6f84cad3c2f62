//! Datastore descriptor assembly.
//!
//! # Responsibilities
//! - Resolve the fixed property set for one application into a descriptor
//! - Request connection establishment from the storage engine
//! - Keep "resolved from config" distinguishable from "defaulted empty"
//!
//! # Design Decisions
//! - Each property resolves independently; one missing key never aborts the
//!   build (partial sections are valid configurations)
//! - A section where nothing resolves fails the build: registering an app
//!   with no configuration at all is treated as a misspelled name
//! - `Option<String>` per field encodes resolved-vs-absent without a
//!   parallel bookkeeping structure

use std::fmt;

use thiserror::Error;

use crate::config::{resolve_property, ConfigTree};
use crate::datastore::engine::{ConnectionError, ConnectionHandle, StorageEngine};

/// The fixed, ordered property set consumed from each application section.
pub const DESCRIPTOR_PROPERTIES: [&str; 7] = [
    "dbserver",
    "dbport",
    "database",
    "dbuser",
    "dbpassword",
    "dbdriver",
    "dbpath",
];

/// Assembled connection parameters for one application's datastore.
///
/// `None` means the property was absent from configuration; `Some` means it
/// resolved, even to an empty string. The connection handle is set only
/// after the storage engine establishes a connection.
#[derive(Clone, Default)]
pub struct DatastoreDescriptor {
    pub server: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub driver: Option<String>,
    pub path: Option<String>,
    connection: Option<ConnectionHandle>,
}

impl DatastoreDescriptor {
    /// Property names that actually resolved from configuration, in the
    /// fixed property order.
    pub fn resolved_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, &Option<String>); 7] = [
            ("dbserver", &self.server),
            ("dbport", &self.port),
            ("database", &self.database),
            ("dbuser", &self.user),
            ("dbpassword", &self.password),
            ("dbdriver", &self.driver),
            ("dbpath", &self.path),
        ];
        fields
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| *name)
            .collect()
    }

    /// True when no property resolved at all.
    pub fn is_unconfigured(&self) -> bool {
        self.resolved_fields().is_empty()
    }

    /// The established connection, if any.
    pub fn connection(&self) -> Option<&ConnectionHandle> {
        self.connection.as_ref()
    }

    /// True once the storage engine has established a connection.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }
}

impl fmt::Debug for DatastoreDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatastoreDescriptor")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("driver", &self.driver)
            .field("path", &self.path)
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Error type for descriptor builds.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The application name cannot form a valid env-var prefix.
    #[error(
        "invalid application name '{app}': expected ASCII letters, digits or '_', starting with a letter"
    )]
    InvalidAppName { app: String },

    /// No datastore property resolved for this application.
    #[error("no datastore properties configured for '{app}'")]
    NothingConfigured { app: String },

    /// Field assembly succeeded but the engine could not connect.
    #[error("datastore build failed for '{app}'")]
    Connection {
        app: String,
        #[source]
        source: ConnectionError,
    },
}

/// Build the descriptor for `app` and establish its connection.
///
/// Resolves each property of [`DESCRIPTOR_PROPERTIES`] independently, then
/// hands the full descriptor to the storage engine. The establishment
/// outcome propagates; there is no unconditional success path.
pub async fn build_descriptor(
    tree: &ConfigTree,
    engine: &dyn StorageEngine,
    app: &str,
) -> Result<DatastoreDescriptor, BuildError> {
    let mut descriptor = DatastoreDescriptor::default();

    // A miss leaves the field unset; the fallback policy is the builder's
    // documented contract, not a swallowed error.
    let resolve = |property: &str| match resolve_property(tree, app, property) {
        Ok(value) => Some(value),
        Err(missing) => {
            tracing::debug!(app = %app, property = %missing.property, "property not configured");
            None
        }
    };

    descriptor.server = resolve("dbserver");
    descriptor.port = resolve("dbport");
    descriptor.database = resolve("database");
    descriptor.user = resolve("dbuser");
    descriptor.password = resolve("dbpassword");
    descriptor.driver = resolve("dbdriver");
    descriptor.path = resolve("dbpath");

    if descriptor.is_unconfigured() {
        return Err(BuildError::NothingConfigured {
            app: app.to_string(),
        });
    }

    let handle = engine
        .connect(app, &descriptor)
        .await
        .map_err(|source| BuildError::Connection {
            app: app.to_string(),
            source,
        })?;
    descriptor.connection = Some(handle);

    Ok(descriptor)
}
