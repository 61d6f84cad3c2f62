//! Shared utilities for integration testing.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use warden::{ConnectionError, ConnectionHandle, DatastoreDescriptor, StorageEngine};

/// Write TOML content to a temp file and return its handle (the file lives
/// as long as the handle).
pub fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

/// Storage engine test double: records every connect call and can be told
/// to refuse specific applications.
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<String>>,
    fail_for: Vec<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn failing_for(apps: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_for: apps.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[allow(dead_code)]
    pub fn connect_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageEngine for MockEngine {
    async fn connect(
        &self,
        app: &str,
        _descriptor: &DatastoreDescriptor,
    ) -> Result<ConnectionHandle, ConnectionError> {
        self.calls.lock().unwrap().push(app.to_string());
        if self.fail_for.iter().any(|a| a == app) {
            return Err(ConnectionError::Engine {
                app: app.to_string(),
                source: "mock engine refusal".into(),
            });
        }
        Ok(ConnectionHandle::new(app.to_string()))
    }
}
