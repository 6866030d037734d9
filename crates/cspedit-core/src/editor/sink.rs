//! Destinations for the printed policy.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CoreError, Result};

/// Receives the serialized policy when a session ends with `P`.
pub trait PolicySink {
    fn persist(&mut self, policy: &str) -> Result<()>;
}

impl<T: PolicySink + ?Sized> PolicySink for &mut T {
    fn persist(&mut self, policy: &str) -> Result<()> {
        (**self).persist(policy)
    }
}

/// Writes the policy to a file, replacing previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PolicySink for FileSink {
    fn persist(&mut self, policy: &str) -> Result<()> {
        std::fs::write(&self.path, policy).map_err(|source| CoreError::Persist {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), bytes = policy.len(), "policy written");
        Ok(())
    }
}

/// Keeps persisted policies in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub persisted: Vec<String>,
}

impl PolicySink for MemorySink {
    fn persist(&mut self, policy: &str) -> Result<()> {
        self.persisted.push(policy.to_string());
        Ok(())
    }
}

/// Discards the policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PolicySink for NullSink {
    fn persist(&mut self, _policy: &str) -> Result<()> {
        Ok(())
    }
}
