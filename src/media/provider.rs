//! Payload loaders for resources registered by path.
//!
//! The assembler never touches the filesystem directly. A path-keyed
//! resource is read through a [`ResourceProvider`] once, when it is
//! registered, so a missing file fails before any part is emitted.
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::common::{Error, Result};

/// Shared, immutable payload bytes.
pub type SharedPayload = Arc<[u8]>;

/// Loads resource payloads by path.
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load the bytes behind `path`.
    ///
    /// # Errors
    ///
    /// `UnreadableResource` when the path cannot be resolved or read.
    fn load(&self, path: &str) -> Result<SharedPayload>;

    /// Check if a resource exists.
    fn exists(&self, path: &str) -> bool;

    /// Base path for resolving relative resources, if any.
    fn base_path(&self) -> Option<&Path> {
        None
    }

    /// Human-readable provider name for logs.
    fn name(&self) -> &'static str;
}

fn unreadable(path: &str, reason: impl Into<String>) -> Error {
    Error::UnreadableResource {
        key: path.to_string(),
        reason: reason.into(),
    }
}

/// Loads resources from a directory on disk.
///
/// Absolute paths and paths escaping the base directory are rejected.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail when the directory does not exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(relative);
        if let Ok(canonical) = full_path.canonicalize()
            && let Some(base) = &self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }
        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedPayload> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| unreadable(path, "path escapes the resource directory"))?;

        std::fs::read(&full_path)
            .map(SharedPayload::from)
            .map_err(|e| unreadable(path, e.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn base_path(&self) -> Option<&Path> {
        Some(&self.base_path)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}

/// Serves pre-populated payloads from memory.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedPayload>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `path`, replacing any previous payload.
    pub fn add(&self, path: impl Into<String>, data: impl Into<SharedPayload>) -> Result<()> {
        let path = path.into();
        let mut resources = self
            .resources
            .write()
            .map_err(|_| Error::InvalidState("resource store lock poisoned".to_string()))?;
        resources.insert(path, data.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedPayload> {
        let resources = self
            .resources
            .read()
            .map_err(|_| unreadable(path, "resource store lock poisoned"))?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| unreadable(path, "not found"))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
