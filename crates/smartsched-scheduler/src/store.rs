//! File-based task store — lightweight persistence.
//! The whole list is one versioned JSON document: human-readable, diffable,
//! and overwritten in full on every save.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use smartsched_core::Result;

use crate::tasks::Task;

/// Current on-disk format version.
pub const STORE_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Deserialize)]
struct Document {
    version: u32,
    tasks: Vec<Task>,
}

/// File-based task store.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Create a store backed by the given file. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save all tasks to disk, replacing whatever was there.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let doc = DocumentRef {
            version: STORE_VERSION,
            tasks,
        };
        let json = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("💾 Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Load tasks from disk. A missing, unreadable or corrupt file yields an
    /// empty list.
    pub fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("⚠️ Failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str::<Document>(&json) {
            Ok(doc) if doc.version == STORE_VERSION => {
                tracing::debug!(
                    "📂 Loaded {} tasks from {}",
                    doc.tasks.len(),
                    self.path.display()
                );
                doc.tasks
            }
            Ok(doc) => {
                tracing::warn!(
                    "⚠️ Unsupported task file version {} in {} (expected {STORE_VERSION})",
                    doc.version,
                    self.path.display()
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to parse {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }
}
