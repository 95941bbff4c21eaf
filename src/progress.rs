/*!
 * Persisted translation progress.
 *
 * The progress file is a flat JSON array of completed unit ids, loaded at
 * startup and rewritten as units complete so an interrupted run can resume
 * without re-translating. Target-sibling existence remains the primary
 * "done" signal; the progress set covers units whose target was removed or
 * lives on another machine.
 */

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Set of completed unit ids with JSON persistence
pub struct ProgressStore {
    path: PathBuf,
    completed: Mutex<HashSet<String>>,
}

impl ProgressStore {
    /// Load the store from its file, starting empty when the file is absent
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let completed = if FileManager::file_exists(&path) {
            let content = FileManager::read_to_string(&path)?;
            let ids: Vec<String> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse progress file: {:?}", path))?;
            ids.into_iter().collect()
        } else {
            HashSet::new()
        };

        Ok(Self {
            path,
            completed: Mutex::new(completed),
        })
    }

    /// Snapshot of the completed set
    pub fn completed(&self) -> HashSet<String> {
        self.completed.lock().clone()
    }

    /// Number of completed units
    pub fn len(&self) -> usize {
        self.completed.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.lock().is_empty()
    }

    /// Whether a unit id has already been completed
    pub fn contains(&self, id: &str) -> bool {
        self.completed.lock().contains(id)
    }

    /// Record a completed unit and rewrite the progress file
    pub fn record(&self, id: &str) -> Result<()> {
        {
            let mut completed = self.completed.lock();
            if !completed.insert(id.to_string()) {
                return Ok(());
            }
        }
        self.save()
    }

    /// Rewrite the progress file from the in-memory set
    pub fn save(&self) -> Result<()> {
        let mut ids: Vec<String> = self.completed.lock().iter().cloned().collect();
        // Sorted output keeps the file diff-friendly across runs
        ids.sort();

        let content = serde_json::to_string(&ids)
            .context("Failed to serialize progress set to JSON")?;
        FileManager::write_to_file(&self.path, &content)
    }
}
