/*!
 * Translation unit discovery.
 *
 * A unit is one directory holding a source-language text file and its
 * (possibly absent) target-language sibling. Discovery walks the base
 * directory, partitions units into pending and done, and applies the
 * skip/limit window over a stable, lexicographically path-sorted order.
 */

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;

/// One source file plus its derived target sibling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Path of the source-language file
    pub source_path: PathBuf,
    /// Path of the target-language sibling (may not exist yet)
    pub target_path: PathBuf,
    /// Stable identifier: source path relative to the scan root
    pub id: String,
}

impl TranslationUnit {
    /// Build a unit from a discovered source file
    pub fn from_source(source_path: PathBuf, base_dir: &Path, target_file_name: &str) -> Self {
        let target_path = source_path
            .parent()
            .map(|dir| dir.join(target_file_name))
            .unwrap_or_else(|| PathBuf::from(target_file_name));

        let id = source_path
            .strip_prefix(base_dir)
            .unwrap_or(&source_path)
            .to_string_lossy()
            .to_string();

        Self {
            source_path,
            target_path,
            id,
        }
    }

    /// Short human-readable label (the unit's directory name)
    pub fn label(&self) -> String {
        self.source_path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Result of a discovery pass over the base directory
#[derive(Debug, Default)]
pub struct DiscoveryResult {
    /// Units lacking a target sibling (all units in force mode)
    pub pending: Vec<TranslationUnit>,
    /// Units already translated
    pub done: Vec<TranslationUnit>,
}

/// Discovers translation units under the configured base directory
pub struct UnitDiscovery<'a> {
    config: &'a Config,
}

impl<'a> UnitDiscovery<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Enumerate all units and partition them into pending and done.
    ///
    /// A unit counts as done when its target sibling exists or its id is in
    /// the completed set. Force mode treats every unit as pending. An empty
    /// tree is a normal terminal case, not an error.
    pub fn discover(&self, completed: &HashSet<String>, force: bool) -> Result<DiscoveryResult> {
        let base_dir = &self.config.base_dir;
        if !FileManager::dir_exists(base_dir) {
            return Ok(DiscoveryResult::default());
        }

        let sources = FileManager::find_named_files(base_dir, &self.config.source_file_name)?;

        let mut result = DiscoveryResult::default();
        for source_path in sources {
            let unit = TranslationUnit::from_source(
                source_path,
                base_dir,
                &self.config.target_file_name,
            );

            let is_done =
                !force && (unit.target_path.exists() || completed.contains(&unit.id));
            if is_done {
                result.done.push(unit);
            } else {
                result.pending.push(unit);
            }
        }

        Ok(result)
    }
}

/// Apply the skip/limit window over an already sorted pending set.
/// A limit of 0 means unlimited.
pub fn apply_window(
    units: Vec<TranslationUnit>,
    skip: usize,
    limit: usize,
) -> Vec<TranslationUnit> {
    let windowed = units.into_iter().skip(skip);
    if limit > 0 {
        windowed.take(limit).collect()
    } else {
        windowed.collect()
    }
}
