/*!
 * Skill list counting.
 *
 * A skills document holds three named collections of skill records. Each
 * record is identified by its `(source, skillId)` pair; the counter reports
 * per-collection sizes, their plain sum, and the number of distinct pairs
 * across the union of all three collections.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::file_utils::FileManager;

/// One skill record; fields absent in the JSON are treated as unset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct SkillRecord {
    /// Origin of the record (e.g. a marketplace name)
    #[serde(default)]
    pub source: Option<String>,

    /// Identifier of the skill within its source
    #[serde(rename = "skillId", default)]
    pub skill_id: Option<String>,
}

/// The skills document with its three named collections
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SkillsDocument {
    /// All-time ranking
    #[serde(rename = "allTime", default)]
    pub all_time: Vec<SkillRecord>,

    /// Trending ranking
    #[serde(default)]
    pub trending: Vec<SkillRecord>,

    /// Hot ranking
    #[serde(default)]
    pub hot: Vec<SkillRecord>,
}

/// Counters computed over a skills document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCounts {
    pub all_time: usize,
    pub trending: usize,
    pub hot: usize,
    /// Plain sum of the three collection sizes, not deduplicated
    pub sum: usize,
    /// Distinct (source, skillId) pairs across the union of all collections
    pub unique: usize,
}

impl SkillsDocument {
    /// Load a skills document from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse skills JSON: {:?}", path.as_ref()))
    }

    /// Compute the counters for this document
    pub fn count(&self) -> SkillCounts {
        let unique: HashSet<(&Option<String>, &Option<String>)> = self
            .all_time
            .iter()
            .chain(self.trending.iter())
            .chain(self.hot.iter())
            .map(|s| (&s.source, &s.skill_id))
            .collect();

        SkillCounts {
            all_time: self.all_time.len(),
            trending: self.trending.len(),
            hot: self.hot.len(),
            sum: self.all_time.len() + self.trending.len() + self.hot.len(),
            unique: unique.len(),
        }
    }
}

impl SkillCounts {
    /// Render the counters in the report line format
    pub fn report(&self) -> String {
        format!(
            "allTime {}\ntrending {}\nhot {}\nsum {}\nunique_across_all_arrays {}",
            self.all_time, self.trending, self.hot, self.sum, self.unique
        )
    }
}
