/*!
 * Tests for translation unit discovery and skip/limit windowing
 */

use anyhow::Result;
use std::collections::HashSet;
use std::fs;

use skillscribe::discovery::{apply_window, UnitDiscovery};
use crate::common;

#[test]
fn test_discover_withMixedTree_shouldPartitionPendingAndDone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    common::create_unit(&config.base_dir, "alpha", "First description.")?;
    common::create_translated_unit(&config.base_dir, "beta", "Second.", "第二。")?;

    let result = UnitDiscovery::new(&config).discover(&HashSet::new(), false)?;

    assert_eq!(result.pending.len(), 1);
    assert_eq!(result.done.len(), 1);
    assert!(result.pending[0].source_path.ends_with("alpha/description_en.txt"));
    Ok(())
}

#[test]
fn test_discover_withForce_shouldTreatEveryUnitAsPending() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    common::create_unit(&config.base_dir, "alpha", "First description.")?;
    common::create_translated_unit(&config.base_dir, "beta", "Second.", "第二。")?;

    let result = UnitDiscovery::new(&config).discover(&HashSet::new(), true)?;

    assert_eq!(result.pending.len(), 2);
    assert!(result.done.is_empty());
    Ok(())
}

#[test]
fn test_discover_withCompletedSet_shouldExcludeRecordedUnits() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    common::create_unit(&config.base_dir, "alpha", "First description.")?;
    common::create_unit(&config.base_dir, "beta", "Second description.")?;

    let discovery = UnitDiscovery::new(&config);
    let first = discovery.discover(&HashSet::new(), false)?;
    assert_eq!(first.pending.len(), 2);

    let completed: HashSet<String> = [first.pending[0].id.clone()].into_iter().collect();
    let second = discovery.discover(&completed, false)?;

    assert_eq!(second.pending.len(), 1);
    assert_eq!(second.done.len(), 1);
    assert_eq!(second.pending[0].id, first.pending[1].id);
    Ok(())
}

#[test]
fn test_discover_runTwice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for name in ["gamma", "alpha", "beta"] {
        common::create_unit(&config.base_dir, name, "Some description.")?;
    }

    let discovery = UnitDiscovery::new(&config);
    let first = discovery.discover(&HashSet::new(), false)?;
    let second = discovery.discover(&HashSet::new(), false)?;

    let first_ids: Vec<&str> = first.pending.iter().map(|u| u.id.as_str()).collect();
    let second_ids: Vec<&str> = second.pending.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
    Ok(())
}

#[test]
fn test_discover_shouldSortPendingLexicographically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for name in ["zeta", "alpha", "mid"] {
        common::create_unit(&config.base_dir, name, "Some description.")?;
    }

    let result = UnitDiscovery::new(&config).discover(&HashSet::new(), false)?;
    let ids: Vec<&str> = result.pending.iter().map(|u| u.id.as_str()).collect();

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    Ok(())
}

#[test]
fn test_discover_withMissingBaseDir_shouldReturnEmptyResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    // base_dir intentionally never created

    let result = UnitDiscovery::new(&config).discover(&HashSet::new(), false)?;

    assert!(result.pending.is_empty());
    assert!(result.done.is_empty());
    Ok(())
}

#[test]
fn test_discover_withEmptyTree_shouldReturnEmptyResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    fs::create_dir_all(&config.base_dir)?;

    let result = UnitDiscovery::new(&config).discover(&HashSet::new(), false)?;

    assert!(result.pending.is_empty());
    Ok(())
}

#[test]
fn test_apply_window_shouldComposeSkipAndLimit() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for name in ["u0", "u1", "u2", "u3", "u4"] {
        common::create_unit(&config.base_dir, name, "Some description.")?;
    }

    let discovery = UnitDiscovery::new(&config);
    let pending = discovery.discover(&HashSet::new(), false)?.pending;
    let all_ids: Vec<String> = pending.iter().map(|u| u.id.clone()).collect();

    // limit > 0: sorted(pending)[skip..skip+limit]
    let windowed = apply_window(pending.clone(), 1, 2);
    let ids: Vec<&str> = windowed.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec![all_ids[1].as_str(), all_ids[2].as_str()]);

    // limit == 0: sorted(pending)[skip..]
    let unlimited = apply_window(pending.clone(), 3, 0);
    assert_eq!(unlimited.len(), 2);
    assert_eq!(unlimited[0].id, all_ids[3]);

    // skip beyond the end is empty, not an error
    let exhausted = apply_window(pending, 10, 0);
    assert!(exhausted.is_empty());
    Ok(())
}
