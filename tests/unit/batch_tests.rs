/*!
 * Tests for the batch runner: per-unit outcomes, error isolation, and the
 * verbatim-copy heuristic.
 */

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use skillscribe::app_config::TranslationCommonConfig;
use skillscribe::batch::BatchRunner;
use skillscribe::discovery::UnitDiscovery;
use skillscribe::progress::ProgressStore;
use skillscribe::providers::mock::MockTranslator;
use crate::common;

fn runner(translator: Arc<MockTranslator>, workers: usize) -> BatchRunner {
    BatchRunner::new(translator, TranslationCommonConfig::default(), workers, None)
}

#[tokio::test]
async fn test_run_withWorkingBackend_shouldWriteTargetsWithTrailingNewline() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    let alpha = common::create_unit(&config.base_dir, "alpha", "First description.")?;
    common::create_unit(&config.base_dir, "beta", "Second description.")?;

    let pending = UnitDiscovery::new(&config)
        .discover(&HashSet::new(), false)?
        .pending;
    let translator = Arc::new(MockTranslator::working());

    let summary = runner(Arc::clone(&translator), 2).run(pending, None).await?;

    assert_eq!(summary.translated, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(translator.calls(), 2);

    let target = fs::read_to_string(alpha.join("description_cn.txt"))?;
    assert_eq!(target, "[译] First description.\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withMostlyTargetScriptSource_shouldCopyWithoutCallingBackend() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    let unit_dir = common::create_unit(&config.base_dir, "zhong", "这是一个批量翻译工具的描述。")?;

    let pending = UnitDiscovery::new(&config)
        .discover(&HashSet::new(), false)?
        .pending;

    // A failing backend proves the copy path never invokes it
    let translator = Arc::new(MockTranslator::failing());
    let summary = runner(Arc::clone(&translator), 1).run(pending, None).await?;

    assert_eq!(summary.copied, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(translator.calls(), 0);

    let target = fs::read_to_string(unit_dir.join("description_cn.txt"))?;
    assert_eq!(target, "这是一个批量翻译工具的描述。\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withEmptySource_shouldSkipAndNeverCreateTarget() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    let unit_dir = common::create_unit(&config.base_dir, "empty", "   \n")?;

    let pending = UnitDiscovery::new(&config)
        .discover(&HashSet::new(), false)?
        .pending;
    let translator = Arc::new(MockTranslator::working());

    let summary = runner(Arc::clone(&translator), 1).run(pending, None).await?;

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.translated, 0);
    assert_eq!(translator.calls(), 0);
    assert!(!unit_dir.join("description_cn.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_withFailingBackend_shouldTallyFailuresWithoutAborting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for name in ["a", "b", "c"] {
        common::create_unit(&config.base_dir, name, "Some description.")?;
    }

    let pending = UnitDiscovery::new(&config)
        .discover(&HashSet::new(), false)?
        .pending;
    let translator = Arc::new(MockTranslator::failing());

    let summary = runner(translator, 2).run(pending, None).await?;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.succeeded(), 0);
    assert_eq!(common::count_target_files(&config.base_dir), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withIntermittentBackend_shouldReportEveryUnitExactlyOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for i in 0..6 {
        common::create_unit(&config.base_dir, &format!("unit{}", i), "Some description.")?;
    }

    let pending = UnitDiscovery::new(&config)
        .discover(&HashSet::new(), false)?
        .pending;

    // Fails every 3rd call: 2 failures out of 6 units with a single worker
    let translator = Arc::new(MockTranslator::intermittent(3));
    let summary = runner(translator, 1).run(pending, None).await?;

    assert_eq!(summary.total, 6);
    assert_eq!(summary.translated + summary.failed, 6);
    assert_eq!(summary.failed, 2);
    Ok(())
}

#[tokio::test]
async fn test_run_withProgressStore_shouldRecordSuccessfulUnits() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    common::create_unit(&config.base_dir, "alpha", "First description.")?;
    common::create_unit(&config.base_dir, "beta", "")?;

    let pending = UnitDiscovery::new(&config)
        .discover(&HashSet::new(), false)?
        .pending;
    let store = ProgressStore::load(&config.progress_file)?;
    let translator = Arc::new(MockTranslator::working());

    runner(translator, 1).run(pending, Some(&store)).await?;

    // Only the translated unit lands in the progress set; the empty one
    // stays pending for the next run
    assert_eq!(store.len(), 1);
    assert!(store.contains("alpha/description_en.txt"));
    Ok(())
}

#[tokio::test]
async fn test_run_withNoUnits_shouldBeANormalTerminalCase() -> Result<()> {
    let translator = Arc::new(MockTranslator::working());
    let summary = runner(Arc::clone(&translator), 4).run(Vec::new(), None).await?;

    assert_eq!(summary.total, 0);
    assert_eq!(translator.calls(), 0);
    Ok(())
}
