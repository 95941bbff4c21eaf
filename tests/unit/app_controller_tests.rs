/*!
 * Tests for the controller workflows: dry run, force, windowing, resume.
 */

use anyhow::Result;
use std::fs;
use std::sync::Arc;

use skillscribe::app_controller::{Controller, TranslateOptions};
use skillscribe::providers::mock::MockTranslator;
use skillscribe::providers::Translator;
use crate::common;

#[tokio::test]
async fn test_run_translate_withDryRun_shouldPerformZeroWrites() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for i in 0..5 {
        common::create_unit(&config.base_dir, &format!("unit{}", i), "Some description.")?;
    }

    let controller = Controller::with_config(config.clone())?;
    let translator = Arc::new(MockTranslator::failing());
    let options = TranslateOptions {
        dry_run: true,
        ..TranslateOptions::default()
    };

    let summary = controller
        .run_translate_with(&options, Arc::clone(&translator) as Arc<dyn Translator>)
        .await?;

    assert_eq!(summary.total, 5);
    assert_eq!(summary.succeeded(), 0);
    assert_eq!(translator.calls(), 0);
    assert_eq!(common::count_target_files(&config.base_dir), 0);
    assert!(!config.progress_file.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_translate_withExistingTarget_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    let done = common::create_translated_unit(&config.base_dir, "done", "Old text.", "旧译文\n")?;

    let controller = Controller::with_config(config.clone())?;

    // Without force the done unit is never scheduled
    let translator = Arc::new(MockTranslator::working());
    let summary = controller
        .run_translate_with(&TranslateOptions::default(), Arc::clone(&translator) as Arc<dyn Translator>)
        .await?;
    assert_eq!(summary.total, 0);
    assert_eq!(translator.calls(), 0);
    assert_eq!(fs::read_to_string(done.join("description_cn.txt"))?, "旧译文\n");

    // With force it is re-translated and overwritten
    let options = TranslateOptions {
        force: true,
        ..TranslateOptions::default()
    };
    let summary = controller
        .run_translate_with(&options, Arc::clone(&translator) as Arc<dyn Translator>)
        .await?;
    assert_eq!(summary.translated, 1);
    assert_eq!(
        fs::read_to_string(done.join("description_cn.txt"))?,
        "[译] Old text.\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_run_translate_withSkipAndLimit_shouldWindowTheSortedPendingSet() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    for name in ["u0", "u1", "u2", "u3", "u4"] {
        common::create_unit(&config.base_dir, name, "Some description.")?;
    }

    let controller = Controller::with_config(config.clone())?;
    let translator = Arc::new(MockTranslator::working());
    let options = TranslateOptions {
        skip: 1,
        limit: 2,
        workers: 2,
        ..TranslateOptions::default()
    };

    let summary = controller
        .run_translate_with(&options, translator)
        .await?;

    assert_eq!(summary.translated, 2);
    assert!(!config.base_dir.join("u0/description_cn.txt").exists());
    assert!(config.base_dir.join("u1/description_cn.txt").exists());
    assert!(config.base_dir.join("u2/description_cn.txt").exists());
    assert!(!config.base_dir.join("u3/description_cn.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_run_translate_twice_shouldResumeFromProgressFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    common::create_unit(&config.base_dir, "alpha", "First description.")?;
    common::create_unit(&config.base_dir, "beta", "Second description.")?;

    let controller = Controller::with_config(config.clone())?;
    let translator = Arc::new(MockTranslator::working());

    let first = controller
        .run_translate_with(&TranslateOptions::default(), Arc::clone(&translator) as Arc<dyn Translator>)
        .await?;
    assert_eq!(first.translated, 2);
    assert!(config.progress_file.exists());

    // Remove a target file; its id remains in the progress set, so the
    // second run still finds nothing pending
    fs::remove_file(config.base_dir.join("alpha/description_cn.txt"))?;

    let second = controller
        .run_translate_with(&TranslateOptions::default(), Arc::clone(&translator) as Arc<dyn Translator>)
        .await?;
    assert_eq!(second.total, 0);
    assert_eq!(translator.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_translate_withEmptyTree_shouldFinishCleanly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir);
    fs::create_dir_all(&config.base_dir)?;

    let controller = Controller::with_config(config)?;
    let summary = controller
        .run_translate_with(
            &TranslateOptions::default(),
            Arc::new(MockTranslator::working()),
        )
        .await?;

    assert_eq!(summary.total, 0);
    Ok(())
}

#[test]
fn test_run_count_shouldReturnTheComputedCounters() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = r#"{
        "allTime": [{"source": "A", "skillId": "1"}, {"source": "A", "skillId": "2"}],
        "trending": [{"source": "A", "skillId": "1"}],
        "hot": []
    }"#;
    let path = common::create_test_file(temp_dir.path(), "skills.json", json)?;

    let controller = Controller::with_config(common::test_config(&temp_dir))?;
    let counts = controller.run_count(&path)?;

    assert_eq!(counts.sum, 3);
    assert_eq!(counts.unique, 2);
    Ok(())
}
