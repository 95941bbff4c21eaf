/*!
 * Batch translation processing.
 *
 * This module contains functionality for processing translation units in
 * bulk, with support for bounded concurrency, progress tracking, resumable
 * completion records, and per-unit error handling.
 */

use anyhow::Result;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::TranslationCommonConfig;
use crate::discovery::TranslationUnit;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::progress::ProgressStore;
use crate::providers::Translator;

/// Outcome of processing one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Backend produced a translation and the target sibling was written
    Translated,
    /// Source was already predominantly target-script and was copied verbatim
    CopiedVerbatim,
    /// Source text was empty; nothing was written
    SkippedEmpty,
    /// Read, translate, or write failed; the description of the error
    Failed(String),
}

/// Per-unit result message consumed by the aggregator
#[derive(Debug)]
pub struct UnitReport {
    /// The processed unit
    pub unit: TranslationUnit,
    /// What happened to it
    pub outcome: UnitOutcome,
    /// Short preview of the produced text, for logging
    pub preview: String,
}

/// Aggregate counters for a finished batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub translated: usize,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Units that completed successfully (written or copied)
    pub fn succeeded(&self) -> usize {
        self.translated + self.copied
    }
}

/// Batch runner for processing translation units
pub struct BatchRunner {
    /// The translation backend to use
    translator: Arc<dyn Translator>,

    /// Common translation settings (heuristic threshold, progress cadence)
    common: TranslationCommonConfig,

    /// Number of units processed concurrently
    workers: usize,

    /// Fixed pause between units, for rate-limited backends
    inter_unit_delay: Option<Duration>,
}

impl BatchRunner {
    /// Create a new batch runner
    pub fn new(
        translator: Arc<dyn Translator>,
        common: TranslationCommonConfig,
        workers: usize,
        inter_unit_delay_ms: Option<u64>,
    ) -> Self {
        Self {
            translator,
            common,
            workers: workers.max(1),
            inter_unit_delay: inter_unit_delay_ms.map(Duration::from_millis),
        }
    }

    /// Process all pending units and return the aggregate counters.
    ///
    /// Units run independently under bounded concurrency; completion order
    /// is unspecified. All counter updates and progress-store writes happen
    /// in this task as it consumes the result stream, so workers share no
    /// mutable state.
    pub async fn run(
        &self,
        units: Vec<TranslationUnit>,
        progress_store: Option<&ProgressStore>,
    ) -> Result<BatchSummary> {
        let total = units.len();
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };

        if total == 0 {
            return Ok(summary);
        }

        let start_time = Instant::now();
        let progress_bar = Self::create_progress_bar(total as u64);
        progress_bar.set_message("Translating");

        let mut reports = stream::iter(units)
            .map(|unit| {
                let translator = Arc::clone(&self.translator);
                let threshold = self.common.target_script_ratio;
                let inter_unit_delay = self.inter_unit_delay;

                async move {
                    let report = process_unit(unit, translator, threshold).await;

                    // Spacing between units for rate-limited backends;
                    // only meaningful with a single worker
                    if let Some(delay) = inter_unit_delay {
                        tokio::time::sleep(delay).await;
                    }

                    report
                }
            })
            .buffer_unordered(self.workers);

        let mut completed = 0usize;
        while let Some(report) = reports.next().await {
            completed += 1;
            progress_bar.set_position(completed as u64);

            match &report.outcome {
                UnitOutcome::Translated | UnitOutcome::CopiedVerbatim => {
                    if matches!(report.outcome, UnitOutcome::Translated) {
                        summary.translated += 1;
                    } else {
                        summary.copied += 1;
                    }

                    info!(
                        "[{}/{}] ✓ {}: {}",
                        completed,
                        total,
                        report.unit.label(),
                        report.preview
                    );

                    if let Some(store) = progress_store {
                        if let Err(e) = store.record(&report.unit.id) {
                            warn!("Failed to persist progress: {}", e);
                        }
                    }
                }
                UnitOutcome::SkippedEmpty => {
                    summary.skipped += 1;
                    warn!(
                        "[{}/{}] - {}: empty source file, skipped",
                        completed,
                        total,
                        report.unit.label()
                    );
                }
                UnitOutcome::Failed(message) => {
                    summary.failed += 1;
                    error!(
                        "[{}/{}] ✗ {}: {}",
                        completed,
                        total,
                        report.unit.label(),
                        message
                    );
                }
            }

            let interval = self.common.progress_interval;
            if interval > 0 && completed % interval == 0 && completed < total {
                let elapsed = start_time.elapsed().as_secs_f64();
                let rate = completed as f64 / elapsed.max(f64::EPSILON);
                let remaining = (total - completed) as f64 / rate.max(f64::EPSILON);
                info!(
                    "Progress: {}/{} ({:.1}%), rate: {:.1}/s, est. remaining: {:.1} min",
                    completed,
                    total,
                    completed as f64 / total as f64 * 100.0,
                    rate,
                    remaining / 60.0
                );
            }
        }

        progress_bar.finish_and_clear();

        let elapsed = start_time.elapsed();
        info!(
            "Batch finished via {}: {} translated, {} copied, {} skipped, {} failed in {}",
            self.translator.name(),
            summary.translated,
            summary.copied,
            summary.skipped,
            summary.failed,
            format_duration(elapsed)
        );

        Ok(summary)
    }

    fn create_progress_bar(total: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(total);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }
}

/// Process one unit: read, check, translate or copy, write.
///
/// Every failure is captured into the report; nothing here aborts the
/// surrounding batch.
async fn process_unit(
    unit: TranslationUnit,
    translator: Arc<dyn Translator>,
    threshold: f32,
) -> UnitReport {
    match translate_unit(&unit, translator, threshold).await {
        Ok((outcome, preview)) => UnitReport {
            unit,
            outcome,
            preview,
        },
        Err(e) => UnitReport {
            unit,
            outcome: UnitOutcome::Failed(e.to_string()),
            preview: String::new(),
        },
    }
}

async fn translate_unit(
    unit: &TranslationUnit,
    translator: Arc<dyn Translator>,
    threshold: f32,
) -> Result<(UnitOutcome, String)> {
    let source_text = FileManager::read_to_string(&unit.source_path)?;
    let source_text = source_text.trim();

    if source_text.is_empty() {
        return Ok((UnitOutcome::SkippedEmpty, String::new()));
    }

    // Already predominantly target-script: copy verbatim, never spend an
    // API call re-translating it
    let (outcome, target_text) = if language_utils::is_mostly_target_script(source_text, threshold)
    {
        (UnitOutcome::CopiedVerbatim, source_text.to_string())
    } else {
        let translated = translator.translate(source_text).await?;
        (UnitOutcome::Translated, translated)
    };

    FileManager::write_to_file(&unit.target_path, &format!("{}\n", target_text))?;

    Ok((outcome, preview_of(&target_text)))
}

/// First characters of the produced text, for the per-unit log line
fn preview_of(text: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    preview.replace('\n', " ")
}

// Format duration in a human-readable format
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
