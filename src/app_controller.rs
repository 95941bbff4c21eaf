use anyhow::Result;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::batch::{BatchRunner, BatchSummary};
use crate::concurrency::ProviderProfile;
use crate::discovery::{self, UnitDiscovery};
use crate::progress::ProgressStore;
use crate::providers::{self, Translator};
use crate::skills::{SkillCounts, SkillsDocument};

// @module: Application controller for the translate and count workflows

/// Options for one translation run
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateOptions {
    /// Cap on the number of units to process (0 = unlimited)
    pub limit: usize,
    /// Number of leading units to drop from the sorted pending set
    pub skip: usize,
    /// Requested worker count
    pub workers: usize,
    /// Report what would be translated without writing anything
    pub dry_run: bool,
    /// Re-translate units whose target sibling already exists
    pub force: bool,
}

/// How many units the dry-run listing prints before truncating
const DRY_RUN_LISTING_CAP: usize = 20;

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the batch translation workflow with the configured provider
    pub async fn run_translate(&self, options: &TranslateOptions) -> Result<BatchSummary> {
        let translator = providers::create_translator(&self.config.translation);
        self.run_translate_with(options, translator).await
    }

    /// Run the batch translation workflow with an explicit backend.
    ///
    /// Split out from `run_translate` so tests can inject a mock backend.
    pub async fn run_translate_with(
        &self,
        options: &TranslateOptions,
        translator: Arc<dyn Translator>,
    ) -> Result<BatchSummary> {
        info!("Scanning {:?} for pending units…", self.config.base_dir);

        let progress_store = ProgressStore::load(&self.config.progress_file)?;
        if !progress_store.is_empty() && !options.force {
            info!(
                "Resuming: {} unit(s) recorded in {:?}",
                progress_store.len(),
                self.config.progress_file
            );
        }

        let result = UnitDiscovery::new(&self.config)
            .discover(&progress_store.completed(), options.force)?;
        info!(
            "Found {} pending unit(s), {} already translated",
            result.pending.len(),
            result.done.len()
        );

        let units = discovery::apply_window(result.pending, options.skip, options.limit);
        if units.is_empty() {
            info!("Nothing to translate");
            return Ok(BatchSummary::default());
        }

        if options.dry_run {
            info!("[DRY RUN] The following {} unit(s) would be translated:", units.len());
            for unit in units.iter().take(DRY_RUN_LISTING_CAP) {
                info!("  - {}", unit.id);
            }
            if units.len() > DRY_RUN_LISTING_CAP {
                info!("  … and {} more", units.len() - DRY_RUN_LISTING_CAP);
            }
            // Reporting only: no backend calls, no writes
            return Ok(BatchSummary {
                total: units.len(),
                ..BatchSummary::default()
            });
        }

        let provider = self.config.translation.provider;
        let common = &self.config.translation.common;
        let profile = ProviderProfile::for_provider(provider, common.rate_limit_delay_ms);
        let workers = profile.effective_workers(options.workers);
        if workers != options.workers && options.workers > 0 {
            warn!(
                "Worker count adjusted from {} to {} for the {} provider",
                options.workers,
                workers,
                provider.display_name()
            );
        }

        info!(
            "Translating {} unit(s) with {} ({} worker(s))",
            units.len(),
            provider.display_name(),
            workers
        );

        let runner = BatchRunner::new(
            translator,
            common.clone(),
            workers,
            profile.inter_unit_delay_ms,
        );
        runner.run(units, Some(&progress_store)).await
    }

    /// Run the skill counter workflow and print the report to stdout
    pub fn run_count<P: AsRef<Path>>(&self, input: P) -> Result<SkillCounts> {
        let document = SkillsDocument::load(input)?;
        let counts = document.count();
        println!("{}", counts.report());
        Ok(counts)
    }
}
