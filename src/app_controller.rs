use anyhow::{Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::comparison::{compare, ComparisonTable, Era, EraStructure};
use crate::providers::mlb_stats::MlbStatsApi;
use crate::providers::StatsSource;
use crate::report;
use crate::structure::analyze_with;

// @module: Application controller for era comparison runs

/// Outcome of one comparison run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Labels of eras that produced a structure
    pub analyzed: Vec<String>,
    /// Labels of eras with no scheduled games
    pub skipped: Vec<String>,
    /// Distinct paths across all analyzed eras
    pub distinct_paths: usize,
    /// Paths that differ across eras
    pub differences: ComparisonTable,
}

/// Main application controller
pub struct Controller<S: StatsSource> {
    // @field: App configuration
    config: Config,
    // @field: Where schedules and game documents come from
    source: S,
    // @field: Draw a progress bar while fetching
    show_progress: bool,
}

impl Controller<MlbStatsApi> {
    // @method: Create a controller backed by the live stats API
    pub fn with_config(config: Config) -> Result<Self> {
        let source = MlbStatsApi::new(config.api.clone())
            .context("Failed to create stats API client")?;
        Ok(Self::with_source(config, source))
    }
}

impl<S: StatsSource> Controller<S> {
    // @method: Create a controller over any stats source
    pub fn with_source(config: Config, source: S) -> Self {
        Self {
            config,
            source,
            show_progress: true,
        }
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch one game for an era and infer its structure.
    ///
    /// Returns `Ok(None)` when the season has no games.
    pub async fn analyze_era(&self, era: &Era) -> Result<Option<EraStructure>> {
        info!("Analyzing {} era (year: {})", era.label, era.year);

        let game_id = self
            .source
            .fetch_schedule(era.year)
            .await
            .with_context(|| format!("Failed to fetch schedule for {}", era))?;

        let Some(game_id) = game_id else {
            warn!("No games found for {}", era.year);
            return Ok(None);
        };
        info!("Using game_pk: {}", game_id);

        let document = self
            .source
            .fetch_game_data(game_id)
            .await
            .with_context(|| format!("Failed to fetch game {} for {}", game_id, era))?;

        let structure = analyze_with(&document, self.config.list_policy);
        debug!("{}: {} field paths", era.label, structure.len());

        Ok(Some(EraStructure {
            era: era.clone(),
            structure,
        }))
    }

    /// Analyze every configured era, in configured order.
    ///
    /// Eras without games are left out of the result.
    pub async fn collect_structures(&self) -> Result<Vec<EraStructure>> {
        let eras = &self.config.eras;
        let progress_bar = self.progress_bar(eras.len() as u64);

        let mut structures = Vec::with_capacity(eras.len());
        if self.config.concurrent {
            let progress_bar = &progress_bar;
            let results = join_all(eras.iter().map(|era| async move {
                let result = self.analyze_era(era).await;
                progress_bar.inc(1);
                result
            }))
            .await;
            progress_bar.finish_and_clear();

            for result in results {
                structures.extend(result?);
            }
        } else {
            for era in eras {
                progress_bar.set_message(era.label.clone());
                let result = self.analyze_era(era).await;
                progress_bar.inc(1);
                if result.is_err() {
                    progress_bar.abandon();
                }
                structures.extend(result?);
            }
            progress_bar.finish_and_clear();
        }

        Ok(structures)
    }

    /// Analyze, compare and write the CSV report
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        let structures = self.collect_structures().await?;
        let summary = summarize(&self.config.eras, &structures);

        report::write_csv(&summary.differences, &self.config.output_path)?;

        info!(
            "Analyzed {} era(s), skipped {}; {} distinct paths, {} differ ({:.1}s)",
            summary.analyzed.len(),
            summary.skipped.len(),
            summary.distinct_paths,
            summary.differences.len(),
            start_time.elapsed().as_secs_f64()
        );
        info!("Results saved to {}", self.config.output_path);

        Ok(summary)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} eras {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }
}

/// Compare collected structures and account for skipped eras
pub fn summarize(eras: &[Era], structures: &[EraStructure]) -> RunSummary {
    let analyzed: Vec<String> = structures.iter().map(|s| s.era.label.clone()).collect();
    let skipped = eras
        .iter()
        .filter(|era| !analyzed.contains(&era.label))
        .map(|era| era.label.clone())
        .collect();

    RunSummary {
        analyzed,
        skipped,
        distinct_paths: ComparisonTable::align(structures).len(),
        differences: compare(structures),
    }
}
