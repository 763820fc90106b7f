//! Batch pipeline orchestration.
//!
//! A run goes through three phases, never re-entered:
//! - **Discovering**: build the name catalog and resolve the render list.
//!   Errors here are fatal.
//! - **Rendering**: render and write every resolved name in order. Errors on
//!   a single name are recorded and skipped.
//! - **Reporting**: the summary is handed back to the caller.

use crate::batch::progress::{ProgressEvent, ProgressReporter};
use crate::batch::result::{BatchSummary, ItemResult, RenderOutcome};
use crate::batch::BatchContext;
use crate::catalog::{CatalogError, NameCatalog};
use crate::output::{icon_path, prepare_output_dir, save_png, OutputError};
use crate::renderer::{RenderError, Renderer};
use crate::resolve::ResolvedNames;
use std::time::Instant;
use thiserror::Error;

/// Fatal error that aborts a batch before rendering starts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BatchError {
    /// Renderer could not be constructed
    #[error("Renderer error: {0}")]
    Renderer(#[from] RenderError),
    /// Catalog discovery failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Output directory could not be prepared
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Error while processing a single name. Never escapes the render loop.
#[derive(Debug, Error)]
enum ItemError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Phase of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    /// Catalog and filter construction
    Discovering,
    /// Render loop
    Rendering,
    /// Summary
    Reporting,
}

/// Batch pipeline for rendering every known name.
#[derive(Debug, Clone)]
pub struct BatchPipeline {
    /// Batch context
    context: BatchContext,
}

impl BatchPipeline {
    /// Create a new batch pipeline.
    pub fn new(context: BatchContext) -> Self {
        Self { context }
    }

    /// Get the batch context.
    pub fn context(&self) -> &BatchContext {
        &self.context
    }

    /// Run all phases: discover, prepare the output directory, render.
    pub fn run<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        reporter: &dyn ProgressReporter,
    ) -> Result<BatchSummary, BatchError> {
        let resolved = self.discover(renderer)?;
        self.render(renderer, &resolved, reporter)
    }

    /// Discovering phase: build the catalog and resolve the render list.
    pub fn discover<R: Renderer + ?Sized>(&self, renderer: &R) -> Result<ResolvedNames, BatchError> {
        log::debug!("Phase: {:?}", BatchPhase::Discovering);

        let catalog = NameCatalog::build(renderer, self.context.data_dir())?;
        let resolved = ResolvedNames::from_catalog(&catalog, self.context.skips_trim_variants());

        if resolved.filtered_count() > 0 {
            log::info!(
                "Filtered out {} armor trim variants (rendered dynamically)",
                resolved.filtered_count()
            );
        }
        log::info!("Total unique names to render: {}", resolved.len());

        Ok(resolved)
    }

    /// Prepare the output directory, then run the render loop.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        resolved: &ResolvedNames,
        reporter: &dyn ProgressReporter,
    ) -> Result<BatchSummary, BatchError> {
        let removed = prepare_output_dir(self.context.output_dir(), self.context.is_clean())?;
        if removed > 0 {
            log::info!(
                "Cleaned {} previous renders from {}",
                removed,
                self.context.output_dir().display()
            );
        }

        let summary = self.render_names(renderer, resolved.names(), reporter);

        log::debug!("Phase: {:?}", BatchPhase::Reporting);
        Ok(summary)
    }

    /// Rendering phase: process `names` strictly in order.
    ///
    /// Every name is recorded in the returned summary whether it rendered or
    /// not; a failure never stops the loop. Failures are logged at `warn` when
    /// the reporter does not show them.
    pub fn render_names<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        names: &[String],
        reporter: &dyn ProgressReporter,
    ) -> BatchSummary {
        log::debug!("Phase: {:?}", BatchPhase::Rendering);

        let start = Instant::now();
        let total = names.len();
        let mut summary = BatchSummary::new();

        reporter.report(ProgressEvent::BatchStarted { total });

        for (index, name) in names.iter().enumerate() {
            let result = self.render_one(renderer, name);
            summary.record(&result);
            if let RenderOutcome::Failed(reason) = &result.outcome {
                if !reporter.shows_failures() {
                    log::warn!("Failed to render {}: {}", result.name, reason);
                }
            }

            reporter.report(ProgressEvent::ItemCompleted {
                current: index + 1,
                total,
                name: result.name,
                outcome: result.outcome,
                duration_ms: result.duration.as_millis() as u64,
            });
        }

        let summary = summary.with_duration(start.elapsed());
        reporter.report(ProgressEvent::BatchCompleted {
            rendered: summary.rendered,
            failed: summary.failed,
            duration_ms: summary.duration.as_millis() as u64,
        });
        summary
    }

    /// Render and write a single name.
    fn render_one<R: Renderer + ?Sized>(&self, renderer: &R, name: &str) -> ItemResult {
        let start = Instant::now();
        let path = icon_path(self.context.output_dir(), name);

        let written = renderer
            .render_item(name, self.context.options())
            .map_err(ItemError::from)
            .and_then(|image| save_png(&image, &path).map_err(ItemError::from));

        let duration = start.elapsed();
        match written {
            Ok(()) => {
                log::debug!("Rendered {} in {:?}", name, duration);
                ItemResult::succeeded(name.to_string(), duration)
            }
            Err(e) => {
                log::debug!("Failed to render {}: {}", name, e);
                ItemResult::failed(name.to_string(), e.to_string(), duration)
            }
        }
    }
}
