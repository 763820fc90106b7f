//! Batch result types.
//!
//! Contains types for representing the outcome of rendering each name and the
//! aggregate counters of a whole run.

use std::time::Duration;

/// Outcome of rendering a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Image rendered and written
    Succeeded,
    /// Rendering or writing failed with a human readable reason
    Failed(String),
}

impl RenderOutcome {
    /// Check if the outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Succeeded)
    }
}

impl std::fmt::Display for RenderOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderOutcome::Succeeded => write!(f, "rendered"),
            RenderOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Result of rendering a single name.
#[derive(Debug, Clone)]
pub struct ItemResult {
    /// Name that was rendered
    pub name: String,
    /// Outcome
    pub outcome: RenderOutcome,
    /// Time spent rendering and writing
    pub duration: Duration,
}

impl ItemResult {
    /// Create a successful result.
    pub fn succeeded(name: String, duration: Duration) -> Self {
        Self { name, outcome: RenderOutcome::Succeeded, duration }
    }

    /// Create a failed result.
    pub fn failed(name: String, reason: String, duration: Duration) -> Self {
        Self { name, outcome: RenderOutcome::Failed(reason), duration }
    }
}

/// A name that failed to render, with its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Name that failed
    pub name: String,
    /// Failure reason
    pub reason: String,
}

/// Aggregate counters for a batch run.
///
/// The render loop owns one summary and records every item into it, so
/// `rendered + failed` always equals the number of names processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of names rendered and written
    pub rendered: usize,
    /// Number of names that failed
    pub failed: usize,
    /// Failed names in render order
    pub failures: Vec<ItemFailure>,
    /// Wall time of the render loop
    pub duration: Duration,
}

impl BatchSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one item result.
    pub fn record(&mut self, result: &ItemResult) {
        match &result.outcome {
            RenderOutcome::Succeeded => self.rendered += 1,
            RenderOutcome::Failed(reason) => {
                self.failed += 1;
                self.failures
                    .push(ItemFailure { name: result.name.clone(), reason: reason.clone() });
            }
        }
    }

    /// Set the loop duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of names processed.
    pub fn total(&self) -> usize {
        self.rendered + self.failed
    }

    /// Check if every name rendered.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// The final one-line summary.
    pub fn summary_line(&self) -> String {
        format!("Rendered: {} | Failed: {}", self.rendered, self.failed)
    }

    /// Format the summary line followed by up to `max_failures` failed names.
    pub fn summary(&self, max_failures: usize) -> String {
        let mut lines = vec![self.summary_line()];

        for failure in self.failures.iter().take(max_failures) {
            lines.push(format!("  - {}: {}", failure.name, failure.reason));
        }
        if self.failures.len() > max_failures {
            lines.push(format!("  ... and {} more", self.failures.len() - max_failures));
        }

        lines.join("\n")
    }
}
