//! Batch progress reporting.
//!
//! [`format_progress`] is the pure progress line formatter. Reporters turn
//! [`ProgressEvent`]s into output: an in-place console bar, JSON lines, or
//! nothing at all.

use crate::batch::result::RenderOutcome;
use serde_json::json;
use std::io::Write;
use std::sync::Mutex;

/// Number of cells in the progress bar.
pub const BAR_WIDTH: usize = 30;

/// Fixed width of the label column.
pub const LABEL_WIDTH: usize = 25;

const FULL: char = '█';
const EMPTY: char = '░';
const ELLIPSIS: &str = "..";

/// Format one progress line for `current` of `total` items.
///
/// The bar is `floor(current / total * 30)` full cells followed by empty
/// cells, the percentage has one decimal, and the label is cut to 23
/// characters plus `..` when longer than 25, then padded to 25.
///
/// ```
/// use iconbake::batch::progress::format_progress;
///
/// let line = format_progress(15, 30, "diamond_pickaxe");
/// assert!(line.starts_with("[███████████████░░░░░░░░░░░░░░░]"));
/// assert!(line.contains(" 50.0% | 15/30 | diamond_pickaxe"));
/// ```
pub fn format_progress(current: usize, total: usize, label: &str) -> String {
    let pct = if total == 0 { 1.0 } else { current as f64 / total as f64 };
    let filled = ((pct * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);

    let bar: String = std::iter::repeat(FULL)
        .take(filled)
        .chain(std::iter::repeat(EMPTY).take(BAR_WIDTH - filled))
        .collect();

    format!(
        "[{}] {:5.1}% | {}/{} | {:<width$}",
        bar,
        pct * 100.0,
        current,
        total,
        truncate_label(label),
        width = LABEL_WIDTH
    )
}

/// Cut a label longer than the label column to fit, marking the cut with `..`.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let head: String = label.chars().take(LABEL_WIDTH - ELLIPSIS.len()).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        label.to_string()
    }
}

/// Events that can be reported during a batch.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Rendering started
    BatchStarted {
        /// Number of names to render
        total: usize,
    },
    /// One name was processed
    ItemCompleted {
        /// 1-based position in the resolved list
        current: usize,
        /// Number of names to render
        total: usize,
        /// Name that was processed
        name: String,
        /// What happened
        outcome: RenderOutcome,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// Rendering finished
    BatchCompleted {
        /// Number of names rendered
        rendered: usize,
        /// Number of names that failed
        failed: usize,
        /// Total duration in milliseconds
        duration_ms: u64,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);

    /// Whether failure reasons reach the user through this reporter.
    fn shows_failures(&self) -> bool {
        true
    }
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    /// Create a new null progress reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}

    fn shows_failures(&self) -> bool {
        false
    }
}

/// Console progress reporter that redraws a single bar line in place.
pub struct ConsoleProgress {
    /// Whether to use colors
    use_colors: bool,
    /// Output writer (for testing)
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress").field("use_colors", &self.use_colors).finish()
    }
}

impl ConsoleProgress {
    /// Create a new console progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { use_colors: true, output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a console progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self {
            use_colors: false, // Disable colors for custom output
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Set whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        self.color(text, "\x1b[31m")
    }

    fn green(&self, text: &str) -> String {
        self.color(text, "\x1b[32m")
    }

    /// Write text as-is and flush, so in-place redraws show up immediately.
    fn write(&self, text: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = write!(output, "{}", text);
            let _ = output.flush();
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::BatchStarted { .. } => {}
            ProgressEvent::ItemCompleted { current, total, name, outcome, .. } => {
                if let RenderOutcome::Failed(reason) = &outcome {
                    self.write(&format!(
                        "\n{}\n",
                        self.red(&format!("Failed to render {}: {}", name, reason))
                    ));
                }
                self.write(&format!("\r{}", format_progress(current, total, &name)));
            }
            ProgressEvent::BatchCompleted { .. } => {
                let bar: String = std::iter::repeat(FULL).take(BAR_WIDTH).collect();
                let done = self.green(&format!("[{}] 100.0% | Complete!", bar));
                self.write(&format!("\n\n{}\n\n", done));
            }
        }
    }
}

/// JSON progress reporter for machine-readable output.
pub struct JsonProgress {
    /// Output writer
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { output: Mutex::new(Box::new(output)) }
    }

    fn write_json(&self, value: &serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", value);
        }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let value = match event {
            ProgressEvent::BatchStarted { total } => {
                json!({ "event": "batch_started", "total": total })
            }
            ProgressEvent::ItemCompleted { current, total, name, outcome, duration_ms } => {
                let status = if outcome.is_success() { "rendered" } else { "failed" };
                let mut value = json!({
                    "event": "item_completed",
                    "current": current,
                    "total": total,
                    "name": name,
                    "status": status,
                    "duration_ms": duration_ms,
                });
                if let RenderOutcome::Failed(reason) = outcome {
                    value["error"] = json!(reason);
                }
                value
            }
            ProgressEvent::BatchCompleted { rendered, failed, duration_ms } => json!({
                "event": "batch_completed",
                "rendered": rendered,
                "failed": failed,
                "duration_ms": duration_ms,
            }),
        };
        self.write_json(&value);
    }
}
