//! Batch rendering of every known item and block.
//!
//! # Overview
//!
//! - **Context**: paths and settings for a run ([`BatchContext`])
//! - **Pipeline**: discovery, output preparation and the render loop
//!   ([`BatchPipeline`])
//! - **Progress**: per-item progress events and reporters
//! - **Result**: per-item outcomes and run-level counters
//!
//! # Example
//!
//! ```ignore
//! use iconbake::batch::{BatchContext, BatchPipeline, NullProgress};
//! use iconbake::renderer::TextureRenderer;
//!
//! let renderer = TextureRenderer::from_data_dir(&data_dir)?;
//! let context = BatchContext::new(data_dir, output_dir, 256);
//! let summary = BatchPipeline::new(context).run(&renderer, &NullProgress::new())?;
//! println!("{}", summary.summary_line());
//! ```

pub mod context;
pub mod pipeline;
pub mod progress;
pub mod result;

pub use context::*;
pub use pipeline::*;
pub use progress::*;
pub use result::*;
