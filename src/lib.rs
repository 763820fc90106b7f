//! Iconbake - Library for rendering an icon image for every known item and block
//!
//! This library provides functionality to:
//! - Discover item, block, and trim material names from an asset data directory
//! - Filter armor trim variants and build an ordered, case-insensitively unique render list
//! - Render every name through a [`renderer::Renderer`] and write one PNG per name
//! - Report progress and a final summary, isolating failures per name

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod output;
pub mod renderer;
pub mod resolve;
pub mod trim;
