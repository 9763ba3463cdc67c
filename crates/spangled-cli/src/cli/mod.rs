//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `svg` - Draw the best flag for a star count
//! - `layouts` - Rank every arrangement for a star count
//! - `measure` - Exact and normalized dimensions of one arrangement
//! - `kinds` - List arrangement kinds and palettes
//! - `inspect` - Summarize a generated SVG file

pub mod common;
pub mod inspect;
pub mod kinds;
pub mod layouts;
pub mod measure;
pub mod svg;

pub use inspect::cmd_inspect;
pub use kinds::cmd_kinds;
pub use layouts::cmd_layouts;
pub use measure::cmd_measure;
pub use svg::cmd_svg;
