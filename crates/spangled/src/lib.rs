//! # spangled
//!
//! Star layouts and exact proportions for star-spangled flags.
//!
//! The pipeline: [`StarLayouts`] enumerates every way to arrange `n` stars,
//! [`find_best_star_layout`] picks the one that fits the canton best,
//! [`Measurements::generate`] derives every dimension of the flag as an exact
//! fraction, [`coordinates_from_layout`] places the stars, and the [`svg`]
//! module draws the result. [`get_svg`] runs all of it.
//!
//! ## Rust Lesson #7: Modules
//!
//! Each stage lives in its own module and only talks to the others through
//! the types re-exported here, so a caller can stop at any stage: take the
//! measurements and draw them with another tool, or feed the renderer star
//! positions that never came from an arrangement.

pub mod arrangement;
pub mod config;
pub mod coordinates;
pub mod enumerate;
pub mod error;
pub mod geometry;
pub mod optimize;
pub mod palette;
pub mod ratio;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use arrangement::{Arrangement, ArrangementKind, Taxonomy, classify};
pub use config::{FlagConfig, get_svg, write_svg};
pub use coordinates::{StarCoordinates, StarField, StarPosition, coordinates_from_layout, coordinates_from_layout_as};
pub use enumerate::{StarLayouts, generate_star_layouts};
pub use error::{Error, Result};
pub use geometry::{DEFAULT_MAX_VALUE, DEFAULT_STRIPES, IntMeasurements, Measurements, Normalization};
pub use optimize::{ScoredLayout, default_canton_factor, find_best_star_layout, find_best_star_layouts, layout_score};
pub use palette::{FlagColors, PRESETS};
pub use ratio::Rational;
pub use svg::{
    RenderOptions, render_svg_from_coordinates, render_svg_from_layout, write_svg_from_coordinates,
    write_svg_from_layout,
};
