//! Everything that shapes one generated flag, in one place.

use std::io::Write;

use tracing::debug;

use crate::arrangement::{Arrangement, ArrangementKind, Taxonomy};
use crate::coordinates::{StarField, coordinates_from_layout_as};
use crate::enumerate::StarLayouts;
use crate::error::Result;
use crate::geometry::{DEFAULT_STRIPES, Measurements};
use crate::optimize::{ScoredLayout, best_of, default_canton_factor, ranked};
use crate::ratio::Rational;
use crate::svg::{RenderOptions, render_svg_from_coordinates};

/// Settings for the optimizer, the measurements and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagConfig {
    pub nstripes: u32,
    /// Size stars by the distance between them instead of the stripe height.
    pub proportional_stars: bool,
    /// Canton width over height the optimizer aims for.
    pub canton_factor: Rational,
    /// Only consider these kinds. `None` accepts all of them.
    pub kinds: Option<Vec<ArrangementKind>>,
    pub taxonomy: Taxonomy,
    pub include_cubes: bool,
    pub render: RenderOptions,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            nstripes: DEFAULT_STRIPES,
            proportional_stars: false,
            canton_factor: default_canton_factor(),
            kinds: None,
            taxonomy: Taxonomy::Extended,
            include_cubes: false,
            render: RenderOptions::default(),
        }
    }
}

impl FlagConfig {
    /// Candidate arrangements for `nstars` under this configuration.
    pub fn layouts(&self, nstars: u32) -> StarLayouts {
        let layouts = StarLayouts::new(nstars)
            .with_taxonomy(self.taxonomy)
            .with_cubes(self.include_cubes);
        match &self.kinds {
            Some(kinds) => layouts.with_kinds(kinds),
            None => layouts,
        }
    }

    pub fn best_layout(&self, nstars: u32) -> Result<ScoredLayout> {
        best_of(self.layouts(nstars), &self.canton_factor)
    }

    pub fn ranked_layouts(&self, nstars: u32) -> Result<Vec<ScoredLayout>> {
        ranked(self.layouts(nstars), &self.canton_factor)
    }

    pub fn measurements(&self, layout: Arrangement) -> Result<Measurements> {
        Measurements::generate(layout, self.nstripes, self.proportional_stars)
    }
}

/// Best arrangement, its measurements and star positions, drawn as SVG.
///
/// # Errors
///
/// Whatever the optimizer, the measurement generator, the projector or the
/// renderer returns.
pub fn get_svg(nstars: u32, config: &FlagConfig) -> Result<String> {
    let best = config.best_layout(nstars)?;
    let measurements = config.measurements(best.layout)?;
    let stars = StarField::from(coordinates_from_layout_as(best.layout, config.taxonomy)?);
    debug!(nstars, layout = %best.layout, "drawing flag");
    render_svg_from_coordinates(&measurements, &stars, &config.render)
}

/// [`get_svg`], written to `out`.
pub fn write_svg(out: &mut impl Write, nstars: u32, config: &FlagConfig) -> Result<()> {
    let svg = get_svg(nstars, config)?;
    out.write_all(svg.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::palette::FlagColors;
    use crate::ratio::whole;

    #[test]
    fn default_config_draws_the_current_flag() {
        let svg = get_svg(50, &FlagConfig::default()).unwrap();
        assert!(svg.contains("viewBox=\"0 0 7410 3900\""));
        assert_eq!(svg.matches("href=\"#star\"").count(), 49);
    }

    #[test]
    fn kinds_and_factor_steer_the_optimizer() {
        let config = FlagConfig {
            kinds: Some(vec![ArrangementKind::Grid]),
            ..FlagConfig::default()
        };
        assert_eq!(config.best_layout(49).unwrap().layout, Arrangement::grid(7, 7));

        let square = FlagConfig { canton_factor: whole(1), ..FlagConfig::default() };
        let ranked = square.ranked_layouts(2).unwrap();
        assert_eq!(ranked[0].layout, Arrangement::grid(1, 2));
    }

    #[test]
    fn cubes_follow_the_config() {
        let cube = Arrangement::new(4, 6, 4, 6);
        let mut config = FlagConfig::default();
        assert!(!config.layouts(48).any(|l| l == cube));
        config.include_cubes = true;
        assert!(config.layouts(48).any(|l| l == cube));
    }

    #[test]
    fn quincunx_taxonomy_cannot_draw_equal_rows() {
        let config = FlagConfig {
            taxonomy: Taxonomy::Quincunx,
            kinds: Some(vec![ArrangementKind::Quincunx]),
            ..FlagConfig::default()
        };
        assert_eq!(config.best_layout(27).unwrap().layout, Arrangement::new(5, 3, 4, 3));
        assert!(matches!(get_svg(27, &config), Err(Error::Unsupported(_))));
    }

    #[test]
    fn zero_stars() {
        assert!(matches!(get_svg(0, &FlagConfig::default()), Err(Error::EmptyDomain { nstars: 0 })));
    }

    #[test]
    fn palette_and_size_reach_the_document() {
        let config = FlagConfig {
            render: RenderOptions::default()
                .with_colors(FlagColors::BLACK_AND_GREY)
                .with_height("300"),
            ..FlagConfig::default()
        };
        let mut out = Vec::new();
        write_svg(&mut out, 50, &config).unwrap();
        let svg = String::from_utf8(out).unwrap();
        assert!(svg.contains("height=\"300\""));
        assert!(svg.contains("fill=\"#888888\""));
    }
}
