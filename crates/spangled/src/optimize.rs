//! Pick the arrangement that best fits a canton's proportions.

use num_traits::Signed;
use tracing::debug;

use crate::arrangement::{Arrangement, ArrangementKind};
use crate::enumerate::{StarLayouts, generate_star_layouts};
use crate::error::{Error, Result};
use crate::ratio::{Rational, ratio, whole};

/// Width over height of the standard canton, `0.76 / (7/13)`.
pub fn default_canton_factor() -> Rational {
    ratio(247, 175)
}

/// An arrangement with its fit score. Lower is better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredLayout {
    pub layout: Arrangement,
    pub score: Rational,
}

/// How far the arrangement's grid is from the canton proportions.
///
/// Rows count as `a + c + 1` and columns as `b + d + 1`, the extra one
/// standing for the margins on both sides.
pub fn layout_score(layout: Arrangement, canton_factor: &Rational) -> Rational {
    let rows = whole(layout.row_count() + 1);
    let columns = whole(layout.column_count() + 1);
    (rows * canton_factor - columns).abs()
}

/// First arrangement of `layouts` with the lowest score.
///
/// # Errors
///
/// [`Error::EmptyDomain`] if `layouts` yields nothing.
pub fn best_of(layouts: StarLayouts, canton_factor: &Rational) -> Result<ScoredLayout> {
    let nstars = layouts.nstars();
    let mut best: Option<ScoredLayout> = None;
    for layout in layouts {
        let score = layout_score(layout, canton_factor);
        // Strict comparison: ties keep the earlier arrangement.
        if best.as_ref().is_none_or(|b| score < b.score) {
            best = Some(ScoredLayout { layout, score });
        }
    }
    let best = best.ok_or(Error::EmptyDomain { nstars })?;
    debug!(nstars, layout = %best.layout, score = %best.score, "best star layout");
    Ok(best)
}

/// Every arrangement of `layouts`, best first. Equal scores stay in
/// enumeration order.
///
/// # Errors
///
/// [`Error::EmptyDomain`] if `layouts` yields nothing.
pub fn ranked(layouts: StarLayouts, canton_factor: &Rational) -> Result<Vec<ScoredLayout>> {
    let nstars = layouts.nstars();
    let mut scored: Vec<ScoredLayout> = layouts
        .map(|layout| ScoredLayout { score: layout_score(layout, canton_factor), layout })
        .collect();
    if scored.is_empty() {
        return Err(Error::EmptyDomain { nstars });
    }
    // `sort_by` is stable.
    scored.sort_by(|x, y| x.score.cmp(&y.score));
    Ok(scored)
}

/// The arrangement of `nstars` stars that best fits a canton of
/// `canton_factor` (width over height, default 247/175).
///
/// # Errors
///
/// [`Error::EmptyDomain`] if no arrangement exists, e.g. for zero stars or a
/// kind filter nothing satisfies.
pub fn find_best_star_layout(
    nstars: u32,
    canton_factor: Option<&Rational>,
    kinds: Option<&[ArrangementKind]>,
) -> Result<Arrangement> {
    let factor = canton_factor.cloned().unwrap_or_else(default_canton_factor);
    best_of(generate_star_layouts(nstars, kinds), &factor).map(|best| best.layout)
}

/// All arrangements of `nstars` stars with their scores, best first.
///
/// # Errors
///
/// Same as [`find_best_star_layout`].
pub fn find_best_star_layouts(
    nstars: u32,
    canton_factor: Option<&Rational>,
    kinds: Option<&[ArrangementKind]>,
) -> Result<Vec<ScoredLayout>> {
    let factor = canton_factor.cloned().unwrap_or_else(default_canton_factor);
    ranked(generate_star_layouts(nstars, kinds), &factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_stars() {
        assert_eq!(find_best_star_layout(50, None, None).unwrap(), Arrangement::FIFTY_STARS);
    }

    #[test]
    fn forty_eight_stars_is_a_grid() {
        assert_eq!(find_best_star_layout(48, None, None).unwrap(), Arrangement::grid(6, 8));
    }

    #[test]
    fn forty_nine_stars_is_a_long_sandwich() {
        assert_eq!(find_best_star_layout(49, None, None).unwrap(), Arrangement::new(4, 6, 5, 5));
        let grid = find_best_star_layout(49, None, Some(&[ArrangementKind::Grid])).unwrap();
        assert_eq!(grid, Arrangement::grid(7, 7));
    }

    #[test]
    fn score_of_the_fifty_star_flag() {
        assert_eq!(layout_score(Arrangement::FIFTY_STARS, &default_canton_factor()), ratio(74, 35));
    }

    #[test]
    fn score_of_a_huge_pagoda() {
        let layout = Arrangement::new(3_000_000_000, 2, 3_000_000_000, 1);
        let factor = default_canton_factor();
        let expected = whole(6_000_000_001u64) * &factor - whole(4);
        assert_eq!(layout_score(layout, &factor), expected);
    }

    #[test]
    fn custom_factor_changes_the_winner() {
        // A square canton wants as many rows as columns.
        let square = whole(1);
        let best = find_best_star_layout(49, Some(&square), Some(&[ArrangementKind::Grid])).unwrap();
        assert_eq!(best, Arrangement::grid(7, 7));
    }

    #[test]
    fn ranking_starts_with_the_best() {
        let ranked = find_best_star_layouts(50, None, None).unwrap();
        assert_eq!(ranked[0].layout, Arrangement::FIFTY_STARS);
        assert_eq!(ranked[1].layout, Arrangement::grid(5, 10));
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn ties_keep_enumeration_order() {
        // (1, 2) and (2, 1) score 31/175 and 391/175; with factor 1 they tie at 1.
        let ranked = find_best_star_layouts(2, Some(&whole(1)), None).unwrap();
        assert_eq!(ranked[0].layout, Arrangement::grid(1, 2));
        assert_eq!(ranked[1].layout, Arrangement::grid(2, 1));
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(find_best_star_layout(2, Some(&whole(1)), None).unwrap(), Arrangement::grid(1, 2));
    }

    #[test]
    fn empty_domain() {
        assert!(matches!(find_best_star_layout(0, None, None), Err(Error::EmptyDomain { nstars: 0 })));
        assert!(matches!(
            find_best_star_layouts(7, None, Some(&[ArrangementKind::Cube])),
            Err(Error::EmptyDomain { nstars: 7 })
        ));
    }
}
