//! Star centers in canton-relative units.
//!
//! Positions are exact fractions of the canton width (`x`) and height (`y`),
//! each in `[0, 1)`, so they do not depend on how large the flag is drawn.

use std::collections::BTreeMap;
use std::iter::FusedIterator;

use crate::arrangement::{Arrangement, ArrangementKind, Taxonomy};
use crate::error::{Error, Result};
use crate::geometry::{DEFAULT_STRIPES, Measurements};
use crate::ratio::{Rational, whole};

/// The center of one star, as fractions of the canton size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarPosition {
    pub x: Rational,
    pub y: Rational,
}

impl StarPosition {
    #[inline]
    pub fn new(x: Rational, y: Rational) -> Self {
        Self { x, y }
    }
}

/// The stars handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarField {
    /// Every star at the standard diameter.
    Uniform(Vec<StarPosition>),
    /// Each star with its own scale; `1` is the standard diameter.
    Scaled(BTreeMap<StarPosition, Rational>),
}

impl StarField {
    pub fn len(&self) -> usize {
        match self {
            StarField::Uniform(stars) => stars.len(),
            StarField::Scaled(stars) => stars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions with their scale, in a stable order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&StarPosition, Rational)> + '_> {
        match self {
            StarField::Uniform(stars) => Box::new(stars.iter().map(|star| (star, whole(1)))),
            StarField::Scaled(stars) => Box::new(stars.iter().map(|(star, scale)| (star, scale.clone()))),
        }
    }
}

impl From<StarCoordinates> for StarField {
    fn from(stars: StarCoordinates) -> Self {
        StarField::Uniform(stars.collect())
    }
}

/// One rectangular block of stars.
///
/// Interleaved layouts are two of these on a doubled lattice: every other
/// row and column, the second block shifted by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    rows: u32,
    columns: u32,
    row_offset: u32,
    column_offset: u32,
    stride: u32,
}

impl Block {
    fn len(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Lattice `(row, column)` of the `index`-th star, row-major.
    fn lattice_point(&self, index: usize) -> (u64, u64) {
        let columns = self.columns as usize;
        let row = (index / columns) as u64;
        let column = (index % columns) as u64;
        (
            u64::from(self.row_offset) + row * u64::from(self.stride),
            u64::from(self.column_offset) + column * u64::from(self.stride),
        )
    }
}

/// Lazy, finite sequence of star centers for one arrangement.
#[derive(Debug, Clone)]
pub struct StarCoordinates {
    blocks: Vec<Block>,
    x_margin: Rational,
    x_step: Rational,
    y_margin: Rational,
    y_step: Rational,
    block: usize,
    index: usize,
    remaining: usize,
}

impl StarCoordinates {
    fn new(layout: Arrangement, kind: ArrangementKind) -> Result<Self> {
        let Arrangement { a, b, c, d } = layout;
        let blocks = match kind {
            ArrangementKind::Grid => vec![Block { rows: a, columns: b, row_offset: 0, column_offset: 0, stride: 1 }],
            ArrangementKind::ShortSandwich
            | ArrangementKind::Pagoda
            | ArrangementKind::SidePagoda
            | ArrangementKind::Cube => vec![
                Block { rows: a, columns: b, row_offset: 0, column_offset: 0, stride: 2 },
                Block { rows: c, columns: d, row_offset: 1, column_offset: 1, stride: 2 },
            ],
            // The outer rows are the short ones.
            ArrangementKind::LongSandwich => vec![
                Block { rows: a, columns: b, row_offset: 1, column_offset: 0, stride: 2 },
                Block { rows: c, columns: d, row_offset: 0, column_offset: 1, stride: 2 },
            ],
            ArrangementKind::Quincunx => {
                return Err(Error::Unsupported(format!(
                    "cannot place the stars of quincunx {layout}: side-pagoda or cube placement is ambiguous"
                )));
            }
        };

        // Ratios to the canton do not depend on the stripe count.
        let m = Measurements::generate(layout, DEFAULT_STRIPES, false)?;
        let remaining = blocks.iter().map(Block::len).sum();
        Ok(Self {
            blocks,
            x_margin: &m.horizontal_stars_margin / &m.canton_width,
            x_step: &m.horizontal_star_spacing / &m.canton_width,
            y_margin: &m.vertical_stars_margin / &m.canton_height,
            y_step: &m.vertical_star_spacing / &m.canton_height,
            block: 0,
            index: 0,
            remaining,
        })
    }
}

impl Iterator for StarCoordinates {
    type Item = StarPosition;

    fn next(&mut self) -> Option<StarPosition> {
        loop {
            let block = self.blocks.get(self.block)?;
            if self.index >= block.len() {
                self.block += 1;
                self.index = 0;
                continue;
            }

            let (lattice_row, lattice_column) = block.lattice_point(self.index);
            self.index += 1;
            self.remaining -= 1;

            return Some(StarPosition::new(
                &self.x_margin + &self.x_step * whole(lattice_column),
                &self.y_margin + &self.y_step * whole(lattice_row),
            ));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StarCoordinates {}

impl FusedIterator for StarCoordinates {}

/// Star centers for `layout`, classified under the six-kind taxonomy.
///
/// # Errors
///
/// [`Error::InvalidArrangement`] if `layout` does not classify.
pub fn coordinates_from_layout(layout: Arrangement) -> Result<StarCoordinates> {
    coordinates_from_layout_as(layout, Taxonomy::Extended)
}

/// Star centers for `layout`, classified under `taxonomy`.
///
/// # Errors
///
/// [`Error::InvalidArrangement`] if `layout` does not classify, and
/// [`Error::Unsupported`] for quincunx layouts.
pub fn coordinates_from_layout_as(layout: Arrangement, taxonomy: Taxonomy) -> Result<StarCoordinates> {
    let kind = taxonomy.classify(layout)?;
    StarCoordinates::new(layout, kind)
}
