//! Star arrangements and the classifier that names them.
//!
//! An [`Arrangement`] `(a, b, c, d)` reads "`a` long rows of `b` stars
//! interspersed with `c` short rows of `d` stars". Every historical US canton
//! fits this one parametric family; [`ArrangementKind`] tells the shapes
//! apart so the measurement and projection code can pick the right formulas.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An immutable row-interleaving pattern.
///
/// Construct freely; validity is checked by [`Taxonomy::classify`] and by
/// every operation that consumes an arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arrangement {
    /// Number of long rows.
    pub a: u32,
    /// Stars per long row.
    pub b: u32,
    /// Number of short rows.
    pub c: u32,
    /// Stars per short row.
    pub d: u32,
}

impl Arrangement {
    /// The 50-star canton: five rows of six around four rows of five.
    pub const FIFTY_STARS: Arrangement = Arrangement::new(5, 6, 4, 5);

    #[inline]
    pub const fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    /// A plain grid of `rows` rows of `columns` stars.
    #[inline]
    pub const fn grid(rows: u32, columns: u32) -> Self {
        Self::new(rows, columns, 0, 0)
    }

    /// Total number of stars, `a*b + c*d`.
    #[inline]
    pub fn star_count(&self) -> u64 {
        u64::from(self.a) * u64::from(self.b) + u64::from(self.c) * u64::from(self.d)
    }

    /// Both zero patterns hold: `a == 0` iff `b == 0` and `c == 0` iff `d == 0`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        (self.a == 0) == (self.b == 0) && (self.c == 0) == (self.d == 0)
    }

    /// Number of rows once long and short rows are interleaved.
    #[inline]
    pub fn row_count(&self) -> u64 {
        u64::from(self.a) + u64::from(self.c)
    }

    /// Number of star columns once long and short rows are interleaved.
    #[inline]
    pub fn column_count(&self) -> u64 {
        u64::from(self.b) + u64::from(self.d)
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.a, self.b, self.c, self.d)
    }
}

impl FromStr for Arrangement {
    type Err = String;

    /// Parses `"5,6,4,5"`, with or without parentheses and spaces.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts = trimmed
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid arrangement {s:?}: {e}"))?;
        match parts.as_slice() {
            [a, b, c, d] => Ok(Arrangement::new(*a, *b, *c, *d)),
            _ => Err(format!("invalid arrangement {s:?}: expected four comma-separated numbers")),
        }
    }
}

/// The named interleaving patterns.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// Each consumer `match`es on the kind without a wildcard arm, so adding a
/// variant here is a compile error everywhere a formula depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrangementKind {
    /// A plain grid, like the 48-star flag.
    Grid,
    /// Each short row sits between two long rows, like the 50-star flag.
    /// Two grids, one inside the other.
    ShortSandwich,
    /// Each long row sits between two short rows: a rectangle with all four
    /// corners cut off.
    LongSandwich,
    /// Each long row is followed by a short row, like the 45-star flag. The
    /// two bottom corners are cut off.
    Pagoda,
    /// Rows of equal length, an odd number of them, like the 49-star flag
    /// drawn staggered. The two right-hand corners are cut off.
    SidePagoda,
    /// Rows of equal length, an even number of them. The top-right and
    /// bottom-left corners are cut off.
    Cube,
    /// Rows of equal length in the minimal taxonomy, which does not tell
    /// side pagodas and cubes apart.
    Quincunx,
}

impl ArrangementKind {
    /// Get all kinds.
    pub fn all() -> &'static [ArrangementKind] {
        &[
            ArrangementKind::Grid,
            ArrangementKind::ShortSandwich,
            ArrangementKind::LongSandwich,
            ArrangementKind::Pagoda,
            ArrangementKind::SidePagoda,
            ArrangementKind::Cube,
            ArrangementKind::Quincunx,
        ]
    }

    /// Get kind name as string.
    pub fn name(&self) -> &'static str {
        match self {
            ArrangementKind::Grid => "grid",
            ArrangementKind::ShortSandwich => "short-sandwich",
            ArrangementKind::LongSandwich => "long-sandwich",
            ArrangementKind::Pagoda => "pagoda",
            ArrangementKind::SidePagoda => "side-pagoda",
            ArrangementKind::Cube => "cube",
            ArrangementKind::Quincunx => "quincunx",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            ArrangementKind::Grid => "Plain grid of stars",
            ArrangementKind::ShortSandwich => "Short rows between long rows",
            ArrangementKind::LongSandwich => "Long rows between short rows",
            ArrangementKind::Pagoda => "Long and short rows alternate, bottom corners cut",
            ArrangementKind::SidePagoda => "Equal rows, odd count, right corners cut",
            ArrangementKind::Cube => "Equal rows, even count, opposite corners cut",
            ArrangementKind::Quincunx => "Equal staggered rows (minimal taxonomy)",
        }
    }

    /// Whether the stars sit on a single rectangular grid.
    #[inline]
    pub fn is_grid(&self) -> bool {
        matches!(self, ArrangementKind::Grid)
    }

    /// Parse kind from string. Accepts `_` for `-` and ignores case.
    pub fn from_name(name: &str) -> Option<ArrangementKind> {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "grid" => Some(ArrangementKind::Grid),
            "short-sandwich" | "sandwich" => Some(ArrangementKind::ShortSandwich),
            "long-sandwich" => Some(ArrangementKind::LongSandwich),
            "pagoda" => Some(ArrangementKind::Pagoda),
            "side-pagoda" => Some(ArrangementKind::SidePagoda),
            "cube" => Some(ArrangementKind::Cube),
            "quincunx" => Some(ArrangementKind::Quincunx),
            _ => None,
        }
    }
}

impl fmt::Display for ArrangementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which set of kinds the classifier reports.
///
/// The two models agree on everything except arrangements whose short rows
/// are as long as the long ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Taxonomy {
    /// Six kinds: equal-length rows split into [`ArrangementKind::SidePagoda`]
    /// and [`ArrangementKind::Cube`].
    #[default]
    Extended,
    /// Equal-length rows are all [`ArrangementKind::Quincunx`].
    Quincunx,
}

impl Taxonomy {
    /// Classify an arrangement under this taxonomy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArrangement`] if a zero pattern is broken or the tuple
    /// matches no known interleaving.
    pub fn classify(self, layout: Arrangement) -> Result<ArrangementKind> {
        let Arrangement { a, b, c, d } = layout;
        if !layout.is_well_formed() {
            return Err(Error::InvalidArrangement(layout));
        }
        if c == 0 {
            return Ok(ArrangementKind::Grid);
        }

        if d == b {
            return match self {
                Taxonomy::Quincunx => Ok(ArrangementKind::Quincunx),
                Taxonomy::Extended if a.checked_sub(1) == Some(c) => Ok(ArrangementKind::SidePagoda),
                Taxonomy::Extended if c == a => Ok(ArrangementKind::Cube),
                Taxonomy::Extended => Err(Error::InvalidArrangement(layout)),
            };
        }

        if b.checked_sub(1) == Some(d) {
            if a.checked_sub(1) == Some(c) {
                return Ok(ArrangementKind::ShortSandwich);
            }
            if c.checked_sub(1) == Some(a) {
                return Ok(ArrangementKind::LongSandwich);
            }
            if c == a {
                return Ok(ArrangementKind::Pagoda);
            }
        }

        Err(Error::InvalidArrangement(layout))
    }
}

/// Classify under the default six-kind taxonomy.
///
/// # Errors
///
/// See [`Taxonomy::classify`].
pub fn classify(layout: Arrangement) -> Result<ArrangementKind> {
    Taxonomy::Extended.classify(layout)
}
