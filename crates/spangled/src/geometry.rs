//! Government-specified flag proportions, derived exactly from a star layout.
//!
//! Everything here is a big-integer fraction of the hoist (the flag height).
//! Nothing is rounded until [`Measurements::normalize_with`] is asked to keep
//! integers below a ceiling, and even then only the star diameter loses
//! precision.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `Measurements<T>` is generic over the number type. The same struct holds
//! exact fractions while deriving ([`Measurements<Rational>`]) and whole
//! numbers once normalized ([`IntMeasurements`]).

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::{debug, warn};

use crate::arrangement::{Arrangement, ArrangementKind, classify};
use crate::error::{Error, Result};
use crate::ratio::{Rational, lcm_of_denominators, limit_denominator, ratio, sqrt_approx, whole};

/// Stripe count of the current flag.
pub const DEFAULT_STRIPES: u32 = 13;

/// Default ceiling for normalized integers: every integer up to `2^24`
/// survives a round trip through `f32`, which is what most viewers use.
pub const DEFAULT_MAX_VALUE: u64 = 1 << 24;

/// Decimal digits kept when a proportional star diameter needs an irrational
/// square root.
const SQRT_DIGITS: u32 = 12;

/// The ten dimensions of the flag, in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Measurements<T = Rational> {
    /// Hoist of the flag (A).
    pub height: T,
    /// Fly of the flag (B).
    pub width: T,
    /// Hoist of the canton (C).
    pub canton_height: T,
    /// Fly of the canton (D).
    pub canton_width: T,
    /// Canton top edge to the first row of stars (E).
    pub vertical_stars_margin: T,
    /// Canton left edge to the first column of stars (G).
    pub horizontal_stars_margin: T,
    /// Distance between adjacent rows (F).
    pub vertical_star_spacing: T,
    /// Distance between adjacent columns (H).
    pub horizontal_star_spacing: T,
    /// Diameter of the circle around a star (K).
    pub star_diameter: T,
    /// Width of one stripe (L).
    pub stripe_height: T,
}

/// Measurements scaled to the smallest whole numbers with the same ratios.
pub type IntMeasurements = Measurements<BigInt>;

/// How to turn exact measurements into integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    /// When the exact scaling overflows `max_value`, first try coarser
    /// fractions for the star diameter before falling back to rounding it.
    pub more_precise: bool,
    /// Largest integer allowed in the output. `None` keeps exact scaling.
    pub max_value: Option<u64>,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            more_precise: true,
            max_value: Some(DEFAULT_MAX_VALUE),
        }
    }
}

impl Normalization {
    /// Exact scaling, however large the integers get.
    pub fn exact() -> Self {
        Self {
            more_precise: true,
            max_value: None,
        }
    }
}

impl<T> Measurements<T> {
    /// Field names in declaration order.
    pub const FIELD_NAMES: [&'static str; 10] = [
        "height",
        "width",
        "canton_height",
        "canton_width",
        "vertical_stars_margin",
        "horizontal_stars_margin",
        "vertical_star_spacing",
        "horizontal_star_spacing",
        "star_diameter",
        "stripe_height",
    ];

    /// All values in declaration order.
    pub fn values(&self) -> [&T; 10] {
        [
            &self.height,
            &self.width,
            &self.canton_height,
            &self.canton_width,
            &self.vertical_stars_margin,
            &self.horizontal_stars_margin,
            &self.vertical_star_spacing,
            &self.horizontal_star_spacing,
            &self.star_diameter,
            &self.stripe_height,
        ]
    }

    /// Apply `f` to every value, keeping the field order.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Measurements<U> {
        Measurements {
            height: f(&self.height),
            width: f(&self.width),
            canton_height: f(&self.canton_height),
            canton_width: f(&self.canton_width),
            vertical_stars_margin: f(&self.vertical_stars_margin),
            horizontal_stars_margin: f(&self.horizontal_stars_margin),
            vertical_star_spacing: f(&self.vertical_star_spacing),
            horizontal_star_spacing: f(&self.horizontal_star_spacing),
            star_diameter: f(&self.star_diameter),
            stripe_height: f(&self.stripe_height),
        }
    }

    /// `(name, value)` pairs in declaration order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &T)> {
        Self::FIELD_NAMES.into_iter().zip(self.values())
    }
}

impl Measurements<Rational> {
    /// Derive the dimensions of a flag with `layout` stars and `nstripes`
    /// stripes.
    ///
    /// Grids get margins of two thirds of a spacing; interleaved layouts get
    /// margins equal to the spacing. With `proportional` the star diameter
    /// follows the closest distance between two stars, calibrated so the
    /// 50-star flag gets the standard 0.0616; otherwise it is four fifths of
    /// a stripe.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArrangement`] if `layout` does not classify, and
    /// [`Error::ValueInvalid`] for zero stripes.
    pub fn generate(layout: Arrangement, nstripes: u32, proportional: bool) -> Result<Self> {
        let kind = classify(layout)?;
        if nstripes == 0 {
            return Err(Error::ValueInvalid("a flag needs at least one stripe".into()));
        }
        let Arrangement { a, b, .. } = layout;

        let height = whole(1);
        let width = &height * ratio(19, 10);
        let canton_height = &height * ratio(i64::from(nstripes.div_ceil(2)), i64::from(nstripes));
        let canton_width = &width * ratio(2, 5);

        let (vertical_star_spacing, vertical_stars_margin, horizontal_star_spacing, horizontal_stars_margin) =
            match kind {
                ArrangementKind::Grid => {
                    // `n` stars and two margins of 2/3 span `n + 1/3` spacings.
                    let third = ratio(1, 3);
                    let v = &canton_height / (whole(a) + &third);
                    let h = &canton_width / (whole(b) + &third);
                    let (v_margin, h_margin) = (&v * ratio(2, 3), &h * ratio(2, 3));
                    (v, v_margin, h, h_margin)
                }
                ArrangementKind::ShortSandwich
                | ArrangementKind::LongSandwich
                | ArrangementKind::Pagoda
                | ArrangementKind::SidePagoda
                | ArrangementKind::Cube
                | ArrangementKind::Quincunx => {
                    let v = &canton_height / whole(layout.row_count() + 1);
                    let h = &canton_width / whole(layout.column_count() + 1);
                    (v.clone(), v, h.clone(), h)
                }
            };

        let stripe_height = &height / whole(nstripes);
        let star_diameter = if proportional {
            proportional_diameter(kind, &vertical_star_spacing, &horizontal_star_spacing)?
        } else {
            &stripe_height * ratio(4, 5)
        };

        Ok(Self {
            height,
            width,
            canton_height,
            canton_width,
            vertical_stars_margin,
            horizontal_stars_margin,
            vertical_star_spacing,
            horizontal_star_spacing,
            star_diameter,
            stripe_height,
        })
    }

    /// The 50-star, 13-stripe flag with the standard star size.
    pub fn standard() -> Result<Self> {
        Self::generate(Arrangement::FIFTY_STARS, DEFAULT_STRIPES, false)
    }

    /// Check the geometric sanity rules.
    ///
    /// The canton spans a whole number of stripes, leaves part of the fly
    /// free, and reaches no lower than the stripe crossing the middle of the
    /// hoist.
    ///
    /// # Errors
    ///
    /// [`Error::ValueInvalid`] naming the first rule broken.
    pub fn check(&self) -> Result<()> {
        if self.stripe_height <= Rational::zero() {
            return Err(Error::ValueInvalid("the stripe height should be positive".into()));
        }

        let canton_stripes = &self.canton_height / &self.stripe_height;
        if !canton_stripes.is_integer() {
            return Err(Error::ValueInvalid(
                "the canton height should be a multiple of the stripe height".into(),
            ));
        }

        if self.canton_width >= self.width {
            return Err(Error::ValueInvalid(
                "the canton should not cover the whole width of the flag".into(),
            ));
        }

        let half_in_stripes = (&self.height / whole(2) / &self.stripe_height).ceil();
        if self.canton_height > half_in_stripes * &self.stripe_height {
            return Err(Error::ValueInvalid(
                "the canton should not cover more than half of the height of the flag".into(),
            ));
        }

        Ok(())
    }

    /// Smallest integers with exactly the same ratios: every value times the
    /// least common multiple of all denominators.
    pub fn normalize(&self) -> IntMeasurements {
        let scale = lcm_of_denominators(self.values());
        self.scaled(&scale, &self.star_diameter)
    }

    /// Integers no larger than `options.max_value` where possible.
    ///
    /// Only the star diameter ever gives up precision. With
    /// `options.more_precise`, coarser approximations of the diameter are
    /// tried with a shrinking denominator bound until the integers fit or the
    /// diameter would become zero. The last resort scales the other nine
    /// values exactly and rounds the diameter.
    pub fn normalize_with(&self, options: &Normalization) -> IntMeasurements {
        let exact = self.normalize();
        let Some(max_value) = options.max_value else {
            return exact;
        };
        let max_value = BigInt::from(max_value);
        if largest(&exact) <= &max_value {
            return exact;
        }

        let mut structural = self.clone();
        structural.star_diameter = Rational::zero();
        let base_scale = lcm_of_denominators(structural.values());

        if options.more_precise {
            let mut bound = self.star_diameter.denom().clone();
            loop {
                bound = bound.div_floor(&BigInt::from(2));
                if bound < BigInt::one() {
                    break;
                }
                let diameter = limit_denominator(&self.star_diameter, &bound);
                if diameter.is_zero() {
                    break;
                }
                let scale = base_scale.lcm(diameter.denom());
                let candidate = self.scaled(&scale, &diameter);
                if largest(&candidate) <= &max_value {
                    debug!(%scale, %diameter, "normalized with an approximated star diameter");
                    return candidate;
                }
            }
        }

        let diameter = (&self.star_diameter * whole(base_scale.clone())).round() / whole(base_scale.clone());
        let rounded = self.scaled(&base_scale, &diameter);
        if largest(&rounded) > &max_value {
            warn!(%max_value, largest = %largest(&rounded), "normalized measurements exceed the ceiling");
        } else {
            debug!(scale = %base_scale, "normalized with a rounded star diameter");
        }
        rounded
    }

    /// Every value times `scale`, with `diameter` standing in for the star
    /// diameter. `scale` must clear every denominator.
    fn scaled(&self, scale: &BigInt, diameter: &Rational) -> IntMeasurements {
        let scale = whole(scale.clone());
        let mut out = self.map(|value| (value * &scale).to_integer());
        out.star_diameter = (diameter * &scale).to_integer();
        out
    }
}

impl IntMeasurements {
    /// Lift back into exact fractions.
    pub fn to_rational(&self) -> Measurements<Rational> {
        self.map(|value| whole(value.clone()))
    }

    /// Already integral, so this is the identity.
    pub fn normalize(&self) -> IntMeasurements {
        self.to_rational().normalize()
    }
}

fn largest(measurements: &IntMeasurements) -> &BigInt {
    measurements
        .values()
        .into_iter()
        .max()
        .unwrap_or(&measurements.height)
}

/// Squared distance between the two closest stars.
///
/// Grid stars are one spacing apart in each direction. Interleaved stars sit
/// two spacings apart within a row or column and one spacing diagonally.
fn closest_squared(kind: ArrangementKind, vertical: &Rational, horizontal: &Rational) -> Rational {
    let v2 = vertical * vertical;
    let h2 = horizontal * horizontal;
    match kind {
        ArrangementKind::Grid => v2.min(h2),
        ArrangementKind::ShortSandwich
        | ArrangementKind::LongSandwich
        | ArrangementKind::Pagoda
        | ArrangementKind::SidePagoda
        | ArrangementKind::Cube
        | ArrangementKind::Quincunx => {
            let diagonal = &v2 + &h2;
            let four = whole(4);
            (&four * &v2).min(&four * &h2).min(diagonal)
        }
    }
}

/// Standard diameter times the ratio of closest-star distances to the 50-star
/// flag's.
fn proportional_diameter(kind: ArrangementKind, vertical: &Rational, horizontal: &Rational) -> Result<Rational> {
    let reference = Measurements::standard()?;
    let reference_kind = classify(Arrangement::FIFTY_STARS)?;
    let reference_squared = closest_squared(
        reference_kind,
        &reference.vertical_star_spacing,
        &reference.horizontal_star_spacing,
    );
    let squared = closest_squared(kind, vertical, horizontal);
    let standard_diameter = ratio(616, 10_000);
    Ok(standard_diameter * sqrt_approx(&(squared / reference_squared), SQRT_DIGITS))
}

// ============================================================================
// TESTS
// ============================================================================
