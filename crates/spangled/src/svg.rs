//! SVG output - draw a flag from its measurements and star positions.
//!
//! The document uses whole-number units from a bounded normalization, so the
//! `viewBox` is the flag itself and every stripe edge lands on an integer.
//! Repeated shapes are drawn once and reused through `<use>`.
//!
//! ## Star Outline
//!
//! Stars are five-pointed, point up, inscribed in a circle of the star
//! diameter. The tips are placed with lyon_geom vectors and written as a
//! relative path so the same `d` works wherever the star is moved.

use std::f64::consts::PI;
use std::io::Write;
use std::str::FromStr;

use lyon_geom::euclid::Angle;
use lyon_geom::{Point, Vector, point};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive};
use quick_xml::escape::escape;
use tracing::debug;

use crate::arrangement::Arrangement;
use crate::coordinates::{StarField, StarPosition, coordinates_from_layout};
use crate::error::{Error, Result};
use crate::geometry::{IntMeasurements, Measurements, Normalization};
use crate::palette::FlagColors;
use crate::ratio::{Rational, ratio, whole};

/// Document size and colors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Value of the `width` attribute. Takes precedence over `height`.
    pub width: Option<String>,
    /// Value of the `height` attribute, used when `width` is unset.
    pub height: Option<String>,
    pub colors: FlagColors,
    /// How the measurements become integer document units.
    pub normalization: Normalization,
}

impl RenderOptions {
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_colors(mut self, colors: FlagColors) -> Self {
        self.colors = colors;
        self
    }

    /// Check the sizes against the SVG length grammar and the colors
    /// against the color grammar.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] or [`Error::InvalidColor`].
    pub fn validate(&self) -> Result<()> {
        for value in [&self.width, &self.height].into_iter().flatten() {
            svgtypes::Length::from_str(value).map_err(|e| Error::InvalidLength {
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }
        self.colors.validate()
    }
}

/// Draw a flag with the stars of `layout`.
///
/// # Errors
///
/// [`Error::InvalidArrangement`] and [`Error::Unsupported`] from the
/// projection, plus everything [`render_svg_from_coordinates`] returns.
pub fn render_svg_from_layout(
    measurements: &Measurements,
    layout: Arrangement,
    options: &RenderOptions,
) -> Result<String> {
    let stars = StarField::from(coordinates_from_layout(layout)?);
    render_svg_from_coordinates(measurements, &stars, options)
}

/// Draw a flag with stars at arbitrary canton-relative positions.
///
/// # Errors
///
/// - [`Error::InvalidLength`] / [`Error::InvalidColor`] for bad options
/// - [`Error::ValueInvalid`] if the stripes have no height
/// - [`Error::Unsupported`] when every inner stripe runs beside the canton,
///   leaving no full-width one to draw
pub fn render_svg_from_coordinates(
    measurements: &Measurements,
    stars: &StarField,
    options: &RenderOptions,
) -> Result<String> {
    options.validate()?;
    let m = measurements.normalize_with(&options.normalization);
    if !m.stripe_height.is_positive() {
        return Err(Error::ValueInvalid("the stripe height should be positive".into()));
    }

    let mut svg = String::new();
    push_header(&mut svg, &m, options);
    push_stripes(&mut svg, &m, &options.colors)?;
    push_canton(&mut svg, &m, stars, &options.colors)?;
    svg.push_str("</svg>\n");

    debug!(stars = stars.len(), width = %m.width, height = %m.height, bytes = svg.len(), "rendered flag");
    Ok(svg)
}

/// [`render_svg_from_layout`], written to `out`.
pub fn write_svg_from_layout(
    out: &mut impl Write,
    measurements: &Measurements,
    layout: Arrangement,
    options: &RenderOptions,
) -> Result<()> {
    let svg = render_svg_from_layout(measurements, layout, options)?;
    out.write_all(svg.as_bytes())?;
    Ok(())
}

/// [`render_svg_from_coordinates`], written to `out`.
pub fn write_svg_from_coordinates(
    out: &mut impl Write,
    measurements: &Measurements,
    stars: &StarField,
    options: &RenderOptions,
) -> Result<()> {
    let svg = render_svg_from_coordinates(measurements, stars, options)?;
    out.write_all(svg.as_bytes())?;
    Ok(())
}

fn push_header(svg: &mut String, m: &IntMeasurements, options: &RenderOptions) {
    let size = match (&options.width, &options.height) {
        (Some(width), _) => format!("width=\"{}\"", escape(width.as_str())),
        (None, Some(height)) => format!("height=\"{}\"", escape(height.as_str())),
        (None, None) => "height=\"100%\"".to_string(),
    };
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:xlink="http://www.w3.org/1999/xlink"
     {}
     viewBox="0 0 {} {}">
    <!-- Created with spangled -->
"##,
        size, m.width, m.height
    ));
}

/// The outer color fills the whole flag; inner stripes are painted over it.
///
/// One full-width inner stripe is drawn below the canton. The short ones
/// beside the canton reuse it shifted right by the canton width, the other
/// long ones reuse it shifted down.
fn push_stripes(svg: &mut String, m: &IntMeasurements, colors: &FlagColors) -> Result<()> {
    let inner = stripe_count(&(&m.height / &m.stripe_height / 2u32))?;
    let short = stripe_count(&(&m.canton_height / &m.stripe_height / 2u32))?;
    let id = if colors.is_default() { "white_stripe" } else { "inner_stripe" };
    let s = &m.stripe_height;

    svg.push_str(&format!(
        "    <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        m.width,
        m.height,
        escape(&*colors.outer_stripes)
    ));

    if inner + short == 0 {
        return Ok(());
    }
    if short >= inner {
        return Err(Error::Unsupported(format!(
            "all {inner} inner stripes run beside the canton, there is no full-width one"
        )));
    }

    svg.push_str(&format!(
        "    <rect id=\"large_{id}\" width=\"{}\" y=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        m.width,
        s * (2 * short + 1),
        s,
        escape(&*colors.inner_stripes)
    ));

    if short > 0 {
        svg.push_str(&format!(
            "    <use href=\"#large_{id}\" id=\"short_{id}\" x=\"{}\" width=\"{}\" y=\"{}\"/>\n",
            m.canton_width,
            &m.width - &m.canton_width,
            -(s * (2 * short))
        ));
    }
    for i in 1..short {
        svg.push_str(&format!("    <use href=\"#short_{id}\" y=\"{}\"/>\n", s * (2 * i)));
    }
    for i in 1..(inner - short) {
        svg.push_str(&format!("    <use href=\"#large_{id}\" y=\"{}\"/>\n", s * (2 * i)));
    }
    Ok(())
}

fn stripe_count(value: &BigInt) -> Result<u32> {
    value
        .to_u32()
        .ok_or_else(|| Error::ValueInvalid(format!("cannot draw {value} stripes")))
}

/// The canton rectangle, then the stars.
///
/// The first full-size star is drawn as `#star`; the others are `<use>`
/// offsets from it. A star with its own scale gets its own path.
fn push_canton(svg: &mut String, m: &IntMeasurements, stars: &StarField, colors: &FlagColors) -> Result<()> {
    svg.push_str(&format!(
        "    <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        m.canton_width,
        m.canton_height,
        escape(&*colors.canton)
    ));

    let canton_width = whole(m.canton_width.clone());
    let canton_height = whole(m.canton_height.clone());
    let diameter = whole(m.star_diameter.clone());
    let fill = escape(&*colors.stars);
    let center = |star: &StarPosition| -> Result<Point<f64>> {
        Ok(point(
            decimal(&(&star.x * &canton_width))?,
            decimal(&(&star.y * &canton_height))?,
        ))
    };

    let mut template: Option<&StarPosition> = None;
    for (star, scale) in stars.iter() {
        if !scale.is_one() {
            let radius = decimal(&(&diameter * &scale * ratio(1, 2)))?;
            svg.push_str(&format!(
                "    <path d=\"{}\" fill=\"{fill}\"/>\n",
                star_path(center(star)?, radius)
            ));
            continue;
        }
        match template {
            None => {
                let radius = decimal(&(&diameter * ratio(1, 2)))?;
                svg.push_str(&format!(
                    "    <path id=\"star\" d=\"{}\" fill=\"{fill}\"/>\n",
                    star_path(center(star)?, radius)
                ));
                template = Some(star);
            }
            Some(first) => {
                let dx = (&star.x - &first.x) * &canton_width;
                let dy = (&star.y - &first.y) * &canton_height;
                svg.push_str(&format!(
                    "    <use href=\"#star\" x=\"{}\" y=\"{}\"/>\n",
                    number(decimal(&dx)?),
                    number(decimal(&dy)?)
                ));
            }
        }
    }
    Ok(())
}

/// Pentagram around `center`: up to the top tip, then each stroke of the
/// star as a relative move.
fn star_path(center: Point<f64>, radius: f64) -> String {
    let tip = |k: u32| {
        let angle = Angle::radians(1.5 * PI + f64::from(k) * 0.4 * PI);
        center + Vector::from_angle_and_length(angle, radius)
    };
    let [top, top_right, bottom_right, bottom_left, top_left] = [0, 1, 2, 3, 4].map(tip);

    let start = top - center;
    let first = bottom_right - top;
    let second = top_left - bottom_right;
    let third = top_right.x - top_left.x;
    let fourth = bottom_left - top_right;

    format!(
        "M {},{} m {},{} l {},{} {},{} h {} l {},{} z",
        number(center.x),
        number(center.y),
        number(start.x),
        number(start.y),
        number(first.x),
        number(first.y),
        number(second.x),
        number(second.y),
        number(third),
        number(fourth.x),
        number(fourth.y),
    )
}

/// Nearest `f64`, refusing values too large to draw.
fn decimal(value: &Rational) -> Result<f64> {
    value
        .to_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| Error::ValueInvalid(format!("{value} cannot be drawn as a coordinate")))
}

/// Six decimals at most, no trailing zeros, no negative zero.
fn number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 { "0".to_string() } else { rounded.to_string() }
}

// ============================================================================
// TESTS
// ============================================================================
