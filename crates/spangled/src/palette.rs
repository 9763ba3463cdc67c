//! Flag colors and the named presets.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The four fills of a flag. Any SVG color syntax is accepted: names,
/// `#rgb`/`#rrggbb`, `rgb(...)` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagColors {
    pub outer_stripes: Cow<'static, str>,
    pub inner_stripes: Cow<'static, str>,
    pub canton: Cow<'static, str>,
    pub stars: Cow<'static, str>,
}

impl FlagColors {
    /// Red stripes, white stripes, blue canton, white stars.
    pub const DEFAULT: FlagColors = FlagColors::preset_of("#B22234", "#FFFFFF", "#3C3B6E", "#FFFFFF");
    /// Pure red and blue.
    pub const SATURATED: FlagColors = FlagColors::preset_of("#FF0000", "#FFFFFF", "#0000FF", "#FFFFFF");
    /// For printing or engraving in two tones.
    pub const BLACK_AND_GREY: FlagColors = FlagColors::preset_of("#000000", "#888888", "#000000", "#888888");

    const fn preset_of(
        outer_stripes: &'static str,
        inner_stripes: &'static str,
        canton: &'static str,
        stars: &'static str,
    ) -> Self {
        Self {
            outer_stripes: Cow::Borrowed(outer_stripes),
            inner_stripes: Cow::Borrowed(inner_stripes),
            canton: Cow::Borrowed(canton),
            stars: Cow::Borrowed(stars),
        }
    }

    /// Custom colors, each checked against the SVG color grammar.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidColor`] for the first value that does not parse.
    pub fn new(
        outer_stripes: impl Into<String>,
        inner_stripes: impl Into<String>,
        canton: impl Into<String>,
        stars: impl Into<String>,
    ) -> Result<Self> {
        let colors = Self {
            outer_stripes: Cow::Owned(outer_stripes.into()),
            inner_stripes: Cow::Owned(inner_stripes.into()),
            canton: Cow::Owned(canton.into()),
            stars: Cow::Owned(stars.into()),
        };
        colors.validate()?;
        Ok(colors)
    }

    /// Check every color against the SVG color grammar.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidColor`] for the first value that does not parse.
    pub fn validate(&self) -> Result<()> {
        for value in [&self.outer_stripes, &self.inner_stripes, &self.canton, &self.stars] {
            svgtypes::Color::from_str(value).map_err(|e| Error::InvalidColor {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// The preset called `name`, if any.
    pub fn preset(name: &str) -> Option<FlagColors> {
        let wanted = name.trim().to_lowercase().replace('-', "_");
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == wanted)
            .map(|(_, colors)| colors.clone())
    }

    /// Name of the preset these colors equal, if any.
    pub fn preset_name(&self) -> Option<&'static str> {
        PRESETS.iter().find(|(_, colors)| colors == self).map(|(name, _)| *name)
    }

    /// Whether these are the traditional colors.
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for FlagColors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FlagColors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.outer_stripes, self.inner_stripes, self.canton, self.stars
        )
    }
}

/// Named presets, in listing order.
pub static PRESETS: [(&str, FlagColors); 3] = [
    ("default", FlagColors::DEFAULT),
    ("saturated", FlagColors::SATURATED),
    ("black_and_grey", FlagColors::BLACK_AND_GREY),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_by_name() {
        assert_eq!(FlagColors::preset("default"), Some(FlagColors::DEFAULT));
        assert_eq!(FlagColors::preset("Black-And-Grey"), Some(FlagColors::BLACK_AND_GREY));
        assert_eq!(FlagColors::preset("neon"), None);
    }

    #[test]
    fn presets_are_valid_colors() {
        for (name, colors) in &PRESETS {
            colors.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(colors.preset_name(), Some(*name));
        }
    }

    #[test]
    fn custom_colors() {
        let colors = FlagColors::new("red", "rgb(255, 255, 255)", "#00f", "white").unwrap();
        assert!(!colors.is_default());
        assert_eq!(colors.preset_name(), None);

        let owned_default = FlagColors::new("#B22234", "#FFFFFF", "#3C3B6E", "#FFFFFF").unwrap();
        assert!(owned_default.is_default());
    }

    #[test]
    fn invalid_color_is_rejected() {
        let err = FlagColors::new("red", "not-a-color", "blue", "white").unwrap_err();
        assert!(matches!(err, Error::InvalidColor { ref value, .. } if value == "not-a-color"));
    }
}
