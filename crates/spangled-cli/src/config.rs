//! YAML flag configuration files.
//!
//! Every field is optional; missing ones keep the library defaults.
//!
//! ```yaml
//! nstripes: 13
//! proportional_stars: true
//! canton_factor: "247/175"
//! kinds: [grid, short-sandwich]
//! palette: saturated
//! width: 950
//! max_value: 16777216
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use spangled::{FlagColors, FlagConfig, Taxonomy};

use crate::cli::common::{parse_kinds, parse_palette, parse_rational};

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub nstripes: Option<u32>,
    pub proportional_stars: Option<bool>,
    /// A fraction such as `"247/175"`.
    pub canton_factor: Option<String>,
    pub kinds: Option<Vec<String>>,
    pub taxonomy: Option<TaxonomyName>,
    pub include_cubes: Option<bool>,
    /// Preset name; `colors` wins if both are given.
    pub palette: Option<String>,
    pub colors: Option<ColorsConfig>,
    pub width: Option<Size>,
    pub height: Option<Size>,
    pub max_value: Option<u64>,
    /// Never round: ignore `max_value`.
    pub exact: Option<bool>,
    pub more_precise: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyName {
    Extended,
    Quincunx,
}

impl From<TaxonomyName> for Taxonomy {
    fn from(name: TaxonomyName) -> Self {
        match name {
            TaxonomyName::Extended => Taxonomy::Extended,
            TaxonomyName::Quincunx => Taxonomy::Quincunx,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsConfig {
    pub outer_stripes: String,
    pub inner_stripes: String,
    pub canton: String,
    pub stars: String,
}

/// A document size, written bare (`950`) or with units (`"19cm"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    Number(f64),
    Text(String),
}

impl Size {
    fn to_attribute(&self) -> String {
        match self {
            Size::Number(n) => n.to_string(),
            Size::Text(text) => text.clone(),
        }
    }
}

impl FileConfig {
    /// Load a config from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Overwrite the fields of `config` this file sets.
    pub fn apply(&self, config: &mut FlagConfig) -> Result<()> {
        if let Some(nstripes) = self.nstripes {
            config.nstripes = nstripes;
        }
        if let Some(proportional) = self.proportional_stars {
            config.proportional_stars = proportional;
        }
        if let Some(factor) = &self.canton_factor {
            config.canton_factor = parse_rational(factor).context("canton_factor")?;
        }
        if let Some(kinds) = &self.kinds {
            config.kinds = Some(parse_kinds(&kinds.join(",")).context("kinds")?);
        }
        if let Some(taxonomy) = self.taxonomy {
            config.taxonomy = taxonomy.into();
        }
        if let Some(cubes) = self.include_cubes {
            config.include_cubes = cubes;
        }
        if let Some(palette) = &self.palette {
            config.render.colors = parse_palette(palette).context("palette")?;
        }
        if let Some(colors) = &self.colors {
            config.render.colors = FlagColors::new(
                colors.outer_stripes.clone(),
                colors.inner_stripes.clone(),
                colors.canton.clone(),
                colors.stars.clone(),
            )
            .context("colors")?;
        }
        if let Some(width) = &self.width {
            config.render.width = Some(width.to_attribute());
        }
        if let Some(height) = &self.height {
            config.render.height = Some(height.to_attribute());
        }
        if let Some(max_value) = self.max_value {
            config.render.normalization.max_value = Some(max_value);
        }
        if self.exact == Some(true) {
            config.render.normalization.max_value = None;
        }
        if let Some(more_precise) = self.more_precise {
            config.render.normalization.more_precise = more_precise;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spangled::{ArrangementKind, Rational};

    fn parse(yaml: &str) -> Result<FlagConfig> {
        let file: FileConfig = serde_yaml::from_str(yaml)?;
        let mut config = FlagConfig::default();
        file.apply(&mut config)?;
        Ok(config)
    }

    #[test]
    fn empty_file_keeps_defaults() {
        assert_eq!(parse("{}").unwrap(), FlagConfig::default());
    }

    #[test]
    fn every_field() {
        let config = parse(
            r#"
nstripes: 7
proportional_stars: true
canton_factor: "3/2"
kinds: [grid, pagoda]
taxonomy: quincunx
include_cubes: true
palette: black_and_grey
width: 950
max_value: 1000000
more_precise: false
"#,
        )
        .unwrap();
        assert_eq!(config.nstripes, 7);
        assert!(config.proportional_stars);
        assert_eq!(config.canton_factor, Rational::new(3.into(), 2.into()));
        assert_eq!(config.kinds, Some(vec![ArrangementKind::Grid, ArrangementKind::Pagoda]));
        assert_eq!(config.taxonomy, Taxonomy::Quincunx);
        assert!(config.include_cubes);
        assert_eq!(config.render.colors, FlagColors::BLACK_AND_GREY);
        assert_eq!(config.render.width.as_deref(), Some("950"));
        assert_eq!(config.render.normalization.max_value, Some(1_000_000));
        assert!(!config.render.normalization.more_precise);
    }

    #[test]
    fn custom_colors_and_sizes_with_units() {
        let config = parse(
            r#"
colors:
  outer_stripes: red
  inner_stripes: white
  canton: navy
  stars: white
height: 10cm
exact: true
"#,
        )
        .unwrap();
        assert_eq!(config.render.colors.canton, "navy");
        assert_eq!(config.render.height.as_deref(), Some("10cm"));
        assert_eq!(config.render.normalization.max_value, None);
    }

    #[test]
    fn mistakes_are_reported() {
        assert!(parse("stripes: 13").is_err());
        assert!(parse("canton_factor: \"wide\"").is_err());
        assert!(parse("palette: neon").is_err());
        assert!(parse("taxonomy: minimal").is_err());
    }
}
