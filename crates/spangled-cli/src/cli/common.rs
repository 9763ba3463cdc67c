//! Argument handling shared by the commands.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use spangled::{ArrangementKind, FlagColors, FlagConfig, Rational, Taxonomy};

use crate::config::FileConfig;

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything the command line said, on top of the config file.
#[derive(Debug)]
pub struct Invocation {
    pub config: FlagConfig,
    pub positional: Vec<String>,
    pub output: Option<String>,
    pub format: OutputFormat,
    pub limit: Option<usize>,
}

impl Invocation {
    /// The `index`th positional argument, named `what` in the error.
    pub fn positional(&self, index: usize, what: &str) -> Result<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .with_context(|| format!("missing {what}"))
    }
}

/// Parse the flags every command understands.
///
/// `--config` is read first wherever it appears, so flags always override
/// the file.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut config = FlagConfig::default();
    if let Some(path) = flag_value(args, "--config") {
        FileConfig::load(Path::new(path))?.apply(&mut config)?;
    }

    let mut invocation = Invocation {
        config,
        positional: Vec::new(),
        output: None,
        format: OutputFormat::Text,
        limit: None,
    };

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .map(String::as_str)
                .with_context(|| format!("{arg} needs a value"))
        };
        let config = &mut invocation.config;
        match arg {
            "--config" => {
                value()?;
            }
            "-o" | "--output" => invocation.output = Some(value()?.to_string()),
            "--json" => invocation.format = OutputFormat::Json,
            "-n" | "--limit" => invocation.limit = Some(parse_number(arg, value()?)?),
            "-s" | "--stripes" => config.nstripes = parse_number(arg, value()?)?,
            "--proportional" => config.proportional_stars = true,
            "-f" | "--factor" => config.canton_factor = parse_rational(value()?)?,
            "-k" | "--kinds" => config.kinds = Some(parse_kinds(value()?)?),
            "--cubes" => config.include_cubes = true,
            "--quincunx" => config.taxonomy = Taxonomy::Quincunx,
            "-p" | "--palette" => config.render.colors = parse_palette(value()?)?,
            "--colors" => config.render.colors = parse_colors(value()?)?,
            "--width" => config.render.width = Some(value()?.to_string()),
            "--height" => config.render.height = Some(value()?.to_string()),
            "--max-value" => config.render.normalization.max_value = Some(parse_number(arg, value()?)?),
            "--exact" => config.render.normalization.max_value = None,
            "--round" => config.render.normalization.more_precise = false,
            _ if arg.starts_with('-') && arg.len() > 1 => bail!("unknown option: {arg}"),
            _ => invocation.positional.push(arg.to_string()),
        }
        i += 1;
    }

    check_kinds(&invocation.config)?;
    Ok(invocation)
}

/// Reject kind filters the chosen taxonomy can never report.
fn check_kinds(config: &FlagConfig) -> Result<()> {
    let Some(kinds) = &config.kinds else {
        return Ok(());
    };
    for kind in kinds {
        let reported = match kind {
            ArrangementKind::Quincunx => config.taxonomy == Taxonomy::Quincunx,
            ArrangementKind::SidePagoda | ArrangementKind::Cube => config.taxonomy == Taxonomy::Extended,
            _ => true,
        };
        if !reported {
            let hint = if config.taxonomy == Taxonomy::Extended {
                "pass --quincunx to classify equal-length rows as quincunx"
            } else {
                "equal-length rows are all quincunx under --quincunx"
            };
            bail!("kind {kind} never matches with this taxonomy; {hint}");
        }
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

pub fn parse_number<T: std::str::FromStr>(what: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{what}: {value:?} is not a valid number"))
}

/// `"247/175"` or a whole number.
pub fn parse_rational(value: &str) -> Result<Rational> {
    let ratio: Rational = value
        .trim()
        .parse()
        .with_context(|| format!("{value:?} is not a fraction like 247/175"))?;
    if ratio <= Rational::from_integer(0.into()) {
        bail!("the canton factor should be positive, got {value}");
    }
    Ok(ratio)
}

/// Comma-separated kind names.
pub fn parse_kinds(value: &str) -> Result<Vec<ArrangementKind>> {
    value
        .split(',')
        .map(|name| {
            ArrangementKind::from_name(name).with_context(|| {
                let known: Vec<_> = ArrangementKind::all().iter().map(|k| k.name()).collect();
                format!("unknown kind {name:?}, expected one of: {}", known.join(", "))
            })
        })
        .collect()
}

pub fn parse_palette(name: &str) -> Result<FlagColors> {
    FlagColors::preset(name).with_context(|| {
        let known: Vec<_> = spangled::PRESETS.iter().map(|(name, _)| *name).collect();
        format!("unknown palette {name:?}, expected one of: {}", known.join(", "))
    })
}

/// Four comma-separated colors: outer stripes, inner stripes, canton, stars.
pub fn parse_colors(value: &str) -> Result<FlagColors> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [outer, inner, canton, stars] = parts.as_slice() else {
        bail!("--colors needs four comma-separated colors, got {value:?}");
    };
    Ok(FlagColors::new(*outer, *inner, *canton, *stars)?)
}

/// Write to `path`, or stdout for `None` and `-`.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        None | Some("-") => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes()).context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {path}"))?;
            eprintln!("Wrote: {path}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_fill_the_config() {
        let parsed = parse_args(&args(&[
            "50", "--stripes", "7", "--proportional", "-k", "grid,pagoda", "--palette", "saturated", "--exact",
        ]))
        .unwrap();
        assert_eq!(parsed.positional, vec!["50"]);
        assert_eq!(parsed.config.nstripes, 7);
        assert!(parsed.config.proportional_stars);
        assert_eq!(parsed.config.kinds, Some(vec![ArrangementKind::Grid, ArrangementKind::Pagoda]));
        assert_eq!(parsed.config.render.colors, FlagColors::SATURATED);
        assert_eq!(parsed.config.render.normalization.max_value, None);
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse_args(&args(&["--stripes"])).is_err());
        assert!(parse_args(&args(&["--stripes", "many"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
        assert!(parse_args(&args(&["--kinds", "hexagon"])).is_err());
        assert!(parse_args(&args(&["--palette", "neon"])).is_err());
    }

    #[test]
    fn kinds_must_fit_the_taxonomy() {
        let err = parse_args(&args(&["49", "--kinds", "quincunx"])).unwrap_err();
        assert!(format!("{err:#}").contains("--quincunx"), "{err:#}");
        assert!(parse_args(&args(&["--quincunx", "--kinds", "side-pagoda"])).is_err());

        // Flag order does not matter.
        let parsed = parse_args(&args(&["--kinds", "quincunx,grid", "--quincunx"])).unwrap();
        assert_eq!(parsed.config.taxonomy, Taxonomy::Quincunx);
        assert_eq!(parsed.config.kinds, Some(vec![ArrangementKind::Quincunx, ArrangementKind::Grid]));
    }

    #[test]
    fn rationals() {
        assert_eq!(parse_rational("247/175").unwrap(), spangled::default_canton_factor());
        assert_eq!(parse_rational("2").unwrap(), Rational::from_integer(2.into()));
        assert!(parse_rational("0").is_err());
        assert!(parse_rational("1.4").is_err());
    }

    #[test]
    fn colors() {
        let colors = parse_colors("red, white, blue, white").unwrap();
        assert_eq!(colors.canton, "blue");
        assert!(parse_colors("red,white").is_err());
        assert!(parse_colors("red,white,blue,glitter").is_err());
    }
}
