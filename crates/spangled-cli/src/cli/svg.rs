//! Svg command implementation.

use anyhow::{Context, Result};
use tracing::info;

use spangled::get_svg;

use super::common::{parse_args, parse_number, write_output};

/// Execute the svg command: draw the best flag for a star count.
pub fn cmd_svg(args: &[String]) -> Result<()> {
    let invocation = parse_args(args)?;
    let nstars: u32 = parse_number("star count", invocation.positional(0, "star count")?)?;

    let svg = get_svg(nstars, &invocation.config)
        .with_context(|| format!("cannot draw a flag with {nstars} stars"))?;
    info!(nstars, bytes = svg.len(), "generated flag");

    write_output(invocation.output.as_deref(), &svg)
}
