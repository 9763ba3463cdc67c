//! Measure command implementation.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use spangled::{Arrangement, IntMeasurements, Measurements};

use super::common::{OutputFormat, parse_args, write_output};

/// One dimension, exact and normalized.
#[derive(Serialize)]
struct JsonField {
    name: &'static str,
    exact: String,
    normalized: String,
}

#[derive(Serialize)]
struct JsonOutput {
    layout: [u32; 4],
    kind: &'static str,
    nstripes: u32,
    fields: Vec<JsonField>,
    /// `null` when every check passes.
    check: Option<String>,
}

/// Execute the measure command: the flag specification for one arrangement.
///
/// The positional argument is an arrangement (`5,6,4,5`) or a star count,
/// in which case the best arrangement for it is measured.
pub fn cmd_measure(args: &[String]) -> Result<()> {
    let invocation = parse_args(args)?;
    let target = invocation.positional(0, "arrangement (a,b,c,d) or star count")?;
    let config = &invocation.config;

    let layout = match target.parse::<u32>() {
        Ok(nstars) => config.best_layout(nstars)?.layout,
        Err(_) => target.parse::<Arrangement>().map_err(|e| anyhow!(e))?,
    };
    let kind = config.taxonomy.classify(layout)?;

    let exact = config
        .measurements(layout)
        .with_context(|| format!("cannot measure {layout}"))?;
    let normalized = exact.normalize_with(&config.render.normalization);
    let check = exact.check().err().map(|e| e.to_string());

    let output = match invocation.format {
        OutputFormat::Json => {
            let json = JsonOutput {
                layout: [layout.a, layout.b, layout.c, layout.d],
                kind: kind.name(),
                nstripes: config.nstripes,
                fields: exact
                    .named()
                    .zip(normalized.values())
                    .map(|((name, exact), normalized)| JsonField {
                        name,
                        exact: exact.to_string(),
                        normalized: normalized.to_string(),
                    })
                    .collect(),
                check,
            };
            let mut text = serde_json::to_string_pretty(&json)?;
            text.push('\n');
            text
        }
        OutputFormat::Text => to_table(layout, kind.name(), &exact, &normalized, check.as_deref()),
    };

    write_output(invocation.output.as_deref(), &output)
}

fn to_table(
    layout: Arrangement,
    kind: &str,
    exact: &Measurements,
    normalized: &IntMeasurements,
    check: Option<&str>,
) -> String {
    let mut table = format!("Measurements for {layout} ({kind}):\n");
    for ((name, exact), normalized) in exact.named().zip(normalized.values()) {
        table.push_str(&format!("  {name:<24} {:>20} {:>12}\n", exact.to_string(), normalized.to_string()));
    }
    match check {
        None => table.push_str("Check: ok\n"),
        Some(problem) => table.push_str(&format!("Check: {problem}\n")),
    }
    table
}
