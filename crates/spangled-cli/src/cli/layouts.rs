//! Layouts command implementation.

use anyhow::{Context, Result};
use num_traits::ToPrimitive;
use serde::Serialize;

use spangled::{ScoredLayout, Taxonomy};

use super::common::{OutputFormat, parse_args, parse_number, write_output};

/// A ranked layout in JSON output format.
#[derive(Serialize)]
struct JsonLayout {
    rank: usize,
    layout: [u32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    /// Exact score, as a fraction.
    score: String,
    score_approx: f64,
}

#[derive(Serialize)]
struct JsonOutput {
    nstars: u32,
    canton_factor: String,
    layouts: Vec<JsonLayout>,
}

/// Execute the layouts command: every arrangement for a star count, best first.
pub fn cmd_layouts(args: &[String]) -> Result<()> {
    let invocation = parse_args(args)?;
    let nstars: u32 = parse_number("star count", invocation.positional(0, "star count")?)?;

    let mut ranked = invocation
        .config
        .ranked_layouts(nstars)
        .with_context(|| format!("no layouts for {nstars} stars"))?;
    if let Some(limit) = invocation.limit {
        ranked.truncate(limit);
    }

    let taxonomy = invocation.config.taxonomy;
    let output = match invocation.format {
        OutputFormat::Json => {
            let json = JsonOutput {
                nstars,
                canton_factor: invocation.config.canton_factor.to_string(),
                layouts: ranked.iter().enumerate().map(|(i, scored)| to_json(i + 1, scored, taxonomy)).collect(),
            };
            let mut text = serde_json::to_string_pretty(&json)?;
            text.push('\n');
            text
        }
        OutputFormat::Text => to_table(nstars, &ranked, taxonomy),
    };

    write_output(invocation.output.as_deref(), &output)
}

fn to_json(rank: usize, scored: &ScoredLayout, taxonomy: Taxonomy) -> JsonLayout {
    let layout = scored.layout;
    JsonLayout {
        rank,
        layout: [layout.a, layout.b, layout.c, layout.d],
        kind: taxonomy.classify(layout).ok().map(|kind| kind.name()),
        score: scored.score.to_string(),
        score_approx: scored.score.to_f64().unwrap_or(f64::NAN),
    }
}

fn to_table(nstars: u32, ranked: &[ScoredLayout], taxonomy: Taxonomy) -> String {
    let mut table = format!("Layouts for {nstars} stars (best first):\n");
    table.push_str(&format!("  {:>4}  {:<18} {:<15} {:>10}\n", "rank", "layout", "kind", "score"));
    for (i, scored) in ranked.iter().enumerate() {
        let kind = taxonomy.classify(scored.layout).map(|k| k.name()).unwrap_or("?");
        table.push_str(&format!(
            "  {:>4}  {:<18} {:<15} {:>10.4}\n",
            i + 1,
            scored.layout.to_string(),
            kind,
            scored.score.to_f64().unwrap_or(f64::NAN)
        ));
    }
    table
}
