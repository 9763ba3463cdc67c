//! Kinds command implementation.

use anyhow::Result;

use spangled::{ArrangementKind, PRESETS};

use super::common::write_output;

/// Execute the kinds command: list arrangement kinds and color palettes.
pub fn cmd_kinds() -> Result<()> {
    let mut listing = String::from("Arrangement kinds:\n");
    for kind in ArrangementKind::all() {
        listing.push_str(&format!("  {:<16} {}\n", kind.name(), kind.description()));
    }
    listing.push_str("\nPalettes:\n");
    for (name, colors) in &PRESETS {
        listing.push_str(&format!("  {name:<16} {colors}\n"));
    }
    write_output(None, &listing)
}
