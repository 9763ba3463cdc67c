//! Inspect command implementation.
//!
//! Streams through a generated flag with quick-xml, without building a
//! tree, and reports what was drawn.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result, bail};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::Serialize;

use super::common::{OutputFormat, parse_args, write_output};

/// What a flag document contains.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct FlagSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub rects: usize,
    pub paths: usize,
    pub uses: usize,
    /// Drawn star paths plus their `<use>` copies.
    pub stars: usize,
    /// Fill color -> number of elements using it.
    pub fill_colors: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

/// Streaming analyzer for flag documents.
#[derive(Default)]
struct FlagAnalyzer {
    summary: FlagSummary,
    star_ids: Vec<String>,
}

impl FlagAnalyzer {
    fn analyze(mut self, content: &str) -> Result<FlagSummary> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut seen_svg = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    seen_svg |= e.name().as_ref() == b"svg";
                    self.process_element(e)?;
                }
                Ok(Event::Comment(comment)) => {
                    let text = String::from_utf8_lossy(&comment).trim().to_string();
                    if let Some(generator) = text.strip_prefix("Created with ") {
                        self.summary.generator = Some(generator.to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => bail!("XML parse error at position {}: {}", reader.error_position(), e),
                Ok(_) => {}
            }
        }

        if !seen_svg {
            bail!("not an SVG document");
        }
        Ok(self.summary)
    }

    fn process_element(&mut self, e: &BytesStart) -> Result<()> {
        let mut id = None;
        let mut href = None;
        let mut fill = None;
        for attr in e.attributes() {
            let attr = attr.context("malformed attribute")?;
            let value = attr.unescape_value().context("malformed attribute value")?.into_owned();
            match attr.key.as_ref() {
                b"id" => id = Some(value),
                b"href" | b"xlink:href" => href = Some(value),
                b"fill" => fill = Some(value),
                b"viewBox" => self.summary.view_box = parse_view_box(&value),
                b"width" if e.name().as_ref() == b"svg" => self.summary.width = Some(value),
                b"height" if e.name().as_ref() == b"svg" => self.summary.height = Some(value),
                _ => {}
            }
        }

        match e.name().as_ref() {
            b"rect" => self.summary.rects += 1,
            b"path" => {
                self.summary.paths += 1;
                // Every path of a generated flag is a star.
                self.summary.stars += 1;
                if let Some(id) = &id {
                    self.star_ids.push(id.clone());
                }
            }
            b"use" => {
                self.summary.uses += 1;
                let target = href.as_deref().and_then(|h| h.strip_prefix('#'));
                if target.is_some_and(|t| self.star_ids.iter().any(|id| id == t)) {
                    self.summary.stars += 1;
                }
            }
            _ => {}
        }

        if let Some(fill) = fill {
            *self.summary.fill_colors.entry(fill.to_lowercase()).or_insert(0) += 1;
        }
        Ok(())
    }
}

fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let parts: Vec<f64> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    parts.try_into().ok()
}

/// Summarize SVG content.
pub fn summarize(content: &str) -> Result<FlagSummary> {
    FlagAnalyzer::default().analyze(content)
}

/// Execute the inspect command.
pub fn cmd_inspect(args: &[String]) -> Result<()> {
    let invocation = parse_args(args)?;
    let path = invocation.positional(0, "SVG file")?;
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let summary = summarize(&content).with_context(|| format!("cannot inspect {path}"))?;

    let output = match invocation.format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&summary)?;
            text.push('\n');
            text
        }
        OutputFormat::Text => to_report(path, &summary),
    };
    write_output(invocation.output.as_deref(), &output)
}

fn to_report(path: &str, summary: &FlagSummary) -> String {
    let mut report = format!("{path}\n");
    if let Some([x, y, w, h]) = summary.view_box {
        report.push_str(&format!("  viewBox:  {x} {y} {w} {h}\n"));
    }
    if let Some(width) = &summary.width {
        report.push_str(&format!("  width:    {width}\n"));
    }
    if let Some(height) = &summary.height {
        report.push_str(&format!("  height:   {height}\n"));
    }
    report.push_str(&format!("  rects:    {}\n", summary.rects));
    report.push_str(&format!("  paths:    {}\n", summary.paths));
    report.push_str(&format!("  uses:     {}\n", summary.uses));
    report.push_str(&format!("  stars:    {}\n", summary.stars));
    report.push_str("  fills:\n");
    for (color, count) in &summary.fill_colors {
        report.push_str(&format!("    {color:<10} {count}\n"));
    }
    if let Some(generator) = &summary.generator {
        report.push_str(&format!("  created with {generator}\n"));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use spangled::{FlagConfig, get_svg};

    #[test]
    fn summary_of_the_fifty_star_flag() {
        let svg = get_svg(50, &FlagConfig::default()).unwrap();
        let summary = summarize(&svg).unwrap();
        assert_eq!(summary.view_box, Some([0.0, 0.0, 7410.0, 3900.0]));
        assert_eq!(summary.height.as_deref(), Some("100%"));
        assert_eq!(summary.rects, 3);
        assert_eq!(summary.paths, 1);
        assert_eq!(summary.stars, 50);
        assert_eq!(summary.uses, 54);
        assert_eq!(summary.fill_colors["#ffffff"], 2);
        assert_eq!(summary.fill_colors["#b22234"], 1);
        assert_eq!(summary.generator.as_deref(), Some("spangled"));
    }

    #[test]
    fn rejects_non_svg() {
        assert!(summarize("<html></html>").is_err());
        assert!(summarize("<svg><rect></svg>").is_err());
    }

    #[test]
    fn view_box_parsing() {
        assert_eq!(parse_view_box("0 0 10 20"), Some([0.0, 0.0, 10.0, 20.0]));
        assert_eq!(parse_view_box("0,0,10,20"), Some([0.0, 0.0, 10.0, 20.0]));
        assert_eq!(parse_view_box("0 0 10"), None);
    }
}
