//! cnviz: genome-wide copy-number scatterplots
//!
//! This crate renders copy-number-variation (CNV) profiles as a row of
//! per-chromosome panels with widths proportional to chromosome length.
//! Raw ploidy measurements are drawn as low-opacity points; an optional
//! segmentation overlay is drawn as piecewise lines colored by their
//! gain/loss/neutral call.
//!
//! ## Features
//! - Per-chromosome panels in karyotype order, or any requested subset
//! - Segment overlay classified against purity-scaled thresholds
//! - SVG output (default)
//! - PNG output (optional, requires `png` feature)
//!
//! ## Example
//! ```ignore
//! use cnviz::{cna_plot, load_cna_table, CnaPlotConfig, TableColumns};
//!
//! let columns = TableColumns::new("pos", "ratio").with_segment("seg_mean");
//! let bins = load_cna_table("sample.cnv.csv", &columns)?;
//! let config = CnaPlotConfig { draw_segments: true, ..Default::default() };
//! cna_plot(&bins, "sample.svg", &config)?;
//! ```

pub mod calls;
pub mod genome;
pub mod linestyle;
pub mod output;
pub mod palette;
pub mod plot;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use plotters::style::RGBColor;
use std::path::Path;

/// One genomic bin of a CNV profile.
///
/// `copy_ratio` is the raw relative measurement (1.0 = diploid); the plot
/// rebases it to absolute ploidy. `segment_mean` and `change_point` are only
/// needed when a segmentation overlay is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CnaBin {
    pub chrom: String,
    pub pos: f64,
    pub copy_ratio: f64,
    pub segment_mean: Option<f64>,
    pub change_point: Option<bool>,
}

/// Column names mapping a caller's table onto [`CnaBin`] fields.
///
/// `pos` and `copy_ratio` are required; requesting `segment` also requires
/// the boolean change-point column to be present in the table.
#[derive(Debug, Clone)]
pub struct TableColumns {
    pub chrom: String,
    pub pos: String,
    pub copy_ratio: String,
    pub segment: Option<String>,
    pub change_point: String,
}

impl TableColumns {
    pub fn new(pos: &str, copy_ratio: &str) -> Self {
        Self {
            chrom: "chrom".to_string(),
            pos: pos.to_string(),
            copy_ratio: copy_ratio.to_string(),
            segment: None,
            change_point: "change_point".to_string(),
        }
    }

    /// Request the segmentation overlay column.
    pub fn with_segment(mut self, segment: &str) -> Self {
        self.segment = Some(segment.to_string());
        self
    }

    /// Override the chromosome label column (default `chrom`).
    pub fn with_chrom(mut self, chrom: &str) -> Self {
        self.chrom = chrom.to_string();
        self
    }
}

fn find_col(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn require_col(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    find_col(headers, name)
        .ok_or_else(|| anyhow!("column '{}' not found in {}", name, path.display()))
}

fn parse_f64_cell(raw: &str, column: &str, row: usize) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| anyhow!("row {}: cannot parse '{}' in column '{}' as a number", row, raw, column))
}

fn parse_bool_cell(raw: &str, column: &str, row: usize) -> Result<bool> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Ok(false)
    } else {
        Err(anyhow!("row {}: cannot parse '{}' in column '{}' as a boolean", row, raw, column))
    }
}

/// Load a CNV table from a delimited file (`.tsv` switches to tab-delimited).
///
/// Columns are resolved by header name against `columns`; a missing required
/// column is an error. When `columns.segment` is set, the change-point column
/// must also be present.
pub fn load_cna_table<P: AsRef<Path>>(path: P, columns: &TableColumns) -> Result<Vec<CnaBin>> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("reading headers from {}", path.display()))?
        .clone();

    let chrom_idx = require_col(&headers, &columns.chrom, path)?;
    let pos_idx = require_col(&headers, &columns.pos, path)?;
    let ratio_idx = require_col(&headers, &columns.copy_ratio, path)?;
    let segment_idx = match &columns.segment {
        Some(name) => Some(require_col(&headers, name, path)?),
        None => None,
    };
    // The change-point column is mandatory alongside a segment column, and
    // picked up opportunistically otherwise.
    let change_idx = if segment_idx.is_some() {
        Some(require_col(&headers, &columns.change_point, path)?)
    } else {
        find_col(&headers, &columns.change_point)
    };

    let mut bins = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading row {} of {}", row, path.display()))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let segment_mean = match segment_idx {
            Some(idx) => Some(parse_f64_cell(cell(idx), columns.segment.as_deref().unwrap_or(""), row)?),
            None => None,
        };
        let change_point = match change_idx {
            Some(idx) => Some(parse_bool_cell(cell(idx), &columns.change_point, row)?),
            None => None,
        };

        bins.push(CnaBin {
            chrom: cell(chrom_idx).trim().to_string(),
            pos: parse_f64_cell(cell(pos_idx), &columns.pos, row)?,
            copy_ratio: parse_f64_cell(cell(ratio_idx), &columns.copy_ratio, row)?,
            segment_mean,
            change_point,
        });
    }

    Ok(bins)
}

/// Configuration for plot appearance.
#[derive(Debug, Clone)]
pub struct CnaPlotConfig {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Chromosome subset and panel order (None = all 24 in genome order)
    pub chromosomes: Option<Vec<String>>,
    /// Draw the segmentation overlay (requires segment values and
    /// change-point flags on every plotted bin)
    pub draw_segments: bool,
    /// Panel border line style name, e.g. "dashed"
    pub linestyle: String,
    /// Named palette for panel colors; None alternates black / dark gray
    pub palette: Option<String>,
    /// Override for the neutral segment color (default green)
    pub segment_color: Option<RGBColor>,
    /// Shared y-axis range applied to every panel
    pub ylim: (f64, f64),
    /// Sample purity in (0, 1]; scales the gain/loss call thresholds
    pub purity: f64,
    /// Overall figure title
    pub title: Option<String>,
    /// Scatter point radius in pixels
    pub point_size: u32,
}

impl Default for CnaPlotConfig {
    fn default() -> Self {
        Self {
            width: 2400,
            height: 300,
            chromosomes: None,
            draw_segments: false,
            linestyle: "long dash with offset".to_string(),
            palette: None,
            segment_color: None,
            ylim: (0.0, 400.0),
            purity: 1.0,
            title: None,
            point_size: 2,
        }
    }
}

// Re-export main entry points
pub use calls::{CallThresholds, CnaCall};
pub use plot::cna_plot;
