//! Named dash patterns for panel border styling.
//!
//! Plotters strokes have no dash support, so the renderer walks the pattern
//! itself when drawing borders.

use anyhow::{anyhow, Result};

/// A dash pattern: a leading offset plus alternating on/off run lengths,
/// all in pixels. An empty `dashes` list is a solid line.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    pub offset: u32,
    pub dashes: Vec<u32>,
}

impl DashPattern {
    pub fn is_solid(&self) -> bool {
        self.dashes.is_empty() || self.dashes.iter().all(|&d| d == 0)
    }
}

/// Look up a dash pattern by its human-readable style name.
pub fn dash_pattern(name: &str) -> Result<DashPattern> {
    let (offset, dashes): (u32, &[u32]) = match name {
        "solid" => (0, &[]),
        "dotted" | "densely dotted" => (0, &[1, 1]),
        "loosely dotted" => (0, &[1, 10]),
        "dashed" => (0, &[5, 5]),
        "loosely dashed" => (0, &[5, 10]),
        "densely dashed" => (0, &[5, 1]),
        "long dash with offset" => (5, &[10, 3]),
        "dashdot" | "dashdotted" => (0, &[3, 5, 1, 5]),
        "loosely dashdotted" => (0, &[3, 10, 1, 10]),
        "densely dashdotted" => (0, &[3, 1, 1, 1]),
        "dashdotdotted" => (0, &[3, 5, 1, 5, 1, 5]),
        "loosely dashdotdotted" => (0, &[3, 10, 1, 10, 1, 10]),
        "densely dashdotdotted" => (0, &[3, 1, 1, 1, 1, 1]),
        _ => return Err(anyhow!("unknown linestyle '{}'", name)),
    };
    Ok(DashPattern {
        offset,
        dashes: dashes.to_vec(),
    })
}
