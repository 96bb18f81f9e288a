//! Copy-number call classification.

use anyhow::{bail, Result};
use std::ops::Range;

/// Diploid ploidy baseline the call thresholds are centered on.
pub const PLOIDY_BASELINE: f64 = 2.0;

/// Copy-number state of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CnaCall {
    Loss,
    Neutral,
    Gain,
}

/// Neutral-band limits around the diploid baseline, scaled by sample purity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallThresholds {
    pub lower: f64,
    pub upper: f64,
}

impl CallThresholds {
    /// Derive thresholds from sample purity, the fraction of material
    /// assumed to carry the called state. Must lie in (0, 1].
    pub fn from_purity(purity: f64) -> Result<Self> {
        if !(purity > 0.0 && purity <= 1.0) {
            bail!("purity must lie in (0, 1], got {}", purity);
        }
        let half = PLOIDY_BASELINE / 2.0;
        Ok(Self {
            lower: PLOIDY_BASELINE - half * purity,
            upper: PLOIDY_BASELINE + half * purity,
        })
    }

    /// Classify a segment's ploidy-scale value.
    pub fn classify(&self, ploidy: f64) -> CnaCall {
        if ploidy <= self.lower {
            CnaCall::Loss
        } else if ploidy >= self.upper {
            CnaCall::Gain
        } else {
            CnaCall::Neutral
        }
    }
}

/// Split rows into change-point-delimited runs of indices.
///
/// A flagged row is the boundary itself and belongs to no run; the implicit
/// final run ends at the last row. Runs emptied by consecutive change points
/// are dropped. Callers read a run's call value from its first row (first
/// value wins; uniformity within a run is not validated).
pub fn split_segments(change_points: &[bool]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for (i, &flag) in change_points.iter().enumerate() {
        if flag {
            if i > start {
                runs.push(start..i);
            }
            start = i + 1;
        }
    }
    if change_points.len() > start {
        runs.push(start..change_points.len());
    }
    runs
}
