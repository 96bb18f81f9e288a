//! Genome-wide copy-number scatterplot rendering.
//!
//! One panel per chromosome, laid out side by side with zero spacing and
//! widths proportional to the reference chromosome weights, so the panel row
//! reads as a continuous genome axis. Each panel carries a low-opacity
//! scatter of raw ploidy values and, optionally, segmented copy-number lines
//! colored by their gain/loss/neutral call.

use crate::calls::{split_segments, CallThresholds, CnaCall};
use crate::genome;
use crate::linestyle::{dash_pattern, DashPattern};
use crate::output::OutputFormat;
use crate::palette;
use crate::{CnaBin, CnaPlotConfig};
use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::ops::Range;
use std::path::Path;

/// Gain/loss/neutral line colors (matplotlib's named red/blue/green).
const GAIN_COLOR: RGBColor = RGBColor(255, 0, 0);
const LOSS_COLOR: RGBColor = RGBColor(0, 0, 255);
const NEUTRAL_COLOR: RGBColor = RGBColor(0, 128, 0);

const AXIS_COLOR: RGBColor = RGBColor(100, 100, 100);

/// One chromosome panel, fully resolved for rendering.
#[derive(Debug)]
struct PanelData {
    chrom: String,
    ratio: f64,
    color: RGBColor,
    /// (position, ploidy) scatter points, already rebased to 2N.
    points: Vec<(f64, f64)>,
    /// Segment polylines with their classified call.
    segments: Vec<SegmentLine>,
    x_range: (f64, f64),
    /// Median position, where the chromosome label goes.
    label_x: f64,
}

#[derive(Debug)]
struct SegmentLine {
    call: CnaCall,
    points: Vec<(f64, f64)>,
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Resolve panels, width ratios, colors, and call classification.
///
/// The caller's bins are read-only: the 2N rescale happens into the panel
/// working copies, never in place.
fn prepare_cna_data(bins: &[CnaBin], config: &CnaPlotConfig) -> Result<Vec<PanelData>> {
    let chrom_list = match &config.chromosomes {
        Some(list) if list.is_empty() => anyhow::bail!("empty chromosome list"),
        Some(list) => list.clone(),
        None => genome::reference_chromosomes(),
    };
    let ratios = genome::panel_ratios(&chrom_list)?;
    let colors = palette::panel_colors(config.palette.as_deref(), chrom_list.len())?;
    let thresholds = CallThresholds::from_purity(config.purity)?;

    let mut panels = Vec::with_capacity(chrom_list.len());
    for ((chrom, ratio), color) in chrom_list.into_iter().zip(ratios).zip(colors) {
        let rows: Vec<&CnaBin> = bins.iter().filter(|b| b.chrom == chrom).collect();

        // Rebase relative copy ratios to absolute ploidy in a diploid context.
        let points: Vec<(f64, f64)> = rows.iter().map(|b| (b.pos, b.copy_ratio * 2.0)).collect();

        let segments = if config.draw_segments {
            build_segments(&rows, &chrom, &thresholds)?
        } else {
            Vec::new()
        };

        let x_range = match points
            .iter()
            .map(|&(x, _)| x)
            .fold(None, |acc: Option<(f64, f64)>, x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            }) {
            // A zero-width range would collapse the coordinate mapping.
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
            None => (0.0, 1.0),
        };
        let label_x = if points.is_empty() {
            (x_range.0 + x_range.1) / 2.0
        } else {
            median(points.iter().map(|&(x, _)| x).collect())
        };

        panels.push(PanelData {
            chrom,
            ratio,
            color,
            points,
            segments,
            x_range,
            label_x,
        });
    }
    Ok(panels)
}

fn build_segments(
    rows: &[&CnaBin],
    chrom: &str,
    thresholds: &CallThresholds,
) -> Result<Vec<SegmentLine>> {
    let flags: Vec<bool> = rows
        .iter()
        .map(|b| {
            b.change_point.ok_or_else(|| {
                anyhow!("bin at {}:{} has no change_point flag; the segment overlay needs one per bin", chrom, b.pos)
            })
        })
        .collect::<Result<_>>()?;

    let segment_value = |b: &CnaBin| -> Result<f64> {
        b.segment_mean
            .map(|v| v * 2.0)
            .ok_or_else(|| anyhow!("bin at {}:{} has no segment value", chrom, b.pos))
    };

    let mut segments = Vec::new();
    for run in split_segments(&flags) {
        let seg_rows = &rows[run];
        // The run's first value decides the call for the whole line.
        let call = thresholds.classify(segment_value(seg_rows[0])?);
        let points = seg_rows
            .iter()
            .map(|&b| Ok((b.pos, segment_value(b)?)))
            .collect::<Result<Vec<_>>>()?;
        segments.push(SegmentLine { call, points });
    }
    Ok(segments)
}

/// Render a genome-wide CNV scatterplot to `output_path`.
///
/// The format is chosen by file extension: SVG by default, PNG with the
/// `png` feature. The input bins are not modified.
pub fn cna_plot<P: AsRef<Path>>(
    bins: &[CnaBin],
    output_path: P,
    config: &CnaPlotConfig,
) -> Result<()> {
    let output_path = output_path.as_ref();

    if bins.is_empty() {
        anyhow::bail!("No CNV bins to plot");
    }

    let pattern = dash_pattern(&config.linestyle)?;
    let panels = prepare_cna_data(bins, config)?;

    match OutputFormat::from_path(output_path)? {
        OutputFormat::Svg => draw_cna_svg(output_path, &panels, config, &pattern),
        #[cfg(feature = "png")]
        OutputFormat::Png => draw_cna_png(output_path, &panels, config, &pattern),
        #[cfg(not(feature = "png"))]
        OutputFormat::Png => anyhow::bail!("PNG output requires the 'png' feature"),
    }
}

fn draw_cna_svg(
    output_path: &Path,
    panels: &[PanelData],
    config: &CnaPlotConfig,
    pattern: &DashPattern,
) -> Result<()> {
    let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();

    draw_cna_impl(&root, panels, config, pattern).context("Failed to draw CNV plot")?;

    root.present().context("Failed to write SVG")?;
    Ok(())
}

#[cfg(feature = "png")]
fn draw_cna_png(
    output_path: &Path,
    panels: &[PanelData],
    config: &CnaPlotConfig,
    pattern: &DashPattern,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();

    draw_cna_impl(&root, panels, config, pattern).context("Failed to draw CNV plot")?;

    root.present().context("Failed to write PNG")?;
    Ok(())
}

fn draw_cna_impl<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    panels: &[PanelData],
    config: &CnaPlotConfig,
    pattern: &DashPattern,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let area = match &config.title {
        Some(title) => root.titled(title, ("sans-serif", 20).into_font())?,
        None => root.clone(),
    };

    // Pixel breakpoints proportional to the chromosome width ratios; the
    // panels touch, emulating a continuous genome axis.
    let (width, _) = area.dim_in_pixel();
    let total: f64 = panels.iter().map(|p| p.ratio).sum();
    let mut breaks: Vec<i32> = Vec::with_capacity(panels.len().saturating_sub(1));
    let mut acc = 0.0;
    for panel in &panels[..panels.len() - 1] {
        acc += panel.ratio;
        breaks.push(((acc / total) * width as f64).round() as i32);
    }
    let panel_areas = area.split_by_breakpoints(&breaks[..], &[] as &[i32]);

    let neutral = config.segment_color.unwrap_or(NEUTRAL_COLOR);
    let (y0, y1) = config.ylim;

    for (i, (panel, panel_area)) in panels.iter().zip(panel_areas.iter()).enumerate() {
        let leftmost = i == 0;
        let (x0, x1) = panel.x_range;

        let mut chart = ChartBuilder::on(panel_area)
            .x_label_area_size(42)
            .y_label_area_size(if leftmost { 56 } else { 0 })
            .build_cartesian_2d(x0..x1, y0..y1)?;

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh().disable_x_axis();
        if leftmost {
            mesh.y_desc("Ploidy")
                .y_label_style(("sans-serif", 12).into_font())
                .axis_desc_style(("sans-serif", 14).into_font())
                .axis_style(&AXIS_COLOR);
        } else {
            mesh.disable_y_axis();
        }
        mesh.draw()?;

        chart.draw_series(panel.points.iter().map(|&(x, y)| {
            Circle::new((x, y), config.point_size as i32, panel.color.mix(0.2).filled())
        }))?;

        for segment in &panel.segments {
            let color = match segment.call {
                CnaCall::Gain => GAIN_COLOR,
                CnaCall::Loss => LOSS_COLOR,
                CnaCall::Neutral => neutral,
            };
            chart.draw_series(LineSeries::new(
                segment.points.iter().copied(),
                color.mix(0.7).stroke_width(2),
            ))?;
        }

        // A single rotated chromosome name stands in for x-axis ticks.
        chart.draw_series(std::iter::once(Text::new(
            panel.chrom.clone(),
            (panel.label_x, y0 - (y1 - y0) * 0.06),
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;

        // Faint dashed side borders hint at continuity across panels.
        let (px, py) = chart.plotting_area().get_pixel_range();
        let border = BLACK.mix(0.3).stroke_width(1);
        draw_dashed_vline(root, px.start, py.clone(), pattern, &border)?;
        draw_dashed_vline(root, px.end, py, pattern, &border)?;
    }

    Ok(())
}

/// Draw a vertical line at pixel column `x`, walking the dash pattern.
fn draw_dashed_vline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: i32,
    ys: Range<i32>,
    pattern: &DashPattern,
    style: &ShapeStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if pattern.is_solid() {
        area.draw(&PathElement::new(vec![(x, ys.start), (x, ys.end)], *style))?;
        return Ok(());
    }

    let mut y = ys.start - pattern.offset as i32;
    let mut run_index = 0;
    let mut pen_down = true;
    while y < ys.end {
        let run = pattern.dashes[run_index % pattern.dashes.len()] as i32;
        let end = (y + run).min(ys.end);
        if pen_down && end > ys.start {
            area.draw(&PathElement::new(
                vec![(x, y.max(ys.start)), (x, end)],
                *style,
            ))?;
        }
        y += run;
        run_index += 1;
        pen_down = !pen_down;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(chrom: &str, pos: f64, ratio: f64) -> CnaBin {
        CnaBin {
            chrom: chrom.to_string(),
            pos,
            copy_ratio: ratio,
            segment_mean: None,
            change_point: None,
        }
    }

    fn seg_bin(chrom: &str, pos: f64, ratio: f64, seg: f64, change: bool) -> CnaBin {
        CnaBin {
            chrom: chrom.to_string(),
            pos,
            copy_ratio: ratio,
            segment_mean: Some(seg),
            change_point: Some(change),
        }
    }

    #[test]
    fn default_panel_list_covers_all_24_chromosomes() {
        let bins = vec![bin("chr1", 100.0, 1.0)];
        let panels = prepare_cna_data(&bins, &CnaPlotConfig::default()).unwrap();
        assert_eq!(panels.len(), 24);
        assert_eq!(panels[0].chrom, "chr1");
        assert_eq!(panels[23].chrom, "chrY");
        // Chromosomes absent from the data still get an (empty) panel.
        assert!(panels[1].points.is_empty());
        assert_eq!(panels[1].x_range, (0.0, 1.0));
    }

    #[test]
    fn subset_panels_keep_given_order_and_ratios() {
        let bins = vec![bin("chr2", 10.0, 1.0), bin("chrX", 20.0, 1.0)];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chrX".to_string(), "chr2".to_string()]),
            ..Default::default()
        };
        let panels = prepare_cna_data(&bins, &config).unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].chrom, "chrX");
        assert_eq!(panels[0].ratio, 3.0);
        assert_eq!(panels[1].chrom, "chr2");
        assert_eq!(panels[1].ratio, 5.0);
    }

    #[test]
    fn points_are_rebased_to_2n_without_mutating_input() {
        let bins = vec![bin("chr1", 100.0, 0.5), bin("chr1", 200.0, 1.5)];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chr1".to_string()]),
            ..Default::default()
        };
        let panels = prepare_cna_data(&bins, &config).unwrap();
        assert_eq!(panels[0].points, vec![(100.0, 1.0), (200.0, 3.0)]);
        assert_eq!(bins[0].copy_ratio, 0.5);
        assert_eq!(bins[1].copy_ratio, 1.5);
    }

    #[test]
    fn x_range_and_label_position_follow_the_data() {
        let bins = vec![
            bin("chr1", 300.0, 1.0),
            bin("chr1", 100.0, 1.0),
            bin("chr1", 200.0, 1.0),
        ];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chr1".to_string()]),
            ..Default::default()
        };
        let panels = prepare_cna_data(&bins, &config).unwrap();
        assert_eq!(panels[0].x_range, (100.0, 300.0));
        assert_eq!(panels[0].label_x, 200.0);
    }

    #[test]
    fn unknown_chromosome_is_an_error() {
        let bins = vec![bin("chr1", 100.0, 1.0)];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chr23".to_string()]),
            ..Default::default()
        };
        let err = prepare_cna_data(&bins, &config).unwrap_err();
        assert!(err.to_string().contains("chr23"));
    }

    #[test]
    fn segments_are_split_and_classified() {
        // Two runs split by the change point at pos 300; the flagged bin
        // itself belongs to neither.
        let bins = vec![
            seg_bin("chr1", 100.0, 0.25, 0.25, false),
            seg_bin("chr1", 200.0, 0.25, 0.25, false),
            seg_bin("chr1", 300.0, 1.75, 1.75, true),
            seg_bin("chr1", 400.0, 1.75, 1.75, false),
            seg_bin("chr1", 500.0, 1.75, 1.75, false),
        ];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chr1".to_string()]),
            draw_segments: true,
            ..Default::default()
        };
        let panels = prepare_cna_data(&bins, &config).unwrap();
        let segments = &panels[0].segments;
        assert_eq!(segments.len(), 2);
        // 0.25 doubles to 0.5 -> loss; 1.75 doubles to 3.5 -> gain.
        assert_eq!(segments[0].call, CnaCall::Loss);
        assert_eq!(segments[0].points, vec![(100.0, 0.5), (200.0, 0.5)]);
        assert_eq!(segments[1].call, CnaCall::Gain);
        assert_eq!(segments[1].points.len(), 2);
    }

    #[test]
    fn neutral_segment_classification() {
        let bins = vec![
            seg_bin("chr1", 100.0, 1.0, 1.0, false),
            seg_bin("chr1", 200.0, 1.0, 1.0, false),
        ];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chr1".to_string()]),
            draw_segments: true,
            ..Default::default()
        };
        let panels = prepare_cna_data(&bins, &config).unwrap();
        assert_eq!(panels[0].segments[0].call, CnaCall::Neutral);
    }

    #[test]
    fn segment_overlay_without_flags_is_an_error() {
        let bins = vec![bin("chr1", 100.0, 1.0)];
        let config = CnaPlotConfig {
            chromosomes: Some(vec!["chr1".to_string()]),
            draw_segments: true,
            ..Default::default()
        };
        let err = prepare_cna_data(&bins, &config).unwrap_err();
        assert!(err.to_string().contains("change_point"));
    }

    #[test]
    fn empty_chromosome_list_is_an_error() {
        let bins = vec![bin("chr1", 100.0, 1.0)];
        let config = CnaPlotConfig {
            chromosomes: Some(Vec::new()),
            ..Default::default()
        };
        assert!(prepare_cna_data(&bins, &config).is_err());
    }

    #[test]
    fn median_of_even_and_odd_counts() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 2.0, 3.0]), 2.5);
    }
}
