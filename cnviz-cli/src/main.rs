use anyhow::{bail, Context, Result};
use clap::Parser;
use cnviz::{cna_plot, genome, load_cna_table, palette, CnaPlotConfig, TableColumns};
use log::info;

/// cnviz: render genome-wide copy-number scatterplots from tabular CNV calls
#[derive(Parser)]
#[command(
    name = "cnviz",
    version,
    about = "Render genome-wide copy-number scatterplots from tabular CNV calls"
)]
struct Cli {
    /// Input table (CSV; a .tsv extension switches to tab-delimited)
    #[arg(long)]
    input: String,

    /// Column holding the genomic position (x axis)
    #[arg(long)]
    x: String,

    /// Column holding the raw copy-ratio measurement (y axis)
    #[arg(long)]
    y: String,

    /// Optional column holding segmented copy-number calls; the table must
    /// then also carry a boolean change_point column
    #[arg(long)]
    y2: Option<String>,

    /// Column holding the chromosome label
    #[arg(long, default_value = "chrom")]
    chrom_col: String,

    /// Comma-separated chromosome subset, panels in the given order
    /// (default: all 24 in genome order)
    #[arg(long)]
    chroms: Option<String>,

    /// Restrict panels to chromosomes present in the input
    #[arg(long, default_value_t = false)]
    present_only: bool,

    /// Output image path (.svg, or .png with the png feature)
    #[arg(long)]
    out: String,

    /// Figure width in pixels
    #[arg(long, default_value_t = 2400)]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Scatter point radius in pixels
    #[arg(long, default_value_t = 2)]
    point_size: u32,

    /// Panel border line style (e.g. "dashed", "long dash with offset")
    #[arg(long, default_value = "long dash with offset")]
    linestyle: String,

    /// Named palette for panel colors (deep, muted, pastel, dark,
    /// colorblind); default alternates black and dark gray
    #[arg(long)]
    palette: Option<String>,

    /// Neutral segment color, hex like '#00c853' or a basic color name
    #[arg(long)]
    segment_color: Option<String>,

    /// Shared y-axis range as 'lo,hi'
    #[arg(long, default_value = "0,400")]
    ylim: String,

    /// Sample purity in (0, 1]
    #[arg(long, default_value_t = 1.0)]
    purity: f64,

    /// Overall figure title
    #[arg(long)]
    title: Option<String>,
}

fn parse_ylim(raw: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = raw.split(',').map(|s| s.trim()).collect();
    if parts.len() != 2 {
        bail!("--ylim expects 'lo,hi', got '{}'", raw);
    }
    let lo: f64 = parts[0]
        .parse()
        .with_context(|| format!("bad ylim bound '{}'", parts[0]))?;
    let hi: f64 = parts[1]
        .parse()
        .with_context(|| format!("bad ylim bound '{}'", parts[1]))?;
    if lo >= hi {
        bail!("--ylim range is empty: {} >= {}", lo, hi);
    }
    Ok((lo, hi))
}

fn parse_chrom_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut columns = TableColumns::new(&cli.x, &cli.y).with_chrom(&cli.chrom_col);
    if let Some(y2) = &cli.y2 {
        columns = columns.with_segment(y2);
    }

    let bins = load_cna_table(&cli.input, &columns)?;
    info!("loaded {} bins from {}", bins.len(), cli.input);

    let chromosomes = if let Some(raw) = &cli.chroms {
        Some(parse_chrom_list(raw))
    } else if cli.present_only {
        Some(genome::present_chromosomes(&bins))
    } else {
        None
    };

    let segment_color = cli
        .segment_color
        .as_deref()
        .map(palette::parse_color)
        .transpose()?;

    let config = CnaPlotConfig {
        width: cli.width,
        height: cli.height,
        chromosomes,
        draw_segments: cli.y2.is_some(),
        linestyle: cli.linestyle.clone(),
        palette: cli.palette.clone(),
        segment_color,
        ylim: parse_ylim(&cli.ylim)?,
        purity: cli.purity,
        title: cli.title.clone(),
        point_size: cli.point_size,
    };

    cna_plot(&bins, &cli.out, &config)?;
    info!("wrote {}", cli.out);
    Ok(())
}
