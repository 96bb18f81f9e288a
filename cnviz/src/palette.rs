//! Panel color sequences.

use anyhow::{anyhow, Result};
use plotters::style::RGBColor;

/// Default alternation for unpaletted panels: black / dark gray by parity.
const PANEL_EVEN: RGBColor = RGBColor(0x00, 0x00, 0x00);
const PANEL_ODD: RGBColor = RGBColor(0x61, 0x61, 0x61);

const DEEP: &[RGBColor] = &[
    RGBColor(0x4C, 0x72, 0xB0),
    RGBColor(0xDD, 0x84, 0x52),
    RGBColor(0x55, 0xA8, 0x68),
    RGBColor(0xC4, 0x4E, 0x52),
    RGBColor(0x81, 0x72, 0xB3),
    RGBColor(0x93, 0x78, 0x60),
    RGBColor(0xDA, 0x8B, 0xC3),
    RGBColor(0x8C, 0x8C, 0x8C),
    RGBColor(0xCC, 0xB9, 0x74),
    RGBColor(0x64, 0xB5, 0xCD),
];

const MUTED: &[RGBColor] = &[
    RGBColor(0x48, 0x78, 0xD0),
    RGBColor(0xEE, 0x85, 0x4A),
    RGBColor(0x6A, 0xCC, 0x64),
    RGBColor(0xD6, 0x5F, 0x5F),
    RGBColor(0x95, 0x6C, 0xB4),
    RGBColor(0x8C, 0x61, 0x3C),
    RGBColor(0xDC, 0x7E, 0xC0),
    RGBColor(0x79, 0x79, 0x79),
    RGBColor(0xD5, 0xBB, 0x67),
    RGBColor(0x82, 0xC6, 0xE2),
];

const PASTEL: &[RGBColor] = &[
    RGBColor(0xA1, 0xC9, 0xF4),
    RGBColor(0xFF, 0xB4, 0x82),
    RGBColor(0x8D, 0xE5, 0xA1),
    RGBColor(0xFF, 0x9F, 0x9B),
    RGBColor(0xD0, 0xBB, 0xFF),
    RGBColor(0xDE, 0xBB, 0x9B),
    RGBColor(0xFA, 0xB0, 0xE4),
    RGBColor(0xCF, 0xCF, 0xCF),
    RGBColor(0xFF, 0xFE, 0xA3),
    RGBColor(0xB9, 0xF2, 0xF0),
];

const DARK: &[RGBColor] = &[
    RGBColor(0x00, 0x1C, 0x7F),
    RGBColor(0xB1, 0x40, 0x0D),
    RGBColor(0x12, 0x71, 0x1C),
    RGBColor(0x8C, 0x08, 0x00),
    RGBColor(0x59, 0x1E, 0x71),
    RGBColor(0x59, 0x2F, 0x0D),
    RGBColor(0xA2, 0x35, 0x82),
    RGBColor(0x3C, 0x3C, 0x3C),
    RGBColor(0xB8, 0x85, 0x0A),
    RGBColor(0x00, 0x63, 0x74),
];

const COLORBLIND: &[RGBColor] = &[
    RGBColor(0x01, 0x73, 0xB2),
    RGBColor(0xDE, 0x8F, 0x05),
    RGBColor(0x02, 0x9E, 0x73),
    RGBColor(0xD5, 0x5E, 0x00),
    RGBColor(0xCC, 0x78, 0xBC),
    RGBColor(0xCA, 0x91, 0x61),
    RGBColor(0xFB, 0xAF, 0xE4),
    RGBColor(0x94, 0x94, 0x94),
    RGBColor(0xEC, 0xE1, 0x33),
    RGBColor(0x56, 0xB4, 0xE9),
];

/// A color sequence of length `n` for the panel row.
///
/// With no palette name, panels alternate black and dark gray by index
/// parity; with a named palette the base colors are cycled out to `n`.
pub fn panel_colors(name: Option<&str>, n: usize) -> Result<Vec<RGBColor>> {
    let base: &[RGBColor] = match name {
        None => {
            return Ok((0..n)
                .map(|i| if i % 2 == 0 { PANEL_EVEN } else { PANEL_ODD })
                .collect());
        }
        Some("deep") => DEEP,
        Some("muted") => MUTED,
        Some("pastel") => PASTEL,
        Some("dark") => DARK,
        Some("colorblind") => COLORBLIND,
        Some(other) => return Err(anyhow!("unknown palette '{}'", other)),
    };
    Ok((0..n).map(|i| base[i % base.len()]).collect())
}

/// Parse a `#RRGGBB` hex color or one of a few basic color names.
pub fn parse_color(raw: &str) -> Result<RGBColor> {
    match raw.trim().to_lowercase().as_str() {
        "black" => return Ok(RGBColor(0, 0, 0)),
        "white" => return Ok(RGBColor(255, 255, 255)),
        "red" => return Ok(RGBColor(255, 0, 0)),
        "green" => return Ok(RGBColor(0, 128, 0)),
        "blue" => return Ok(RGBColor(0, 0, 255)),
        "gray" | "grey" => return Ok(RGBColor(128, 128, 128)),
        "orange" => return Ok(RGBColor(255, 165, 0)),
        "purple" => return Ok(RGBColor(128, 0, 128)),
        _ => {}
    }
    let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("cannot parse color '{}'", raw));
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    Ok(RGBColor(channel(0..2), channel(2..4), channel(4..6)))
}
