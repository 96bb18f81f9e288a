//! Output format detection for rendered figures.

use anyhow::{anyhow, Result};
use std::path::Path;

/// Supported image formats, chosen by output file extension.
/// A path without an extension defaults to SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("svg")
            .to_lowercase();
        match ext.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(anyhow!("unsupported output format: {}", other)),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.svg")).unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("bare")).unwrap(), OutputFormat::Svg);
        assert!(OutputFormat::from_path(Path::new("a/b.pdf")).is_err());
    }

    #[test]
    fn extensions_round_trip() {
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }
}
