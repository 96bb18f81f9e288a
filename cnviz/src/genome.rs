//! Reference genome layout tables.

use crate::CnaBin;
use anyhow::{anyhow, Result};

/// Reference chromosomes in karyotype order, each with a relative panel
/// width weight approximating chromosome length.
const REF_CHROMOSOMES: &[(&str, f64)] = &[
    ("chr1", 5.0),
    ("chr2", 5.0),
    ("chr3", 4.0),
    ("chr4", 4.0),
    ("chr5", 4.0),
    ("chr6", 4.0),
    ("chr7", 3.0),
    ("chr8", 3.0),
    ("chr9", 3.0),
    ("chr10", 3.0),
    ("chr11", 3.0),
    ("chr12", 3.0),
    ("chr13", 2.0),
    ("chr14", 2.0),
    ("chr15", 2.0),
    ("chr16", 2.0),
    ("chr17", 2.0),
    ("chr18", 2.0),
    ("chr19", 1.0),
    ("chr20", 1.0),
    ("chr21", 1.0),
    ("chr22", 1.0),
    ("chrX", 3.0),
    ("chrY", 0.5),
];

/// The 24 reference chromosome labels in karyotype order.
pub fn reference_chromosomes() -> Vec<String> {
    REF_CHROMOSOMES.iter().map(|(c, _)| (*c).to_string()).collect()
}

/// Relative panel width for one chromosome.
pub fn width_ratio(chrom: &str) -> Result<f64> {
    REF_CHROMOSOMES
        .iter()
        .find(|(c, _)| *c == chrom)
        .map(|(_, w)| *w)
        .ok_or_else(|| anyhow!("unknown chromosome '{}'", chrom))
}

/// Resolve width ratios for a panel list, order preserved as given.
pub fn panel_ratios(chroms: &[String]) -> Result<Vec<f64>> {
    chroms.iter().map(|c| width_ratio(c)).collect()
}

/// Reference chromosomes that actually occur in `bins`, in karyotype order.
pub fn present_chromosomes(bins: &[CnaBin]) -> Vec<String> {
    REF_CHROMOSOMES
        .iter()
        .filter(|(c, _)| bins.iter().any(|b| b.chrom == *c))
        .map(|(c, _)| (*c).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_order_and_count() {
        let chroms = reference_chromosomes();
        assert_eq!(chroms.len(), 24);
        assert_eq!(chroms[0], "chr1");
        assert_eq!(chroms[21], "chr22");
        assert_eq!(chroms[22], "chrX");
        assert_eq!(chroms[23], "chrY");
    }

    #[test]
    fn width_ratios_match_reference_table() {
        assert_eq!(width_ratio("chr1").unwrap(), 5.0);
        assert_eq!(width_ratio("chr12").unwrap(), 3.0);
        assert_eq!(width_ratio("chr22").unwrap(), 1.0);
        assert_eq!(width_ratio("chrX").unwrap(), 3.0);
        assert_eq!(width_ratio("chrY").unwrap(), 0.5);
    }

    #[test]
    fn unknown_chromosome_is_an_error() {
        assert!(width_ratio("chr23").is_err());
        assert!(width_ratio("1").is_err());
    }

    #[test]
    fn panel_ratios_preserve_given_order() {
        let chroms = vec!["chrX".to_string(), "chr1".to_string(), "chrY".to_string()];
        let ratios = panel_ratios(&chroms).unwrap();
        assert_eq!(ratios, vec![3.0, 5.0, 0.5]);
    }

    #[test]
    fn present_chromosomes_follow_reference_order() {
        let bin = |chrom: &str| CnaBin {
            chrom: chrom.to_string(),
            pos: 0.0,
            copy_ratio: 1.0,
            segment_mean: None,
            change_point: None,
        };
        let bins = vec![bin("chrX"), bin("chr2"), bin("chr2"), bin("chr10")];
        let present = present_chromosomes(&bins);
        assert_eq!(present, vec!["chr2", "chr10", "chrX"]);
    }
}
