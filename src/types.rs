//! Shared types used across viirscat.
//! Includes `DatasetType` with its required band-file tables, `DuplicatePolicy`,
//! and the structured `Diagnostic` values collected while scanning and cataloging.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Band-type codes that make up a complete day/night band granule
pub const DNB_BANDS: &[&str] = &["SVDNB", "GDNBO"];

/// Band-type codes that make up a complete imagery (I-band) granule
pub const IBAND_BANDS: &[&str] = &["SVI01", "SVI02", "SVI03", "SVI04", "SVI05", "GITCO"];

/// Band-type codes that make up a complete moderate-resolution (M-band) granule
pub const MBAND_BANDS: &[&str] = &[
    "SVM01", "SVM02", "SVM03", "SVM04", "SVM05", "SVM06", "SVM07", "SVM08", "SVM09", "SVM10",
    "SVM11", "SVM12", "SVM13", "SVM14", "SVM15", "SVM16", "GMTCO",
];

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    Dnb,
    Iband,
    Mband,
}

impl DatasetType {
    pub const ALL: [DatasetType; 3] = [DatasetType::Dnb, DatasetType::Iband, DatasetType::Mband];

    pub fn label(self) -> &'static str {
        match self {
            DatasetType::Dnb => "dnb",
            DatasetType::Iband => "iband",
            DatasetType::Mband => "mband",
        }
    }

    /// Band-type codes that must all be present for this dataset to be complete
    pub fn required_bands(self) -> &'static [&'static str] {
        match self {
            DatasetType::Dnb => DNB_BANDS,
            DatasetType::Iband => IBAND_BANDS,
            DatasetType::Mband => MBAND_BANDS,
        }
    }

    fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for DatasetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DatasetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dnb" => Ok(DatasetType::Dnb),
            "iband" => Ok(DatasetType::Iband),
            "mband" => Ok(DatasetType::Mband),
            _ => Err(Error::UnknownDatasetType {
                label: s.to_string(),
                valid: Self::valid_labels(),
            }),
        }
    }
}

/// What to do when two files of one granule carry the same band-type code
#[derive(
    Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The file listed last (in sorted order) replaces the earlier one
    #[default]
    Overwrite,
    /// The first file listed is kept, later ones are ignored
    KeepFirst,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::Overwrite => write!(f, "overwrite"),
            DuplicatePolicy::KeepFirst => write!(f, "keep_first"),
        }
    }
}

/// Non-fatal findings reported alongside scan and catalog results
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A file with the data suffix whose name does not parse
    FilenameMismatch { scene: String, file: String },
    /// Data-file count in a scene is not a multiple of the per-granule count
    FileCountMismatch {
        scene: String,
        count: usize,
        expected_multiple: usize,
    },
    /// Two files of the same granule share a band-type code
    DuplicateBand {
        granule: String,
        ftype: String,
        kept: String,
        dropped: String,
    },
    /// A required band-type code is absent for a granule
    MissingBand {
        granule: String,
        dataset: DatasetType,
        band: String,
    },
    /// Opening or reading the imagery file of a granule failed
    RasterAccess { granule: String, message: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FilenameMismatch { scene, file } => {
                write!(f, "{}: skipping non-conforming data file {}", scene, file)
            }
            Diagnostic::FileCountMismatch {
                scene,
                count,
                expected_multiple,
            } => write!(
                f,
                "Some data files are missing in {}: {} is not divisible by {}",
                scene, count, expected_multiple
            ),
            Diagnostic::DuplicateBand {
                granule,
                ftype,
                kept,
                dropped,
            } => write!(
                f,
                "{}: duplicate {} files, kept {} and dropped {}",
                granule, ftype, kept, dropped
            ),
            Diagnostic::MissingBand {
                granule,
                dataset,
                band,
            } => write!(
                f,
                "{}: detected missing band {} for dataset {}",
                granule, band, dataset
            ),
            Diagnostic::RasterAccess { granule, message } => {
                write!(f, "cannot access data file for I-band in {}: {}", granule, message)
            }
        }
    }
}
