use tracing::debug;

use crate::core::granules::Granule;
use crate::error::Result;
use crate::types::DatasetType;

/// Outcome of checking one granule against one dataset type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    /// First required band-type code that is absent or has an empty filename
    Missing(&'static str),
}

impl Completeness {
    pub fn is_complete(self) -> bool {
        matches!(self, Completeness::Complete)
    }
}

fn band_present(granule: &Granule, band: &str) -> bool {
    granule.get(band).is_some_and(|f| !f.is_empty())
}

/// Check required band files of `dataset`, stopping at the first missing one
pub fn check_granule(granule: &Granule, dataset: DatasetType) -> Completeness {
    for &band in dataset.required_bands() {
        if !band_present(granule, band) {
            debug!("detected missing band {} for {}", band, dataset);
            return Completeness::Missing(band);
        }
    }
    Completeness::Complete
}

/// Every required band-type code of `dataset` missing from `granule`
pub fn missing_bands(granule: &Granule, dataset: DatasetType) -> Vec<&'static str> {
    dataset
        .required_bands()
        .iter()
        .copied()
        .filter(|band| !band_present(granule, band))
        .collect()
}

/// Label-based check; `label` is matched case-insensitively against `dnb`, `iband`, `mband`
pub fn is_granule_complete(granule: &Granule, label: &str) -> Result<bool> {
    let dataset: DatasetType = label.parse()?;
    Ok(check_granule(granule, dataset).is_complete())
}
