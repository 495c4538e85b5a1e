use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{DuplicatePolicy, IBAND_BANDS};

/// Scan and catalog parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogParams {
    /// Row/column stride used when sampling the swath perimeter
    pub footprint_step: usize,
    /// Expected number of data files per granule (DNB + I-band + M-band files)
    pub files_per_granule: usize,
    /// Suffix identifying data files in a scene directory
    pub data_suffix: String,
    /// Name of the optional subdirectory holding the data files
    pub sdr_subdir: String,
    /// Band-type code of the imagery file opened for metadata and footprint
    pub imagery_band: String,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for CatalogParams {
    fn default() -> Self {
        Self {
            footprint_step: 50,
            files_per_granule: 25,
            data_suffix: ".h5".to_string(),
            sdr_subdir: "sdr".to_string(),
            imagery_band: "SVI01".to_string(),
            duplicate_policy: DuplicatePolicy::Overwrite,
        }
    }
}

impl CatalogParams {
    /// Load parameters from a JSON file; absent keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let params = serde_json::from_str(&text)?;
        Ok(params)
    }

    /// Reject values the scanners cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.footprint_step == 0 {
            return Err(Error::InvalidArgument {
                arg: "footprint_step",
                value: "0".to_string(),
            });
        }
        if self.files_per_granule == 0 {
            return Err(Error::InvalidArgument {
                arg: "files_per_granule",
                value: "0".to_string(),
            });
        }
        // imagery must be an SVInn band of the I-band set, not its geolocation file
        let is_imagery = IBAND_BANDS
            .iter()
            .any(|band| band.starts_with("SVI") && *band == self.imagery_band);
        if !is_imagery {
            return Err(Error::InvalidArgument {
                arg: "imagery_band",
                value: self.imagery_band.clone(),
            });
        }
        Ok(())
    }
}
