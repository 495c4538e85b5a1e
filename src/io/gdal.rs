//! GDAL-backed swath access for VIIRS SDR HDF5 files. GDAL flattens HDF5 group
//! attributes into the default metadata domain, so items are looked up by suffix
//! (e.g. `..._VIIRS-I1-SDR_Aggr_AggregateBeginningOrbitNumber`).
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use gdal::{Dataset, Metadata};
use ndarray::Array2;
use tracing::{debug, info};

use crate::core::filename::DataFileName;
use crate::io::swath::{Geolocation, RasterError, Swath, SwathMetadata, SwathReader};

const GRANULE_ID_KEY: &str = "AggregateBeginningGranuleID";
const ORBIT_NUMBER_KEY: &str = "AggregateBeginningOrbitNumber";
const BEGINNING_DATE_KEY: &str = "AggregateBeginningDate";
const BEGINNING_TIME_KEY: &str = "AggregateBeginningTime";
const ASCENDING_KEY: &str = "Descending_Indicator";
const GEO_REF_KEY: &str = "N_GEO_Ref";

/// Geolocation band-type codes for imagery granules, terrain-corrected first
const IMAGERY_GEO_TYPES: &[&str] = &["GITCO", "GIMGO"];

/// HDF5 group under `All_Data` holding the geolocation arrays of a geolocation product
fn geo_group(ftype: &str) -> Option<&'static str> {
    match ftype {
        "GITCO" => Some("VIIRS-IMG-GEO-TC_All"),
        "GIMGO" => Some("VIIRS-IMG-GEO_All"),
        "GMTCO" => Some("VIIRS-MOD-GEO-TC_All"),
        "GMODO" => Some("VIIRS-MOD-GEO_All"),
        "GDNBO" => Some("VIIRS-DNB-GEO_All"),
        _ => None,
    }
}

/// Items of a dataset's default metadata domain
fn collect_metadata(dataset: &Dataset) -> HashMap<String, String> {
    let mut metadata_map = HashMap::new();
    if let Some(entries) = dataset.metadata_domain("") {
        for entry in entries {
            if let Some((key, val)) = entry.split_once('=') {
                metadata_map.insert(key.to_string(), val.trim().to_string());
            }
        }
    }
    metadata_map
}

/// Value of the first metadata item whose key ends with `suffix`
fn find_item<'a>(metadata: &'a HashMap<String, String>, suffix: &str) -> Option<&'a str> {
    let mut keys: Vec<&String> = metadata.keys().filter(|k| k.ends_with(suffix)).collect();
    keys.sort();
    keys.first().map(|k| metadata[*k].as_str())
}

fn require_item<'a>(
    metadata: &'a HashMap<String, String>,
    key: &'static str,
) -> Result<&'a str, RasterError> {
    find_item(metadata, key).ok_or(RasterError::MissingMetadata(key))
}

/// Parse the aggregate metadata of a VIIRS SDR file from its flattened GDAL metadata
pub fn parse_swath_metadata(
    metadata: &HashMap<String, String>,
) -> Result<SwathMetadata, RasterError> {
    let granule_id = require_item(metadata, GRANULE_ID_KEY)?.to_string();
    let orbit_str = require_item(metadata, ORBIT_NUMBER_KEY)?;
    let orbit_number = orbit_str
        .parse::<u64>()
        .map_err(|_| RasterError::InvalidValue {
            key: ORBIT_NUMBER_KEY,
            value: orbit_str.to_string(),
        })?;
    let beginning_date = require_item(metadata, BEGINNING_DATE_KEY)?.to_string();
    let beginning_time = require_item(metadata, BEGINNING_TIME_KEY)?.to_string();

    // 0 = ascending, 1 = descending
    let ascending_str = require_item(metadata, ASCENDING_KEY)?;
    let ascending_node = match ascending_str {
        "0" => true,
        "1" => false,
        other => {
            return Err(RasterError::InvalidValue {
                key: ASCENDING_KEY,
                value: other.to_string(),
            });
        }
    };

    Ok(SwathMetadata {
        granule_id,
        orbit_number,
        beginning_date,
        beginning_time,
        ascending_node,
    })
}

/// Read the single band of a 2D dataset (e.g. an HDF5 subdataset) into an f64 array
fn read_array(name: &str) -> Result<Array2<f64>, RasterError> {
    let dataset = Dataset::open(Path::new(name))?;
    let (size_x, size_y) = dataset.raster_size();
    let band = dataset.rasterband(1)?;
    let window = (size_x, size_y);
    let buf = band.read_as::<f64>((0, 0), window, window, None)?;
    let data_vec = buf.data().to_vec();
    let len = data_vec.len();
    Array2::from_shape_vec((size_y, size_x), data_vec)
        .map_err(|_| RasterError::DimensionMismatch(size_y, size_x, len))
}

/// An imagery granule opened through GDAL
pub struct GdalSwath {
    path: PathBuf,
    dataset: Option<Dataset>,
    metadata: HashMap<String, String>,
}

impl GdalSwath {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(RasterError::NotFound(path));
        }
        let dataset = Dataset::open(&path)?;
        let metadata = collect_metadata(&dataset);
        debug!("Opened {:?} with {} metadata items", path, metadata.len());
        Ok(Self {
            path,
            dataset: Some(dataset),
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Geolocation file of this granule: the `N_GEO_Ref` target if it exists next to
    /// the imagery file, otherwise a sibling GITCO/GIMGO file with the same granule stamp
    pub fn geolocation_file(&self) -> Result<(PathBuf, &'static str), RasterError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));

        if let Some(reference) = find_item(&self.metadata, GEO_REF_KEY) {
            let candidate = dir.join(reference);
            if let Some(group) = DataFileName::parse(reference).and_then(|f| geo_group(&f.ftype)) {
                if candidate.is_file() {
                    return Ok((candidate, group));
                }
            }
        }

        let own_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let own = DataFileName::parse(&own_name)
            .ok_or_else(|| RasterError::NoGeolocation(self.path.clone()))?;

        let mut siblings: Vec<(usize, PathBuf, &'static str)> = Vec::new();
        for entry in fs::read_dir(dir).map_err(|_| RasterError::NoGeolocation(self.path.clone()))? {
            let Ok(entry) = entry else { continue };
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(fname) = DataFileName::parse(&name) else { continue };
            let Some(rank) = IMAGERY_GEO_TYPES.iter().position(|t| *t == fname.ftype) else {
                continue;
            };
            if fname.granule_key() == own.granule_key() && fname.orbit == own.orbit {
                if let Some(group) = geo_group(&fname.ftype) {
                    siblings.push((rank, entry.path(), group));
                }
            }
        }
        siblings.sort();
        siblings
            .into_iter()
            .next()
            .map(|(_, path, group)| (path, group))
            .ok_or_else(|| RasterError::NoGeolocation(self.path.clone()))
    }
}

impl Swath for GdalSwath {
    fn metadata(&self) -> Result<SwathMetadata, RasterError> {
        parse_swath_metadata(&self.metadata)
    }

    fn geolocation(&self) -> Result<Geolocation, RasterError> {
        let (geo_path, group) = self.geolocation_file()?;
        info!("Reading geolocation from {:?}", geo_path);
        let subdataset = |var: &str| {
            format!("HDF5:\"{}\"://All_Data/{}/{}", geo_path.display(), group, var)
        };
        let lats = read_array(&subdataset("Latitude"))?;
        let lons = read_array(&subdataset("Longitude"))?;
        Geolocation::new(lats, lons)
    }

    fn close(mut self: Box<Self>) -> Result<(), RasterError> {
        if let Some(dataset) = self.dataset.take() {
            drop(dataset);
            debug!("Closed {:?}", self.path);
        }
        Ok(())
    }
}

/// `SwathReader` opening VIIRS SDR HDF5 files through GDAL
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalSwathReader;

impl SwathReader for GdalSwathReader {
    fn open(&self, path: &Path) -> Result<Box<dyn Swath>, RasterError> {
        Ok(Box::new(GdalSwath::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> HashMap<String, String> {
        let prefix = "Data_Products_VIIRS-I1-SDR_VIIRS-I1-SDR_Aggr_";
        let mut meta = HashMap::new();
        meta.insert(
            format!("{prefix}AggregateBeginningGranuleID"),
            "NPP001212345678".to_string(),
        );
        meta.insert(format!("{prefix}AggregateBeginningOrbitNumber"), "39315".to_string());
        meta.insert(format!("{prefix}AggregateBeginningDate"), "20190615".to_string());
        meta.insert(format!("{prefix}AggregateBeginningTime"), "120012.345678Z".to_string());
        let gran = "Data_Products_VIIRS-I1-SDR_VIIRS-I1-SDR_Gran_0_";
        meta.insert(format!("{gran}Ascending/Descending_Indicator"), "1".to_string());
        meta
    }

    #[test]
    fn metadata_items_found_by_suffix() {
        let parsed = parse_swath_metadata(&sample_metadata()).unwrap();
        assert_eq!(parsed.granule_id, "NPP001212345678");
        assert_eq!(parsed.orbit_number, 39315);
        assert_eq!(parsed.beginning_time, "120012.345678Z");
        assert!(!parsed.ascending_node);
    }

    #[test]
    fn missing_orbit_is_reported() {
        let mut meta = sample_metadata();
        meta.retain(|k, _| !k.ends_with(ORBIT_NUMBER_KEY));
        assert!(matches!(
            parse_swath_metadata(&meta),
            Err(RasterError::MissingMetadata(ORBIT_NUMBER_KEY))
        ));
    }

    #[test]
    fn geolocation_groups() {
        assert_eq!(geo_group("GITCO"), Some("VIIRS-IMG-GEO-TC_All"));
        assert_eq!(geo_group("SVI01"), None);
    }
}
