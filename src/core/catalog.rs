//! Per-granule catalog: completeness for every dataset type, and for readable
//! imagery granules the granule ID, orbit, node and footprint polygon.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::completeness::{Completeness, check_granule};
use crate::core::footprint::extract_footprint;
use crate::core::granules::{Granule, SceneGranules, files_by_granule};
use crate::core::params::CatalogParams;
use crate::error::{Error, Result};
use crate::io::swath::{Swath, SwathMetadata, SwathReader};
use crate::types::{DatasetType, Diagnostic};

/// Catalog record of one granule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// `<date>_<start time>`
    pub granule: String,
    pub scene: String,
    /// Directory holding the granule's files
    pub data_dir: PathBuf,
    pub files: Granule,
    pub dnb_complete: bool,
    pub iband_complete: bool,
    pub mband_complete: bool,
    pub granule_id: Option<String>,
    pub orbit_number: Option<u64>,
    pub ascending_node: Option<bool>,
    /// I-band swath footprint as WKT polygon
    pub edge_polygon_i: Option<String>,
}

impl CatalogEntry {
    pub fn is_complete(&self, dataset: DatasetType) -> bool {
        match dataset {
            DatasetType::Dnb => self.dnb_complete,
            DatasetType::Iband => self.iband_complete,
            DatasetType::Mband => self.mband_complete,
        }
    }

    fn set_complete(&mut self, dataset: DatasetType, complete: bool) {
        match dataset {
            DatasetType::Dnb => self.dnb_complete = complete,
            DatasetType::Iband => self.iband_complete = complete,
            DatasetType::Mband => self.mband_complete = complete,
        }
    }
}

/// All catalogued granules, in scene order then granule order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Catalog {
    pub fn get(&self, granule: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.granule == granule)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries complete for `dataset`
    pub fn complete(&self, dataset: DatasetType) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(move |e| e.is_complete(dataset))
    }
}

struct ImageryInfo {
    metadata: SwathMetadata,
    footprint_wkt: String,
}

fn describe_swath(swath: &dyn Swath, step: usize) -> Result<ImageryInfo> {
    let metadata = swath.metadata()?;
    let geo = swath.geolocation()?;
    let footprint = extract_footprint(&geo, step)?;
    let footprint_wkt = footprint.to_wkt()?;
    Ok(ImageryInfo {
        metadata,
        footprint_wkt,
    })
}

/// Open `path`, read what the catalog needs, and close it again whatever happened
fn read_imagery(reader: &dyn SwathReader, path: &Path, step: usize) -> Result<ImageryInfo> {
    let swath = reader.open(path)?;
    let outcome = describe_swath(swath.as_ref(), step);
    let closed = swath.close();
    match (outcome, closed) {
        (Ok(info), Ok(())) => Ok(info),
        (Ok(_), Err(e)) => Err(Error::from(e)),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!("Also failed to close {:?}: {}", path, close_err);
            }
            Err(e)
        }
    }
}

fn catalog_granule(
    scene: &SceneGranules,
    key: &str,
    granule: &Granule,
    reader: &dyn SwathReader,
    params: &CatalogParams,
    diagnostics: &mut Vec<Diagnostic>,
) -> CatalogEntry {
    debug!("Cataloging granule {}", key);
    let mut entry = CatalogEntry {
        granule: key.to_string(),
        scene: scene.name.clone(),
        data_dir: scene.data_dir.clone(),
        files: granule.clone(),
        dnb_complete: false,
        iband_complete: false,
        mband_complete: false,
        granule_id: None,
        orbit_number: None,
        ascending_node: None,
        edge_polygon_i: None,
    };

    for dataset in DatasetType::ALL {
        match check_granule(granule, dataset) {
            Completeness::Complete => entry.set_complete(dataset, true),
            Completeness::Missing(band) => diagnostics.push(Diagnostic::MissingBand {
                granule: key.to_string(),
                dataset,
                band: band.to_string(),
            }),
        }
    }

    if !entry.iband_complete {
        return entry;
    }

    let outcome = match granule.get(&params.imagery_band) {
        Some(file) => read_imagery(reader, &scene.data_dir.join(file), params.footprint_step),
        None => Err(Error::InvalidArgument {
            arg: "imagery_band",
            value: params.imagery_band.clone(),
        }),
    };

    match outcome {
        Ok(info) => {
            entry.granule_id = Some(info.metadata.granule_id);
            entry.orbit_number = Some(info.metadata.orbit_number);
            entry.ascending_node = Some(info.metadata.ascending_node);
            entry.edge_polygon_i = Some(info.footprint_wkt);
        }
        Err(e) => {
            let diag = Diagnostic::RasterAccess {
                granule: key.to_string(),
                message: e.to_string(),
            };
            warn!("{}", diag);
            diagnostics.push(diag);
            entry.iband_complete = false;
        }
    }
    entry
}

/// Add the granules of one scene to `catalog`
pub fn catalog_scene(
    scene: &SceneGranules,
    reader: &dyn SwathReader,
    params: &CatalogParams,
    catalog: &mut Catalog,
) {
    catalog.diagnostics.extend(scene.diagnostics.iter().cloned());
    for (key, granule) in &scene.granules {
        if catalog.get(key).is_some() {
            warn!("Granule {} appears in more than one scene, last seen in {}", key, scene.name);
        }
        let entry = catalog_granule(scene, key, granule, reader, params, &mut catalog.diagnostics);
        catalog.entries.push(entry);
    }
}

/// Build the granule catalog for the scenes under `base_dir` (all, or the named ones).
/// Per-granule failures are recorded as diagnostics; only listing errors abort.
pub fn build_catalog<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    reader: &dyn SwathReader,
    params: &CatalogParams,
) -> Result<Catalog> {
    params.validate()?;
    let scenes = files_by_granule(base_dir, names, params)?;
    let mut catalog = Catalog::default();
    for scene in &scenes {
        catalog_scene(scene, reader, params, &mut catalog);
    }
    info!(
        "Catalogued {} granules ({} with I-band footprints)",
        catalog.len(),
        catalog.complete(DatasetType::Iband).count()
    );
    Ok(catalog)
}
