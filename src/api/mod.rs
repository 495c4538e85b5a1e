//! High-level, ergonomic library API: scene checks, overpass manifests, granule
//! maps and the GDAL-backed granule catalog, plus helpers that write them as JSON.
//! Prefer these entrypoints over the `core` modules when integrating viirscat.
use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::core::catalog::{Catalog, build_catalog};
use crate::core::granules::{OverpassManifest, SceneGranules, files_by_granule, overpasses};
use crate::core::params::CatalogParams;
use crate::core::scanner::{SceneCheck, check_scene_dirs};
use crate::core::timestamps::{akdt_datestamp, date_utc, time_utc};
use crate::error::Result;
use crate::io::gdal::GdalSwathReader;
use crate::io::swath::{SwathMetadata, SwathReader};
use crate::io::writers::json::write_json;
use crate::types::DatasetType;

/// Per-scene data-file counts for the scenes under `base_dir` (all, or the named ones)
pub fn check_dirs<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Vec<SceneCheck>> {
    check_scene_dirs(base_dir, names, params)
}

/// By-band-type manifests of each scene
pub fn get_overpasses<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Vec<OverpassManifest>> {
    overpasses(base_dir, names, params)
}

/// By-granule file maps of each scene
pub fn get_files_by_granule<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Vec<SceneGranules>> {
    files_by_granule(base_dir, names, params)
}

/// Granule catalog, reading imagery files through GDAL
pub fn get_granule_catalog<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Catalog> {
    build_catalog(base_dir, names, &GdalSwathReader, params)
}

/// Catalog counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub scenes: usize,
    pub granules: usize,
    pub dnb_complete: usize,
    pub iband_complete: usize,
    pub mband_complete: usize,
    pub diagnostics: usize,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let scenes: BTreeSet<&str> = catalog.entries.iter().map(|e| e.scene.as_str()).collect();
        Self {
            scenes: scenes.len(),
            granules: catalog.len(),
            dnb_complete: catalog.complete(DatasetType::Dnb).count(),
            iband_complete: catalog.complete(DatasetType::Iband).count(),
            mband_complete: catalog.complete(DatasetType::Mband).count(),
            diagnostics: catalog.diagnostics.len(),
        }
    }
}

/// Build the catalog with `reader` and write it to `output` as JSON
pub fn write_catalog_with_reader<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    output: &Path,
    reader: &dyn SwathReader,
    params: &CatalogParams,
) -> Result<CatalogSummary> {
    let catalog = build_catalog(base_dir, names, reader, params)?;
    write_json(&catalog, output)?;
    let summary = CatalogSummary::from_catalog(&catalog);
    info!(
        "Catalog of {} granules in {} scenes written to {:?}",
        summary.granules, summary.scenes, output
    );
    Ok(summary)
}

/// Build the GDAL-backed catalog and write it to `output` as JSON
pub fn write_catalog<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    output: &Path,
    params: &CatalogParams,
) -> Result<CatalogSummary> {
    write_catalog_with_reader(base_dir, names, output, &GdalSwathReader, params)
}

/// Aggregate metadata of one imagery file with its readable timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GranuleInfo {
    #[serde(flatten)]
    pub metadata: SwathMetadata,
    pub date_utc: String,
    pub time_utc: String,
    pub akdt: String,
}

impl GranuleInfo {
    pub fn from_metadata(metadata: SwathMetadata) -> Result<Self> {
        Ok(Self {
            date_utc: date_utc(&metadata)?,
            time_utc: time_utc(&metadata)?,
            akdt: akdt_datestamp(&metadata, true)?,
            metadata,
        })
    }
}

/// Read the aggregate metadata of `path` with `reader`
pub fn describe_granule_with_reader(path: &Path, reader: &dyn SwathReader) -> Result<GranuleInfo> {
    let swath = reader.open(path)?;
    let metadata = swath.metadata();
    swath.close()?;
    GranuleInfo::from_metadata(metadata?)
}

/// Read the aggregate metadata of `path` through GDAL
pub fn describe_granule(path: &Path) -> Result<GranuleInfo> {
    describe_granule_with_reader(path, &GdalSwathReader)
}
