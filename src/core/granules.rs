//! Grouping of a scene's data files, either by band-type code over the whole
//! overpass or by granule (`<date>_<start time>`) and then band-type code.
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::filename::DataFileName;
use crate::core::params::CatalogParams;
use crate::core::scanner::{data_dir, list_data_entries, scene_dirs, scene_name};
use crate::error::Result;
use crate::types::{Diagnostic, DuplicatePolicy};

/// Files of one granule, keyed by band-type code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Granule {
    files: BTreeMap<String, String>,
}

impl Granule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filename for `ftype`, if any
    pub fn get(&self, ftype: &str) -> Option<&str> {
        self.files.get(ftype).map(String::as_str)
    }

    /// Store `filename` under `ftype`, returning the filename it replaced
    pub fn insert(
        &mut self,
        ftype: impl Into<String>,
        filename: impl Into<String>,
    ) -> Option<String> {
        self.files.insert(ftype.into(), filename.into())
    }

    pub fn contains(&self, ftype: &str) -> bool {
        self.files.contains_key(ftype)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// `(ftype, filename)` pairs ordered by band-type code
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.values().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Granule {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Per-band-type view of one scene directory
#[derive(Debug, Clone, Serialize)]
pub struct OverpassManifest {
    pub name: String,
    /// Directory the data files were listed from (`sdr` subdirectory if present)
    pub data_dir: PathBuf,
    /// Number of complete granules implied by the file count
    pub num_granules: usize,
    /// Granule keys in first-seen order
    pub datetimes: Vec<String>,
    pub files_by_ftype: BTreeMap<String, BTreeSet<String>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl OverpassManifest {
    /// File-count warning, if the scene looks partially transferred
    pub fn message(&self) -> Option<String> {
        file_count_message(&self.diagnostics)
    }
}

/// Per-granule view of one scene directory
#[derive(Debug, Clone, Serialize)]
pub struct SceneGranules {
    pub name: String,
    pub scene_dir: PathBuf,
    /// Directory the data files were listed from (`sdr` subdirectory if present)
    pub data_dir: PathBuf,
    pub granules: BTreeMap<String, Granule>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SceneGranules {
    pub fn message(&self) -> Option<String> {
        file_count_message(&self.diagnostics)
    }

    pub fn granule(&self, key: &str) -> Option<&Granule> {
        self.granules.get(key)
    }
}

/// Per-scene record addressable by scene basename
pub trait NamedScene {
    fn scene_name(&self) -> &str;
}

impl NamedScene for OverpassManifest {
    fn scene_name(&self) -> &str {
        &self.name
    }
}

impl NamedScene for SceneGranules {
    fn scene_name(&self) -> &str {
        &self.name
    }
}

/// The record of scene `name` among `scenes`
pub fn find_scene<'a, T: NamedScene>(scenes: &'a [T], name: &str) -> Option<&'a T> {
    scenes.iter().find(|s| s.scene_name() == name)
}

fn file_count_message(diagnostics: &[Diagnostic]) -> Option<String> {
    diagnostics
        .iter()
        .find(|d| matches!(d, Diagnostic::FileCountMismatch { .. }))
        .map(|d| d.to_string())
}

/// Remove repeated items, keeping the first occurrence of each
pub fn dedup_preserving_order<T: Clone + Eq + std::hash::Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

struct SceneListing {
    name: String,
    data_dir: PathBuf,
    file_count: usize,
    parsed: Vec<(String, DataFileName)>,
    diagnostics: Vec<Diagnostic>,
}

fn list_scene(scene_dir: &Path, params: &CatalogParams) -> Result<SceneListing> {
    let name = scene_name(scene_dir);
    let data_dir = data_dir(scene_dir, &params.sdr_subdir);
    let listing = list_data_entries(&data_dir, &params.data_suffix)?;
    let file_count = listing.count();
    debug!("{}: {} data files in {:?}", name, file_count, data_dir);

    let mut diagnostics = Vec::new();
    if file_count % params.files_per_granule != 0 {
        let diag = Diagnostic::FileCountMismatch {
            scene: name.clone(),
            count: file_count,
            expected_multiple: params.files_per_granule,
        };
        warn!("{}", diag);
        diagnostics.push(diag);
    }

    // not openable by name, so never grouped
    for file in listing.undecodable {
        let diag = Diagnostic::FilenameMismatch {
            scene: name.clone(),
            file,
        };
        warn!("{}", diag);
        diagnostics.push(diag);
    }

    let mut parsed = Vec::with_capacity(listing.files.len());
    for file in listing.files {
        match DataFileName::parse(&file) {
            Some(fname) => parsed.push((file, fname)),
            None => {
                let diag = Diagnostic::FilenameMismatch {
                    scene: name.clone(),
                    file,
                };
                warn!("{}", diag);
                diagnostics.push(diag);
            }
        }
    }

    Ok(SceneListing {
        name,
        data_dir,
        file_count,
        parsed,
        diagnostics,
    })
}

/// Group one scene's data files by band-type code
pub fn overpass_manifest(scene_dir: &Path, params: &CatalogParams) -> Result<OverpassManifest> {
    params.validate()?;
    let listing = list_scene(scene_dir, params)?;

    let num_granules = listing.file_count / params.files_per_granule;

    let keys: Vec<String> = listing
        .parsed
        .iter()
        .map(|(_, fname)| fname.granule_key())
        .collect();

    let mut files_by_ftype: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (file, fname) in &listing.parsed {
        files_by_ftype
            .entry(fname.ftype.clone())
            .or_default()
            .insert(file.clone());
    }

    Ok(OverpassManifest {
        name: listing.name,
        data_dir: listing.data_dir,
        num_granules,
        datetimes: dedup_preserving_order(&keys),
        files_by_ftype,
        diagnostics: listing.diagnostics,
    })
}

/// Group one scene's data files by granule, then by band-type code
pub fn scene_granules(scene_dir: &Path, params: &CatalogParams) -> Result<SceneGranules> {
    params.validate()?;
    let mut listing = list_scene(scene_dir, params)?;

    let mut granules: BTreeMap<String, Granule> = BTreeMap::new();
    for (file, fname) in listing.parsed {
        let key = fname.granule_key();
        let granule = granules.entry(key.clone()).or_default();
        match granule.get(&fname.ftype).map(str::to_string) {
            None => {
                granule.insert(fname.ftype, file);
            }
            Some(existing) => {
                let (kept, dropped) = match params.duplicate_policy {
                    DuplicatePolicy::Overwrite => {
                        granule.insert(fname.ftype.clone(), file.clone());
                        (file, existing)
                    }
                    DuplicatePolicy::KeepFirst => (existing, file),
                };
                let diag = Diagnostic::DuplicateBand {
                    granule: key,
                    ftype: fname.ftype,
                    kept,
                    dropped,
                };
                warn!("{}", diag);
                listing.diagnostics.push(diag);
            }
        }
    }

    Ok(SceneGranules {
        name: listing.name,
        scene_dir: scene_dir.to_path_buf(),
        data_dir: listing.data_dir,
        granules,
        diagnostics: listing.diagnostics,
    })
}

/// By-ftype manifests for the scenes under `base_dir` (all, or the named ones)
pub fn overpasses<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Vec<OverpassManifest>> {
    let mut out = Vec::new();
    for scene in scene_dirs(base_dir, names)? {
        out.push(overpass_manifest(&scene, params)?);
    }
    info!("Collected {} overpasses from {:?}", out.len(), base_dir);
    Ok(out)
}

/// By-granule maps for the scenes under `base_dir` (all, or the named ones)
pub fn files_by_granule<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Vec<SceneGranules>> {
    let mut out = Vec::new();
    for scene in scene_dirs(base_dir, names)? {
        out.push(scene_granules(&scene, params)?);
    }
    info!("Collected {} scenes from {:?}", out.len(), base_dir);
    Ok(out)
}
