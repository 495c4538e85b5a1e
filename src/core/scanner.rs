//! Scene directory discovery. Scene directories are named `YYYY_MM_DD_NNN_HHMM`
//! and optionally hold their data files in an `sdr` subdirectory.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::granules::dedup_preserving_order;
use crate::core::params::CatalogParams;
use crate::error::{Error, Result};

fn scene_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}_[0-1]\d_[0-3]\d_\d{3}_[0-2]\d[0-6]\d$")
            .expect("scene directory pattern is valid")
    })
}

/// True if `name` follows the scene directory naming scheme
pub fn is_scene_dir_name(name: &str) -> bool {
    scene_regex().is_match(name)
}

/// Immediate subdirectories of `base_dir` named like scenes, sorted (= chronological)
pub fn default_scene_dirs(base_dir: &Path) -> Result<Vec<PathBuf>> {
    if !base_dir.is_dir() {
        return Err(Error::NotADirectory(base_dir.to_path_buf()));
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(base_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let matches = path
            .file_name()
            .map(|n| is_scene_dir_name(&n.to_string_lossy()))
            .unwrap_or(false);
        if matches {
            dirs.push(path);
        } else {
            debug!("Ignoring non-scene directory: {:?}", path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// `base_dir/<name>` for each caller-supplied name that is an existing directory, in caller
/// order; a name given more than once yields one directory
pub fn explicit_scene_dirs<S: AsRef<str>>(base_dir: &Path, names: &[S]) -> Vec<PathBuf> {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    dedup_preserving_order(&names)
        .into_iter()
        .map(|name| base_dir.join(name))
        .filter(|path| {
            let ok = path.is_dir();
            if !ok {
                warn!("Requested scene is not a directory: {:?}", path);
            }
            ok
        })
        .collect()
}

/// Explicit mode if `names` is non-empty, default naming-scheme discovery otherwise
pub fn scene_dirs<S: AsRef<str>>(base_dir: &Path, names: &[S]) -> Result<Vec<PathBuf>> {
    if names.is_empty() {
        default_scene_dirs(base_dir)
    } else {
        Ok(explicit_scene_dirs(base_dir, names))
    }
}

/// Directory actually holding the data files of a scene
pub fn data_dir(scene_dir: &Path, sdr_subdir: &str) -> PathBuf {
    let sdr = scene_dir.join(sdr_subdir);
    if sdr.is_dir() {
        sdr
    } else {
        scene_dir.to_path_buf()
    }
}

/// Files of a data directory ending in the data suffix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataListing {
    /// Sorted UTF-8 names
    pub files: Vec<String>,
    /// Lossy renderings of names that are not valid UTF-8, sorted
    pub undecodable: Vec<String>,
}

impl DataListing {
    /// Every data file present, decodable or not
    pub fn count(&self) -> usize {
        self.files.len() + self.undecodable.len()
    }
}

/// Data files in `dir` ending in `suffix`, split by whether their names are valid UTF-8
pub fn list_data_entries(dir: &Path, suffix: &str) -> Result<DataListing> {
    let mut listing = DataListing::default();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(suffix) => listing.files.push(name),
            Ok(_) => {}
            Err(raw) => {
                let lossy = raw.to_string_lossy().into_owned();
                if lossy.ends_with(suffix) {
                    listing.undecodable.push(lossy);
                }
            }
        }
    }
    listing.files.sort();
    listing.undecodable.sort();
    Ok(listing)
}

/// Sorted names of the files in `dir` ending in `suffix`; names that are not
/// valid UTF-8 are skipped
pub fn list_data_files(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    let listing = list_data_entries(dir, suffix)?;
    for name in &listing.undecodable {
        warn!("Skipping data file with non UTF-8 name in {:?}: {}", dir, name);
    }
    Ok(listing.files)
}

/// Basename of a scene directory
pub fn scene_name(scene_dir: &Path) -> String {
    scene_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| scene_dir.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStatus {
    Ok,
    NoDataDir,
    CountMismatch,
}

/// Data-file count of one scene's `sdr` directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneCheck {
    pub name: String,
    pub path: PathBuf,
    pub data_files: Option<usize>,
    pub status: SceneStatus,
}

/// Count data files in each scene's `sdr` subdirectory and flag partial transfers
pub fn check_scene_dirs<S: AsRef<str>>(
    base_dir: &Path,
    names: &[S],
    params: &CatalogParams,
) -> Result<Vec<SceneCheck>> {
    params.validate()?;
    let mut report = Vec::new();
    for scene in scene_dirs(base_dir, names)? {
        let name = scene_name(&scene);
        let sdr = scene.join(&params.sdr_subdir);
        let (data_files, status) = if sdr.is_dir() {
            let count = list_data_entries(&sdr, &params.data_suffix)?.count();
            let status = if count % params.files_per_granule != 0 {
                warn!("{}: {} data files", name, count);
                SceneStatus::CountMismatch
            } else {
                SceneStatus::Ok
            };
            (Some(count), status)
        } else {
            warn!("{}: No data files found", name);
            (None, SceneStatus::NoDataDir)
        };
        report.push(SceneCheck {
            name,
            path: scene,
            data_files,
            status,
        });
    }
    info!("Checked {} scene directories", report.len());
    Ok(report)
}
