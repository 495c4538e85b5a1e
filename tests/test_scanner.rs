mod common;

use std::fs;

use tempfile::TempDir;
use viirscat::core::scanner::{
    data_dir, default_scene_dirs, is_scene_dir_name, list_data_entries, list_data_files,
    scene_dirs,
};
use viirscat::{CatalogParams, Error, SceneStatus, check_dirs};

#[test]
fn test_scene_dir_names() {
    assert!(is_scene_dir_name("2019_06_15_166_1200"));
    assert!(is_scene_dir_name("2024_12_31_366_2359"));
    assert!(!is_scene_dir_name("2019_06_15_166_1200_old"));
    assert!(!is_scene_dir_name("2019-06-15"));
    assert!(!is_scene_dir_name("2019_23_15_166_1200"));
    assert!(!is_scene_dir_name("2019_06_15_166_2470"));
}

#[test]
fn test_default_discovery_is_filtered_and_sorted() {
    let base = TempDir::new().expect("Failed to create temp dir");
    for name in ["2019_06_16_167_0130", "2019_06_15_166_1200", "notes", "2019_06_15_166_0845"] {
        fs::create_dir(base.path().join(name)).expect("Failed to create dir");
    }
    // a file named like a scene is not a scene
    fs::write(base.path().join("2019_06_17_168_0000"), b"").expect("Failed to write file");

    let dirs = default_scene_dirs(base.path()).expect("Discovery should succeed");
    let names: Vec<_> = dirs
        .iter()
        .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["2019_06_15_166_0845", "2019_06_15_166_1200", "2019_06_16_167_0130"]
    );
}

#[test]
fn test_explicit_names_keep_caller_order_and_skip_missing() {
    let base = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir(base.path().join("b_scene")).unwrap();
    fs::create_dir(base.path().join("a_scene")).unwrap();

    let dirs = scene_dirs(base.path(), &["b_scene", "missing", "a_scene"]).unwrap();
    assert_eq!(dirs, vec![base.path().join("b_scene"), base.path().join("a_scene")]);
}

#[test]
fn test_repeated_explicit_name_yields_one_dir() {
    let base = TempDir::new().unwrap();
    fs::create_dir(base.path().join(common::SCENE)).unwrap();
    fs::create_dir(base.path().join("other")).unwrap();

    let dirs = scene_dirs(base.path(), &[common::SCENE, "other", common::SCENE]).unwrap();
    assert_eq!(dirs, vec![base.path().join(common::SCENE), base.path().join("other")]);
}

#[test]
fn test_missing_base_dir_is_an_error() {
    let base = TempDir::new().unwrap();
    let missing = base.path().join("nope");
    let err = default_scene_dirs(&missing).unwrap_err();
    assert!(matches!(err, Error::NotADirectory(p) if p == missing));
}

#[test]
fn test_data_dir_falls_back_to_scene_dir() {
    let base = TempDir::new().unwrap();
    let with_sdr = common::sdr_dir(base.path(), "2019_06_15_166_1200");
    let flat = base.path().join("2019_06_15_166_1300");
    fs::create_dir(&flat).unwrap();

    assert_eq!(data_dir(&base.path().join("2019_06_15_166_1200"), "sdr"), with_sdr);
    assert_eq!(data_dir(&flat, "sdr"), flat);
}

#[test]
fn test_list_data_files_filters_by_suffix() {
    let base = TempDir::new().unwrap();
    common::touch_all(base.path(), &["b.h5", "a.h5", "a.txt", "c.h5.part"]);
    assert_eq!(list_data_files(base.path(), ".h5").unwrap(), vec!["a.h5", "b.h5"]);
}

// Linux filesystems accept arbitrary bytes in names; others may refuse to create the file
#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_names_are_listed_apart() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let base = TempDir::new().unwrap();
    common::touch_all(base.path(), &["a.h5"]);
    fs::write(base.path().join(OsStr::from_bytes(b"bad\xff_name.h5")), b"").unwrap();
    fs::write(base.path().join(OsStr::from_bytes(b"bad\xff_name.txt")), b"").unwrap();

    let listing = list_data_entries(base.path(), ".h5").unwrap();
    assert_eq!(listing.files, vec!["a.h5"]);
    assert_eq!(listing.undecodable, vec!["bad\u{FFFD}_name.h5"]);
    assert_eq!(listing.count(), 2);
    assert_eq!(list_data_files(base.path(), ".h5").unwrap(), vec!["a.h5"]);
}

#[test]
fn test_check_dirs_flags_partial_scenes() {
    let base = TempDir::new().unwrap();
    let params = CatalogParams::default();

    let full = common::sdr_dir(base.path(), "2019_06_15_166_1200");
    common::touch_all(&full, &common::granule_files("20190615", "1200123", "39315"));

    let partial = common::sdr_dir(base.path(), "2019_06_15_166_1400");
    let mut files = common::granule_files("20190615", "1400123", "39316");
    files.pop();
    common::touch_all(&partial, &files);

    fs::create_dir(base.path().join("2019_06_15_166_1600")).unwrap();

    let report = check_dirs(base.path(), &[] as &[&str], &params).expect("Check should succeed");
    assert_eq!(report.len(), 3);
    assert_eq!(report[0].status, SceneStatus::Ok);
    assert_eq!(report[0].data_files, Some(25));
    assert_eq!(report[1].status, SceneStatus::CountMismatch);
    assert_eq!(report[1].data_files, Some(24));
    assert_eq!(report[2].status, SceneStatus::NoDataDir);
    assert_eq!(report[2].data_files, None);
}
