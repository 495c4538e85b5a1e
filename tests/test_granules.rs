mod common;

use std::collections::BTreeSet;

use tempfile::TempDir;
use viirscat::core::granules::{overpass_manifest, scene_granules};
use viirscat::{
    CatalogParams, Diagnostic, DuplicatePolicy, find_scene, get_files_by_granule, get_overpasses,
};

const TIMES: [&str; 3] = ["1200123", "1201365", "1203017"];

fn three_granule_scene(base: &TempDir) -> Vec<String> {
    let sdr = common::sdr_dir(base.path(), common::SCENE);
    let files: Vec<String> = TIMES
        .iter()
        .flat_map(|t| common::granule_files(common::DATE, t, common::ORBIT))
        .collect();
    common::touch_all(&sdr, &files);
    files
}

#[test]
fn test_by_granule_map_partitions_files() {
    let base = TempDir::new().unwrap();
    let files = three_granule_scene(&base);

    let scenes = get_files_by_granule(base.path(), &[] as &[&str], &CatalogParams::default())
        .expect("Grouping should succeed");
    assert_eq!(scenes.len(), 1);
    let scene = &scenes[0];
    assert_eq!(scene.name, common::SCENE);
    assert_eq!(scene.data_dir, base.path().join(common::SCENE).join("sdr"));
    assert_eq!(scene.granules.len(), 3);
    assert!(scene.diagnostics.is_empty());
    assert!(scene.message().is_none());

    let union: BTreeSet<String> = scene
        .granules
        .values()
        .flat_map(|g| g.filenames().map(str::to_string))
        .collect();
    let expected: BTreeSet<String> = files.into_iter().collect();
    assert_eq!(union, expected);

    let first = scene
        .granule(&format!("{}_{}", common::DATE, TIMES[0]))
        .expect("First granule should be present");
    assert_eq!(first.len(), 25);
}

#[test]
fn test_overpass_manifest_groups_by_band() {
    let base = TempDir::new().unwrap();
    three_granule_scene(&base);

    let manifests =
        get_overpasses(base.path(), &[common::SCENE], &CatalogParams::default()).unwrap();
    let manifest = &manifests[0];
    assert_eq!(manifest.num_granules, 3);
    assert_eq!(
        manifest.datetimes,
        TIMES
            .iter()
            .map(|t| format!("{}_{}", common::DATE, t))
            .collect::<Vec<_>>()
    );
    assert_eq!(manifest.files_by_ftype.len(), 25);
    assert!(manifest.files_by_ftype.values().all(|files| files.len() == 3));
}

#[test]
fn test_non_conforming_and_partial_files_are_reported() {
    let base = TempDir::new().unwrap();
    three_granule_scene(&base);
    let sdr = base.path().join(common::SCENE).join("sdr");
    common::touch_all(&sdr, &["junk.h5"]);

    let scene_dir = base.path().join(common::SCENE);
    let scene = scene_granules(&scene_dir, &CatalogParams::default()).unwrap();
    assert_eq!(scene.granules.len(), 3);
    assert!(scene.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::FilenameMismatch { file, .. } if file == "junk.h5"
    )));
    let message = scene.message().expect("76 files should be flagged");
    assert!(message.contains("76 is not divisible by 25"));

    let manifest = overpass_manifest(&scene_dir, &CatalogParams::default()).unwrap();
    assert_eq!(manifest.num_granules, 3);
    assert!(manifest.message().is_some());
}

#[test]
fn test_duplicate_band_files_follow_policy() {
    let base = TempDir::new().unwrap();
    let sdr = common::sdr_dir(base.path(), common::SCENE);
    let older = "SVI01_npp_d20190615_t1200123_e1201365_b39315_c20190615130001000000_noaa_ops.h5";
    let newer = "SVI01_npp_d20190615_t1200123_e1201365_b39315_c20190615140001000000_noaa_ops.h5";
    common::touch_all(&sdr, &[older, newer]);
    let scene_dir = base.path().join(common::SCENE);
    let key = "20190615_1200123";

    let overwrite = scene_granules(&scene_dir, &CatalogParams::default()).unwrap();
    assert_eq!(overwrite.granule(key).unwrap().get("SVI01"), Some(newer));
    assert!(overwrite.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::DuplicateBand { kept, dropped, .. } if kept == newer && dropped == older
    )));

    let params = CatalogParams {
        duplicate_policy: DuplicatePolicy::KeepFirst,
        ..Default::default()
    };
    let keep_first = scene_granules(&scene_dir, &params).unwrap();
    assert_eq!(keep_first.granule(key).unwrap().get("SVI01"), Some(older));
}

#[test]
fn test_files_directly_in_scene_dir() {
    let base = TempDir::new().unwrap();
    let scene_dir = base.path().join(common::SCENE);
    common::touch_all(&scene_dir, &common::granule_files(common::DATE, TIMES[0], common::ORBIT));

    let scene = scene_granules(&scene_dir, &CatalogParams::default()).unwrap();
    assert_eq!(scene.data_dir, scene_dir);
    assert_eq!(scene.granules.len(), 1);
}

#[test]
fn test_find_scene_by_name() {
    let base = TempDir::new().unwrap();
    three_granule_scene(&base);
    let params = CatalogParams::default();

    let names = [common::SCENE, common::SCENE];
    let scenes = get_files_by_granule(base.path(), &names, &params).unwrap();
    assert_eq!(scenes.len(), 1);
    let scene = find_scene(&scenes, common::SCENE).expect("Scene is listed");
    assert_eq!(scene.granules.len(), 3);
    assert!(find_scene(&scenes, "2019_06_15_166_1300").is_none());

    let manifests = get_overpasses(base.path(), &[] as &[&str], &params).unwrap();
    let manifest = find_scene(&manifests, common::SCENE).expect("Scene is listed");
    assert_eq!(manifest.data_dir, base.path().join(common::SCENE).join("sdr"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_is_reported_not_grouped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let base = TempDir::new().unwrap();
    let sdr = common::sdr_dir(base.path(), common::SCENE);
    common::touch_all(&sdr, &common::granule_files(common::DATE, common::TIME, common::ORBIT));
    std::fs::write(sdr.join(OsStr::from_bytes(b"SVI01_bad\xff.h5")), b"").unwrap();

    let scene_dir = base.path().join(common::SCENE);
    let scene = scene_granules(&scene_dir, &CatalogParams::default()).unwrap();
    assert_eq!(scene.granules.len(), 1);
    assert_eq!(scene.granules.values().next().map(|g| g.len()), Some(25));
    assert!(scene.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::FilenameMismatch { file, .. } if file == "SVI01_bad\u{FFFD}.h5"
    )));
    assert!(scene.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::FileCountMismatch { count: 26, .. }
    )));
}
