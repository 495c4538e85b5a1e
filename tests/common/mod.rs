#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use viirscat::types::{DNB_BANDS, IBAND_BANDS, MBAND_BANDS};

pub const SCENE: &str = "2019_06_15_123_1200";
pub const DATE: &str = "20190615";
pub const TIME: &str = "1200123";
pub const ORBIT: &str = "39315";

/// VIIRS SDR filename for one band of a granule
pub fn data_file(ftype: &str, date: &str, time: &str, orbit: &str) -> String {
    format!(
        "{ftype}_npp_d{date}_t{time}_e{end}_b{orbit}_c{date}130001234567_noaa_ops.h5",
        end = "1201365"
    )
}

/// All 25 band files of one granule
pub fn granule_files(date: &str, time: &str, orbit: &str) -> Vec<String> {
    DNB_BANDS
        .iter()
        .chain(IBAND_BANDS)
        .chain(MBAND_BANDS)
        .map(|ftype| data_file(ftype, date, time, orbit))
        .collect()
}

/// Create empty files named `names` in `dir`
pub fn touch_all<S: AsRef<str>>(dir: &Path, names: &[S]) {
    fs::create_dir_all(dir).expect("Failed to create fixture directory");
    for name in names {
        fs::write(dir.join(name.as_ref()), b"").expect("Failed to create fixture file");
    }
}

/// `base/<scene>/sdr`, created
pub fn sdr_dir(base: &Path, scene: &str) -> PathBuf {
    let dir = base.join(scene).join("sdr");
    fs::create_dir_all(&dir).expect("Failed to create sdr directory");
    dir
}
