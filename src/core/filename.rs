//! VIIRS SDR data-file names, e.g.
//! `SVI01_npp_d20190615_t1200123_e1201365_b39315_c20190615130001234567_noaa_ops.h5`.
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

fn filename_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?P<ftype>[A-Z0-9]{5})      # band type of data file
            _(?P<sat>[a-z]+)            # satellite id
            _d(?P<date>\d{8})           # acquisition date
            _t(?P<time>\d{7})           # granule start time UTC
            _e(?P<end>\d+)              # granule end time UTC
            _b(?P<orbit>\d+)            # orbit number
            _c(?P<created>\d+)          # file creation date/time
            _(?P<suffix>\w+)\.h5
            ",
        )
        .expect("data file pattern is valid")
    })
}

/// Fields encoded in a VIIRS SDR data-file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileName {
    pub ftype: String,
    pub satellite: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub orbit: String,
    pub created: String,
    pub suffix: String,
}

impl DataFileName {
    /// Match `name` against the naming convention; `None` if it does not conform
    pub fn parse(name: &str) -> Option<Self> {
        let caps = filename_regex().captures(name)?;
        Some(Self {
            ftype: caps["ftype"].to_string(),
            satellite: caps["sat"].to_string(),
            date: caps["date"].to_string(),
            start_time: caps["time"].to_string(),
            end_time: caps["end"].to_string(),
            orbit: caps["orbit"].to_string(),
            created: caps["created"].to_string(),
            suffix: caps["suffix"].to_string(),
        })
    }

    /// Granule identity within a scene: `<date>_<start time>`
    pub fn granule_key(&self) -> String {
        format!("{}_{}", self.date, self.start_time)
    }

    pub fn orbit_number(&self) -> Option<u64> {
        self.orbit.parse().ok()
    }
}

impl FromStr for DataFileName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::FilenameMismatch(s.to_string()))
    }
}

/// Parse every name in `names`, keeping the order; non-conforming names map to `None`
pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Vec<Option<DataFileName>> {
    names
        .iter()
        .map(|name| DataFileName::parse(name.as_ref()))
        .collect()
}
