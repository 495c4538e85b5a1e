//! Raster-access seam: what the catalog needs from an opened VIIRS imagery file.
//! `io::gdal` provides the GDAL/HDF5 implementation; tests plug in their own.
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fill value used in VIIRS geolocation arrays outside the valid swath
pub const GEO_FILL_VALUE: f64 = -999.23;

/// Errors raised while opening or reading a swath
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
    #[error("Missing metadata item `{0}`")]
    MissingMetadata(&'static str),
    #[error("Invalid value for `{key}`: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Latitude array is {0}x{1} but longitude array is {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),
    #[error("Dimension mismatch: expected {0}x{1}, got {2} values")]
    DimensionMismatch(usize, usize, usize),
    #[error("No geolocation file found for {0}")]
    NoGeolocation(PathBuf),
}

/// Aggregate metadata of a VIIRS SDR granule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwathMetadata {
    pub granule_id: String,
    pub orbit_number: u64,
    /// `YYYYMMDD`
    pub beginning_date: String,
    /// `HHMMSS.ffffffZ`
    pub beginning_time: String,
    pub ascending_node: bool,
}

/// Latitude/longitude arrays of one swath, rows x columns, identical shape
#[derive(Debug, Clone, PartialEq)]
pub struct Geolocation {
    lats: Array2<f64>,
    lons: Array2<f64>,
}

impl Geolocation {
    pub fn new(lats: Array2<f64>, lons: Array2<f64>) -> Result<Self, RasterError> {
        if lats.dim() != lons.dim() {
            let (lat_r, lat_c) = lats.dim();
            let (lon_r, lon_c) = lons.dim();
            return Err(RasterError::ShapeMismatch(lat_r, lat_c, lon_r, lon_c));
        }
        Ok(Self { lats, lons })
    }

    pub fn lats(&self) -> &Array2<f64> {
        &self.lats
    }

    pub fn lons(&self) -> &Array2<f64> {
        &self.lons
    }

    /// (rows, columns)
    pub fn dim(&self) -> (usize, usize) {
        self.lats.dim()
    }
}

/// An opened imagery granule
pub trait Swath {
    fn metadata(&self) -> Result<SwathMetadata, RasterError>;

    fn geolocation(&self) -> Result<Geolocation, RasterError>;

    /// Release the underlying file handles
    fn close(self: Box<Self>) -> Result<(), RasterError>;
}

/// Opens imagery files as `Swath`es
pub trait SwathReader {
    fn open(&self, path: &Path) -> Result<Box<dyn Swath>, RasterError>;
}
