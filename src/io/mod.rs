//! I/O layer: the raster-access seam (`swath`), its GDAL implementation (`gdal`),
//! and `writers` for WKT polygons and JSON documents.
pub mod swath;
pub use swath::{Geolocation, RasterError, Swath, SwathMetadata, SwathReader};

pub mod gdal;
pub use gdal::{GdalSwath, GdalSwathReader};

pub mod writers;
