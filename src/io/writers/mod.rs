//! Output helpers: WKT polygons for footprints and JSON documents for manifests
//! and catalogs.
pub mod json;
pub mod wkt;

pub use json::{to_json_string, write_json};
pub use wkt::polygon_wkt;
