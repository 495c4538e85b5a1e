use gdal::vector::Geometry;
use gdal_sys::OGRwkbGeometryType;

use crate::error::{Error, Result};
use crate::io::swath::RasterError;

/// Build a polygon from `(lon, lat)` vertices and serialize it as well-known text.
/// The ring is closed by repeating the first vertex when needed.
pub fn polygon_wkt(points: &[(f64, f64)]) -> Result<String> {
    if points.len() < 3 {
        return Err(Error::InvalidArgument {
            arg: "polygon vertices",
            value: points.len().to_string(),
        });
    }

    let mut ring = Geometry::empty(OGRwkbGeometryType::wkbLinearRing).map_err(RasterError::from)?;
    for &point in points {
        ring.add_point_2d(point);
    }
    if points.first() != points.last() {
        ring.add_point_2d(points[0]);
    }

    let mut polygon = Geometry::empty(OGRwkbGeometryType::wkbPolygon).map_err(RasterError::from)?;
    polygon.add_geometry(ring).map_err(RasterError::from)?;
    let wkt = polygon.wkt().map_err(RasterError::from)?;
    Ok(wkt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ring_is_closed() {
        let wkt = polygon_wkt(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        assert!(wkt.starts_with("POLYGON ((0 0"));
        assert!(wkt.ends_with("0 0))"));
    }

    #[test]
    fn too_few_vertices_rejected() {
        assert!(polygon_wkt(&[(0.0, 0.0), (1.0, 1.0)]).is_err());
    }
}
