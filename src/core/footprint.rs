//! Swath footprint extraction. The perimeter of the valid-data rows of a swath is
//! sampled at a fixed stride: top row left to right, right column downwards,
//! bottom row right to left, left column upwards.
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::swath::Geolocation;
use crate::io::writers::wkt::polygon_wkt;

/// Default row/column stride for perimeter sampling
pub const DEFAULT_STEP: usize = 50;

/// Valid longitude range (exclusive); fill values fall outside it
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// First and last row index whose values all lie strictly within (`min`, `max`)
pub fn valid_row_range(
    values: ArrayView2<'_, f64>,
    min: f64,
    max: f64,
) -> Option<(usize, usize)> {
    if values.ncols() == 0 {
        return None;
    }
    let mut valid = values
        .rows()
        .into_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().all(|&v| v > min && v < max))
        .map(|(idx, _)| idx);
    let first = valid.next()?;
    let last = valid.last().unwrap_or(first);
    Some((first, last))
}

/// (row, column) indices of the sampled perimeter of rows `first..=last`
pub fn boundary_indices(
    first: usize,
    last: usize,
    ncols: usize,
    step: usize,
) -> Vec<(usize, usize)> {
    if ncols == 0 || step == 0 {
        return Vec::new();
    }
    let right = ncols - 1;

    let top = (0..ncols).step_by(step).map(|c| (first, c));
    let right_col = (first..last.saturating_sub(step))
        .step_by(step)
        .map(|r| (r, right));
    let bottom = (0..ncols).rev().step_by(step).map(|c| (last, c));
    let left_col = (first + 1..=last).rev().step_by(step).map(|r| (r, 0));

    top.chain(right_col).chain(bottom).chain(left_col).collect()
}

/// Ordered swath perimeter; `lons[i]`/`lats[i]` form the i-th vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
}

impl Footprint {
    /// `(lon, lat)` vertices
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.lons
            .iter()
            .copied()
            .zip(self.lats.iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    /// Closed polygon in well-known text
    pub fn to_wkt(&self) -> Result<String> {
        polygon_wkt(&self.points())
    }
}

/// Extract the perimeter of the valid part of a swath, sampling every `step` rows/columns
pub fn extract_footprint(geo: &Geolocation, step: usize) -> Result<Footprint> {
    if step == 0 {
        return Err(Error::InvalidArgument {
            arg: "step",
            value: step.to_string(),
        });
    }
    let (rows, cols) = geo.dim();
    let (first, last) = valid_row_range(geo.lons().view(), LON_MIN, LON_MAX)
        .ok_or(Error::NoValidRows { rows, cols })?;

    let indices = boundary_indices(first, last, cols, step);
    let lons = indices.iter().map(|&(r, c)| geo.lons()[[r, c]]).collect();
    let lats = indices.iter().map(|&(r, c)| geo.lats()[[r, c]]).collect();
    Ok(Footprint { lons, lats })
}
