#![doc = r#"
viirscat: cataloging of VIIRS SDR granules received by a direct-broadcast station.

A receiving station drops each satellite overpass into a scene directory named
`YYYY_MM_DD_DDD_HHMM` (with the data files usually in an `sdr` subdirectory). This
crate finds those directories, parses the VIIRS SDR filenames, groups the files into
granules, checks whether each granule carries every band file of the DNB, I-band and
M-band datasets, and for complete imagery granules reads the granule metadata and
traces the swath footprint as a WKT polygon.

Requirements
------------
- GDAL development headers and runtime (with the HDF5 driver) available on your system.
- Rust 2024 edition toolchain.

Quick start: catalog a receiving directory
------------------------------------------
```rust,no_run
use std::path::Path;
use viirscat::{get_granule_catalog, CatalogParams, DatasetType};

fn main() -> viirscat::Result<()> {
    let params = CatalogParams::default();
    let catalog = get_granule_catalog(Path::new("/data/viirs"), &[] as &[&str], &params)?;

    for entry in catalog.complete(DatasetType::Iband) {
        println!("{} orbit {:?}: {:?}", entry.granule, entry.orbit_number, entry.edge_polygon_i);
    }
    for diag in &catalog.diagnostics {
        eprintln!("{diag}");
    }
    Ok(())
}
```

Grouping only (no raster access)
--------------------------------
```rust,no_run
use std::path::Path;
use viirscat::{get_files_by_granule, is_granule_complete, CatalogParams};

fn main() -> viirscat::Result<()> {
    let scenes = get_files_by_granule(
        Path::new("/data/viirs"),
        &["2019_06_15_166_1200"],
        &CatalogParams::default(),
    )?;
    for scene in &scenes {
        for (key, granule) in &scene.granules {
            println!("{key}: dnb={}", is_granule_complete(granule, "dnb")?);
        }
    }
    Ok(())
}
```

Custom raster access
--------------------
The catalog builder only talks to imagery files through [`SwathReader`]; the GDAL
implementation is [`GdalSwathReader`]. Supply your own reader to catalog from another
source or to test without GDAL fixtures:

```rust,no_run
use std::path::Path;
use viirscat::{build_catalog, CatalogParams, GdalSwathReader};

fn main() -> viirscat::Result<()> {
    let catalog = build_catalog(
        Path::new("/data/viirs"),
        &[] as &[&str],
        &GdalSwathReader,
        &CatalogParams { footprint_step: 25, ..Default::default() },
    )?;
    println!("{} granules", catalog.len());
    Ok(())
}
```

Error handling
--------------
All public functions return `viirscat::Result<T>`. Only failures to list the base or
scene directories abort a scan; per-file and per-granule problems are reported as
[`Diagnostic`] values on the returned manifests and catalog.

Useful modules
--------------
- [`api`]: high-level entry points and JSON writers.
- [`core`]: filename grammar, scanner, grouping, completeness, footprint, catalog.
- [`io`]: raster-access traits, the GDAL reader and output writers.
- [`types`]: `DatasetType`, band tables and `Diagnostic`.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::catalog::{Catalog, CatalogEntry, build_catalog};
pub use crate::core::completeness::{Completeness, check_granule, is_granule_complete};
pub use crate::core::filename::DataFileName;
pub use crate::core::footprint::{Footprint, extract_footprint};
pub use crate::core::granules::{
    Granule, NamedScene, OverpassManifest, SceneGranules, find_scene,
};
pub use crate::core::params::CatalogParams;
pub use crate::core::scanner::{SceneCheck, SceneStatus};
pub use crate::error::{Error, Result};
pub use crate::types::{DatasetType, Diagnostic, DuplicatePolicy};

// Raster access
pub use crate::io::gdal::{GdalSwath, GdalSwathReader};
pub use crate::io::swath::{Geolocation, RasterError, Swath, SwathMetadata, SwathReader};

// High-level API re-exports
pub use crate::api::{
    CatalogSummary, GranuleInfo, check_dirs, describe_granule, get_files_by_granule,
    get_granule_catalog, get_overpasses, write_catalog,
};
