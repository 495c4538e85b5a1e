//! Core building blocks: filename grammar, scene discovery, granule grouping,
//! completeness, footprints and the catalog builder. The high-level `api`
//! module composes these.
pub mod catalog;
pub mod completeness;
pub mod filename;
pub mod footprint;
pub mod granules;
pub mod params;
pub mod scanner;
pub mod timestamps;
