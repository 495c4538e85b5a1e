use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use viirscat::{DatasetType, DuplicatePolicy};

#[derive(Parser)]
#[command(name = "viirscat", version, about = "VIIRS SDR granule catalog CLI")]
pub struct CliArgs {
    /// Enable logging (to stderr; level from RUST_LOG, default debug)
    #[arg(long, default_value_t = false, global = true)]
    pub log: bool,

    /// JSON file with catalog parameters; flags given on the command line take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count data files per scene and flag partially transferred scenes
    Check(ScanArgs),
    /// Files of each scene grouped by band-type code
    Overpasses(ScanArgs),
    /// Files of each scene grouped by granule
    Granules(ScanArgs),
    /// Completeness, metadata and footprint of every granule
    Catalog(CatalogArgs),
    /// Aggregate metadata and timestamps of one imagery file
    Info {
        /// VIIRS SDR imagery file (e.g. SVI01_...h5)
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// Directory holding the scene directories
    pub base_dir: PathBuf,

    /// Scene directory names (default: every YYYY_MM_DD_DDD_HHMM directory)
    pub scenes: Vec<String>,

    /// Subdirectory of a scene holding its data files
    #[arg(long)]
    pub sdr_subdir: Option<String>,

    /// Expected number of data files per granule
    #[arg(long)]
    pub files_per_granule: Option<usize>,

    /// Which file to keep when a granule has two files of the same band type
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicatePolicy>,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Row/column stride for footprint sampling
    #[arg(long)]
    pub step: Option<usize>,

    /// Only keep granules complete for this dataset type
    #[arg(long, value_enum)]
    pub require: Option<DatasetType>,
}
