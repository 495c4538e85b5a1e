use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use viirscat::api::{
    CatalogSummary, check_dirs, describe_granule, get_files_by_granule, get_granule_catalog,
    get_overpasses,
};
use viirscat::io::writers::{to_json_string, write_json};
use viirscat::{CatalogParams, SceneStatus};

use super::args::{CatalogArgs, CliArgs, Command, ScanArgs};
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(config: Option<&Path>) -> Result<CatalogParams, AppError> {
    match config {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::ConfigNotFound(path.to_path_buf()));
            }
            info!("Loading parameters from {:?}", path);
            Ok(CatalogParams::from_json_file(path)?)
        }
        None => Ok(CatalogParams::default()),
    }
}

fn apply_scan_overrides(scan: &ScanArgs, params: &mut CatalogParams) -> Result<(), AppError> {
    if let Some(subdir) = &scan.sdr_subdir {
        params.sdr_subdir = subdir.clone();
    }
    if let Some(count) = scan.files_per_granule {
        if count == 0 {
            return Err(AppError::ZeroValue {
                arg: "--files-per-granule".to_string(),
                value: count,
            });
        }
        params.files_per_granule = count;
    }
    if let Some(policy) = scan.duplicates {
        params.duplicate_policy = policy;
    }
    Ok(())
}

/// Write `value` to `output` if given, otherwise print it to stdout
fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), AppError> {
    match output {
        Some(path) => write_json(value, path)?,
        None => println!("{}", to_json_string(value)?),
    }
    Ok(())
}

fn run_check(scan: &ScanArgs, params: &CatalogParams) -> Result<(), AppError> {
    let report = check_dirs(&scan.base_dir, scan.scenes.as_slice(), params)?;
    match &scan.output {
        Some(path) => write_json(&report, path)?,
        None => {
            for scene in &report {
                match (scene.status, scene.data_files) {
                    (SceneStatus::NoDataDir, _) | (_, None) => {
                        println!("{}: No data files found", scene.name)
                    }
                    (SceneStatus::CountMismatch, Some(count)) => println!(
                        "{}: {} data files (not a multiple of {})",
                        scene.name, count, params.files_per_granule
                    ),
                    (SceneStatus::Ok, Some(count)) => {
                        println!("{}: {} data files", scene.name, count)
                    }
                }
            }
        }
    }
    let flagged = report.iter().filter(|s| s.status != SceneStatus::Ok).count();
    info!("{} of {} scenes flagged", flagged, report.len());
    Ok(())
}

fn run_catalog(args: &CatalogArgs, params: &mut CatalogParams) -> Result<(), AppError> {
    if let Some(step) = args.step {
        if step == 0 {
            return Err(AppError::ZeroValue {
                arg: "--step".to_string(),
                value: step,
            });
        }
        params.footprint_step = step;
    }

    let mut catalog =
        get_granule_catalog(&args.scan.base_dir, args.scan.scenes.as_slice(), params)?;
    let summary = CatalogSummary::from_catalog(&catalog);
    if let Some(dataset) = args.require {
        catalog.entries.retain(|e| e.is_complete(dataset));
        info!("Kept {} granules complete for {}", catalog.len(), dataset);
    }
    emit(&catalog, args.scan.output.as_deref())?;

    info!("Catalog complete!");
    info!("Scenes: {}", summary.scenes);
    info!("Granules: {}", summary.granules);
    info!(
        "Complete: dnb={} iband={} mband={}",
        summary.dnb_complete, summary.iband_complete, summary.mband_complete
    );
    if summary.diagnostics > 0 {
        warn!("Diagnostics: {}", summary.diagnostics);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let mut params = load_params(args.config.as_deref())?;

    match &args.command {
        Command::Check(scan) => {
            apply_scan_overrides(scan, &mut params)?;
            run_check(scan, &params)?;
        }
        Command::Overpasses(scan) => {
            apply_scan_overrides(scan, &mut params)?;
            let manifests = get_overpasses(&scan.base_dir, scan.scenes.as_slice(), &params)?;
            emit(&manifests, scan.output.as_deref())?;
        }
        Command::Granules(scan) => {
            apply_scan_overrides(scan, &mut params)?;
            let scenes = get_files_by_granule(&scan.base_dir, scan.scenes.as_slice(), &params)?;
            emit(&scenes, scan.output.as_deref())?;
        }
        Command::Catalog(catalog_args) => {
            apply_scan_overrides(&catalog_args.scan, &mut params)?;
            run_catalog(catalog_args, &mut params)?;
        }
        Command::Info { file } => {
            let granule = describe_granule(file).map_err(AppError::from)?;
            emit(&granule, None)?;
        }
    }

    Ok(())
}
