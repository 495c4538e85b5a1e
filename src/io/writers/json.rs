use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Pretty-printed JSON for any manifest, granule map or catalog
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` as pretty-printed JSON to `output_path`, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json_string = to_json_string(value)?;
    std::fs::write(output_path, json_string)?;
    info!("Wrote JSON document: {:?}", output_path);
    Ok(())
}
