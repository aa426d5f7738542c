//! Transform orchestration: input resolution followed by the ETL run.

use std::path::{Path, PathBuf};

use sales_core::error::Result;
use sales_core::settings::TransformArgs;
use sales_data::reader::find_csv_files;
use sales_data::transform::{transform, TransformResult};
use tracing::info;

/// Explicit inputs win; otherwise every `*.csv` under `data_dir`, sorted.
pub fn resolve_inputs(inputs: &[PathBuf], data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !inputs.is_empty() {
        return Ok(inputs.to_vec());
    }
    let found = find_csv_files(data_dir)?;
    info!("Discovered {} CSV files under {}", found.len(), data_dir.display());
    Ok(found)
}

/// Resolve inputs from `args` and run the transform.
pub fn run_transform(args: &TransformArgs) -> Result<TransformResult> {
    let inputs = resolve_inputs(&args.inputs, &args.data_dir)?;
    transform(&inputs, &args.output)
}
