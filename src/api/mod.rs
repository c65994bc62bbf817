//! High-level, ergonomic library API: resample a loaded volume, a single file,
//! or a batch of files into an output directory. Prefer these entrypoints over
//! the low-level processing modules when integrating VOXPRO.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::params::ResampleParams;
use crate::core::processing::resample::resample_to_output;
use crate::error::{Error, Result};
use crate::io::volume::{Volume, load_volume};
use crate::io::writers::nifti::save_volume;

/// Destination of `input` inside `output_dir`: the input's base file name,
/// whatever directory it came from.
pub fn output_path_for(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| Error::InvalidArgument {
        arg: "input",
        value: input.display().to_string(),
    })?;
    Ok(output_dir.join(name))
}

/// Resample an in-memory volume to the isotropic resolution in `params`
pub fn resample_volume(volume: &Volume, params: &ResampleParams) -> Result<Volume> {
    params.validate()?;
    let (data, affine) = resample_to_output(
        volume.data.view(),
        &volume.affine,
        params.voxel_sizes(),
        params.order,
        params.mode,
        params.cval,
    )?;
    Ok(volume.with_grid(data, affine))
}

/// Load `input`, resample it and save it as `<output_dir>/<file name>`.
/// Returns the path written.
pub fn resample_file(input: &Path, output_dir: &Path, params: &ResampleParams) -> Result<PathBuf> {
    let output = output_path_for(input, output_dir)?;
    let volume = load_volume(input)?;
    let resampled = resample_volume(&volume, params)?;
    save_volume(&resampled, &output)?;
    Ok(output)
}

/// A file that could not be processed in continue-on-error mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: String,
}

/// Batch processing report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub params: ResampleParams,
    pub output_dir: PathBuf,
    pub processed: usize,
    pub errors: usize,
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<FailedFile>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    pub fn new(params: ResampleParams, output_dir: &Path) -> Self {
        Self {
            params,
            output_dir: output_dir.to_path_buf(),
            processed: 0,
            errors: 0,
            outputs: Vec::new(),
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// Resample every file of `inputs`, in order, into `output_dir`.
///
/// The output directory is created when there is at least one input. If
/// `continue_on_error` is false the first error is returned and the remaining
/// files are not touched; otherwise failures are recorded in the report and
/// processing continues.
pub fn process_files(
    inputs: &[PathBuf],
    output_dir: &Path,
    params: &ResampleParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    let mut report = BatchReport::new(params.clone(), output_dir);

    if !inputs.is_empty() {
        std::fs::create_dir_all(output_dir).map_err(|e| Error::save(output_dir, e))?;
    }

    for input in inputs {
        info!("Processing: {:?}", input);
        match resample_file(input, output_dir, params) {
            Ok(output) => {
                info!("Successfully processed: {:?} -> {:?}", input, output);
                report.processed += 1;
                report.outputs.push(output);
            }
            Err(e) => {
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
                warn!("Error processing {:?}: {}", input, e);
                report.failures.push(FailedFile {
                    input: input.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report.finished_at = Some(Utc::now());
    Ok(report)
}
