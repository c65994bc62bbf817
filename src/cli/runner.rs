use tracing::info;
use tracing_subscriber::EnvFilter;

use voxpro::BatchReport;
use voxpro::api::process_files;
use voxpro::io::write_batch_report;

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::new(if verbose { "debug" } else { "info" });
    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn run_batch(args: &CliArgs) -> Result<BatchReport, AppError> {
    let params = args.params();
    params.validate()?;
    if args.output_dir.exists() && !args.output_dir.is_dir() {
        return Err(AppError::NotADirectory {
            path: args.output_dir.clone(),
        });
    }

    info!(
        "Resampling {} file(s) to {} (order={}, mode={}, cval={})",
        args.input_images.len(),
        params.resolution,
        params.order,
        params.mode,
        params.cval
    );
    info!("Output directory: {:?}", args.output_dir);

    let report = process_files(
        &args.input_images,
        &args.output_dir,
        &params,
        args.continue_on_error,
    )?;

    if let Some(path) = &args.report {
        write_batch_report(&report, path)?;
    }

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Errors: {}", report.errors);
    Ok(report)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let report = run_batch(&args)?;
    if !report.is_success() {
        return Err(AppError::BatchFailed {
            errors: report.errors,
            total: args.input_images.len(),
        }
        .into());
    }
    Ok(())
}
