//! I/O layer for NIfTI volumes.
//! Provides the `volume` reader (data + header + affine) and `writers`
//! for resampled volumes and JSON batch reports.
pub mod volume;
pub use volume::{Volume, load_volume, paired_header_path};

pub mod writers;
pub use writers::nifti::save_volume;
pub use writers::report::write_batch_report;
