pub mod nifti;
pub mod report;
