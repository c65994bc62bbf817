#![doc = r#"
VOXPRO — batch resampling of NIfTI volumes to an isotropic voxel resolution.

This crate loads medical-imaging volumes (`.nii`, `.nii.gz`, `.hdr`/`.img`),
resamples them onto a world-aligned voxel grid with a chosen edge length, and
writes them back with an updated affine. It powers the `voxpro` CLI and can be
embedded in your own Rust applications.

The resampling follows the conventions of `nibabel.processing.resample_to_output`:
the output grid covers all input voxel centers in world space, its axes are
aligned with world axes, and every voxel has the requested edge length.

Add dependency
--------------
```toml
[dependencies]
voxpro = "0.1"
```

Quick start: resample one file
------------------------------
```rust,no_run
use std::path::Path;
use voxpro::{resample_file, BoundaryMode, ResampleParams};

fn main() -> voxpro::Result<()> {
    let params = ResampleParams {
        resolution: 2.0,
        order: 0,
        mode: BoundaryMode::Constant,
        cval: 0.0,
    };
    let written = resample_file(Path::new("/data/brain.nii.gz"), Path::new("/out"), &params)?;
    println!("wrote {}", written.display());
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::{Path, PathBuf};
use voxpro::{process_files, ResampleParams};

fn main() -> voxpro::Result<()> {
    let inputs = vec![PathBuf::from("a.nii"), PathBuf::from("b.nii.gz")];
    let report = process_files(
        &inputs,
        Path::new("/out"),
        &ResampleParams::default(),
        true, // continue_on_error
    )?;
    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

In-memory resampling
--------------------
```rust
use ndarray::Array3;
use nifti::NiftiHeader;
use voxpro::{resample_volume, ResampleParams, Volume};

let data = Array3::<f32>::from_elem((9, 9, 9), 1.0).into_dyn();
let volume = Volume::new(data, NiftiHeader::default());
let params = ResampleParams { resolution: 2.0, ..ResampleParams::default() };
let out = resample_volume(&volume, &params).unwrap();
assert_eq!(out.shape(), &[5, 5, 5]);
```

Error handling
--------------
All public functions return `voxpro::Result<T>`; match on `voxpro::Error` to
tell load failures from save failures or resampling failures.

Useful modules
--------------
- [`api`] — high-level entry points (single file, batch).
- [`core`] — parameters, affine geometry, samplers and resampling routines.
- [`io`] — NIfTI reader/writer and JSON batch reports.
- [`types`] — `BoundaryMode`, `InterpolationOrder`.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::ResampleParams;
pub use error::{Error, Result};
pub use types::{BoundaryMode, InterpolationOrder};

// Resampling primitives
pub use crate::core::processing::geometry::vox2out_vox;
pub use crate::core::processing::resample::{resample_from_to, resample_to_output};
pub use crate::core::processing::sampler::{NearestNeighbor, Sampler, TriLinear};

// Volumes
pub use io::volume::{Volume, load_volume};
pub use io::writers::nifti::save_volume;

// High-level API re-exports
pub use api::{
    BatchReport, FailedFile, output_path_for, process_files, resample_file, resample_volume,
};
