//! Core resampling building blocks: run parameters, affine geometry,
//! samplers and the resampling routines. These are internal primitives
//! consumed by the high-level `api` module.
pub mod params;
pub mod processing;
