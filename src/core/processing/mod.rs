pub mod geometry;
pub mod resample;
pub mod sampler;
