use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BoundaryMode, InterpolationOrder};

/// Resampling parameters shared by every file of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleParams {
    /// Target isotropic voxel edge length, in the units of the affine (usually mm)
    pub resolution: f64,
    /// Interpolation order: 0 = nearest, 1 = linear. Other values are rejected
    /// when the resampler is built, not when parameters are parsed.
    pub order: u8,
    pub mode: BoundaryMode,
    /// Fill value for `BoundaryMode::Constant`
    pub cval: f32,
}

impl Default for ResampleParams {
    fn default() -> Self {
        Self {
            resolution: 1.5,
            order: 1,
            mode: BoundaryMode::Constant,
            cval: 0.0,
        }
    }
}

impl ResampleParams {
    pub fn voxel_sizes(&self) -> [f64; 3] {
        [self.resolution; 3]
    }

    pub fn interpolation_order(&self) -> Result<InterpolationOrder> {
        InterpolationOrder::try_from(self.order)
    }

    /// Reject resolutions that cannot define a voxel grid.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "resolution",
                value: self.resolution.to_string(),
            });
        }
        Ok(())
    }
}
