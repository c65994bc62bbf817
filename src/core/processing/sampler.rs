use nalgebra::Vector3;
use ndarray::ArrayView3;

use crate::types::{BoundaryMode, InterpolationOrder};

/// A strategy producing one output value from a continuous input voxel coordinate.
///
/// Implementations are shared across worker threads while a volume is resampled.
pub trait Sampler: Sync {
    fn mode(&self) -> BoundaryMode;

    fn cval(&self) -> f32;

    fn sample(&self, volume: &ArrayView3<f32>, coord: &Vector3<f64>) -> f32;

    /// Whether `coord` reads from the volume or falls back to `cval`.
    fn in_sample(&self, dims: [usize; 3], coord: &Vector3<f64>) -> bool {
        (0..3usize).all(|a| self.mode().contains(coord[a], dims[a]))
    }
}

fn dims_of(volume: &ArrayView3<f32>) -> [usize; 3] {
    let (x, y, z) = volume.dim();
    [x, y, z]
}

/// Picks the value of the closest voxel. Corresponds to `order = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNeighbor {
    mode: BoundaryMode,
    cval: f32,
}

impl NearestNeighbor {
    pub fn new(mode: BoundaryMode, cval: f32) -> Self {
        Self { mode, cval }
    }
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new(BoundaryMode::Constant, 0.0)
    }
}

impl Sampler for NearestNeighbor {
    fn mode(&self) -> BoundaryMode {
        self.mode
    }

    fn cval(&self) -> f32 {
        self.cval
    }

    fn sample(&self, volume: &ArrayView3<f32>, coord: &Vector3<f64>) -> f32 {
        let dims = dims_of(volume);
        if !self.in_sample(dims, coord) {
            return self.cval;
        }
        let idx =
            [0usize, 1, 2].map(|a| self.mode.resolve_index(coord[a].round() as i64, dims[a]));
        volume[idx]
    }
}

/// Weighted mean of the 8 surrounding voxels. Corresponds to `order = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriLinear {
    mode: BoundaryMode,
    cval: f32,
}

impl TriLinear {
    pub fn new(mode: BoundaryMode, cval: f32) -> Self {
        Self { mode, cval }
    }
}

impl Default for TriLinear {
    fn default() -> Self {
        Self::new(BoundaryMode::Constant, 0.0)
    }
}

impl Sampler for TriLinear {
    fn mode(&self) -> BoundaryMode {
        self.mode
    }

    fn cval(&self) -> f32 {
        self.cval
    }

    fn sample(&self, volume: &ArrayView3<f32>, coord: &Vector3<f64>) -> f32 {
        let dims = dims_of(volume);
        if !self.in_sample(dims, coord) {
            return self.cval;
        }

        let base = [0usize, 1, 2].map(|a| coord[a].floor());
        let frac = [0usize, 1, 2].map(|a| coord[a] - base[a]);
        let lo = [0usize, 1, 2].map(|a| self.mode.resolve_index(base[a] as i64, dims[a]));
        let hi = [0usize, 1, 2]
            .map(|a| self.mode.resolve_index((base[a] as i64).saturating_add(1), dims[a]));

        let mut acc = 0.0f64;
        for corner in 0..8u8 {
            let mut weight = 1.0f64;
            let mut idx = [0usize; 3];
            for a in 0..3usize {
                if (corner >> (2 - a)) & 1 == 1 {
                    weight *= frac[a];
                    idx[a] = hi[a];
                } else {
                    weight *= 1.0 - frac[a];
                    idx[a] = lo[a];
                }
            }
            if weight != 0.0 {
                acc += weight * f64::from(volume[idx]);
            }
        }
        acc as f32
    }
}

/// Sampler for an interpolation order, boxed for dynamic selection at runtime.
pub fn sampler_for(order: InterpolationOrder, mode: BoundaryMode, cval: f32) -> Box<dyn Sampler> {
    match order {
        InterpolationOrder::Nearest => Box::new(NearestNeighbor::new(mode, cval)),
        InterpolationOrder::Linear => Box::new(TriLinear::new(mode, cval)),
    }
}
