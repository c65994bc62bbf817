//! Shared types and enums used across VOXPRO.
//! Includes `BoundaryMode` (out-of-bounds sampling strategy) and
//! `InterpolationOrder` (sampling kernel degree).
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Strategy for sampling points that fall outside the input volume.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Points outside the volume take the fill value (`cval`).
    #[default]
    Constant,
    /// Points outside the volume take the value of the closest edge voxel.
    Nearest,
    /// Half-sample symmetric reflection about the volume edge.
    Reflect,
    /// Periodic extension of the volume.
    Wrap,
}

impl BoundaryMode {
    /// Map an integer voxel index onto `[0, len)` according to the mode.
    ///
    /// `Constant` clamps: out-of-range samples are rejected earlier by
    /// [`BoundaryMode::contains`], so only zero-weight neighbours reach here.
    pub fn resolve_index(self, index: i64, len: usize) -> usize {
        let n = len as i64;
        let mapped = match self {
            BoundaryMode::Constant | BoundaryMode::Nearest => index.clamp(0, n - 1),
            BoundaryMode::Reflect => {
                let m = index.rem_euclid(2 * n);
                if m >= n { 2 * n - 1 - m } else { m }
            }
            BoundaryMode::Wrap => index.rem_euclid(n),
        };
        mapped as usize
    }

    /// Whether a continuous coordinate along an axis of `len` voxels is
    /// sampled from the volume (as opposed to taking the fill value).
    pub fn contains(self, coord: f64, len: usize) -> bool {
        match self {
            BoundaryMode::Constant => {
                coord >= -COORD_TOLERANCE && coord <= (len - 1) as f64 + COORD_TOLERANCE
            }
            BoundaryMode::Nearest | BoundaryMode::Reflect | BoundaryMode::Wrap => true,
        }
    }
}

/// Slack applied when deciding whether a coordinate is inside the volume.
pub(crate) const COORD_TOLERANCE: f64 = 1e-5;

impl std::fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BoundaryMode::Constant => "constant",
            BoundaryMode::Nearest => "nearest",
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Wrap => "wrap",
        };
        write!(f, "{}", s)
    }
}

/// Degree of the resampling kernel.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum InterpolationOrder {
    Nearest,
    Linear,
}

impl TryFrom<u8> for InterpolationOrder {
    type Error = Error;

    fn try_from(order: u8) -> Result<Self> {
        match order {
            0 => Ok(InterpolationOrder::Nearest),
            1 => Ok(InterpolationOrder::Linear),
            other => Err(Error::UnsupportedOrder { order: other }),
        }
    }
}

impl From<InterpolationOrder> for u8 {
    fn from(order: InterpolationOrder) -> Self {
        match order {
            InterpolationOrder::Nearest => 0,
            InterpolationOrder::Linear => 1,
        }
    }
}

impl std::fmt::Display for InterpolationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpolationOrder::Nearest => write!(f, "Nearest"),
            InterpolationOrder::Linear => write!(f, "Linear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_is_half_sample_symmetric() {
        // d c b a | a b c d | d c b a
        let mapped: Vec<usize> = (-4..8)
            .map(|i| BoundaryMode::Reflect.resolve_index(i, 4))
            .collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
    }

    #[test]
    fn wrap_is_periodic() {
        let mapped: Vec<usize> = (-4..8)
            .map(|i| BoundaryMode::Wrap.resolve_index(i, 4))
            .collect();
        assert_eq!(mapped, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn nearest_and_constant_clamp() {
        for mode in [BoundaryMode::Nearest, BoundaryMode::Constant] {
            assert_eq!(mode.resolve_index(-3, 5), 0);
            assert_eq!(mode.resolve_index(2, 5), 2);
            assert_eq!(mode.resolve_index(9, 5), 4);
        }
    }

    #[test]
    fn single_voxel_axis() {
        for mode in [
            BoundaryMode::Constant,
            BoundaryMode::Nearest,
            BoundaryMode::Reflect,
            BoundaryMode::Wrap,
        ] {
            for i in -3..3 {
                assert_eq!(mode.resolve_index(i, 1), 0);
            }
        }
    }

    #[test]
    fn only_constant_rejects_outside_coordinates() {
        assert!(BoundaryMode::Constant.contains(0.0, 4));
        assert!(BoundaryMode::Constant.contains(3.0, 4));
        assert!(!BoundaryMode::Constant.contains(-0.5, 4));
        assert!(!BoundaryMode::Constant.contains(3.5, 4));
        assert!(BoundaryMode::Wrap.contains(-10.0, 4));
        assert!(BoundaryMode::Reflect.contains(10.0, 4));
    }

    #[test]
    fn order_from_integer() {
        assert_eq!(
            InterpolationOrder::try_from(0).unwrap(),
            InterpolationOrder::Nearest
        );
        assert_eq!(
            InterpolationOrder::try_from(1).unwrap(),
            InterpolationOrder::Linear
        );
        assert!(matches!(
            InterpolationOrder::try_from(3),
            Err(Error::UnsupportedOrder { order: 3 })
        ));
    }
}
