use nalgebra::{Matrix4, Vector3};
use ndarray::{Array3, ArrayView3, ArrayViewD, Axis, Ix3, Zip};
use tracing::{debug, info};

use crate::core::processing::geometry::{apply_affine, vox2out_vox};
use crate::core::processing::sampler::{Sampler, sampler_for};
use crate::error::{Error, Result};
use crate::types::{BoundaryMode, InterpolationOrder};

/// View a volume as 3D: 2D gains a trailing singleton axis and trailing
/// singleton axes beyond the third are dropped.
pub fn as_volume_3d(data: ArrayViewD<'_, f32>) -> Result<ArrayView3<'_, f32>> {
    let shape = data.shape().to_vec();
    let view = match shape.len() {
        2 => data.insert_axis(Axis(2)),
        3 => data,
        n if n > 3 && shape[3..].iter().all(|&d| d == 1) => {
            let mut view = data;
            while view.ndim() > 3 {
                let last = view.ndim() - 1;
                view = view.index_axis_move(Axis(last), 0);
            }
            view
        }
        _ => return Err(Error::UnsupportedShape { shape }),
    };
    view.into_dimensionality::<Ix3>()
        .map_err(|_| Error::UnsupportedShape { shape })
}

/// Resample `in_data` onto the voxel grid given by `out_shape` and `out_affine`.
///
/// Every output voxel is mapped through `inv(in_affine) * out_affine` to a
/// continuous input voxel coordinate and handed to `sampler`.
pub fn resample_from_to<S>(
    in_data: &ArrayView3<f32>,
    in_affine: &Matrix4<f64>,
    out_shape: [usize; 3],
    out_affine: &Matrix4<f64>,
    sampler: &S,
) -> Result<Array3<f32>>
where
    S: Sampler + ?Sized,
{
    if in_data.is_empty() || out_shape.contains(&0) {
        return Err(Error::UnsupportedShape {
            shape: out_shape.to_vec(),
        });
    }
    let inv_in_affine = in_affine.try_inverse().ok_or(Error::SingularAffine)?;
    let compound = inv_in_affine * out_affine;
    debug!("out voxel -> in voxel: {}", compound);

    let mut out = Array3::<f32>::zeros(out_shape);
    Zip::indexed(&mut out).par_for_each(|(i, j, k), value| {
        let coord = apply_affine(&compound, &Vector3::new(i as f64, j as f64, k as f64));
        *value = sampler.sample(in_data, &coord);
    });
    Ok(out)
}

/// Resample a volume to world-aligned axes with the given voxel sizes.
///
/// Returns the resampled data and its affine. `order` 0 is nearest-neighbour,
/// 1 is trilinear; anything else is rejected.
pub fn resample_to_output(
    in_data: ArrayViewD<'_, f32>,
    in_affine: &Matrix4<f64>,
    voxel_sizes: [f64; 3],
    order: u8,
    mode: BoundaryMode,
    cval: f32,
) -> Result<(Array3<f32>, Matrix4<f64>)> {
    let order = InterpolationOrder::try_from(order)?;
    let in_data = as_volume_3d(in_data)?;
    let (x, y, z) = in_data.dim();

    let (out_shape, out_affine) = vox2out_vox([x, y, z], in_affine, voxel_sizes)?;
    info!(
        "Resampling {}x{}x{} -> {}x{}x{} ({}, mode={}, cval={})",
        x, y, z, out_shape[0], out_shape[1], out_shape[2], order, mode, cval
    );

    let sampler = sampler_for(order, mode, cval);
    let out = resample_from_to(&in_data, in_affine, out_shape, &out_affine, sampler.as_ref())?;
    Ok((out, out_affine))
}
