use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use tracing::debug;

use crate::error::{Error, Result};

/// Slack subtracted before rounding the output extent up, so that a grid
/// already aligned to the target spacing keeps its shape.
const SHAPE_TOLERANCE: f64 = 1e-5;

/// The eight corner voxels of a volume of `shape`, in voxel coordinates.
#[rustfmt::skip]
pub fn get_corners(shape: [usize; 3]) -> Result<[Vector3<f64>; 8]> {
    if shape.contains(&0) {
        return Err(Error::UnsupportedShape { shape: shape.to_vec() });
    }
    let [x, y, z] = shape.map(|n| (n - 1) as f64);
    Ok([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, z),
        Vector3::new(0.0, y,   0.0),
        Vector3::new(0.0, y,   z),
        Vector3::new(x,   0.0, 0.0),
        Vector3::new(x,   0.0, z),
        Vector3::new(x,   y,   0.0),
        Vector3::new(x,   y,   z),
    ])
}

/// Map a point through a homogeneous 4x4 affine (linear part + translation).
pub fn apply_affine(affine: &Matrix4<f64>, point: &Vector3<f64>) -> Vector3<f64> {
    let h = affine * Vector4::new(point.x, point.y, point.z, 1.0);
    Vector3::new(h.x, h.y, h.z)
}

pub fn compose_affine(linear: &Matrix3<f64>, translation: &Vector3<f64>) -> Matrix4<f64> {
    let mut affine = linear.to_homogeneous();
    affine[(0, 3)] = translation.x;
    affine[(1, 3)] = translation.y;
    affine[(2, 3)] = translation.z;
    affine
}

pub fn split_affine(affine: &Matrix4<f64>) -> (Matrix3<f64>, Vector3<f64>) {
    let linear: Matrix3<f64> = affine.fixed_view::<3, 3>(0, 0).into_owned();
    let translation = Vector3::new(affine[(0, 3)], affine[(1, 3)], affine[(2, 3)]);
    (linear, translation)
}

/// Edge length of one voxel along each array axis (column norms of the linear part).
pub fn voxel_sizes(affine: &Matrix4<f64>) -> Vector3<f64> {
    let (linear, _) = split_affine(affine);
    Vector3::new(
        linear.column(0).norm(),
        linear.column(1).norm(),
        linear.column(2).norm(),
    )
}

/// Output-aligned shape and affine for the input implied by `in_shape` and `in_affine`.
///
/// The returned voxel grid has axes aligned with world space (diagonal,
/// positive linear part equal to `voxel_sizes`) and covers every input voxel
/// center once mapped to world space.
pub fn vox2out_vox(
    in_shape: [usize; 3],
    in_affine: &Matrix4<f64>,
    voxel_sizes: [f64; 3],
) -> Result<([usize; 3], Matrix4<f64>)> {
    if let Some(bad) = voxel_sizes.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(Error::InvalidArgument {
            arg: "voxel_sizes",
            value: bad.to_string(),
        });
    }

    let corners = get_corners(in_shape)?;
    let mut out_mn = Vector3::repeat(f64::INFINITY);
    let mut out_mx = Vector3::repeat(f64::NEG_INFINITY);
    for corner in corners.iter() {
        let world = apply_affine(in_affine, corner);
        out_mn = out_mn.inf(&world);
        out_mx = out_mx.sup(&world);
    }

    let sizes = Vector3::from(voxel_sizes);
    let extent = (out_mx - out_mn).component_div(&sizes);
    let out_shape =
        [0usize, 1, 2].map(|a| (extent[a] - SHAPE_TOLERANCE).ceil().max(0.0) as usize + 1);
    let out_affine = compose_affine(&Matrix3::from_diagonal(&sizes), &out_mn);

    debug!("vox2out_vox: {:?} -> {:?}, affine: {}", in_shape, out_shape, out_affine);
    Ok((out_shape, out_affine))
}
