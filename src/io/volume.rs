//! NIfTI volume reader.
//!
//! The spatial transform of a volume is taken from the sform when present,
//! then from the qform quaternion, and finally from the voxel sizes alone
//! (centred on the volume, x flipped).
use std::path::{Path, PathBuf};

use nalgebra::Matrix4;
use ndarray::{Array3, ArrayD};
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use tracing::debug;

use crate::error::{Error, Result};

/// A loaded volume: voxel data in `[i, j, k, ...]` order plus its spatial metadata.
#[derive(Debug, Clone)]
pub struct Volume {
    pub data: ArrayD<f32>,
    pub header: NiftiHeader,
    /// Voxel index -> world (usually scanner mm) transform
    pub affine: Matrix4<f64>,
}

impl Volume {
    pub fn new(data: ArrayD<f32>, header: NiftiHeader) -> Self {
        let affine = header.affine::<f64>();
        Self {
            data,
            header,
            affine,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Derive a volume carrying new data on a new voxel grid, keeping the
    /// non-spatial header fields of `self`. The sform holds `affine` exactly
    /// and the qform its closest rigid fit.
    pub fn with_grid(&self, data: Array3<f32>, affine: Matrix4<f64>) -> Volume {
        let mut header = self.header.clone();
        header.set_affine(&affine);
        Volume {
            data: data.into_dyn(),
            header,
            affine,
        }
    }
}

/// For an Analyze-style `.img` data file, the `.hdr` file that describes it.
pub fn paired_header_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_suffix(".img.gz")
        .map(|s| format!("{s}.hdr.gz"))
        .or_else(|| name.strip_suffix(".img").map(|s| format!("{s}.hdr")))?;
    Some(path.with_file_name(stem))
}

/// Load a NIfTI volume (`.nii`, `.nii.gz`, or a `.hdr`/`.img` pair) as `f32`
/// with the header's intensity scaling applied.
pub fn load_volume(path: &Path) -> Result<Volume> {
    let source = paired_header_path(path).unwrap_or_else(|| path.to_path_buf());
    let object = ReaderOptions::new()
        .read_file(&source)
        .map_err(|e| Error::load(path, e))?;
    let header = object.header().clone();
    let data = object
        .into_volume()
        .into_ndarray::<f32>()
        .map_err(|e| Error::load(path, e))?;

    let volume = Volume::new(data, header);
    debug!(
        "Loaded {:?}: shape {:?}, affine: {}",
        path,
        volume.shape(),
        volume.affine
    );
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::geometry::{compose_affine, voxel_sizes};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};

    fn header_with_grid(dim: [u16; 3], pixdim: [f32; 3]) -> NiftiHeader {
        let mut header = NiftiHeader::default();
        header.dim = [3, dim[0], dim[1], dim[2], 1, 1, 1, 1];
        header.pixdim[1] = pixdim[0];
        header.pixdim[2] = pixdim[1];
        header.pixdim[3] = pixdim[2];
        header.sform_code = 0;
        header.qform_code = 0;
        header
    }

    fn volume_of(header: NiftiHeader) -> Volume {
        let [_, x, y, z, ..] = header.dim.map(usize::from);
        Volume::new(ArrayD::zeros(vec![x, y, z]), header)
    }

    #[test]
    #[rustfmt::skip]
    fn sform_takes_precedence() {
        let mut header = header_with_grid([4, 4, 4], [9.0, 9.0, 9.0]);
        header.sform_code = 1;
        header.qform_code = 1;
        header.srow_x = [0.0, 0.0, 2.0, -10.0];
        header.srow_y = [1.5, 0.0, 0.0, 4.0];
        header.srow_z = [0.0, -1.0, 0.0, 7.5];
        let expected = Matrix4::new(
            0.0, 0.0,  2.0, -10.0,
            1.5, 0.0,  0.0, 4.0,
            0.0, -1.0, 0.0, 7.5,
            0.0, 0.0,  0.0, 1.0,
        );
        assert_eq!(volume_of(header).affine, expected);
    }

    #[test]
    fn qform_quaternion_is_decoded() {
        let mut header = header_with_grid([4, 4, 4], [2.0, 3.0, 4.0]);
        header.qform_code = 1;
        // 180 degrees about z: (x, y) -> (-x, -y)
        header.quatern_b = 0.0;
        header.quatern_c = 0.0;
        header.quatern_d = 1.0;
        header.quatern_x = 10.0;
        header.quatern_y = 20.0;
        header.quatern_z = 30.0;
        header.pixdim[0] = -1.0;

        let expected = compose_affine(
            &Matrix3::from_diagonal(&Vector3::new(-2.0, -3.0, -4.0)),
            &Vector3::new(10.0, 20.0, 30.0),
        );
        assert_relative_eq!(volume_of(header).affine, expected, epsilon = 1e-9);
    }

    #[test]
    #[rustfmt::skip]
    fn pixdim_fallback_is_centred() {
        let header = header_with_grid([10, 20, 30], [2.0, 2.0, 2.0]);
        let expected = Matrix4::new(
            -2.0, 0.0, 0.0, 9.0,
            0.0,  2.0, 0.0, -19.0,
            0.0,  0.0, 2.0, -29.0,
            0.0,  0.0, 0.0, 1.0,
        );
        assert_relative_eq!(volume_of(header).affine, expected, epsilon = 1e-9);
    }

    #[test]
    fn new_grid_is_stored_in_sform() {
        let volume = volume_of(header_with_grid([4, 4, 4], [1.0, 1.0, 1.0]));
        let affine = compose_affine(
            &Matrix3::from_diagonal(&Vector3::repeat(1.5)),
            &Vector3::new(-90.0, -126.0, -72.0),
        );
        let resampled = volume.with_grid(Array3::zeros((3, 3, 3)), affine);
        assert!(resampled.header.sform_code > 0);
        assert_eq!(resampled.shape(), &[3, 3, 3]);
        assert_relative_eq!(resampled.header.affine::<f64>(), affine, epsilon = 1e-5);
        assert_relative_eq!(voxel_sizes(&resampled.affine), Vector3::repeat(1.5));
    }

    #[test]
    fn oblique_grid_survives_the_header() {
        let volume = volume_of(header_with_grid([4, 4, 4], [1.0, 1.0, 1.0]));
        let linear = Matrix3::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let affine = compose_affine(&linear, &Vector3::new(3.0, 0.0, -1.0));
        let resampled = volume.with_grid(Array3::zeros((4, 4, 4)), affine);
        assert_relative_eq!(resampled.header.affine::<f64>(), affine, epsilon = 1e-6);
    }

    #[test]
    fn analyze_pairs_resolve_to_header() {
        assert_eq!(
            paired_header_path(Path::new("/data/brain.img")),
            Some(PathBuf::from("/data/brain.hdr"))
        );
        assert_eq!(
            paired_header_path(Path::new("brain.img.gz")),
            Some(PathBuf::from("brain.hdr.gz"))
        );
        assert_eq!(paired_header_path(Path::new("brain.nii.gz")), None);
        assert_eq!(paired_header_path(Path::new("brain.hdr")), None);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_volume(Path::new("/definitely/not/here.nii")).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }
}
