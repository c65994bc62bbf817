use std::path::{Path, PathBuf};

use ::nifti::NiftiHeader;
use ::nifti::writer::WriterOptions;
use ndarray::ArrayD;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::volume::{Volume, paired_header_path};

fn write_nifti_file(path: &Path, header: &NiftiHeader, data: &ArrayD<f32>) -> ::nifti::Result<()> {
    WriterOptions::new(path.to_path_buf())
        .reference_header(header)
        .write_nifti(data)
}

/// Write `volume` to `path`, replacing any existing file.
///
/// Data is stored as `f32` with identity intensity scaling. Single-file
/// outputs (`.nii`, `.nii.gz`) are written inside a temporary directory next
/// to the target and moved into place once complete; an `.img` path writes
/// the `.hdr`/`.img` pair directly.
pub fn save_volume(volume: &Volume, path: &Path) -> Result<()> {
    let mut header = volume.header.clone();
    header.scl_slope = 1.0;
    header.scl_inter = 0.0;

    if let Some(hdr) = paired_header_path(path) {
        debug!("Writing header/image pair {:?}", hdr);
        return write_nifti_file(&hdr, &header, &volume.data).map_err(|e| Error::save(path, e));
    }

    let name = path.file_name().ok_or_else(|| Error::InvalidArgument {
        arg: "output",
        value: path.display().to_string(),
    })?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // The writer renames by extension; stage under the exact output name
    let staging = tempfile::Builder::new()
        .prefix(".voxpro-")
        .tempdir_in(&dir)
        .map_err(|e| Error::save(path, e))?;
    let tmp = staging.path().join(name);

    write_nifti_file(&tmp, &header, &volume.data).map_err(|e| Error::save(path, e))?;
    std::fs::rename(&tmp, path).map_err(|e| Error::save(path, e))?;
    debug!("Wrote {:?}", path);
    Ok(())
}
