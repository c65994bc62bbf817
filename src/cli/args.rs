use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use voxpro::{BoundaryMode, ResampleParams};

/// Single-dash spellings of long options accepted for compatibility
/// (`-order 0`, `-mode=wrap`, `-cval -1`).
const LEGACY_LONG_FLAGS: &[&str] = &["order", "mode", "cval"];

#[derive(Parser, Debug)]
#[command(
    name = "voxpro",
    version,
    about = "Resample NIfTI volumes to an isotropic voxel resolution",
    allow_negative_numbers = true
)]
pub struct CliArgs {
    /// Input NIfTI files (.nii, .nii.gz, .hdr/.img)
    #[arg(value_name = "INPUT")]
    pub input_images: Vec<PathBuf>,

    /// Target voxel resolution (edge length of an isotropic voxel)
    #[arg(short = 'r', long, default_value_t = 1.5)]
    pub resolution: f64,

    /// Interpolation order: 0 -> nearest, 1 -> trilinear
    #[arg(long, default_value_t = 1)]
    pub order: u8,

    /// Out-of-sample strategy (constant, nearest, reflect, wrap)
    #[arg(long, value_enum, default_value_t = BoundaryMode::Constant)]
    pub mode: BoundaryMode,

    /// Value used for points outside the input when mode=constant
    #[arg(long, default_value_t = 0.0)]
    pub cval: f32,

    /// Output directory (created if missing)
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Keep going after a file fails; exit non-zero at the end if any failed
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Write a JSON report of the batch to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CliArgs {
    /// Parse the process arguments, accepting the single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    pub fn params(&self) -> ResampleParams {
        ResampleParams {
            resolution: self.resolution,
            order: self.order,
            mode: self.mode,
            cval: self.cval,
        }
    }
}

/// Rewrite `-order`, `-mode` and `-cval` (optionally `=value`) to their `--`
/// forms. Everything after a bare `--` is left untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if positional_only {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                positional_only = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if LEGACY_LONG_FLAGS.contains(&name) {
                        OsString::from(format!("--{rest}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(normalize_legacy_flags(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["voxpro"]);
        assert!(args.input_images.is_empty());
        assert_eq!(args.params(), ResampleParams::default());
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.continue_on_error);
        assert!(args.report.is_none());
    }

    #[test]
    fn legacy_single_dash_flags() {
        let args = parse(&[
            "voxpro", "brain.img", "-r", "2.0", "-order", "0", "-mode", "wrap", "-cval=-3.5", "-o",
            "/out", "other.nii.gz",
        ]);
        assert_eq!(
            args.input_images,
            vec![PathBuf::from("brain.img"), PathBuf::from("other.nii.gz")]
        );
        assert_eq!(args.resolution, 2.0);
        assert_eq!(args.order, 0);
        assert_eq!(args.mode, BoundaryMode::Wrap);
        assert_eq!(args.cval, -3.5);
        assert_eq!(args.output_dir, PathBuf::from("/out"));
    }

    #[test]
    fn negative_fill_value_as_separate_argument() {
        let args = parse(&["voxpro", "-cval", "-1", "a.nii"]);
        assert_eq!(args.cval, -1.0);
        assert_eq!(args.input_images, vec![PathBuf::from("a.nii")]);
    }

    #[test]
    fn unvalidated_order_is_accepted_by_parser() {
        let args = parse(&["voxpro", "--order", "3"]);
        assert_eq!(args.order, 3);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let res = CliArgs::try_parse_from(normalize_legacy_flags(["voxpro", "-mode", "mirror"]));
        assert!(res.is_err());
    }

    #[test]
    fn normalization_leaves_other_arguments_alone() {
        let out = normalize_legacy_flags(["voxpro", "-r", "2", "--order", "1", "--", "-mode"]);
        let expected: Vec<OsString> = ["voxpro", "-r", "2", "--order", "1", "--", "-mode"]
            .into_iter()
            .map(OsString::from)
            .collect();
        assert_eq!(out, expected);
    }
}
