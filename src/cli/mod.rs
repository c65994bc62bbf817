//! Command Line Interface (CLI) layer for VOXPRO.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the batch resampling flow.
//! It wires user-provided options to the library functionality exposed via
//! `voxpro::api`.
//!
//! If you are embedding VOXPRO into another application, prefer using
//! the high-level `voxpro::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
