//! VOXPRO CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the batch,
//! and exit with appropriate status.
//! For programmatic use, prefer the library API (`voxpro::api`).

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse_normalized();
    cli::run(args)
}
