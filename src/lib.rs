pub mod adjust;
pub mod annotate;
pub mod cli;
pub mod export;
pub mod formats;
pub mod model;
pub mod session;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
