use clap::Parser;
use climate_index::cli::{run, Cli};
use climate_index::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
