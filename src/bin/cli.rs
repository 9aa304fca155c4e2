// src/bin/cli.rs
use octagon_scrape::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let code = cli::run()?;
    std::process::exit(code);
}
