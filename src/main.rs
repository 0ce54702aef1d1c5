use anyhow::Result;
use clap::Parser;
use placeholder_icons::{icon_gen, painter};
use std::path::Path;

#[derive(Debug, Parser)]
#[clap(
    name = "placeholder-icons",
    version,
    about = "Create placeholder PNG icons (16, 32, 48, 128) in ./icons"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    let painter = painter::default_painter();
    let stdout = std::io::stdout();
    icon_gen::run(&painter, Path::new(icon_gen::OUTPUT_DIR), &mut stdout.lock())?;

    Ok(())
}
