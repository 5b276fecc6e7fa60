use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

mod keymap;
mod run;

/// A CHIP-8 virtual machine with an SDL2 front end.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Window pixels per machine pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Delay between interpreter cycles, in milliseconds
    #[arg(short, long, default_value_t = 2)]
    delay: u64,

    /// Path of the ROM image to run
    rom: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(args.scale, Duration::from_millis(args.delay), &args.rom)
}
