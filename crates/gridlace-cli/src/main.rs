//! `gridlace`: generate, solve and play gridlace puzzles from the terminal.
//!
//! ```sh
//! gridlace presets mathrax
//! gridlace generate spokes --preset "6x6 Tricky" -n 4 --show
//! gridlace solve salad 5n3Lde:BaAbiCe,
//! gridlace play mathrax 3de:123f,A4c "R0,1,2;R1,1,3"
//! ```
//!
//! Set `RUST_LOG=debug` to follow the generator.

use std::process;

use clap::Parser as _;

use crate::args::Args;

mod args;
mod command;
mod error;

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match command::run(&args.command) {
        Ok(out) => print!("{out}"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
