//! make_binary_image - image to 1-bit C array
//!
//! Pipeline: decode -> channel plane -> threshold + pack -> C array on stdout
//!
//! Progress goes to stderr through `log`; stdout only ever receives the
//! complete array.

mod args;

use args::Args;
use clap::Parser;
use log::info;
use std::io::Write;

use epd_bitmap::{convert_path, format_c_array, ImageCrateSource};

/// Create the process-wide logger. Level defaults to `info`, `RUST_LOG` overrides.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<(), String> {
    init_logger();

    let args = Args::parse();
    info!("IMAGE: {}", args.image_path.display());

    let options = args.to_options();
    let packed = convert_path(&ImageCrateSource, &args.image_path, &options)
        .map_err(|e| e.to_string())?;

    info!("exporting");
    let text = format_c_array(&options.array_name, &packed);

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("Failed to write output: {}", e))?;

    Ok(())
}
