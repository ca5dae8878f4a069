//! A thin front-end standing in for the CLI/CSV-renderer collaborators
//! out of scope for the core crate: loads a file, calls `analyze`, and
//! prints the resulting `RomFile` with `{:#?}`. It does not render CSV,
//! guess keys, or load an external romdb — those stay as extension
//! points the core exposes rather than implements.

use std::fs;
use std::process;

use clap::Parser;
use romcore::{analyze, fidtable, Image};

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Path to the ROM image to analyze.
  path: String,
}

fn init_logging() {
  use std::io::Write;
  pretty_env_logger::formatted_builder()
    .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
    .filter_level(log::LevelFilter::Info)
    .init();
}

fn main() {
  init_logging();
  let args = Args::parse();

  let bytes = match fs::read(&args.path) {
    Ok(bytes) => bytes,
    Err(err) => {
      log::error!("failed to read {}: {err}", args.path);
      process::exit(1);
    }
  };

  let image = Image::new(bytes, args.path.clone());
  let catalog = fidtable::builtin_catalog();

  match analyze(image, &catalog) {
    Ok(rom) => println!("{rom:#?}"),
    Err(err) => {
      log::error!("analyze: {err}");
      process::exit(2);
    }
  }
}
