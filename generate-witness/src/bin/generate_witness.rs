use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use generate_witness::generate_witness;

#[cfg(feature = "fixture-backend")]
use witness_calculator::fixture::FixtureFactory as DefaultFactory;

#[cfg(not(feature = "fixture-backend"))]
compile_error!(
    "generate-witness needs a witness-calculator backend; build with the \
     `fixture-backend` feature or wire one in through the library API"
);

const USAGE: &str = "Usage: generate-witness <circuit.bin> <input.json> <output.wtns>";

/// Computes a circuit witness from a compiled witness-calculation module and a
/// JSON input assignment, writing the result as a binary .wtns file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Compiled witness-calculation module
    bytecode: PathBuf,
    /// JSON file mapping signal names to values
    input: PathBuf,
    /// Destination for the binary witness
    output: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        // Any other parse failure is a wrong invocation: usage line on
        // stdout, exit 1, before any file is touched.
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(err) = generate_witness(&DefaultFactory, &cli.bytecode, &cli.input, &cli.output) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
