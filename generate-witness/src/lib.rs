//! Driver that turns a compiled circuit module plus a JSON input assignment
//! into a binary witness file.
//!
//! The driver is pure orchestration: read bytecode, parse inputs, hand both to
//! a [`CalculatorFactory`], write the returned buffer verbatim. Failure
//! handling follows a single policy: nothing is caught locally, every error
//! bubbles to the caller (ultimately `main`), which reports it and exits
//! non-zero. No retries, no cleanup of partially written output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use witness_calculator::{CalculatorFactory, InputAssignment};

/// Runs the full pipeline: bytecode load, input parse, calculator
/// construction, witness computation, output write — strictly in that order,
/// each step blocking until it completes.
///
/// The mode flag handed to the calculator is fixed at 0; its meaning belongs
/// to the backend.
pub fn generate_witness(
    factory: &dyn CalculatorFactory,
    bytecode_path: &Path,
    input_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let bytecode = fs::read(bytecode_path)
        .with_context(|| format!("failed to read bytecode module {}", bytecode_path.display()))?;
    log::debug!(
        "loaded {} bytecode bytes from {}",
        bytecode.len(),
        bytecode_path.display()
    );

    let input_json = fs::read_to_string(input_path)
        .with_context(|| format!("failed to read input file {}", input_path.display()))?;
    let inputs = InputAssignment::from_json_str(&input_json)
        .with_context(|| format!("failed to parse input file {}", input_path.display()))?;
    log::debug!("parsed {} input signal(s)", inputs.len());

    let mut calculator = factory
        .build(&bytecode)
        .context("failed to instantiate witness calculator")?;

    let witness = calculator
        .calculate_wtns_bin(&inputs, 0)
        .context("witness calculation failed")?;
    log::debug!("calculator produced {} witness bytes", witness.len());

    fs::write(output_path, &witness)
        .with_context(|| format!("failed to write witness file {}", output_path.display()))?;

    Ok(())
}
