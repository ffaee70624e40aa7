//! CLI command implementations

use anyhow::Result;
use molar_core::{ParseOptions, parse_molecule};
use tracing::debug;

use crate::OutputFormat;
use crate::output::{FormulaReport, OutputFormatter, ParseSummary};
use crate::samples::SAMPLES;

/// Parse command implementation
///
/// Returns true if any formula produced an Error diagnostic.
pub fn parse_command(
    formulas: &[String],
    debug_tokens: bool,
    format: OutputFormat,
    use_colors: bool,
) -> Result<bool> {
    debug!(count = formulas.len(), "running parse command");

    let options = ParseOptions::default().with_debug(debug_tokens);
    let mut reports = Vec::with_capacity(formulas.len());
    let mut summary = ParseSummary::default();

    for formula in formulas {
        let result = parse_molecule(Some(formula), &options)?;
        summary.record(&result);
        reports.push(FormulaReport {
            name: None,
            formula: formula.clone(),
            result,
        });
    }

    OutputFormatter::new(format, use_colors).print_results(&reports, &summary)?;
    Ok(summary.has_errors())
}

/// Samples command implementation
///
/// Runs the built-in catalogue. The catalogue deliberately contains
/// malformed formulas, so errors here are expected and do not affect the
/// exit code.
pub fn samples_command(debug_tokens: bool, format: OutputFormat, use_colors: bool) -> Result<()> {
    debug!(count = SAMPLES.len(), "running samples command");

    let options = ParseOptions::default().with_debug(debug_tokens);
    let mut reports = Vec::with_capacity(SAMPLES.len());
    let mut summary = ParseSummary::default();

    for (name, formula) in SAMPLES {
        let result = parse_molecule(Some(formula), &options)?;
        summary.record(&result);
        reports.push(FormulaReport {
            name: Some((*name).to_string()),
            formula: (*formula).to_string(),
            result,
        });
    }

    OutputFormatter::new(format, use_colors).print_results(&reports, &summary)?;
    Ok(())
}
