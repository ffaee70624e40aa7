//! Output formatting and reporting
//!
//! This module handles the human and JSON output formats for parse
//! results.

use colored::*;
use molar_core::{DiagnosticRenderer, ParseResult, Severity};
use serde::Serialize;

use crate::OutputFormat;

/// One parsed formula ready for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FormulaReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub formula: String,
    #[serde(flatten)]
    pub result: ParseResult,
}

/// Summary statistics for a batch of parses
#[derive(Debug, Clone, Default)]
pub struct ParseSummary {
    pub formulas: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl ParseSummary {
    pub fn record(&mut self, result: &ParseResult) {
        self.formulas += 1;
        for diagnostic in &result.diagnostics {
            match diagnostic.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Output formatter for the supported formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        if !use_colors {
            colored::control::set_override(false);
        }
        Self { format, use_colors }
    }

    /// Format and print parse results
    pub fn print_results(&self, reports: &[FormulaReport], summary: &ParseSummary) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => self.print_human(reports, summary),
            OutputFormat::Json => self.print_json(reports),
        }
    }

    fn print_human(&self, reports: &[FormulaReport], summary: &ParseSummary) -> anyhow::Result<()> {
        let renderer = if self.use_colors {
            DiagnosticRenderer::new()
        } else {
            DiagnosticRenderer::no_colors()
        };

        for report in reports {
            if let Some(name) = &report.name {
                println!("{}", name.dimmed());
            }
            let shown = if report.formula.is_empty() {
                "\"\"".to_string()
            } else {
                report.formula.clone()
            };
            println!("{}", shown.bold());

            for (symbol, count) in &report.result.counts {
                println!("  {symbol}: {count}");
            }

            if !report.result.diagnostics.is_empty() {
                let rendered =
                    renderer.render_diagnostics(&report.result.diagnostics, &report.formula);
                for line in rendered.lines() {
                    println!("  {line}");
                }
            }

            if let Some(tokens) = &report.result.tokens {
                println!("  {}", "tokens:".dimmed());
                for (index, token) in tokens.iter().enumerate() {
                    println!(
                        "  [{index}] {:?} {} x{}",
                        token.kind, token.symbol, token.multiplicity
                    );
                }
            }

            println!();
        }

        let line = format!(
            "{} formula(s), {} error(s), {} warning(s)",
            summary.formulas, summary.errors, summary.warnings
        );
        if summary.has_errors() {
            println!("{}", line.red());
        } else if summary.warnings > 0 {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.green());
        }

        Ok(())
    }

    fn print_json(&self, reports: &[FormulaReport]) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(reports)?);
        Ok(())
    }
}
