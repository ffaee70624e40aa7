//! Diagnostic renderer for terminal and JSON output

use super::{Diagnostic, Severity};
use crate::console::{Color, Console};

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text with colors and a formula frame
    Text,
    /// JSON format for programmatic consumption
    Json,
    /// JSON with pretty-printing
    JsonPretty,
}

/// Diagnostic renderer with color support
pub struct DiagnosticRenderer {
    console: Console,
    output_format: OutputFormat,
}

impl DiagnosticRenderer {
    /// Create a renderer with automatic terminal detection (text output)
    pub fn new() -> Self {
        Self {
            console: Console::new(),
            output_format: OutputFormat::Text,
        }
    }

    /// Create a renderer with colors disabled
    pub fn no_colors() -> Self {
        Self {
            console: Console::no_colors(),
            output_format: OutputFormat::Text,
        }
    }

    /// Create a renderer with a specific output format
    pub fn with_format(format: OutputFormat) -> Self {
        let console = match format {
            OutputFormat::Json | OutputFormat::JsonPretty => Console::no_colors(),
            OutputFormat::Text => Console::new(),
        };

        Self {
            console,
            output_format: format,
        }
    }

    /// Render a single diagnostic without source context
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        match self.output_format {
            OutputFormat::Text => self.render_header(diagnostic),
            OutputFormat::Json => self.render_json(std::slice::from_ref(diagnostic), false),
            OutputFormat::JsonPretty => self.render_json(std::slice::from_ref(diagnostic), true),
        }
    }

    /// Render diagnostics against the formula they were produced from
    pub fn render_diagnostics(&self, diagnostics: &[Diagnostic], formula: &str) -> String {
        match self.output_format {
            OutputFormat::Text => {
                let mut output = String::new();
                for diagnostic in diagnostics {
                    output.push_str(&self.render_text(diagnostic, formula));
                }
                output
            }
            OutputFormat::Json => self.render_json(diagnostics, false),
            OutputFormat::JsonPretty => self.render_json(diagnostics, true),
        }
    }

    fn render_text(&self, diagnostic: &Diagnostic, formula: &str) -> String {
        let mut output = String::new();
        output.push_str(&self.render_header(diagnostic));
        output.push('\n');
        if let Some(frame) = self.render_formula_frame(diagnostic, formula) {
            output.push_str(&frame);
        }
        output
    }

    fn render_json(&self, diagnostics: &[Diagnostic], pretty: bool) -> String {
        if pretty {
            serde_json::to_string_pretty(diagnostics)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
        } else {
            serde_json::to_string(diagnostics)
                .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
        }
    }

    /// Header: severity[code]: message
    fn render_header(&self, diagnostic: &Diagnostic) -> String {
        let severity_color = match diagnostic.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let severity = self
            .console
            .colorize(&diagnostic.severity.to_string(), severity_color);
        let code = self
            .console
            .colorize(&format!("[{}]", diagnostic.code), Color::Dim);
        let message = self.console.colorize(&diagnostic.message, Color::Bold);

        format!("{severity}{code}: {message}")
    }

    /// Echo the formula with a caret under the offending character.
    ///
    /// End-of-stream diagnostics carry no position and get no frame.
    fn render_formula_frame(&self, diagnostic: &Diagnostic, formula: &str) -> Option<String> {
        let position = diagnostic.position?;
        if formula.is_empty() || position >= formula.chars().count() {
            return None;
        }

        let highlight_color = match diagnostic.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let mut frame = String::new();
        frame.push_str("  ");
        frame.push_str(formula);
        frame.push('\n');
        frame.push_str("  ");
        frame.push_str(&" ".repeat(position));
        frame.push_str(&self.console.colorize("^", highlight_color));
        frame.push('\n');

        Some(frame)
    }
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self::new()
    }
}
