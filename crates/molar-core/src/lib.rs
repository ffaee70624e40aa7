//! Molar Core
//!
//! Core engine for parsing chemical formula notation (element symbols,
//! numeric multiplicities, nested brackets) into element counts, with
//! precise diagnostics for malformed input.
//!
//! The pipeline has two passes: a six-state automaton scans the formula
//! right-to-left into tokens ([`tokenizer`]), and a weighted aggregation
//! pass resolves nested bracket multipliers into the count mapping
//! ([`aggregator`]). Data flows strictly one way:
//! formula text → token sequence → (counts, diagnostics).

pub mod aggregator;
pub mod console;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod result;
pub mod tokenizer;

// Re-export commonly used types
pub use aggregator::{ParseResult, aggregate};
pub use console::{Color, Console};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticRenderer, OutputFormat, Severity};
pub use error::MolarError;
pub use parser::{FormulaParser, ParseOptions, parse_molecule};
pub use result::Result;
pub use tokenizer::{Token, TokenKind, TokenNote, tokenize};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    init_tracing_with(None);
}

/// Initialize the tracing subscriber with an explicit filter directive,
/// falling back to the environment (then `molar=info`) when absent
pub fn init_tracing_with(directive: Option<&str>) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("molar=info"))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
