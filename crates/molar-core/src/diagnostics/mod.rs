//! Diagnostics model for formula parsing
//!
//! All content-level problems are reported as [`Diagnostic`] values rather
//! than errors: an `Error`-severity diagnostic halts aggregation at the
//! token that produced it, while `Warning`-severity diagnostics accumulate
//! and leave the result usable.

pub mod renderer;

pub use renderer::{DiagnosticRenderer, OutputFormat};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; aggregation continues
    Warning,
    /// Fatal; aggregation stops at the offending token
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Machine-readable code identifying a diagnostic condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    IllegalCharacter,
    ZeroCoefficient,
    CoefficientOverflow,
    ConsecutiveLowercase,
    LowercaseBeforeGroup,
    UnexpectedLowercase,
    MisplacedDigit,
    GroupOpenAtEnd,
    IrrelevantLeadingCharacter,
    UnmatchedGroupClose,
    UselessClosingBracket,
    EmptyGroup,
    UnbalancedGroups,
    NoElementFound,
    EmptyFormula,
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DiagnosticCode::*;
        let name = match self {
            IllegalCharacter => "illegal_character",
            ZeroCoefficient => "zero_coefficient",
            CoefficientOverflow => "coefficient_overflow",
            ConsecutiveLowercase => "consecutive_lowercase",
            LowercaseBeforeGroup => "lowercase_before_group",
            UnexpectedLowercase => "unexpected_lowercase",
            MisplacedDigit => "misplaced_digit",
            GroupOpenAtEnd => "group_open_at_end",
            IrrelevantLeadingCharacter => "irrelevant_leading_character",
            UnmatchedGroupClose => "unmatched_group_close",
            UselessClosingBracket => "useless_closing_bracket",
            EmptyGroup => "empty_group",
            UnbalancedGroups => "unbalanced_groups",
            NoElementFound => "no_element_found",
            EmptyFormula => "empty_formula",
        };

        write!(f, "{name}")
    }
}

/// A single diagnostic produced while parsing a formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// Index into the token sequence that triggered this diagnostic;
    /// `None` for end-of-stream conditions (no element found, unbalanced
    /// groups, empty formula)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_index: Option<usize>,
    /// Character offset of the offending glyph in the original formula
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            token_index: None,
            position: None,
            message: message.into(),
        }
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            token_index: None,
            position: None,
            message: message.into(),
        }
    }

    pub fn with_token_index(mut self, index: usize) -> Self {
        self.token_index = Some(index);
        self
    }

    pub fn with_position(mut self, position: Option<usize>) -> Self {
        self.position = position;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}
