//! Public parse boundary for chemical formulas

use tracing::{debug, trace};

use crate::Result;
use crate::aggregator::{ParseResult, aggregate};
use crate::error::MolarError;
use crate::tokenizer::tokenize;

/// Options for a parse call
///
/// Passed explicitly into every call; there is no process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Return the full token sequence on the result for introspection.
    /// Affects only what is returned, never the computation.
    pub debug: bool,
}

impl ParseOptions {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Stateless formula parser
///
/// The parse is a pure, synchronous computation with no shared state, so
/// concurrent calls need no locking.
#[derive(Debug, Default)]
pub struct FormulaParser;

impl FormulaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse formula content (stateless, thread-safe)
    pub fn parse_content(formula: &str, options: &ParseOptions) -> ParseResult {
        trace!(formula, "tokenizing");
        let tokens = tokenize(formula);
        debug!(token_count = tokens.len(), "scanned formula");

        let mut result = aggregate(&tokens);
        if options.debug {
            result.tokens = Some(tokens);
        }

        debug!(
            elements = result.counts.len(),
            diagnostics = result.diagnostics.len(),
            valid = result.is_valid(),
            "aggregated formula"
        );
        result
    }
}

/// Parse a chemical formula into element counts and diagnostics.
///
/// `formula` models the possibly-absent input reference: `None` is misuse
/// of the interface and fails with [`MolarError::NullFormula`], distinct
/// from every content-level diagnostic. An empty string is a valid input
/// that parses to empty counts plus an `empty_formula` warning.
///
/// # Examples
///
/// ```
/// use molar_core::{ParseOptions, parse_molecule};
///
/// let result = parse_molecule(Some("K4[ON(SO3)2]2"), &ParseOptions::default()).unwrap();
/// assert!(result.is_valid());
/// assert_eq!(result.counts.get("S"), Some(&4));
/// ```
pub fn parse_molecule(formula: Option<&str>, options: &ParseOptions) -> Result<ParseResult> {
    let formula = formula.ok_or(MolarError::NullFormula)?;
    Ok(FormulaParser::parse_content(formula, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticCode, Severity};

    fn parse(formula: &str) -> ParseResult {
        FormulaParser::parse_content(formula, &ParseOptions::default())
    }

    fn parse_debug(formula: &str) -> ParseResult {
        FormulaParser::parse_content(formula, &ParseOptions::default().with_debug(true))
    }

    #[test]
    fn absent_formula_is_a_thrown_error() {
        let err = parse_molecule(None, &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, MolarError::NullFormula));
    }

    #[test]
    fn empty_formula_is_a_warning_not_an_error() {
        let result = parse("");

        assert!(result.is_valid());
        assert!(result.counts.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, DiagnosticCode::EmptyFormula);
    }

    #[test]
    fn water() {
        let result = parse("H2O");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("H"), Some(&2));
        assert_eq!(result.counts.get("O"), Some(&1));
    }

    #[test]
    fn magnesium_hydroxide() {
        let result = parse("Mg(OH)2");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("Mg"), Some(&1));
        assert_eq!(result.counts.get("O"), Some(&2));
        assert_eq!(result.counts.get("H"), Some(&2));
    }

    #[test]
    fn fremy_salt() {
        let result = parse("K4[ON(SO3)2]2");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("K"), Some(&4));
        assert_eq!(result.counts.get("O"), Some(&5));
        assert_eq!(result.counts.get("N"), Some(&2));
        assert_eq!(result.counts.get("S"), Some(&4));
    }

    #[test]
    fn iron_ii_nitrate() {
        let result = parse("Fe(NO3)2");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("Fe"), Some(&1));
        assert_eq!(result.counts.get("N"), Some(&2));
        assert_eq!(result.counts.get("O"), Some(&6));
    }

    #[test]
    fn deeply_nested_groups() {
        let result = parse("HeK17[C13ON[SO11]7ON[CHe5]3]2");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("He"), Some(&31));
        assert_eq!(result.counts.get("K"), Some(&17));
        assert_eq!(result.counts.get("C"), Some(&32));
        assert_eq!(result.counts.get("O"), Some(&158));
        assert_eq!(result.counts.get("N"), Some(&4));
        assert_eq!(result.counts.get("S"), Some(&14));
    }

    #[test]
    fn mismatched_glyph_styles_pair_freely() {
        let plain = parse("HeK17[C13ON[SO11]7ON[CHe5]3]2");
        let wrapped = parse("[HeK17[C13ON[SO11]7ON[CHe5]3]2}");

        assert!(wrapped.diagnostics.is_empty());
        assert_eq!(wrapped.counts, plain.counts);
    }

    #[test]
    fn outer_multiplier_scales_everything() {
        let result = parse("[HeK17[C13ON[SO11]7ON[CHe5]3]2}10");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("He"), Some(&310));
        assert_eq!(result.counts.get("O"), Some(&1580));
    }

    #[test]
    fn outer_multiplier_with_leading_zero() {
        let with_zero = parse("[HeK17[C13ON[SO11]7ON[CHe5]3]2}010");
        let without = parse("[HeK17[C13ON[SO11]7ON[CHe5]3]2}10");

        assert_eq!(with_zero.counts, without.counts);
        assert!(with_zero.diagnostics.is_empty());
    }

    #[test]
    fn hyphenated_formula() {
        let result = parse("CO-OH");

        assert!(result.diagnostics.is_empty());
        assert_eq!(result.counts.get("C"), Some(&2));
        assert_eq!(result.counts.get("O"), Some(&2));
        assert_eq!(result.counts.get("H"), Some(&1));
    }

    #[test]
    fn zero_coefficient_in_nested_group_is_fatal() {
        let result = parse("(CH(CH3)0)2");

        assert!(!result.is_valid());
        assert_eq!(
            result.errors().next().unwrap().code,
            DiagnosticCode::ZeroCoefficient
        );
    }

    #[test]
    fn zero_coefficient_on_element_is_fatal() {
        let result = parse("A0B1");

        assert!(!result.is_valid());
        assert_eq!(
            result.errors().next().unwrap().code,
            DiagnosticCode::ZeroCoefficient
        );
    }

    #[test]
    fn oversized_coefficient_is_a_diagnostic_not_a_panic() {
        let result = parse("H99999999999999999999");

        assert!(!result.is_valid());
        assert_eq!(
            result.errors().next().unwrap().code,
            DiagnosticCode::CoefficientOverflow
        );
    }

    #[test]
    fn lone_close_bracket_fails() {
        let result = parse("]");

        assert!(!result.is_valid());
        assert!(result.counts.is_empty());
        assert_eq!(result.errors().count(), 1);
        assert_eq!(
            result.errors().next().unwrap().code,
            DiagnosticCode::IrrelevantLeadingCharacter
        );
    }

    #[test]
    fn lone_open_bracket_fails() {
        let result = parse("{");

        assert!(!result.is_valid());
        assert!(result.counts.is_empty());
        assert_eq!(
            result.errors().next().unwrap().code,
            DiagnosticCode::GroupOpenAtEnd
        );
    }

    #[test]
    fn illegal_character_reaches_the_caller_as_error() {
        let result = parse("CH3@");

        assert!(!result.is_valid());
        let diag = result.errors().next().unwrap();
        assert_eq!(diag.code, DiagnosticCode::IllegalCharacter);
        assert_eq!(diag.position, Some(3));
    }

    #[test]
    fn warnings_leave_the_result_usable() {
        let result = parse("{}[[CH4]]");

        assert!(result.is_valid());
        assert_eq!(result.counts.get("C"), Some(&1));
        assert_eq!(result.counts.get("H"), Some(&4));
        assert_eq!(result.warnings().count(), 2);
        assert!(result.warnings().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn debug_flag_only_adds_tokens() {
        let plain = parse("Mg(OH)2");
        let debug = parse_debug("Mg(OH)2");

        assert!(plain.tokens.is_none());
        let tokens = debug.tokens.as_ref().unwrap();
        assert!(!tokens.is_empty());
        assert_eq!(plain.counts, debug.counts);
        assert_eq!(plain.diagnostics, debug.diagnostics);
    }

    #[test]
    fn parse_is_idempotent() {
        let first = parse_debug("K4[ON(SO3)2]2");
        let second = parse_debug("K4[ON(SO3)2]2");

        assert_eq!(first, second);
    }

    #[test]
    fn diagnostic_token_index_locates_the_token() {
        let result = parse_debug("Hee2");

        let diag = &result.diagnostics[0];
        let index = diag.token_index.unwrap();
        let token = &result.tokens.as_ref().unwrap()[index];
        assert!(token.is_error());
        assert_eq!(diag.position, token.position);
    }
}
