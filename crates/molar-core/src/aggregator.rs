//! Weighted aggregation of scanned formula tokens
//!
//! Consumes the token sequence in scan order, mirroring bracket nesting
//! with a multiplier stack, and folds element tokens into the element
//! count mapping. The first Error-severity token halts processing
//! (fail-fast); Warning-severity tokens are recorded and then applied
//! normally.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::tokenizer::{Token, TokenKind};

/// Outcome of parsing a formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Element symbol to total atom count, in first-contribution order
    pub counts: IndexMap<String, u64>,
    pub diagnostics: Vec<Diagnostic>,
    /// Full token sequence, populated only when debug introspection was
    /// requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

impl ParseResult {
    /// True if no Error-severity diagnostic was recorded.
    ///
    /// A result that is not valid still carries the counts accumulated
    /// before the halt, but they cover only a prefix of the formula and
    /// must not be used for chemical interpretation.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_fatal())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_fatal())
    }
}

/// Fold the token sequence into element counts and diagnostics.
///
/// The multiplier stack starts at `[1]`; a group-open token pushes the
/// running product of enclosing multipliers, a group-close pops it.
/// Popping past the bottom of the stack means the formula closes more
/// groups than it opens, which is fatal.
pub fn aggregate(tokens: &[Token]) -> ParseResult {
    let mut weights: Vec<u64> = vec![1];
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if let Some(note) = &token.note {
            let diag = Diagnostic {
                severity: note.severity,
                code: note.code,
                token_index: Some(index),
                position: token.position,
                message: note.message.clone(),
            };
            let fatal = diag.is_fatal();
            diagnostics.push(diag);
            if fatal {
                return ParseResult {
                    counts,
                    diagnostics,
                    tokens: None,
                };
            }
            // Warnings do not suppress the token's structural effect.
        }

        match token.kind {
            TokenKind::Element => {
                let weight = *weights.last().unwrap_or(&1);
                let entry = counts.entry(token.symbol.clone()).or_insert(0);
                match token
                    .multiplicity
                    .checked_mul(weight)
                    .and_then(|contribution| entry.checked_add(contribution))
                {
                    Some(total) => *entry = total,
                    None => {
                        diagnostics.push(
                            Diagnostic::error(
                                DiagnosticCode::CoefficientOverflow,
                                "Element count is too large.",
                            )
                            .with_token_index(index)
                            .with_position(token.position),
                        );
                        return ParseResult {
                            counts,
                            diagnostics,
                            tokens: None,
                        };
                    }
                }
            }
            TokenKind::GroupOpen => {
                let weight = *weights.last().unwrap_or(&1);
                match weight.checked_mul(token.multiplicity) {
                    Some(product) => weights.push(product),
                    None => {
                        diagnostics.push(
                            Diagnostic::error(
                                DiagnosticCode::CoefficientOverflow,
                                "Group multiplier is too large.",
                            )
                            .with_token_index(index)
                            .with_position(token.position),
                        );
                        return ParseResult {
                            counts,
                            diagnostics,
                            tokens: None,
                        };
                    }
                }
            }
            TokenKind::GroupClose => {
                weights.pop();
                if weights.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(
                            DiagnosticCode::UnmatchedGroupClose,
                            "More closing than opening brackets.",
                        )
                        .with_token_index(index)
                        .with_position(token.position),
                    );
                    return ParseResult {
                        counts,
                        diagnostics,
                        tokens: None,
                    };
                }
            }
            TokenKind::Invalid => {
                // Reachable only for warning-free invalid tokens, which the
                // tokenizer never produces; nothing to fold either way.
            }
        }
    }

    if tokens.is_empty() {
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::EmptyFormula,
            "No proper formula: empty string.",
        ));
    } else {
        if counts.is_empty() {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::NoElementFound,
                "No element found.",
            ));
        }
        // Stack depth above the initial entry means unclosed groups.
        if weights.len() > 1 {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UnbalancedGroups,
                "More opening than closing brackets.",
            ));
        }
    }

    ParseResult {
        counts,
        diagnostics,
        tokens: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn counts_of(formula: &str) -> IndexMap<String, u64> {
        aggregate(&tokenize(formula)).counts
    }

    #[test]
    fn flat_formula_sums_multiplicities() {
        let counts = counts_of("H2O");

        assert_eq!(counts.get("H"), Some(&2));
        assert_eq!(counts.get("O"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn group_multiplier_applies_to_members() {
        let counts = counts_of("Mg(OH)2");

        assert_eq!(counts.get("Mg"), Some(&1));
        assert_eq!(counts.get("O"), Some(&2));
        assert_eq!(counts.get("H"), Some(&2));
    }

    #[test]
    fn nested_groups_multiply_recursively() {
        let counts = counts_of("K4[ON(SO3)2]2");

        assert_eq!(counts.get("K"), Some(&4));
        assert_eq!(counts.get("O"), Some(&5));
        assert_eq!(counts.get("N"), Some(&2));
        assert_eq!(counts.get("S"), Some(&4));
    }

    #[test]
    fn repeated_element_accumulates_across_groups() {
        let counts = counts_of("CO-OH");

        assert_eq!(counts.get("C"), Some(&2));
        assert_eq!(counts.get("O"), Some(&2));
        assert_eq!(counts.get("H"), Some(&1));
    }

    #[test]
    fn fail_fast_keeps_only_prefix_counts() {
        // Scan order is right-to-left, so the error at the second 'e'
        // precedes every element token.
        let result = aggregate(&tokenize("Hee2"));

        assert!(!result.is_valid());
        assert!(result.counts.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(
            result.diagnostics[0].code,
            DiagnosticCode::ConsecutiveLowercase
        );
        assert_eq!(result.diagnostics[0].token_index, Some(0));
    }

    #[test]
    fn popping_past_stack_bottom_is_fatal() {
        // A physical `[` with nothing to its left pops the root weight:
        // in scan orientation that is one close too many.
        let result = aggregate(&tokenize("(H"));

        assert!(!result.is_valid());
        assert_eq!(
            result.diagnostics[0].code,
            DiagnosticCode::UnmatchedGroupClose
        );
        assert_eq!(result.counts.get("H"), Some(&1));
    }

    #[test]
    fn element_count_overflow_is_fatal_not_a_panic() {
        // u64::MAX atoms of hydrogen, doubled by the enclosing group.
        let result = aggregate(&tokenize("(H18446744073709551615)2"));

        assert!(!result.is_valid());
        assert_eq!(
            result.diagnostics[0].code,
            DiagnosticCode::CoefficientOverflow
        );
    }

    #[test]
    fn nested_multiplier_overflow_is_fatal_not_a_panic() {
        // 2^32 * 2^32 exceeds the weight range before any element is read.
        let result = aggregate(&tokenize("((H)4294967296)4294967296"));

        assert!(!result.is_valid());
        assert!(result.counts.is_empty());
        assert_eq!(
            result.diagnostics[0].code,
            DiagnosticCode::CoefficientOverflow
        );
    }

    #[test]
    fn balanced_empty_groups_warn_without_unbalance() {
        let result = aggregate(&tokenize("[[]]"));

        assert!(result.is_valid());
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::EmptyGroup, DiagnosticCode::NoElementFound]
        );
    }

    #[test]
    fn excess_opens_warn_after_the_loop() {
        // A trailing physical `]` is a group-open in scan orientation that
        // never gets closed.
        let result = aggregate(&tokenize("H2O]"));

        assert!(result.is_valid());
        assert_eq!(result.counts.get("H"), Some(&2));
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![DiagnosticCode::UnbalancedGroups]);
    }

    #[test]
    fn warning_tokens_keep_their_structural_effect() {
        let result = aggregate(&tokenize("{}[[CH4]]"));

        assert!(result.is_valid());
        assert_eq!(result.counts.get("C"), Some(&1));
        assert_eq!(result.counts.get("H"), Some(&4));
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![
                DiagnosticCode::UselessClosingBracket,
                DiagnosticCode::EmptyGroup,
            ]
        );
    }

    #[test]
    fn empty_token_sequence_warns_empty_formula() {
        let result = aggregate(&[]);

        assert!(result.counts.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, DiagnosticCode::EmptyFormula);
    }

    #[test]
    fn warning_catalogue_case_accumulates_all_three() {
        let result = aggregate(&tokenize("[[]]]]"));

        assert!(result.is_valid());
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![
                DiagnosticCode::EmptyGroup,
                DiagnosticCode::NoElementFound,
                DiagnosticCode::UnbalancedGroups,
            ]
        );
    }
}
