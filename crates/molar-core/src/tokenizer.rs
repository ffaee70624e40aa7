//! Scanning automaton for chemical formula notation
//!
//! The tokenizer reads the formula from the LAST character to the FIRST.
//! In formula notation a multiplicity always follows the element or group
//! it multiplies (`H2`, `(OH)2`), so scanning backward lets the automaton
//! see the full multiplier before the symbol it applies to, with no
//! lookahead.
//!
//! The reversed scan inverts the role of the bracket glyphs: a physical
//! `]`, `}` or `)` is where a group *begins* during the scan (its
//! multiplier is already known), so it produces a group-open token; a
//! physical `[`, `{` or `(` produces a group-close token. The aggregator
//! relies on this orientation.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticCode, Severity};

/// Glyphs that begin a group in the reversed scan
pub const GROUP_OPEN_GLYPHS: [char; 3] = [']', '}', ')'];

/// Glyphs that end a group in the reversed scan
pub const GROUP_CLOSE_GLYPHS: [char; 3] = ['[', '{', '('];

/// Automaton state, named for what was just read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    ReadingDigits,
    ReadingLowercase,
    ReadingUppercase,
    AtGroupBoundaryOpen,
    AtGroupBoundaryClose,
}

/// Input character classes the automaton distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit(u64),
    Uppercase(char),
    Lowercase(char),
    /// `]`, `}`, `)` — group-open in the reversed scan
    GroupOpen(char),
    /// `[`, `{`, `(` — group-close in the reversed scan
    GroupClose(char),
    /// Formula-continuation separator, e.g. `CO-OH`
    Hyphen,
    Illegal(char),
}

fn classify(c: char) -> CharClass {
    if let Some(d) = c.to_digit(10) {
        CharClass::Digit(u64::from(d))
    } else if c.is_ascii_uppercase() {
        CharClass::Uppercase(c)
    } else if c.is_ascii_lowercase() {
        CharClass::Lowercase(c)
    } else if GROUP_OPEN_GLYPHS.contains(&c) {
        CharClass::GroupOpen(c)
    } else if GROUP_CLOSE_GLYPHS.contains(&c) {
        CharClass::GroupClose(c)
    } else if c == '-' {
        CharClass::Hyphen
    } else {
        CharClass::Illegal(c)
    }
}

/// Kind of a scanned token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Element,
    GroupOpen,
    GroupClose,
    /// Placeholder for a character the automaton rejected
    Invalid,
}

/// Diagnostic tag attached to a token by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenNote {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
}

impl TokenNote {
    fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// A scanned unit of the formula
///
/// Tokens are produced in scan order (right-to-left) but represent
/// left-to-right formula structure once aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// One- or two-letter element symbol, a bracket glyph, or the
    /// offending character for invalid tokens
    pub symbol: String,
    pub multiplicity: u64,
    /// Character offset in the original (unreversed) formula
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<TokenNote>,
}

impl Token {
    fn new(kind: TokenKind, symbol: impl Into<String>, multiplicity: u64, pos: usize) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
            multiplicity,
            position: Some(pos),
            note: None,
        }
    }

    fn with_note(mut self, note: TokenNote) -> Self {
        self.note = Some(note);
        self
    }

    fn invalid(c: char, pos: usize, note: TokenNote) -> Self {
        Token::new(TokenKind::Invalid, c.to_string(), 0, pos).with_note(note)
    }

    /// True if the token carries an Error-severity note
    pub fn is_error(&self) -> bool {
        self.note
            .as_ref()
            .is_some_and(|n| n.severity == Severity::Error)
    }
}

/// Multiplicity accumulator for the reversed scan
///
/// Digits arrive lowest place first, so each new digit is worth one more
/// power of ten than the previous one: `"013"` scanned as `3`, `1`, `0`
/// accumulates 3, 13, 13.
///
/// A digit run too large for `u64` sets the `overflowed` flag instead of
/// wrapping; the emitted token then carries an Error note. Leading zeros
/// contribute nothing and never trip the flag, however many there are.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    value: u64,
    place: u64,
    overflowed: bool,
}

impl Accumulator {
    fn one() -> Self {
        Self {
            value: 1,
            place: 10,
            overflowed: false,
        }
    }

    fn start(digit: u64) -> Self {
        Self {
            value: digit,
            place: 10,
            overflowed: false,
        }
    }

    fn push(&mut self, digit: u64) {
        match digit
            .checked_mul(self.place)
            .and_then(|worth| self.value.checked_add(worth))
        {
            Some(value) => self.value = value,
            None => self.overflowed = true,
        }
        // Saturating is safe: a nonzero digit at a saturated place always
        // fails the checked step above, and a zero digit is worth nothing.
        self.place = self.place.saturating_mul(10);
    }
}

/// Scan `formula` back-to-front into an ordered token sequence.
///
/// Content-level problems never abort the scan: the offending character
/// yields a token tagged with an Error note and scanning continues, so
/// debug introspection can show everything that was read. The aggregator
/// decides where to halt.
pub fn tokenize(formula: &str) -> Vec<Token> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();

    let mut state = State::Initial;
    // Multiplicity captured from digits; sticky until consumed, matching
    // the pending-index discipline of the scan (a lowercase letter read
    // right after digits keeps them for its two-letter element).
    let mut acc = Accumulator::one();
    let mut pending_lower = '\0';

    // Emit an element or group-open token whose multiplicity came from
    // explicit digits, rejecting an explicit zero or an overflowed run.
    fn emit_counted(
        tokens: &mut Vec<Token>,
        kind: TokenKind,
        symbol: String,
        acc: Accumulator,
        pos: usize,
    ) {
        let token = Token::new(kind, symbol, acc.value, pos);
        if acc.overflowed {
            tokens.push(token.with_note(TokenNote::error(
                DiagnosticCode::CoefficientOverflow,
                "Coefficient is too large.",
            )));
        } else if acc.value == 0 {
            tokens.push(token.with_note(TokenNote::error(
                DiagnosticCode::ZeroCoefficient,
                "Coefficient equals 0.",
            )));
        } else {
            tokens.push(token);
        }
    }

    use CharClass::*;
    use State::*;

    for (pos, &c) in chars.iter().enumerate().rev() {
        match (classify(c), state) {
            (Digit(d), ReadingDigits) => {
                acc.push(d);
            }
            (Digit(d), _) => {
                acc = Accumulator::start(d);
                state = ReadingDigits;
            }

            (Uppercase(c), ReadingDigits) => {
                emit_counted(&mut tokens, TokenKind::Element, c.to_string(), acc, pos);
                state = ReadingUppercase;
            }
            (Uppercase(c), ReadingLowercase) => {
                let symbol = format!("{c}{pending_lower}");
                emit_counted(&mut tokens, TokenKind::Element, symbol, acc, pos);
                state = ReadingUppercase;
            }
            (Uppercase(c), Initial | ReadingUppercase | AtGroupBoundaryOpen | AtGroupBoundaryClose) => {
                tokens.push(Token::new(TokenKind::Element, c.to_string(), 1, pos));
                state = ReadingUppercase;
            }

            (Lowercase(c), ReadingLowercase) => {
                // Two lowercase letters are never adjacent in valid notation.
                tokens.push(Token::invalid(
                    c,
                    pos,
                    TokenNote::error(
                        DiagnosticCode::ConsecutiveLowercase,
                        "Consecutive lowercase letters.",
                    ),
                ));
                pending_lower = c;
            }
            (Lowercase(c), ReadingDigits) => {
                // The digits belong to the two-letter element this starts.
                pending_lower = c;
                state = ReadingLowercase;
            }
            (Lowercase(c), Initial | ReadingUppercase | AtGroupBoundaryOpen | AtGroupBoundaryClose) => {
                pending_lower = c;
                acc = Accumulator::one();
                state = ReadingLowercase;
            }

            (GroupOpen(c), ReadingDigits) => {
                emit_counted(&mut tokens, TokenKind::GroupOpen, c.to_string(), acc, pos);
                state = AtGroupBoundaryOpen;
            }
            (GroupOpen(c), Initial | ReadingUppercase | AtGroupBoundaryOpen) => {
                tokens.push(Token::new(TokenKind::GroupOpen, c.to_string(), 1, pos));
                state = AtGroupBoundaryOpen;
            }
            (GroupOpen(c), AtGroupBoundaryClose) => {
                // A group-close glyph sits immediately to the right of
                // this one, e.g. the `)(` adjacency in `(A)(B)`.
                tokens.push(
                    Token::new(TokenKind::GroupOpen, c.to_string(), 1, pos).with_note(
                        TokenNote::warning(
                            DiagnosticCode::UselessClosingBracket,
                            "Useless closing bracket.",
                        ),
                    ),
                );
                state = AtGroupBoundaryOpen;
            }
            (GroupOpen(c), ReadingLowercase) => {
                tokens.push(Token::invalid(
                    c,
                    pos,
                    TokenNote::error(
                        DiagnosticCode::LowercaseBeforeGroup,
                        "Lowercase letter before bracket.",
                    ),
                ));
                state = AtGroupBoundaryOpen;
            }

            (GroupClose(c), ReadingUppercase | AtGroupBoundaryClose) => {
                tokens.push(Token::new(TokenKind::GroupClose, c.to_string(), 0, pos));
                state = AtGroupBoundaryClose;
            }
            (GroupClose(c), Initial) => {
                // The formula ends with an opening bracket.
                tokens.push(Token::invalid(
                    c,
                    pos,
                    TokenNote::error(
                        DiagnosticCode::GroupOpenAtEnd,
                        "Formula ends with an opening bracket.",
                    ),
                ));
                state = AtGroupBoundaryClose;
            }
            (GroupClose(c), ReadingLowercase) => {
                tokens.push(Token::invalid(
                    c,
                    pos,
                    TokenNote::error(
                        DiagnosticCode::UnexpectedLowercase,
                        "Unexpected lowercase letter.",
                    ),
                ));
                state = AtGroupBoundaryClose;
            }
            (GroupClose(c), AtGroupBoundaryOpen) => {
                tokens.push(
                    Token::new(TokenKind::GroupClose, c.to_string(), 0, pos).with_note(
                        TokenNote::warning(DiagnosticCode::EmptyGroup, "Empty group was set."),
                    ),
                );
                state = AtGroupBoundaryClose;
            }
            (GroupClose(c), ReadingDigits) => {
                tokens.push(Token::invalid(
                    c,
                    pos,
                    TokenNote::error(DiagnosticCode::MisplacedDigit, "Misplaced digit."),
                ));
                state = AtGroupBoundaryClose;
            }

            // Separator: no token, no state change, e.g. CO-OH.
            (Hyphen, _) => {}

            (Illegal(c), _) => {
                tokens.push(Token::invalid(
                    c,
                    pos,
                    TokenNote::error(
                        DiagnosticCode::IllegalCharacter,
                        format!("Formula contains illegal character: '{c}'."),
                    ),
                ));
            }
        }
    }

    // A formula must begin with an uppercase letter or an opening bracket;
    // anything else gets flagged as a trailing synthetic token so the
    // aggregator halts on it.
    if let Some(&first) = chars.first()
        && !first.is_ascii_uppercase()
        && !GROUP_CLOSE_GLYPHS.contains(&first)
    {
        tokens.push(Token::invalid(
            first,
            0,
            TokenNote::error(
                DiagnosticCode::IrrelevantLeadingCharacter,
                format!("Formula begins with irrelevant character: '{first}'."),
            ),
        ));
    }

    tokens
}
