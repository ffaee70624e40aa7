//! Built-in catalogue of sample formulas
//!
//! Grouped the way the catalogue reads best when printed: formulas that
//! must parse cleanly, formulas that parse with warnings, formulas that
//! must fail, then real-world compounds.

/// (name, formula) pairs for the `samples` subcommand
pub const SAMPLES: &[(&str, &str)] = &[
    // Must return the correct result:
    ("expected_success_1", "HeK17[C13ON[SO11]7ON[CHe5]3]2"),
    ("expected_success_2", "[HeK17[C13ON[SO11]7ON[CHe5]3]2}"),
    ("expected_success_3", "[HeK17[C13ON[SO11]7ON[CHe5]3]2}10"),
    ("expected_success_4", "[HeK17[C13ON[SO11]7ON[CHe5]3]2}010"),
    ("expected_success_5", "CO-OH"),
    // Parse with warnings:
    ("expected_warning_1", "[[]]]]"),
    ("expected_warning_2", "{}[[CH4]]"),
    ("expected_warning_3", "[[]]"),
    ("expected_warning_4", ""),
    // Must fail:
    ("expected_failure_1", "]"),
    ("expected_failure_2", "Hee2"),
    ("expected_failure_3", "3CO"),
    ("expected_failure_4", "4{"),
    ("expected_failure_5", "{"),
    ("expected_failure_6", "A0B1"),
    ("expected_failure_7", "(CH(CH3)0)2"),
    ("expected_failure_8", "CH3@"),
    ("expected_failure_9", "u"),
    // Real world examples:
    ("water", "H2O"),
    ("magnesium_hydroxide", "Mg(OH)2"),
    ("iron_ii_nitrate", "Fe(NO3)2"),
    ("fremy_salt", "K4[ON(SO3)2]2"),
];
