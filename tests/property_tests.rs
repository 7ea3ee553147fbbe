//! Property-based tests for the expression reader using proptest.
//!
//! These tests verify that:
//! 1. Rendering reaches a fixed point after two parse/render passes
//! 2. Inline and pipelined scanning produce the same parse for any input
//! 3. Arbitrary input never panics the parser

use proptest::prelude::*;

use bases::parser::{parse, parse_expression, OperatorTable, ParseOptions, Role, Scheduling};

fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[xyz][0-9]{0,2}".prop_map(|s| s.to_string()),
        (0u64..100_000).prop_map(|n| n.to_string()),
        (0u64..0xFFFF).prop_map(|n| format!("0x{:X}", n)),
        (0u32..100).prop_map(|n| format!("{}.5", n)),
        "\"[a-z ]{0,4}\"".prop_map(|s| s.to_string()),
        Just("'c'".to_string()),
    ]
}

fn infix_strategy() -> impl Strategy<Value = &'static str> {
    let names: Vec<&'static str> = OperatorTable::seeded()
        .operators(Role::Infix)
        .map(|op| op.kind.name())
        .collect();
    proptest::sample::select(names)
}

fn prefix_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec!["+", "-", "!", "~", "++", "--"])
}

fn expr_strategy() -> impl Strategy<Value = String> {
    atom_strategy().prop_recursive(5, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), infix_strategy(), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            (prefix_strategy(), inner.clone()).prop_map(|(p, e)| format!("{} {}", p, e)),
            inner.clone().prop_map(|e| format!("({})", e)),
            (inner, prop_oneof![Just("++"), Just("--")])
                .prop_map(|(e, p)| format!("{} {}", e, p)),
        ]
    })
}

fn pipelined(capacity: Option<usize>) -> ParseOptions {
    ParseOptions {
        scheduling: Scheduling::Pipelined { capacity },
        ..ParseOptions::default()
    }
}

proptest! {
    #[test]
    fn generated_expressions_parse_cleanly(source in expr_strategy()) {
        let parsed = parse_expression(&source);
        prop_assert!(parsed.is_clean(), "{}: {:?}", source, parsed.diagnostics);
        prop_assert!(!parsed.root.is_degraded());
    }

    #[test]
    fn rendering_reaches_fixed_point(source in expr_strategy()) {
        let once = parse_expression(&source).render();
        let twice = parse_expression(&once).render();
        let thrice = parse_expression(&twice).render();
        prop_assert_eq!(thrice, twice);
    }

    #[test]
    fn grouping_a_clean_expression_changes_nothing(source in expr_strategy()) {
        let plain = parse_expression(&source);
        let grouped = parse_expression(&format!("({})", source));
        prop_assert!(grouped.is_clean());
        prop_assert_eq!(grouped.render(), plain.render());
    }

    #[test]
    fn pipelined_matches_inline_on_expressions(
        source in expr_strategy(),
        capacity in proptest::option::of(0usize..4),
    ) {
        let table = OperatorTable::seeded();
        let inline = parse(&source, &table, &ParseOptions::default());
        prop_assert_eq!(parse(&source, &table, &pipelined(capacity)), inline);
    }

    #[test]
    fn pipelined_matches_inline_on_noise(
        source in "\\PC{0,40}",
        capacity in proptest::option::of(0usize..4),
    ) {
        let table = OperatorTable::seeded();
        let inline = parse(&source, &table, &ParseOptions::default());
        prop_assert_eq!(parse(&source, &table, &pipelined(capacity)), inline);
    }

    #[test]
    fn arbitrary_input_yields_a_tree(source in "[-+*/()a1 ;=.!]{0,600}") {
        let parsed = parse_expression(&source);
        prop_assert!(!parsed.render().is_empty());
        let offsets: Vec<usize> = parsed.diagnostics.iter().map(|d| d.offset).collect();
        let ordered = offsets.windows(2).all(|pair| pair[0] <= pair[1]);
        prop_assert!(ordered, "diagnostics out of order: {:?}", offsets);
    }
}
