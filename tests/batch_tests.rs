// Integration tests for non-interactive printing

use bases::batch::Batch;
use bases::num::Base;
use bases::parser::ParseOptions;
use bases::BasesError;

fn report(batch: &Batch, sources: &[&str]) -> (bool, String) {
    let mut out = Vec::new();
    let clean = batch
        .print_all(&mut out, sources.iter().copied())
        .expect("printing failed");
    (clean, String::from_utf8(out).expect("report is not UTF-8"))
}

#[test]
fn test_clean_expression_report() {
    let batch = Batch::new(ParseOptions::default(), Base::Hex, false);
    let (clean, text) = report(&batch, &["x + 255 * 0b11"]);
    assert!(clean);
    assert_eq!(text, "(+ x (* 255 0b11))\n  255 = 0xFF\n  0b11 = 0x3\n");
}

#[test]
fn test_auto_base_keeps_written_base() {
    let batch = Batch::new(ParseOptions::default(), Base::Auto, false);
    let (_, text) = report(&batch, &["0o17 | 0x10 | 3"]);
    assert_eq!(text, "(| (| 0o17 0x10) 3)\n  0o17 = 0o17\n  0x10 = 0x10\n  3 = 3\n");
}

#[test]
fn test_diagnostics_are_located() {
    let batch = Batch::new(ParseOptions::default(), Base::Dec, false);
    let (clean, text) = report(&batch, &["1 +", "(2"]);
    assert!(!clean);
    assert_eq!(
        text,
        "(+ 1 EOF)\n  1 = 1\n\
         2\n1:3: unmatched delimiter: expected ')', found end of input\n  2 = 2\n"
    );
}

#[test]
fn test_overflowing_literal_is_reported() {
    let batch = Batch::new(ParseOptions::default(), Base::Dec, false);
    let (clean, text) = report(&batch, &["99999999999999999999"]);
    assert!(clean);
    assert!(text.ends_with("  99999999999999999999: integer literal overflows 64 bits\n"));
}

#[test]
fn test_check_mode_fails_fast() {
    let batch = Batch::new(ParseOptions::default(), Base::Dec, true);
    let mut out = Vec::new();
    let err = batch
        .print_all(&mut out, ["1", "a b", "2"])
        .unwrap_err();

    match err {
        BasesError::Syntax(parse_error) => {
            assert_eq!(parse_error.location.column, 3);
            assert_eq!(
                parse_error.message,
                "unexpected identifier 'b' after expression"
            );
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(String::from_utf8(out).unwrap(), "1\n  1 = 1\n");
}

#[test]
fn test_check_mode_reports_clean_input() {
    let batch = Batch::new(ParseOptions::default(), Base::Hex, true);
    let mut out = Vec::new();
    let clean = batch.print_all(&mut out, ["a + 255", "-b"]).unwrap();
    assert!(clean);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "(+ a 255)\n  255 = 0xFF\n(- b)\n"
    );
}

#[test]
fn test_lines_skip_blanks() {
    let batch = Batch::new(ParseOptions::default(), Base::Bin, false);
    let mut out = Vec::new();
    let clean = batch
        .print_lines(&mut out, "a\n\n   \n4\n".as_bytes())
        .unwrap();
    assert!(clean);
    assert_eq!(String::from_utf8(out).unwrap(), "a\n4\n  4 = 0b100\n");
}
