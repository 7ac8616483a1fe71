//! End-to-end mapping against intermediate files on disk.
//!
//! The verifier output used here mirrors what Boogie prints with `/nologo
//! /errorTrace:0`: one line per failure, an optional "Related location" line,
//! a blank line, and the summary banner last.

use std::fs;
use std::path::PathBuf;

use solc_verify_mapper::{
    DiagnosticKind, DiagnosticMapper, MapperError, SourceLocation, NO_ERRORS_FOUND,
};

/// Helper: fresh temp directory per test.
fn temp_dir(test_name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "solc-verify-mapper-test-{}-{}",
        test_name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

const TOKEN_BPL: &str = r#"// Generated by solc --boogie
procedure {:sourceloc "Token.sol", 5, 5} {:message "Token::transfer"} transfer#12(to: address_t, amount: int)
    requires {:sourceloc "Token.sol", 4, 9} {:message "Token::transfer: Precondition 'amount > 0' might not hold"} (amount > 0);
    ensures {:sourceloc "Token.sol", 3, 9} {:message "Token::transfer: Postcondition 'total == sum' might not hold"} (total == sum);
{
    assume {:sourceloc "Token.sol", 9, 9} true;
    call helper#20(amount);
    assert {:sourceloc "Token.sol", 11, 9} {:message "Overflow in addition"} (balance + amount <= 255);
    assume {:message "Token::helper: Precondition 'x < 100' might not hold"} true;
}
"#;

fn write_token_bpl(dir: &PathBuf) -> PathBuf {
    let path = dir.join("Token.sol.bpl");
    fs::write(&path, TOKEN_BPL).expect("write bpl");
    path
}

#[test]
fn maps_every_kind_from_disk() {
    let dir = temp_dir("every_kind");
    let bpl = write_token_bpl(&dir);
    let p = bpl.display();

    let output = format!(
        "{p}(8,5): Error BP5001: This assertion might not hold.\n\
         {p}(10,1): Error BP5003: A postcondition might not hold on this return path.\n\
         {p}(4,5): Related location: This is the postcondition that might not hold.\n\
         {p}(7,5): Error BP5002: A precondition for this call might not hold.\n\
         {p}(9,5): Related location: This is the precondition that might not hold.\n\
         {p}(2,11): Verification inconclusive (transfer#12)\n\
         \n\
         Boogie program verifier finished with 0 verified, 3 errors, 1 inconclusive\n"
    );

    let report = DiagnosticMapper::new().map_output(&output);
    assert!(report.anomalies.is_empty(), "{:?}", report.anomalies);
    assert_eq!(
        report.rendered_lines(),
        vec![
            "Token.sol, line 11, col 9: Overflow in addition".to_string(),
            "Token.sol, line 3, col 9: Token::transfer: Postcondition 'total == sum' might not hold"
                .to_string(),
            "Token.sol, line 9, col 9: Token::helper: Precondition 'x < 100' might not hold"
                .to_string(),
            "Token.sol, line 5, col 5: Inconclusive result for function 'Token::transfer'"
                .to_string(),
        ]
    );
    let summary = report.summary.expect("summary line");
    assert_eq!(summary.errors, 3);
    assert_eq!(summary.inconclusive, 1);
    assert!(!report.no_errors_found);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn clean_run_only_reports_success() {
    let dir = temp_dir("clean_run");
    write_token_bpl(&dir);

    let report =
        DiagnosticMapper::new().map_output("\nBoogie program verifier finished with 2 verified, 0 errors\n");
    assert_eq!(report.rendered_lines(), vec![NO_ERRORS_FOUND.to_string()]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn file_is_reread_for_each_reference() {
    let dir = temp_dir("reread");
    let bpl = write_token_bpl(&dir);
    let line = format!(
        "{}(8,5): Error BP5001: This assertion might not hold.",
        bpl.display()
    );
    let mapper = DiagnosticMapper::new();

    let before = mapper.map_lines(&[line.as_str()]);
    assert_eq!(
        before.diagnostics[0].location,
        Some(SourceLocation::new("Token.sol", 11, 9))
    );

    fs::write(&bpl, TOKEN_BPL.replace("\"Token.sol\", 11, 9", "\"Token.sol\", 12, 1"))
        .expect("rewrite bpl");
    let after = mapper.map_lines(&[line.as_str()]);
    assert_eq!(
        after.diagnostics[0].location,
        Some(SourceLocation::new("Token.sol", 12, 1))
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn bad_lines_do_not_stop_the_pass() {
    let dir = temp_dir("bad_lines");
    let bpl = write_token_bpl(&dir);
    let p = bpl.display();

    let output = format!(
        "garbage without a reference: This assertion might not hold.\n\
         {p}(8,5): Error BP5001: This assertion might not hold.\n\
         {}(1,1): Error BP5001: This assertion might not hold.\n\
         Boogie program verifier finished with 0 verified, 3 errors\n",
        dir.join("absent.bpl").display()
    );
    let report = DiagnosticMapper::new().map_output(&output);

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Assertion);
    assert_eq!(report.anomalies.len(), 2);
    assert!(matches!(report.anomalies[0].error, MapperError::Reference(_)));
    assert!(matches!(report.anomalies[1].error, MapperError::Io { .. }));

    let _ = fs::remove_dir_all(&dir);
}
