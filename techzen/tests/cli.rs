//! CLI-level integration tests for the `techzen run` subcommand, driving
//! the binary end-to-end the way a user invokes it from a shell.

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".tz").unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn runs_a_float_literal() {
    let file = script("51.2");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("51.2"));
}

#[test]
fn runs_arithmetic_expression() {
    let file = script("27 + (43 / 36 - 38) * 51");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("-1883.75"));
}

#[test]
fn runs_var_assignment_and_access() {
    let file = script("VAR a = 5\nVAR b = a + 2\nb");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("7"));
}

#[test]
fn runs_if_expression() {
    let file = script("IF 1 THEN 'yes' ELSE 'no'");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("yes"));
}

#[test]
fn runs_for_loop_collecting_values() {
    let file = script("FOR i = 0 TO 3 THEN i");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("[0, 1, 2]"));
}

#[test]
fn runs_function_definition_and_call() {
    let file = script("FUN f(x) -> x * x\nf(6)");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("36"));
}

#[test]
fn runs_class_instantiation_and_method_call() {
    let file = script("CLASS A\nFUN A(v)\nVAR self.x = v\nEND\nFUN get()\nRETURN self.x\nEND\nEND\nVAR a = A(9)\na.get()");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("9"));
}

#[test]
fn runs_try_except_recovering_from_division_by_zero() {
    let file = script("VAR r = 'fail'\nTRY\nVAR r = 1 / 0\nEXCEPT\nVAR r = 'ok'\nEND\nr");
    Command::cargo_bin("techzen").unwrap().arg("run").arg(file.path()).assert().success().stdout(contains("ok"));
}

#[test]
fn division_by_zero_without_try_is_a_runtime_error() {
    let file = script("28 / 0");
    Command::cargo_bin("techzen")
        .unwrap()
        .arg("run")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("Division by zero"));
}

#[test]
fn undefined_identifier_is_a_runtime_error() {
    let file = script("nope");
    Command::cargo_bin("techzen")
        .unwrap()
        .arg("run")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("not defined"));
}

#[test]
fn wrong_arity_call_is_a_runtime_error() {
    let file = script("FUN f(x) -> x\nf(1, 2)");
    Command::cargo_bin("techzen")
        .unwrap()
        .arg("run")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("too many args"));
}

#[test]
fn illegal_character_is_a_lex_error() {
    let file = script("VAR a = @");
    Command::cargo_bin("techzen")
        .unwrap()
        .arg("run")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("IllegalChar"));
}

#[test]
fn unterminated_statement_is_a_syntax_error() {
    let file = script("VAR a =");
    Command::cargo_bin("techzen")
        .unwrap()
        .arg("run")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("InvalidSyntax"));
}

#[test]
fn missing_script_file_is_an_io_error() {
    Command::cargo_bin("techzen").unwrap().arg("run").arg("/nonexistent/path/to/script.tz").assert().failure();
}

#[test]
fn exit_builtin_stops_silently_with_no_output() {
    let file = script("print('before')\nexit()\nprint('after')");
    Command::cargo_bin("techzen")
        .unwrap()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("before"))
        .stdout(contains("after").not());
}
