//! End-to-end tests for the `texpress` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn texpress() -> Command {
    Command::cargo_bin("texpress").unwrap()
}

#[test]
fn test_help_lists_commands() {
    texpress()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_compile_rejects_non_tex_input() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.md");
    fs::write(&file, "# hi").unwrap();

    texpress()
        .arg("compile")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a .tex file"));
}

#[test]
fn test_compile_rejects_empty_input() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("empty.tex");
    fs::write(&file, "  \n").unwrap();

    texpress()
        .arg("compile")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File is empty"));
}

#[test]
fn test_check_reports_missing_engine() {
    texpress()
        .args(["check", "--compiler", "/no/such/engine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("compiler not found"))
        .stderr(predicate::str::contains("hint"));
}

#[cfg(unix)]
mod with_shell_engine {
    use super::*;

    const ECHO_ENGINE: &str = r#"
out="${1#-output-directory=}"
stem="$(basename "$3" .tex)"
cp "$3" "$out/$stem.pdf"
"#;

    const FAILING_ENGINE: &str = r#"
out="${1#-output-directory=}"
stem="$(basename "$3" .tex)"
printf '! Undefined control sequence.\nl.3 \\notacommand\n' > "$out/$stem.log"
exit 1
"#;

    fn run_compile(temp: &TempDir, engine: &str, source: &str) -> assert_cmd::assert::Assert {
        let script = temp.path().join("engine.sh");
        fs::write(&script, engine).unwrap();
        let file = temp.path().join("paper.tex");
        fs::write(&file, source).unwrap();

        texpress()
            .arg("compile")
            .arg(&file)
            .args(["--compiler", "/bin/sh", "--compiler-arg"])
            .arg(&script)
            .assert()
    }

    #[test]
    fn test_compile_writes_pdf_next_to_source() {
        let temp = TempDir::new().unwrap();

        run_compile(&temp, ECHO_ENGINE, "%PDF-1.5 paper")
            .success()
            .stdout(predicate::str::contains("paper.pdf"));

        let pdf = fs::read(temp.path().join("paper.pdf")).unwrap();
        assert_eq!(pdf, b"%PDF-1.5 paper");
    }

    #[test]
    fn test_compile_failure_shows_errors_and_hint() {
        let temp = TempDir::new().unwrap();

        run_compile(&temp, FAILING_ENGINE, "\\notacommand")
            .failure()
            .stdout(predicate::str::contains("Undefined control sequence"))
            .stdout(predicate::str::contains("line 3"))
            .stdout(predicate::str::contains("hint"))
            .stderr(predicate::str::contains("Compilation failed"));

        assert!(!temp.path().join("paper.pdf").exists());
    }
}
