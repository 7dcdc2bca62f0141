//! Compile command implementation for texpress CLI.
//!
//! Runs a local `.tex` file through the same pipeline the server uses.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use texpress_core::{Diagnostic, Error, LatexCompiler, LogError};

use crate::EngineArgs;
use crate::colors;

/// Longest diagnostic excerpt shown when the log has no `!` errors.
const SUMMARY_CHARS: usize = 500;

/// Compile `file` and write the PDF next to it (or to `output`).
pub async fn execute(file: &Path, output: Option<&Path>, engine: EngineArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    if file.extension().and_then(|ext| ext.to_str()) != Some("tex") {
        anyhow::bail!("Not a .tex file: {}", file.display());
    }
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let source = fs::read_to_string(file)?;
    if source.trim().is_empty() {
        anyhow::bail!("File is empty: {}", file.display());
    }

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(file));

    // Private scratch directory, removed when this returns
    let scratch = tempfile::Builder::new().prefix("texpress-").tempdir()?;
    let compiler = LatexCompiler::new(&engine.into_config(scratch.path().to_path_buf()))?;

    println!(
        "\n{}Compiling{} {}",
        colors::BOLD,
        colors::RESET,
        file.display()
    );
    println!(
        "{}  ◆ Engine:{} {}",
        colors::CYAN,
        colors::RESET,
        compiler.toolchain().program().display()
    );

    let doc = match compiler.compile(&source).await {
        Ok(doc) => doc,
        Err(Error::CompilerFailed(diagnostic)) => {
            print_diagnostic(&diagnostic);
            anyhow::bail!("Compilation failed");
        }
        Err(e) => return Err(e.into()),
    };

    fs::write(&output_path, &doc.pdf)?;

    println!(
        "{}Wrote{} {} {}({} bytes, {:.2}s){}",
        colors::GREEN,
        colors::RESET,
        output_path.display(),
        colors::DIM,
        doc.pdf.len(),
        start.elapsed().as_secs_f64(),
        colors::RESET
    );

    Ok(())
}

/// `paper.tex` → `paper.pdf` in the same directory.
fn default_output_path(file: &Path) -> PathBuf {
    file.with_extension("pdf")
}

/// One parsed log error as a colored terminal line.
fn format_log_error(error: &LogError) -> String {
    let label = format!("{}{}error{}", colors::BOLD, colors::RED, colors::RESET);
    match error.line {
        Some(line) => format!(
            "{label}: {} {}(line {line}){}",
            error.message,
            colors::DIM,
            colors::RESET
        ),
        None => format!("{label}: {}", error.message),
    }
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let errors = diagnostic.errors();

    println!();
    if errors.is_empty() {
        println!("{}", diagnostic.summary(SUMMARY_CHARS));
    } else {
        for error in &errors {
            println!("{}", format_log_error(error));
        }
    }
    println!(
        "\n{}hint:{} {}",
        colors::YELLOW,
        colors::RESET,
        diagnostic.kind.hint()
    );
    println!("{}{}{}", colors::RED, "─".repeat(50), colors::RESET);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("docs/paper.tex")),
            PathBuf::from("docs/paper.pdf")
        );
    }

    #[test]
    fn test_format_log_error_with_line() {
        let error = LogError {
            message: "Undefined control sequence.".to_string(),
            line: Some(3),
        };

        let line = format_log_error(&error);

        assert!(line.starts_with(colors::BOLD));
        assert!(line.contains("Undefined control sequence."));
        assert!(line.contains(&format!("{}(line 3){}", colors::DIM, colors::RESET)));
    }

    #[test]
    fn test_format_log_error_without_line() {
        let error = LogError {
            message: "Emergency stop.".to_string(),
            line: None,
        };

        let line = format_log_error(&error);

        assert!(line.ends_with(&format!("error{}: Emergency stop.", colors::RESET)));
        assert!(!line.contains("line"));
    }
}
