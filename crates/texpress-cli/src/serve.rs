//! Serve command implementation for texpress CLI.
//!
//! Starts the HTTP compile service.

use texpress_server::{ServerConfig, ServerError};

use crate::colors;

/// Start the compile server.
pub async fn execute(config: ServerConfig) -> anyhow::Result<()> {
    println!(
        "\n{}texpress{} - LaTeX compile service",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));
    println!(
        "{}  ◆ Engine:{} {}",
        colors::CYAN,
        colors::RESET,
        config.compiler.program.display()
    );
    println!(
        "{}  ◆ Scratch:{} {}",
        colors::CYAN,
        colors::RESET,
        config.compiler.scratch_dir.display()
    );
    println!(
        "{}  ◆ Endpoint:{} POST http://{}:{}/compile",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    // Surface core errors directly so main can attach their hints
    texpress_server::serve(config).await.map_err(|e| match e {
        ServerError::Compile(core) => anyhow::Error::from(core),
        other => anyhow::Error::from(other),
    })?;

    Ok(())
}
