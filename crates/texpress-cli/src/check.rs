//! Check command implementation for texpress CLI.

use std::path::Path;

use texpress_core::Toolchain;

use crate::colors;

/// Print the resolved engine and its version.
pub fn execute(compiler: &Path) -> anyhow::Result<()> {
    let toolchain = Toolchain::resolve(compiler, Vec::new())?;
    let version = toolchain.version()?;

    println!(
        "{}  ◆ Engine:{} {}",
        colors::CYAN,
        colors::RESET,
        toolchain.program().display()
    );
    println!("{}  ◆ Version:{} {}", colors::CYAN, colors::RESET, version);

    Ok(())
}
