//! texpress CLI - LaTeX to PDF over HTTP.

mod check;
mod colors;
mod compile;
mod serve;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use texpress_core::{CompilerConfig, compile::DEFAULT_COMPILER};

#[derive(Parser)]
#[command(name = "texpress")]
#[command(about = "Compile LaTeX documents to PDF, locally or as an HTTP service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Engine settings shared by every command that compiles.
#[derive(Args, Clone)]
struct EngineArgs {
    /// LaTeX engine executable (name on PATH or a path)
    #[arg(long, default_value = DEFAULT_COMPILER)]
    compiler: PathBuf,

    /// Extra argument passed to the engine before the fixed ones (repeatable)
    #[arg(long = "compiler-arg", allow_hyphen_values = true)]
    compiler_args: Vec<String>,

    /// Kill the engine after this many seconds (default: wait indefinitely)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl EngineArgs {
    fn into_config(self, scratch_dir: PathBuf) -> CompilerConfig {
        CompilerConfig {
            program: self.compiler,
            extra_args: self.compiler_args,
            scratch_dir,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP compile service
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory for per-request temporary files (default: system temp dir)
        #[arg(long)]
        scratch_dir: Option<PathBuf>,

        /// Largest accepted request body in bytes
        #[arg(long, default_value_t = texpress_server::DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Compile a local .tex file to PDF
    Compile {
        /// Path to the .tex file
        file: PathBuf,

        /// Output path (default: input with .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show which engine would be used
    Check {
        /// LaTeX engine executable (name on PATH or a path)
        #[arg(long, default_value = DEFAULT_COMPILER)]
        compiler: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; the server is chatty at INFO, one-shot commands stay quiet
    let default_level = match (&cli.command, cli.verbose) {
        (_, true) => tracing::Level::DEBUG,
        (Commands::Serve { .. }, false) => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Helper to format texpress-core errors with recovery hints
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        if let Some(core_err) = err.downcast_ref::<texpress_core::Error>() {
            anyhow::anyhow!("{}", core_err.with_hint())
        } else {
            err
        }
    };

    match cli.command {
        Commands::Serve {
            host,
            port,
            scratch_dir,
            max_body_bytes,
            engine,
        } => {
            let scratch_dir = scratch_dir.unwrap_or_else(std::env::temp_dir);
            let config = texpress_server::ServerConfig {
                host,
                port,
                max_body_bytes,
                compiler: engine.into_config(scratch_dir),
            };
            serve::execute(config).await.map_err(format_error)?;
        }

        Commands::Compile {
            file,
            output,
            engine,
        } => {
            compile::execute(&file, output.as_deref(), engine)
                .await
                .map_err(format_error)?;
        }

        Commands::Check { compiler } => {
            check::execute(&compiler).map_err(format_error)?;
        }
    }

    Ok(())
}
