//! NINA build environment CLI
//!
//! Entry point for the `nina-env` command-line tool.

use clap::{Parser, Subcommand};
use nina_buildenv::config::ProcessEnv;
use nina_buildenv::flags::{self, render};
use nina_buildenv::status::write_status;
use nina_buildenv::{load_config, ConfigError, Definition, FlagFormat, ResolvedConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "nina-env")]
#[command(about = "Resolve WiFi/OTA build settings for the NINA dashboard firmware", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root containing the .env file
    #[arg(long, global = true, env = "PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Path to the env file (default: <project-dir>/.env)
    #[arg(long, short = 'e', global = true)]
    env_file: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print build definitions for the firmware build
    Flags {
        /// Output format: platformio, cargo or header
        #[arg(long, short = 'f', default_value = "platformio")]
        format: FlagFormat,

        /// Do not print the status summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Print the redacted status summary
    Status,

    /// Print the resolved configuration as JSON, with secrets redacted
    Show,

    /// Check that the configuration can be emitted
    Check,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG takes precedence; otherwise --verbose selects DEBUG over WARN.
    let default_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();

    let env_path = env_file_path(cli.project_dir.as_deref(), cli.env_file.as_deref());

    let result = match cli.command {
        Commands::Flags { format, quiet } => run_flags(&env_path, format, quiet),
        Commands::Status => run_status(&env_path),
        Commands::Show => run_show(&env_path),
        Commands::Check => run_check(&env_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn env_file_path(project_dir: Option<&Path>, env_file: Option<&Path>) -> PathBuf {
    match (env_file, project_dir) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) => dir.join(".env"),
        (None, None) => PathBuf::from(".env"),
    }
}

fn resolve(env_path: &Path) -> Result<ResolvedConfig, ConfigError> {
    tracing::debug!("resolving configuration from {}", env_path.display());
    load_config(env_path, ProcessEnv)
}

fn run_flags(env_path: &Path, format: FlagFormat, quiet: bool) -> Result<(), ConfigError> {
    let resolved = resolve(env_path)?;

    let mut defs: Vec<Definition> = Vec::new();
    flags::emit_build_flags(&resolved, &mut defs)?;

    let rendered = render::render(&defs, format, Some(env_path))?;
    io::stdout()
        .write_all(rendered.as_bytes())
        .map_err(|e| ConfigError::io(Path::new("<stdout>"), e))?;

    if !quiet {
        write_status(&resolved, resolved.defaults(), &mut io::stderr())
            .map_err(|e| ConfigError::io(Path::new("<stderr>"), e))?;
    }

    Ok(())
}

fn run_status(env_path: &Path) -> Result<(), ConfigError> {
    let resolved = resolve(env_path)?;
    write_status(&resolved, resolved.defaults(), &mut io::stdout())
        .map_err(|e| ConfigError::io(Path::new("<stdout>"), e))
}

fn run_show(env_path: &Path) -> Result<(), ConfigError> {
    let resolved = resolve(env_path)?;
    println!("{}", resolved.to_redacted_json()?);
    Ok(())
}

fn run_check(env_path: &Path) -> Result<(), ConfigError> {
    let resolved = resolve(env_path)?;

    let mut scratch: Vec<Definition> = Vec::new();
    flags::emit_build_flags(&resolved, &mut scratch)?;

    if resolved.env_file().present {
        println!("Configuration valid: {}", env_path.display());
    } else {
        println!("Configuration valid (no env file at {})", env_path.display());
    }
    println!("  Definitions: {}", scratch.len());
    Ok(())
}
