//! Lamb command-line checker
//!
//! Runs the error-correcting analyzer over `.lam` sources and reports every
//! lexical and syntax diagnostic it finds.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{check, tokens, ColorMode, Format};

#[derive(Parser)]
#[command(name = "lamb")]
#[command(about = "Error-correcting checker for lambda-binding statements", long_about = None)]
#[command(version)]
struct Cli {
    /// Log analyzer decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze files and report diagnostics
    Check {
        /// Files or directories to check
        #[arg(default_value = ".")]
        files: Vec<String>,
        /// Analyze this source text instead of files
        #[arg(short = 'e', long = "eval", value_name = "SOURCE")]
        source: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// When to use colors
        #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
        color: ColorMode,
        /// Print the rules visited for each statement
        #[arg(long)]
        trace: bool,
        /// Path to lamb.toml (default: search upwards from the current directory)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print the token stream of a file
    Tokens {
        /// File to tokenize
        #[arg(required_unless_present = "source")]
        file: Option<PathBuf>,
        /// Tokenize this source text instead of a file
        #[arg(short = 'e', long = "eval", value_name = "SOURCE", conflicts_with = "file")]
        source: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Plain)]
        format: Format,
        /// Path to lamb.toml (default: search upwards from the current directory)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber.
///
/// `LAMB_LOG` takes an `EnvFilter` directive; `-v` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("LAMB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            files,
            source,
            format,
            color,
            trace,
            config,
        } => {
            let found = check::execute(check::CheckArgs {
                files,
                source,
                format,
                color,
                trace,
                config,
            })?;
            if found > 0 {
                std::process::exit(1);
            }
        }

        Commands::Tokens {
            file,
            source,
            format,
            config,
        } => {
            tokens::execute(file, source, format, config)?;
        }
    }

    Ok(())
}
