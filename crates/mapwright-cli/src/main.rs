//! mapwright CLI - Mapper code generator
//!
//! Commands:
//! - `mapwright gen` - Generate mapper implementations for an annotated file
//! - `mapwright spec` - Print the assembled mapper spec as JSON

use clap::{ArgAction, Parser, Subcommand};
use mapwright_core::MapwrightError;

mod config;
mod generate;
mod logging;
mod rustfmt;

use config::Config;
use generate::PlaceholderWritten;

#[derive(Parser)]
#[command(name = "mapwright")]
#[command(author, version, about = "Generate mapper implementations from annotated Rust traits", long_about = None)]
struct Cli {
    /// Raise the log level (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mapper implementations
    Gen {
        /// Output file, relative to the input file's directory
        #[arg(short, long)]
        output: String,

        /// Annotated input file (default: $MAPWRIGHT_FILE, then gen.input)
        #[arg(short, long)]
        input: Option<String>,

        /// Path to mapwright.toml (default: ./mapwright.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print the assembled mapper spec as JSON
    Spec {
        /// Annotated input file (default: $MAPWRIGHT_FILE, then gen.input)
        #[arg(short, long)]
        input: Option<String>,

        /// Path to mapwright.toml (default: ./mapwright.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Gen {
            output,
            input,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            logging::init_logging(&config.log.level, cli.verbose);
            generate::run(&output, input, &config)?;
        }
        Commands::Spec { input, config } => {
            let config = Config::load(config.as_deref())?;
            logging::init_logging(&config.log.level, cli.verbose);
            println!("{}", generate::spec(input, &config)?);
        }
    }

    Ok(())
}

/// Usage errors exit 1 so they never collide with the parse error code;
/// `--help` and `--version` exit 0.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Process exit code for a failed command
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<MapwrightError>() {
        return err.exit_code();
    }
    if let Some(err) = err.downcast_ref::<PlaceholderWritten>() {
        return err.exit_code();
    }
    1
}
