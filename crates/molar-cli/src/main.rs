//! Molar CLI
//!
//! Command-line interface for the molar chemical-formula parsing toolkit

mod commands;
mod output;
mod samples;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use molar_core::{init_tracing, init_tracing_with};
use std::io;
use tracing::error;

#[derive(Parser)]
#[command(name = "molar")]
#[command(about = "Parse chemical formula notation into element counts")]
#[command(version = molar_core::VERSION)]
#[command(
    long_about = "Molar converts textual chemical-formula notation (element symbols,\n\
numeric multiplicities, nested brackets) into per-element atom counts,\n\
reporting malformed input precisely.\n\
\n\
Examples:\n  \
molar parse H2O              # Parse a single formula\n  \
molar parse 'K4[ON(SO3)2]2'  # Nested groups multiply recursively\n  \
molar parse --debug Hee2     # Show the scanned token sequence\n  \
molar samples                # Run the built-in sample catalogue"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one or more formulas
    Parse {
        /// Formulas to parse
        #[arg(required = true, help = "Formulas to parse, e.g. H2O 'Mg(OH)2'")]
        formulas: Vec<String>,

        /// Include the scanned token sequence in the output
        #[arg(long, help = "Show the token sequence for introspection")]
        debug: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Run the built-in catalogue of sample formulas
    Samples {
        /// Include the scanned token sequence in the output
        #[arg(long, help = "Show the token sequence for introspection")]
        debug: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable output with colors and context
    Human,
    /// JSON format for programmatic consumption
    Json,
}

fn main() {
    let cli = Cli::parse();

    match cli.verbose {
        0 => init_tracing(),
        1 => init_tracing_with(Some("molar=debug")),
        _ => init_tracing_with(Some("molar=trace")),
    }

    if let Some(shell) = cli.generate_completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    let use_colors = !cli.no_color;

    let outcome = match cli.command {
        Some(Commands::Parse {
            formulas,
            debug,
            format,
        }) => commands::parse_command(&formulas, debug, format, use_colors),
        Some(Commands::Samples { debug, format }) => {
            commands::samples_command(debug, format, use_colors).map(|()| false)
        }
        None => {
            let _ = Cli::command().print_help();
            return;
        }
    };

    match outcome {
        Ok(had_errors) => {
            if had_errors {
                std::process::exit(1);
            }
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(2);
        }
    }
}
