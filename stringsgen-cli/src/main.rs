use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stringsgen::Indentation;
use stringsgen_cli::{
    CliOverrides, FileConfig, GenerateOptions, generate::run_generate_command,
    inspect::run_inspect_command, logging,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors to stderr
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate Swift accessors from `.strings` files.
    Generate {
        /// Input files or glob patterns
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Output file (single input). Prints to stdout when omitted
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Write `<file-stem>.swift` for every input into this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Name of the generated enum [default: L10n]
        #[arg(long)]
        enum_name: Option<String>,

        /// Indentation: `tab`, `spaces:N` or `N` [default: spaces:2]
        #[arg(long)]
        indent: Option<Indentation>,

        /// Fail on unparsable records and duplicate keys
        #[arg(long)]
        strict: bool,

        /// Config file [default: ./stringsgen.toml when present]
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the members and parameter types a `.strings` file produces.
    Inspect {
        /// The input file to inspect
        #[arg(short, long)]
        input: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let result = match args.commands {
        Commands::Generate {
            input,
            output,
            output_dir,
            enum_name,
            indent,
            strict,
            config,
        } => std::env::current_dir()
            .map_err(|e| format!("Cannot read current directory: {}", e))
            .and_then(|cwd| FileConfig::discover(config.as_deref(), &cwd))
            .and_then(|file_config| {
                let resolved = file_config.resolve(CliOverrides {
                    enum_name,
                    indentation: indent,
                    output_dir,
                    strict,
                });
                run_generate_command(GenerateOptions {
                    inputs: input,
                    output,
                    output_dir: resolved.output_dir,
                    build: resolved.build,
                    strict: resolved.strict,
                })
            }),
        Commands::Inspect { input, json } => run_inspect_command(&input, json),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
