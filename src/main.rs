use clap::{Parser, Subcommand};
use colored::Colorize;
use pkgsheet::cli;
use pkgsheet::config::{RegistryConfig, RegistryKind, LOG_ENV, PATH_ENV};
use pkgsheet::error::PkgsheetError;
use pkgsheet::sheet::{SheetFormat, DEFAULT_SHEET_NAME};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pkgsheet")]
#[command(about = "Check installed packages and turn JSON into spreadsheets.")]
#[command(long_about = "pkgsheet - installed-package checks and JSON to .ods / .xlsx

COMMANDS:
  has-package - Report whether a package is installed (exit 0 = yes, 1 = no)
  generate    - JSON to single-sheet OpenDocument (.ods) or Excel (.xlsx)
  inspect     - .ods / .xlsx to JSON

EXAMPLES:
  pkgsheet has-package requests --path /usr/lib/python3/dist-packages
  pkgsheet has-package ripgrep --registry cargo
  pkgsheet generate data.json data.ods
  pkgsheet generate data.json data.xlsx
  cat data.json | pkgsheet generate - - --format xlsx > data.xlsx
  pkgsheet inspect data.ods --records

LOGGING:
  Set PKGSHEET_LOG (e.g. PKGSHEET_LOG=pkgsheet=trace) or pass --verbose.")]
#[command(version)]
struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Report whether a package is installed.

Package names are compared after normalization: case is ignored and runs
of '-', '_' and '.' are equivalent (Foo_Bar == foo-bar).

REGISTRIES:
  dist-info  Scan site directories for *.dist-info / *.egg-info metadata.
             Directories come from --path (repeatable) or PKGSHEET_PATH.
  cargo      Read .crates2.json from --path, CARGO_HOME or ~/.cargo.

EXIT STATUS:
  0  installed
  1  not installed
  2  invalid package name
  3  registry could not be read")]
    /// Report whether a package is installed
    HasPackage {
        /// Package name (ASCII)
        name: String,

        /// Registry to query
        #[arg(short, long, value_enum, default_value_t = RegistryKind::DistInfo)]
        registry: RegistryKind,

        /// Search directory (dist-info) or Cargo home (cargo)
        #[arg(short, long = "path", env = PATH_ENV, value_delimiter = path_delimiter())]
        paths: Vec<PathBuf>,
    },

    #[command(long_about = "Convert a JSON document to a single-sheet spreadsheet.

LAYOUT BY SHAPE:
  [[1, 2], [3, 4]]          rows of cells
  [{\"a\": 1}, {\"b\": 2}]      header row of keys, one row per object
  {\"q1\": [1, 2], \"q2\": [3]}  header row of keys, values down each column
  {\"title\": \"x\", \"n\": 2}     key/value pairs in two columns
  [1, 2, 3]                 one cell per row
  \"text\" / 42 / true        single cell A1
  {} / []                   empty sheet

FORMAT:
  --format wins; otherwise the OUTPUT extension (.ods / .xlsx) decides;
  otherwise OpenDocument (.ods).

Use '-' for INPUT to read stdin and '-' for OUTPUT to write stdout.

EXIT STATUS:
  0  written
  2  malformed JSON or a value that cannot be laid out
  3  I/O failure")]
    /// Convert JSON to a single-sheet .ods or .xlsx
    Generate {
        /// JSON input file, or '-' for stdin
        input: PathBuf,

        /// Output spreadsheet (.ods / .xlsx), or '-' for stdout
        output: PathBuf,

        /// Worksheet name
        #[arg(short, long, default_value = DEFAULT_SHEET_NAME)]
        sheet_name: String,

        /// Output format [default: from OUTPUT extension, else ods]
        #[arg(short, long, value_enum)]
        format: Option<SheetFormat>,
    },

    /// Print the sheets of an .ods / .xlsx as JSON
    Inspect {
        /// Spreadsheet (.ods / .xlsx), or '-' for stdin
        file: PathBuf,

        /// Treat the first row as a header and print objects
        #[arg(long)]
        records: bool,
    },
}

const fn path_delimiter() -> char {
    if cfg!(windows) {
        ';'
    } else {
        ':'
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pkgsheet=debug"
    } else {
        "pkgsheet=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn report(err: PkgsheetError) -> ExitCode {
    eprintln!("{} {}", "Error:".red().bold(), err);
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::HasPackage {
            name,
            registry,
            paths,
        } => cli::has_package(name, RegistryConfig::new(registry, paths), cli.verbose).map(
            |installed| {
                if installed {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            },
        ),

        Commands::Generate {
            input,
            output,
            sheet_name,
            format,
        } => cli::generate(input, output, sheet_name, format, cli.verbose)
            .map(|_| ExitCode::SUCCESS),

        Commands::Inspect { file, records } => {
            cli::inspect(file, records).map(|_| ExitCode::SUCCESS)
        }
    };

    outcome.unwrap_or_else(report)
}
