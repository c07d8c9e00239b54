use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ampscheme::convert::{self, ConvertOpts, InputFormat};
use ampscheme::{OutputFormat, ReportMode};

/// ampscheme CLI
#[derive(Parser)]
#[command(name = "ampscheme")]
#[command(version)]
#[command(about = "Convert amplicon primer schemes between BED-based formats", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a primer scheme BED into another representation
    Convert {
        /// Primer scheme BED file
        input: PathBuf,
        /// Output file ("-" for stdout)
        #[arg(short, long)]
        output: PathBuf,
        /// Type of output to be generated
        #[arg(short, long, value_enum)]
        to: OutputFormat,
        /// Amplicon info file for inputs from which primer groupings cannot be inferred
        #[arg(short, long)]
        amplicon_info: Option<PathBuf>,
        /// For amplicons formed by nested primers, report all primers or just the
        /// inner or outer ones (amplicon-info output only)
        #[arg(short, long, value_enum, default_value_t = ReportMode::Full)]
        report_nested: ReportMode,
        /// Format of the input file
        #[arg(short, long = "from", value_enum, default_value_t = InputFormat::Bed)]
        from: InputFormat,
        /// Scheme name used to prefix generated insert/amplicon names
        #[arg(long)]
        scheme_name: Option<String>,
    },

    /// Print a per-amplicon summary table of a primer scheme
    Describe {
        /// Primer scheme BED file
        input: PathBuf,
        /// Amplicon info file
        #[arg(short, long)]
        amplicon_info: Option<PathBuf>,
        /// Scheme name used to prefix generated amplicon names
        #[arg(long)]
        scheme_name: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert { input, output, to, amplicon_info, report_nested, from, scheme_name } => {
            log::debug!("input format: {from:?}");
            let opts = ConvertOpts { input, output, to, amplicon_info, report: report_nested, scheme_name };
            convert::run_convert(&opts)
        }
        Commands::Describe { input, amplicon_info, scheme_name } => cmd_describe(input, amplicon_info, scheme_name),
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn cmd_describe(input: PathBuf, amplicon_info: Option<PathBuf>, scheme_name: Option<String>) -> anyhow::Result<()> {
    use ampscheme::summary::{configure_table_display, summary_frame};

    let scheme = convert::load_scheme(&input, amplicon_info.as_deref(), scheme_name)?;
    let df = summary_frame(&scheme)?;

    println!("scheme: {}", scheme.name().unwrap_or("-"));
    println!("amplicons: {}", scheme.len());
    println!("primers: {}", scheme.primer_count());
    configure_table_display();
    println!("{}", df);
    Ok(())
}
