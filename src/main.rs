//! asm-convert CLI entry point
//!
//! Convert genomic coordinates between GRCh38 and GRCh37 via Ensembl.

use asm_convert::core::{
    open_input, AsmConvertError, AssemblyPair, ConversionError, Delimiter, EnsemblClient,
    InputError, MapDirection, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECS,
};
use asm_convert::formats::{convert_tabular, ConversionStats, ConvertOptions, ReportMode};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "asm-convert")]
#[command(about = "Convert genomic coordinates from GRCh38 to GRCh37 (default) or vice versa")]
#[command(
    long_about = "Convert genomic coordinates from GRCh38 to GRCh37 (default) or vice versa.\n\
All genomic coordinates are assumed to be on the positive strand. The input file is\n\
expected to be tabulated (tsv/csv), e.g.:\n\n\
    #chromosome\tstart\tend\n\
    17\t36169091\t36169091\n\
    X\t3084378\t3084378"
)]
#[command(version)]
struct Cli {
    /// Path to the input file
    input: PathBuf,

    /// Choose verbose output
    #[arg(short = 'v', long)]
    verbose: bool,

    /// GRCh38 input assembly (default)
    #[arg(long, conflicts_with = "grch37")]
    grch38: bool,

    /// GRCh37 input assembly
    #[arg(long)]
    grch37: bool,

    /// Use tab as column separator (default)
    #[arg(short = 't', long, conflicts_with = "csv")]
    tab: bool,

    /// Use comma as column separator
    #[arg(short = 'c', long)]
    csv: bool,

    /// Output file (stdout if not specified)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Mapping service base URL
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Do not print conversion statistics
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn direction(&self) -> MapDirection {
        if self.grch37 && !self.grch38 {
            MapDirection::Reverse
        } else {
            MapDirection::Forward
        }
    }

    fn delimiter(&self) -> Delimiter {
        if self.csv && !self.tab {
            Delimiter::Comma
        } else {
            Delimiter::Tab
        }
    }

    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            assemblies: AssemblyPair::from_direction(self.direction()),
            delimiter: self.delimiter(),
            mode: ReportMode::from_verbose(self.verbose),
        }
    }
}

fn print_stats(stats: &ConversionStats, start: Instant) {
    eprintln!("\n=== Conversion Statistics ===");
    eprintln!("Total records:   {}", stats.total);
    eprintln!("Unique loci:     {}", stats.unique);
    eprintln!("Requests:        {}", stats.remote_calls);
    eprintln!("Resolved:        {}", stats.resolved);
    eprintln!("Multiple:        {}", stats.ambiguous);
    eprintln!("Failed:          {}", stats.failed);
    eprintln!("Malformed rows:  {}", stats.malformed);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
}

fn run(cli: &Cli) -> asm_convert::Result<ConversionStats> {
    // The input must open before any output exists
    let reader = open_input(&cli.input)?;
    let client = EnsemblClient::new(&cli.server, Duration::from_secs(cli.timeout))?;
    let options = cli.options();
    log::info!(
        "Converting {:?} from {} to {}",
        cli.input,
        options.assemblies.source,
        options.assemblies.target
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(ConversionError::Write)?;
            let mut writer = BufWriter::new(file);
            convert_tabular(reader, &mut writer, client, &options)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            convert_tabular(reader, &mut writer, client, &options)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Warn level by default so malformed rows are always reported
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    match run(&cli) {
        Ok(stats) => {
            if !cli.quiet {
                print_stats(&stats, start);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(AsmConvertError::Input(err @ InputError::FileOpen { .. })) => {
            println!("{}", err);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
