//! Interactive card validation tool.
//!
//! # Usage
//!
//! ```bash
//! # Read ranges from ./banks.txt and validate numbers typed on stdin
//! bankcheck
//!
//! # Custom range file, JSON output
//! bankcheck --banks /etc/bins.txt --output json < numbers.txt
//!
//! # Show skipped range records and lookups
//! RUST_LOG=debug bankcheck
//! ```
//!
//! An empty line ends the session.

use bank_card_validator::directory::RangeLoader;
use bank_card_validator::session::{OutputFormat, Session};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bankcheck")]
#[command(
    author,
    version,
    about = "Validate card numbers and identify the issuing bank"
)]
struct Cli {
    /// Bank range file (`name,from,to` per line)
    #[arg(short, long, default_value = "banks.txt")]
    banks: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries session output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let report = match RangeLoader::new().load_file(&cli.banks) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let directory = report.into_directory();
    let stdin = io::stdin();
    let stdout = io::stdout();

    let result = Session::new(&directory)
        .with_format(cli.output.into())
        .run(stdin.lock(), stdout.lock());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
