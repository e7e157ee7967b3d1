use anyhow::{Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use mnist_records::convert::{convert, ConvertConfig};
use mnist_records::loader::{print_loader_info, LoaderConfig, RecordLoader};

mod cli;

use cli::{CliArgs, Command};

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn run() -> Result<()> {
    let args = CliArgs::parse_args();
    setup_logging(args.verbose, args.quiet);

    match args.command {
        Command::Convert {
            data_dir,
            output_dir,
            validation_size,
        } => {
            let config = ConvertConfig {
                data_dir,
                output_dir,
                validation_size,
            };

            let summaries = convert(config).context("Conversion failed")?;
            for summary in summaries {
                let (count, rows, columns) = summary.shape;
                info!(
                    "{}: {} records ({}x{}x{}) -> {:?}",
                    summary.split, summary.records, count, rows, columns, summary.path
                );
            }
        }
        Command::Inspect {
            file,
            batch_size,
            seed,
        } => {
            let config = LoaderConfig {
                batch_size,
                shuffle_seed: seed,
                ..Default::default()
            };

            let loader = RecordLoader::open(&file, Some(config))
                .with_context(|| format!("Failed to load {:?}", file))?;
            print_loader_info(&loader);
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
