mod cli;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use cli::Cli;
use solc_artifact::{compile_sol_to_file, solc_version};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();

    if cli.print_version {
        return match solc_version(&config) {
            Ok(version) => {
                println!("{}", version);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let Some(source) = cli.source.as_ref() else {
        error!("no source file given");
        return ExitCode::FAILURE;
    };
    let Some(output) = cli.destination() else {
        error!(source=%source.display(), "default output would overwrite the source; pass an output path");
        return ExitCode::FAILURE;
    };

    match compile_sol_to_file(source, &output, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(source=%source.display(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
