use brrtsec::cli::{run_cli, Cli};
use brrtsec::logging::init_logging_with_config;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging_with_config(&cli.log_config()) {
        eprintln!("warning: {err:#}");
    }

    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
