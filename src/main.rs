mod chapters;
mod cli;
mod config;
mod error;
mod export;
mod page_range;
mod pdf;
mod sanitize;
mod source;
mod split;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::SplitConfig;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = split::run(&SplitConfig::from(cli)) {
        error!(error = %err, "split failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
