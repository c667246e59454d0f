//! mediadeck binary - drives the plugin's media actions from a terminal.

use std::{env, process};

use clap::Parser;
use mediadeck::cli::{self, Cli};
use mediadeck::tracing_config;

#[tokio::main]
async fn main() {
    // Embedded hosts have no terminal; MEDIADECK_LOG_TO_FILE mirrors the
    // console logs into the plugin's log directory.
    let logging = if env::var("MEDIADECK_LOG_TO_FILE").is_ok() {
        tracing_config::init_with_file()
    } else {
        tracing_config::init()
    };
    if let Err(error) = logging {
        eprintln!("Failed to initialize logging: {error}");
    }

    let cli = Cli::parse();

    if let Err(error) = cli::run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
