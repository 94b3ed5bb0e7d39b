use broadq::{config::load_config, logging::init_logging, start_server};
use clap::Parser;
use std::path::PathBuf;
use std::process;

use broadq::config::Config;

#[derive(Parser, Debug)]
#[command(name = "broadq", about = "In-memory broadcast message queue server")]
struct Args {
    /// Path to the TOML config file.
    #[arg(long, default_value = "broadq.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    init_logging();

    let args = Args::parse();

    let config: Config = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[FATAL] Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = start_server(config).await {
        eprintln!("[FATAL] Server crashed: {e}");
        process::exit(1);
    }
}
