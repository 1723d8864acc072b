use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use shelf::api::HttpBookApi;
use shelf::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "shelf", about = "Keep track of what you're reading")]
struct Args {
    /// Library server URL (overrides config and SHELF_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Basic Auth user name (overrides config and SHELF_USERNAME)
    #[arg(short, long)]
    user: Option<String>,

    /// Config file to read instead of ~/.shelf/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ask the server to reload its demo data (admin only), then exit
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to shelf.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("shelf.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Shelf starting up");

    let file_config = match args.config {
        Some(ref path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let file_config = match file_config {
        Ok(c) => c,
        Err(e) => {
            log::error!("Config error: {}", e);
            eprintln!("shelf: {e}");
            return ExitCode::FAILURE;
        }
    };

    let overrides = CliOverrides {
        base_url: args.base_url,
        username: args.user,
    };
    let resolved = config::resolve(&file_config, &overrides);

    let api = match HttpBookApi::new(
        resolved.base_url.clone(),
        resolved.credentials.clone(),
        resolved.request_timeout,
    ) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("shelf: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.reset {
        return match api.reset().await {
            Ok(()) => {
                println!("Library at {} reset to demo data", api.base_url());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("shelf: reset failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match shelf::tui::run(&resolved, Arc::new(api)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("shelf: {e}");
            ExitCode::FAILURE
        }
    }
}
