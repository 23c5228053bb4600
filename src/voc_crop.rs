use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;

use voc_crop::{process_dataset, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !Path::new(&args.data_dir).exists() {
        error!("The specified data_dir does not exist: {}", args.data_dir);
        return ExitCode::FAILURE;
    }

    info!("Starting the crop process...");

    match process_dataset(&args) {
        Ok(_) => {
            info!("Crop process completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to process dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
