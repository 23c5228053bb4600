use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use voc_crop::visualize::visualize_dataset;
use voc_crop::VisualizeArgs;

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = VisualizeArgs::parse();

    match visualize_dataset(&args) {
        Ok(count) => {
            info!("Inspected {} images.", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to inspect dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
