mod app;
mod catalog;
mod error;
mod form;
mod paths;
mod settings;

use std::fs::{self, File};
use std::process::ExitCode;

use simplelog::{Config, WriteLogger};

use error::AppError;
use settings::Settings;

fn init_logging(settings: &Settings) -> Result<(), AppError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = File::create(&path)?;
    WriteLogger::init(settings.log_level, Config::default(), log_file)?;
    log::info!("logging to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&settings) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    log::info!("starting with {:?}", settings);

    match app::run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
