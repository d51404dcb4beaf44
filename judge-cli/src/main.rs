mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use judge_lib::{Form, Judge, JudgeConfig};
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: judge <form.json>")]
    Usage,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] judge_lib::error::ConfigError),

    #[error(transparent)]
    Judge(#[from] judge_lib::error::Error),
}

fn init_logging() {
    let level = std::env::var("JUDGE_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    if let Err(e) = WriteLogger::init(level, Config::default(), std::io::stderr()) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

fn load_form(path: PathBuf) -> Result<Form, CliError> {
    let raw = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse { path, source })
}

async fn run() -> Result<bool, CliError> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(CliError::Usage)?;

    let config = JudgeConfig::from_env()?;
    debug!("config: {:?}", config);

    let form = load_form(path)?;
    info!("validating {} element(s)", form.elements().len());

    let judge = Judge::builder().config(config).build();
    let outcomes = judge.validate_form(&form).await?;

    print!("{}", report::render(&outcomes));
    Ok(outcomes.iter().all(|(_, outcome)| !outcome.is_invalid()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    init_logging();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
