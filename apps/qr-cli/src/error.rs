//! Error type for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Dynamics error: {0}")]
    Dynamics(#[from] qr_dynamics::DynamicsError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] qr_sim::SimError),

    #[error("YAML output error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
