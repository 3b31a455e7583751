//! YAML configuration: model parameter sets and rollout scenarios.

use std::path::Path;

use clap::ValueEnum;
use qr_dynamics::{
    DynamicsModel, DynamicsResult, FullPlanarConfig, FullPlanarModel, ReducedLateralConfig,
    ReducedLateralModel,
};
use qr_sim::SimOptions;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    /// 2-state lateral velocity / angle model
    Reduced,
    /// 4-state planar velocity / attitude model
    Planar,
}

/// Model selection plus its parameters, tagged by `kind`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    Reduced(ReducedLateralConfig),
    Planar(FullPlanarConfig),
}

impl ModelConfig {
    pub fn defaults(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Reduced => ModelConfig::Reduced(ReducedLateralConfig::default()),
            ModelKind::Planar => ModelConfig::Planar(FullPlanarConfig::default()),
        }
    }

    /// Load an untagged parameter file for `kind`.
    pub fn load_params(kind: ModelKind, path: &Path) -> CliResult<Self> {
        Ok(match kind {
            ModelKind::Reduced => ModelConfig::Reduced(read_yaml(path)?),
            ModelKind::Planar => ModelConfig::Planar(read_yaml(path)?),
        })
    }

    pub fn build(self, initial_state: Vec<f64>) -> DynamicsResult<Box<dyn DynamicsModel>> {
        Ok(match self {
            ModelConfig::Reduced(c) => Box::new(ReducedLateralModel::new(initial_state, c)?),
            ModelConfig::Planar(c) => Box::new(FullPlanarModel::new(initial_state, c)?),
        })
    }
}

/// A rollout under constant control.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub model: ModelConfig,
    pub initial_state: Vec<f64>,
    pub control: Vec<f64>,
    #[serde(default)]
    pub options: SimOptions,
}

impl Scenario {
    pub fn load(path: &Path) -> CliResult<Self> {
        read_yaml(path)
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
