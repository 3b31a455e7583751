mod config;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use qr_dynamics::{DynamicsModel, Repr};
use qr_sim::{ConstantControl, rollout};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ModelConfig, ModelKind, Scenario};
use crate::error::CliResult;

#[derive(Parser)]
#[command(name = "qr-cli")]
#[command(about = "quadreach CLI - evaluate and roll out vehicle dynamics models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default parameter set of a model as YAML
    Defaults {
        #[arg(value_enum)]
        model: ModelKind,
    },
    /// Evaluate the state derivative at a single point
    Eval {
        #[arg(value_enum)]
        model: ModelKind,
        /// Comma-separated state vector
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        state: Vec<f64>,
        /// Comma-separated control vector
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        control: Vec<f64>,
        /// Optional YAML parameter file for the model
        #[arg(long)]
        config: Option<PathBuf>,
        /// Evaluation time (the models are time-invariant)
        #[arg(long, default_value_t = 0.0)]
        time: f64,
    },
    /// Roll a model forward under constant control
    Simulate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Print the trajectory as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Defaults { model } => cmd_defaults(model),
        Commands::Eval {
            model,
            state,
            control,
            config,
            time,
        } => cmd_eval(model, state, control, config.as_deref(), time),
        Commands::Simulate {
            scenario_path,
            json,
        } => cmd_simulate(&scenario_path, json),
    }
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn cmd_defaults(kind: ModelKind) -> CliResult<()> {
    let config = ModelConfig::defaults(kind);
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn cmd_eval(
    kind: ModelKind,
    state: Vec<f64>,
    control: Vec<f64>,
    config_path: Option<&Path>,
    time: f64,
) -> CliResult<()> {
    let config = match config_path {
        Some(path) => ModelConfig::load_params(kind, path)?,
        None => ModelConfig::defaults(kind),
    };
    let model = config.build(state.clone())?;
    let dx = model.evaluate_derivative(time, &Repr::Scalar(state), &Repr::Scalar(control), None)?;

    if let Some(values) = dx.as_scalar() {
        let parts: Vec<String> = values.iter().map(|v| format!("{v:e}")).collect();
        println!("{}", parts.join(","));
    }
    Ok(())
}

fn cmd_simulate(scenario_path: &Path, json: bool) -> CliResult<()> {
    let scenario = Scenario::load(scenario_path)?;
    let mut model = scenario.model.build(scenario.initial_state)?;
    let policy = ConstantControl::new(scenario.control);

    info!(
        model = model.name(),
        t_end = scenario.options.t_end,
        "running scenario {}",
        scenario_path.display()
    );
    let record = rollout(model.as_mut(), &policy, &scenario.options)?;
    info!(
        samples = record.t.len(),
        history = model.state_history().len(),
        "rollout complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", serde_yaml::to_string(&record)?);
    }
    Ok(())
}
