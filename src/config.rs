use crate::policies::PolicyType;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

fn default_log_level() -> String {
    String::from("info")
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    pub probabilities: Vec<f64>,
    pub rewards: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub name: Option<String>,
    pub seed: Option<u64>,
    pub policy: PolicyType,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub steps: usize,
    pub seed: Option<u64>,
    pub environment: EnvironmentConfig,
    pub agents: Vec<AgentConfig>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub output: Option<PathBuf>,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Reads the optional `config` file, then `APP_` variables with `__` between nested keys.
    ///
    /// Probability and payout vectors take comma-separated values, e.g.
    /// `APP_SIMULATION__ENVIRONMENT__PROBABILITIES=0.1,0.9`. Agents are only read from the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("simulation.environment.probabilities")
                    .with_list_parse_key("simulation.environment.rewards")
                    .try_parsing(true),
            )
            .build()?;

        builder.try_deserialize()
    }
}
