use crate::agent::{Agent, RunResult};
use crate::config::SimulationConfig;
use crate::environment::RewardEnvironment;
use crate::errors::{AgentError, PersistenceError, SimulationError};

use serde::Serialize;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub steps: usize,
    pub environment: RewardEnvironment,
    pub results: Vec<RunResult>,
}

impl SimulationReport {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<(), PersistenceError> {
        info!(path = ?path.as_ref(), run_id = %self.run_id, "Persisting report");

        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Runs every configured agent, one after the other, against a single shared environment.
pub struct Simulation {
    environment: RewardEnvironment,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        if config.agents.is_empty() {
            return Err(SimulationError::NoAgents);
        }

        let environment = RewardEnvironment::from_arms(
            config.environment.probabilities.clone(),
            config.environment.rewards.clone(),
        )?;

        if config.steps == 0 {
            return Err(AgentError::InvalidStepCount(config.steps).into());
        }
        // agents are rebuilt on every run, this only rejects bad parameters up front
        config.agents.iter().try_for_each(|agent_config| {
            agent_config
                .policy
                .clone()
                .into_inner(environment.k_arms())
                .map(|_| ())
                .map_err(AgentError::from)
        })?;

        Ok(Self {
            environment,
            config,
        })
    }

    pub fn environment(&self) -> &RewardEnvironment {
        &self.environment
    }

    // an agent's own seed wins, otherwise offset the global one so agents draw distinct streams
    fn agent_seed(&self, index: usize, seed: Option<u64>) -> Option<u64> {
        seed.or_else(|| {
            self.config
                .seed
                .map(|global| global.wrapping_add(index as u64))
        })
    }

    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            k_arms = self.environment.k_arms(),
            steps = self.config.steps,
            agents = self.config.agents.len(),
            "Starting simulation"
        );

        let results = self
            .config
            .agents
            .iter()
            .enumerate()
            .map(|(index, agent_config)| -> Result<RunResult, SimulationError> {
                let seed = self.agent_seed(index, agent_config.seed);
                let agent = Agent::new(
                    &self.environment,
                    self.config.steps,
                    agent_config.policy.clone(),
                    seed,
                )?;
                let agent = match &agent_config.name {
                    Some(name) => agent.with_name(name.as_str()),
                    None => agent,
                };

                Ok(agent.run()?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SimulationReport {
            run_id,
            steps: self.config.steps,
            environment: self.environment.clone(),
            results,
        })
    }
}
