use crate::environment::RewardEnvironment;
use crate::errors::AgentError;
use crate::policies::{Policy, PolicyType};
use crate::rng::MaybeSeededRng;

use serde::Serialize;
use tracing::{debug, info, trace};

/// Everything recorded during one agent run.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub name: String,
    pub seed: Option<u64>,
    pub steps: usize,
    pub counts: Vec<u64>,
    pub rewards: Vec<f64>,
    pub cumulative_average: Vec<f64>,
    pub total_reward: f64,
    /// Expected payout of always pulling the best arm minus the payout actually collected.
    pub regret: f64,
    pub policy: Box<dyn Policy>,
}

/// A policy bound to an environment and a step budget.
///
/// `run` consumes the agent: a finished run cannot be restarted, build a new agent instead.
#[derive(Debug)]
pub struct Agent<'a> {
    name: String,
    environment: &'a RewardEnvironment,
    steps: usize,
    policy: Box<dyn Policy>,
    rng: MaybeSeededRng,
}

impl<'a> Agent<'a> {
    pub fn new(
        environment: &'a RewardEnvironment,
        steps: usize,
        policy_type: PolicyType,
        seed: Option<u64>,
    ) -> Result<Self, AgentError> {
        let name = policy_type.to_string();
        let policy = policy_type.into_inner(environment.k_arms())?;
        Ok(Self::with_policy(environment, steps, policy, seed)?.with_name(name))
    }

    pub fn with_policy(
        environment: &'a RewardEnvironment,
        steps: usize,
        policy: Box<dyn Policy>,
        seed: Option<u64>,
    ) -> Result<Self, AgentError> {
        if steps == 0 {
            return Err(AgentError::InvalidStepCount(steps));
        }
        if policy.k_arms() != environment.k_arms() {
            return Err(AgentError::PolicyArmMismatch {
                policy: policy.k_arms(),
                environment: environment.k_arms(),
            });
        }

        debug!(steps, seed = ?seed, "Created agent");
        Ok(Self {
            name: String::from("custom"),
            environment,
            steps,
            policy,
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(mut self) -> Result<RunResult, AgentError> {
        info!(agent = %self.name, steps = self.steps, "Starting run");

        let mut counts = vec![0u64; self.environment.k_arms()];
        let mut rewards = Vec::with_capacity(self.steps);
        let mut cumulative_average = Vec::with_capacity(self.steps);
        let mut total_reward = 0.0;

        for step in 0..self.steps {
            let arm_id = self.policy.select_arm(self.rng.get_rng())?;
            let reward = self.environment.pull(arm_id, self.rng.get_rng())?;
            self.policy.update(arm_id, reward)?;

            counts[arm_id] += 1;
            total_reward += reward;
            rewards.push(reward);
            cumulative_average.push(total_reward / (step + 1) as f64);
            trace!(agent = %self.name, step, arm_id, reward, "Pulled arm");
        }

        debug!(agent = %self.name, stats = ?self.policy.stats(), "Final policy statistics");
        let regret = self.environment.best_expected_reward() * self.steps as f64 - total_reward;
        info!(
            agent = %self.name,
            total_reward,
            regret,
            mean_reward = total_reward / self.steps as f64,
            "Finished run"
        );

        Ok(RunResult {
            name: self.name,
            seed: self.rng.seed(),
            steps: self.steps,
            counts,
            rewards,
            cumulative_average,
            total_reward,
            regret,
            policy: self.policy,
        })
    }
}
