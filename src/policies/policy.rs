use super::epsilon_greedy::EpsilonGreedy;
use super::random::Random;
use super::thompson_sampling::ThompsonSampling;
use super::ucb::Ucb;

use crate::errors::PolicyError;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 90.0;
pub const DEFAULT_EXPLORATION: f64 = 1.0;

fn default_success_threshold() -> f64 {
    DEFAULT_SUCCESS_THRESHOLD
}

fn default_exploration() -> f64 {
    DEFAULT_EXPLORATION
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

impl ArmStats {
    pub(super) fn new(pulls: u64, rewards: f64) -> Self {
        let mean_reward = if pulls > 0 {
            rewards / pulls as f64
        } else {
            0.0
        };
        Self { pulls, mean_reward }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicyStats {
    pub arms: Vec<ArmStats>,
}

impl PolicyStats {
    pub fn total_pulls(&self) -> u64 {
        self.arms.iter().map(|arm| arm.pulls).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum PolicyType {
    Random,
    EpsilonGreedy {
        epsilon: f64,
    },
    ThompsonSampling {
        #[serde(default = "default_success_threshold")]
        success_threshold: f64,
    },
    Ucb {
        #[serde(default = "default_exploration")]
        exploration: f64,
    },
}

impl PolicyType {
    pub fn into_inner(self, k_arms: usize) -> Result<Box<dyn Policy>, PolicyError> {
        let policy: Box<dyn Policy> = match self {
            PolicyType::Random => Box::new(Random::new(k_arms)),
            PolicyType::EpsilonGreedy { epsilon } => Box::new(EpsilonGreedy::new(k_arms, epsilon)?),
            PolicyType::ThompsonSampling { success_threshold } => {
                Box::new(ThompsonSampling::new(k_arms, success_threshold)?)
            }
            PolicyType::Ucb { exploration } => Box::new(Ucb::new(k_arms, exploration)?),
        };

        Ok(policy)
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolicyType::Random => write!(f, "random"),
            PolicyType::EpsilonGreedy { epsilon } => write!(f, "epsilon-greedy(epsilon={epsilon})"),
            PolicyType::ThompsonSampling { success_threshold } => {
                write!(f, "thompson-sampling(threshold={success_threshold})")
            }
            PolicyType::Ucb { exploration } => write!(f, "ucb1(c={exploration})"),
        }
    }
}

/// Arm-selection strategy driven by an agent.
///
/// Implementations own their per-arm statistics; the random source is lent by the agent on
/// every draw so a single seed reproduces a whole run.
#[typetag::serialize(tag = "type")]
pub trait Policy: fmt::Debug + Send {
    fn k_arms(&self) -> usize;
    fn select_arm(&mut self, rng: &mut SmallRng) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;
}

/// Index of the first maximum, scanning left to right.
pub(super) fn argmax<I: IntoIterator<Item = f64>>(values: I) -> Option<usize> {
    values
        .into_iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, value)| match best {
            Some((_, max)) if value > max => Some((i, value)),
            None => Some((i, value)),
            _ => best,
        })
        .map(|(i, _)| i)
}
