use super::arm::ArmTally;
use super::policy::{argmax, ArmStats, Policy, PolicyStats};

use crate::errors::PolicyError;

use rand::{rngs::SmallRng, Rng};
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
struct EpsilonGreedyArm {
    value: f64,
    #[serde(flatten)]
    tally: ArmTally,
}

impl EpsilonGreedyArm {
    fn update(&mut self, reward: f64) {
        self.tally.record(reward);
        self.value = self.tally.mean();
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct EpsilonGreedy {
    epsilon: f64,
    arms: Vec<EpsilonGreedyArm>,
}

impl EpsilonGreedy {
    pub fn new(k_arms: usize, epsilon: f64) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(PolicyError::InvalidEpsilon(epsilon));
        }

        Ok(Self {
            epsilon,
            arms: vec![EpsilonGreedyArm::default(); k_arms],
        })
    }

    /// Arm with the highest estimated value; ties go to the lowest index.
    fn best_arm(&self) -> Option<usize> {
        argmax(self.arms.iter().map(|arm| arm.value))
    }
}

#[typetag::serialize]
impl Policy for EpsilonGreedy {
    fn k_arms(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(&mut self, rng: &mut SmallRng) -> Result<usize, PolicyError> {
        if self.arms.is_empty() {
            return Err(PolicyError::NoArmsAvailable);
        }

        if rng.random::<f64>() < self.epsilon {
            Ok(rng.random_range(0..self.arms.len()))
        } else {
            self.best_arm().ok_or(PolicyError::NoArmsAvailable)
        }
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .update(reward);

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self
                .arms
                .iter()
                .map(|arm| ArmStats::new(arm.tally.pulls, arm.tally.rewards))
                .collect(),
        }
    }
}
