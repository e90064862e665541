use super::arm::ArmTally;
use super::policy::{ArmStats, Policy, PolicyStats};

use crate::errors::PolicyError;

use rand::{rngs::SmallRng, Rng};
use serde::Serialize;

/// Uniform arm choice, blind to history.
#[derive(Clone, Debug, Serialize)]
pub struct Random {
    arms: Vec<ArmTally>,
}

impl Random {
    pub fn new(k_arms: usize) -> Self {
        Self {
            arms: vec![ArmTally::default(); k_arms],
        }
    }
}

#[typetag::serialize]
impl Policy for Random {
    fn k_arms(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(&mut self, rng: &mut SmallRng) -> Result<usize, PolicyError> {
        if self.arms.is_empty() {
            return Err(PolicyError::NoArmsAvailable);
        }
        Ok(rng.random_range(0..self.arms.len()))
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .record(reward);

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self
                .arms
                .iter()
                .map(|arm| ArmStats::new(arm.pulls, arm.rewards))
                .collect(),
        }
    }
}
