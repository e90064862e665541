use super::arm::ArmTally;
use super::policy::{argmax, ArmStats, Policy, PolicyStats};

use crate::errors::PolicyError;

use rand::rngs::SmallRng;
use serde::Serialize;

/// UCB1: optimism in the face of uncertainty.
///
/// Every arm is tried once in index order, then the arm maximising
/// `mean + exploration * sqrt(2 ln t / n)` is chosen. `exploration` should be on the scale of the
/// payouts, since the bonus is added to raw mean rewards.
#[derive(Clone, Debug, Serialize)]
pub struct Ucb {
    exploration: f64,
    arms: Vec<ArmTally>,
}

impl Ucb {
    pub fn new(k_arms: usize, exploration: f64) -> Result<Self, PolicyError> {
        if !exploration.is_finite() || exploration < 0.0 {
            return Err(PolicyError::InvalidExploration(exploration));
        }

        Ok(Self {
            exploration,
            arms: vec![ArmTally::default(); k_arms],
        })
    }

    fn total_count(&self) -> u64 {
        self.arms.iter().map(|arm| arm.pulls).sum()
    }

    fn upper_bound(&self, arm: &ArmTally, total_count: u64) -> f64 {
        let bonus = (2.0 * (total_count as f64).ln() / arm.pulls as f64).sqrt();
        arm.mean() + self.exploration * bonus
    }
}

#[typetag::serialize]
impl Policy for Ucb {
    fn k_arms(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(&mut self, _: &mut SmallRng) -> Result<usize, PolicyError> {
        if let Some(arm_id) = self.arms.iter().position(|arm| arm.pulls == 0) {
            return Ok(arm_id);
        }

        let total_count = self.total_count();
        argmax(
            self.arms
                .iter()
                .map(|arm| self.upper_bound(arm, total_count)),
        )
        .ok_or(PolicyError::NoArmsAvailable)
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
