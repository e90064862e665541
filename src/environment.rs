use crate::errors::EnvironmentError;

use rand::Rng;
use serde::Serialize;

/// A slot machine with `k_arms` independent levers.
///
/// Each arm pays its fixed payout with a fixed probability and nothing otherwise. The environment
/// holds no mutable state: randomness comes from the caller, so one instance can be shared by
/// reference between any number of agents.
#[derive(Clone, Debug, Serialize)]
pub struct RewardEnvironment {
    k_arms: usize,
    probabilities: Vec<f64>,
    rewards: Vec<f64>,
}

impl RewardEnvironment {
    pub fn new(
        k_arms: usize,
        probabilities: Vec<f64>,
        rewards: Vec<f64>,
    ) -> Result<Self, EnvironmentError> {
        if k_arms == 0 {
            return Err(EnvironmentError::NoArms);
        }
        if probabilities.len() != k_arms || rewards.len() != k_arms {
            return Err(EnvironmentError::MismatchedArmCount {
                k_arms,
                probabilities: probabilities.len(),
                rewards: rewards.len(),
            });
        }
        if let Some((arm, &value)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(EnvironmentError::InvalidProbability { arm, value });
        }
        if let Some((arm, &value)) = rewards
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(EnvironmentError::InvalidPayout { arm, value });
        }

        Ok(Self {
            k_arms,
            probabilities,
            rewards,
        })
    }

    /// Builds an environment sized from the probability vector.
    pub fn from_arms(probabilities: Vec<f64>, rewards: Vec<f64>) -> Result<Self, EnvironmentError> {
        Self::new(probabilities.len(), probabilities, rewards)
    }

    pub fn k_arms(&self) -> usize {
        self.k_arms
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Pulls `arm_id`: one uniform draw in [0, 1) against the arm's probability.
    pub fn pull<R: Rng + ?Sized>(&self, arm_id: usize, rng: &mut R) -> Result<f64, EnvironmentError> {
        let probability = self
            .probabilities
            .get(arm_id)
            .ok_or(EnvironmentError::InvalidArmIndex {
                arm: arm_id,
                k_arms: self.k_arms,
            })?;

        if rng.random::<f64>() < *probability {
            Ok(self.rewards[arm_id])
        } else {
            Ok(0.0)
        }
    }

    pub fn expected_reward(&self, arm_id: usize) -> Result<f64, EnvironmentError> {
        self.probabilities
            .get(arm_id)
            .zip(self.rewards.get(arm_id))
            .map(|(p, r)| p * r)
            .ok_or(EnvironmentError::InvalidArmIndex {
                arm: arm_id,
                k_arms: self.k_arms,
            })
    }

    /// Expected payout of the best arm, the baseline for regret.
    pub fn best_expected_reward(&self) -> f64 {
        self.probabilities
            .iter()
            .zip(&self.rewards)
            .map(|(p, r)| p * r)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const SEED: u64 = 1234;

    #[test]
    fn create() {
        for k in 1..10 {
            let env = RewardEnvironment::new(k, vec![0.5; k], vec![1.0; k]).unwrap();
            assert_eq!(env.k_arms(), k);
            assert_eq!(env.probabilities().len(), k);
            assert_eq!(env.rewards().len(), k);
        }
    }

    #[test]
    fn create_invalid() {
        assert_eq!(
            RewardEnvironment::new(0, vec![], vec![]).err(),
            Some(EnvironmentError::NoArms)
        );
        assert_eq!(
            RewardEnvironment::new(2, vec![0.5, 0.5], vec![1.0]).err(),
            Some(EnvironmentError::MismatchedArmCount {
                k_arms: 2,
                probabilities: 2,
                rewards: 1
            })
        );
        assert_eq!(
            RewardEnvironment::from_arms(vec![0.5, 1.5], vec![1.0, 1.0]).err(),
            Some(EnvironmentError::InvalidProbability { arm: 1, value: 1.5 })
        );
        assert!(matches!(
            RewardEnvironment::from_arms(vec![f64::NAN], vec![1.0]),
            Err(EnvironmentError::InvalidProbability { arm: 0, .. })
        ));
        assert_eq!(
            RewardEnvironment::from_arms(vec![0.5], vec![-1.0]).err(),
            Some(EnvironmentError::InvalidPayout {
                arm: 0,
                value: -1.0
            })
        );
    }

    #[test]
    fn pull_returns_payout_or_zero() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = RewardEnvironment::from_arms(vec![0.2, 0.5, 0.9], vec![10.0, 20.0, 30.0]).unwrap();

        for arm_id in 0..env.k_arms() {
            for _ in 0..1000 {
                let reward = env.pull(arm_id, &mut rng).unwrap();
                assert!(reward == 0.0 || reward == env.rewards()[arm_id]);
            }
        }
    }

    #[test]
    fn pull_out_of_range() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = RewardEnvironment::from_arms(vec![0.5], vec![1.0]).unwrap();
        assert_eq!(
            env.pull(1, &mut rng).err(),
            Some(EnvironmentError::InvalidArmIndex { arm: 1, k_arms: 1 })
        );
    }

    #[test]
    fn pull_frequency_converges() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = RewardEnvironment::from_arms(vec![0.3, 0.75], vec![5.0, 5.0]).unwrap();
        let trials = 100_000;

        for arm_id in 0..env.k_arms() {
            let hits = (0..trials)
                .filter(|_| env.pull(arm_id, &mut rng).unwrap() > 0.0)
                .count();
            let frequency = hits as f64 / trials as f64;
            assert!(
                (frequency - env.probabilities()[arm_id]).abs() < 0.01,
                "arm {arm_id}: {frequency}"
            );
        }
    }

    #[test]
    fn deterministic_arms() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let env = RewardEnvironment::from_arms(vec![1.0, 0.0], vec![10.0, 10.0]).unwrap();
        assert!((0..100).all(|_| env.pull(0, &mut rng).unwrap() == 10.0));
        assert!((0..100).all(|_| env.pull(1, &mut rng).unwrap() == 0.0));
    }

    #[test]
    fn expected_rewards() {
        let env = RewardEnvironment::from_arms(vec![0.5, 0.25], vec![10.0, 100.0]).unwrap();
        assert_eq!(env.expected_reward(0), Ok(5.0));
        assert_eq!(env.expected_reward(1), Ok(25.0));
        assert!(env.expected_reward(2).is_err());
        assert_eq!(env.best_expected_reward(), 25.0);
    }
}
