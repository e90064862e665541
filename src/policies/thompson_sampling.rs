use super::policy::{argmax, ArmStats, Policy, PolicyStats};

use crate::errors::PolicyError;

use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize)]
struct ThompsonSamplingArm {
    successes: u64,
    failures: u64,
    rewards: f64,
}

impl ThompsonSamplingArm {
    fn pulls(&self) -> u64 {
        self.successes + self.failures
    }

    // uniform Beta(1, 1) prior folded in at sampling time
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, PolicyError> {
        let s = Beta::new(self.successes as f64 + 1.0, self.failures as f64 + 1.0)
            .map_err(|e| PolicyError::SamplingError(e.to_string()))?
            .sample(rng);

        Ok(s)
    }

    fn update(&mut self, reward: f64, success_threshold: f64) {
        if reward > success_threshold {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.rewards += reward;
    }
}

/// Beta-Bernoulli Thompson sampling over arbitrary payouts.
///
/// A payout strictly above `success_threshold` counts as a success for the pulled arm and anything
/// else as a failure, which turns any payout scheme into a Bernoulli outcome.
#[derive(Clone, Debug, Serialize)]
pub struct ThompsonSampling {
    success_threshold: f64,
    arms: Vec<ThompsonSamplingArm>,
}

impl ThompsonSampling {
    pub fn new(k_arms: usize, success_threshold: f64) -> Result<Self, PolicyError> {
        if !success_threshold.is_finite() {
            return Err(PolicyError::InvalidThreshold(success_threshold));
        }

        Ok(Self {
            success_threshold,
            arms: vec![ThompsonSamplingArm::default(); k_arms],
        })
    }
}

#[typetag::serialize]
impl Policy for ThompsonSampling {
    fn k_arms(&self) -> usize {
        self.arms.len()
    }

    fn select_arm(&mut self, rng: &mut SmallRng) -> Result<usize, PolicyError> {
        // sample from the beta distribution for each arm and select the arm with the best statistic
        let samples = self
            .arms
            .iter()
            .map(|arm| arm.sample(rng))
            .collect::<Result<Vec<f64>, PolicyError>>()?;

        argmax(samples).ok_or(PolicyError::NoArmsAvailable)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?
            .update(reward, self.success_threshold);

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self
                .arms
                .iter()
                .map(|arm| ArmStats::new(arm.pulls(), arm.rewards))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::policy::DEFAULT_SUCCESS_THRESHOLD;
    use rand::SeedableRng;

    const SEED: u64 = 1234;

    fn make_policy(k_arms: usize) -> ThompsonSampling {
        ThompsonSampling::new(k_arms, DEFAULT_SUCCESS_THRESHOLD).unwrap()
    }

    #[test]
    fn create_invalid() {
        assert_eq!(
            ThompsonSampling::new(2, f64::INFINITY).err(),
            Some(PolicyError::InvalidThreshold(f64::INFINITY))
        );
    }

    #[test]
    fn draw() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = make_policy(1);
        assert_eq!(policy.select_arm(&mut rng), Ok(0));
    }

    #[test]
    fn draw_best() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = make_policy(2);

        policy.arms[1].successes += 100;
        policy.arms[0].failures += 100;
        assert_eq!(policy.select_arm(&mut rng), Ok(1));
    }

    #[test]
    fn draw_empty() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = make_policy(0);
        assert_eq!(policy.select_arm(&mut rng), Err(PolicyError::NoArmsAvailable));
    }

    #[test]
    fn update_binarizes_reward() {
        let mut policy = make_policy(2);

        assert!(policy.update(0, 100.0).is_ok());
        assert!(policy.update(0, 90.0).is_ok());
        assert!(policy.update(0, 0.0).is_ok());
        assert_eq!(policy.arms[0].successes, 1);
        assert_eq!(policy.arms[0].failures, 2);
        assert_eq!(policy.arms[1].pulls(), 0);
        assert_eq!(policy.update(2, 1.0), Err(PolicyError::ArmNotFound(2)));
    }

    #[test]
    fn custom_threshold() {
        let mut policy = ThompsonSampling::new(1, 0.5).unwrap();
        policy.update(0, 1.0).unwrap();
        policy.update(0, 0.0).unwrap();
        assert_eq!(policy.arms[0].successes, 1);
        assert_eq!(policy.arms[0].failures, 1);
    }

    #[test]
    fn counters_sum_to_pulls() {
        let mut rng = SmallRng::seed_from_u64(SEED);
        let mut policy = make_policy(3);
        let mut pulls = [0u64; 3];

        for _ in 0..300 {
            let arm_id = policy.select_arm(&mut rng).unwrap();
            let reward = if rng.random::<f64>() < 0.5 { 100.0 } else { 0.0 };
            policy.update(arm_id, reward).unwrap();
            pulls[arm_id] += 1;
        }

        for (arm, &count) in policy.arms.iter().zip(pulls.iter()) {
            assert_eq!(arm.successes + arm.failures, count);
        }
        assert_eq!(policy.stats().total_pulls(), 300);
    }
}
