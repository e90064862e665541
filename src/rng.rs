use rand::{rngs::SmallRng, SeedableRng};

/// Random source owned by a single agent, reproducible when seeded.
#[derive(Debug)]
pub struct MaybeSeededRng {
    seed: Option<u64>,
    rng: SmallRng,
}

impl MaybeSeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_os_rng()
        };

        Self { seed, rng }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const SEED: u64 = 1234;

    #[test]
    fn seeded_is_reproducible() {
        let mut a = MaybeSeededRng::new(Some(SEED));
        let mut b = MaybeSeededRng::new(Some(SEED));

        let xs: Vec<f64> = (0..10).map(|_| a.get_rng().random()).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.get_rng().random()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), Some(SEED));
    }

    #[test]
    fn unseeded_keeps_no_seed() {
        let rng = MaybeSeededRng::new(None);
        assert!(rng.seed().is_none());
    }
}
