use serde::Serialize;

/// Pull and payout tallies shared by the value-based policies.
#[derive(Clone, Debug, Default, Serialize)]
pub(super) struct ArmTally {
    pub(super) pulls: u64,
    pub(super) rewards: f64,
}

impl ArmTally {
    pub(super) fn record(&mut self, reward: f64) {
        self.pulls += 1;
        self.rewards += reward;
    }

    pub(super) fn mean(&self) -> f64 {
        if self.pulls == 0 {
            0.0
        } else {
            self.rewards / self.pulls as f64
        }
    }
}
