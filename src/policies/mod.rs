mod arm;
pub mod epsilon_greedy;
mod policy;
pub mod random;
pub mod thompson_sampling;
pub mod ucb;

pub use policy::{
    ArmStats, Policy, PolicyStats, PolicyType, DEFAULT_EXPLORATION, DEFAULT_SUCCESS_THRESHOLD,
};
