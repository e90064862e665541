//! Multi-armed bandit agents playing a synthetic slot machine.
//!
//! A [`RewardEnvironment`] holds K arms with fixed payout probabilities and payouts. An [`Agent`]
//! binds one [`Policy`] to that environment for a fixed number of steps and records pull counts,
//! rewards and the running average reward. [`Simulation`] runs a configured set of agents against
//! one environment and gathers a JSON-serializable report for plotting elsewhere.

pub mod agent;
pub mod config;
pub mod environment;
pub mod errors;
pub mod policies;
mod rng;
pub mod simulation;

pub use agent::{Agent, RunResult};
pub use environment::RewardEnvironment;
pub use policies::{Policy, PolicyType};
pub use simulation::{Simulation, SimulationReport};
