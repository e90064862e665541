use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EnvironmentError {
    #[error("Environment needs at least one arm")]
    NoArms,
    #[error("Expected {k_arms} arms, got {probabilities} probabilities and {rewards} rewards")]
    MismatchedArmCount {
        k_arms: usize,
        probabilities: usize,
        rewards: usize,
    },
    #[error("Probability {value} of arm {arm} is outside [0, 1]")]
    InvalidProbability { arm: usize, value: f64 },
    #[error("Payout {value} of arm {arm} must be a non-negative number")]
    InvalidPayout { arm: usize, value: f64 },
    #[error("Arm {arm} out of range for {k_arms} arms")]
    InvalidArmIndex { arm: usize, k_arms: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("No arms to draw from")]
    NoArmsAvailable,
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
    #[error("Epsilon {0} is outside [0, 1]")]
    InvalidEpsilon(f64),
    #[error("Success threshold {0} must be finite")]
    InvalidThreshold(f64),
    #[error("Exploration factor {0} must be a non-negative number")]
    InvalidExploration(f64),
    #[error("Failed to sample arm statistic: {0}")]
    SamplingError(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("Step count must be positive, got {0}")]
    InvalidStepCount(usize),
    #[error("Policy handles {policy} arms but the environment has {environment}")]
    PolicyArmMismatch { policy: usize, environment: usize },
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Simulation has no agents to run")]
    NoAgents,
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot read config: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
