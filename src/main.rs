use slot_bandits::{config::AppConfig, errors::AppError, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let simulation = Simulation::new(config.simulation)?;
    let report = simulation.run()?;

    for result in &report.results {
        info!(
            agent = %result.name,
            counts = ?result.counts,
            total_reward = result.total_reward,
            regret = result.regret,
            "Agent summary"
        );
    }

    match config.output {
        Some(path) => report.persist(path)?,
        None => println!("{}", report.to_json()?),
    }

    Ok(())
}
