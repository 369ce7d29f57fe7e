pub mod constants;
pub mod error;
pub mod gaussian;
pub mod matchmaker;
pub mod metrics;
pub mod oracle;
pub mod population;
pub mod rating_index;
pub mod rng;
pub mod simulation;
pub mod strategy;

use crate::model::{
    error::SimulationError,
    population::SkillDistribution,
    simulation::{RecordMode, RunOutput, Simulation},
    strategy::Strategy
};

/// Everything a single run needs. Two configs with equal fields produce
/// bitwise-identical runs.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub players: usize,
    pub games: usize,
    pub strategy: Strategy,
    pub seed: u64,
    pub skill_distribution: SkillDistribution
}

impl SimulationConfig {
    pub fn new(players: usize, games: usize, strategy: Strategy) -> SimulationConfig {
        SimulationConfig {
            players,
            games,
            strategy,
            seed: constants::DEFAULT_SEED,
            skill_distribution: SkillDistribution::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> SimulationConfig {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.players < 2 {
            return Err(SimulationError::InvalidArgument(format!(
                "need at least 2 players, got {}",
                self.players
            )));
        }
        if self.games < 1 {
            return Err(SimulationError::InvalidArgument("need at least 1 game".to_string()));
        }
        self.strategy.validate()
    }
}

/// Runs a full simulation and returns the players with their histories plus
/// the three per-match series.
pub fn run(config: &SimulationConfig) -> Result<RunOutput, SimulationError> {
    let mut simulation = Simulation::new(config, RecordMode::Full)?;
    simulation.simulate()?;
    Ok(simulation.into_output())
}

/// Runs the identical simulation without recording histories or series and
/// returns `(sum of prediction errors, sum of skill gaps)`.
///
/// Memory stays O(N) regardless of the match count, which is what parameter
/// sweeps hammering this entry point need. Under the same config the sums
/// equal those of the full run exactly.
pub fn run_parameter_probe(config: &SimulationConfig) -> Result<(f64, f64), SimulationError> {
    let mut simulation = Simulation::new(config, RecordMode::Probe)?;
    simulation.simulate()?;
    Ok(simulation.probe_sums())
}
