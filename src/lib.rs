pub mod model;
pub mod utils;

pub use model::{
    error::SimulationError,
    population::{Player, SkillDistribution},
    run, run_parameter_probe,
    simulation::{DiagnosticSink, RunOutput, Simulation},
    strategy::{Strategy, StrategyKind},
    SimulationConfig
};
