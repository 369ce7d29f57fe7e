use crate::model::{rng::SimRng, strategy::Strategy};
use serde::Serialize;

/// A simulated player.
///
/// The identifier is dense in `[0, N)` and never changes. The latent skill is
/// drawn once at creation and is immutable; strategies and the matchmaker
/// only ever see the visible rating (and sigma, for the Gaussian scheme).
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: u32,
    pub skill: f64,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    pub games_played: u32,
    /// Visible rating after each match this player took part in.
    pub rating_history: Vec<f64>,
    /// Latent skill of the opponent in each match.
    pub opponent_history: Vec<f64>,
    /// Pre-match predicted win chance against the opponent in each match.
    pub predicted_chance_history: Vec<f64>,
    /// Sigma after each match; populated by the Gaussian scheme only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sigma_history: Vec<f64>
}

/// Distribution the population's latent skills are drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillDistribution {
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 }
}

impl Default for SkillDistribution {
    fn default() -> Self {
        SkillDistribution::Normal {
            mean: 0.0,
            std_dev: 1.0
        }
    }
}

impl SkillDistribution {
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        match *self {
            SkillDistribution::Normal { mean, std_dev } => mean + std_dev * rng.standard_normal(),
            SkillDistribution::Uniform { min, max } => min + (max - min) * rng.uniform()
        }
    }
}

/// Builds the whole population up front. No players are created or destroyed
/// once the match loop starts.
///
/// `history_capacity` should cover the expected per-player history length so
/// the append-heavy loop never reallocates.
pub fn generate_players(
    count: usize,
    strategy: &Strategy,
    distribution: SkillDistribution,
    history_capacity: usize,
    rng: &mut SimRng
) -> Vec<Player> {
    let sigma_capacity = if strategy.initial_sigma().is_some() {
        history_capacity
    } else {
        0
    };

    (0..count)
        .map(|id| {
            let skill = distribution.sample(rng);
            Player {
                id: id as u32,
                skill,
                rating: strategy.initial_rating(skill),
                sigma: strategy.initial_sigma(),
                games_played: 0,
                rating_history: Vec::with_capacity(history_capacity),
                opponent_history: Vec::with_capacity(history_capacity),
                predicted_chance_history: Vec::with_capacity(history_capacity),
                sigma_history: Vec::with_capacity(sigma_capacity)
            }
        })
        .collect()
}
