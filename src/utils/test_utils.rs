use crate::model::{population::Player, strategy::Strategy, SimulationConfig};

/// An Elo-family player with the given visible rating and no history.
pub fn elo_player(id: u32, rating: f64) -> Player {
    Player {
        id,
        skill: rating,
        rating,
        sigma: None,
        games_played: 0,
        rating_history: Vec::new(),
        opponent_history: Vec::new(),
        predicted_chance_history: Vec::new(),
        sigma_history: Vec::new()
    }
}

/// A Gaussian-scheme player with the given belief.
pub fn gaussian_player(id: u32, mu: f64, sigma: f64) -> Player {
    Player {
        sigma: Some(sigma),
        ..elo_player(id, mu)
    }
}

/// Players with dense ids carrying the given ratings.
pub fn elo_players_with_ratings(ratings: &[f64]) -> Vec<Player> {
    ratings
        .iter()
        .enumerate()
        .map(|(id, &rating)| elo_player(id as u32, rating))
        .collect()
}

/// Players with dense ids carrying the given `(mu, sigma)` beliefs.
pub fn gaussian_players_with(beliefs: &[(f64, f64)]) -> Vec<Player> {
    beliefs
        .iter()
        .enumerate()
        .map(|(id, &(mu, sigma))| gaussian_player(id as u32, mu, sigma))
        .collect()
}

/// A small deterministic config for driver tests.
pub fn test_config(players: usize, games: usize, strategy: Strategy) -> SimulationConfig {
    SimulationConfig::new(players, games, strategy).with_seed(0xC0FFEE)
}
