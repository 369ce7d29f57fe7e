use crate::model::{
    constants::{
        DEFAULT_COEF, DEFAULT_ELO_K, DEFAULT_GAMES_DIVISOR, DEFAULT_K_BASE, DEFAULT_K_MIN, GAUSSIAN_BETA, GAUSSIAN_MU,
        GAUSSIAN_SIGMA
    },
    error::SimulationError,
    gaussian,
    population::Player
};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Tag of a matchmaking strategy; carries the wire names accepted by the
/// external API and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum StrategyKind {
    #[strum(serialize = "naive")]
    Naive,
    #[strum(serialize = "elo")]
    Elo,
    #[strum(serialize = "tweaked_elo")]
    TweakedElo,
    #[strum(serialize = "tweaked2_elo")]
    Tweaked2Elo,
    #[strum(serialize = "gaussian")]
    Gaussian
}

/// A rating strategy with its parameters resolved.
///
/// Dispatch is by tag; every update rule is a pure function of the two
/// players' visible state, so strategies hold no per-run caches.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Control: random pairing, no rating movement.
    Naive,
    /// Classic fixed-K Elo.
    Elo { k: f64 },
    /// Elo with a K that decays as a player accumulates games.
    TweakedElo {
        k_min: f64,
        k_base: f64,
        games_divisor: f64
    },
    /// TweakedElo plus a coefficient damping the loser's delta.
    Tweaked2Elo {
        k_min: f64,
        k_base: f64,
        games_divisor: f64,
        coef: f64
    },
    /// Mean/variance belief per player, updated by the Gaussian 1v1 rule.
    Gaussian { beta: f64 }
}

/// New visible state for both sides of a finished match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingUpdate {
    pub winner_rating: f64,
    pub loser_rating: f64,
    pub winner_sigma: Option<f64>,
    pub loser_sigma: Option<f64>
}

/// Elo win expectation `1 / (1 + 10^((r_b - r_a) / 400))`.
pub fn elo_expectation(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10_f64.powf((rating_b - rating_a) / 400.0))
}

/// `K(g) = max(k_min, k_base / (1 + g / games_divisor))`.
fn dynamic_k(games_played: u32, k_min: f64, k_base: f64, games_divisor: f64) -> f64 {
    (k_base / (1.0 + games_played as f64 / games_divisor)).max(k_min)
}

impl Strategy {
    /// Resolves a strategy from its wire name and positional parameters.
    ///
    /// Parameter order follows the original front-end: `elo: [k]`,
    /// `tweaked_elo: [k_min, k_base, games_divisor]`,
    /// `tweaked2_elo: [k_min, k_base, games_divisor, coef]`. Missing
    /// parameters take their defaults; extras are ignored.
    pub fn from_name(name: &str, params: &[f64]) -> Result<Strategy, SimulationError> {
        let kind = StrategyKind::from_str(name)
            .map_err(|_| SimulationError::InvalidArgument(format!("unknown strategy \"{name}\"")))?;
        Self::from_kind(kind, params)
    }

    pub fn from_kind(kind: StrategyKind, params: &[f64]) -> Result<Strategy, SimulationError> {
        let get = |index: usize, default: f64| params.get(index).copied().unwrap_or(default);

        let strategy = match kind {
            StrategyKind::Naive => Strategy::Naive,
            StrategyKind::Elo => Strategy::Elo {
                k: get(0, DEFAULT_ELO_K)
            },
            StrategyKind::TweakedElo => Strategy::TweakedElo {
                k_min: get(0, DEFAULT_K_MIN),
                k_base: get(1, DEFAULT_K_BASE),
                games_divisor: get(2, DEFAULT_GAMES_DIVISOR)
            },
            StrategyKind::Tweaked2Elo => Strategy::Tweaked2Elo {
                k_min: get(0, DEFAULT_K_MIN),
                k_base: get(1, DEFAULT_K_BASE),
                games_divisor: get(2, DEFAULT_GAMES_DIVISOR),
                coef: get(3, DEFAULT_COEF)
            },
            StrategyKind::Gaussian => Strategy::Gaussian { beta: GAUSSIAN_BETA }
        };

        strategy.validate()?;
        Ok(strategy)
    }

    pub fn default_elo() -> Strategy {
        Strategy::Elo { k: DEFAULT_ELO_K }
    }

    pub fn default_gaussian() -> Strategy {
        Strategy::Gaussian { beta: GAUSSIAN_BETA }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Naive => StrategyKind::Naive,
            Strategy::Elo { .. } => StrategyKind::Elo,
            Strategy::TweakedElo { .. } => StrategyKind::TweakedElo,
            Strategy::Tweaked2Elo { .. } => StrategyKind::Tweaked2Elo,
            Strategy::Gaussian { .. } => StrategyKind::Gaussian
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        match *self {
            Strategy::Naive => Ok(()),
            Strategy::Elo { k } => {
                if k < 0.0 {
                    return Err(SimulationError::InvalidArgument(format!("negative K: {k}")));
                }
                Ok(())
            }
            Strategy::TweakedElo {
                k_min,
                k_base,
                games_divisor
            } => Self::validate_dynamic(k_min, k_base, games_divisor),
            Strategy::Tweaked2Elo {
                k_min,
                k_base,
                games_divisor,
                coef
            } => {
                Self::validate_dynamic(k_min, k_base, games_divisor)?;
                if coef <= 0.0 {
                    return Err(SimulationError::InvalidArgument(format!("coef must be positive: {coef}")));
                }
                Ok(())
            }
            Strategy::Gaussian { beta } => {
                if beta <= 0.0 {
                    return Err(SimulationError::InvalidArgument(format!("beta must be positive: {beta}")));
                }
                Ok(())
            }
        }
    }

    fn validate_dynamic(k_min: f64, k_base: f64, games_divisor: f64) -> Result<(), SimulationError> {
        if k_min < 0.0 || k_base < 0.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "negative K: k_min={k_min}, k_base={k_base}"
            )));
        }
        if games_divisor <= 0.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "games divisor must be positive: {games_divisor}"
            )));
        }
        Ok(())
    }

    /// Nominal start rating. The naive baseline reports the latent skill
    /// itself so its rating-to-skill relation is the identity.
    pub fn initial_rating(&self, skill: f64) -> f64 {
        match self {
            Strategy::Naive => skill,
            Strategy::Gaussian { .. } => GAUSSIAN_MU,
            _ => crate::model::constants::ELO_START_RATING
        }
    }

    pub fn initial_sigma(&self) -> Option<f64> {
        match self {
            Strategy::Gaussian { .. } => Some(GAUSSIAN_SIGMA),
            _ => None
        }
    }

    /// Pre-match predicted chance that `me` beats `opponent`, from the
    /// visible state only.
    pub fn predicted_win_chance(&self, me: &Player, opponent: &Player) -> f64 {
        match *self {
            Strategy::Gaussian { beta } => gaussian::win_chance(
                me.rating,
                me.sigma.unwrap_or(GAUSSIAN_SIGMA),
                opponent.rating,
                opponent.sigma.unwrap_or(GAUSSIAN_SIGMA),
                beta
            ),
            _ => elo_expectation(me.rating, opponent.rating)
        }
    }

    /// Applies the rating rule to a finished match.
    ///
    /// Reads the players' visible state only; the caller commits the returned
    /// values and repositions the rating index.
    pub fn update(&self, winner: &Player, loser: &Player) -> Result<RatingUpdate, SimulationError> {
        match *self {
            Strategy::Naive => Ok(RatingUpdate {
                winner_rating: winner.rating,
                loser_rating: loser.rating,
                winner_sigma: None,
                loser_sigma: None
            }),
            Strategy::Elo { k } => Ok(Self::elo_update(winner, loser, k, k, 1.0)),
            Strategy::TweakedElo {
                k_min,
                k_base,
                games_divisor
            } => {
                let k_winner = dynamic_k(winner.games_played, k_min, k_base, games_divisor);
                let k_loser = dynamic_k(loser.games_played, k_min, k_base, games_divisor);
                Ok(Self::elo_update(winner, loser, k_winner, k_loser, 1.0))
            }
            Strategy::Tweaked2Elo {
                k_min,
                k_base,
                games_divisor,
                coef
            } => {
                let k_winner = dynamic_k(winner.games_played, k_min, k_base, games_divisor);
                let k_loser = dynamic_k(loser.games_played, k_min, k_base, games_divisor);
                // Only the loser's delta is damped by coef; the winner's gain
                // stays unscaled.
                Ok(Self::elo_update(winner, loser, k_winner, k_loser, coef))
            }
            Strategy::Gaussian { beta } => {
                let sigma_winner = winner
                    .sigma
                    .ok_or_else(|| SimulationError::Internal(format!("player {} has no sigma", winner.id)))?;
                let sigma_loser = loser
                    .sigma
                    .ok_or_else(|| SimulationError::Internal(format!("player {} has no sigma", loser.id)))?;

                let (mu_winner, new_sigma_winner, mu_loser, new_sigma_loser) =
                    gaussian::rate_1v1(winner.rating, sigma_winner, loser.rating, sigma_loser, beta)?;

                Ok(RatingUpdate {
                    winner_rating: mu_winner,
                    loser_rating: mu_loser,
                    winner_sigma: Some(new_sigma_winner),
                    loser_sigma: Some(new_sigma_loser)
                })
            }
        }
    }

    fn elo_update(winner: &Player, loser: &Player, k_winner: f64, k_loser: f64, loser_coef: f64) -> RatingUpdate {
        let expected_winner = elo_expectation(winner.rating, loser.rating);
        let expected_loser = 1.0 - expected_winner;

        RatingUpdate {
            winner_rating: winner.rating + k_winner * (1.0 - expected_winner),
            loser_rating: loser.rating - loser_coef * k_loser * expected_loser,
            winner_sigma: None,
            loser_sigma: None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{dynamic_k, elo_expectation, Strategy, StrategyKind};
    use crate::model::{constants::GAUSSIAN_SIGMA, error::SimulationError};
    use crate::utils::test_utils::{elo_player, gaussian_player};
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_elo_expectation_values() {
        assert_abs_diff_eq!(elo_expectation(1000.0, 1000.0), 0.5);
        assert_abs_diff_eq!(elo_expectation(1000.0, 1400.0), 1.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(elo_expectation(1400.0, 1000.0), 10.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_every_kind_parses_its_own_name() {
        for kind in StrategyKind::iter() {
            let parsed = Strategy::from_name(&kind.to_string(), &[]).unwrap();
            assert_eq!(parsed.kind(), kind);
        }
    }

    #[test]
    fn test_unknown_name_is_invalid_argument() {
        let result = Strategy::from_name("glicko", &[]);
        assert!(matches!(result, Err(SimulationError::InvalidArgument(_))));
    }

    #[test]
    fn test_parameter_overrides() {
        let elo = Strategy::from_name("elo", &[16.0]).unwrap();
        assert_eq!(elo, Strategy::Elo { k: 16.0 });

        let tweaked2 = Strategy::from_name("tweaked2_elo", &[2.0, 100.0, 56.0, 0.3]).unwrap();
        assert_eq!(
            tweaked2,
            Strategy::Tweaked2Elo {
                k_min: 2.0,
                k_base: 100.0,
                games_divisor: 56.0,
                coef: 0.3
            }
        );
    }

    #[test]
    fn test_out_of_range_parameters_rejected() {
        assert!(Strategy::from_name("elo", &[-1.0]).is_err());
        assert!(Strategy::from_name("tweaked_elo", &[6.0, -100.0]).is_err());
        assert!(Strategy::from_name("tweaked_elo", &[6.0, 100.0, 0.0]).is_err());
        assert!(Strategy::from_name("tweaked2_elo", &[6.0, 100.0, 15.0, 0.0]).is_err());
        assert!(Strategy::from_name("tweaked2_elo", &[6.0, 100.0, 15.0, -0.5]).is_err());
    }

    #[test]
    fn test_fixed_k_update_is_symmetric_at_equal_ratings() {
        let strategy = Strategy::Elo { k: 32.0 };
        let winner = elo_player(0, 1000.0);
        let loser = elo_player(1, 1000.0);

        let update = strategy.update(&winner, &loser).unwrap();

        assert_abs_diff_eq!(update.winner_rating, 1016.0);
        assert_abs_diff_eq!(update.loser_rating, 984.0);
    }

    #[test]
    fn test_fixed_k_update_favors_the_underdog() {
        let strategy = Strategy::Elo { k: 32.0 };
        let underdog = elo_player(0, 1000.0);
        let favorite = elo_player(1, 1400.0);

        let upset = strategy.update(&underdog, &favorite).unwrap();
        let expected_gain = 32.0 * (1.0 - 1.0 / 11.0);

        assert_abs_diff_eq!(upset.winner_rating, 1000.0 + expected_gain, epsilon = 1e-9);
        assert_abs_diff_eq!(upset.loser_rating, 1400.0 - expected_gain, epsilon = 1e-9);
    }

    #[test]
    fn test_dynamic_k_decays_to_the_floor() {
        assert_abs_diff_eq!(dynamic_k(0, 6.0, 100.0, 15.0), 100.0);
        assert_abs_diff_eq!(dynamic_k(15, 6.0, 100.0, 15.0), 50.0);
        assert_abs_diff_eq!(dynamic_k(10_000, 6.0, 100.0, 15.0), 6.0);
    }

    #[test]
    fn test_tweaked_update_uses_per_side_k() {
        let strategy = Strategy::TweakedElo {
            k_min: 6.0,
            k_base: 100.0,
            games_divisor: 15.0
        };
        let mut veteran = elo_player(0, 1000.0);
        veteran.games_played = 150;
        let rookie = elo_player(1, 1000.0);

        // Rookie wins with a large K; veteran loses with a small one.
        let update = strategy.update(&rookie, &veteran).unwrap();

        assert_abs_diff_eq!(update.winner_rating, 1000.0 + 100.0 * 0.5);
        assert_abs_diff_eq!(update.loser_rating, 1000.0 - dynamic_k(150, 6.0, 100.0, 15.0) * 0.5);
    }

    #[test]
    fn test_tweaked2_scales_only_the_losers_delta() {
        let strategy = Strategy::Tweaked2Elo {
            k_min: 6.0,
            k_base: 100.0,
            games_divisor: 15.0,
            coef: 0.3
        };
        let winner = elo_player(0, 1000.0);
        let loser = elo_player(1, 1000.0);

        let update = strategy.update(&winner, &loser).unwrap();

        assert_abs_diff_eq!(update.winner_rating, 1050.0);
        assert_abs_diff_eq!(update.loser_rating, 1000.0 - 0.3 * 50.0);
    }

    #[test]
    fn test_naive_update_is_a_no_op() {
        let winner = elo_player(0, 0.73);
        let loser = elo_player(1, -0.21);

        let update = Strategy::Naive.update(&winner, &loser).unwrap();

        assert_eq!(update.winner_rating, 0.73);
        assert_eq!(update.loser_rating, -0.21);
        assert_eq!(update.winner_sigma, None);
    }

    #[test]
    fn test_gaussian_update_returns_new_sigmas() {
        let strategy = Strategy::default_gaussian();
        let winner = gaussian_player(0, 25.0, GAUSSIAN_SIGMA);
        let loser = gaussian_player(1, 25.0, GAUSSIAN_SIGMA);

        let update = strategy.update(&winner, &loser).unwrap();

        assert!(update.winner_rating > 25.0);
        assert!(update.loser_rating < 25.0);
        assert!(update.winner_sigma.unwrap() < GAUSSIAN_SIGMA);
        assert!(update.loser_sigma.unwrap() < GAUSSIAN_SIGMA);
    }

    #[test]
    fn test_gaussian_update_without_sigma_is_internal_error() {
        let strategy = Strategy::default_gaussian();
        let winner = elo_player(0, 25.0);
        let loser = gaussian_player(1, 25.0, GAUSSIAN_SIGMA);

        let result = strategy.update(&winner, &loser);

        assert!(matches!(result, Err(SimulationError::Internal(_))));
    }

    #[test]
    fn test_predicted_chance_complements() {
        for strategy in [Strategy::default_elo(), Strategy::default_gaussian()] {
            let (a, b) = match strategy {
                Strategy::Gaussian { .. } => (gaussian_player(0, 27.0, 4.0), gaussian_player(1, 23.0, 6.0)),
                _ => (elo_player(0, 1100.0), elo_player(1, 900.0))
            };

            let p = strategy.predicted_win_chance(&a, &b);
            let q = strategy.predicted_win_chance(&b, &a);

            assert!(p > 0.5);
            assert_abs_diff_eq!(p + q, 1.0, epsilon = 1e-12);
        }
    }
}
