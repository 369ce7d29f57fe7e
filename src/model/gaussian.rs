/// Gaussian rating math for 1v1 win/loss games.
///
/// Each player carries a belief `(mu, sigma)` over their strength. A match
/// result moves both beliefs by the truncated-normal moments of the
/// performance-difference factor; sigma only ever shrinks. The factor graph
/// is parameterised with a draw probability, and the margin derived from it
/// shifts the truncation point of every update even though this simulator
/// only ever produces decisive outcomes.
use crate::model::{constants::GAUSSIAN_DRAW_PROBABILITY, error::SimulationError};
use lazy_static::lazy_static;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

lazy_static! {
    static ref STANDARD_NORMAL: Normal = Normal::new(0.0, 1.0).unwrap();
}

/// Additive truncation moment `v(t) = pdf(t) / cdf(t)`.
fn v(t: f64) -> f64 {
    STANDARD_NORMAL.pdf(t) / STANDARD_NORMAL.cdf(t)
}

/// Multiplicative truncation moment `w(t) = v(t) * (v(t) + t)`, in `(0, 1)`.
fn w(t: f64) -> f64 {
    let v = v(t);
    v * (v + t)
}

/// Performance margin inside which a two-player game would count as drawn:
/// `|inverse_cdf((p_draw + 1) / 2)| * sqrt(2) * beta`.
fn draw_margin(beta: f64) -> f64 {
    STANDARD_NORMAL
        .inverse_cdf((GAUSSIAN_DRAW_PROBABILITY + 1.0) / 2.0)
        .abs()
        * 2.0_f64.sqrt()
        * beta
}

/// Applies the 1v1 decisive-outcome update to the winner's and loser's
/// beliefs.
///
/// Returns `(mu_winner, sigma_winner, mu_loser, sigma_loser)`. The winner's
/// mean strictly increases, the loser's strictly decreases, and neither sigma
/// grows. A non-finite intermediate (possible when the winner was a massive
/// underdog and `cdf(t)` underflows) is reported as a `NumericFailure` so the
/// caller can keep the pre-match beliefs.
pub fn rate_1v1(
    mu_winner: f64,
    sigma_winner: f64,
    mu_loser: f64,
    sigma_loser: f64,
    beta: f64
) -> Result<(f64, f64, f64, f64), SimulationError> {
    let winner_var = sigma_winner * sigma_winner;
    let loser_var = sigma_loser * sigma_loser;
    let c2 = 2.0 * beta * beta + winner_var + loser_var;
    let c = c2.sqrt();

    let t = (mu_winner - mu_loser - draw_margin(beta)) / c;
    let v = v(t);
    let w = w(t);

    let new_mu_winner = mu_winner + winner_var / c * v;
    let new_mu_loser = mu_loser - loser_var / c * v;
    let new_sigma_winner = sigma_winner * (1.0 - winner_var / c2 * w).sqrt();
    let new_sigma_loser = sigma_loser * (1.0 - loser_var / c2 * w).sqrt();

    let result = (new_mu_winner, new_sigma_winner, new_mu_loser, new_sigma_loser);
    if !new_mu_winner.is_finite()
        || !new_sigma_winner.is_finite()
        || !new_mu_loser.is_finite()
        || !new_sigma_loser.is_finite()
    {
        return Err(SimulationError::NumericFailure(format!(
            "non-finite update for ({mu_winner}, {sigma_winner}) vs ({mu_loser}, {sigma_loser})"
        )));
    }

    Ok(result)
}

/// Relative draw likelihood between two beliefs, in `(0, 1]`.
///
/// Maximal for identical, confident beliefs; this is the score the pairing
/// policy maximizes over its candidate window.
pub fn match_quality(mu_p: f64, sigma_p: f64, mu_q: f64, sigma_q: f64, beta: f64) -> f64 {
    let d = 2.0 * beta * beta + sigma_p * sigma_p + sigma_q * sigma_q;
    let spread = (2.0 * beta * beta / d).sqrt();
    let closeness = (-(mu_p - mu_q) * (mu_p - mu_q) / (2.0 * d)).exp();
    spread * closeness
}

/// Pre-match chance that player A beats player B under the current beliefs.
pub fn win_chance(mu_a: f64, sigma_a: f64, mu_b: f64, sigma_b: f64, beta: f64) -> f64 {
    let denom = (sigma_a * sigma_a + sigma_b * sigma_b + 2.0 * beta * beta).sqrt();
    STANDARD_NORMAL.cdf((mu_a - mu_b) / denom)
}
