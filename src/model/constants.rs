pub static ELO_START_RATING: f64 = 1000.0;
pub static DEFAULT_ELO_K: f64 = 32.0;
pub static DEFAULT_K_BASE: f64 = 100.0;
pub static DEFAULT_K_MIN: f64 = 6.0;
pub static DEFAULT_GAMES_DIVISOR: f64 = 15.0;
pub static DEFAULT_COEF: f64 = 1.0;

pub static GAUSSIAN_MU: f64 = 25.0;
pub static GAUSSIAN_SIGMA: f64 = 25.0 / 3.0;
pub static GAUSSIAN_BETA: f64 = GAUSSIAN_SIGMA / 2.0;

/// Draw probability the Gaussian factor graph is parameterised with. Games
/// here never end in a draw, but the margin derived from this value still
/// shifts the truncation point of every decisive update.
pub static GAUSSIAN_DRAW_PROBABILITY: f64 = 0.10;

/// Scale factor of the logistic curve mapping latent-skill difference to a
/// true win probability. With unit-variance skills this gives a 75% edge at
/// roughly 0.11 skill units.
pub static SKILL_SCALE: f64 = 10.0;

/// Half-width of the "good match" band around a 50% true win chance.
pub static GOOD_MATCH_TAU: f64 = 0.2;

/// Total width of the rating-index window handed to pairing policies.
pub static MATCH_WINDOW: usize = 64;

/// Candidates evaluated on each side of a player when maximizing match quality.
pub static QUALITY_CANDIDATES: usize = 32;

pub static DEFAULT_SEED: u64 = 0x1234_5678;

/// Headroom multiplier on the expected per-player history length (2 * GAMES / N).
pub static HISTORY_HEADROOM: f64 = 1.25;
