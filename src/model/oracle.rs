use crate::model::{constants::SKILL_SCALE, rng::SimRng};

/// Probability that a player with latent skill `skill_a` beats a player with
/// latent skill `skill_b`.
///
/// Latent skills never leak into strategies or the matchmaker; only this
/// oracle and the metrics layer read them.
pub fn win_probability(skill_a: f64, skill_b: f64) -> f64 {
    1.0 / (1.0 + (-SKILL_SCALE * (skill_a - skill_b)).exp())
}

/// Draws the outcome of a match. Returns `true` if player A wins.
pub fn decide(skill_a: f64, skill_b: f64, rng: &mut SimRng) -> bool {
    rng.uniform() < win_probability(skill_a, skill_b)
}

#[cfg(test)]
mod tests {
    use super::{decide, win_probability};
    use crate::model::rng::SimRng;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equal_skill_is_coin_flip() {
        assert_abs_diff_eq!(win_probability(0.0, 0.0), 0.5);
        assert_abs_diff_eq!(win_probability(1.3, 1.3), 0.5);
    }

    #[test]
    fn test_probabilities_complement() {
        let p = win_probability(0.4, -0.2);
        let q = win_probability(-0.2, 0.4);

        assert_abs_diff_eq!(p + q, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_small_edge_at_tenth_of_a_skill_unit() {
        // ~75% win chance at a 0.11 skill-unit advantage.
        assert_abs_diff_eq!(win_probability(0.11, 0.0), 0.75, epsilon = 0.01);
    }

    #[test]
    fn test_monotone_in_skill_difference() {
        let mut prev = 0.0;
        for i in 0..20 {
            let p = win_probability(i as f64 * 0.05, 0.0);
            assert!(p > prev);
            prev = p;
        }
    }

    #[test]
    fn test_decide_is_deterministic_under_seed() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);

        for _ in 0..1000 {
            assert_eq!(decide(0.1, -0.1, &mut a), decide(0.1, -0.1, &mut b));
        }
    }

    #[test]
    fn test_decide_tracks_probability() {
        let mut rng = SimRng::new(5);
        let trials = 20_000;
        let wins = (0..trials).filter(|_| decide(0.11, 0.0, &mut rng)).count();
        let observed = wins as f64 / trials as f64;

        assert_abs_diff_eq!(observed, win_probability(0.11, 0.0), epsilon = 0.02);
    }
}
