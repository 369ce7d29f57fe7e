use itertools::Itertools;
use std::collections::HashSet;

/// Per-match series for one run.
///
/// Three parallel arrays indexed by the loop counter (prediction error,
/// skill gap, good-match indicator), pre-sized at run start. Running sums
/// are kept in both modes; probe mode stores no series at all so a
/// parameter sweep stays memory-bounded.
pub struct MetricsCollector {
    prediction_error: Vec<f64>,
    skill_gap: Vec<f64>,
    good_match: Vec<f64>,
    prediction_error_sum: f64,
    skill_gap_sum: f64,
    recorded: usize
}

impl MetricsCollector {
    pub fn full(games: usize) -> MetricsCollector {
        MetricsCollector {
            prediction_error: vec![0.0; games],
            skill_gap: vec![0.0; games],
            good_match: vec![0.0; games],
            prediction_error_sum: 0.0,
            skill_gap_sum: 0.0,
            recorded: 0
        }
    }

    pub fn probe() -> MetricsCollector {
        MetricsCollector {
            prediction_error: Vec::new(),
            skill_gap: Vec::new(),
            good_match: Vec::new(),
            prediction_error_sum: 0.0,
            skill_gap_sum: 0.0,
            recorded: 0
        }
    }

    pub fn record(&mut self, game: usize, prediction_error: f64, skill_gap: f64, good_match: bool) {
        if !self.prediction_error.is_empty() {
            self.prediction_error[game] = prediction_error;
            self.skill_gap[game] = skill_gap;
            self.good_match[game] = if good_match { 1.0 } else { 0.0 };
        }
        self.prediction_error_sum += prediction_error;
        self.skill_gap_sum += skill_gap;
        self.recorded += 1;
    }

    pub fn prediction_error_sum(&self) -> f64 {
        self.prediction_error_sum
    }

    pub fn skill_gap_sum(&self) -> f64 {
        self.skill_gap_sum
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn into_series(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.prediction_error, self.skill_gap, self.good_match)
    }
}

pub fn sum(series: &[f64]) -> f64 {
    series.iter().sum()
}

pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    sum(series) / series.len() as f64
}

/// Population standard deviation of a window of the series.
pub fn std_dev(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let mean = mean(series);
    let variance = series.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / series.len() as f64;
    variance.sqrt()
}

/// Averages the series inside `bins` equal windows (trailing remainder
/// dropped), the smoothing every downstream consumer of these series uses.
pub fn binned_means(series: &[f64], bins: usize) -> Vec<f64> {
    let bin_length = series.len() / bins;
    if bin_length == 0 {
        return Vec::new();
    }
    (0..bins)
        .map(|bin| mean(&series[bin * bin_length..(bin + 1) * bin_length]))
        .collect()
}

/// Spearman rank correlation between two equally long samples.
///
/// Values are ranked by `total_cmp`; ties get ordinal ranks, which is exact
/// for the continuous quantities compared here.
pub fn spearman(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    pearson(&ranks(xs), &ranks(ys))
}

fn ranks(values: &[f64]) -> Vec<f64> {
    let mut ranks = vec![0.0; values.len()];
    for (rank, index) in (0..values.len())
        .sorted_by(|&a, &b| values[a].total_cmp(&values[b]))
        .enumerate()
    {
        ranks[index] = rank as f64;
    }
    ranks
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        covariance += (x - mean_x) * (y - mean_y);
        variance_x += (x - mean_x) * (x - mean_x);
        variance_y += (y - mean_y) * (y - mean_y);
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return 0.0;
    }
    covariance / (variance_x * variance_y).sqrt()
}

/// Number of distinct values in a history (distinct opponents faced, when
/// applied to an opponent-skill history).
pub fn unique_values(series: &[f64]) -> usize {
    series.iter().map(|v| v.to_bits()).collect::<HashSet<u64>>().len()
}

#[cfg(test)]
mod tests {
    use super::{binned_means, mean, spearman, std_dev, sum, unique_values, MetricsCollector};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_record_fills_all_series() {
        let mut collector = MetricsCollector::full(3);
        collector.record(0, 0.5, 1.0, true);
        collector.record(1, 0.25, 2.0, false);
        collector.record(2, 0.75, 3.0, true);

        assert_abs_diff_eq!(collector.prediction_error_sum(), 1.5);
        assert_abs_diff_eq!(collector.skill_gap_sum(), 6.0);
        assert_eq!(collector.recorded(), 3);

        let (errors, gaps, good) = collector.into_series();
        assert_eq!(errors, vec![0.5, 0.25, 0.75]);
        assert_eq!(gaps, vec![1.0, 2.0, 3.0]);
        assert_eq!(good, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_probe_mode_keeps_sums_without_series() {
        let mut collector = MetricsCollector::probe();
        collector.record(0, 0.5, 1.0, true);
        collector.record(1, 0.5, 1.0, false);

        assert_abs_diff_eq!(collector.prediction_error_sum(), 1.0);
        assert_abs_diff_eq!(collector.skill_gap_sum(), 2.0);

        let (errors, gaps, good) = collector.into_series();
        assert!(errors.is_empty());
        assert!(gaps.is_empty());
        assert!(good.is_empty());
    }

    #[test]
    fn test_sum_and_mean() {
        let series = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(sum(&series), 10.0);
        assert_abs_diff_eq!(mean(&series), 2.5);
        assert_abs_diff_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_std_dev() {
        assert_abs_diff_eq!(std_dev(&[2.0, 2.0, 2.0]), 0.0);
        assert_abs_diff_eq!(std_dev(&[1.0, 3.0]), 1.0);
    }

    #[test]
    fn test_binned_means_drops_remainder() {
        let series = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 99.0];
        assert_eq!(binned_means(&series, 3), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_spearman_perfect_and_reversed() {
        let xs = [0.1, 0.4, 0.2, 0.9, 0.5];
        let increasing: Vec<f64> = xs.iter().map(|x| x * 10.0 + 3.0).collect();
        let decreasing: Vec<f64> = xs.iter().map(|x| -x).collect();

        assert_abs_diff_eq!(spearman(&xs, &increasing), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spearman(&xs, &decreasing), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spearman_is_rank_based() {
        // A monotone but wildly non-linear mapping still correlates to 1.
        let xs: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
        let ys: Vec<f64> = xs.iter().map(|x| x.exp().powi(7)).collect();

        assert_abs_diff_eq!(spearman(&xs, &ys), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unique_values() {
        assert_eq!(unique_values(&[1.0, 2.0, 1.0, 3.0]), 3);
        assert_eq!(unique_values(&[]), 0);
    }
}
