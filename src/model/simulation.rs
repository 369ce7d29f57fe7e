use crate::{
    model::{
        constants::{GOOD_MATCH_TAU, HISTORY_HEADROOM},
        error::SimulationError,
        matchmaker::Matchmaker,
        metrics::MetricsCollector,
        oracle,
        population::{self, Player},
        rng::SimRng,
        strategy::{RatingUpdate, Strategy},
        SimulationConfig
    },
    utils::progress_utils::progress_bar
};
use serde::Serialize;

/// Receiver for recoverable per-match diagnostics.
///
/// Injected into the driver so the core never writes to a global logger the
/// caller didn't choose.
pub trait DiagnosticSink {
    fn numeric_failure(&mut self, game: usize, winner: u32, loser: u32, detail: &str);
}

/// Default sink: forwards to the `tracing` facade.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn numeric_failure(&mut self, game: usize, winner: u32, loser: u32, detail: &str) {
        tracing::warn!(game, winner, loser, detail, "keeping pre-match ratings after failed update");
    }
}

/// Whether a run keeps full per-player histories and series, or only the
/// two probe sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    Full,
    Probe
}

/// Everything a finished run hands back to the caller.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub players: Vec<Player>,
    pub prediction_error: Vec<f64>,
    pub skill_gap: Vec<f64>,
    pub good_match: Vec<f64>,
    pub numeric_failures: u64
}

/// One self-contained simulation run.
///
/// Owns its population, matchmaker, RNG stream and metric buffers; nothing
/// is shared between runs, so independent runs may execute concurrently on
/// separate threads. Within a run the match loop is strictly sequential and
/// deterministic under the configured seed.
pub struct Simulation {
    players: Vec<Player>,
    matchmaker: Matchmaker,
    strategy: Strategy,
    rng: SimRng,
    metrics: MetricsCollector,
    games: usize,
    record_histories: bool,
    numeric_failures: u64,
    sink: Box<dyn DiagnosticSink>
}

impl Simulation {
    pub fn new(config: &SimulationConfig, mode: RecordMode) -> Result<Simulation, SimulationError> {
        Self::with_diagnostics(config, mode, Box::new(TracingSink))
    }

    pub fn with_diagnostics(
        config: &SimulationConfig,
        mode: RecordMode,
        sink: Box<dyn DiagnosticSink>
    ) -> Result<Simulation, SimulationError> {
        config.validate()?;

        let record_histories = mode == RecordMode::Full;
        let history_capacity = if record_histories {
            (2.0 * config.games as f64 / config.players as f64 * HISTORY_HEADROOM) as usize + 1
        } else {
            0
        };

        let mut rng = SimRng::new(config.seed);
        let players = population::generate_players(
            config.players,
            &config.strategy,
            config.skill_distribution,
            history_capacity,
            &mut rng
        );
        let matchmaker = Matchmaker::new(&players);
        let metrics = if record_histories {
            MetricsCollector::full(config.games)
        } else {
            MetricsCollector::probe()
        };

        Ok(Simulation {
            players,
            matchmaker,
            strategy: config.strategy.clone(),
            rng,
            metrics,
            games: config.games,
            record_histories,
            numeric_failures: 0,
            sink
        })
    }

    /// Runs the match loop to completion.
    ///
    /// Per match: round-robin first player, opponent from the matchmaker,
    /// pre-match prediction, oracle outcome, rating update (numeric failures
    /// are reported and skipped), history appends, metric appends.
    pub fn simulate(&mut self) -> Result<(), SimulationError> {
        let bar = if self.record_histories {
            progress_bar(self.games as u64, "Simulating matches".to_string())
        } else {
            None
        };

        let count = self.players.len();
        for game in 0..self.games {
            let first = (game % count) as u32;
            let opponent =
                self.matchmaker
                    .next_opponent(&self.players[first as usize], &self.strategy, &self.players, &mut self.rng);

            let predicted_first = self
                .strategy
                .predicted_win_chance(&self.players[first as usize], &self.players[opponent as usize]);

            let skill_first = self.players[first as usize].skill;
            let skill_opponent = self.players[opponent as usize].skill;
            let first_wins = oracle::decide(skill_first, skill_opponent, &mut self.rng);
            let (winner, loser) = if first_wins { (first, opponent) } else { (opponent, first) };

            match self.strategy.update(&self.players[winner as usize], &self.players[loser as usize]) {
                Ok(update) => self.commit(winner, loser, update),
                Err(SimulationError::NumericFailure(detail)) => {
                    self.sink.numeric_failure(game, winner, loser, &detail);
                    self.numeric_failures += 1;
                }
                Err(fatal) => return Err(fatal)
            }

            self.finish_match(first, opponent, predicted_first);

            let outcome = if first_wins { 1.0 } else { 0.0 };
            let true_chance = oracle::win_probability(skill_first, skill_opponent);
            self.metrics.record(
                game,
                (predicted_first - outcome).abs(),
                (skill_first - skill_opponent).abs(),
                (true_chance - 0.5).abs() <= GOOD_MATCH_TAU
            );

            if let Some(pb) = &bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = &bar {
            pb.finish();
        }

        Ok(())
    }

    /// Applies a committed update to both players and the rating index.
    fn commit(&mut self, winner: u32, loser: u32, update: RatingUpdate) {
        let old_winner_rating = self.players[winner as usize].rating;
        if update.winner_rating != old_winner_rating {
            self.players[winner as usize].rating = update.winner_rating;
            self.matchmaker.reposition(winner, old_winner_rating, update.winner_rating);
        }

        let old_loser_rating = self.players[loser as usize].rating;
        if update.loser_rating != old_loser_rating {
            self.players[loser as usize].rating = update.loser_rating;
            self.matchmaker.reposition(loser, old_loser_rating, update.loser_rating);
        }

        if update.winner_sigma.is_some() {
            self.players[winner as usize].sigma = update.winner_sigma;
        }
        if update.loser_sigma.is_some() {
            self.players[loser as usize].sigma = update.loser_sigma;
        }
    }

    /// Post-match bookkeeping for both participants.
    fn finish_match(&mut self, first: u32, opponent: u32, predicted_first: f64) {
        let first_skill = self.players[first as usize].skill;
        let opponent_skill = self.players[opponent as usize].skill;

        for (id, opponent_skill, predicted) in [
            (first, opponent_skill, predicted_first),
            (opponent, first_skill, 1.0 - predicted_first)
        ] {
            let player = &mut self.players[id as usize];
            player.games_played += 1;

            if self.record_histories {
                let rating = player.rating;
                player.rating_history.push(rating);
                player.opponent_history.push(opponent_skill);
                player.predicted_chance_history.push(predicted);
                if let Some(sigma) = player.sigma {
                    player.sigma_history.push(sigma);
                }
            }
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    /// Matches whose rating update was skipped because it produced a
    /// non-finite value.
    pub fn numeric_failures(&self) -> u64 {
        self.numeric_failures
    }

    pub fn probe_sums(&self) -> (f64, f64) {
        (self.metrics.prediction_error_sum(), self.metrics.skill_gap_sum())
    }

    pub fn into_output(self) -> RunOutput {
        let numeric_failures = self.numeric_failures;
        let (prediction_error, skill_gap, good_match) = self.metrics.into_series();
        RunOutput {
            players: self.players,
            prediction_error,
            skill_gap,
            good_match,
            numeric_failures
        }
    }
}
