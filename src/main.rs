mod args;

use crate::args::Args;
use clap::Parser;
use mmr_simulator::{model::metrics, run, run_parameter_probe, SimulationConfig, Strategy};
use std::{fs::File, io::BufWriter, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level)?)
        .init();

    let strategy = Strategy::from_name(&args.strategy, &args.params)?;
    let config = SimulationConfig::new(args.players, args.games, strategy.clone()).with_seed(args.seed);

    info!(
        strategy = %strategy.kind(),
        players = args.players,
        games = args.games,
        seed = args.seed,
        "starting simulation"
    );
    let started = Instant::now();

    if args.probe {
        let (error_sum, gap_sum) = run_parameter_probe(&config)?;
        info!(elapsed = ?started.elapsed(), "probe finished");
        println!("prediction error sum: {error_sum:.3}");
        println!("skill gap sum:        {gap_sum:.3}");
        return Ok(());
    }

    let output = run(&config)?;
    info!(elapsed = ?started.elapsed(), numeric_failures = output.numeric_failures, "simulation finished");

    let skills: Vec<f64> = output.players.iter().map(|p| p.skill).collect();
    let ratings: Vec<f64> = output.players.iter().map(|p| p.rating).collect();
    let tail = (args.games / 10).max(1);

    println!("rank correlation (skill vs rating): {:.4}", metrics::spearman(&skills, &ratings));
    println!(
        "mean prediction error, first 10%:   {:.4}",
        metrics::mean(&output.prediction_error[..tail])
    );
    let late_errors = &output.prediction_error[args.games - tail..];
    println!(
        "mean prediction error, last 10%:    {:.4} (std {:.4})",
        metrics::mean(late_errors),
        metrics::std_dev(late_errors)
    );
    println!(
        "good-match fraction, last 10%:      {:.4}",
        metrics::mean(&output.good_match[args.games - tail..])
    );

    let unique_opponents: f64 = output
        .players
        .iter()
        .map(|p| metrics::unique_values(&p.opponent_history) as f64)
        .sum::<f64>()
        / output.players.len() as f64;
    println!("average unique opponents:           {unique_opponents:.2}");

    if matches!(strategy, Strategy::Gaussian { .. }) {
        let mean_sigma: f64 =
            output.players.iter().filter_map(|p| p.sigma).sum::<f64>() / output.players.len() as f64;
        println!("mean population sigma:              {mean_sigma:.4}");
    }

    if let Some(path) = &args.output {
        serde_json::to_writer(BufWriter::new(File::create(path)?), &output)?;
        info!(path = %path.display(), "run output written");
    }

    Ok(())
}
