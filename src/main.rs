mod autopilot;

use autopilot::Autopilot;
use color_eyre::eyre::WrapErr;
use env_logger::Env;
use kick_core::utils::TimeEstimation;
use kick_core::{FootballMatch, MatchConfig, MatchEvent};
use log::info;
use std::env;
use std::fs;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let tick_rate = config.tick_rate;

    let mut football_match = FootballMatch::new(config)?;
    let autopilot = Autopilot::new();

    let ((summary, ticks, goals), estimated) = TimeEstimation::estimate(|| {
        let mut ticks = 0u64;
        let mut goals = Vec::new();

        while !football_match.is_finished() {
            let intent = autopilot.intent(&football_match);
            let result = football_match.tick(&intent);

            for event in &result.events {
                if let MatchEvent::GoalScored { side, scorer_id } = event {
                    goals.push((result.clock_remaining_secs, *side, *scorer_id));
                }
            }

            ticks += 1;
        }

        (football_match.summary(), ticks, goals)
    });

    for (remaining, side, scorer) in goals {
        info!("goal: {} side, player {:?}, {:.1}s left", side, scorer, remaining);
    }

    info!(
        "match finished {} - {} ({:?}) after {} ticks ({:.1}s of play), simulated in {} ms",
        summary.score.left,
        summary.score.right,
        summary.outcome,
        ticks,
        ticks as f32 / tick_rate as f32,
        estimated
    );

    Ok(())
}

fn load_config() -> color_eyre::Result<MatchConfig> {
    let Ok(path) = env::var("KICK_CONFIG") else {
        return Ok(MatchConfig::default());
    };

    let raw = fs::read_to_string(&path).wrap_err_with(|| format!("reading {}", path))?;
    let config: MatchConfig =
        serde_json::from_str(&raw).wrap_err_with(|| format!("parsing {}", path))?;

    info!("config loaded from {}", path);

    Ok(config)
}
