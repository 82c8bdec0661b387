//! Headless client entry point.
//!
//! Loads content and the saved profile, lets the autopilot play one run,
//! saves the profile and prints the session summary as JSON.
mod autopilot;
mod config;
mod dirs;
mod logging;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use game_content::ContentFactory;
use runtime::{FileProfileRepository, ProfileRepository, Session};
use serde::Serialize;

use autopilot::Autopilot;
use config::ClientConfig;

#[derive(Serialize)]
struct RunOutput {
    session_id: String,
    seed: u64,
    ticks: u64,
    kills: u32,
    scrolls_picked: u32,
    decoys_picked: u32,
    summary: runtime::SessionSummary,
    money: u64,
    best_stage_level: u32,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let session_id = config
        .session_id
        .clone()
        .unwrap_or_else(|| format!("session_{}", now.as_secs()));

    logging::setup_logging(&dirs::log_dir(), &session_id)?;

    let content = ContentFactory::new(&config.data_dir)
        .load_all()
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;

    let save_dir = config.save_dir.clone().unwrap_or_else(dirs::save_dir);
    let repository = FileProfileRepository::new(&save_dir)
        .with_context(|| format!("opening save directory {}", save_dir.display()))?;
    let profile = repository.load_or_default()?;
    tracing::info!(
        money = profile.money,
        runs = profile.new_game_count,
        best = profile.best_stage_level,
        "profile loaded"
    );

    let seed = config.seed.unwrap_or(now.as_nanos() as u64);
    tracing::info!(seed, max_stages = config.max_stages, "starting run");

    let mut session = Session::from_content(content, seed, profile);
    let report = Autopilot::new(seed, config.tick_seconds, config.max_stages).run(&mut session)?;

    let summary = session.summary();
    let profile = session.into_profile();
    repository.save(&profile)?;
    tracing::info!(path = %repository.path().display(), "profile saved");

    let output = RunOutput {
        session_id,
        seed,
        ticks: report.ticks,
        kills: report.kills,
        scrolls_picked: report.scrolls,
        decoys_picked: report.decoys,
        summary,
        money: profile.money,
        best_stage_level: profile.best_stage_level,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
