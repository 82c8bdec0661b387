//! Scripted player for headless runs.
//!
//! Each tick the autopilot advances the session, kills every enemy on the
//! field and, during the reward phase, walks into a random pickup. After
//! `max_stages` reward cycles it ends the run and waits for the game-over cue.

use anyhow::{Result, bail};
use game_core::{AudioCue, PcgRng, RngOracle, StageState, compute_seed};
use runtime::{RewardOutcome, Session};

/// RNG context for pickup choice, distinct from the stage's own draws.
const PICKUP_CONTEXT: u32 = 16;

#[derive(Clone, Debug)]
pub struct Autopilot {
    seed: u64,
    tick_seconds: f64,
    max_stages: u32,
    max_ticks: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutopilotReport {
    pub ticks: u64,
    pub kills: u32,
    pub scrolls: u32,
    pub decoys: u32,
}

impl Autopilot {
    /// Ticks allowed per reward cycle before the run is declared stuck.
    const TICKS_PER_STAGE: u64 = 100_000;

    pub fn new(seed: u64, tick_seconds: f64, max_stages: u32) -> Self {
        let max_stages = max_stages.max(1);
        Self {
            seed,
            tick_seconds,
            max_stages,
            max_ticks: Self::TICKS_PER_STAGE * (u64::from(max_stages) + 1),
        }
    }

    pub fn run(&self, session: &mut Session) -> Result<AutopilotReport> {
        let mut report = AutopilotReport::default();
        session.begin_play();

        loop {
            if report.ticks >= self.max_ticks {
                bail!(
                    "run did not finish after {} ticks (state {}, cycles {})",
                    report.ticks,
                    session.state(),
                    session.reward_cycles()
                );
            }
            report.ticks += 1;
            session.advance(self.tick_seconds);

            if session.is_game_over() {
                if session.audio().last_one_shot() == Some(AudioCue::GameOver) {
                    break;
                }
                continue;
            }

            match session.state() {
                StageState::Battle => {
                    for enemy in session.world().enemies() {
                        session.damage_enemy(enemy, f32::MAX)?;
                        report.kills += 1;
                    }
                }
                StageState::Reward => {
                    self.pick(session, &mut report)?;
                    if session.reward_cycles() >= self.max_stages {
                        tracing::info!(cycles = session.reward_cycles(), "stage limit reached");
                        session.game_over()?;
                    }
                }
                StageState::Ready => {}
            }
        }

        session.teardown();
        tracing::info!(ticks = report.ticks, kills = report.kills, "autopilot finished");
        Ok(report)
    }

    fn pick(&self, session: &mut Session, report: &mut AutopilotReport) -> Result<()> {
        let rewards = session.stage().session().active_rewards.clone();
        if rewards.is_empty() {
            // every pickup failed to spawn; nothing can advance the stage
            bail!("reward phase without pickups");
        }

        let seed = compute_seed(self.seed, report.ticks, 0, PICKUP_CONTEXT);
        let index = PcgRng.range(seed, 0, rewards.len() as u32 - 1) as usize;

        match session.pick_reward(rewards[index])? {
            RewardOutcome::Scroll { name } => {
                tracing::info!(%name, "autopilot picked scroll");
                report.scrolls += 1;
            }
            RewardOutcome::Empty => report.decoys += 1,
            RewardOutcome::Ignored => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_content::{ScrollCatalog, ScrollDefinition};
    use game_core::{CharacterStat, StatTable};
    use runtime::{PlayerProfile, SessionConfig};

    use super::*;

    fn session(seed: u64) -> Session {
        let table = StatTable::new(
            vec![CharacterStat::with_max_hp(100.0); 3],
            CharacterStat::with_max_hp(500.0),
        )
        .unwrap();
        let scrolls = ScrollCatalog::new(vec![ScrollDefinition::new(
            "vigor",
            CharacterStat::with_max_hp(10.0),
        )]);
        Session::new(
            SessionConfig::new(seed),
            Arc::new(table),
            scrolls,
            PlayerProfile::new(),
        )
    }

    #[test]
    fn run_stops_after_stage_limit() {
        let mut session = session(1);
        let report = Autopilot::new(1, 0.1, 3).run(&mut session).unwrap();

        assert_eq!(session.reward_cycles(), 3);
        assert_eq!(report.scrolls + report.decoys, 3);
        assert!(report.kills >= 3);
        assert!(session.is_game_over());
        assert!(session.is_torn_down());
        assert_eq!(session.profile().new_game_count, 1);
        assert_eq!(
            session.profile().money,
            session.stage().session().accumulated_reward_amount
        );
    }

    #[test]
    fn runs_are_reproducible() {
        let run = |seed| {
            let mut session = session(seed);
            let report = Autopilot::new(seed, 0.1, 4).run(&mut session).unwrap();
            (report, session.summary().stage_level)
        };
        assert_eq!(run(9), run(9));
    }
}
