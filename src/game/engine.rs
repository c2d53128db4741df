//! `ProgressEngine`: the progression state plus the tables that drive it.

use super::config::ProgressConfig;
use super::logic;
use super::save;
use super::state::{ClickOutcome, ProgressState, ProgressView};
use super::store::StoreError;

pub struct ProgressEngine {
    config: ProgressConfig,
    state: ProgressState,
}

impl ProgressEngine {
    /// Hydrate from a persisted blob if there is one. Never fails.
    pub fn initialize(config: ProgressConfig, persisted: Option<&str>) -> Self {
        let state = match persisted {
            Some(blob) => save::deserialize(blob).into_state(config.default_rank()),
            None => ProgressState::new(config.default_rank()),
        };
        log::info!(
            "progress loaded: score={} level={} rank={} rewards={}",
            state.score,
            state.level,
            state.rank,
            state.unlocked_rewards.len()
        );
        Self { config, state }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    pub fn apply_click(&mut self) -> ClickOutcome {
        let outcome = logic::apply_click(&mut self.state, &self.config);
        if outcome.leveled_up {
            log::info!("level up: {}", self.state.level);
        }
        if let Some(rank) = &outcome.new_rank {
            log::info!("rank up: {rank}");
        }
        for id in &outcome.unlocked {
            log::info!("reward unlocked: {id}");
        }
        log::debug!("click: score={}", self.state.score);
        outcome
    }

    /// Back to a fresh run. The high score is kept.
    pub fn reset(&mut self) {
        let high_score = self.state.high_score;
        self.state = ProgressState::new(self.config.default_rank());
        self.state.high_score = high_score;
        log::info!("progress reset (high score {high_score} kept)");
    }

    pub fn serialize(&self) -> Result<String, StoreError> {
        save::serialize(&self.state)
    }

    pub fn view(&self) -> ProgressView {
        logic::view(&self.state, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(persisted: Option<&str>) -> ProgressEngine {
        ProgressEngine::initialize(ProgressConfig::builtin().unwrap(), persisted)
    }

    #[test]
    fn fresh_engine_has_defaults() {
        let e = engine(None);
        assert_eq!(e.state(), &ProgressState::new("Novice"));
    }

    #[test]
    fn corrupt_save_gives_defaults() {
        let e = engine(Some("{\"score\": oops"));
        assert_eq!(e.state(), &ProgressState::new("Novice"));
    }

    #[test]
    fn reload_restores_progress() {
        let mut first = engine(None);
        for _ in 0..40 {
            first.apply_click();
        }
        let blob = first.serialize().unwrap();
        let second = engine(Some(&blob));
        assert_eq!(second.state(), first.state());
        assert_eq!(second.view(), first.view());
    }

    #[test]
    fn reset_keeps_high_score() {
        let mut e = engine(None);
        for _ in 0..12 {
            e.apply_click();
        }
        e.reset();
        let state = e.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.rank, "Novice");
        assert!(state.unlocked_rewards.is_empty());
        assert_eq!(state.high_score, 12);
    }

    #[test]
    fn clicks_after_reset_do_not_raise_high_score_early() {
        let mut e = engine(None);
        for _ in 0..5 {
            e.apply_click();
        }
        e.reset();
        let outcome = e.apply_click();
        assert!(!outcome.new_high_score);
        assert_eq!(e.state().high_score, 5);
    }
}
