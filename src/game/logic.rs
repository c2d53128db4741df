//! Button Game progression rules. Pure functions over `ProgressState`.

use super::config::{ProgressConfig, RankEntry};
use super::state::{ClickOutcome, ProgressState, ProgressView, RewardStatus};

/// Cumulative score needed to complete `level`: `floor(10 * 1.5^(level - 1))`.
///
/// Floor is part of the contract; existing saves depend on these exact boundaries.
pub fn level_threshold(level: u32) -> u64 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX) - 1;
    // Saturates to u64::MAX once the power overflows to infinity.
    (10.0 * 1.5_f64.powi(exponent)).floor() as u64
}

/// Score at which `level` begins. Level 1 starts from zero.
pub fn level_start(level: u32) -> u64 {
    if level <= 1 {
        0
    } else {
        level_threshold(level - 1)
    }
}

/// The entry with the highest threshold not above `level`.
pub fn rank_for_level(ranks: &[RankEntry], level: u32) -> Option<&RankEntry> {
    ranks.iter().rev().find(|r| r.level <= level)
}

/// Register one click.
pub fn apply_click(state: &mut ProgressState, config: &ProgressConfig) -> ClickOutcome {
    let mut outcome = ClickOutcome::default();

    state.score = state.score.saturating_add(1);

    // One check per click, not a loop: a score far past several thresholds
    // gains a single level here.
    if state.score >= level_threshold(state.level) {
        state.level = state.level.saturating_add(1);
        outcome.leveled_up = true;
    }

    if let Some(rank) = rank_for_level(config.ranks, state.level) {
        if rank.title != state.rank {
            state.rank = rank.title.to_string();
            outcome.new_rank = Some(state.rank.clone());
        }
    }

    for reward in config.rewards {
        if reward.level <= state.level && !state.has_reward(reward.id) {
            state.unlocked_rewards.push(reward.id.to_string());
            outcome.unlocked.push(reward.id.to_string());
        }
    }

    if state.score > state.high_score {
        state.high_score = state.score;
        outcome.new_high_score = true;
    }

    outcome
}

/// Fraction of the current level completed, clamped to [0, 1].
pub fn progress_fraction(state: &ProgressState) -> f64 {
    let start = level_start(state.level);
    let end = level_threshold(state.level);
    if end <= start {
        return 1.0;
    }
    let done = state.score as f64 - start as f64;
    (done / (end - start) as f64).clamp(0.0, 1.0)
}

/// Snapshot for renderers.
pub fn view(state: &ProgressState, config: &ProgressConfig) -> ProgressView {
    ProgressView {
        score: state.score,
        level: state.level,
        rank: state.rank.clone(),
        high_score: state.high_score,
        next_threshold: level_threshold(state.level),
        progress: progress_fraction(state),
        rewards: config
            .rewards
            .iter()
            .map(|entry| RewardStatus {
                entry: *entry,
                unlocked: state.has_reward(entry.id),
            })
            .collect(),
    }
}
