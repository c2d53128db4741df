//! Button Game progress state and the snapshot handed to renderers.

use super::config::RewardEntry;

/// Everything that defines a player's run. Persisted after every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressState {
    pub score: u64,
    /// Always >= 1.
    pub level: u32,
    pub rank: String,
    /// Invariant: `high_score >= score`.
    pub high_score: u64,
    /// Reward ids in unlock order, no duplicates.
    pub unlocked_rewards: Vec<String>,
}

impl ProgressState {
    pub fn new(default_rank: &str) -> Self {
        Self {
            score: 0,
            level: 1,
            rank: default_rank.to_string(),
            high_score: 0,
            unlocked_rewards: Vec::new(),
        }
    }

    pub fn has_reward(&self, id: &str) -> bool {
        self.unlocked_rewards.iter().any(|r| r == id)
    }
}

/// What a single click changed. Used for notifications and effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub leveled_up: bool,
    /// Set when the rank title changed on this click.
    pub new_rank: Option<String>,
    /// Reward ids unlocked on this click, in table order.
    pub unlocked: Vec<String>,
    pub new_high_score: bool,
}

/// Unlock status of one reward table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardStatus {
    pub entry: RewardEntry,
    pub unlocked: bool,
}

impl RewardStatus {
    /// Icon when unlocked, padlock otherwise.
    pub fn glyph(&self) -> &'static str {
        if self.unlocked {
            self.entry.icon
        } else {
            "🔒"
        }
    }

    pub fn caption(&self) -> String {
        if self.unlocked {
            self.entry.title.to_string()
        } else {
            format!("Reach Level {}", self.entry.level)
        }
    }
}

/// Read-only snapshot of the progress, exposed after every state change.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    pub score: u64,
    pub level: u32,
    pub rank: String,
    pub high_score: u64,
    /// Score needed to complete the current level.
    pub next_threshold: u64,
    /// Fraction of the current level completed, in [0, 1].
    pub progress: f64,
    /// Every reward in table order.
    pub rewards: Vec<RewardStatus>,
}

impl ProgressView {
    pub fn has_reward(&self, id: &str) -> bool {
        self.rewards.iter().any(|r| r.unlocked && r.entry.id == id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.rewards.iter().filter(|r| r.unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_uses_defaults() {
        let state = ProgressState::new("Novice");
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.rank, "Novice");
        assert_eq!(state.high_score, 0);
        assert!(state.unlocked_rewards.is_empty());
    }

    #[test]
    fn reward_status_locked_caption() {
        let status = RewardStatus {
            entry: RewardEntry { level: 25, id: "reward_crown", title: "Crown Badge", icon: "👑" },
            unlocked: false,
        };
        assert_eq!(status.glyph(), "🔒");
        assert_eq!(status.caption(), "Reach Level 25");

        let status = RewardStatus { unlocked: true, ..status };
        assert_eq!(status.glyph(), "👑");
        assert_eq!(status.caption(), "Crown Badge");
    }
}
