//! Compiled-in rank and reward tables, validated once at start-up.

/// localStorage key holding the progress blob.
pub const STORAGE_KEY: &str = "buttonGameProgress";

/// One row of the rank table: the title held from `level` onwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankEntry {
    pub level: u32,
    pub title: &'static str,
}

/// A cosmetic unlock granted once the player reaches `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardEntry {
    pub level: u32,
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

pub const RANKS: &[RankEntry] = &[
    RankEntry { level: 1, title: "Novice" },
    RankEntry { level: 5, title: "Clicker" },
    RankEntry { level: 10, title: "Button Masher" },
    RankEntry { level: 20, title: "Speed Demon" },
    RankEntry { level: 50, title: "Grandmaster" },
    RankEntry { level: 100, title: "Click God" },
];

pub const REWARDS: &[RewardEntry] = &[
    RewardEntry { level: 2, id: "reward_colors", title: "New Colors", icon: "🎨" },
    RewardEntry { level: 5, id: "reward_flame", title: "Flame Effect", icon: "🔥" },
    RewardEntry { level: 10, id: "reward_lightning", title: "Lightning Mode", icon: "⚡" },
    RewardEntry { level: 25, id: "reward_crown", title: "Crown Badge", icon: "👑" },
    RewardEntry { level: 50, id: "reward_rocket", title: "Rocket Boost", icon: "🚀" },
];

/// A table that cannot drive the progression rules.
///
/// The tables are constants, so any of these is a programming error surfaced at start-up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("rank table is empty")]
    EmptyRankTable,

    #[error("first rank must start at level 1, found level {0}")]
    NoStartingRank(u32),

    #[error("rank levels must be strictly increasing: {previous} followed by {next}")]
    RankOrder { previous: u32, next: u32 },

    #[error("reward `{0}` is unlocked at level 0")]
    RewardAtLevelZero(String),

    #[error("reward id `{0}` is empty or declared twice")]
    DuplicateReward(String),

    #[error("storage key is empty")]
    EmptyStorageKey,
}

/// Validated progression tables plus the persistence key.
#[derive(Clone, Copy, Debug)]
pub struct ProgressConfig {
    pub storage_key: &'static str,
    pub ranks: &'static [RankEntry],
    pub rewards: &'static [RewardEntry],
}

impl ProgressConfig {
    pub fn new(
        storage_key: &'static str,
        ranks: &'static [RankEntry],
        rewards: &'static [RewardEntry],
    ) -> Result<Self, ConfigError> {
        if storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        let first = ranks.first().ok_or(ConfigError::EmptyRankTable)?;
        if first.level != 1 {
            return Err(ConfigError::NoStartingRank(first.level));
        }
        for pair in ranks.windows(2) {
            if pair[1].level <= pair[0].level {
                return Err(ConfigError::RankOrder {
                    previous: pair[0].level,
                    next: pair[1].level,
                });
            }
        }

        for (i, reward) in rewards.iter().enumerate() {
            if reward.level == 0 {
                return Err(ConfigError::RewardAtLevelZero(reward.id.to_string()));
            }
            let seen_before = rewards[..i].iter().any(|r| r.id == reward.id);
            if reward.id.is_empty() || seen_before {
                return Err(ConfigError::DuplicateReward(reward.id.to_string()));
            }
        }

        Ok(Self {
            storage_key,
            ranks,
            rewards,
        })
    }

    /// The tables the game ships with.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(STORAGE_KEY, RANKS, REWARDS)
    }

    /// Rank held by a fresh player.
    pub fn default_rank(&self) -> &'static str {
        // `new` rejects an empty table
        self.ranks[0].title
    }
}
