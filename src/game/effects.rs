//! Short-lived visual feedback: floating "+1" text, the level-up flash and the notice log.
//!
//! Nothing here feeds back into progress.

use super::state::{ClickOutcome, ProgressView};

/// Oldest particles are dropped past this many.
pub const PARTICLE_CAP: usize = 20;
pub const NOTICE_CAP: usize = 6;

/// About one second at 10 ticks/sec.
const FLOAT_TICKS: u32 = 10;
const FLASH_TICKS: u32 = 3;
/// Rows a particle climbs over its lifetime.
const RISE_ROWS: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingText {
    pub text: String,
    /// Cell that was clicked; `None` for keyboard clicks (drawn at the button center).
    pub at: Option<(u16, u16)>,
    pub col_offset: i16,
    pub life: u32,
    pub max_life: u32,
}

impl FloatingText {
    /// Rows climbed so far.
    pub fn rise(&self) -> u16 {
        let elapsed = self.max_life.saturating_sub(self.life);
        (elapsed * RISE_ROWS / self.max_life.max(1)) as u16
    }

    /// Remaining life as a fraction, for fading.
    pub fn remaining(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub important: bool,
}

pub struct Effects {
    pub particles: Vec<FloatingText>,
    /// Ticks left on the level-up flash.
    pub flash: u32,
    pub notices: Vec<Notice>,
    seed: u32,
}

impl Effects {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            flash: 0,
            notices: Vec::new(),
            seed: 0x2545_f491,
        }
    }

    /// Spawn feedback for one click. `view` is the progress before the click; only its
    /// reward table is read.
    pub fn click(&mut self, at: Option<(u16, u16)>, outcome: &ClickOutcome, view: Option<&ProgressView>) {
        let rocket = view.map_or(false, |v| v.has_reward("reward_rocket"));
        let col_offset = if at.is_some() {
            0
        } else {
            (self.next_random() % 7) as i16 - 3
        };
        self.particles.push(FloatingText {
            text: if rocket { "+1 🚀".into() } else { "+1".into() },
            at,
            col_offset,
            life: FLOAT_TICKS,
            max_life: FLOAT_TICKS,
        });
        if self.particles.len() > PARTICLE_CAP {
            self.particles.remove(0);
        }

        if outcome.leveled_up {
            self.flash = FLASH_TICKS;
        }
        if let Some(rank) = &outcome.new_rank {
            self.notify(format!("★ New rank: {rank}"), true);
        }
        for id in &outcome.unlocked {
            let label = view
                .and_then(|v| v.rewards.iter().find(|r| r.entry.id == id.as_str()))
                .map(|r| format!("{} {}", r.entry.icon, r.entry.title))
                .unwrap_or_else(|| id.clone());
            self.notify(format!("Unlocked {label}"), true);
        }
    }

    pub fn level_reached(&mut self, level: u32) {
        self.notify(format!("Level {level}!"), false);
    }

    pub fn notify(&mut self, text: String, important: bool) {
        self.notices.push(Notice { text, important });
        if self.notices.len() > NOTICE_CAP {
            self.notices.remove(0);
        }
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        for p in &mut self.particles {
            p.life = p.life.saturating_sub(delta_ticks);
        }
        self.particles.retain(|p| p.life > 0);
        self.flash = self.flash.saturating_sub(delta_ticks);
    }

    /// xorshift; only used to scatter keyboard-click particles.
    fn next_random(&mut self) -> u32 {
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = x;
        x
    }
}
