//! Fixed-timestep clock for visual effects.
//!
//! `draw_web()` runs at the browser's frame rate. Effects age in whole ticks so their
//! lifetimes do not depend on how fast frames arrive.

pub const TICKS_PER_SEC: u32 = 10;

/// Longest frame gap credited at once, so a backgrounded tab does not fast-forward.
const MAX_FRAME_MS: f64 = 500.0;

pub struct EffectClock {
    ms_per_tick: f64,
    carry_ms: f64,
    last_ms: Option<f64>,
}

impl EffectClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            carry_ms: 0.0,
            last_ms: None,
        }
    }

    /// Feed the current timestamp; returns how many ticks elapsed since the last call.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_ms {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        self.carry_ms += delta;
        let ticks = (self.carry_ms / self.ms_per_tick) as u32;
        self.carry_ms -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}
