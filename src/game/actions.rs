//! Semantic action IDs for Button Game click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

pub const CLICK_BUTTON: u16 = 0;

// ── Reset (two-step) ────────────────────────────────────────────
pub const ARM_RESET: u16 = 10;
pub const CONFIRM_RESET: u16 = 11;
pub const CANCEL_RESET: u16 = 12;
