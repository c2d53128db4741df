//! Button Game: click the big button, level up, climb the ranks, unlock cosmetics.

pub mod actions;
pub mod config;
pub mod effects;
pub mod engine;
pub mod logic;
pub mod render;
pub mod save;
pub mod session;
pub mod state;
pub mod store;

#[cfg(test)]
mod simulator;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use config::ProgressConfig;
use render::TerminalView;
use session::{ClickEvent, Session};
use store::Store;

pub struct ButtonGame<S: Store> {
    session: Session<S, TerminalView>,
    /// "[R] Reset" was pressed and waits for confirmation.
    reset_armed: bool,
}

impl<S: Store> ButtonGame<S> {
    pub fn new(config: ProgressConfig, store: S) -> Self {
        Self {
            session: Session::start(config, store, TerminalView::new()),
            reset_armed: false,
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let (action, at) = match *event {
            InputEvent::Key(key) => match key_action(key, self.reset_armed) {
                Some(action) => (action, None),
                None => return false,
            },
            InputEvent::Click { action, col, row } => (action, Some((col, row))),
        };

        match action {
            CLICK_BUTTON => {
                self.reset_armed = false;
                self.session.handle_click(ClickEvent { at });
                true
            }
            ARM_RESET => {
                self.reset_armed = true;
                true
            }
            CONFIRM_RESET if self.reset_armed => {
                self.reset_armed = false;
                // a failed save was already reported to the renderer
                let _ = self.session.reset();
                true
            }
            CANCEL_RESET if self.reset_armed => {
                self.reset_armed = false;
                true
            }
            _ => false,
        }
    }

    /// Advance visual effects by `delta_ticks`.
    pub fn tick(&mut self, delta_ticks: u32) {
        self.session.renderer_mut().tick(delta_ticks);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        self.session.renderer().draw(f, area, cs, self.reset_armed);
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<S, TerminalView> {
        &self.session
    }
}

fn key_action(key: char, reset_armed: bool) -> Option<u16> {
    match key.to_ascii_lowercase() {
        ' ' | 'c' => Some(CLICK_BUTTON),
        'r' => Some(ARM_RESET),
        'y' if reset_armed => Some(CONFIRM_RESET),
        'n' if reset_armed => Some(CANCEL_RESET),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn game() -> ButtonGame<MemoryStore> {
        ButtonGame::new(ProgressConfig::builtin().unwrap(), MemoryStore::new())
    }

    fn score(game: &ButtonGame<MemoryStore>) -> u64 {
        game.session().engine().state().score
    }

    #[test]
    fn space_and_tap_both_click() {
        let mut g = game();
        assert!(g.handle_input(&InputEvent::Key(' ')));
        assert!(g.handle_input(&InputEvent::Key('C')));
        assert!(g.handle_input(&InputEvent::Click { action: CLICK_BUTTON, col: 3, row: 9 }));
        assert_eq!(score(&g), 3);
        let particles = &g.session().renderer().effects().particles;
        assert_eq!(particles.len(), 3);
        assert_eq!(particles[2].at, Some((3, 9)));
    }

    #[test]
    fn unknown_key_not_consumed() {
        let mut g = game();
        assert!(!g.handle_input(&InputEvent::Key('x')));
        assert!(!g.handle_input(&InputEvent::Click { action: 999, col: 0, row: 0 }));
        assert_eq!(score(&g), 0);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut g = game();
        for _ in 0..12 {
            g.handle_input(&InputEvent::Key(' '));
        }
        // 'y' alone does nothing
        assert!(!g.handle_input(&InputEvent::Key('y')));
        assert_eq!(score(&g), 12);

        assert!(g.handle_input(&InputEvent::Key('r')));
        assert!(g.handle_input(&InputEvent::Key('y')));
        let state = g.session().engine().state();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_score, 12);
    }

    #[test]
    fn reset_can_be_cancelled() {
        let mut g = game();
        g.handle_input(&InputEvent::Key(' '));
        g.handle_input(&InputEvent::Key('r'));
        assert!(g.handle_input(&InputEvent::Key('n')));
        assert!(!g.handle_input(&InputEvent::Key('y')));
        assert_eq!(score(&g), 1);
    }

    #[test]
    fn clicking_disarms_reset() {
        let mut g = game();
        g.handle_input(&InputEvent::Click { action: ARM_RESET, col: 50, row: 28 });
        g.handle_input(&InputEvent::Click { action: CLICK_BUTTON, col: 10, row: 10 });
        assert!(!g.handle_input(&InputEvent::Click { action: CONFIRM_RESET, col: 10, row: 28 }));
        assert_eq!(score(&g), 1);
    }

    #[test]
    fn tick_ages_effects() {
        let mut g = game();
        g.handle_input(&InputEvent::Key(' '));
        g.tick(100);
        assert!(g.session().renderer().effects().particles.is_empty());
    }
}
