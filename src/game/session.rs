//! One play session: engine, store and renderer wired in the
//! click -> persist -> render order.

use super::config::ProgressConfig;
use super::engine::ProgressEngine;
use super::state::{ClickOutcome, ProgressView};
use super::store::{Store, StoreError};

/// A click on the big button. The cell position only feeds visual effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub at: Option<(u16, u16)>,
}

/// Anything that displays progress.
pub trait Renderer {
    /// Called with the full progress after every state change.
    fn present(&mut self, view: &ProgressView);

    /// Per-click feedback, called before `present`.
    fn on_click(&mut self, _event: &ClickEvent, _outcome: &ClickOutcome) {}

    /// A save failed; progress is still held in memory.
    fn on_warning(&mut self, _warning: &StoreError) {}
}

#[derive(Debug)]
pub struct ClickReport {
    pub outcome: ClickOutcome,
    /// Set when the progress could not be saved.
    pub warning: Option<StoreError>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub clicks: u64,
    pub failed_saves: u64,
}

pub struct Session<S: Store, R: Renderer> {
    engine: ProgressEngine,
    store: S,
    renderer: R,
}

impl<S: Store, R: Renderer> Session<S, R> {
    /// Read the save once, then show the starting state.
    pub fn start(config: ProgressConfig, store: S, mut renderer: R) -> Self {
        let persisted = store.get(config.storage_key);
        let engine = ProgressEngine::initialize(config, persisted.as_deref());
        renderer.present(&engine.view());
        Self {
            engine,
            store,
            renderer,
        }
    }

    pub fn handle_click(&mut self, event: ClickEvent) -> ClickReport {
        let outcome = self.engine.apply_click();
        let warning = self.persist();
        self.renderer.on_click(&event, &outcome);
        self.renderer.present(&self.engine.view());
        ClickReport { outcome, warning }
    }

    /// Drain an event source. The source may be unbounded; this returns only when it ends.
    #[allow(dead_code)] // the browser build is callback-driven
    pub fn run<I>(&mut self, events: I) -> RunSummary
    where
        I: IntoIterator<Item = ClickEvent>,
    {
        let mut summary = RunSummary::default();
        for event in events {
            let report = self.handle_click(event);
            summary.clicks += 1;
            if report.warning.is_some() {
                summary.failed_saves += 1;
            }
        }
        summary
    }

    /// Start over from level 1. The high score survives.
    pub fn reset(&mut self) -> Option<StoreError> {
        self.engine.reset();
        let warning = self.persist();
        self.renderer.present(&self.engine.view());
        warning
    }

    #[cfg(test)]
    pub fn engine(&self) -> &ProgressEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Option<StoreError> {
        let key = self.engine.config().storage_key;
        let result = self
            .engine
            .serialize()
            .and_then(|blob| self.store.set(key, &blob));
        match result {
            Ok(()) => None,
            Err(e) => {
                log::warn!("progress not saved: {e}");
                self.renderer.on_warning(&e);
                Some(e)
            }
        }
    }
}
