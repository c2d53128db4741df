mod game;
mod input;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use game::config::ProgressConfig;
use game::ButtonGame;
use input::{pixel_to_cell, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::{EffectClock, TICKS_PER_SEC};

#[cfg(target_arch = "wasm32")]
type PlatformStore = game::store::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
type PlatformStore = game::store::MemoryStore;

#[cfg(target_arch = "wasm32")]
fn open_store() -> PlatformStore {
    game::store::LocalStorage::open()
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> PlatformStore {
    game::store::MemoryStore::new()
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let cell = pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.cols,
        cs.rows,
    );
    log::debug!("click: pixel=({mouse_x},{mouse_y}) cell={cell:?}");
    cell
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);

    let config = ProgressConfig::builtin().map_err(io::Error::other)?;
    let game = Rc::new(RefCell::new(ButtonGame::new(config, open_store())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(EffectClock::new(TICKS_PER_SEC)));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action) = action {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click { action, col, row });
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Key(' '),
                KeyCode::Esc => InputEvent::Key('n'),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web(move |f| {
        let ticks = clock.borrow_mut().update(now_ms());
        let mut game = game.borrow_mut();
        if ticks > 0 {
            game.tick(ticks);
        }

        let area = f.area();
        let mut cs = click_state.borrow_mut();
        cs.begin_frame(area.width, area.height);
        game.render(f, area, &mut cs);
    });

    Ok(())
}
