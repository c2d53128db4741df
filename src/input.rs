//! Input events and click hit-testing.
//!
//! Render code registers a target for every clickable region each frame; the mouse handler
//! converts the pointer position to a terminal cell and asks which target it landed on.

use ratatui::layout::Rect;

/// Keyboard and pointer input, normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target. `col`/`row` is the cell that was hit.
    Click { action: u16, col: u16, row: u16 },
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action: u16,
}

/// Click targets of the last rendered frame plus the terminal size they were laid out for.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub cols: u16,
    pub rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            cols: 0,
            rows: 0,
        }
    }

    /// Start a new frame of the given size.
    pub fn begin_frame(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.targets.clear();
    }

    pub fn add_target(&mut self, rect: Rect, action: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action });
        }
    }

    /// Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.right() && row >= r.y && row < r.bottom()
            })
            .map(|t| t.action)
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pointer position relative to the grid container into a cell.
///
/// Returns `None` outside the grid or when the grid has no size yet.
pub fn pixel_to_cell(
    x: f64,
    y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / (grid_width / cols as f64)) as u16;
    let row = (y / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}
