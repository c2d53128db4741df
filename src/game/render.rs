//! Button Game rendering: stats, the big button with click particles, level gauge,
//! reward shelf, notice log and help bar.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};

use super::actions::{ARM_RESET, CANCEL_RESET, CLICK_BUTTON, CONFIRM_RESET};
use super::effects::{Effects, FloatingText};
use super::session::{ClickEvent, Renderer};
use super::state::{ClickOutcome, ProgressView};
use super::store::StoreError;

/// Palette cycled by the "New Colors" reward.
const BUTTON_COLORS: &[Color] = &[Color::Cyan, Color::Magenta, Color::Green, Color::LightBlue];

/// Terminal-cell renderer. Holds the last presented view plus effect state.
pub struct TerminalView {
    view: Option<ProgressView>,
    effects: Effects,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            view: None,
            effects: Effects::new(),
        }
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        self.effects.tick(delta_ticks);
    }

    #[cfg(test)]
    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, cs: &mut ClickState, reset_armed: bool) {
        let Some(view) = &self.view else {
            return;
        };
        let narrow = is_narrow_layout(area.width);

        let stats_height = if narrow { 4 } else { 3 };
        let shelf_height = if narrow { 3 } else { 7 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(stats_height),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(shelf_height),
                Constraint::Length(if narrow { 4 } else { 0 }),
                Constraint::Length(3),
            ])
            .split(area);

        render_title(f, chunks[0]);
        render_stats(view, f, chunks[1], narrow);
        self.render_button(view, f, chunks[2], cs);
        render_gauge(view, f, chunks[3]);
        if narrow {
            render_reward_strip(view, f, chunks[4]);
            render_notices(&self.effects, f, chunks[5]);
        } else {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[4]);
            render_reward_shelf(view, f, halves[0]);
            render_notices(&self.effects, f, halves[1]);
        }
        render_help(f, chunks[6], cs, reset_armed);
    }

    fn render_button(&self, view: &ProgressView, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let flashing = self.effects.flash > 0;
        let color = button_color(view);
        let mut border = Style::default().fg(color);
        let mut label = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if flashing {
            border = border.add_modifier(Modifier::BOLD);
            label = label.add_modifier(Modifier::REVERSED);
        }

        let text = if flashing { "  LEVEL UP!  " } else { "  CLICK ME!  " };
        let pad = area.height.saturating_sub(3) / 2;
        let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
        lines.push(Line::from(Span::styled(text, label)));

        let button = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(" Big Button "),
            );
        f.render_widget(button, area);
        cs.add_target(area, CLICK_BUTTON);

        for particle in &self.effects.particles {
            render_particle(particle, f, area);
        }
    }
}

impl Renderer for TerminalView {
    fn present(&mut self, view: &ProgressView) {
        let prev_level = self.view.as_ref().map(|v| v.level);
        if let Some(prev) = prev_level {
            if view.level > prev {
                self.effects.level_reached(view.level);
            }
        }
        self.view = Some(view.clone());
    }

    fn on_click(&mut self, event: &ClickEvent, outcome: &ClickOutcome) {
        self.effects.click(event.at, outcome, self.view.as_ref());
    }

    fn on_warning(&mut self, warning: &StoreError) {
        self.effects.notify(format!("⚠ Progress not saved: {warning}"), true);
    }
}

/// Highest unlocked cosmetic decides the button color.
fn button_color(view: &ProgressView) -> Color {
    if view.has_reward("reward_lightning") {
        Color::Yellow
    } else if view.has_reward("reward_flame") {
        Color::LightRed
    } else if view.has_reward("reward_colors") {
        BUTTON_COLORS[(view.score % BUTTON_COLORS.len() as u64) as usize]
    } else {
        Color::White
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "★ Button Game ★",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(title, area);
}

fn stat<'a>(name: &'a str, value: String, color: Color) -> [Span<'a>; 2] {
    [
        Span::styled(format!("{name} "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]
}

fn render_stats(view: &ProgressView, f: &mut Frame, area: Rect, narrow: bool) {
    let rank = if view.has_reward("reward_crown") {
        format!("👑 {}", view.rank)
    } else {
        view.rank.clone()
    };
    let sep = || Span::styled("  │  ", Style::default().fg(Color::DarkGray));

    let [score_name, score] = stat("Score", view.score.to_string(), Color::White);
    let [level_name, level] = stat("Level", view.level.to_string(), Color::Green);
    let [rank_name, rank] = stat("Rank", rank, Color::Magenta);
    let [best_name, best] = stat("Best", view.high_score.to_string(), Color::Yellow);

    let lines = if narrow {
        vec![
            Line::from(vec![score_name, score, sep(), best_name, best]),
            Line::from(vec![level_name, level, sep(), rank_name, rank]),
        ]
    } else {
        vec![Line::from(vec![
            score_name, score, sep(), level_name, level, sep(), rank_name, rank, sep(), best_name,
            best,
        ])]
    };

    let stats = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(stats, area);
}

fn render_gauge(view: &ProgressView, f: &mut Frame, area: Rect) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Level progress "),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(view.progress.clamp(0.0, 1.0))
        .label(format!("Next Level: {}", view.next_threshold));
    f.render_widget(gauge, area);
}

/// One reward per row: icon and title, or padlock and the level needed.
fn render_reward_shelf(view: &ProgressView, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = view
        .rewards
        .iter()
        .map(|r| {
            let style = if r.unlocked {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::raw(format!(" {} ", r.glyph())),
                Span::styled(r.caption(), style),
            ])
        })
        .collect();
    let shelf = Paragraph::new(lines).block(rewards_block(view));
    f.render_widget(shelf, area);
}

/// Narrow layout: glyphs only.
fn render_reward_strip(view: &ProgressView, f: &mut Frame, area: Rect) {
    let spans: Vec<Span> = view
        .rewards
        .iter()
        .map(|r| Span::raw(format!(" {} ", r.glyph())))
        .collect();
    let strip = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(rewards_block(view));
    f.render_widget(strip, area);
}

fn rewards_block(view: &ProgressView) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Rewards {}/{} ", view.unlocked_count(), view.rewards.len()))
}

fn render_notices(effects: &Effects, f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let visible = area.height.saturating_sub(2) as usize;
    let start = effects.notices.len().saturating_sub(visible);
    let lines: Vec<Line> = effects.notices[start..]
        .iter()
        .map(|n| {
            let style = if n.important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(n.text.as_str(), style))
        })
        .collect();
    let log = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Log "),
    );
    f.render_widget(log, area);
}

/// Two halves, each its own click target.
fn render_help(f: &mut Frame, area: Rect, cs: &mut ClickState, reset_armed: bool) {
    let (left, right, left_action, right_action) = if reset_armed {
        ("[Y] Reset progress", "[N] Cancel", CONFIRM_RESET, CANCEL_RESET)
    } else {
        ("[Space] Click", "[R] Reset", CLICK_BUTTON, ARM_RESET)
    };
    let key_style = if reset_armed {
        Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let help = Paragraph::new(Line::from(vec![
        Span::styled(left, key_style),
        Span::raw("     "),
        Span::styled(right, key_style),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(help, area);

    let (a, b) = split_halves(area);
    cs.add_target(a, left_action);
    cs.add_target(b, right_action);
}

fn split_halves(area: Rect) -> (Rect, Rect) {
    let left = area.width / 2;
    (
        Rect::new(area.x, area.y, left, area.height),
        Rect::new(area.x + left, area.y, area.width - left, area.height),
    )
}

/// Where a particle is drawn, or `None` once it has drifted out of the button.
fn particle_position(particle: &FloatingText, area: Rect) -> Option<(u16, u16)> {
    let (col, row) = particle
        .at
        .unwrap_or((area.x + area.width / 2, area.y + area.height / 2));
    let x = col as i32 + particle.col_offset as i32;
    let y = row as i32 - particle.rise() as i32;
    let inside_x = x > area.x as i32 && x < area.right() as i32 - 1;
    let inside_y = y > area.y as i32 && y < area.bottom() as i32 - 1;
    if inside_x && inside_y {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn render_particle(particle: &FloatingText, f: &mut Frame, area: Rect) {
    let Some((x, y)) = particle_position(particle, area) else {
        return;
    };
    let remaining = particle.remaining();
    let style = if remaining > 0.66 {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else if remaining > 0.33 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    // Clip to the inside of the button border.
    let width = (Line::from(particle.text.as_str()).width() as u16).min(area.right() - 1 - x);
    let text = Paragraph::new(Span::styled(particle.text.as_str(), style));
    f.render_widget(text, Rect::new(x, y, width, 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::ProgressConfig;
    use crate::game::logic;
    use crate::game::state::ProgressState;

    fn view(score: u64, level: u32, rewards: &[&str]) -> ProgressView {
        let config = ProgressConfig::builtin().unwrap();
        let mut state = ProgressState::new("Novice");
        state.score = score;
        state.high_score = score;
        state.level = level;
        state.unlocked_rewards = rewards.iter().map(|r| r.to_string()).collect();
        logic::view(&state, &config)
    }

    fn particle(at: Option<(u16, u16)>, life: u32) -> FloatingText {
        FloatingText {
            text: "+1".into(),
            at,
            col_offset: 0,
            life,
            max_life: 10,
        }
    }

    #[test]
    fn button_color_follows_best_cosmetic() {
        assert_eq!(button_color(&view(0, 1, &[])), Color::White);
        assert_eq!(button_color(&view(1, 2, &["reward_colors"])), Color::Magenta);
        assert_eq!(
            button_color(&view(40, 5, &["reward_colors", "reward_flame"])),
            Color::LightRed
        );
        assert_eq!(
            button_color(&view(300, 10, &["reward_colors", "reward_flame", "reward_lightning"])),
            Color::Yellow
        );
    }

    #[test]
    fn particle_at_click_cell_rises() {
        let area = Rect::new(0, 6, 40, 10);
        assert_eq!(particle_position(&particle(Some((10, 12)), 10), area), Some((10, 12)));
        assert_eq!(particle_position(&particle(Some((10, 12)), 4), area), Some((10, 11)));
    }

    #[test]
    fn keyboard_particle_starts_at_center() {
        let area = Rect::new(0, 6, 40, 10);
        assert_eq!(particle_position(&particle(None, 10), area), Some((20, 11)));
    }

    #[test]
    fn particle_on_border_hidden() {
        let area = Rect::new(0, 6, 40, 10);
        assert_eq!(particle_position(&particle(Some((0, 10)), 10), area), None);
        assert_eq!(particle_position(&particle(Some((10, 7)), 1), area), None);
    }

    #[test]
    fn help_halves_cover_bar() {
        let (a, b) = split_halves(Rect::new(0, 27, 81, 3));
        assert_eq!(a, Rect::new(0, 27, 40, 3));
        assert_eq!(b, Rect::new(40, 27, 41, 3));
    }

    #[test]
    fn present_logs_level_changes() {
        let mut tv = TerminalView::new();
        tv.present(&view(9, 1, &[]));
        tv.present(&view(10, 2, &["reward_colors"]));
        tv.present(&view(11, 2, &["reward_colors"]));
        let notices: Vec<&str> = tv.effects().notices.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(notices, vec!["Level 2!"]);
    }

    #[test]
    fn warning_becomes_notice() {
        let mut tv = TerminalView::new();
        tv.on_warning(&StoreError::Unavailable);
        assert_eq!(tv.effects().notices.len(), 1);
        assert!(tv.effects().notices[0].important);
    }
}
