use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::{
    keyboard::{KeyboardWidget, KEYBOARD_HEIGHT},
    legend, render_hud, render_reading_surface, wrap_glyphs, Glyph, HORIZONTAL_MARGIN,
    VERTICAL_MARGIN,
};
use crate::app::{App, View};

/// A UI Screen boundary: responsible for rendering one view
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Landing view: the keyboard alone, lighting up whatever key is pressed
pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(KEYBOARD_HEIGHT),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "typeglow",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "each colour is a finger. press any key to see where it lives.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center);
        title.render(chunks[0], buf);

        KeyboardWidget::new(&app.layout)
            .glow(app.home_glow.as_deref())
            .finger_colors(app.config.show_finger_colors)
            .render(chunks[1], buf);

        legend("(F2) compose / (F3) practice / (esc)ape").render(chunks[4], buf);
    }
}

/// Draft editor with the live word counter
pub struct ComposeScreen;

impl Screen for ComposeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Paste or type your text");
        let inner = block.inner(chunks[0]);
        block.render(chunks[0], buf);

        let text_style = Style::default();
        let mut glyphs: Vec<Glyph> = app
            .draft
            .text()
            .chars()
            .map(|c| Glyph {
                text: match c {
                    '\n' => String::new(),
                    '\t' => "    ".to_string(),
                    c => c.to_string(),
                },
                style: text_style,
                line_break: c == '\n',
            })
            .collect();
        let caret = glyphs.len();
        glyphs.push(Glyph {
            text: "▏".to_string(),
            style: Style::default().add_modifier(Modifier::SLOW_BLINK),
            line_break: false,
        });

        let (rows, caret_row) = wrap_glyphs(&glyphs, inner.width as usize, caret);
        let height = inner.height as usize;
        let offset = (caret_row + 1).saturating_sub(height);
        let visible: Vec<Line> = rows.into_iter().skip(offset).take(height).collect();
        Paragraph::new(visible).render(inner, buf);

        Paragraph::new(Span::styled(
            app.draft.counter_label(),
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);

        legend("(ctrl+l) load & practice / (F1) home / (esc) back").render(chunks[2], buf);
    }
}

/// Reading surface, live figures and the keyboard pointing at the next key
pub struct PracticeScreen;

impl Screen for PracticeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let keyboard_height = if app.config.show_keyboard {
            KEYBOARD_HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(keyboard_height),
                Constraint::Length(1),
            ])
            .split(area);

        let Some(session) = app.practice.session() else {
            Paragraph::new("No text loaded. Press F2 to compose some.")
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
            return;
        };

        render_hud(app.practice.metrics(), chunks[0], buf);
        render_reading_surface(session, chunks[1], buf);

        if app.config.show_keyboard {
            let next = app.practice.next_key();
            KeyboardWidget::new(&app.layout)
                .glow(next.as_deref())
                .finger_colors(app.config.show_finger_colors)
                .render(chunks[2], buf);
        }

        legend("(ctrl+s) start / (ctrl+r) reset / (ctrl+l) reload / (esc) compose")
            .render(chunks[3], buf);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Home => Box::new(HomeScreen),
        View::Compose => Box::new(ComposeScreen),
        View::Practice => Box::new(PracticeScreen),
    }
}
