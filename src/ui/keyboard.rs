use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::layout::{Finger, KeyCap, KeyWidth, KeyboardLayout};

pub const GLOW_COLOR: Color = Color::White;
/// Rows plus the surrounding border.
pub const KEYBOARD_HEIGHT: u16 = 7;

pub fn finger_color(finger: Finger) -> Color {
    match finger {
        Finger::LeftPinky => Color::Red,
        Finger::LeftRing => Color::Yellow,
        Finger::LeftMiddle => Color::Green,
        Finger::LeftIndex => Color::Cyan,
        Finger::RightIndex => Color::Blue,
        Finger::RightMiddle => Color::Magenta,
        Finger::RightRing => Color::LightGreen,
        Finger::RightPinky => Color::LightRed,
        Finger::Thumb => Color::Gray,
    }
}

fn cap_width(width: KeyWidth) -> usize {
    match width {
        KeyWidth::Normal => 3,
        KeyWidth::Wide => 9,
        KeyWidth::Space => 31,
    }
}

/// On-screen keyboard. At most one key glows: the first one named `glow`.
pub struct KeyboardWidget<'a> {
    layout: &'a KeyboardLayout,
    glow: Option<&'a str>,
    finger_colors: bool,
}

impl<'a> KeyboardWidget<'a> {
    pub fn new(layout: &'a KeyboardLayout) -> Self {
        Self {
            layout,
            glow: None,
            finger_colors: true,
        }
    }

    pub fn glow(mut self, key: Option<&'a str>) -> Self {
        self.glow = key;
        self
    }

    pub fn finger_colors(mut self, enabled: bool) -> Self {
        self.finger_colors = enabled;
        self
    }

    fn cap_style(&self, cap: &KeyCap, glowing: bool) -> Style {
        if glowing {
            Style::default()
                .fg(Color::Black)
                .bg(GLOW_COLOR)
                .add_modifier(Modifier::BOLD)
        } else if self.finger_colors {
            Style::default().fg(Color::Black).bg(finger_color(cap.finger))
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        }
    }
}

impl Widget for KeyboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let glow_at = self.glow.and_then(|name| self.layout.position(name));

        let lines: Vec<Line> = self
            .layout
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let mut spans = Vec::with_capacity(row.len() * 2);
                for (c, cap) in row.iter().enumerate() {
                    if c > 0 {
                        spans.push(Span::raw(" "));
                    }
                    let width = cap_width(cap.width).max(cap.label.len() + 2);
                    spans.push(Span::styled(
                        format!("{:^width$}", cap.label),
                        self.cap_style(cap, glow_at == Some((r, c))),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Keyboard"))
            .render(area, buf);
    }
}
