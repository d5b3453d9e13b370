pub mod keyboard;
pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Notice},
    metrics::Metrics,
    session::TypingSession,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.view).render(self, area, buf);

        if let Some(notice) = &self.notice {
            render_notice(notice, area, buf);
        }
    }
}

/// One displayed cell group of the reading surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub style: Style,
    pub line_break: bool,
}

/// Character-level wrap into rows of at most `width` columns. Returns the
/// rows and the row holding glyph number `mark` (the last row when `mark`
/// is past the end).
pub fn wrap_glyphs(glyphs: &[Glyph], width: usize, mark: usize) -> (Vec<Line<'static>>, usize) {
    let width = width.max(1);
    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    let mut mark_row = None;

    for (idx, glyph) in glyphs.iter().enumerate() {
        let w = glyph.text.width();
        if used + w > width && used > 0 {
            rows.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if idx == mark {
            mark_row = Some(rows.len());
        }
        if !glyph.text.is_empty() {
            current.push(Span::styled(glyph.text.clone(), glyph.style));
            used += w;
        }
        if glyph.line_break {
            rows.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(Line::from(current));
    }

    let last = rows.len() - 1;
    (rows, mark_row.unwrap_or(last).min(last))
}

/// Styled glyphs for the target text: typed characters green or red, the
/// cursor underlined, the rest dimmed.
pub fn reading_glyphs(session: &TypingSession) -> Vec<Glyph> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let ok_style = bold.fg(Color::Green);
    let bad_style = bold.fg(Color::Red);
    let cursor_style = bold.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
    let pending_style = bold.add_modifier(Modifier::DIM);

    let cursor = session.cursor();
    let flags = session.flags();

    session
        .text()
        .chars()
        .iter()
        .enumerate()
        .map(|(idx, &c)| {
            let typed = flags.get(idx).copied();
            let style = match typed {
                Some(true) => ok_style,
                Some(false) => bad_style,
                None if idx == cursor => cursor_style,
                None => pending_style,
            };
            let text = match (c, typed) {
                ('\n', Some(true)) | ('\n', None) if idx != cursor => String::new(),
                ('\n', _) => "⏎".to_string(),
                ('\t', _) => "⇥".to_string(),
                (' ', Some(false)) => "·".to_string(),
                (c, _) => c.to_string(),
            };
            Glyph {
                text,
                style,
                line_break: c == '\n',
            }
        })
        .collect()
}

pub fn render_reading_surface(session: &TypingSession, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title("Text");
    let inner = block.inner(area);
    block.render(area, buf);

    let glyphs = reading_glyphs(session);
    let (rows, cursor_row) = wrap_glyphs(&glyphs, inner.width as usize, session.cursor());
    let height = inner.height as usize;
    let offset = if cursor_row < height {
        0
    } else {
        cursor_row.saturating_sub(height / 2)
    };

    let visible: Vec<Line> = rows.into_iter().skip(offset).take(height).collect();
    Paragraph::new(visible).render(inner, buf);
}

pub fn hud_line(metrics: &Metrics) -> Line<'static> {
    let label = Style::default().add_modifier(Modifier::DIM);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let errors = if metrics.errors > 0 {
        value.fg(Color::Red)
    } else {
        value
    };

    let fields = [
        ("time ", format!("{}s", metrics.elapsed_seconds), value),
        ("wpm ", metrics.wpm.to_string(), value),
        ("accuracy ", format!("{}%", metrics.accuracy), value),
        ("errors ", metrics.errors.to_string(), errors),
    ];
    let groups = fields.into_iter().map(|(name, figure, style)| {
        vec![Span::styled(name, label), Span::styled(figure, style)]
    });

    Itertools::intersperse(groups, vec![Span::raw("   ")])
        .flatten()
        .collect_vec()
        .into()
}

pub fn render_hud(metrics: &Metrics, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    Paragraph::new(hud_line(metrics))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio((metrics.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", metrics.progress_percent))
        .render(chunks[1], buf);
}

fn render_notice(notice: &Notice, area: Rect, buf: &mut Buffer) {
    let message = notice.message();
    let height = (message.lines().count() as u16 + 4).min(area.height);
    let width = (area.width * 3 / 5).max(30).min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    Clear.render(popup, buf);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), bold)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press any key",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Notice"),
        )
        .render(popup, buf);
}

fn legend(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::config::Config;
    use crate::text_buffer::TextBuffer;
    use std::time::{Instant, SystemTime};

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn session(text: &str) -> TypingSession {
        let (buffer, _) = TextBuffer::load(text).unwrap();
        TypingSession::new(buffer)
    }

    fn plain(text: &str) -> Glyph {
        Glyph {
            text: text.to_string(),
            style: Style::default(),
            line_break: false,
        }
    }

    #[test]
    fn test_wrap_glyphs_breaks_at_width() {
        let glyphs: Vec<Glyph> = "abcdefg".chars().map(|c| plain(&c.to_string())).collect();
        let (rows, mark_row) = wrap_glyphs(&glyphs, 3, 4);
        assert_eq!(rows.len(), 3);
        assert_eq!(mark_row, 1);
    }

    #[test]
    fn test_wrap_glyphs_line_breaks() {
        let mut glyphs = vec![plain("a"), plain("")];
        glyphs[1].line_break = true;
        glyphs.push(plain("b"));
        let (rows, mark_row) = wrap_glyphs(&glyphs, 80, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(mark_row, 1);
    }

    #[test]
    fn test_wrap_glyphs_mark_past_end() {
        let glyphs = vec![plain("a"), plain("b")];
        let (rows, mark_row) = wrap_glyphs(&glyphs, 80, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(mark_row, 0);
        let (rows, mark_row) = wrap_glyphs(&[], 80, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(mark_row, 0);
    }

    #[test]
    fn test_reading_glyph_styles() {
        let mut s = session("ab c");
        s.record(true, SystemTime::now()).unwrap();
        s.record(false, SystemTime::now()).unwrap();
        s.record(false, SystemTime::now()).unwrap();

        let glyphs = reading_glyphs(&s);
        assert_eq!(glyphs[0].style.fg, Some(Color::Green));
        assert_eq!(glyphs[1].style.fg, Some(Color::Red));
        assert_eq!(glyphs[2].text, "·");
        assert!(glyphs[3].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_reading_glyph_newline_marker_at_cursor() {
        let mut s = session("a\nb");
        let glyphs = reading_glyphs(&s);
        assert_eq!(glyphs[1].text, "");
        assert!(glyphs[1].line_break);

        s.record(true, SystemTime::now()).unwrap();
        let glyphs = reading_glyphs(&s);
        assert_eq!(glyphs[1].text, "⏎");
    }

    #[test]
    fn test_hud_line_text() {
        let metrics = Metrics {
            elapsed_seconds: 12,
            words_typed: 3,
            wpm: 15,
            accuracy: 96,
            progress_percent: 40.0,
            errors: 2,
        };
        let text: String = hud_line(&metrics)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "time 12s   wpm 15   accuracy 96%   errors 2");
    }

    #[test]
    fn test_home_renders_keyboard() {
        let app = App::new(Config::default());
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(out.contains("typeglow"));
        assert!(out.contains("Backspace"));
    }

    #[test]
    fn test_compose_renders_counter() {
        let mut app = App::new(Config::default());
        app.view = View::Compose;
        app.draft.push_str("one two three");
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(out.contains("one two three"));
        assert!(out.contains("3 / 1000 words"));
    }

    #[test]
    fn test_practice_renders_text_and_hud() {
        let mut app = App::with_text(Config::default(), "hello world");
        app.practice
            .handle_key("h", SystemTime::now(), Instant::now());
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(out.contains("hello world"));
        assert!(out.contains("accuracy"));
        assert!(out.contains("100%"));
    }

    #[test]
    fn test_practice_without_text() {
        let mut app = App::new(Config::default());
        app.view = View::Practice;
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(out.contains("No text loaded"));
    }

    #[test]
    fn test_hidden_keyboard() {
        let config = Config {
            show_keyboard: false,
            ..Config::default()
        };
        let app = App::with_text(config, "hello");
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(!out.contains("Backspace"));
    }

    #[test]
    fn test_notice_overlay() {
        let mut app = App::new(Config::default());
        app.notice = Some(Notice::EmptyInput);
        let out = rendered(&app, Rect::new(0, 0, 100, 30));
        assert!(out.contains("Please paste or type some text"));
    }

    #[test]
    fn test_long_text_keeps_cursor_visible() {
        let text = "word ".repeat(1000);
        let mut app = App::with_text(Config::default(), &text);
        for _ in 0..4000 {
            app.practice.handle_key("x", SystemTime::now(), Instant::now());
        }
        let area = Rect::new(0, 0, 60, 20);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        let underlined = buffer
            .content()
            .iter()
            .any(|c| c.modifier.contains(Modifier::UNDERLINED));
        assert!(underlined);
    }

    #[test]
    fn test_extreme_sizes_do_not_panic() {
        let mut app = App::with_text(Config::default(), "test prompt");
        app.notice = Some(Notice::Done {
            wpm: 10,
            accuracy: 90,
        });
        for area in [
            Rect::new(0, 0, 1, 1),
            Rect::new(0, 0, 10, 5),
            Rect::new(0, 0, 200, 5),
            Rect::new(0, 0, 20, 50),
        ] {
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }
}
