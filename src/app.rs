use std::time::{Instant, SystemTime};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::config::Config;
use crate::draft::Draft;
use crate::keys::normalize_raw_key;
use crate::layout::KeyboardLayout;
use crate::practice::Practice;
use crate::runtime::{key_name, AppEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum View {
    Home,
    Compose,
    Practice,
}

/// Blocking message shown on top of the current view until any key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyInput,
    Done { wpm: u64, accuracy: u64 },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyInput => "Please paste or type some text (up to 1000 words).".to_string(),
            Notice::Done { wpm, accuracy } => {
                format!("Done!\nWPM: {wpm}\nAccuracy: {accuracy}%")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub view: View,
    pub draft: Draft,
    pub practice: Practice,
    pub layout: KeyboardLayout,
    pub config: Config,
    pub notice: Option<Notice>,
    /// Key lit up on the home keyboard.
    pub home_glow: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            view: View::Home,
            draft: Draft::default(),
            practice: Practice::new(config.tick_interval()),
            layout: KeyboardLayout::qwerty(),
            config,
            notice: None,
            home_glow: None,
        }
    }

    /// Seed the draft and jump straight into practice with it.
    pub fn with_text(config: Config, text: &str) -> Self {
        let mut app = Self::new(config);
        app.draft = Draft::new(text);
        if app.load_draft(SystemTime::now()) {
            app.view = View::Practice;
        }
        app
    }

    /// Dispatch one runner event. The refresh timer is deadline based and
    /// polled on every event, so a busy input stream cannot starve it.
    pub fn handle_event(&mut self, event: AppEvent, now: SystemTime, clock: Instant) -> Flow {
        self.practice.on_tick(now, clock);

        match event {
            AppEvent::Tick | AppEvent::Resize => Flow::Continue,
            AppEvent::Paste(text) => {
                if self.view == View::Compose && self.notice.is_none() {
                    self.draft.push_str(&text);
                }
                Flow::Continue
            }
            AppEvent::Key(key) => self.handle_key(key, now, clock),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: SystemTime, clock: Instant) -> Flow {
        let shortcut = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        if shortcut && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        if self.notice.take().is_some() {
            return Flow::Continue;
        }

        match key.code {
            KeyCode::F(1) => {
                self.switch_view(View::Home);
                return Flow::Continue;
            }
            KeyCode::F(2) => {
                self.switch_view(View::Compose);
                return Flow::Continue;
            }
            KeyCode::F(3) => {
                self.open_practice(now);
                return Flow::Continue;
            }
            _ => {}
        }

        match self.view {
            View::Home => self.on_home_key(key),
            View::Compose => self.on_compose_key(key, shortcut, now),
            View::Practice => self.on_practice_key(key, shortcut, now, clock),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Esc {
            return Flow::Quit;
        }
        let name = normalize_raw_key(&key_name(key.code));
        self.home_glow = self.layout.find(&name).map(|cap| cap.lookup_name());
        Flow::Continue
    }

    fn on_compose_key(&mut self, key: KeyEvent, shortcut: bool, now: SystemTime) -> Flow {
        match key.code {
            KeyCode::Esc => self.switch_view(View::Home),
            KeyCode::Char('l') if shortcut => {
                if self.load_draft(now) {
                    self.switch_view(View::Practice);
                }
            }
            KeyCode::Char(_) if shortcut => {}
            KeyCode::Char(c) => self.draft.push(c),
            KeyCode::Enter => self.draft.push('\n'),
            KeyCode::Tab => self.draft.push('\t'),
            KeyCode::Backspace => {
                self.draft.pop();
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_practice_key(
        &mut self,
        key: KeyEvent,
        shortcut: bool,
        now: SystemTime,
        clock: Instant,
    ) -> Flow {
        match key.code {
            KeyCode::Esc => self.switch_view(View::Compose),
            KeyCode::Char('s') if shortcut => self.start(now, clock),
            KeyCode::Char('r') if shortcut => self.practice.reset(now),
            KeyCode::Char('l') if shortcut => {
                self.load_draft(now);
            }
            KeyCode::Char(_) if shortcut => {}
            code => {
                let raw = key_name(code);
                if let Some(outcome) = self.practice.handle_key(&raw, now, clock) {
                    if outcome.completed {
                        let metrics = self.practice.metrics();
                        self.notice = Some(Notice::Done {
                            wpm: metrics.wpm,
                            accuracy: metrics.accuracy,
                        });
                    }
                }
            }
        }
        Flow::Continue
    }

    /// Explicit start; loads the draft first when nothing is loaded yet.
    pub fn start(&mut self, now: SystemTime, clock: Instant) {
        if !self.practice.is_loaded() && !self.load_draft(now) {
            return;
        }
        self.practice.start(now, clock);
    }

    /// Load the draft into a fresh session. Shows the empty-input notice and
    /// leaves everything else untouched on failure.
    pub fn load_draft(&mut self, now: SystemTime) -> bool {
        match self.practice.load(self.draft.text(), now) {
            Ok(_) => true,
            Err(e) => {
                info!(target: "practice", %e, "load_rejected");
                self.notice = Some(Notice::EmptyInput);
                false
            }
        }
    }

    fn open_practice(&mut self, now: SystemTime) {
        if self.practice.is_loaded() || self.load_draft(now) {
            self.switch_view(View::Practice);
        }
    }

    fn switch_view(&mut self, view: View) {
        if self.view != view {
            debug!(target: "app", from = %self.view, to = %view, "view_changed");
            self.view = view;
        }
    }
}
