use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Instant, SystemTime},
};
use tracing::info;
use typeglow::{
    app::{App, Flow},
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
};

/// typing practice with a finger-mapped keyboard and live wpm / accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Paste any text (up to 1000 words) and type it back while an on-screen keyboard shows which finger hits the next key. Time, wpm, accuracy and errors update live."
)]
pub struct Cli {
    /// text to practise with
    #[clap(short = 'p', long, conflicts_with = "file")]
    prompt: Option<String>,

    /// read the text to practise from a file
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// refresh interval of the live figures, in milliseconds
    #[clap(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// do not draw the on-screen keyboard while practising
    #[clap(long)]
    hide_keyboard: bool,

    /// draw the keyboard without per-finger colours
    #[clap(long)]
    no_finger_colors: bool,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// write logs to this file instead of the default location
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// disable logging entirely
    #[clap(long, conflicts_with = "log_file")]
    no_log: bool,
}

impl Cli {
    /// Layer command line flags over the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if self.hide_keyboard {
            config.show_keyboard = false;
        }
        if self.no_finger_colors {
            config.show_finger_colors = false;
        }
        config
    }

    fn initial_text(&self) -> io::Result<Option<String>> {
        match (&self.prompt, &self.file) {
            (Some(prompt), _) => Ok(Some(prompt.clone())),
            (None, Some(path)) => std::fs::read_to_string(path).map(Some),
            (None, None) => Ok(None),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = if cli.no_log {
        None
    } else {
        let path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
        logging::init_file_logging(&path)?
    };
    logging::install_panic_hook();

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(target: "config", path = %store.path().display(), "config_saved");
    }

    let mut app = match cli.initial_text()? {
        Some(text) => App::with_text(config, &text),
        None => App::new(config),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(target: "runtime", "tui_started");
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    info!(target: "runtime", "tui_stopped");

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let ticker = FixedTicker::new(app.config.tick_interval());
    let runner = Runner::new(CrosstermEventSource::new(), ticker);

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let event = runner.step();
        if app.handle_event(event, SystemTime::now(), Instant::now()) == Flow::Quit {
            break;
        }
    }

    Ok(())
}
