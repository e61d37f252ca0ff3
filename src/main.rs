pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use flipquiz::{
    bank::QuestionBank,
    celebration::Celebration,
    config::{Config, ConfigStore, FileConfigStore, Secret},
    controls::{Controls, Flow},
    quiz::{Quiz, Transition},
    runtime::{Clock, CrosstermEventSource, EventSource, Runner, TermEvent},
    session::{Phase, RevealMode, SessionOptions},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::info;

const FRAME_MS: u64 = 100;

/// flip-card classroom quiz for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Deal a shuffled grid of question cards, give the class a timed preview, then flip cards one at a time. Students who pass on a question land on the wall of shame."
)]
pub struct Cli {
    /// number of cards to deal (1-24)
    #[clap(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=24))]
    cards: Option<u8>,

    /// built-in question bank to draw from
    #[clap(short = 'b', long)]
    bank: Option<String>,

    /// json question bank to load instead of a built-in one
    #[clap(long, conflicts_with = "bank")]
    bank_file: Option<PathBuf>,

    /// seconds the class gets to preview every question
    #[clap(short = 's', long, conflicts_with = "no_timer")]
    preview_secs: Option<u32>,

    /// skip the timed preview and go straight to the game
    #[clap(long)]
    no_timer: bool,

    /// whether "show answer" finishes a card or needs a separate "done"
    #[clap(short = 'r', long, value_enum)]
    reveal: Option<RevealMode>,

    /// disable the wall of shame
    #[clap(long)]
    no_shame: bool,

    /// do not ask for a password before starting
    #[clap(long)]
    no_auth: bool,

    /// password that unlocks the quiz
    #[clap(short = 'p', long, env = "FLIPQUIZ_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// settings file to read instead of the platform default
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings (never the password) back to the settings file
    #[clap(long)]
    save_config: bool,

    /// where to write the log file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command-line flags over the settings file.
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(cards) = self.cards {
            cfg.cards = usize::from(cards);
        }
        if let Some(bank) = &self.bank {
            cfg.bank = bank.clone();
        }
        if let Some(secs) = self.preview_secs {
            cfg.preview_secs = Some(secs);
        }
        if self.no_timer {
            cfg.preview_secs = None;
        }
        if let Some(reveal) = self.reveal {
            cfg.reveal = reveal;
        }
        if self.no_shame {
            cfg.wall_of_shame = false;
        }
        if self.no_auth {
            cfg.require_password = false;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn load_bank(&self, cfg: &Config) -> Result<QuestionBank, flipquiz::error::BankError> {
        match &self.bank_file {
            Some(path) => QuestionBank::from_path(path),
            None => QuestionBank::builtin(&cfg.bank),
        }
    }
}

fn session_options(cfg: &Config, secret: Option<&Secret>) -> SessionOptions {
    SessionOptions {
        cards: cfg.cards,
        reveal: cfg.reveal,
        preview_secs: cfg.preview_secs,
        wall_of_shame: cfg.wall_of_shame,
        secret: secret.map(|s| s.value.clone()),
    }
}

#[derive(Debug)]
pub struct App {
    pub quiz: Quiz,
    pub controls: Controls,
    pub celebration: Celebration,
    pub bank: QuestionBank,
    pub options: SessionOptions,
    pub fallback_secret: bool,
}

impl App {
    pub fn new(bank: QuestionBank, options: SessionOptions, fallback_secret: bool) -> Self {
        let quiz = Quiz::new(&bank.entries, options.clone(), &mut rand::thread_rng());
        Self {
            quiz,
            controls: Controls::new(),
            celebration: Celebration::new(),
            bank,
            options,
            fallback_secret,
        }
    }

    /// Throw the session away and deal a new one.
    pub fn reset(&mut self) {
        self.quiz = Quiz::new(&self.bank.entries, self.options.clone(), &mut rand::thread_rng());
        self.controls = Controls::new();
        self.celebration = Celebration::new();
    }

    pub fn on_key(&mut self, key: KeyEvent, width: u16, height: u16) -> Flow {
        let was_complete = self.quiz.is_complete();
        let flow = self.controls.on_key(key, &mut self.quiz);
        if !was_complete && self.quiz.is_complete() {
            self.celebration.start(width, height);
        }
        flow
    }

    /// Feed elapsed whole seconds to the preview countdown.
    pub fn on_seconds(&mut self, secs: u32) {
        for _ in 0..secs {
            if self.quiz.tick() == Transition::Ignored {
                break;
            }
        }
    }

    pub fn on_frame(&mut self) {
        self.celebration.update();
    }

    /// Whether the loop should be counting seconds for the countdown.
    pub fn timer_running(&self) -> bool {
        self.quiz.phase() == Phase::Preview && self.quiz.countdown().is_running()
    }
}

/// Apply one loop event to the app and keep the runner's second counting in
/// step with the preview timer.
fn dispatch<E: EventSource, C: Clock>(
    app: &mut App,
    runner: &mut Runner<E, C>,
    event: TermEvent,
    width: u16,
    height: u16,
) -> Flow {
    let flow = match event {
        TermEvent::Key(key) => app.on_key(key, width, height),
        TermEvent::Second(secs) => {
            app.on_seconds(secs);
            Flow::Continue
        }
        TermEvent::Frame => {
            app.on_frame();
            Flow::Continue
        }
        TermEvent::Resize => Flow::Continue,
        TermEvent::Closed => Flow::Quit,
    };
    if flow == Flow::NewSession {
        info!("new session requested");
        app.reset();
    }
    runner.count_seconds(app.timer_running());
    flow
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = flipquiz::logging::init(cli.log_file.as_deref()) {
        info!(path = %path.display(), "logging to file");
    }

    let store = cli.config_store();
    let cfg = cli.apply_to(store.load());

    if cli.save_config {
        store.save(&cfg)?;
        info!(path = %store.path().display(), "settings saved");
    }

    let bank = match cli.load_bank(&cfg) {
        Ok(bank) => bank,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                format!(
                    "{err} (built-in banks: {})",
                    QuestionBank::builtin_names().join(", ")
                ),
            )
            .exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let secret = cfg
        .require_password
        .then(|| Secret::resolve(cli.password.as_deref()));
    let fallback_secret = secret.as_ref().is_some_and(|s| s.is_fallback);
    let options = session_options(&cfg, secret.as_ref());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(bank, options, fallback_secret);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(FRAME_MS),
    );
    runner.count_seconds(app.timer_running());

    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step();
        let size = terminal.size().unwrap_or_default();
        if dispatch(app, &mut runner, event, size.width, size.height) == Flow::Quit {
            break;
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
