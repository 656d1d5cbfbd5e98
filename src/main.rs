use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::SystemTime,
};

use stanza::{
    config::{Config, ConfigStore, FileConfigStore, DEFAULT_DURATION_SECS},
    input::{action_for, InputAction},
    passage::PassageCatalog,
    round::{Round, TickHandle},
    runtime::{CrosstermEventSource, RoundEvent, Runner},
    ui::RoundView,
};

/// timed typing drills against reference passages
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Reproduce a reference passage within a time limit while accuracy and gross wpm are measured live. Left/Right switch passages, Tab resets the round, Esc quits."
)]
pub struct Cli {
    /// index of the passage to practice
    #[clap(short, long)]
    passage: Option<usize>,

    /// number of seconds to run the round
    #[clap(short = 's', long)]
    duration_secs: Option<u64>,

    /// list available passages and exit
    #[clap(long)]
    list: bool,
}

pub struct App<S: ConfigStore> {
    pub catalog: PassageCatalog,
    pub config: Config,
    pub round: Round,
    store: S,
    tick_handle: Option<TickHandle>,
}

impl<S: ConfigStore> App<S> {
    pub fn new(catalog: PassageCatalog, config: Config, store: S) -> Self {
        let passage = catalog.get(config.passage_index).clone();
        let round = Round::new(passage.text, config.duration_secs);
        Self {
            catalog,
            config,
            round,
            store,
            tick_handle: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.catalog.get(self.config.passage_index).title
    }

    pub fn on_tick(&mut self, now: SystemTime) {
        if let Some(handle) = self.tick_handle {
            if self.round.tick(handle, now) {
                self.tick_handle = None;
            }
        }
    }

    pub fn apply(&mut self, action: InputAction, now: SystemTime) {
        match action {
            InputAction::Type(c) => {
                let mut text = self.round.typed().to_string();
                text.push(c);
                if let Some(handle) = self.round.submit_typed_text(&text, now) {
                    self.tick_handle = Some(handle);
                }
            }
            InputAction::Backspace => {
                let mut text = self.round.typed().to_string();
                text.pop();
                self.round.submit_typed_text(&text, now);
            }
            InputAction::Reset => {
                self.round.request_reset();
                self.tick_handle = None;
            }
            InputAction::PrevPassage => self.change_passage(self.catalog.len() - 1),
            InputAction::NextPassage => self.change_passage(1),
            InputAction::Quit | InputAction::Ignored => {}
        }

        if !self.round.is_running() {
            self.tick_handle = None;
        }
    }

    fn change_passage(&mut self, step: usize) {
        self.config.passage_index = (self.config.passage_index + step) % self.catalog.len();
        let passage = self.catalog.get(self.config.passage_index).clone();
        self.round.set_target(passage.text);
        self.tick_handle = None;
        let _ = self.store.save(&self.config);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let catalog = PassageCatalog::embedded();

    if cli.list {
        for (index, title) in catalog.titles().enumerate() {
            println!("{index}: {title}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(passage) = cli.passage {
        // out-of-range selection falls back to the first passage
        config.passage_index = if passage < catalog.len() { passage } else { 0 };
    }
    if let Some(secs) = cli.duration_secs {
        config.duration_secs = if secs == 0 { DEFAULT_DURATION_SECS } else { secs };
    }
    let _ = store.save(&config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, config, store);
    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend, S: ConfigStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());

    loop {
        terminal.draw(|f| draw(app, f))?;

        let now = SystemTime::now();
        match runner.step() {
            RoundEvent::Tick => app.on_tick(now),
            RoundEvent::Resize => {}
            RoundEvent::Key(key) => match action_for(key) {
                InputAction::Quit => break,
                action => app.apply(action, now),
            },
        }
    }

    Ok(())
}

fn draw<S: ConfigStore>(app: &App<S>, f: &mut Frame) {
    let snapshot = app.round.snapshot(SystemTime::now());
    let view = RoundView {
        title: app.title(),
        target: app.round.target(),
        typed: app.round.typed(),
        snapshot: &snapshot,
    };
    f.render_widget(view, f.area());
}
