use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use wordfall::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    ui,
    words::{Language, WordSource},
    Game, ModeKind, Phase,
};

/// Longest the loop sleeps without redrawing
const FRAME_MS: u64 = 50;

/// falling-words typing arcade: type each word before it reaches the floor
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// game variant to play
    #[clap(short = 'm', long, value_enum)]
    mode: Option<ModeKind>,

    /// built-in vocabulary to draw words from
    #[clap(short = 'l', long)]
    language: Option<String>,

    /// word list to use instead of a built-in language (one word per line, or a JSON array)
    #[clap(short = 'w', long)]
    words_file: Option<PathBuf>,

    /// fixed play-field width in pixels (14 px per column)
    #[clap(long)]
    width: Option<f64>,

    /// fixed play-field height in pixels (30 px per row)
    #[clap(long)]
    height: Option<f64>,

    /// seed the word and placement RNG for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// write logs to PATH (or the state directory when no path is given); filter with RUST_LOG
    #[clap(long, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// persist the resulting settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command-line flags over the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if let Some(ref language) = self.language {
            cfg.language = language.to_lowercase();
        }
        if self.width.is_some() {
            cfg.field_width = self.width;
        }
        if self.height.is_some() {
            cfg.field_height = self.height;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        cfg
    }

    fn log_target(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(Some(path)) => Some(path.clone()),
            Some(None) => AppDirs::log_path(),
            None => None,
        }
    }
}

fn init_logging(target: Option<PathBuf>) -> io::Result<()> {
    let Some(path) = target else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_words(cli: &Cli, cfg: &Config) -> Result<WordSource, Box<dyn Error>> {
    let words = match cli.words_file {
        Some(ref path) => WordSource::from_path(path)?,
        None => WordSource::from_language(&cfg.language).map_err(|e| {
            format!("{e} (available: {})", Language::available().join(", "))
        })?,
    };
    if words.is_empty() {
        log::warn!("word list is empty; no words will spawn");
    }
    Ok(words)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging(cli.log_target())?;

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    if cli.save_config {
        store.save(&cfg)?;
        log::info!("saved config to {}", store.path().display());
    }
    let words = load_words(&cli, &cfg)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let (cols, rows) = ui::field_cells(Rect::new(0, 0, size.width, size.height));
    let mut game = Game::new(cfg.mode, words, cfg.viewport_for(cols, rows), cfg.seed);
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(FRAME_MS)),
    );

    let result = start_tui(&mut terminal, &mut game, &mut runner, &cfg);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    game: &mut Game,
    runner: &mut Runner<E, T>,
    cfg: &Config,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*game, f.area()))?;

        let (event, elapsed) = runner.step_until(game.until_next_tick());
        game.advance(elapsed);

        match event {
            GameEvent::Tick => {}
            GameEvent::Resize(w, h) => {
                let (cols, rows) = ui::field_cells(Rect::new(0, 0, w, h));
                game.resize(cfg.viewport_for(cols, rows));
            }
            GameEvent::FocusLost => game.pause(),
            GameEvent::Key(key) => {
                if handle_key(game, key) == KeyAction::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Quit,
}

fn handle_key(game: &mut Game, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
    {
        return KeyAction::Quit;
    }

    match game.phase() {
        Phase::Running => {
            let mut raw = game.state().input.clone();
            match key.code {
                KeyCode::Char(c) => raw.push(c),
                KeyCode::Backspace => {
                    raw.pop();
                }
                _ => return KeyAction::Continue,
            }
            game.submit_input(&raw);
        }
        Phase::Idle | Phase::GameOver => match key.code {
            KeyCode::Enter if game.phase() == Phase::GameOver => game.restart(),
            KeyCode::Enter => game.start(),
            KeyCode::Tab => {
                let next = match game.mode().kind() {
                    ModeKind::Falling => ModeKind::Sprint,
                    ModeKind::Sprint => ModeKind::Falling,
                };
                game.set_mode(next);
            }
            _ => {}
        },
    }
    KeyAction::Continue
}
