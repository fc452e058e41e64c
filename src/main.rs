pub mod app_dirs;
pub mod config;
pub mod effects;
pub mod game;
pub mod leaderboard;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod surface;
pub mod ui;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::game::Game;
use crate::leaderboard::{JsonScoreStore, LocalScoreCache, ScoreStore, SqliteScoreStore};
use crate::runtime::{CrosstermEventSource, FixedTicker, PatEvent, Runner};
use crate::session::Phase;
use crate::surface::{Point, TargetBounds};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
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
    io::{self, stdin},
    time::{Duration, Instant},
};

const TICK_RATE_MS: u64 = 100;

/// pat the tiger!
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal clicker game. Click or hold-and-drag to pet the tiger, \
hit the tongue for bonus pats, and chase the top-10 leaderboard before the clock runs out."
)]
pub struct Cli {
    /// seconds per round
    #[clap(short = 's', long)]
    round_secs: Option<u32>,

    /// player name to prefill on the results screen
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// keep scores in a local JSON file instead of the sqlite leaderboard
    #[clap(long)]
    local_only: bool,

    /// clear the leaderboard and exit
    #[clap(long)]
    reset_scores: bool,
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub name_input: String,
    pub now: Instant,
    /// Last drawn terminal area, for pointer hit testing.
    area: Rect,
}

impl App {
    pub fn new(config: Config, store: Box<dyn ScoreStore>) -> Self {
        let name_input = config.player_name.clone().unwrap_or_default();
        let game = Game::new(config, store, LocalScoreCache::new(), Instant::now());
        Self {
            game,
            name_input,
            now: Instant::now(),
            area: Rect::new(0, 0, 80, 24),
        }
    }

    fn tiger_bounds(&self) -> TargetBounds {
        let cat = ui::tiger_rect(self.area);
        TargetBounds::new(
            cat.x as f64,
            cat.y as f64,
            cat.width as f64,
            cat.height as f64,
        )
    }

    fn on_mouse(&mut self, me: MouseEvent) {
        let now = Instant::now();
        self.now = now;
        let point = Point::new(me.column as f64, me.row as f64);
        let bounds = self.tiger_bounds();

        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.game.show_leaderboard || self.game.session.phase == Phase::Ended {
                    return;
                }
                if bounds.contains(point) {
                    self.game.register_click(point, bounds, now);
                    self.game.begin_petting(point, bounds, now);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if bounds.contains(point) {
                    self.game.update_petting(point, now);
                } else {
                    // Pointer left the interactive surface
                    self.game.end_petting();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.game.end_petting();
            }
            _ => {}
        }
    }

    /// Returns `true` when the app should exit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        let entering_name =
            self.game.session.phase == Phase::Ended && !self.game.show_leaderboard;

        match key.code {
            KeyCode::Esc => {
                if entering_name {
                    // Skip the entry; the leaderboard still opens
                    self.game.submit_score("");
                    false
                } else {
                    true
                }
            }
            KeyCode::Enter if entering_name => {
                let name = self.name_input.clone();
                self.game.submit_score(&name);
                false
            }
            KeyCode::Backspace if entering_name => {
                self.name_input.pop();
                false
            }
            KeyCode::Char(c) if entering_name => {
                if self.name_input.chars().count() < self.game.config.max_name_len {
                    self.name_input.push(c);
                }
                false
            }
            KeyCode::Char('n') if self.game.show_leaderboard => {
                self.game.new_game();
                false
            }
            KeyCode::Left if !self.game.show_leaderboard => {
                self.game.cancel_round();
                false
            }
            _ => false,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.reset_scores {
        let mut store = SqliteScoreStore::new()?;
        store.clear_all()?;
        println!("leaderboard cleared");
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if let Some(secs) = cli.round_secs {
        config.round_secs = secs.max(1);
    }
    if let Some(name) = &cli.name {
        config.player_name = Some(name.clone());
    }
    let _ = config_store.save(&config);

    let store: Box<dyn ScoreStore> = if cli.local_only {
        Box::new(JsonScoreStore::new(
            LocalScoreCache::new(),
            config.leaderboard_limit,
        ))
    } else {
        match SqliteScoreStore::new() {
            Ok(s) => Box::new(s),
            // No writable state dir: degrade to the JSON store
            Err(_) => Box::new(JsonScoreStore::new(
                LocalScoreCache::new(),
                config.leaderboard_limit,
            )),
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, store);
    let result = run_app(&mut terminal, &mut app);

    // Teardown must run even when the loop errored
    app.game.shutdown();
    let mut config = config_store.load();
    config.player_name = app.game.session.player_name.clone().or(config.player_name);
    let _ = config_store.save(&config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    let size = terminal.size()?;
    app.game
        .set_viewport(TargetBounds::new(0.0, 0.0, size.width as f64, size.height as f64));

    loop {
        terminal.draw(|f| {
            app.area = f.area();
            f.render_widget(&*app, f.area());
        })?;

        match runner.step() {
            PatEvent::Tick => {
                app.now = Instant::now();
                app.game.advance(app.now);
            }
            PatEvent::Resize(w, h) => {
                app.game
                    .set_viewport(TargetBounds::new(0.0, 0.0, w as f64, h as f64));
            }
            PatEvent::Mouse(me) => app.on_mouse(me),
            PatEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
