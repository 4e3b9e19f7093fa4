mod app;
mod cli;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use app::App;
use bubbles_core::browser::Browser;
use bubbles_core::catalog;
use bubbles_core::clipboard::SystemClipboard;
use bubbles_core::config::{self, Settings};
use bubbles_core::debounce::Debouncer;
use bubbles_core::keymap::Keymap;
use bubbles_core::link;
use bubbles_core::state::{FileStore, KeyValueStore, MemoryStore};
use cli::{CliAction, LaunchOptions};

const LOG_ENV: &str = "BUBBLES_LOG";

#[tokio::main]
async fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let launch_opts = match cli::run(&args) {
        CliAction::Exit(code) => std::process::exit(code),
        CliAction::LaunchTui(opts) => opts,
    };

    init_logging();

    // Load everything before terminal setup so a panic here prints cleanly
    let app = build_app(launch_opts);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Log to a file under the data dir; stdout belongs to the terminal UI.
fn init_logging() {
    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn build_app(opts: LaunchOptions) -> App {
    let settings = Settings::load();
    let catalog_path = settings.catalog_path(opts.catalog.as_deref());
    let share_base = settings
        .share_base_url
        .clone()
        .unwrap_or_else(|| link::default_base_url(&catalog_path));

    let store: Box<dyn KeyValueStore> = match FileStore::open_default() {
        Some(store) => Box::new(store),
        None => {
            tracing::warn!("no data directory, state will not be saved");
            Box::new(MemoryStore::new())
        }
    };
    let browser = Browser::from_load(catalog::load_catalog(&catalog_path), store);

    let mut app = App::new(
        browser,
        Keymap::load(),
        Debouncer::new(settings.search_debounce),
        share_base,
        Box::new(SystemClipboard),
    );
    if app.browser.theme().is_none() {
        if let Some(theme) = settings.theme {
            app.theme = theme;
        }
    }
    if let Some(target) = &opts.link {
        app.follow_link(target);
    }
    tracing::info!(catalog = %catalog_path.display(), "browser started");
    app
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> io::Result<()> {
    // Dedicated thread for crossterm event reading
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    std::thread::spawn(move || loop {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if event_tx.send(ev).is_err() {
                    break;
                }
            }
        }
    });

    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        let search_deadline = app.search_debounce.deadline();
        let search_sleep = tokio::time::sleep_until(
            search_deadline
                .map(tokio::time::Instant::from_std)
                .unwrap_or_else(tokio::time::Instant::now),
        );

        tokio::select! {
            Some(ev) = event_rx.recv() => {
                match ev {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Event::Paste(text) => app.handle_paste(&text),
                    _ => {}
                }
            }
            _ = search_sleep, if search_deadline.is_some() => {
                app.poll_search(Instant::now());
            }
            _ = tick_interval.tick() => {
                app.tick = app.tick.wrapping_add(1);
                app.clear_expired_status();
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
