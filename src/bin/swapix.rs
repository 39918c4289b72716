// Native binary for Swapix - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::File,
    io,
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use swapix::{
    app::{App, InputMode},
    config::load,
    copy_api,
    graphql::{Environment, HttpTransport},
    types::{AppEvent, Tab},
    ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;
    init_logging(&cfg.log_file)?;
    cfg.log_summary();

    let transport = HttpTransport::new(cfg.endpoint.clone(), cfg.request_timeout);

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // app + channels
    let (tx, rx) = unbounded_channel::<AppEvent>();
    let env = Environment::new(Arc::new(transport), tx.clone());
    let mut app = App::new(env, tx, &cfg);
    app.mount();

    // main loop
    let result = run_loop(&mut app, &mut terminal, rx).await;

    // cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("Swapix exiting");
    result
}

/// The terminal belongs to the UI, so log records go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        // input or fetch events
        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                }
            }
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
        }

        if last_frame.elapsed() >= budget {
            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    // Add-favorite dialog captures typing
    if app.input_mode() == InputMode::FavoriteDialog {
        match k.code {
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                app.on_event(AppEvent::Quit)
            }
            KeyCode::Char(c) => app.favorite_input(c),
            KeyCode::Backspace => app.favorite_backspace(),
            KeyCode::Left | KeyCode::BackTab => app.favorite_prev_kind(),
            KeyCode::Right | KeyCode::Tab => app.favorite_next_kind(),
            KeyCode::Enter => {
                app.submit_favorite();
            }
            KeyCode::Esc => app.close_favorite_dialog(),
            _ => {}
        }
        return;
    }

    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.on_event(AppEvent::Quit);
        }

        // Tabs
        (KeyCode::Char(c @ '1'..='5'), _) => {
            if let Some(tab) = c.to_digit(10).and_then(|d| Tab::from_index(d as usize - 1)) {
                app.set_tab(tab);
            }
        }
        (KeyCode::Tab, _) => app.next_tab(),
        (KeyCode::BackTab, _) => app.prev_tab(),

        // Selection
        (KeyCode::Right | KeyCode::Down | KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Left | KeyCode::Up | KeyCode::Char('k'), _) => app.select_prev(),

        // Knobs
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => app.cycle_fps(),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.toggle_debug_panel(),

        (KeyCode::Char('c'), _) => {
            if copy_api::copy_current(app) {
                app.show_toast("Copied".to_string());
            } else {
                app.show_toast("Nothing to copy".to_string());
            }
        }

        // Favorites
        (KeyCode::Char('a'), _) => app.open_favorite_dialog(),
        (KeyCode::Char('d') | KeyCode::Delete, _) => app.remove_selected_favorite(),

        _ => {}
    }
}
