//! Funsel - Funnel Selector
//!
//! A terminal multi-select dropdown over CRM funnels and their stages.
//! Features include per-stage and per-funnel selection, a pluralized
//! summary label, and selection persistence across runs.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use domain::STATE_RECORD_ID;
use infrastructure::StateStore;
use presentation::{render_ui, InputHandler};


/// Entry point for the funsel terminal dropdown application.
///
/// Sets up the terminal interface, loads any previously saved selection,
/// and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store = StateStore::open(StateStore::default_path());
    let mut app = App::default();
    let loaded = store.load_state(STATE_RECORD_ID);
    if let Err(err) = &loaded {
        log::warn!(
            "failed to load saved selection from {}: {}",
            store.path().display(),
            err
        );
    }
    app.set_load_result(loaded.map_err(|e| e.to_string()));

    let res = run_app(&mut terminal, &mut app, &store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering plus keyboard and mouse input processing.
/// Continues running until the user presses 'q' while the panel is closed.
///
/// # Arguments
///
/// * `terminal` - Terminal interface for rendering
/// * `app` - Mutable reference to application state
/// * `store` - Store used to persist selection changes
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &StateStore,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if !app.is_open => return Ok(()),
                        _ => InputHandler::handle_key_event(app, store, key.code, key.modifiers),
                    }
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                InputHandler::handle_mouse_event(app, store, mouse, area);
            }
            _ => {}
        }
    }
}
