pub mod app;
pub mod event;
pub mod ui;

pub use app::App;
pub use event::{Event, EventHandler};

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::models::AreaRecord;
use crate::scoring::{ImportanceScorer, ImportanceWeights};

use app::SLIDER_STEP;

const TICK_RATE_MS: u64 = 250;

/// Run the dashboard until the user quits. The working set is loaded and
/// validated by the caller; the first frame already shows the map computed
/// from the default sliders.
pub fn run(
    areas: Vec<AreaRecord>,
    weights: ImportanceWeights,
    scorer: ImportanceScorer,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(areas, weights, scorer);
    app.update_map();

    let events = EventHandler::new(TICK_RATE_MS);
    let result = run_loop(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key(app, key),
            Event::Resize(..) | Event::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.adjust_selected(-SLIDER_STEP),
        KeyCode::Right | KeyCode::Char('l') => app.adjust_selected(SLIDER_STEP),
        KeyCode::Enter => app.update_map(),
        KeyCode::Char('r') => app.reset_weights(),
        _ => {}
    }
}
