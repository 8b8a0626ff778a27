use std::io::{self, Stdout};
use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::info;

mod app;
mod config;
mod error;
mod fsgate;
mod keybinds;
mod logging;
mod reducer;
mod state;
mod ui;
mod util;

use app::App;
pub use error::SpexError;
use fsgate::{FileSystemGateway, RealFs};
use ui::draw;

pub fn run() -> Result<(), SpexError> {
    if std::env::args().any(|a| a == "--help" || a == "-h") {
        println!("Usage: spex [PATH]");
        println!();
        println!("Arguments:");
        println!("  [PATH]    Directory to browse (default: current directory)");
        println!();
        println!("Keys:");
        println!("  Up/Down (k/j)        move selection");
        println!("  Shift+Up / Shift+Down  parent / enter directory");
        println!("  :                    command mode (quit | open [program])");
        println!("  Esc                  back to browse mode");
        return Ok(());
    }

    if let Some(path) = config::log_file_path() {
        logging::init(&path, "info")?;
    }

    let display = config::load_config();
    let directory = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => RealFs.current_directory()?,
    };
    info!(directory = %directory.display(), "starting");
    let mut app = App::new(directory, &display)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    let result = run_app(terminal, &mut app);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    info!("stopped");
    result
}

/// One synchronous `reduce -> render` cycle per input event; nothing runs in
/// the background and cycles never overlap.
fn run_app(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<RealFs>,
) -> Result<(), SpexError> {
    loop {
        terminal.draw(|f| draw(app, f))?;
        if app.quit_requested() {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
        if app.quit_requested() {
            return Ok(());
        }
    }
}
