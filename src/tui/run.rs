//! Board TUI entry point and terminal setup.

use std::{io, path::Path};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::assets::FileAssets;
use crate::tui::app::App;

/// Initialise and run the board terminal user interface.
///
/// `selection` pre-selects a task list and loads it, as if the user had
/// picked it and pressed load.
pub fn run_tui(data_dir: &Path, selection: Option<String>) -> io::Result<()> {
    let mut app = App::new(FileAssets::new(data_dir));
    if let Some(name) = selection {
        app.select_and_load(&name);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
