pub mod components;
pub mod event;
pub mod ui;
pub mod utils;

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};

pub type Terminal = ratatui::Terminal<CrosstermBackend<io::Stdout>>;

// Mouse capture stays off so the sign-in URL can be selected and copied.
// A failure part way through hands the terminal back before returning.
pub fn init() -> Result<Terminal> {
    enable_raw_mode()?;
    let terminal = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)
        .and_then(|_| ratatui::Terminal::new(CrosstermBackend::new(stdout())));
    match terminal {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = restore();
            Err(e.into())
        }
    }
}

pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}
