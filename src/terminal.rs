use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;

use crate::algorithm::AlgorithmId;
use crate::config::ARRAY_SIZE_STEP;
use crate::error::Result;
use crate::playback::{Command, InputSource};

/// Raw mode plus the alternate screen for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, Show, LeaveAlternateScreen) {
            warn!("failed to leave alternate screen: {}", err);
        }
        if let Err(err) = disable_raw_mode() {
            warn!("failed to disable raw mode: {}", err);
        }
        stdout.flush().unwrap_or_default();
    }
}

/// Keyboard input read through crossterm.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(key_command(key)),
            _ => Ok(None),
        }
    }
}

pub fn key_command(key: KeyEvent) -> Option<Command> {
    let step = ARRAY_SIZE_STEP as isize;
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(digit @ '1'..='5') => AlgorithmId::from_digit(digit).map(Command::SelectAlgorithm),
        KeyCode::Char(' ') => Some(Command::TogglePlayback),
        KeyCode::Char('p') | KeyCode::Enter => Some(Command::Play),
        KeyCode::Char('s') => Some(Command::Pause),
        KeyCode::Char('r') => Some(Command::Reset),
        KeyCode::Char('g') => Some(Command::Regenerate),
        KeyCode::Left => Some(Command::ResizeBy(-step)),
        KeyCode::Right => Some(Command::ResizeBy(step)),
        KeyCode::Down => Some(Command::SpeedBy(-1)),
        KeyCode::Up => Some(Command::SpeedBy(1)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
