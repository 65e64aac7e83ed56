//! Raw-mode acquisition with guaranteed restoration.
//!
//! `TerminalMode` is the seam the editor talks to; the real implementation
//! goes through crossterm while tests substitute a recording fake.

use crate::error::TerminalError;
use crossterm::terminal;
use std::io::{self, IsTerminal};

/// Snapshot of line-discipline settings taken when raw mode is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalState {
    /// Raw mode was already active before `enter_raw`.
    pub was_raw: bool,
}

/// Controller for the terminal's canonical/echo settings.
pub trait TerminalMode {
    /// Disable canonical input and echo, returning the prior settings.
    fn enter_raw(&mut self) -> Result<TerminalState, TerminalError>;

    /// Reapply settings captured by `enter_raw`.
    fn restore(&mut self, state: TerminalState);
}

/// Controller for the process's controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl TerminalMode for CrosstermTerminal {
    fn enter_raw(&mut self) -> Result<TerminalState, TerminalError> {
        if !io::stdin().is_terminal() {
            return Err(TerminalError::NotATerminal);
        }
        let was_raw = terminal::is_raw_mode_enabled()?;
        terminal::enable_raw_mode()?;
        Ok(TerminalState { was_raw })
    }

    fn restore(&mut self, state: TerminalState) {
        if state.was_raw {
            return;
        }
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::warn!(error = %err, "failed to restore terminal mode");
        }
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
pub struct RawModeGuard<'a, T: TerminalMode> {
    terminal: &'a mut T,
    state: Option<TerminalState>,
}

impl<'a, T: TerminalMode> RawModeGuard<'a, T> {
    /// Enter raw mode and return a guard that restores it on drop.
    pub fn acquire(terminal: &'a mut T) -> Result<Self, TerminalError> {
        let state = terminal.enter_raw()?;
        Ok(Self {
            terminal,
            state: Some(state),
        })
    }
}

impl<T: TerminalMode> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.terminal.restore(state);
        }
    }
}
