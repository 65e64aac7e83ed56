//! Terminal restoration when the process is asked to terminate.
//!
//! Raw mode turns off ISIG, so Ctrl-C reaches the editor as a byte. An
//! external SIGTERM or SIGHUP still ends the process mid-read without
//! unwinding, which would leave the terminal raw with echo off. A watcher
//! thread catches those signals, restores the terminal, and exits with the
//! conventional `128 + signal` status.

use crate::tui::terminal::{TerminalMode, TerminalState};
use std::io;

/// Signals that end the shell after the terminal is restored.
#[cfg(unix)]
pub const TERMINATION_SIGNALS: &[i32] = &[signal_hook::consts::SIGTERM, signal_hook::consts::SIGHUP];

/// Restores the terminal at most once per process and maps a signal to its
/// exit status.
pub struct TerminationHandler<T: TerminalMode> {
    terminal: T,
    restored: bool,
}

impl<T: TerminalMode> TerminationHandler<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            restored: false,
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn on_signal(&mut self, signal: i32) -> i32 {
        if !self.restored {
            self.restored = true;
            tracing::debug!(signal, "termination requested, restoring terminal");
            self.terminal.restore(TerminalState { was_raw: false });
        }
        128 + signal
    }
}

/// Run `on_signal` on a background thread for every delivery of `signals`.
///
/// Registration happens before this returns, so a signal raised right after
/// is not lost.
#[cfg(unix)]
pub fn spawn_watcher<F>(signals: &[i32], mut on_signal: F) -> io::Result<std::thread::JoinHandle<()>>
where
    F: FnMut(i32) + Send + 'static,
{
    let mut signals = signal_hook::iterator::Signals::new(signals)?;
    std::thread::Builder::new()
        .name("lsh-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                on_signal(signal);
            }
        })
}

/// Restore the controlling terminal and exit on SIGTERM or SIGHUP.
#[cfg(unix)]
pub fn install_termination_handler() -> io::Result<()> {
    let mut handler = TerminationHandler::new(crate::tui::terminal::CrosstermTerminal);
    spawn_watcher(TERMINATION_SIGNALS, move |signal| {
        let code = handler.on_signal(signal);
        std::process::exit(code);
    })?;
    Ok(())
}

#[cfg(not(unix))]
pub fn install_termination_handler() -> io::Result<()> {
    Ok(())
}
