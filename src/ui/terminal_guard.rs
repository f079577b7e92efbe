//! RAII guard restoring the terminal on every exit path.
//!
//! The tour installs a document-wide mouse hook (mouse capture); tearing the
//! widget down must always release it, including on `?` returns and panics.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct TerminalGuard {
    active: AtomicBool,
}

impl TerminalGuard {
    /// Enter raw mode, the alternate screen, and mouse capture.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self {
            active: AtomicBool::new(true),
        })
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn cleanup() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            Self::cleanup();
        }
    }
}

/// Restore the terminal before the panic message prints, so it stays readable.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        TerminalGuard::cleanup();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_skips_cleanup_when_inactive() {
        let guard = TerminalGuard {
            active: AtomicBool::new(false),
        };
        drop(guard);
        // No terminal ops attempted; not panicking is the assertion
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        TerminalGuard::cleanup();
        TerminalGuard::cleanup();
    }
}
