// src/system/interrupt.rs

//! Ctrl-C handling while a child process owns the terminal.
//!
//! Once [`install`] has run, an interrupt at the launcher's own prompts still ends
//! the process (exit code 130), but an interrupt that arrives while a child started
//! through [`shielded`] is running only reaches the child. The launcher notes it and
//! carries on with the session.

use signal_hook::consts::SIGINT;
use signal_hook::flag;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Exit status used when Ctrl-C ends the launcher itself.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Default)]
struct Shield {
    /// `true` while no child is running; the signal handler exits only then.
    exit_on_interrupt: Arc<AtomicBool>,
    interrupted: Arc<AtomicBool>,
    /// Nesting depth of [`shielded`] calls, or `None` until [`install`] has run.
    depth: Mutex<Option<usize>>,
}

static SHIELD: OnceLock<Shield> = OnceLock::new();

fn shield() -> &'static Shield {
    SHIELD.get_or_init(|| Shield {
        exit_on_interrupt: Arc::new(AtomicBool::new(true)),
        ..Default::default()
    })
}

/// Registers the SIGINT handlers. Calling it again is a no-op.
pub fn install() -> io::Result<()> {
    let shield = shield();
    let mut depth = shield.lock_depth();
    if depth.is_some() {
        return Ok(());
    }
    flag::register_conditional_shutdown(
        SIGINT,
        INTERRUPTED_EXIT_CODE,
        Arc::clone(&shield.exit_on_interrupt),
    )?;
    flag::register(SIGINT, Arc::clone(&shield.interrupted))?;
    *depth = Some(0);
    log::debug!("Interrupt handlers installed");
    Ok(())
}

/// Runs `wait` with the launcher shielded from Ctrl-C.
///
/// Returns its result and whether an interrupt arrived meanwhile. Without
/// [`install`] this only runs `wait` and never reports an interrupt.
pub fn shielded<T>(wait: impl FnOnce() -> T) -> (T, bool) {
    let shield = shield();
    if !shield.enter() {
        return (wait(), false);
    }
    let result = wait();
    shield.leave();
    (result, shield.interrupted.swap(false, Ordering::SeqCst))
}

impl Shield {
    fn lock_depth(&self) -> MutexGuard<'_, Option<usize>> {
        self.depth.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns `false` when the handlers are not installed.
    fn enter(&self) -> bool {
        let mut guard = self.lock_depth();
        let Some(depth) = guard.as_mut() else {
            return false;
        };
        if *depth == 0 {
            self.interrupted.store(false, Ordering::SeqCst);
            self.exit_on_interrupt.store(false, Ordering::SeqCst);
        }
        *depth += 1;
        true
    }

    fn leave(&self) {
        let mut guard = self.lock_depth();
        if let Some(depth) = guard.as_mut() {
            *depth = depth.saturating_sub(1);
            if *depth == 0 {
                self.exit_on_interrupt.store(true, Ordering::SeqCst);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_interrupt_during_a_child_is_survived_and_reported() {
        install().unwrap();
        install().unwrap();

        let (value, interrupted) = shielded(|| {
            signal_hook::low_level::raise(SIGINT).unwrap();
            7
        });
        assert_eq!(value, 7);
        assert!(interrupted);

        let (_, interrupted) = shielded(|| ());
        assert!(!interrupted);
    }

    #[test]
    fn test_shield_depth_restores_exit_on_interrupt() {
        let shield = Shield {
            exit_on_interrupt: Arc::new(AtomicBool::new(true)),
            ..Default::default()
        };
        assert!(!shield.enter());

        *shield.lock_depth() = Some(0);
        assert!(shield.enter());
        assert!(shield.enter());
        shield.leave();
        assert!(!shield.exit_on_interrupt.load(Ordering::SeqCst));
        shield.leave();
        assert!(shield.exit_on_interrupt.load(Ordering::SeqCst));
    }
}
