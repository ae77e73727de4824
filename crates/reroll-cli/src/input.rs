use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use reroll_core::CancelToken;
use tracing::debug;

/// Spawn a thread that cancels the run on Esc, 'q'/'Q', or Ctrl+C.
///
/// The ctrlc handler already covers SIGINT; the keyboard variant is for
/// terminals where a single keypress is more convenient than a signal.
pub fn spawn_keyboard_monitor(cancel: Arc<CancelToken>) -> JoinHandle<()> {
    thread::spawn(move || {
        debug!("Keyboard monitor started");

        while !cancel.is_cancelled() {
            // Poll with a timeout so the thread notices external cancellation.
            if event::poll(Duration::from_millis(100)).unwrap_or(false)
                && let Ok(Event::Key(key_event)) = event::read()
                && is_quit_key(&key_event)
            {
                debug!("Quit key pressed: {:?}", key_event.code);
                cancel.raise();
                break;
            }
        }

        debug!("Keyboard monitor stopped");
    })
}

fn is_quit_key(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}
