mod handlers;

use crate::app::{Action, AppState};
use crate::config::keybindings::KeybindingConfig;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

/// Internal event type for terminal events
enum TerminalEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    terminal_rx: mpsc::UnboundedReceiver<TerminalEvent>,
    keybindings: KeybindingConfig,
}

impl EventHandler {
    pub fn new(keybindings: KeybindingConfig) -> Self {
        let (handler, terminal_tx) = Self::with_channels(keybindings);

        // Spawn dedicated thread for terminal events
        std::thread::spawn(move || {
            let poll_timeout = Duration::from_millis(100);
            loop {
                let event = if event::poll(poll_timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                            TerminalEvent::Key(key)
                        }
                        Ok(Event::Resize(w, h)) => TerminalEvent::Resize(w, h),
                        Ok(Event::Paste(data)) => TerminalEvent::Paste(data),
                        _ => TerminalEvent::Tick,
                    }
                } else {
                    TerminalEvent::Tick
                };

                if terminal_tx.send(event).is_err() {
                    break; // Channel closed, exit thread
                }
            }
        });

        handler
    }

    fn with_channels(keybindings: KeybindingConfig) -> (Self, mpsc::UnboundedSender<TerminalEvent>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (terminal_tx, terminal_rx) = mpsc::unbounded_channel();
        let handler = Self {
            action_tx,
            action_rx,
            terminal_rx,
            keybindings,
        };
        (handler, terminal_tx)
    }

    /// Handler with no terminal thread attached
    #[cfg(test)]
    pub(crate) fn detached(keybindings: KeybindingConfig) -> Self {
        Self::with_channels(keybindings).0
    }

    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    fn translate(&self, event: TerminalEvent, state: &AppState) -> Action {
        match event {
            TerminalEvent::Key(key) => self.handle_key_event(key, state),
            TerminalEvent::Paste(data) => Action::Paste(data),
            TerminalEvent::Resize(w, h) => Action::Resize(w, h),
            TerminalEvent::Tick => Action::Tick,
        }
    }

    pub async fn next(&mut self, state: &AppState) -> Result<Action> {
        // Keyboard input is never delayed behind background results
        if let Ok(event) = self.terminal_rx.try_recv() {
            return Ok(self.translate(event, state));
        }
        if let Ok(action) = self.action_rx.try_recv() {
            return Ok(action);
        }

        tokio::select! {
            biased;

            Some(event) = self.terminal_rx.recv() => {
                Ok(self.translate(event, state))
            }
            // Chat replies, poll results, auth resolution
            Some(action) = self.action_rx.recv() => {
                Ok(action)
            }
            else => Ok(Action::Tick)
        }
    }
}
