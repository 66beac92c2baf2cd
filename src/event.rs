use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::error::{AppError, Result};

/// Application events.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Periodic tick for rendering and status-message expiry.
    Tick,
    #[allow(dead_code)]
    Resize(u16, u16),
}

/// Async event pump over crossterm input.
///
/// Events are delivered through a channel and consumed one at a time, so every
/// select/toggle intent runs to completion before the next is looked at.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawn the pump. `tick_rate` bounds how long the poll blocks before a
    /// `Tick` is emitted.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            loop {
                let next = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    },
                    Ok(false) => Some(Event::Tick),
                    Err(_) => None,
                };
                if let Some(ev) = next {
                    if tx.send(ev).is_err() {
                        break; // receiver gone, app is shutting down
                    }
                }
            }
        });
        Self { rx }
    }

    /// Receive the next event, waiting until one arrives.
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| AppError::Terminal("event channel closed".into()))
    }
}
