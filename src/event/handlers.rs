use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{CanvasEvent, EventHandler};

/// Writes every event to the log at info level
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: &CanvasEvent) {
        match event {
            CanvasEvent::ToolChanged { old, new } => log::info!("Selected tool: {} (was {})", new, old),
            CanvasEvent::Cleared => log::info!("Canvas cleared"),
            CanvasEvent::SplashStamped { at, pixels } => {
                log::info!("Splash at ({:.1}, {:.1}) painted {} pixels", at.x, at.y, pixels)
            }
            other => log::debug!("{:?}", other),
        }
    }
}

/// Keeps a shared copy of every event it receives.
///
/// Clones share the same storage, so one clone can be subscribed while
/// another is kept around to inspect what happened.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<CanvasEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CanvasEvent> {
        self.events.lock().clone()
    }

    pub fn last(&self) -> Option<CanvasEvent> {
        self.events.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventHandler for EventRecorder {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Remembers only the most recent event, for status displays.
#[derive(Debug, Clone, Default)]
pub struct LatestEvent {
    latest: Arc<Mutex<Option<CanvasEvent>>>,
}

impl LatestEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<CanvasEvent> {
        self.latest.lock().clone()
    }
}

impl EventHandler for LatestEvent {
    fn handle_event(&mut self, event: &CanvasEvent) {
        *self.latest.lock() = Some(event.clone());
    }
}
