mod bus;
mod events;

pub use bus::EventBus;
pub use events::DocumentEvent;

/// Observer of document changes
pub trait EventHandler {
    fn handle_event(&mut self, event: &DocumentEvent);
}

/// Writes every document event to the log at debug level
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &DocumentEvent) {
        log::debug!("Document event: {:?}", event);
    }
}
