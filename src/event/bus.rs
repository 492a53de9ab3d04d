use std::cell::RefCell;

use super::{DocumentEvent, EventHandler};

/// A simple event bus for broadcasting document events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: DocumentEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<DocumentEvent>>>);

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &DocumentEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_emit_reaches_all_handlers() {
        let bus = EventBus::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(Box::new(Recorder(first.clone())));
        bus.subscribe(Box::new(Recorder(second.clone())));
        assert_eq!(bus.handler_count(), 2);

        bus.emit(DocumentEvent::Cleared);

        assert_eq!(first.borrow().as_slice(), &[DocumentEvent::Cleared]);
        assert_eq!(second.borrow().as_slice(), &[DocumentEvent::Cleared]);
    }
}
