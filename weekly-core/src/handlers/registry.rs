//! Handler registry for routing sheets to their processing unit

use super::*;

/// Sheet name to handler routing table
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn SheetHandler>>,
}

impl HandlerRegistry {
    /// An empty registry; every sheet is unrecognized until a handler is added
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler, replacing any handler for the same sheet
    pub fn register(&mut self, handler: Box<dyn SheetHandler>) {
        match self
            .handlers
            .iter_mut()
            .find(|h| h.sheet_name() == handler.sheet_name())
        {
            Some(existing) => *existing = handler,
            None => self.handlers.push(handler),
        }
    }

    /// Builder-style variant of [`register`](Self::register)
    pub fn with(mut self, handler: Box<dyn SheetHandler>) -> Self {
        self.register(handler);
        self
    }

    /// Find the handler for a sheet by exact name
    pub fn get(&self, sheet_name: &str) -> Option<&dyn SheetHandler> {
        self.handlers
            .iter()
            .find(|h| h.sheet_name() == sheet_name)
            .map(|h| &**h)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.sheet_name()).collect()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            handlers: create_default_handlers(),
        }
    }
}

/// Create instances of all built-in handlers
fn create_default_handlers() -> Vec<Box<dyn SheetHandler>> {
    vec![
        Box::new(corext::CorextHandler),
        Box::new(transco_by_source::TranscoBySourceHandler),
        Box::new(transco_by_ref::TranscoByRefHandler),
        Box::new(missing_data::MissingDataHandler),
    ]
}
