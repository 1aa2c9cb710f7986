//! Observability for curvegrid
//!
//! Structured JSON logging of the store's lifecycle. Observability is
//! read-only: it never changes what the store does.
//!
//! ```ignore
//! use curvegrid::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::GridFull, &[("chunk_index", "12")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::GridSaved, &[("path", "/tmp/curve.grid")]);
    }
}
