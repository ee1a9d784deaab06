//! Observability subsystem for rosterd
//!
//! Structured JSON logging plus the typed lifecycle events of boot and
//! serving. Logging never affects request handling: output is written
//! synchronously on the calling thread, with a fixed key order and no
//! timestamps, so a given call always produces the same bytes.
//!
//! ```ignore
//! use rosterd::observability::{log_event, Event, Logger};
//!
//! log_event(Event::BootStart);
//! Logger::info("STUDENT_INSERTED", &[("inserted_id", "…")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Emit a lifecycle event at INFO with no fields.
pub fn log_event(event: Event) {
    Logger::info(event.as_str(), &[]);
}

/// Emit a lifecycle event at INFO with context fields.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::info(event.as_str(), fields);
}
