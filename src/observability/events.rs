//! Lifecycle events emitted by rosterd
//!
//! Boot and serving milestones are typed so call sites cannot drift on
//! spelling. Per-request diagnostics (list/insert lines) are free-form
//! and go through `Logger` directly.

use std::fmt;

/// Milestones of the process lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Process entered startup
    BootStart,
    /// Config file parsed and validated
    ConfigLoaded,
    /// Record log replayed into memory
    StoreOpened,
    /// Startup finished, server about to bind
    BootComplete,
    /// Listener bound and accepting requests
    Serving,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "ROSTERD_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::BootComplete => "ROSTERD_STARTUP_COMPLETE",
            Event::Serving => "ROSTERD_SERVING",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Event; 5] = [
        Event::BootStart,
        Event::ConfigLoaded,
        Event::StoreOpened,
        Event::BootComplete,
        Event::Serving,
    ];

    #[test]
    fn test_event_strings_are_distinct() {
        let mut names: Vec<&str> = ALL.iter().map(Event::as_str).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_display_matches_as_str() {
        for event in ALL {
            assert_eq!(event.to_string(), event.as_str());
        }
    }
}
