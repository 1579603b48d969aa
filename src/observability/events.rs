//! Observable events
//!
//! Events are explicit and typed. Each carries its default severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Dataset read from disk
    DatasetLoaded,
    /// HTTP server listening
    Serving,
    /// HTTP server stopped
    ServerStopped,

    // Filter state
    /// Persisted conditions rehydrated
    StateLoaded,
    /// Conditions persisted
    StateSaved,
    /// Persisted conditions incompatible with the schema were discarded
    StateConditionsDropped,
    /// Persisted payload unreadable, session starts empty
    StateCorrupt,

    // Queries
    /// Query evaluated and page produced
    QueryEvaluated,
    /// Page or count fetch failed
    RemoteFetchFailed,
    /// Superseded result discarded
    StaleResultDropped,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::Serving => "FIELDSIEVE_SERVING",
            Event::ServerStopped => "SERVER_STOPPED",

            Event::StateLoaded => "FILTER_STATE_LOADED",
            Event::StateSaved => "FILTER_STATE_SAVED",
            Event::StateConditionsDropped => "FILTER_STATE_CONDITIONS_DROPPED",
            Event::StateCorrupt => "FILTER_STATE_CORRUPT",

            Event::QueryEvaluated => "QUERY_EVALUATED",
            Event::RemoteFetchFailed => "REMOTE_FETCH_FAILED",
            Event::StaleResultDropped => "STALE_RESULT_DROPPED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::StateSaved | Event::StaleResultDropped => Severity::Trace,
            Event::StateConditionsDropped | Event::StateCorrupt => Severity::Warn,
            Event::RemoteFetchFailed => Severity::Error,
            _ => Severity::Info,
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

    #[test]
    fn test_event_names_unique() {
        let all = [
            Event::ConfigLoaded,
            Event::DatasetLoaded,
            Event::Serving,
            Event::ServerStopped,
            Event::StateLoaded,
            Event::StateSaved,
            Event::StateConditionsDropped,
            Event::StateCorrupt,
            Event::QueryEvaluated,
            Event::RemoteFetchFailed,
            Event::StaleResultDropped,
        ];
        let mut names: Vec<_> = all.iter().map(Event::as_str).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_severities() {
        assert_eq!(Event::RemoteFetchFailed.severity(), Severity::Error);
        assert_eq!(Event::StaleResultDropped.severity(), Severity::Trace);
        assert_eq!(Event::QueryEvaluated.severity(), Severity::Info);
    }
}
