//! Tester session: persisted field state and edit debouncing
//!
//! The webview saves the last `(pattern, flags, input)` triple so the panel
//! comes back as it was left. Edits are debounced: every keystroke replaces
//! the pending request and pushes its deadline out by `debounce_ms`, so only
//! the last edit of a burst reaches the engine.
//!
//! Time is passed in explicitly (milliseconds, host clock) so the session
//! stays deterministic and testable.

use serde::{Deserialize, Serialize};

use super::engine::{MatchEngine, MatchRequest, MatchResult};
use super::render::{render, MatchView};
use crate::config::TesterConfig;
use crate::logging;

// =============================================================================
// TesterState
// =============================================================================

/// The three input fields, as persisted by the webview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterState {
    pub pattern: String,
    pub flags: String,
    pub input: String,
}

impl TesterState {
    /// Restore saved state. Missing or null fields come back empty.
    pub fn restore(json: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(json).ok()?;
        if !value.is_object() {
            return None;
        }
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Some(Self {
            pattern: field("pattern"),
            flags: field("flags"),
            input: field("input"),
        })
    }

    /// A restored panel re-runs its test only if there is a pattern
    pub fn should_test_on_load(&self) -> bool {
        !self.pattern.is_empty()
    }

    pub fn to_request(&self) -> MatchRequest {
        MatchRequest::new(&self.pattern, &self.flags, &self.input)
    }
}

impl From<MatchRequest> for TesterState {
    fn from(request: MatchRequest) -> Self {
        Self {
            pattern: request.pattern,
            flags: request.flags,
            input: request.input,
        }
    }
}

// =============================================================================
// Debouncer
// =============================================================================

/// Trailing-edge debounce of match requests
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    pending: Option<(f64, MatchRequest)>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Schedule `request`, superseding anything still pending
    pub fn schedule(&mut self, now_ms: f64, request: MatchRequest) {
        self.pending = Some((now_ms + self.delay_ms, request));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Take the pending request once its quiet period has elapsed
    pub fn poll(&mut self, now_ms: f64) -> Option<MatchRequest> {
        let due = matches!(&self.pending, Some((deadline, _)) if now_ms >= *deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|(_, request)| request)
    }
}

// =============================================================================
// TesterSession
// =============================================================================

/// What an edit did
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Test scheduled for the given deadline
    Scheduled(f64),
    /// Pattern emptied: view cleared, nothing scheduled
    Cleared(MatchView),
}

/// One open tester panel
#[derive(Debug, Clone)]
pub struct TesterSession {
    engine: MatchEngine,
    debouncer: Debouncer,
    state: TesterState,
}

impl Default for TesterSession {
    fn default() -> Self {
        Self::new(TesterConfig::default())
    }
}

impl TesterSession {
    /// The config's `log_level` becomes the process-wide log level
    pub fn new(config: TesterConfig) -> Self {
        logging::set_level(config.log_level);
        let debouncer = Debouncer::new(config.debounce_ms);
        Self {
            engine: MatchEngine::new(config),
            debouncer,
            state: TesterState::default(),
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn state(&self) -> &TesterState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record an edit to any of the three fields
    pub fn edit(&mut self, now_ms: f64, state: TesterState) -> EditOutcome {
        self.state = state;
        if self.state.pattern.is_empty() {
            self.debouncer.cancel();
            return EditOutcome::Cleared(MatchView::Cleared);
        }
        self.debouncer.schedule(now_ms, self.state.to_request());
        EditOutcome::Scheduled(now_ms + self.engine.config().debounce_ms)
    }

    /// Run the pending test if its quiet period has elapsed
    pub fn poll(&mut self, now_ms: f64) -> Option<(MatchResult, MatchView)> {
        let request = self.debouncer.poll(now_ms)?;
        Some(self.run(&request))
    }

    /// Restore saved state; returns the initial view when a test is due
    pub fn restore(&mut self, state: TesterState) -> Option<(MatchResult, MatchView)> {
        self.debouncer.cancel();
        self.state = state;
        if !self.state.should_test_on_load() {
            return None;
        }
        let request = self.state.to_request();
        Some(self.run(&request))
    }

    fn run(&self, request: &MatchRequest) -> (MatchResult, MatchView) {
        let result = self.engine.run(request);
        let view = render(request, &result);
        (result, view)
    }
}
