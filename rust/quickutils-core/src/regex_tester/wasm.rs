//! JS bindings for the Regex Tester: the `RegexTester` class and panel functions

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::TesterConfig;
use crate::logging::{self, LogLevel};
use crate::regex_tester::engine::{is_valid_regex, MatchResult};
use crate::regex_tester::panel::{self, PanelAction};
use crate::regex_tester::protocol::{dispatch, Envelope, InboundMessage};
use crate::regex_tester::render::{render, MatchView};
use crate::regex_tester::session::{EditOutcome, TesterSession, TesterState};
use crate::regex_tester::MatchRequest;

/// Maps become plain objects so `groups` reads like `{ word: "hi" }` in JS
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn config_from_js(config: JsValue) -> Result<TesterConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(TesterConfig::default());
    }
    let config: TesterConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Decode an inbound webview message and answer it. `null` for ignored types.
fn answer(session: &TesterSession, message: JsValue) -> Result<JsValue, JsValue> {
    let envelope: Envelope = serde_wasm_bindgen::from_value(message)
        .map_err(|e| JsValue::from_str(&format!("Malformed message: {}", e)))?;
    match InboundMessage::from_envelope(envelope).map_err(|e| JsValue::from_str(&e.to_string()))? {
        Some(message) => to_js(&dispatch(session.engine(), message)),
        None => Ok(JsValue::NULL),
    }
}

#[derive(Serialize)]
struct Update<'a> {
    result: &'a MatchResult,
    view: &'a MatchView,
    #[serde(rename = "highlightedHtml")]
    highlighted_html: Option<String>,
    #[serde(rename = "detailsHtml")]
    details_html: String,
}

fn update_to_js(result: &MatchResult, view: &MatchView) -> Result<JsValue, JsValue> {
    to_js(&Update {
        result,
        view,
        highlighted_html: view.highlighted_html(),
        details_html: view.details_html(),
    })
}

// =============================================================================
// RegexTester
// =============================================================================

#[wasm_bindgen]
pub struct RegexTester {
    session: TesterSession,
}

impl Default for RegexTester {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl RegexTester {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: TesterSession::default(),
        }
    }

    /// Create with host settings, e.g. `{ maxMatches: 100, reportTruncation: true }`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<RegexTester, JsValue> {
        Ok(Self {
            session: TesterSession::new(config_from_js(config)?),
        })
    }

    /// Returns `{ matches: [{ match, index, groups? }], error? }`
    #[wasm_bindgen]
    pub fn test(&self, pattern: &str, flags: &str, input: &str) -> Result<JsValue, JsValue> {
        to_js(&self.session.engine().test(pattern, flags, input))
    }

    /// `{ type: "test", payload }` in, `{ type: "result", payload }` out
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, message: JsValue) -> Result<JsValue, JsValue> {
        answer(&self.session, message)
    }

    /// Test and render in one call
    /// Returns `{ result, view, highlightedHtml, detailsHtml }`
    #[wasm_bindgen]
    pub fn render(&self, pattern: &str, flags: &str, input: &str) -> Result<JsValue, JsValue> {
        let request = MatchRequest::new(pattern, flags, input);
        let result = self.session.engine().run(&request);
        let view = render(&request, &result);
        update_to_js(&result, &view)
    }

    /// Record an edit. Returns the cleared view for an empty pattern,
    /// otherwise the debounce deadline (ms).
    #[wasm_bindgen]
    pub fn edit(&mut self, pattern: &str, flags: &str, input: &str) -> Result<JsValue, JsValue> {
        let state = TesterState {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            input: input.to_string(),
        };
        match self.session.edit(js_sys::Date::now(), state) {
            EditOutcome::Scheduled(deadline) => Ok(JsValue::from_f64(deadline)),
            EditOutcome::Cleared(view) => to_js(&view),
        }
    }

    /// Run the debounced test if due; `null` otherwise
    #[wasm_bindgen]
    pub fn poll(&mut self) -> Result<JsValue, JsValue> {
        match self.session.poll(js_sys::Date::now()) {
            Some((result, view)) => update_to_js(&result, &view),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = isPending)]
    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    /// Restore saved `{ pattern, flags, input }`; returns the initial update or `null`
    #[wasm_bindgen]
    pub fn restore(&mut self, state: JsValue) -> Result<JsValue, JsValue> {
        let state: TesterState = if state.is_undefined() || state.is_null() {
            TesterState::default()
        } else {
            serde_wasm_bindgen::from_value(state)
                .map_err(|e| JsValue::from_str(&format!("Invalid state: {}", e)))?
        };
        match self.session.restore(state) {
            Some((result, view)) => update_to_js(&result, &view),
            None => Ok(JsValue::NULL),
        }
    }

    /// Current `{ pattern, flags, input }` for the webview to persist
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.state())
    }
}

// =============================================================================
// Free functions
// =============================================================================

#[wasm_bindgen(js_name = isValidRegex)]
pub fn js_is_valid_regex(pattern: &str, flags: Option<String>) -> bool {
    is_valid_regex(pattern, flags.as_deref().unwrap_or(""))
}

#[wasm_bindgen(js_name = setLogLevel)]
pub fn js_set_log_level(level: &str) -> Result<(), JsValue> {
    let level = LogLevel::parse(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logging::set_level(level);
    Ok(())
}

/// Open the tester panel or reveal the open one. Returns true if created.
#[wasm_bindgen(js_name = openRegexTester)]
pub fn js_open_regex_tester(config: JsValue) -> Result<bool, JsValue> {
    let config = config_from_js(config)?;
    Ok(panel::open_tester_panel(config) == PanelAction::Created)
}

#[wasm_bindgen(js_name = closeRegexTester)]
pub fn js_close_regex_tester() -> bool {
    panel::close_tester_panel()
}

#[wasm_bindgen(js_name = isRegexTesterOpen)]
pub fn js_is_regex_tester_open() -> bool {
    panel::is_tester_panel_open()
}

/// Route a webview message to the open panel
#[wasm_bindgen(js_name = postToRegexTester)]
pub fn js_post_to_regex_tester(message: JsValue) -> Result<JsValue, JsValue> {
    panel::with_tester_panel(|session| answer(session, message))
        .unwrap_or_else(|| Err(JsValue::from_str("Regex Tester is not open")))
}
