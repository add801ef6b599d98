//! Webview message protocol
//!
//! Request:  `{ "type": "test", "payload": { "pattern", "flags", "input" } }`
//! Response: `{ "type": "result", "payload": { "matches": [...], "error"? } }`
//!
//! Messages with any other `type` are ignored and produce no response.

use serde::{Deserialize, Serialize};

use super::engine::{MatchEngine, MatchRequest, MatchResult};

pub const TEST_MESSAGE: &str = "test";
pub const RESULT_MESSAGE: &str = "result";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// Not a `{ type, payload }` envelope
    Malformed(String),
    /// Known message type with a payload of the wrong shape
    InvalidPayload { kind: String, message: String },
    Encode(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::Malformed(msg) => write!(f, "Malformed message: {}", msg),
            ProtocolError::InvalidPayload { kind, message } => {
                write!(f, "Invalid payload for '{}' message: {}", kind, message)
            }
            ProtocolError::Encode(msg) => write!(f, "Failed to encode response: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

// =============================================================================
// Messages
// =============================================================================

/// Untyped envelope, used to skip unknown message types
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Messages sent by the webview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum InboundMessage {
    Test(MatchRequest),
}

/// Messages sent back to the webview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum OutboundMessage {
    Result(MatchResult),
}

impl InboundMessage {
    /// Interpret an envelope. `Ok(None)` means "not for us".
    pub fn from_envelope(envelope: Envelope) -> Result<Option<Self>, ProtocolError> {
        match envelope.kind.as_str() {
            TEST_MESSAGE => {
                let request: MatchRequest = serde_json::from_value(envelope.payload)
                    .map_err(|e| ProtocolError::InvalidPayload {
                        kind: envelope.kind.clone(),
                        message: e.to_string(),
                    })?;
                Ok(Some(InboundMessage::Test(request)))
            }
            other => {
                log::debug!("ignoring webview message of type '{}'", other);
                Ok(None)
            }
        }
    }

    pub fn decode(raw: &str) -> Result<Option<Self>, ProtocolError> {
        let envelope: Envelope =
            serde_json::from_str(raw).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        Self::from_envelope(envelope)
    }
}

impl OutboundMessage {
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }

    pub fn result(&self) -> &MatchResult {
        match self {
            OutboundMessage::Result(result) => result,
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Answer one inbound message
pub fn dispatch(engine: &MatchEngine, message: InboundMessage) -> OutboundMessage {
    match message {
        InboundMessage::Test(request) => OutboundMessage::Result(engine.run(&request)),
    }
}

/// Decode, run and encode in one step. `Ok(None)` for ignored messages.
pub fn handle_json(engine: &MatchEngine, raw: &str) -> Result<Option<String>, ProtocolError> {
    match InboundMessage::decode(raw)? {
        Some(message) => dispatch(engine, message).encode().map(Some),
        None => Ok(None),
    }
}
