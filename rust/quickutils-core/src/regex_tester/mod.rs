pub mod engine;
pub mod error;
pub mod flags;
pub mod panel;
pub mod protocol;
pub mod render;
pub mod session;
pub mod wasm;

pub use engine::{
    is_valid_regex, test_regex, CompiledPattern, MatchEngine, MatchRecord, MatchRequest,
    MatchResult, NamedGroups,
};
pub use error::PatternError;
pub use flags::RegexFlags;
pub use panel::{PanelAction, PanelSlot};
pub use protocol::{InboundMessage, OutboundMessage, ProtocolError};
pub use render::{MatchView, Segment};
pub use session::{Debouncer, EditOutcome, TesterSession, TesterState};
pub use wasm::RegexTester;

#[cfg(test)]
mod tests;
