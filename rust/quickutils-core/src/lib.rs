//! Quick Utils Core: Regex Tester engine
//!
//! Rust/WASM backend for the Quick Utils editor extension's Regex Tester
//! panel. The extension host forwards webview messages here and posts the
//! answers back.
//!
//! # Architecture
//! - `regex_tester/engine.rs` - MatchEngine: compile + execute, capped match list
//! - `regex_tester/flags.rs` - Flag letters (`dgimsuvy`)
//! - `regex_tester/protocol.rs` - `test` / `result` webview messages
//! - `regex_tester/render.rs` - Badge, highlighted text and detail list
//! - `regex_tester/session.rs` - Persisted fields + 300ms edit debounce
//! - `regex_tester/panel.rs` - Single open panel (create-or-reveal)
//! - `regex_tester/wasm.rs` - JS bindings
//! - `config.rs` - Settings and defaults
//! - `logging.rs` - `log` facade to the developer console
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { RegexTester } from 'quickutils-core';
//!
//! await init();
//!
//! const tester = new RegexTester();
//! const result = tester.test('(?<word>\\w+)', 'g', 'hi there');
//! // { matches: [{ match: 'hi', index: 0, groups: { word: 'hi' } },
//! //             { match: 'there', index: 3, groups: { word: 'there' } }] }
//!
//! // Or answer webview messages directly
//! panel.onMessage((msg) => panel.postMessage(tester.handleMessage(msg)));
//! ```

pub mod config;
pub mod logging;
pub mod regex_tester;

pub use config::*;
pub use regex_tester::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(logging::LogLevel::default());
    log::debug!("quickutils-core v{} loaded", env!("CARGO_PKG_VERSION"));
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("quickutils-core v{}", env!("CARGO_PKG_VERSION"))
}
