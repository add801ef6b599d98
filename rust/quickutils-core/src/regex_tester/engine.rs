//! Match Engine - executes a pattern against test input
//!
//! Maps a `(pattern, flags, input)` triple to a `MatchResult`. The engine is a
//! total function: compile failures are reported through `MatchResult::error`
//! and nothing escapes as a panic or `Err`.
//!
//! # Execution
//! - Empty pattern: `{ matches: [] }` without compiling.
//! - `g` (find all): scan forward from offset 0, recording every match. A
//!   zero-length match bumps the scan position one character past its end so
//!   the loop always terminates. Stops at `max_matches` records.
//! - otherwise: a single leftmost search.
//! - `y` (sticky): a match only counts if it starts at the scan position.
//!
//! Offsets are reported in UTF-16 code units, the unit the webview indexes
//! its text with.
//!
//! # Dialect
//! `\d`, `\w` and `\b` are ASCII-only, and `\r` ends a line for `^`, `$` and
//! `.` just as `\n` does.

use std::borrow::Cow;

use indexmap::IndexMap;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::error::PatternError;
use super::flags::RegexFlags;
use crate::config::TesterConfig;

// =============================================================================
// Types
// =============================================================================

/// A test request from the webview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRequest {
    pub pattern: String,
    pub flags: String,
    pub input: String,
}

impl MatchRequest {
    pub fn new(
        pattern: impl Into<String>,
        flags: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            flags: flags.into(),
            input: input.into(),
        }
    }
}

/// Named captures of one match, in pattern order
pub type NamedGroups = IndexMap<String, String>;

/// A single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Matched substring
    #[serde(rename = "match")]
    pub text: String,
    /// UTF-16 offset of the match start
    #[serde(rename = "index")]
    pub start_offset: usize,
    /// Participating named groups; absent when none participated
    #[serde(rename = "groups", default, skip_serializing_if = "Option::is_none")]
    pub named_groups: Option<NamedGroups>,
}

impl MatchRecord {
    /// Length of the matched text in UTF-16 code units
    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.text)
    }

    pub fn end_offset(&self) -> usize {
        self.start_offset + self.len_utf16()
    }
}

/// Outcome of one test run
///
/// `matches` is always present. When `error` is set, `matches` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<MatchRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Only emitted when `reportTruncation` is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

impl MatchResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            matches: Vec::new(),
            error: Some(message.into()),
            truncated: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

// =============================================================================
// CompiledPattern
// =============================================================================

/// A pattern compiled together with its flags
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    flags: RegexFlags,
    group_names: Vec<String>,
}

impl CompiledPattern {
    pub fn compile(pattern: &str, flags: &str, size_limit: usize) -> Result<Self, PatternError> {
        let flags = RegexFlags::parse(flags)?;

        let source = ascii_escapes(pattern, flags);
        let regex = match build(&source, flags, size_limit) {
            Ok(regex) => regex,
            // report errors against the pattern as written
            Err(err) => {
                let err = build(pattern, flags, size_limit).err().unwrap_or(err);
                return Err(err.into());
            }
        };

        let group_names = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        Ok(Self {
            regex,
            flags,
            group_names,
        })
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }

    /// Next accepted match at or after byte position `at`
    fn captures_from<'h>(&self, input: &'h str, at: usize) -> Option<Captures<'h>> {
        let caps = self.regex.captures_at(input, at)?;
        let start = caps.get(0)?.start();
        if self.flags.sticky && start != at {
            return None;
        }
        Some(caps)
    }

    fn named_groups(&self, caps: &Captures<'_>) -> Option<NamedGroups> {
        let groups: NamedGroups = self
            .group_names
            .iter()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();

        if groups.is_empty() {
            None
        } else {
            Some(groups)
        }
    }
}

// =============================================================================
// MatchEngine
// =============================================================================

/// Runs test requests under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: TesterConfig,
}

impl MatchEngine {
    pub fn new(config: TesterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub fn run(&self, request: &MatchRequest) -> MatchResult {
        self.test(&request.pattern, &request.flags, &request.input)
    }

    pub fn test(&self, pattern: &str, flags: &str, input: &str) -> MatchResult {
        if pattern.is_empty() {
            return MatchResult::empty();
        }

        let compiled = match CompiledPattern::compile(pattern, flags, self.config.size_limit) {
            Ok(compiled) => compiled,
            Err(e) => {
                log::debug!("pattern /{}/{} rejected: {}", pattern, flags, e);
                return MatchResult::failed(e.to_string());
            }
        };

        let started = instant::Instant::now();
        let result = self.execute(&compiled, input);
        log::trace!(
            "/{}/{} -> {} match(es) in {}us",
            pattern,
            compiled.flags(),
            result.matches.len(),
            started.elapsed().as_micros()
        );
        result
    }

    /// Run an already compiled pattern
    pub fn execute(&self, compiled: &CompiledPattern, input: &str) -> MatchResult {
        let mut offsets = Utf16Cursor::default();

        if !compiled.flags().find_all() {
            let matches = compiled
                .captures_from(input, 0)
                .map(|caps| record(compiled, &caps, input, &mut offsets))
                .into_iter()
                .collect();
            return MatchResult {
                matches,
                error: None,
                truncated: self.config.report_truncation.then_some(false),
            };
        }

        let cap = self.config.max_matches;
        let mut matches = Vec::new();
        let mut pos = 0usize;
        let mut truncated = false;

        while pos <= input.len() {
            let Some(caps) = compiled.captures_from(input, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if matches.len() >= cap {
                truncated = true;
                break;
            }

            matches.push(record(compiled, &caps, input, &mut offsets));

            pos = if whole.start() == whole.end() {
                next_char_boundary(input, whole.end())
            } else {
                whole.end()
            };

            // Without reporting there is no reason to look past the cap
            if matches.len() >= cap && !self.config.report_truncation {
                break;
            }
        }

        if truncated {
            log::debug!("match list truncated at {} records", cap);
        }

        MatchResult {
            matches,
            error: None,
            truncated: self.config.report_truncation.then_some(truncated),
        }
    }
}

/// Test with the default configuration
pub fn test_regex(pattern: &str, flags: &str, input: &str) -> MatchResult {
    MatchEngine::default().test(pattern, flags, input)
}

/// True if `(pattern, flags)` compiles
pub fn is_valid_regex(pattern: &str, flags: &str) -> bool {
    CompiledPattern::compile(pattern, flags, TesterConfig::default().size_limit).is_ok()
}

// =============================================================================
// Pattern translation
// =============================================================================

fn build(source: &str, flags: RegexFlags, size_limit: usize) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(flags.ignore_case)
        .multi_line(flags.multiline)
        .dot_matches_new_line(flags.dot_all)
        .crlf(true)
        .size_limit(size_limit)
        .build()
}

/// Rewrite the `\d \D \w \W \b \B` escapes to their ASCII meanings.
///
/// Bracketed replacements nest inside character classes, where `\b` is left
/// alone. Under `i` without `u`/`v`, word classes stay out of case folding so
/// `ſ` and `K` (U+212A) do not fold into them.
fn ascii_escapes(pattern: &str, flags: RegexFlags) -> Cow<'_, str> {
    if !pattern.contains('\\') {
        return Cow::Borrowed(pattern);
    }
    let pin_case = flags.ignore_case && !(flags.unicode || flags.unicode_sets);

    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escaped) = chars.next() else {
                    out.push(c);
                    break;
                };
                // `\b{start}` and friends keep their own meaning
                let braced = matches!(escaped, 'b' | 'B') && chars.peek() == Some(&'{');
                match ascii_escape(escaped, class_depth > 0, pin_case) {
                    Some(replacement) if !braced => out.push_str(replacement),
                    _ => {
                        out.push(c);
                        out.push(escaped);
                    }
                }
            }
            '[' => {
                class_depth += 1;
                out.push(c);
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                // a leading `]` is a literal
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn ascii_escape(escaped: char, in_class: bool, pin_case: bool) -> Option<&'static str> {
    let replacement = match escaped {
        'd' => "[0-9]",
        'D' => "[^0-9]",
        'w' if pin_case && !in_class => "(?-i:[0-9A-Za-z_])",
        'W' if pin_case && !in_class => "(?-i:[^0-9A-Za-z_])",
        'w' => "[0-9A-Za-z_]",
        'W' => "[^0-9A-Za-z_]",
        'b' if !in_class => r"(?-u:\b)",
        'B' if !in_class => r"(?-u:\B)",
        _ => return None,
    };
    Some(replacement)
}

// =============================================================================
// Offsets
// =============================================================================

fn record(
    compiled: &CompiledPattern,
    caps: &Captures<'_>,
    input: &str,
    offsets: &mut Utf16Cursor,
) -> MatchRecord {
    // group 0 always participates in a successful match
    let (start, text) = caps
        .get(0)
        .map(|m| (m.start(), m.as_str()))
        .unwrap_or((0, ""));

    MatchRecord {
        text: text.to_string(),
        start_offset: offsets.advance_to(input, start),
        named_groups: compiled.named_groups(caps),
    }
}

/// Byte offset one character past `at` (or past the end of input)
fn next_char_boundary(input: &str, at: usize) -> usize {
    at + input[at..].chars().next().map_or(1, char::len_utf8)
}

pub(crate) fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Converts ascending byte offsets to UTF-16 offsets in one forward pass
#[derive(Debug, Default)]
pub(crate) struct Utf16Cursor {
    byte: usize,
    unit: usize,
}

impl Utf16Cursor {
    /// `byte` must be a char boundary at or after the previous call's
    pub(crate) fn advance_to(&mut self, text: &str, byte: usize) -> usize {
        if byte < self.byte {
            *self = Utf16Cursor::default();
        }
        self.unit += utf16_len(&text[self.byte..byte]);
        self.byte = byte;
        self.unit
    }
}

// =============================================================================
// Tests
// =============================================================================
