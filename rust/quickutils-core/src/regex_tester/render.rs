//! Result rendering for the Regex Tester webview
//!
//! Turns a `MatchResult` into what the panel shows:
//! - error text, or
//! - a "no match" indicator, or
//! - a count badge, the input with every match highlighted, and a detail list.
//!
//! The view model is serializable so the webview can paint it directly; the
//! `*_html` helpers produce escaped markup for hosts that just set innerHTML.

use serde::Serialize;

use super::engine::{MatchRecord, MatchRequest, MatchResult};

/// Badge switches to "100+" from this count on
pub const BADGE_SATURATION: usize = 100;

// =============================================================================
// Types
// =============================================================================

/// A run of the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Mark(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupItem {
    pub name: String,
    pub value: String,
}

/// One row of the detail list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchItem {
    /// 1-based position in the match list
    pub ordinal: usize,
    pub text: String,
    pub offset: usize,
    pub groups: Vec<GroupItem>,
}

/// What the panel should display for one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchView {
    /// Empty pattern: nothing shown, nothing sent
    Cleared,
    Error {
        message: String,
    },
    NoMatch,
    Matches {
        badge: String,
        /// Empty when the input is empty
        highlighted: Vec<Segment>,
        items: Vec<MatchItem>,
    },
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render(request: &MatchRequest, result: &MatchResult) -> MatchView {
    if request.pattern.is_empty() {
        return MatchView::Cleared;
    }
    render_result(&request.input, result)
}

pub fn render_result(input: &str, result: &MatchResult) -> MatchView {
    if let Some(message) = &result.error {
        return MatchView::Error {
            message: message.clone(),
        };
    }
    if result.matches.is_empty() {
        return MatchView::NoMatch;
    }

    MatchView::Matches {
        badge: badge(result.matches.len()),
        highlighted: highlight(input, &result.matches),
        items: result
            .matches
            .iter()
            .enumerate()
            .map(|(i, m)| MatchItem {
                ordinal: i + 1,
                text: m.text.clone(),
                offset: m.start_offset,
                groups: m
                    .named_groups
                    .iter()
                    .flatten()
                    .map(|(name, value)| GroupItem {
                        name: name.clone(),
                        value: value.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn badge(count: usize) -> String {
    if count >= BADGE_SATURATION {
        format!("{}+ matches", BADGE_SATURATION)
    } else if count == 1 {
        "1 match".to_string()
    } else {
        format!("{} matches", count)
    }
}

/// Split `input` into plain gaps and highlighted matches, in match order
pub fn highlight(input: &str, matches: &[MatchRecord]) -> Vec<Segment> {
    if input.is_empty() || matches.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = UnitCursor::default();
    let mut last = 0usize;

    for m in matches {
        let start = cursor.seek(input, m.start_offset);
        if start > last {
            segments.push(Segment::Plain(input[last..start].to_string()));
        }
        segments.push(Segment::Mark(m.text.clone()));
        last = cursor.seek(input, m.end_offset());
    }

    if last < input.len() {
        segments.push(Segment::Plain(input[last..].to_string()));
    }

    segments
}

/// UTF-16 offset to byte offset, forward-only
#[derive(Debug, Default)]
struct UnitCursor {
    byte: usize,
    unit: usize,
}

impl UnitCursor {
    /// Offsets inside a surrogate pair round down to the pair's start
    fn seek(&mut self, text: &str, unit: usize) -> usize {
        if unit < self.unit {
            *self = UnitCursor::default();
        }
        for c in text[self.byte..].chars() {
            let width = c.len_utf16();
            if self.unit + width > unit {
                break;
            }
            self.unit += width;
            self.byte += c.len_utf8();
        }
        self.byte
    }
}

// =============================================================================
// HTML
// =============================================================================

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn segments_html(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => escape_html(text),
            Segment::Mark(text) => format!("<mark>{}</mark>", escape_html(text)),
        })
        .collect()
}

pub fn items_html(items: &[MatchItem]) -> String {
    items
        .iter()
        .map(|item| {
            let groups = if item.groups.is_empty() {
                String::new()
            } else {
                let pairs: Vec<String> = item
                    .groups
                    .iter()
                    .map(|g| format!("<code>{}</code>: \"{}\"", escape_html(&g.name), escape_html(&g.value)))
                    .collect();
                format!("<div class=\"match-groups\">Groups: {}</div>", pairs.join(", "))
            };
            format!(
                "<div class=\"match-item\"><span class=\"match-index\">#{}</span><span class=\"match\">{}</span><span class=\"match-offset\">index {}</span>{}</div>",
                item.ordinal,
                escape_html(&item.text),
                item.offset,
                groups
            )
        })
        .collect()
}

impl MatchView {
    pub fn badge(&self) -> Option<&str> {
        match self {
            MatchView::Matches { badge, .. } => Some(badge.as_str()),
            _ => None,
        }
    }

    /// Markup for the highlighted-text pane; `None` when it should be hidden
    pub fn highlighted_html(&self) -> Option<String> {
        match self {
            MatchView::Matches { highlighted, .. } if !highlighted.is_empty() => {
                Some(segments_html(highlighted))
            }
            _ => None,
        }
    }

    /// Markup for the match list; empty unless there are matches
    pub fn details_html(&self) -> String {
        match self {
            MatchView::Matches { items, .. } => items_html(items),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cursor_surrogates() {
        let text = "a😀b";
        let mut cursor = UnitCursor::default();
        assert_eq!(cursor.seek(text, 1), 1);
        assert_eq!(cursor.seek(text, 3), 5);
        assert_eq!(cursor.seek(text, 4), 6);
        // past the end clamps to the length
        assert_eq!(cursor.seek(text, 10), 6);
    }

    #[test]
    fn test_unit_cursor_inside_pair_rounds_down() {
        let mut cursor = UnitCursor::default();
        assert_eq!(cursor.seek("a😀b", 2), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
