use crate::config::TesterConfig;
use crate::regex_tester::engine::{is_valid_regex, test_regex, MatchEngine, MatchRecord, MatchResult};

fn spans(result: &MatchResult) -> Vec<(&str, usize)> {
    result
        .matches
        .iter()
        .map(|m| (m.text.as_str(), m.start_offset))
        .collect()
}

fn group<'a>(record: &'a MatchRecord, name: &str) -> Option<&'a str> {
    record
        .named_groups
        .as_ref()
        .and_then(|groups| groups.get(name))
        .map(String::as_str)
}

// ==================== EMPTY PATTERN ====================

#[test]
fn test_empty_pattern_is_empty_result() {
    let result = test_regex("", "g", "anything");
    assert_eq!(result, MatchResult::empty());
    assert!(!result.is_error());
}

#[test]
fn test_empty_pattern_skips_flag_validation() {
    let result = test_regex("", "zz", "x");
    assert!(result.matches.is_empty());
    assert!(result.error.is_none());
}

// ==================== SCENARIOS ====================

#[test]
fn test_global_runs_of_a() {
    let result = test_regex("a+", "g", "aabaaab");
    assert_eq!(spans(&result), vec![("aa", 0), ("aaa", 3)]);
    assert!(result.error.is_none());
    assert!(result.truncated.is_none());
}

#[test]
fn test_global_named_word_groups() {
    let result = test_regex(r"(?<word>\w+)", "g", "hi there");
    assert_eq!(spans(&result), vec![("hi", 0), ("there", 3)]);
    assert_eq!(group(&result.matches[0], "word"), Some("hi"));
    assert_eq!(group(&result.matches[1], "word"), Some("there"));
}

#[test]
fn test_unclosed_class_is_error() {
    let result = test_regex("[", "", "x");
    assert!(result.matches.is_empty());
    let message = result.error.expect("compile error expected");
    assert!(!message.is_empty());
}

#[test]
fn test_zero_length_matches_advance() {
    let result = test_regex("x*", "g", "abc");
    assert_eq!(spans(&result), vec![("", 0), ("", 1), ("", 2), ("", 3)]);
}

// ==================== SINGLE MATCH MODE ====================

#[test]
fn test_without_global_returns_first_match() {
    let result = test_regex("a+", "", "baaa aa");
    assert_eq!(spans(&result), vec![("aaa", 1)]);
}

#[test]
fn test_without_global_leftmost_wins() {
    let result = test_regex("b+|a", "", "aab bb");
    assert_eq!(spans(&result), vec![("a", 0)]);
}

#[test]
fn test_no_match_is_not_an_error() {
    let result = test_regex("z", "", "abc");
    assert!(result.matches.is_empty());
    assert!(result.error.is_none());
}

// ==================== FIND-ALL ====================

#[test]
fn test_empty_match_after_nonempty_match() {
    let result = test_regex("a*", "g", "aab");
    assert_eq!(spans(&result), vec![("aa", 0), ("", 2), ("", 3)]);
}

#[test]
fn test_offsets_strictly_increase() {
    let result = test_regex(r"\d*", "g", "12a3bb45");
    let offsets: Vec<usize> = result.matches.iter().map(|m| m.start_offset).collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{:?}", offsets);
}

#[test]
fn test_zero_length_count_is_len_plus_one() {
    let result = test_regex("x*", "g", "hello");
    assert_eq!(result.len(), 6);
    for (i, m) in result.matches.iter().enumerate() {
        assert_eq!(m.start_offset, i);
        assert!(m.text.is_empty());
    }
}

#[test]
fn test_zero_length_capped_at_100() {
    let input = "a".repeat(150);
    let result = test_regex("x*", "g", &input);
    assert_eq!(result.len(), 100);
    assert_eq!(result.matches[99].start_offset, 99);
}

#[test]
fn test_cap_drops_extra_matches_silently() {
    let input = "a".repeat(250);
    let result = test_regex("a", "g", &input);
    assert_eq!(result.len(), 100);
    assert_eq!(result.matches.last().map(|m| m.start_offset), Some(99));
    assert!(result.truncated.is_none());
    assert!(result.error.is_none());
}

#[test]
fn test_word_boundary_sees_text_before_scan_position() {
    // the second scan starts at 1, right after a word character
    let result = test_regex(r"\bb", "g", "bb b");
    assert_eq!(spans(&result), vec![("b", 0), ("b", 3)]);
}

// ==================== NAMED GROUPS ====================

#[test]
fn test_non_participating_group_is_omitted() {
    let result = test_regex(r"(?<sign>-)?\d", "g", "1-2");
    assert_eq!(spans(&result), vec![("1", 0), ("-2", 1)]);
    assert!(result.matches[0].named_groups.is_none());
    assert_eq!(group(&result.matches[1], "sign"), Some("-"));
}

#[test]
fn test_alternation_groups_only_carry_the_taken_branch() {
    let result = test_regex(r"(?<letter>[a-z])|(?<digit>\d)", "g", "a1");
    let first = result.matches[0].named_groups.as_ref().unwrap();
    assert_eq!(first.get("letter").map(String::as_str), Some("a"));
    assert!(!first.contains_key("digit"));

    let second = result.matches[1].named_groups.as_ref().unwrap();
    assert_eq!(second.get("digit").map(String::as_str), Some("1"));
    assert!(!second.contains_key("letter"));
}

#[test]
fn test_groups_keep_pattern_order() {
    let result = test_regex(r"(?<z>a)(?<a>b)", "", "ab");
    let names: Vec<&str> = result.matches[0]
        .named_groups
        .as_ref()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["z", "a"]);
}

#[test]
fn test_unnamed_groups_are_not_reported() {
    let result = test_regex(r"(a)(b)", "", "ab");
    assert!(result.matches[0].named_groups.is_none());
}

#[test]
fn test_empty_capture_is_kept() {
    let result = test_regex(r"a(?<tail>b*)", "", "a");
    assert_eq!(group(&result.matches[0], "tail"), Some(""));
}

// ==================== FLAGS ====================

#[test]
fn test_case_insensitive() {
    let result = test_regex("abc", "i", "xABC");
    assert_eq!(spans(&result), vec![("ABC", 1)]);
}

#[test]
fn test_multiline_anchors() {
    assert!(test_regex("^b", "g", "a\nb").is_empty());
    let result = test_regex("^b", "gm", "a\nb");
    assert_eq!(spans(&result), vec![("b", 2)]);
}

#[test]
fn test_dot_all() {
    assert!(test_regex("a.b", "", "a\nb").is_empty());
    assert_eq!(test_regex("a.b", "s", "a\nb").len(), 1);
}

#[test]
fn test_sticky_single_requires_match_at_start() {
    assert!(test_regex("a", "y", "ba").is_empty());
    assert_eq!(spans(&test_regex("a", "y", "ab")), vec![("a", 0)]);
}

#[test]
fn test_sticky_global_stops_at_first_gap() {
    let result = test_regex("a", "gy", "aaba");
    assert_eq!(spans(&result), vec![("a", 0), ("a", 1)]);
}

#[test]
fn test_invalid_flags_are_errors() {
    for flags in ["x", "gg", "uv"] {
        let result = test_regex("a", flags, "a");
        assert!(result.matches.is_empty(), "flags {:?}", flags);
        assert!(result.error.is_some(), "flags {:?}", flags);
    }
}

#[test]
fn test_indices_and_unicode_flags_are_accepted() {
    assert_eq!(test_regex("a", "dgu", "aa").len(), 2);
    assert_eq!(test_regex("a", "v", "a").len(), 1);
}

// ==================== DIALECT ====================

#[test]
fn test_digit_class_is_ascii() {
    // U+0663 ARABIC-INDIC DIGIT THREE
    assert_eq!(spans(&test_regex(r"\d", "g", "\u{663}3")), vec![("3", 1)]);
    assert_eq!(spans(&test_regex(r"\d", "gu", "\u{663}3")), vec![("3", 1)]);
}

#[test]
fn test_word_class_and_boundary_are_ascii() {
    let result = test_regex(r"\w+", "g", "héllo");
    assert_eq!(spans(&result), vec![("h", 0), ("llo", 2)]);

    let result = test_regex(r"\bllo", "g", "héllo");
    assert_eq!(spans(&result), vec![("llo", 2)]);

    let result = test_regex(r"\W", "g", "a é");
    assert_eq!(spans(&result), vec![(" ", 1), ("é", 2)]);
}

#[test]
fn test_word_class_case_folding_needs_unicode_flag() {
    // ſ folds to s and U+212A KELVIN SIGN to k
    assert!(test_regex(r"\w", "gi", "ſ\u{212A}").is_empty());
    assert_eq!(test_regex(r"\w", "giu", "ſ\u{212A}").len(), 2);
}

#[test]
fn test_escaped_backslash_is_literal() {
    let result = test_regex(r"\\d", "g", r"a\d");
    assert_eq!(spans(&result), vec![(r"\d", 1)]);
}

#[test]
fn test_error_quotes_pattern_as_written() {
    let result = test_regex(r"\d[", "", "1");
    let error = result.error.expect("unclosed class");
    assert!(error.contains(r"\d["), "{}", error);
    assert!(!error.contains("[0-9]"), "{}", error);
}

#[test]
fn test_multiline_anchors_break_at_carriage_return() {
    assert_eq!(spans(&test_regex("a$", "m", "a\r\nb")), vec![("a", 0)]);
    assert_eq!(spans(&test_regex("^b", "gm", "a\rb")), vec![("b", 2)]);
    assert!(test_regex("a$", "", "a\r\nb").is_empty());
}

#[test]
fn test_dot_excludes_carriage_return() {
    assert!(test_regex("a.b", "", "a\rb").is_empty());
    assert_eq!(test_regex("a.b", "s", "a\rb").len(), 1);
}

// ==================== OFFSETS ====================

#[test]
fn test_offsets_are_utf16_units() {
    assert_eq!(spans(&test_regex("b", "g", "éb")), vec![("b", 1)]);
    assert_eq!(spans(&test_regex("b", "g", "😀b😀b")), vec![("b", 2), ("b", 5)]);
}

#[test]
fn test_zero_length_steps_over_whole_characters() {
    let result = test_regex("x*", "g", "😀a");
    let offsets: Vec<usize> = result.matches.iter().map(|m| m.start_offset).collect();
    assert_eq!(offsets, vec![0, 2, 3]);
}

// ==================== CONFIGURATION ====================

#[test]
fn test_custom_cap() {
    let engine = MatchEngine::new(TesterConfig {
        max_matches: 2,
        ..TesterConfig::default()
    });
    assert_eq!(engine.test("a", "g", "aaaa").len(), 2);
}

#[test]
fn test_truncation_reported_when_enabled() {
    let engine = MatchEngine::new(TesterConfig::extended());

    let capped = engine.test("a", "g", &"a".repeat(150));
    assert_eq!(capped.len(), 100);
    assert_eq!(capped.truncated, Some(true));

    let exact = engine.test("a", "g", &"a".repeat(100));
    assert_eq!(exact.len(), 100);
    assert_eq!(exact.truncated, Some(false));

    let single = engine.test("a", "", "aaa");
    assert_eq!(single.truncated, Some(false));
}

#[test]
fn test_truncation_not_reported_on_error() {
    let engine = MatchEngine::new(TesterConfig::extended());
    let result = engine.test("(", "g", "x");
    assert!(result.error.is_some());
    assert!(result.truncated.is_none());
}

#[test]
fn test_size_limit_is_compile_error() {
    let engine = MatchEngine::new(TesterConfig {
        size_limit: 64,
        ..TesterConfig::default()
    });
    let result = engine.test(r"\w{500}", "", "x");
    assert!(result.matches.is_empty());
    assert!(result.error.unwrap().contains("size limit"));
}

// ==================== MISC ====================

#[test]
fn test_same_input_same_output() {
    let engine = MatchEngine::default();
    let first = engine.test(r"(?<n>\d+)", "g", "a1b22c333");
    let second = engine.test(r"(?<n>\d+)", "g", "a1b22c333");
    assert_eq!(first, second);
}

#[test]
fn test_is_valid_regex() {
    assert!(is_valid_regex(r"\d{3}-\d{4}", ""));
    assert!(is_valid_regex("a", "gi"));
    assert!(!is_valid_regex("(", ""));
    assert!(!is_valid_regex("a", "q"));
}
