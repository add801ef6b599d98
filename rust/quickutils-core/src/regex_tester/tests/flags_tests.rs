use crate::regex_tester::error::PatternError;
use crate::regex_tester::flags::RegexFlags;

#[test]
fn test_empty_flags() {
    let flags = RegexFlags::parse("").unwrap();
    assert_eq!(flags, RegexFlags::default());
    assert!(!flags.find_all());
}

#[test]
fn test_every_letter() {
    let flags = RegexFlags::parse("dgimsuy").unwrap();
    assert!(flags.has_indices);
    assert!(flags.global);
    assert!(flags.ignore_case);
    assert!(flags.multiline);
    assert!(flags.dot_all);
    assert!(flags.unicode);
    assert!(flags.sticky);
    assert!(!flags.unicode_sets);
    assert!(flags.find_all());
}

#[test]
fn test_display_is_canonical_order() {
    let flags: RegexFlags = "ymgi".parse().unwrap();
    assert_eq!(flags.to_string(), "gimy");
}

#[test]
fn test_unknown_letter() {
    let err = RegexFlags::parse("gx").unwrap_err();
    assert_eq!(
        err,
        PatternError::UnknownFlag {
            flags: "gx".to_string(),
            flag: 'x'
        }
    );
}

#[test]
fn test_uppercase_is_not_a_flag() {
    assert!(RegexFlags::parse("G").is_err());
}

#[test]
fn test_duplicate_letter() {
    let err = RegexFlags::parse("gig").unwrap_err();
    assert!(matches!(err, PatternError::DuplicateFlag { flag: 'g', .. }));
}

#[test]
fn test_unicode_and_unicode_sets_conflict() {
    let err = RegexFlags::parse("uv").unwrap_err();
    assert!(matches!(err, PatternError::ConflictingFlags { .. }));
    assert!(RegexFlags::parse("v").is_ok());
}
