//! Flag letters accepted by the tester
//!
//! The vocabulary is the one users type into the webview's flags field:
//!
//! | letter | meaning                                   |
//! |--------|-------------------------------------------|
//! | `d`    | match indices (accepted, no effect here)  |
//! | `g`    | find all                                  |
//! | `i`    | case-insensitive                          |
//! | `m`    | `^`/`$` match at line boundaries          |
//! | `s`    | `.` matches `\n`                          |
//! | `u`    | unicode                                   |
//! | `v`    | unicode sets                              |
//! | `y`    | sticky: matches must start at scan position |
//!
//! Unknown letters, repeated letters and `u` together with `v` are rejected.

use std::str::FromStr;

use super::error::PatternError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub has_indices: bool,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    pub sticky: bool,
}

impl RegexFlags {
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut parsed = RegexFlags::default();

        for flag in flags.chars() {
            let slot = match flag {
                'd' => &mut parsed.has_indices,
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multiline,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                'v' => &mut parsed.unicode_sets,
                'y' => &mut parsed.sticky,
                _ => {
                    return Err(PatternError::UnknownFlag {
                        flags: flags.to_string(),
                        flag,
                    })
                }
            };
            if *slot {
                return Err(PatternError::DuplicateFlag {
                    flags: flags.to_string(),
                    flag,
                });
            }
            *slot = true;
        }

        if parsed.unicode && parsed.unicode_sets {
            return Err(PatternError::ConflictingFlags {
                flags: flags.to_string(),
            });
        }

        Ok(parsed)
    }

    /// The only flag the engine's control flow branches on besides `y`
    pub fn find_all(&self) -> bool {
        self.global
    }
}

impl FromStr for RegexFlags {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegexFlags::parse(s)
    }
}

/// Canonical letter order, e.g. `"gim"`
impl std::fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters = [
            (self.has_indices, 'd'),
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.unicode_sets, 'v'),
            (self.sticky, 'y'),
        ];
        for (set, letter) in letters {
            if set {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}
