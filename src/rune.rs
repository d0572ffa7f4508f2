//-
// Copyright 2026 The globmatch developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The algebra of single-rune matchers.
//!
//! A closed sum type with one variant per shape `internal/guts/runematch*.go`
//! implemented as a small family of interface implementations (`AnyMatch`,
//! `NoneMatch`, `IsMatch`/`IsNotMatch`, `RangeMatch`/`ExceptRangeMatch`,
//! `SetMatch`/`ExceptSetMatch`). Rust gives us a closed enum instead of
//! virtual dispatch, which is the REDESIGN the teacher corpus favors
//! wherever an enum-match suffices (see spec.md §9).

use core::fmt;

use crate::set_builder::{self, Range};

/// The maximum valid Unicode scalar value, `U+10FFFF`.
pub const MAX_RUNE: char = char::MAX;

/// A single-rune matcher: accepts or rejects one code point at a time.
///
/// Every variant supports [`RuneMatcher::match_rune`],
/// [`RuneMatcher::for_each_range`], and [`RuneMatcher::not`]. Negated
/// variants (`NotIs`, `NotRange`, `NotSet`) carry exactly the same payload
/// as their positive counterpart; only the accept/reject decision flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuneMatcher {
    /// Accepts every code point.
    Any,
    /// Accepts nothing.
    None,
    /// Accepts exactly one code point.
    Is(char),
    /// Accepts every code point except one.
    NotIs(char),
    /// Accepts a contiguous inclusive range `lo..=hi`.
    Range(char, char),
    /// Accepts every code point outside `lo..=hi`.
    NotRange(char, char),
    /// Accepts a union of disjoint ranges, with a dense bitset fast path
    /// for code points below `U+0080`.
    Set {
        /// Membership bits for code points `U+0000..U+0040`.
        dense0: u64,
        /// Membership bits for code points `U+0040..U+0080`.
        dense1: u64,
        /// Sorted, coalesced ranges covering the full set (including the
        /// ASCII portion already summarized by `dense0`/`dense1`).
        ranges: Vec<(char, char)>,
    },
    /// The complement of a [`RuneMatcher::Set`]; same payload, inverted
    /// decision.
    NotSet {
        /// See [`RuneMatcher::Set::dense0`].
        dense0: u64,
        /// See [`RuneMatcher::Set::dense1`].
        dense1: u64,
        /// See [`RuneMatcher::Set::ranges`].
        ranges: Vec<(char, char)>,
    },
}

/// The bit position within a 64-bit dense block for code point `ch`.
fn dense_bit(ch: char) -> u64 {
    1u64 << ((ch as u32) & 0x3f)
}

impl RuneMatcher {
    /// A matcher equivalent to [`RuneMatcher::Is`] or [`RuneMatcher::Range`]
    /// depending on whether `lo == hi`, or [`RuneMatcher::Any`] if the range
    /// spans every code point.
    ///
    /// Panics if `lo > hi` (mirrors `runematch.go::Range`, which panics on
    /// an inverted range rather than silently swapping the bounds).
    pub fn range(lo: char, hi: char) -> RuneMatcher {
        assert!(lo <= hi, "lo {:?} is greater than hi {:?}", lo, hi);
        if lo == '\u{0}' && hi == MAX_RUNE {
            RuneMatcher::Any
        } else if lo == hi {
            RuneMatcher::Is(lo)
        } else {
            RuneMatcher::Range(lo, hi)
        }
    }

    /// Builds the simplest matcher equivalent to the union of `ranges`.
    ///
    /// Ranges need not be sorted, coalesced, or even individually valid
    /// (`lo > hi` entries are dropped); see [`crate::set_builder::build_set`]
    /// for the exact algorithm.
    pub fn from_ranges(ranges: impl IntoIterator<Item = Range>) -> RuneMatcher {
        set_builder::build_set(ranges.into_iter().collect())
    }

    /// Union of the ranges accepted by each `matcher` (mirrors
    /// `runematch.go::Set`, the variadic constructor).
    pub fn union(matchers: impl IntoIterator<Item = RuneMatcher>) -> RuneMatcher {
        let mut ranges = Vec::new();
        for m in matchers {
            m.for_each_range(|lo, hi| {
                if lo <= hi {
                    ranges.push(Range { lo, hi });
                }
            });
        }
        set_builder::build_set(ranges)
    }

    /// Does this matcher accept `ch`?
    pub fn match_rune(&self, ch: char) -> bool {
        match self {
            RuneMatcher::Any => true,
            RuneMatcher::None => false,
            RuneMatcher::Is(c) => ch == *c,
            RuneMatcher::NotIs(c) => ch != *c,
            RuneMatcher::Range(lo, hi) => ch >= *lo && ch <= *hi,
            RuneMatcher::NotRange(lo, hi) => ch < *lo || ch > *hi,
            RuneMatcher::Set { dense0, dense1, ranges } => {
                match_set(ch, *dense0, *dense1, ranges, true)
            }
            RuneMatcher::NotSet { dense0, dense1, ranges } => {
                match_set(ch, *dense0, *dense1, ranges, false)
            }
        }
    }

    /// Visits the accepted ranges, in ascending order, via `visit(lo, hi)`.
    ///
    /// For negated variants this visits the complement within
    /// `'\u{0}'..=MAX_RUNE`.
    pub fn for_each_range(&self, mut visit: impl FnMut(char, char)) {
        match self {
            RuneMatcher::Any => visit('\u{0}', MAX_RUNE),
            RuneMatcher::None => {}
            RuneMatcher::Is(c) => visit(*c, *c),
            RuneMatcher::NotIs(c) => {
                if *c > '\u{0}' {
                    visit('\u{0}', prev_char(*c));
                }
                if *c < MAX_RUNE {
                    visit(next_char(*c), MAX_RUNE);
                }
            }
            RuneMatcher::Range(lo, hi) => visit(*lo, *hi),
            RuneMatcher::NotRange(lo, hi) => {
                if *lo > '\u{0}' {
                    visit('\u{0}', prev_char(*lo));
                }
                if *hi < MAX_RUNE {
                    visit(next_char(*hi), MAX_RUNE);
                }
            }
            RuneMatcher::Set { ranges, .. } => {
                for (lo, hi) in ranges {
                    visit(*lo, *hi);
                }
            }
            RuneMatcher::NotSet { ranges, .. } => {
                let mut sweeper = '\u{0}';
                for (lo, hi) in ranges {
                    if *lo > '\u{0}' {
                        let lo_sub_1 = prev_char(*lo);
                        if sweeper <= lo_sub_1 {
                            visit(sweeper, lo_sub_1);
                        }
                    }
                    sweeper = if *hi < MAX_RUNE { next_char(*hi) } else { MAX_RUNE };
                    if *hi == MAX_RUNE {
                        return;
                    }
                }
                if sweeper <= MAX_RUNE {
                    visit(sweeper, MAX_RUNE);
                }
            }
        }
    }

    /// The logical complement. Applying `not()` twice always yields a
    /// matcher equivalent to the original; the concrete variant mirrors the
    /// table in spec.md §4.B (`Any<->None`, `Is<->NotIs`, `Range<->NotRange`,
    /// `Set<->NotSet`).
    pub fn not(&self) -> RuneMatcher {
        match self.clone() {
            RuneMatcher::Any => RuneMatcher::None,
            RuneMatcher::None => RuneMatcher::Any,
            RuneMatcher::Is(c) => RuneMatcher::NotIs(c),
            RuneMatcher::NotIs(c) => RuneMatcher::Is(c),
            RuneMatcher::Range(lo, hi) => RuneMatcher::NotRange(lo, hi),
            RuneMatcher::NotRange(lo, hi) => RuneMatcher::Range(lo, hi),
            RuneMatcher::Set { dense0, dense1, ranges } => {
                RuneMatcher::NotSet { dense0, dense1, ranges }
            }
            RuneMatcher::NotSet { dense0, dense1, ranges } => {
                RuneMatcher::Set { dense0, dense1, ranges }
            }
        }
    }
}

fn match_set(
    ch: char,
    dense0: u64,
    dense1: u64,
    ranges: &[(char, char)],
    want_member: bool,
) -> bool {
    if (ch as u32) < 0x40 {
        let bit = dense_bit(ch);
        ((dense0 & bit) == bit) == want_member
    } else if (ch as u32) < 0x80 {
        let bit = dense_bit(ch);
        ((dense1 & bit) == bit) == want_member
    } else {
        let member = ranges.iter().any(|(lo, hi)| ch >= *lo && ch <= *hi);
        member == want_member
    }
}

fn prev_char(c: char) -> char {
    char::from_u32((c as u32) - 1).expect("caller checked c > 0")
}

fn next_char(c: char) -> char {
    // Skip the surrogate gap, same as incrementing a Unicode scalar value.
    let next = (c as u32) + 1;
    char::from_u32(next).unwrap_or_else(|| {
        char::from_u32(0xE000).expect("surrogate gap upper bound is valid")
    })
}

/// Re-renders a single rune the way a glob pattern would need to spell it
/// to match it literally: metacharacters get a backslash, non-graphic
/// characters get a `\xHH`/`\uHHHH`/`\UHHHHHHHH` escape. Ported from
/// `util.go::SafeAppendRune`.
pub fn escape_for_display(ch: char) -> String {
    if is_glob_punct(ch) {
        format!("\\{}", ch)
    } else if ch == '\u{0}' {
        "\\0".to_string()
    } else if is_graphic(ch) {
        ch.to_string()
    } else if (ch as u32) < 0x80 {
        format!("\\x{:02x}", ch as u32)
    } else if (ch as u32) < 0x10000 {
        format!("\\u{:04x}", ch as u32)
    } else {
        format!("\\U{:08x}", ch as u32)
    }
}

/// Characters `\c` escapes expand to verbatim (kept in sync with the
/// escape table in `parser.rs`).
pub(crate) fn is_glob_punct(ch: char) -> bool {
    matches!(ch, '\\' | '*' | '?' | '{' | '}' | '[' | ']' | '^' | '-')
}

fn is_graphic(ch: char) -> bool {
    !ch.is_control() && ch != '\u{ad}'
}

impl fmt::Display for RuneMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuneMatcher::Any => write!(f, "[any rune]"),
            RuneMatcher::None => write!(f, "[no rune]"),
            RuneMatcher::Is(c) => write!(f, "[{}]", escape_for_display(*c)),
            RuneMatcher::NotIs(c) => write!(f, "[^{}]", escape_for_display(*c)),
            RuneMatcher::Range(lo, hi) => write!(
                f,
                "[{}-{}]",
                escape_for_display(*lo),
                escape_for_display(*hi)
            ),
            RuneMatcher::NotRange(lo, hi) => write!(
                f,
                "[^{}-{}]",
                escape_for_display(*lo),
                escape_for_display(*hi)
            ),
            RuneMatcher::Set { ranges, .. } => {
                write!(f, "[")?;
                for (lo, hi) in ranges {
                    if lo == hi {
                        write!(f, "{}", escape_for_display(*lo))?;
                    } else {
                        write!(
                            f,
                            "{}-{}",
                            escape_for_display(*lo),
                            escape_for_display(*hi)
                        )?;
                    }
                }
                write!(f, "]")
            }
            RuneMatcher::NotSet { ranges, .. } => {
                write!(f, "[^")?;
                for (lo, hi) in ranges {
                    if lo == hi {
                        write!(f, "{}", escape_for_display(*lo))?;
                    } else {
                        write!(
                            f,
                            "{}-{}",
                            escape_for_display(*lo),
                            escape_for_display(*hi)
                        )?;
                    }
                }
                write!(f, "]")
            }
        }
    }
}
