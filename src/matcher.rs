//-
// Copyright 2026 The globmatch developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Backtracking, memoized matching of a [`CompiledPattern`] against an
//! input string, one segment at a time.
//!
//! Ported from `internal/guts/match.go`. The original shares a single
//! `MemoMap` across speculative lookahead matchers by taking a shallow
//! struct copy of `*Matcher` (Go maps are reference types, so the copy and
//! the original mutate the same underlying table); we get the same sharing
//! in Rust with `Rc<RefCell<HashMap<...>>>`.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::normalize::NormalizedString;
use crate::pattern::CompiledPattern;
use crate::segment::{Segment, SegmentKind};

/// The span a single [`Matcher::has_next`] step consumed.
///
/// `input_p..input_q` is the rune range of the *input* the segment
/// matched; `pattern_p..pattern_q` is the rune range of the *pattern* that
/// produced the segment (see [`Segment::pattern_p`]/[`Segment::pattern_q`]).
/// `segment_p` is the index of the segment within
/// [`CompiledPattern::segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capture {
    /// Start (inclusive) of the input rune span this step consumed.
    pub input_p: usize,
    /// End (exclusive) of that span.
    pub input_q: usize,
    /// Index of the segment that produced this step.
    pub segment_p: usize,
    /// Start (inclusive) of the rune span in the pattern for this segment.
    pub pattern_p: usize,
    /// End (exclusive) of that span.
    pub pattern_q: usize,
}

#[derive(Debug, Clone, Copy)]
struct MemoValue {
    checked: bool,
    rejected: bool,
    index: usize,
}

type MemoKey = (usize, usize);
type MemoMap = Rc<RefCell<HashMap<MemoKey, MemoValue>>>;

/// A single incremental pass of a [`CompiledPattern`] over one input
/// string.
///
/// Call [`Matcher::has_next`] repeatedly to walk the match segment by
/// segment, reading [`Matcher::capture`] after each successful step; or
/// call [`Matcher::matches`] for a plain yes/no answer.
#[derive(Clone)]
pub struct Matcher<'p> {
    pattern: &'p CompiledPattern,
    memo: MemoMap,
    input: NormalizedString,
    capture: Capture,
    input_i: usize,
    input_j: usize,
    segment_i: usize,
    segment_j: usize,
    valid: bool,
}

impl<'p> Matcher<'p> {
    pub(crate) fn new(pattern: &'p CompiledPattern, input: NormalizedString) -> Self {
        let input_j = input.len();
        let segment_j = pattern.segments.len();
        let valid = input_j >= pattern.min_len && input_j <= pattern.max_len;

        #[cfg(feature = "log")]
        log::trace!(
            "matcher for pattern {:?} against {:?} (fast reject: {})",
            pattern.pattern(),
            input.as_str(),
            !valid
        );

        Matcher {
            pattern,
            memo: Rc::new(RefCell::new(HashMap::new())),
            input,
            capture: Capture::default(),
            input_i: 0,
            input_j,
            segment_i: 0,
            segment_j,
            valid,
        }
    }

    /// Advances by one segment, reporting whether it matched.
    ///
    /// On `true`, [`Matcher::capture`] describes the span that was just
    /// consumed. On `false`, either the pattern is exhausted and
    /// [`Matcher::ok`] reports whether the whole match succeeded, or the
    /// current segment rejected the remaining input and the match has
    /// failed for good.
    pub fn has_next(&mut self) -> bool {
        self.capture = Capture::default();

        if self.segment_i >= self.segment_j {
            self.valid = self.valid && (self.input_i >= self.input_j);
            return false;
        }

        let pattern = self.pattern;
        let seg_index = self.segment_i;
        self.segment_i += 1;
        let more_segments = self.segment_i < self.segment_j;
        let seg: &'p Segment = &pattern.segments[seg_index];
        let key: MemoKey = (self.input_i, seg_index);

        let remain = self.input_j - self.input_i;
        if remain < seg.min_len || remain > seg.max_len {
            self.valid = false;
            return false;
        }

        let memoized = self.memo.borrow().get(&key).copied();
        if let Some(memo) = memoized {
            if memo.rejected {
                self.valid = false;
                return false;
            }
            if memo.checked {
                self.capture = Capture {
                    input_p: key.0,
                    input_q: memo.index,
                    segment_p: key.1,
                    pattern_p: seg.pattern_p,
                    pattern_q: seg.pattern_q,
                };
                self.input_i = memo.index;
                return true;
            }
            panic!("BUG! infinite recursion while matching a glob pattern");
        }

        self.memo.borrow_mut().insert(
            key,
            MemoValue { checked: false, rejected: false, index: usize::MAX },
        );

        let (index, ok) = self.tick(seg, more_segments);

        self.memo
            .borrow_mut()
            .insert(key, MemoValue { checked: true, rejected: !ok, index });

        if !ok {
            self.valid = false;
            return false;
        }

        self.capture = Capture {
            input_p: key.0,
            input_q: index,
            segment_p: key.1,
            pattern_p: seg.pattern_p,
            pattern_q: seg.pattern_q,
        };
        self.input_i = index;
        true
    }

    /// The span consumed by the most recent successful [`Matcher::has_next`]
    /// call.
    ///
    /// Panics if the match has already failed ([`Matcher::ok`] is `false`);
    /// a `Matcher` that has diverged has no further captures to offer.
    pub fn capture(&self) -> Capture {
        assert!(
            self.valid,
            "capture() called on a Matcher whose match has already failed"
        );
        self.capture
    }

    /// Whether the match is still alive: either still in progress, or
    /// completed successfully. Once a segment rejects, this is `false` for
    /// the rest of the `Matcher`'s life.
    pub fn ok(&self) -> bool {
        self.valid
    }

    /// Drives [`Matcher::has_next`] to completion and reports the overall
    /// result.
    pub fn matches(&mut self) -> bool {
        while self.has_next() {}
        self.ok()
    }

    /// Would a fresh match starting at input rune index `i` (instead of
    /// wherever this `Matcher` currently is) succeed? Used by variable-length
    /// segments (`*`, `**`, `**/`) to pick a consumption length compatible
    /// with the rest of the pattern, via speculative sub-matches that share
    /// this matcher's memo table.
    fn would_accept(&self, i: usize) -> bool {
        let mut dupe = self.clone();
        dupe.input_i = i;
        dupe.matches()
    }

    fn tick(&mut self, seg: &Segment, more_segments: bool) -> (usize, bool) {
        let input_i = self.input_i;
        let mut input_j = input_i;
        let input_l = self.input_j;

        match seg.kind {
            SegmentKind::Literal => {
                input_j += seg.literal.len();
                if input_j > input_l {
                    return (0, false);
                }
                if &self.input.runes()[input_i..input_j] != seg.literal.runes() {
                    return (0, false);
                }
                (input_j, true)
            }

            SegmentKind::RuneMatch => {
                input_j += 1;
                if input_j > input_l {
                    return (0, false);
                }
                let ch = self.input.runes()[input_i];
                if !seg.matcher.match_rune(ch) {
                    return (0, false);
                }
                (input_j, true)
            }

            SegmentKind::Question => {
                input_j += 1;
                if input_j > input_l {
                    return (0, false);
                }
                let ch = self.input.runes()[input_i];
                if ch == '/' {
                    return (0, false);
                }
                (input_j, true)
            }

            SegmentKind::Star => {
                while input_j < input_l && self.input.runes()[input_j] != '/' {
                    input_j += 1;
                }

                if !more_segments {
                    return (input_j, true);
                }

                let input_ub = input_j;
                if self.would_accept(input_j) {
                    return (input_j, true);
                }
                while input_j > input_i {
                    input_j -= 1;
                    if self.would_accept(input_j) {
                        return (input_j, true);
                    }
                }
                (input_ub, true)
            }

            SegmentKind::DoubleStar => {
                input_j = input_l;

                if input_i >= input_j {
                    return (input_j, true);
                }
                if !more_segments {
                    return (input_j, true);
                }

                if self.would_accept(input_j) {
                    return (input_j, true);
                }
                while input_j > input_i {
                    input_j -= 1;
                    if self.would_accept(input_j) {
                        return (input_j, true);
                    }
                }
                (input_j, true)
            }

            SegmentKind::DoubleStarSlash => {
                let mut slashes: HashSet<usize> = HashSet::new();
                input_j = input_i;
                slashes.insert(input_j);
                for k in input_i..input_l {
                    if self.input.runes()[k] == '/' {
                        input_j = k + 1;
                        slashes.insert(input_j);
                    }
                }

                if !more_segments {
                    return (input_j, true);
                }

                let input_ub = input_j;
                if slashes.contains(&input_j) && self.would_accept(input_j) {
                    return (input_j, true);
                }
                while input_j > input_i {
                    input_j -= 1;
                    if slashes.contains(&input_j) && self.would_accept(input_j) {
                        return (input_j, true);
                    }
                }
                (input_ub, true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pattern::compile;

    fn matches(pattern: &str, input: &str) -> bool {
        let p = compile(pattern).unwrap();
        p.matcher(input).matches()
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        assert!(matches("foo/bar", "foo/bar"));
        assert!(!matches("foo/bar", "foo/baz"));
        assert!(!matches("foo/bar", "foo/bar/"));
    }

    #[test]
    fn question_does_not_cross_slash() {
        assert!(matches("a?c", "abc"));
        assert!(!matches("a?c", "a/c"));
    }

    #[test]
    fn star_does_not_cross_slash() {
        assert!(matches("a*c", "aXYZc"));
        assert!(!matches("a*c", "aX/Zc"));
        assert!(matches("a*c", "ac"));
    }

    #[test]
    fn double_star_crosses_slash() {
        assert!(matches("a**c", "aX/Zc"));
        assert!(matches("a**c", "ac"));
    }

    #[test]
    fn double_star_slash_requires_slash_boundary() {
        assert!(matches("a**/c", "a/x/y/c"));
        assert!(matches("a**/c", "a/c"));
        assert!(!matches("a**/c", "abc"));
    }

    #[test]
    fn scenario_1_from_spec() {
        let p = compile("foo/bar/[0-9][0-9]-?").unwrap();
        assert!(p.matcher("foo/bar/42-x").matches());
        assert!(!p.matcher("foo/bar/42-x/").matches());
        assert!(!p.matcher("foo/bar/4x-x").matches());
    }

    #[test]
    fn scenario_2_from_spec() {
        let p = compile("foo/bar/**/[0-9][0-9]-?*.[ch]").unwrap();
        assert!(p.matcher("foo/bar/baz/qux/42-x_impl.c").matches());
        assert!(p.matcher("foo/bar/42-x.h").matches());
        assert!(!p.matcher("foo/bar/42-x.rs").matches());
    }

    #[test]
    fn empty_pattern_matches_only_empty_input() {
        let p = compile("").unwrap();
        assert!(p.matcher("").matches());
        assert!(!p.matcher("x").matches());
    }

    #[test]
    fn capture_reports_spans_for_each_segment() {
        let p = compile("foo*bar").unwrap();
        let mut m = p.matcher("fooXYbar");
        assert!(m.has_next());
        let c1 = m.capture();
        assert_eq!((c1.input_p, c1.input_q), (0, 3));
        assert!(m.has_next());
        let c2 = m.capture();
        assert_eq!((c2.input_p, c2.input_q), (3, 5));
        assert!(m.has_next());
        let c3 = m.capture();
        assert_eq!((c3.input_p, c3.input_q), (5, 8));
        assert!(!m.has_next());
        assert!(m.ok());
    }
}
