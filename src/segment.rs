//-
// Copyright 2026 The globmatch developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Segment types and the backward length-analysis pass.
//!
//! A compiled pattern is a flat `Vec<Segment>`; `SegmentKind` is the closed
//! enum the original's `SegmentType` (`enum.go`) encodes as a `byte` with a
//! name table. We keep the Rust enum itself as the "name", and give it a
//! `Display` impl for the human-readable form the original exposes via
//! `SegmentType.String()`.

use core::fmt;

use crate::normalize::NormalizedString;
use crate::rune::RuneMatcher;

/// The shape of one segment of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A fixed run of runes that must match exactly.
    Literal,
    /// A single rune tested against a [`RuneMatcher`] (from `[...]`).
    RuneMatch,
    /// `?` — exactly one non-`/` rune.
    Question,
    /// `*` — a greedy run of non-`/` runes.
    Star,
    /// `**` — a greedy run of any runes, including `/`.
    DoubleStar,
    /// `**/` — a greedy run of any runes ending just after a `/` (or at the
    /// very start of the segment's window).
    DoubleStarSlash,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::Literal => "Literal",
            SegmentKind::RuneMatch => "RuneMatch",
            SegmentKind::Question => "Question",
            SegmentKind::Star => "Star",
            SegmentKind::DoubleStar => "DoubleStar",
            SegmentKind::DoubleStarSlash => "DoubleStarSlash",
        };
        write!(f, "{}", name)
    }
}

/// A saturating "infinity" sentinel for suffix-length upper bounds.
pub const UNBOUNDED: usize = usize::MAX;

/// One atomic unit of a compiled pattern.
///
/// `min_len`/`max_len` are *suffix* bounds: the minimum and maximum total
/// rune length this segment plus every segment after it can consume (see
/// [`analyze_lengths`]). `max_len` uses [`UNBOUNDED`] for "no upper bound".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// What kind of segment this is.
    pub kind: SegmentKind,
    /// The literal text this segment matches (only meaningful when
    /// `kind == Literal`).
    pub literal: NormalizedString,
    /// The rune matcher this segment tests against (only meaningful when
    /// `kind == RuneMatch`).
    pub matcher: RuneMatcher,
    /// Start of the rune-index span in the compiled pattern that produced
    /// this segment.
    pub pattern_p: usize,
    /// End (exclusive) of that span.
    pub pattern_q: usize,
    /// Minimum total rune length this segment and all following segments
    /// can consume.
    pub min_len: usize,
    /// Maximum total rune length this segment and all following segments
    /// can consume ([`UNBOUNDED`] if there is no finite bound).
    pub max_len: usize,
}

impl Segment {
    pub(crate) fn new(
        kind: SegmentKind,
        pattern_p: usize,
        pattern_q: usize,
    ) -> Self {
        Segment {
            kind,
            literal: NormalizedString::empty(),
            matcher: RuneMatcher::None,
            pattern_p,
            pattern_q,
            min_len: 0,
            max_len: 0,
        }
    }

    /// The per-segment (not suffix) `(min, max)` contribution used by
    /// [`analyze_lengths`].
    fn own_bounds(&self) -> (usize, usize) {
        match self.kind {
            SegmentKind::Literal => {
                let n = self.literal.len();
                (n, n)
            }
            SegmentKind::RuneMatch | SegmentKind::Question => (1, 1),
            SegmentKind::Star
            | SegmentKind::DoubleStar
            | SegmentKind::DoubleStarSlash => (0, UNBOUNDED),
        }
    }
}

/// Walks `segments` right to left, assigning each one's `min_len`/`max_len`
/// as the running suffix total, and returns the whole-pattern `(min, max)`
/// bounds (equal to `segments[0]`'s, or `(0, 0)` if `segments` is empty).
///
/// Mirrors the tail of `internal/guts/parse.go::Parser.Run`, which walks
/// backward accumulating `min`/`max` across the whole segment list.
pub(crate) fn analyze_lengths(segments: &mut [Segment]) -> (usize, usize) {
    let mut min_total = 0usize;
    let mut max_total = 0usize;

    for seg in segments.iter_mut().rev() {
        let (seg_min, seg_max) = seg.own_bounds();

        min_total += seg_min;
        max_total = if max_total == UNBOUNDED || seg_max == UNBOUNDED {
            UNBOUNDED
        } else {
            max_total + seg_max
        };

        seg.min_len = min_total;
        seg.max_len = max_total;
    }

    (min_total, max_total)
}
