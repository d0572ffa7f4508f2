//-
// Copyright 2026 The globmatch developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compiling a glob pattern (or a standalone character set) into the data a
//! [`crate::Matcher`] runs against.
//!
//! Grounded in `internal/guts/glob.go::Glob.Compile`: normalize, parse into
//! segments, then run the backward length-analysis pass.

use crate::error::Error;
use crate::normalize::NormalizedString;
use crate::parser;
use crate::rune::RuneMatcher;
use crate::segment::{analyze_lengths, Segment};

/// A glob pattern that has been normalized, parsed into segments, and had
/// its length bounds computed — ready to match input strings against.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub(crate) pattern: NormalizedString,
    pub(crate) segments: Vec<Segment>,
    pub(crate) min_len: usize,
    pub(crate) max_len: usize,
}

impl CompiledPattern {
    /// The normalized pattern text this was compiled from.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The segments this pattern was parsed into, in left-to-right order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The minimum number of runes any input accepted by this pattern must
    /// contain.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// The maximum number of runes any input accepted by this pattern can
    /// contain ([`crate::segment::UNBOUNDED`] if there is no finite bound).
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Starts a fresh [`crate::Matcher`] walking this pattern against
    /// `input`.
    pub fn matcher(&self, input: &str) -> crate::matcher::Matcher<'_> {
        crate::matcher::Matcher::new(self, NormalizedString::normalize(input))
    }
}

/// Compiles `pattern` into a [`CompiledPattern`].
///
/// `pattern` is NFKC-normalized before parsing, so two patterns that are
/// canonically equivalent under NFKC compile to the same segment sequence.
pub fn compile(pattern: &str) -> Result<CompiledPattern, Error> {
    let normalized = NormalizedString::normalize(pattern);
    let output = parser::parse_pattern(normalized.clone())?;
    let mut segments = output.segments;
    let (min_len, max_len) = analyze_lengths(&mut segments);

    #[cfg(feature = "log")]
    log::trace!(
        "compiled pattern {:?} into {} segment(s), bounds ({}, {})",
        normalized.as_str(),
        segments.len(),
        min_len,
        max_len
    );

    Ok(CompiledPattern { pattern: normalized, segments, min_len, max_len })
}

/// Compiles the contents of a character set — the part of a pattern that
/// would appear between `[` and `]` — directly into a [`RuneMatcher`],
/// without requiring the enclosing brackets.
///
/// An empty `pattern` compiles to [`RuneMatcher::None`] and `"^"` alone
/// compiles to [`RuneMatcher::Any`] (the negation of the empty set), both
/// handled as fast paths before the character-set lexer runs.
pub fn compile_rune_matcher(pattern: &str) -> Result<RuneMatcher, Error> {
    let normalized = NormalizedString::normalize(pattern);
    if normalized.is_empty() {
        return Ok(RuneMatcher::None);
    }
    if normalized.as_str() == "^" {
        return Ok(RuneMatcher::Any);
    }

    let output = parser::parse_charset(normalized)?;
    debug_assert!(
        output.segments.len() <= 1,
        "a character set always parses to at most one RuneMatch segment"
    );
    Ok(output
        .segments
        .into_iter()
        .next()
        .map(|seg| seg.matcher)
        .unwrap_or(RuneMatcher::None))
}
