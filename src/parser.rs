//-
// Copyright 2026 The globmatch developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The 14-state character-driven pattern lexer.
//!
//! A direct port of the `Parser`/`ParseState` machinery in
//! `internal/guts/parse.go` and `internal/guts/enum.go`: one state enum,
//! one `run` loop consuming the normalized pattern rune by rune, and a
//! handful of `emit_*`/`flush_*` helpers that accumulate literals and
//! character-set ranges before turning them into [`Segment`]s.

use crate::error::{Error, Reason, Subject};
use crate::normalize::NormalizedString;
use crate::segment::{Segment, SegmentKind};
use crate::set_builder::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Root,
    RootEsc,
    RootOct,
    RootHex,
    CharsetInitial,
    CharsetHead,
    CharsetHeadEsc,
    CharsetHeadOct,
    CharsetHeadHex,
    CharsetMid,
    CharsetTail,
    CharsetTailEsc,
    CharsetTailOct,
    CharsetTailHex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmitTarget {
    Literal,
    SetLo,
    SetHi,
}

pub(crate) struct Parser {
    input: NormalizedString,
    segments: Vec<Segment>,
    ranges: Vec<Range>,
    partial_literal: Vec<char>,
    err: Option<Reason>,
    input_p: usize,
    input_q: usize,
    input_i: usize,
    input_j: usize,
    escape_len: usize,
    partial_escape: Vec<char>,
    state: State,
    negate: bool,
    want_set: bool,
    subject: Subject,
}

/// Output of a successful parse: the emitted segments plus the pattern
/// they were parsed from (length analysis happens in `pattern.rs`).
pub(crate) struct ParseOutput {
    pub segments: Vec<Segment>,
}

impl Parser {
    fn new(input: NormalizedString, want_set: bool, subject: Subject) -> Self {
        let input_j = input.len();
        Parser {
            input,
            segments: Vec::with_capacity(16),
            ranges: Vec::with_capacity(8),
            partial_literal: Vec::new(),
            err: None,
            input_p: 0,
            input_q: 0,
            input_i: 0,
            input_j,
            escape_len: 0,
            partial_escape: Vec::new(),
            state: if want_set { State::CharsetInitial } else { State::Root },
            negate: false,
            want_set,
            subject,
        }
    }

    fn fail(&mut self, reason: Reason) {
        if self.err.is_none() {
            self.err = Some(reason);
        }
    }

    fn emit_segment(&mut self, kind: SegmentKind, pattern_p: usize, pattern_q: usize) {
        self.segments.push(Segment::new(kind, pattern_p, pattern_q));
    }

    fn last_segment_kind(&self) -> Option<SegmentKind> {
        self.segments.last().map(|s| s.kind)
    }

    fn emit(&mut self, target: EmitTarget, ch: char) {
        match target {
            EmitTarget::Literal => self.emit_literal_char(ch),
            EmitTarget::SetLo => self.emit_set_lo(ch),
            EmitTarget::SetHi => self.emit_set_hi(ch),
        }
    }

    fn emit_literal_char(&mut self, ch: char) {
        if self.partial_literal.is_empty() {
            self.input_p = self.input_q;
        }
        self.partial_literal.push(ch);
    }

    fn emit_set_lo(&mut self, ch: char) {
        if self.ranges.is_empty() {
            self.input_p = self.input_q;
        }
        self.ranges.push(Range { lo: ch, hi: ch });
    }

    fn emit_set_hi(&mut self, ch: char) {
        let r = self.ranges.last_mut().expect("CHARSET_TAIL implies a pending lo bound");
        if ch < r.lo {
            let lo = r.lo;
            self.fail(Reason::InvalidRange { lo, hi: ch });
        } else {
            r.hi = ch;
        }
    }

    fn flush_literal(&mut self) {
        if self.partial_literal.is_empty() {
            return;
        }
        let text: String = self.partial_literal.drain(..).collect();
        let pattern_p = self.input_p;
        let pattern_q = self.input_q;
        self.emit_segment(SegmentKind::Literal, pattern_p, pattern_q);
        let seg = self.segments.last_mut().expect("just emitted");
        seg.literal = NormalizedString::normalize(&text);
    }

    fn flush_set(&mut self) {
        let mut matcher = crate::set_builder::build_set(core::mem::take(&mut self.ranges));
        if self.negate {
            matcher = matcher.not();
        }
        self.negate = false;

        let pattern_p = self.input_p;
        let pattern_q = self.input_q;
        self.emit_segment(SegmentKind::RuneMatch, pattern_p, pattern_q);
        let seg = self.segments.last_mut().expect("just emitted");
        seg.matcher = matcher;
    }

    /// Shared escape dispatch used from ROOT/CHARSET_HEAD/CHARSET_TAIL
    /// escape states. `ifOct`/`ifHex` pick the next state for multi-digit
    /// escapes; `ifPunct` is where we land after a single-character escape.
    fn process_escape(
        &mut self,
        ch: char,
        if_oct: State,
        if_hex: State,
        if_punct: State,
        target: EmitTarget,
    ) {
        match ch {
            'o' => {
                self.state = if_oct;
                self.escape_len = 3;
                self.partial_escape.clear();
            }
            'x' => {
                self.state = if_hex;
                self.escape_len = 2;
                self.partial_escape.clear();
            }
            'u' => {
                self.state = if_hex;
                self.escape_len = 4;
                self.partial_escape.clear();
            }
            'U' => {
                self.state = if_hex;
                self.escape_len = 8;
                self.partial_escape.clear();
            }
            c if crate::rune::is_glob_punct(c) => {
                self.state = if_punct;
                self.emit(target, c);
            }
            '0' => {
                self.state = if_punct;
                self.emit(target, '\u{0}');
            }
            other => {
                self.fail(Reason::InvalidEscape { escape: other });
            }
        }
    }

    fn process_radix_digit(
        &mut self,
        ch: char,
        radix: u32,
        if_done: State,
        target: EmitTarget,
    ) {
        match ch.to_digit(radix) {
            None => {
                // Matches the original's behavior of failing with an
                // "invalid escape" message built from the partial digits;
                // we simplify to the single offending character, which is
                // the information spec.md's catalog actually requires.
                self.fail(Reason::InvalidEscape { escape: ch });
            }
            Some(_) => {
                self.partial_escape.push(ch);
                if self.partial_escape.len() < self.escape_len {
                    return;
                }
                let text: String = self.partial_escape.drain(..).collect();
                let value = u32::from_str_radix(&text, radix)
                    .expect("all digits validated by to_digit above");
                let decoded =
                    char::from_u32(value).unwrap_or('\u{FFFD}');
                self.state = if_done;
                self.emit(target, decoded);
            }
        }
    }

    fn run(&mut self) {
        while self.input_i < self.input_j {
            self.input_q = self.input_i;
            let ch = self.input.runes()[self.input_i];
            self.input_i += 1;

            match self.state {
                State::Root => self.step_root(ch),
                State::RootEsc => self.process_escape(
                    ch,
                    State::RootOct,
                    State::RootHex,
                    State::Root,
                    EmitTarget::Literal,
                ),
                State::RootOct => self.process_radix_digit(
                    ch, 8, State::Root, EmitTarget::Literal,
                ),
                State::RootHex => self.process_radix_digit(
                    ch, 16, State::Root, EmitTarget::Literal,
                ),
                State::CharsetInitial => self.step_charset_initial_or_head(ch, true),
                State::CharsetHead => self.step_charset_initial_or_head(ch, false),
                State::CharsetHeadEsc => self.process_escape(
                    ch,
                    State::CharsetHeadOct,
                    State::CharsetHeadHex,
                    State::CharsetMid,
                    EmitTarget::SetLo,
                ),
                State::CharsetHeadOct => self.process_radix_digit(
                    ch, 8, State::CharsetMid, EmitTarget::SetLo,
                ),
                State::CharsetHeadHex => self.process_radix_digit(
                    ch, 16, State::CharsetMid, EmitTarget::SetLo,
                ),
                State::CharsetMid => self.step_charset_mid(ch),
                State::CharsetTail => self.step_charset_tail(ch),
                State::CharsetTailEsc => self.process_escape(
                    ch,
                    State::CharsetTailOct,
                    State::CharsetTailHex,
                    State::CharsetHead,
                    EmitTarget::SetHi,
                ),
                State::CharsetTailOct => self.process_radix_digit(
                    ch, 8, State::CharsetHead, EmitTarget::SetHi,
                ),
                State::CharsetTailHex => self.process_radix_digit(
                    ch, 16, State::CharsetHead, EmitTarget::SetHi,
                ),
            }

            if self.err.is_some() {
                return;
            }
        }

        self.input_q = self.input_j;
        self.finish();
    }

    fn step_root(&mut self, ch: char) {
        match ch {
            '[' => {
                self.flush_literal();
                self.state = State::CharsetInitial;
            }
            ']' => self.fail(Reason::UnexpectedCloseBracket),
            '{' => self.fail(Reason::UnexpectedOpenBrace),
            '}' => self.fail(Reason::UnexpectedCloseBrace),
            '*' => {
                self.flush_literal();
                match self.last_segment_kind() {
                    Some(SegmentKind::DoubleStar) => {
                        self.fail(Reason::TripleStar);
                    }
                    Some(SegmentKind::Star) => {
                        let seg = self.segments.last_mut().expect("checked Some above");
                        seg.kind = SegmentKind::DoubleStar;
                    }
                    _ => {
                        self.emit_segment(SegmentKind::Star, self.input_q, self.input_i);
                    }
                }
            }
            '?' => {
                self.flush_literal();
                self.emit_segment(SegmentKind::Question, self.input_q, self.input_i);
            }
            '\\' => self.state = State::RootEsc,
            '/' => {
                if self.last_segment_kind() == Some(SegmentKind::DoubleStar) {
                    let seg = self.segments.last_mut().expect("checked Some above");
                    seg.kind = SegmentKind::DoubleStarSlash;
                } else {
                    self.emit_literal_char('/');
                }
            }
            other => self.emit_literal_char(other),
        }
    }

    fn step_charset_initial_or_head(&mut self, ch: char, allow_negate: bool) {
        match ch {
            '[' => self.fail(Reason::UnexpectedOpenBracket),
            ']' => {
                if self.want_set {
                    self.fail(Reason::UnexpectedCloseBracket);
                } else {
                    self.flush_set();
                    self.state = State::Root;
                }
            }
            '\\' => self.state = State::CharsetHeadEsc,
            '^' if allow_negate => {
                self.negate = true;
                self.state = State::CharsetHead;
            }
            other => {
                self.emit_set_lo(other);
                self.state = State::CharsetMid;
            }
        }
    }

    fn step_charset_mid(&mut self, ch: char) {
        match ch {
            '[' => self.fail(Reason::UnexpectedOpenBracket),
            ']' => {
                if self.want_set {
                    self.fail(Reason::UnexpectedCloseBracket);
                } else {
                    self.flush_set();
                    self.state = State::Root;
                }
            }
            '\\' => self.state = State::CharsetHeadEsc,
            '-' => self.state = State::CharsetTail,
            other => self.emit_set_lo(other),
        }
    }

    fn step_charset_tail(&mut self, ch: char) {
        match ch {
            '[' => self.fail(Reason::UnexpectedOpenBracket),
            ']' => {
                if self.want_set {
                    self.fail(Reason::UnexpectedCloseBracket);
                } else {
                    self.emit_set_lo('-');
                    self.flush_set();
                    self.state = State::Root;
                }
            }
            '\\' => self.state = State::CharsetTailEsc,
            other => {
                self.emit_set_hi(other);
                self.state = State::CharsetHead;
            }
        }
    }

    fn finish(&mut self) {
        match self.state {
            State::Root => {
                debug_assert!(!self.want_set, "BUG! ParseState is Root but want_set is true");
                self.flush_literal();
            }
            State::CharsetInitial | State::CharsetHead | State::CharsetMid => {
                if !self.want_set {
                    self.fail(Reason::UnterminatedCharacterSet);
                    return;
                }
                self.flush_set();
            }
            State::CharsetTail => {
                if !self.want_set {
                    self.fail(Reason::UnterminatedCharacterSet);
                    return;
                }
                self.emit_set_lo('-');
                self.flush_set();
            }
            _ => {
                self.fail(Reason::UnterminatedBackslashEscape);
            }
        }
    }

    fn into_result(self) -> Result<ParseOutput, Error> {
        match self.err {
            Some(reason) => Err(Error::new(self.subject, self.input.as_str(), reason)),
            None => Ok(ParseOutput { segments: self.segments }),
        }
    }
}

/// Parses a full glob pattern into its segment sequence (length analysis is
/// performed by the caller in `pattern.rs`).
pub(crate) fn parse_pattern(input: NormalizedString) -> Result<ParseOutput, Error> {
    let mut parser = Parser::new(input, false, Subject::Pattern);
    parser.run();
    parser.into_result()
}

/// Parses a standalone character set (`CompileRuneMatcher`'s slow path --
/// the `^`/empty fast paths live in `pattern.rs`).
pub(crate) fn parse_charset(input: NormalizedString) -> Result<ParseOutput, Error> {
    let mut parser = Parser::new(input, true, Subject::CharacterSet);
    parser.run();
    parser.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rune::RuneMatcher;

    fn segments_of(pattern: &str) -> Vec<Segment> {
        parse_pattern(NormalizedString::normalize(pattern))
            .unwrap_or_else(|e| panic!("unexpected parse error for {:?}: {}", pattern, e))
            .segments
    }

    #[test]
    fn empty_pattern_has_no_segments() {
        assert!(segments_of("").is_empty());
    }

    #[test]
    fn simple_pattern_segment_shape() {
        // foo/bar/[0-9][0-9]-?
        let segs = segments_of("foo/bar/[0-9][0-9]-?");
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[0].kind, SegmentKind::Literal);
        assert_eq!(segs[0].literal.as_str(), "foo/bar/");
        assert_eq!(segs[1].kind, SegmentKind::RuneMatch);
        assert_eq!(segs[1].matcher, RuneMatcher::Range('0', '9'));
        assert_eq!(segs[2].kind, SegmentKind::RuneMatch);
        assert_eq!(segs[3].kind, SegmentKind::Literal);
        assert_eq!(segs[3].literal.as_str(), "-");
        assert_eq!(segs[4].kind, SegmentKind::Question);
    }

    #[test]
    fn double_star_and_double_star_slash_promotion() {
        let segs = segments_of("a**/b");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].kind, SegmentKind::Literal);
        assert_eq!(segs[1].kind, SegmentKind::DoubleStarSlash);
        assert_eq!(segs[2].kind, SegmentKind::Literal);
    }

    #[test]
    fn double_star_without_slash() {
        let segs = segments_of("a**b");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1].kind, SegmentKind::DoubleStar);
    }

    #[test]
    fn promotion_does_not_widen_the_pattern_span() {
        // A `*` promoted to `DoubleStar` (or `DoubleStar` promoted to
        // `DoubleStarSlash`) keeps the pattern_p/pattern_q span the first
        // `*` was emitted with; it is never widened to cover the later
        // `*`/`/` runes that triggered the promotion. This matches
        // `internal/guts/parse.go::Parser.Run`, whose `case '*':`/`case
        // '/':` promotion branches only rewrite `LastSegment.Type` and
        // never touch `PatternP`/`PatternQ`.
        let segs = segments_of("a**b");
        assert_eq!(segs[1].kind, SegmentKind::DoubleStar);
        assert_eq!((segs[1].pattern_p, segs[1].pattern_q), (1, 2));

        let segs = segments_of("a**/b");
        assert_eq!(segs[1].kind, SegmentKind::DoubleStarSlash);
        assert_eq!((segs[1].pattern_p, segs[1].pattern_q), (1, 2));
    }

    #[test]
    fn triple_star_is_an_error() {
        let err = parse_pattern(NormalizedString::normalize("***")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse glob pattern: \"***\": unexpected '***'"
        );
    }

    #[test]
    fn unexpected_close_bracket() {
        let err = parse_pattern(NormalizedString::normalize("a]")).unwrap_err();
        assert_eq!(*err.reason(), Reason::UnexpectedCloseBracket);
    }

    #[test]
    fn brace_is_rejected() {
        let err = parse_pattern(NormalizedString::normalize("{a,b}")).unwrap_err();
        assert_eq!(*err.reason(), Reason::UnexpectedOpenBrace);
    }

    #[test]
    fn unterminated_set_is_an_error() {
        let err = parse_pattern(NormalizedString::normalize("[abc")).unwrap_err();
        assert_eq!(*err.reason(), Reason::UnterminatedCharacterSet);
    }

    #[test]
    fn unterminated_escape_is_an_error() {
        let err = parse_pattern(NormalizedString::normalize("abc\\")).unwrap_err();
        assert_eq!(*err.reason(), Reason::UnterminatedBackslashEscape);
    }

    #[test]
    fn trailing_dash_in_set_is_literal() {
        // [a-] compiles to a set containing 'a' and '-'.
        let segs = segments_of("[a-]");
        assert_eq!(segs.len(), 1);
        match &segs[0].matcher {
            RuneMatcher::Set { ranges, .. } => {
                assert!(ranges.contains(&('-', '-')));
                assert!(ranges.contains(&('a', 'a')));
            }
            other => panic!("expected Set, got {:?}", other),
        }
    }

    #[test]
    fn inverted_range_is_an_error() {
        let err = parse_pattern(NormalizedString::normalize("[z-a]")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse glob pattern: \"[z-a]\": invalid range, lo U+007A > hi U+0061"
        );
    }

    #[test]
    fn escapes_resolve_literal_chars() {
        let segs = segments_of("\\*\\?\\[\\]\\{\\}\\^\\-\\\\");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].literal.as_str(), "*?[]{}^-\\");
    }

    #[test]
    fn numeric_escapes() {
        let segs = segments_of("\\x41\\u0042\\U00000043\\o101");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].literal.as_str(), "ABCA");
    }

    #[test]
    fn null_escape() {
        let segs = segments_of("\\0");
        assert_eq!(segs[0].literal.runes(), &['\u{0}']);
    }

    #[test]
    fn negated_charset() {
        let segs = segments_of("[^abc]");
        assert_eq!(segs.len(), 1);
        assert!(!segs[0].matcher.match_rune('a'));
        assert!(segs[0].matcher.match_rune('d'));
    }
}
