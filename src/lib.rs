//-
// Copyright 2026 The globmatch developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Filesystem-independent glob pattern matching.
//!
//! `globmatch` compiles a glob pattern (`foo/bar/[0-9][0-9]-?*.[ch]`-style,
//! with Unicode-aware character classes and `*`/`**`/`**/` wildcards) into a
//! [`CompiledPattern`], then matches it against input strings one segment
//! at a time via a [`Matcher`]. Matching is purely string-to-string: this
//! crate never touches a filesystem, so callers decide what "input" means
//! (a path, an import specifier, anything segmented by `/`).
//!
//! ```
//! let pattern = globmatch::compile("src/**/*.rs").unwrap();
//! assert!(pattern.matcher("src/lib/parser.rs").matches());
//! assert!(!pattern.matcher("src/lib/parser.go").matches());
//! ```
//!
//! Both the pattern and every input string are NFKC-normalized before
//! matching, so canonically equivalent Unicode spellings always compare
//! equal. Character classes can also be compiled standalone, independent of
//! a full pattern, via [`compile_rune_matcher`].

mod error;
mod matcher;
mod normalize;
mod parser;
mod pattern;
mod rune;
mod segment;
mod set_builder;

pub use error::{Error, Reason};
pub use matcher::{Capture, Matcher};
pub use normalize::NormalizedString;
pub use pattern::{compile, compile_rune_matcher, CompiledPattern};
pub use rune::RuneMatcher;
pub use segment::{Segment, SegmentKind, UNBOUNDED};
pub use set_builder::{build_set, Range};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_example_compiles_and_matches() {
        let pattern = compile("src/**/*.rs").unwrap();
        assert!(pattern.matcher("src/lib/parser.rs").matches());
        assert!(!pattern.matcher("src/lib/parser.go").matches());
    }

    #[test]
    fn compile_rune_matcher_is_reachable_from_the_crate_root() {
        let m = compile_rune_matcher("a-z").unwrap();
        assert!(m.match_rune('m'));
    }
}
