#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `pathmatch` provides the wildcard matcher used by the scope rules of the
//! SharePoint connector core. Patterns are administrative path strings with
//! two wildcards: `*` matches any run of zero or more characters and `?`
//! matches exactly one character. Unlike shell globs, **both wildcards cross
//! path separators** -- `*` in a rule written for a file several levels down
//! can swallow intermediate `/` characters. Matching is case-sensitive.
//!
//! # Design
//!
//! Two entry points share one classical recursive-backtracking core:
//!
//! - [`match_exact`] succeeds only when candidate and pattern are consumed
//!   simultaneously. On `*` the matcher branches into "advance candidate,
//!   keep the star" and "drop the star, keep the candidate".
//! - [`match_partial`] answers a different question: could the candidate be
//!   a structural *ancestor* of something the pattern fully describes? The
//!   candidate is normalized to end with `/` and the match succeeds as soon
//!   as the candidate is consumed while unmatched pattern remains, taken as
//!   proof that at least one further path segment is reachable.
//!
//! The backtracking matcher is exponential in pathological inputs; that is
//! acceptable here because candidates and patterns are short administrative
//! strings (tens to low hundreds of characters), configured by an operator
//! rather than supplied by untrusted content.
//!
//! # Invariants
//!
//! - Every pattern string is well-formed; there is no compilation step and
//!   no failure mode. Both functions are total over `&str` inputs.
//! - `match_partial` may answer `true` more often than an exact
//!   segment-counting oracle would (it distinguishes only "no further
//!   segments required" from "some required"), but it never answers `false`
//!   for a candidate that genuinely sits above a matching path. Callers use
//!   it to decide whether to descend into a subtree, where over-inclusion
//!   costs one wasted probe and over-exclusion would silently drop scope.
//!
//! # Examples
//!
//! ```
//! use pathmatch::{match_exact, match_partial};
//!
//! assert!(match_exact("/site/lib/a.txt", "/site/lib/*.txt"));
//! assert!(!match_exact("/site/lib/a.txt", "/site/lib/*.doc"));
//!
//! // "/site" could be an ancestor of "/site/lib/<something>".
//! assert!(match_partial("/site", "/site/lib/*", 1));
//! assert!(!match_partial("/site", "/othersite/*", 1));
//! ```

/// Returns `true` if `candidate` matches `pattern` in its entirety.
///
/// `*` matches any run of zero or more characters (including `/`) and `?`
/// matches exactly one character (including `/`). The comparison is
/// case-sensitive and succeeds only when both strings are consumed
/// simultaneously.
#[must_use]
pub fn match_exact(candidate: &str, pattern: &str) -> bool {
    let source: Vec<char> = candidate.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    check(&source, 0, &pattern, 0)
}

/// Returns `true` if `candidate` could be an ancestor of a path that fully
/// matches `pattern`.
///
/// The candidate is normalized to end with a path separator before
/// matching. Success is declared once the candidate is fully consumed while
/// unmatched pattern remains; `required_trailing_segments` states how many
/// further `/`-delimited sections the pattern must still be able to produce
/// (0 for same-type rules, 1 or 2 when the rule targets an object one or two
/// levels deeper than the candidate).
///
/// The trailing-segment check is deliberately approximate: it distinguishes
/// "none required" from "some required" rather than counting the sections
/// the remaining pattern can actually produce, preserving the behavior that
/// deployed job specifications rely on. It may therefore admit a candidate
/// whose remaining pattern can only produce fewer sections than requested;
/// it never rejects a genuine ancestor.
#[must_use]
pub fn match_partial(candidate: &str, pattern: &str, required_trailing_segments: usize) -> bool {
    let mut normalized = candidate.to_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let source: Vec<char> = normalized.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    partial_check(&source, 0, &pattern, 0, required_trailing_segments)
}

/// Recursive worker for [`match_exact`]. Succeeds when some branch consumes
/// both strings in their entirety.
fn check(source: &[char], mut source_index: usize, pattern: &[char], mut pattern_index: usize) -> bool {
    loop {
        if source_index == source.len() && pattern_index == pattern.len() {
            return true;
        }
        if pattern_index == pattern.len() {
            return false;
        }
        if source_index == source.len() {
            // Only a star can absorb an empty remainder.
            if pattern[pattern_index] != '*' {
                return false;
            }
            pattern_index += 1;
            continue;
        }
        let y = pattern[pattern_index];
        if y == '*' {
            return check(source, source_index + 1, pattern, pattern_index)
                || check(source, source_index, pattern, pattern_index + 1);
        }
        if y == '?' || y == source[source_index] {
            source_index += 1;
            pattern_index += 1;
        } else {
            return false;
        }
    }
}

/// Recursive worker for [`match_partial`]. Succeeds when some branch
/// consumes the candidate entirely and leaves the pattern able to match the
/// required follow-up.
fn partial_check(
    source: &[char],
    mut source_index: usize,
    pattern: &[char],
    mut pattern_index: usize,
    required_trailing_segments: usize,
) -> bool {
    loop {
        if source_index == source.len() {
            // Candidate consumed. An exhausted pattern passes only when no
            // further sections are required; leftover pattern can still
            // match a path separator, so the candidate wins.
            if pattern_index == pattern.len() {
                return required_trailing_segments == 0;
            }
            return true;
        }
        if pattern_index == pattern.len() {
            return false;
        }
        let y = pattern[pattern_index];
        if y == '*' {
            return partial_check(
                source,
                source_index + 1,
                pattern,
                pattern_index,
                required_trailing_segments,
            ) || partial_check(
                source,
                source_index,
                pattern,
                pattern_index + 1,
                required_trailing_segments,
            );
        }
        if y == '?' || y == source[source_index] {
            source_index += 1;
            pattern_index += 1;
        } else {
            return false;
        }
    }
}

#[cfg(test)]
mod tests;
