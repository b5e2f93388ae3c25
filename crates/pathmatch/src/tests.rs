use super::*;

#[test]
fn literal_match_requires_full_consumption() {
    assert!(match_exact("/site/lib", "/site/lib"));
    assert!(!match_exact("/site/lib", "/site"));
    assert!(!match_exact("/site", "/site/lib"));
}

#[test]
fn star_matches_any_run_including_separators() {
    assert!(match_exact("/site/lib/a.txt", "/site/lib/*.txt"));
    assert!(match_exact("/site/lib/deep/nested/a.txt", "/site/*.txt"));
    assert!(match_exact("/site/lib/a.txt", "*"));
    assert!(!match_exact("/site/lib/a.txt", "/site/lib/*.doc"));
}

#[test]
fn star_matches_empty_run() {
    assert!(match_exact("/site/lib/", "/site/lib/*"));
    assert!(match_exact("", "*"));
    assert!(match_exact("", "***"));
}

#[test]
fn question_mark_matches_exactly_one_character() {
    assert!(match_exact("/site/a", "/site/?"));
    assert!(!match_exact("/site/ab", "/site/?"));
    assert!(!match_exact("/site/", "/site/?"));
    // A separator is an ordinary character to `?`.
    assert!(match_exact("/site/a/b", "/site/a?b"));
}

#[test]
fn matching_is_case_sensitive() {
    assert!(!match_exact("/Site/lib", "/site/lib"));
    assert!(!match_exact("/site/LIB/a.txt", "/site/lib/*.txt"));
}

#[test]
fn empty_pattern_only_matches_empty_candidate() {
    assert!(match_exact("", ""));
    assert!(!match_exact("/site", ""));
}

#[test]
fn multibyte_characters_count_as_single_characters() {
    assert!(match_exact("/sitio/año", "/sitio/añ?"));
    assert!(match_exact("/sitio/año", "/sitio/*o"));
}

#[test]
fn partial_match_accepts_ancestor_of_deeper_pattern() {
    assert!(match_partial("/site", "/site/lib/*", 1));
    assert!(match_partial("/site", "/site/lib/folder/*", 2));
    assert!(!match_partial("/site", "/othersite/*", 1));
}

#[test]
fn partial_match_normalizes_trailing_separator() {
    // Candidate with and without the trailing slash behave identically.
    assert!(match_partial("/site/", "/site/lib/*", 1));
    assert!(match_partial("/site", "/site/lib/*", 1));
}

#[test]
fn partial_match_same_depth_requires_no_extra_sections() {
    assert!(match_partial("/site", "/site/", 0));
    assert!(!match_partial("/site/lib", "/site/", 0));
}

#[test]
fn partial_match_exhausted_pattern_fails_when_sections_required() {
    // Pattern is consumed together with the candidate; nothing remains to
    // produce the required deeper section.
    assert!(!match_partial("/site", "/site/", 1));
}

#[test]
fn partial_match_star_can_stand_for_entire_subtree() {
    assert!(match_partial("/site", "*", 1));
    assert!(match_partial("/site/sub", "/site/*/docs/*", 1));
}

#[test]
fn partial_match_is_approximate_not_exact_counting() {
    // Remaining pattern "x" cannot actually produce two more sections, but
    // the legacy-compatible matcher still accepts; see crate docs.
    assert!(match_partial("/site", "/site/x", 2));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn path_char() -> impl Strategy<Value = char> {
        prop_oneof![
            Just('a'),
            Just('b'),
            Just('c'),
            Just('0'),
            Just('1'),
            Just('_'),
            Just('-'),
            Just('.'),
            Just('/'),
        ]
    }

    fn path_string() -> impl Strategy<Value = String> {
        proptest::collection::vec(path_char(), 0..24).prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn candidate_always_matches_itself(path in path_string()) {
            prop_assert!(match_exact(&path, &path));
        }

        #[test]
        fn lone_star_matches_everything(path in path_string()) {
            prop_assert!(match_exact(&path, "*"));
        }

        #[test]
        fn question_marks_match_same_length_strings(path in path_string()) {
            let pattern: String = path.chars().map(|_| '?').collect();
            prop_assert!(match_exact(&path, &pattern));
        }

        #[test]
        fn exact_match_implies_partial_match_with_zero_sections(path in path_string()) {
            let mut pattern = path.clone();
            if !pattern.ends_with('/') {
                pattern.push('/');
            }
            prop_assert!(match_partial(&path, &pattern, 0));
        }

        #[test]
        fn prefix_is_partial_match_of_deeper_pattern(path in path_string()) {
            let mut pattern = path.clone();
            if !pattern.ends_with('/') {
                pattern.push('/');
            }
            pattern.push_str("deeper/*");
            prop_assert!(match_partial(&path, &pattern, 1));
        }
    }
}
