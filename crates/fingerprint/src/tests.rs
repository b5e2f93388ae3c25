use super::*;

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

fn baseline_parts<'a>(fields: &'a [String], acls: &'a [String]) -> VersionParts<'a> {
    VersionParts {
        metadata: FieldSelection::Named(fields),
        include_acls: Some(acls),
        deny_acls: Some(&[]),
        modified: Some(1_000),
        created: Some(2_000),
        opaque_tail: "token_https://repo.example.com/",
    }
}

#[test]
fn build_is_independent_of_input_collection_order() {
    let fields_ab = owned(&["B", "A"]);
    let fields_ba = owned(&["A", "B"]);
    let acls_yx = owned(&["y", "x"]);
    let acls_xy = owned(&["x", "y"]);

    let first = Fingerprint::build(&baseline_parts(&fields_ab, &acls_yx));
    let second = Fingerprint::build(&baseline_parts(&fields_ba, &acls_xy));
    assert_eq!(first, second);
}

#[test]
fn build_deduplicates_fields_and_acls() {
    let duplicated = owned(&["A", "A", "B"]);
    let unique = owned(&["A", "B"]);
    let acls = owned(&["x"]);

    let first = Fingerprint::build(&baseline_parts(&duplicated, &acls));
    let second = Fingerprint::build(&baseline_parts(&unique, &acls));
    assert_eq!(first, second);
}

#[test]
fn changing_any_field_changes_the_fingerprint() {
    let fields = owned(&["A", "B"]);
    let acls = owned(&["x", "y"]);
    let base = Fingerprint::build(&baseline_parts(&fields, &acls));

    let other_fields = owned(&["A", "C"]);
    assert_ne!(base, Fingerprint::build(&baseline_parts(&other_fields, &acls)));

    let other_acls = owned(&["x", "z"]);
    assert_ne!(base, Fingerprint::build(&baseline_parts(&fields, &other_acls)));

    let mut parts = baseline_parts(&fields, &acls);
    parts.modified = Some(1_001);
    assert_ne!(base, Fingerprint::build(&parts));

    let mut parts = baseline_parts(&fields, &acls);
    parts.created = Some(2_001);
    assert_ne!(base, Fingerprint::build(&parts));

    let deny = owned(&["d"]);
    let mut parts = baseline_parts(&fields, &acls);
    parts.deny_acls = Some(&deny);
    assert_ne!(base, Fingerprint::build(&parts));

    let mut parts = baseline_parts(&fields, &acls);
    parts.opaque_tail = "token_https://other.example.com/";
    assert_ne!(base, Fingerprint::build(&parts));
}

#[test]
fn security_off_differs_from_zero_acls() {
    let fields = owned(&["A"]);
    let empty = owned(&[]);

    let zero_acls = Fingerprint::build(&baseline_parts(&fields, &empty));
    let mut parts = baseline_parts(&fields, &empty);
    parts.include_acls = None;
    parts.deny_acls = None;
    let security_off = Fingerprint::build(&parts);
    assert_ne!(zero_acls, security_off);

    let parsed = ParsedVersion::parse(security_off.as_str()).unwrap();
    assert_eq!(parsed.include_acls, None);
    assert_eq!(parsed.deny_acls, None);

    let parsed = ParsedVersion::parse(zero_acls.as_str()).unwrap();
    assert_eq!(parsed.include_acls, Some(Vec::new()));
}

#[test]
fn all_metadata_expands_to_known_fields() {
    let known = owned(&["Title", "Author", "Modified"]);
    let explicit = owned(&["Author", "Modified", "Title"]);
    let acls = owned(&["x"]);

    let mut all_parts = baseline_parts(&known, &acls);
    all_parts.metadata = FieldSelection::All {
        known_fields: &known,
    };
    let mut named_parts = baseline_parts(&explicit, &acls);
    named_parts.metadata = FieldSelection::Named(&explicit);

    assert_eq!(
        Fingerprint::build(&all_parts),
        Fingerprint::build(&named_parts)
    );
}

#[test]
fn parse_recovers_all_packed_fields() {
    let fields = owned(&["Title", "Author"]);
    let acls = owned(&["sid:b", "sid:a"]);
    let deny = owned(&["sid:deny"]);
    let parts = VersionParts {
        metadata: FieldSelection::Named(&fields),
        include_acls: Some(&acls),
        deny_acls: Some(&deny),
        modified: Some(1_700_000_000_000),
        created: None,
        opaque_tail: "tail with + delimiters _ and stuff",
    };
    let token = Fingerprint::build(&parts);

    let parsed = ParsedVersion::parse(token.as_str()).unwrap();
    assert_eq!(parsed.metadata_fields, owned(&["Author", "Title"]));
    assert_eq!(parsed.include_acls, Some(owned(&["sid:a", "sid:b"])));
    assert_eq!(parsed.deny_acls, Some(owned(&["sid:deny"])));
    assert_eq!(parsed.modified, Some(1_700_000_000_000));
    assert_eq!(parsed.created, None);
}

#[test]
fn absent_dates_parse_as_none_not_zero() {
    let fields = owned(&["A"]);
    let acls = owned(&[]);
    let mut parts = baseline_parts(&fields, &acls);
    parts.modified = None;
    parts.created = None;
    let token = Fingerprint::build(&parts);

    let parsed = ParsedVersion::parse(token.as_str()).unwrap();
    assert_eq!(parsed.modified, None);
    assert_eq!(parsed.created, None);
}

#[test]
fn hostile_acl_content_does_not_corrupt_adjacent_fields() {
    let fields = owned(&["plus+field", "back\\slash"]);
    let acls = owned(&["sid:a+b", "sid:c\\d", ""]);
    let deny = owned(&["+", "\\"]);
    let parts = VersionParts {
        metadata: FieldSelection::Named(&fields),
        include_acls: Some(&acls),
        deny_acls: Some(&deny),
        modified: Some(42),
        created: Some(7),
        opaque_tail: "",
    };
    let token = Fingerprint::build(&parts);

    let parsed = ParsedVersion::parse(token.as_str()).unwrap();
    assert_eq!(parsed.metadata_fields, owned(&["back\\slash", "plus+field"]));
    assert_eq!(parsed.include_acls, Some(owned(&["", "sid:a+b", "sid:c\\d"])));
    assert_eq!(parsed.deny_acls, Some(owned(&["+", "\\"])));
    assert_eq!(parsed.modified, Some(42));
    assert_eq!(parsed.created, Some(7));
}

#[test]
fn parse_rejects_foreign_data() {
    assert!(ParsedVersion::parse("not a fingerprint").is_err());
    assert!(ParsedVersion::parse("").is_err());
}

#[test]
fn parse_rejects_an_absurd_field_count_without_allocating() {
    // A corrupt length prefix must surface as a parse error, not size an
    // allocation.
    assert_eq!(
        ParsedVersion::parse("18446744073709551615+"),
        Err(FingerprintParseError::Truncated)
    );
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn token() -> impl Strategy<Value = String> {
        // Deliberately include the delimiter and escape characters.
        proptest::string::string_regex("[a-z+\\\\=&_:/]{0,12}").expect("valid regex")
    }

    fn token_set() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(token(), 0..6)
    }

    proptest! {
        #[test]
        fn packed_fields_round_trip(
            fields in token_set(),
            acls in token_set(),
            deny in token_set(),
            modified in proptest::option::of(0i64..4_000_000_000_000),
            created in proptest::option::of(0i64..4_000_000_000_000),
            tail in token(),
        ) {
            let parts = VersionParts {
                metadata: FieldSelection::Named(&fields),
                include_acls: Some(&acls),
                deny_acls: Some(&deny),
                modified,
                created,
                opaque_tail: &tail,
            };
            let parsed = ParsedVersion::parse(Fingerprint::build(&parts).as_str()).unwrap();

            let mut expected_fields = fields.clone();
            expected_fields.sort();
            expected_fields.dedup();
            prop_assert_eq!(parsed.metadata_fields, expected_fields);
            prop_assert_eq!(parsed.modified, modified);
            prop_assert_eq!(parsed.created, created);
        }
    }
}
