use super::*;

fn decode_id(raw: &str) -> DocumentId {
    match DocumentId::decode(raw).expect("well-formed identifier") {
        Decoded::Id(id) => id,
        Decoded::Obsolete => panic!("unexpected legacy identifier '{raw}'"),
    }
}

#[test]
fn site_identifier_round_trips() {
    let id = decode_id("/sales/");
    assert_eq!(
        id,
        DocumentId::Site {
            path: "/sales".into()
        }
    );
    assert_eq!(id.encode(), "/sales/");
}

#[test]
fn root_site_is_the_empty_path() {
    let id = decode_id("/");
    assert_eq!(id, DocumentId::Site { path: String::new() });
    assert_eq!(id.encode(), "/");
}

#[test]
fn library_identifier_round_trips() {
    let id = decode_id("/sales/docs//");
    assert_eq!(
        id,
        DocumentId::Library {
            path: "/sales/docs".into()
        }
    );
    assert_eq!(id.encode(), "/sales/docs//");
}

#[test]
fn file_identifier_splits_on_first_double_slash() {
    let id = decode_id("/sales/docs//reports/q1.pdf");
    assert_eq!(
        id,
        DocumentId::File {
            library_path: "/sales/docs".into(),
            file_path: "reports/q1.pdf".into(),
        }
    );
    assert_eq!(id.encode(), "/sales/docs//reports/q1.pdf");
}

#[test]
fn list_identifier_round_trips() {
    let id = decode_id("/sales/issues///");
    assert_eq!(
        id,
        DocumentId::List {
            path: "/sales/issues".into()
        }
    );
    assert_eq!(id.encode(), "/sales/issues///");
}

#[test]
fn list_item_identifier_round_trips() {
    let id = decode_id("/sales/issues///42");
    assert_eq!(
        id,
        DocumentId::ListItem {
            list_path: "/sales/issues".into(),
            item_id: "42".into(),
        }
    );
    assert_eq!(id.encode(), "/sales/issues///42");
}

#[test]
fn attachment_identifier_round_trips() {
    let id = decode_id("/sales/issues///42/photo.png");
    assert_eq!(
        id,
        DocumentId::Attachment {
            list_path: "/sales/issues".into(),
            item_id: "42".into(),
            file_name: "photo.png".into(),
        }
    );
    assert_eq!(id.encode(), "/sales/issues///42/photo.png");
}

#[test]
fn nested_site_paths_decode_to_deepest_shape() {
    assert_eq!(
        decode_id("/a/b/c/"),
        DocumentId::Site {
            path: "/a/b/c".into()
        }
    );
    assert_eq!(
        decode_id("/a/b/c//"),
        DocumentId::Library {
            path: "/a/b/c".into()
        }
    );
    assert_eq!(
        decode_id("/a/b/c///"),
        DocumentId::List {
            path: "/a/b/c".into()
        }
    );
}

#[test]
fn legacy_prefixes_signal_obsolete() {
    assert_eq!(DocumentId::decode("D123456").unwrap(), Decoded::Obsolete);
    assert_eq!(
        DocumentId::decode("Ssales.docs.q1").unwrap(),
        Decoded::Obsolete
    );
}

#[test]
fn malformed_identifiers_are_rejected() {
    for raw in ["", "sales/docs", "/sales/docs", "x/", "relative//lib"] {
        let err = DocumentId::decode(raw).unwrap_err();
        assert_eq!(err.identifier(), raw);
    }
}

#[test]
fn shape_is_unambiguous_per_identifier() {
    // The list separator wins over the library separator even though `///`
    // contains `//`.
    assert_eq!(decode_id("/s/l///7").kind(), IdentifierKind::ListItem);
    assert_eq!(decode_id("/s/l//f").kind(), IdentifierKind::File);
}

#[test]
fn kinds_display_as_lowercase_names() {
    assert_eq!(decode_id("/a/").kind().to_string(), "site");
    assert_eq!(decode_id("/a/b//").kind().to_string(), "library");
    assert_eq!(decode_id("/a/b///").kind().to_string(), "list");
}

#[test]
fn round_trip_over_known_shapes() {
    let identifiers = [
        "/",
        "/sales/",
        "/sales/emea/",
        "/sales/docs//",
        "/sales/docs//q1.pdf",
        "/sales/docs//reports/deep/q1.pdf",
        "/sales/issues///",
        "/sales/issues///42",
        "/sales/issues///42/photo.png",
        "/sales/issues///42/sub/photo.png",
    ];
    for raw in identifiers {
        let id = decode_id(raw);
        assert_eq!(id.encode(), raw, "round-trip failed for '{raw}'");
    }
}
