#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `fingerprint` builds and parses the compact version token the connector
//! core uses for change detection. A fingerprint packs every
//! content-relevant attribute of a repository object -- the selected
//! metadata field names, the include and deny ACL token sets, and the
//! modified/created timestamps -- into one string, followed by an
//! unstructured tail. The incremental store compares fingerprints by plain
//! string equality; a changed byte anywhere forces a refetch.
//!
//! # Design
//!
//! The packed region uses the escaped, length-prefixed encoding in
//! [`packed`]: elements may contain the delimiter or the escape character
//! freely, empty lists are distinguishable from absent lists, and absent
//! dates are distinguishable from epoch zero. String collections are
//! deduplicated and sorted lexicographically before packing so equality is
//! independent of the order the vendor API happened to return them in.
//!
//! The tail is appended verbatim and never parsed back. It exists to fold
//! configuration that affects ingestion -- the raw upstream modify token,
//! the serialized path-attribute/path-map setup, the effective base URL --
//! into the equality check, so an operator editing a path mapping reingests
//! everything it touches.
//!
//! # Invariants
//!
//! - Two fingerprints are equal iff all packed fields and the tail are
//!   equal.
//! - [`ParsedVersion::parse`] recovers every packed field of a fingerprint
//!   produced by [`Fingerprint::build`] (the tail is skipped, not
//!   recovered).
//! - Building is pure and total; parsing fails only on truncated or
//!   foreign data.
//!
//! # Examples
//!
//! ```
//! use fingerprint::{FieldSelection, Fingerprint, ParsedVersion, VersionParts};
//!
//! let fields = ["Title".to_owned(), "Author".to_owned()];
//! let acls = ["sid:team".to_owned()];
//! let deny = ["sid:deny-default".to_owned()];
//! let token = Fingerprint::build(&VersionParts {
//!     metadata: FieldSelection::Named(&fields),
//!     include_acls: Some(&acls),
//!     deny_acls: Some(&deny),
//!     modified: Some(1_700_000_000_000),
//!     created: None,
//!     opaque_tail: "raw-token=path:map_https://repo.example.com/",
//! });
//!
//! let parsed = ParsedVersion::parse(token.as_str()).unwrap();
//! assert_eq!(parsed.metadata_fields, ["Author", "Title"]);
//! assert_eq!(parsed.modified, Some(1_700_000_000_000));
//! assert_eq!(parsed.created, None);
//! ```

mod error;
pub mod packed;

pub use error::FingerprintParseError;

use std::collections::BTreeSet;
use std::fmt;

/// Delimiter separating packed elements within a fingerprint.
const DELIMITER: char = '+';

/// Which metadata fields a fingerprint should cover.
#[derive(Clone, Copy, Debug)]
pub enum FieldSelection<'a> {
    /// "All metadata" was requested; expand to the full field-name set the
    /// vendor reported for the containing library or list.
    All {
        /// Every field name known for the container.
        known_fields: &'a [String],
    },
    /// An explicit field-name selection from the job specification.
    Named(&'a [String]),
}

/// Inputs for building one fingerprint.
///
/// ACL slices are `None` when security is disabled for the job, which is
/// recorded distinctly from an empty token set.
#[derive(Clone, Copy, Debug)]
pub struct VersionParts<'a> {
    /// Metadata field selection, possibly expanded from "all metadata".
    pub metadata: FieldSelection<'a>,
    /// Access-granting ACL tokens, or `None` when security is off.
    pub include_acls: Option<&'a [String]>,
    /// Access-denying ACL tokens, or `None` when security is off.
    pub deny_acls: Option<&'a [String]>,
    /// Modified timestamp in epoch milliseconds (UTC), when known.
    pub modified: Option<i64>,
    /// Created timestamp in epoch milliseconds (UTC), when known.
    pub created: Option<i64>,
    /// Unstructured invalidation tail, appended verbatim and never parsed.
    pub opaque_tail: &'a str,
}

/// Opaque version token compared by string equality.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Builds the fingerprint for one object.
    ///
    /// Field names and ACL tokens are deduplicated and sorted before
    /// packing, so the result does not depend on input collection order.
    #[must_use]
    pub fn build(parts: &VersionParts<'_>) -> Self {
        let fields = match parts.metadata {
            FieldSelection::All { known_fields } => sorted_unique(known_fields),
            FieldSelection::Named(fields) => sorted_unique(fields),
        };

        let mut output = String::new();
        packed::pack_list(&mut output, &fields, DELIMITER);
        pack_acls(&mut output, parts.include_acls);
        pack_acls(&mut output, parts.deny_acls);
        packed::pack_date(&mut output, parts.modified, DELIMITER);
        packed::pack_date(&mut output, parts.created, DELIMITER);
        output.push_str(parts.opaque_tail);
        Self(output)
    }

    /// Returns the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fingerprint, returning the underlying string for the
    /// external version store.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured fields recovered from a stored fingerprint.
///
/// The opaque tail participates in equality but is never decoded, so it
/// does not appear here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedVersion {
    /// Sorted metadata field names the fingerprint covers.
    pub metadata_fields: Vec<String>,
    /// Sorted include-ACL tokens, or `None` when security was off.
    pub include_acls: Option<Vec<String>>,
    /// Sorted deny-ACL tokens, or `None` when security was off.
    pub deny_acls: Option<Vec<String>>,
    /// Modified timestamp in epoch milliseconds, when one was recorded.
    pub modified: Option<i64>,
    /// Created timestamp in epoch milliseconds, when one was recorded.
    pub created: Option<i64>,
}

impl ParsedVersion {
    /// Parses the packed region of a stored fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintParseError`] when the packed data is truncated
    /// or was not produced by [`Fingerprint::build`].
    pub fn parse(raw: &str) -> Result<Self, FingerprintParseError> {
        let (metadata_fields, rest) = packed::unpack_list(raw, DELIMITER)?;
        let (include_acls, rest) = packed::unpack_tagged_list(rest, DELIMITER)?;
        let (deny_acls, rest) = packed::unpack_tagged_list(rest, DELIMITER)?;
        let (modified, rest) = packed::unpack_date(rest, DELIMITER)?;
        let (created, _tail) = packed::unpack_date(rest, DELIMITER)?;
        Ok(Self {
            metadata_fields,
            include_acls,
            deny_acls,
            modified,
            created,
        })
    }
}

fn pack_acls(output: &mut String, acls: Option<&[String]>) {
    match acls {
        Some(tokens) => {
            let sorted = sorted_unique(tokens);
            packed::pack_tagged_list(output, Some(&sorted), DELIMITER);
        }
        None => packed::pack_tagged_list::<String>(output, None, DELIMITER),
    }
}

fn sorted_unique(values: &[String]) -> Vec<String> {
    values
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests;
