#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `docid` is the codec for the hierarchical document identifiers that the
//! SharePoint connector core hands to the crawl queue. An identifier is one
//! opaque string that unambiguously encodes one of six repository object
//! kinds through its separator structure:
//!
//! - `/sitepath/` -- a site (starts and ends with a single `/`).
//! - `/sitepath/libname//` -- a document library.
//! - `/sitepath/libname//folder/file` -- a file within a library; exactly
//!   the first `//` separates the library path from the relative file path,
//!   and the identifier does not end with `/`.
//! - `/sitepath/listname///` -- a list.
//! - `/sitepath/listname///rowid` -- a list item.
//! - `/sitepath/listname///rowid/attachment` -- a list item attachment.
//!
//! Identifiers beginning with `D` or `S` are an obsolete legacy convention;
//! they are recognized only so the caller can delete them from the store.
//!
//! # Design
//!
//! [`decode`](DocumentId::decode) resolves the shape by searching for the
//! list separator `///` first. Found at the very end, the identifier names
//! the list itself; otherwise the remainder is split on its first `/` to
//! distinguish a bare item from an attachment. With no `///`, the library
//! separator `//` is tried with the same end-versus-remainder logic, and
//! with neither separator a trailing `/` denotes a site. Anything else is
//! a [`MalformedIdentifier`].
//!
//! Identifiers stay opaque strings at the boundary (the crawl store is
//! string-keyed); callers decode at the edge, operate on [`DocumentId`],
//! and [`encode`](DocumentId::encode) only when handing a value back.
//!
//! # Invariants
//!
//! - Shape determination is total: every string decodes to exactly one
//!   shape, to [`Decoded::Obsolete`], or fails with
//!   [`MalformedIdentifier`].
//! - Round-trip: `encode(decode(s)) == s` for every well-formed,
//!   non-legacy `s`.
//! - Both functions are pure; no I/O, no shared state.
//!
//! # Examples
//!
//! ```
//! use docid::{Decoded, DocumentId};
//!
//! let decoded = DocumentId::decode("/sales/docs//reports/q1.pdf").unwrap();
//! let Decoded::Id(id) = decoded else { panic!("not legacy") };
//! assert_eq!(
//!     id,
//!     DocumentId::File {
//!         library_path: "/sales/docs".into(),
//!         file_path: "reports/q1.pdf".into(),
//!     }
//! );
//! assert_eq!(id.encode(), "/sales/docs//reports/q1.pdf");
//! ```

mod error;

pub use error::MalformedIdentifier;

use std::fmt;

/// Separator between a library path and the file part of an identifier.
const LIBRARY_SEPARATOR: &str = "//";
/// Separator between a list path and the item part of an identifier.
const LIST_SEPARATOR: &str = "///";

/// Result of decoding an identifier string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decoded {
    /// A current-format identifier.
    Id(DocumentId),
    /// A legacy `D`/`S`-prefixed identifier. The format is no longer
    /// understood; the only correct handling is deletion from the store.
    Obsolete,
}

/// Structured form of a document identifier, one variant per shape.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DocumentId {
    /// A site. `path` carries no trailing separator; the root site is the
    /// empty path.
    Site {
        /// Site path from the root site, e.g. `/sales` or `` for the root.
        path: String,
    },
    /// A document library.
    Library {
        /// Library path including its site path, e.g. `/sales/docs`.
        path: String,
    },
    /// A list.
    List {
        /// List path including its site path, e.g. `/sales/issues`.
        path: String,
    },
    /// A file inside a document library.
    File {
        /// Library path including its site path.
        library_path: String,
        /// File path relative to the library, without a leading `/`.
        file_path: String,
    },
    /// A row of a list.
    ListItem {
        /// List path including its site path.
        list_path: String,
        /// Row identifier within the list.
        item_id: String,
    },
    /// An attachment of a list item.
    Attachment {
        /// List path including its site path.
        list_path: String,
        /// Row identifier within the list.
        item_id: String,
        /// Attachment file name.
        file_name: String,
    },
}

/// Object kind of a decoded identifier, for dispatch and diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum IdentifierKind {
    /// A site identifier.
    Site,
    /// A document library identifier.
    Library,
    /// A list identifier.
    List,
    /// A file identifier.
    File,
    /// A list item identifier.
    ListItem,
    /// A list item attachment identifier.
    Attachment,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => f.write_str("site"),
            Self::Library => f.write_str("library"),
            Self::List => f.write_str("list"),
            Self::File => f.write_str("file"),
            Self::ListItem => f.write_str("list item"),
            Self::Attachment => f.write_str("attachment"),
        }
    }
}

impl DocumentId {
    /// Decodes an identifier string into its structured form.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedIdentifier`] when the string matches none of the
    /// six shapes and is not a recognized legacy prefix. This signals a
    /// logic error in whatever produced the identifier and must not be
    /// retried.
    pub fn decode(raw: &str) -> Result<Decoded, MalformedIdentifier> {
        if raw.starts_with('D') || raw.starts_with('S') {
            return Ok(Decoded::Obsolete);
        }
        if !raw.starts_with('/') {
            return Err(MalformedIdentifier::new(raw));
        }

        if let Some(index) = raw.find(LIST_SEPARATOR) {
            if index == raw.len() - LIST_SEPARATOR.len() {
                return Ok(Decoded::Id(Self::List {
                    path: raw[..index].to_owned(),
                }));
            }
            let list_path = raw[..index].to_owned();
            let remainder = &raw[index + LIST_SEPARATOR.len()..];
            return Ok(Decoded::Id(match remainder.find('/') {
                None => Self::ListItem {
                    list_path,
                    item_id: remainder.to_owned(),
                },
                Some(slash) => Self::Attachment {
                    list_path,
                    item_id: remainder[..slash].to_owned(),
                    file_name: remainder[slash + 1..].to_owned(),
                },
            }));
        }

        if let Some(index) = raw.find(LIBRARY_SEPARATOR) {
            if index == raw.len() - LIBRARY_SEPARATOR.len() {
                return Ok(Decoded::Id(Self::Library {
                    path: raw[..index].to_owned(),
                }));
            }
            return Ok(Decoded::Id(Self::File {
                library_path: raw[..index].to_owned(),
                file_path: raw[index + LIBRARY_SEPARATOR.len()..].to_owned(),
            }));
        }

        if raw.ends_with('/') {
            return Ok(Decoded::Id(Self::Site {
                path: raw[..raw.len() - 1].to_owned(),
            }));
        }

        Err(MalformedIdentifier::new(raw))
    }

    /// Encodes the structured form back into its opaque string key.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Site { path } => format!("{path}/"),
            Self::Library { path } => format!("{path}{LIBRARY_SEPARATOR}"),
            Self::List { path } => format!("{path}{LIST_SEPARATOR}"),
            Self::File {
                library_path,
                file_path,
            } => format!("{library_path}{LIBRARY_SEPARATOR}{file_path}"),
            Self::ListItem { list_path, item_id } => {
                format!("{list_path}{LIST_SEPARATOR}{item_id}")
            }
            Self::Attachment {
                list_path,
                item_id,
                file_name,
            } => format!("{list_path}{LIST_SEPARATOR}{item_id}/{file_name}"),
        }
    }

    /// Returns the object kind of this identifier.
    #[must_use]
    pub const fn kind(&self) -> IdentifierKind {
        match self {
            Self::Site { .. } => IdentifierKind::Site,
            Self::Library { .. } => IdentifierKind::Library,
            Self::List { .. } => IdentifierKind::List,
            Self::File { .. } => IdentifierKind::File,
            Self::ListItem { .. } => IdentifierKind::ListItem,
            Self::Attachment { .. } => IdentifierKind::Attachment,
        }
    }
}

#[cfg(test)]
mod tests;
