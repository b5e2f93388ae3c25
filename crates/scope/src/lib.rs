#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `scope` decodes a connector job specification and evaluates its rules:
//! which sites, libraries, lists, files, and list items are in crawl scope,
//! which metadata fields each document should carry, which access tokens
//! are forced onto every document, and how a document's path is rewritten
//! into a path metadata attribute.
//!
//! A specification arrives as an ordered tree of string-typed nodes (the
//! framework's job UI writes them). Two generations of nodes coexist:
//! legacy `startpoint` nodes, each naming a site/library crawl root with
//! child file rules and metadata fields, and the newer flat `pathrule` /
//! `metadatarule` nodes carrying wildcard patterns over canonical paths.
//! Both generations are evaluated in a single ordered pass.
//!
//! # Design
//!
//! - [`RawNode`] is the wire shape: a type string, an attribute map, and
//!   ordered children. [`SpecTree::from_raw_nodes`] (or
//!   [`SpecTree::from_json`]) decodes the tree once into typed nodes;
//!   validation failures surface there as [`ConfigurationError`].
//! - [`SpecTree`] holds the ordered evaluation nodes plus the folded-out
//!   job-wide settings: the security switch, forced access tokens, and the
//!   [`PathDescription`].
//! - Wildcard matching delegates to [`pathmatch`]; path-map clauses compile
//!   to [`regex`] expressions.
//!
//! # Invariants
//!
//! - Rules are evaluated in specification order; the first node that
//!   resolves a candidate decides it.
//! - The default decision is exclusion at every level.
//! - Partial (ancestor) matches against deeper include rules can only ever
//!   include a container, never exclude it; exclusion requires an exact
//!   match at the candidate's own type.
//! - A startpoint is an unconditional include for its own site chain and
//!   library; its child rules govern files beneath it.
//!
//! # Errors
//!
//! Decoding reports [`ConfigurationError`] for malformed JSON, missing or
//! invalid node attributes, and path-map expressions that fail to compile.
//! Evaluation itself is infallible.
//!
//! # Examples
//!
//! ```
//! use scope::{CandidateKind, SpecTree};
//!
//! let spec = r#"[
//!     {"type": "pathrule", "attributes":
//!         {"match": "/eng/*", "action": "include", "type": "file"}}
//! ]"#;
//! let tree = SpecTree::from_json(spec).expect("specification decodes");
//!
//! assert!(tree.includes(CandidateKind::File, "/eng/docs/readme.txt"));
//! assert!(tree.includes(CandidateKind::Site, "/eng"));
//! assert!(!tree.includes(CandidateKind::File, "/sales/q3.xlsx"));
//! ```

mod error;
mod node;
mod pathmap;
mod tree;

pub use error::ConfigurationError;
pub use node::{
    FileRule, FileRulePart, MetadataRule, PathRule, RawNode, RuleAction, RuleTarget, Startpoint,
};
pub use pathmap::{PathDescription, PathMap};
pub use tree::{CandidateKind, MetadataSelection, SpecTree};
