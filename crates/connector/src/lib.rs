#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `connector` ties the crawl-cycle pieces together: it decodes queued
//! document identifiers ([`docid`]), asks the job's scope rules what is in
//! play ([`scope`]), pulls object facts from the vendor store through the
//! [`VendorProxy`] boundary, and answers with either a child expansion or a
//! versioning decision carrying a [`fingerprint::Fingerprint`].
//!
//! # Design
//!
//! - [`VendorProxy`] is the only external collaborator; implementations own
//!   transport, authentication, and retries. Everything on this side of the
//!   trait is synchronous and deterministic given the proxy's answers.
//! - [`CrawlCycle`] is the walk object for one cycle: it borrows the
//!   decoded [`scope::SpecTree`] and [`ConnectorConfig`] and owns the
//!   per-cycle caches (field lists per container, native ACLs per object).
//!   Workers do not share a cycle; each drives its own.
//! - [`VersionDecision`] is the three-way outcome the framework acts on:
//!   delete, re-expand, or compare-and-ingest.
//!
//! # Invariants
//!
//! - A missing modify instant or vanished ACL set means the object was
//!   deleted upstream; that is a [`VersionDecision::Delete`], never an
//!   error.
//! - Expansion emits only identifiers the scope rules include, so excluded
//!   subtrees are pruned at the container rather than per document.
//! - No state survives a cycle; repointing `base_url` or editing the path
//!   mapping changes every fingerprint via the opaque tail.
//!
//! # Errors
//!
//! [`ConnectorError`] covers the fatal cases: malformed identifiers
//! (producer bug), undecodable specifications (operator error), and vendor
//! transport failures (retried by the enclosing pipeline).

mod cycle;
mod error;
mod proxy;

pub use cycle::{ConnectorConfig, CrawlCycle, VersionDecision, DEFAULT_DENY_TOKEN};
pub use error::ConnectorError;
pub use proxy::VendorProxy;
