//! Per-cycle walk state: versioning decisions and child expansion.

use docid::{Decoded, DocumentId};
use fingerprint::{FieldSelection, Fingerprint, VersionParts};
use rustc_hash::FxHashMap;
use scope::{MetadataSelection, SpecTree};
use tracing::debug;

use crate::{ConnectorError, VendorProxy};

/// Deny token stamped onto every secured document so that revoking an
/// authority invalidates its documents.
pub const DEFAULT_DENY_TOKEN: &str = "DEAD_AUTHORITY";

/// Connection-level settings that participate in version fingerprints.
#[derive(Clone, Debug)]
pub struct ConnectorConfig {
    /// Base URL of the vendor instance; part of every fingerprint tail so
    /// repointing a job forces reingestion.
    pub base_url: String,
    /// Deny token applied alongside every non-empty ACL set.
    pub deny_token: String,
}

impl ConnectorConfig {
    /// Configuration with the standard deny token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            deny_token: DEFAULT_DENY_TOKEN.to_owned(),
        }
    }
}

/// Outcome of versioning one queued identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VersionDecision {
    /// The object is gone or out of scope; drop it and its stored version.
    Delete,
    /// A container that is in scope but carries no version of its own; it
    /// is re-expanded every cycle.
    Unversioned,
    /// An ingestable object with the given version fingerprint.
    Version(Fingerprint),
}

/// How ACLs are sourced for this job.
#[derive(Clone, Copy, Debug)]
enum AclMode {
    /// Security is off; documents carry no ACLs at all.
    Off,
    /// The specification forces a fixed token set onto every document.
    Forced,
    /// Per-object ACLs are fetched from the vendor store.
    Native,
}

/// Walk state for a single crawl cycle.
///
/// Owns the lookup caches (metadata field lists per container, native ACLs
/// per object) so repeated documents in one cycle cost one vendor round
/// trip each; nothing outlives the cycle and there is no process-wide
/// state. Each worker thread drives its own `CrawlCycle`.
pub struct CrawlCycle<'a, P> {
    proxy: &'a P,
    spec: &'a SpecTree,
    config: &'a ConnectorConfig,
    deny: Vec<String>,
    field_cache: FxHashMap<String, Vec<String>>,
    acl_cache: FxHashMap<String, Option<Vec<String>>>,
}

impl<'a, P: VendorProxy> CrawlCycle<'a, P> {
    /// Starts a cycle over one decoded job specification.
    #[must_use]
    pub fn new(proxy: &'a P, spec: &'a SpecTree, config: &'a ConnectorConfig) -> Self {
        Self {
            proxy,
            spec,
            config,
            deny: vec![config.deny_token.clone()],
            field_cache: FxHashMap::default(),
            acl_cache: FxHashMap::default(),
        }
    }

    /// Versioning decision for one queued identifier.
    ///
    /// Legacy obsolete identifiers and anything the scope rules exclude
    /// resolve to [`VersionDecision::Delete`], as does an ingestable object
    /// whose modify instant or ACLs have vanished upstream. In-scope
    /// containers are [`VersionDecision::Unversioned`]; in-scope files,
    /// items, and attachments get a fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MalformedIdentifier`] for an unrecognized
    /// identifier shape and [`ConnectorError::Vendor`] for failed lookups.
    pub fn version_of(&mut self, raw: &str) -> Result<VersionDecision, ConnectorError> {
        let id = match DocumentId::decode(raw)? {
            Decoded::Obsolete => {
                debug!(identifier = raw, "obsolete legacy identifier; deleting");
                return Ok(VersionDecision::Delete);
            }
            Decoded::Id(id) => id,
        };
        match id {
            DocumentId::Site { path } => {
                Ok(Self::container(self.spec.includes_site(site_rule_path(&path))))
            }
            DocumentId::Library { path } => {
                Ok(Self::container(self.spec.includes_library(&path)))
            }
            DocumentId::List { path } => Ok(Self::container(self.spec.includes_list(&path))),
            DocumentId::File {
                library_path,
                file_path,
            } => {
                let full = format!("{library_path}/{file_path}");
                if !self.spec.includes_file(&full) {
                    debug!(path = %full, "file no longer in scope; deleting");
                    return Ok(VersionDecision::Delete);
                }
                let selection = self.spec.metadata(&full);
                self.object_version(&full, &library_path, selection)
            }
            DocumentId::ListItem { list_path, item_id } => {
                let full = format!("{list_path}/{item_id}");
                if !self.spec.includes_list_item(&full) {
                    return Ok(VersionDecision::Delete);
                }
                let selection = self.spec.metadata(&full);
                self.object_version(&full, &list_path, selection)
            }
            DocumentId::Attachment {
                list_path,
                item_id,
                file_name,
            } => {
                let item = format!("{list_path}/{item_id}");
                if !self.spec.includes_list_item(&item) {
                    return Ok(VersionDecision::Delete);
                }
                let full = format!("{item}/{file_name}");
                // Attachments carry their item's security but no metadata
                // fields of their own.
                self.object_version(&full, &list_path, MetadataSelection::empty())
            }
        }
    }

    /// Child identifiers of a container, scope-filtered, ready for the
    /// crawl queue. Leaf identifiers and obsolete identifiers expand to
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::MalformedIdentifier`] for an unrecognized
    /// identifier shape and [`ConnectorError::Vendor`] for failed lookups.
    pub fn expand(&self, raw: &str) -> Result<Vec<String>, ConnectorError> {
        let id = match DocumentId::decode(raw)? {
            Decoded::Obsolete => return Ok(Vec::new()),
            Decoded::Id(id) => id,
        };
        let mut children = Vec::new();
        match id {
            DocumentId::Site { path } => {
                for name in self.proxy.subsites(&path)? {
                    let sub = format!("{path}/{name}");
                    if self.spec.includes_site(&sub) {
                        children.push(DocumentId::Site { path: sub }.encode());
                    }
                }
                for name in self.proxy.libraries(&path)? {
                    let library = format!("{path}/{name}");
                    if self.spec.includes_library(&library) {
                        children.push(DocumentId::Library { path: library }.encode());
                    }
                }
                for name in self.proxy.lists(&path)? {
                    let list = format!("{path}/{name}");
                    if self.spec.includes_list(&list) {
                        children.push(DocumentId::List { path: list }.encode());
                    }
                }
            }
            DocumentId::Library { path } => {
                for relative in self.proxy.files(&path)? {
                    let full = format!("{path}/{relative}");
                    if self.spec.includes_file(&full) {
                        children.push(
                            DocumentId::File {
                                library_path: path.clone(),
                                file_path: relative,
                            }
                            .encode(),
                        );
                    }
                }
            }
            DocumentId::List { path } => {
                for item in self.proxy.list_items(&path)? {
                    let full = format!("{path}/{item}");
                    if self.spec.includes_list_item(&full) {
                        children.push(
                            DocumentId::ListItem {
                                list_path: path.clone(),
                                item_id: item,
                            }
                            .encode(),
                        );
                    }
                }
            }
            DocumentId::ListItem { list_path, item_id } => {
                for name in self.proxy.attachments(&list_path, &item_id)? {
                    children.push(
                        DocumentId::Attachment {
                            list_path: list_path.clone(),
                            item_id: item_id.clone(),
                            file_name: name,
                        }
                        .encode(),
                    );
                }
            }
            DocumentId::File { .. } | DocumentId::Attachment { .. } => {}
        }
        Ok(children)
    }

    fn container(in_scope: bool) -> VersionDecision {
        if in_scope {
            VersionDecision::Unversioned
        } else {
            VersionDecision::Delete
        }
    }

    fn object_version(
        &mut self,
        full_path: &str,
        container_path: &str,
        selection: MetadataSelection,
    ) -> Result<VersionDecision, ConnectorError> {
        let Some(modified) = self.proxy.modified(full_path)? else {
            debug!(path = full_path, "object has no modify instant; deleting");
            return Ok(VersionDecision::Delete);
        };
        let created = self.proxy.created(full_path)?;

        let mode = match self.spec.forced_acls() {
            None => AclMode::Off,
            Some(tokens) if tokens.is_empty() => AclMode::Native,
            Some(_) => AclMode::Forced,
        };

        // Populate the caches before taking any references into them.
        if selection.all_metadata && !self.field_cache.contains_key(container_path) {
            let fields = self.proxy.field_names(container_path)?;
            self.field_cache.insert(container_path.to_owned(), fields);
        }
        if matches!(mode, AclMode::Native) && !self.acl_cache.contains_key(full_path) {
            let acls = self.proxy.acls(full_path)?;
            self.acl_cache.insert(full_path.to_owned(), acls);
        }

        let include_acls: Option<&[String]> = match mode {
            AclMode::Off => None,
            AclMode::Forced => self.spec.forced_acls(),
            AclMode::Native => {
                match self.acl_cache.get(full_path).and_then(|a| a.as_deref()) {
                    Some(native) => Some(native),
                    None => {
                        debug!(path = full_path, "object ACLs vanished upstream; deleting");
                        return Ok(VersionDecision::Delete);
                    }
                }
            }
        };
        let deny_acls: Option<&[String]> =
            matches!(mode, AclMode::Forced | AclMode::Native).then_some(self.deny.as_slice());

        let named: Vec<String> = selection.fields.iter().cloned().collect();
        let metadata = if selection.all_metadata {
            FieldSelection::All {
                known_fields: self
                    .field_cache
                    .get(container_path)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
            }
        } else {
            FieldSelection::Named(&named)
        };

        let tail = format!(
            "{}_{}",
            self.spec.path_description().version_component(),
            self.config.base_url
        );
        let parts = VersionParts {
            metadata,
            include_acls,
            deny_acls,
            modified: Some(modified),
            created,
            opaque_tail: &tail,
        };
        Ok(VersionDecision::Version(Fingerprint::build(&parts)))
    }
}

/// Rule-evaluation path for a site identifier; the root site's empty path
/// evaluates as `/`.
fn site_rule_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}
