//! The decoded specification tree and its ordered rule evaluation.

use std::collections::BTreeSet;

use pathmatch::{match_exact, match_partial};
use tracing::debug;

use crate::node::{
    EvalNode, FileRulePart, RawNode, RuleAction, RuleTarget, decode_metadata_rule,
    decode_path_rule, decode_security, decode_startpoint,
};
use crate::pathmap::PathDescription;
use crate::ConfigurationError;

/// Object kind of a candidate path being tested against the rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CandidateKind {
    /// A site path.
    Site,
    /// A document library path.
    Library,
    /// A list path.
    List,
    /// A file path (library path plus relative file path).
    File,
    /// A list item path (list path plus row id).
    ListItem,
}

/// Metadata fields selected for a document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MetadataSelection {
    /// All metadata was requested; `fields` is ignored.
    pub all_metadata: bool,
    /// Explicit field names, deduplicated.
    pub fields: BTreeSet<String>,
}

impl MetadataSelection {
    /// The empty selection: no metadata at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when neither all-metadata nor any field is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.all_metadata && self.fields.is_empty()
    }
}

/// Job specification, decoded once and immutable for the crawl cycle.
///
/// Holds the ordered evaluation nodes (startpoints, path rules, metadata
/// rules) plus the job-wide settings folded out of the remaining node
/// types: security switch, forced access tokens, and the path-attribute
/// description. Evaluation is first-match-wins in specification order and
/// defaults to exclusion; partial (ancestor) matches can only include,
/// never exclude.
#[derive(Clone, Debug)]
pub struct SpecTree {
    nodes: Vec<EvalNode>,
    security_enabled: bool,
    access_tokens: Vec<String>,
    path: PathDescription,
}

impl SpecTree {
    /// Decodes a specification from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for undeserializable JSON or any
    /// node failing validation; see [`from_raw_nodes`](Self::from_raw_nodes).
    pub fn from_json(document: &str) -> Result<Self, ConfigurationError> {
        let nodes: Vec<RawNode> = serde_json::from_str(document)?;
        Self::from_raw_nodes(&nodes)
    }

    /// Decodes an ordered sequence of raw specification nodes.
    ///
    /// Node types that do not concern scope evaluation (UI state and the
    /// like share the same tree) are ignored. Security defaults to on with
    /// no forced tokens, meaning native ACLs are fetched per object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a recognized node is missing a
    /// required attribute, carries an unrecognized value, or a path-map
    /// expression fails to compile. Raised here, once, so one bad rule
    /// fails the whole job before any per-document work starts.
    pub fn from_raw_nodes(raw: &[RawNode]) -> Result<Self, ConfigurationError> {
        let mut nodes = Vec::new();
        let mut security_enabled = true;
        let mut access_tokens = BTreeSet::new();
        let mut path = PathDescription::default();

        for node in raw {
            match node.kind.as_str() {
                "startpoint" => nodes.push(EvalNode::Startpoint(decode_startpoint(node)?)),
                "pathrule" => nodes.push(EvalNode::PathRule(decode_path_rule(node)?)),
                "metadatarule" => nodes.push(EvalNode::MetadataRule(decode_metadata_rule(node)?)),
                "access" => {
                    access_tokens.insert(node.require("token")?.to_owned());
                }
                "security" => security_enabled = decode_security(node)?,
                "pathnameattribute" => {
                    path.attribute_name = Some(node.require("value")?.to_owned());
                }
                "pathmap" => path.map.push(node.require("match")?, node.require("replace")?)?,
                _ => {}
            }
        }

        Ok(Self {
            nodes,
            security_enabled,
            access_tokens: access_tokens.into_iter().collect(),
            path,
        })
    }

    /// Evaluates the include decision for a candidate of the given kind.
    #[must_use]
    pub fn includes(&self, kind: CandidateKind, path: &str) -> bool {
        match kind {
            CandidateKind::Site => self.includes_site(path),
            CandidateKind::Library => self.includes_library(path),
            CandidateKind::List => self.includes_list(path),
            CandidateKind::File => self.includes_file(path),
            CandidateKind::ListItem => self.includes_list_item(path),
        }
    }

    /// Whether a site should be crawled.
    ///
    /// A site is included when it exactly matches an include site rule,
    /// when it is an ancestor of a startpoint or of any deeper include
    /// rule's pattern (library/list rules need one further path section,
    /// file/folder rules two), or excluded when it exactly matches an
    /// exclude site rule. Pass `/` for the root site.
    #[must_use]
    pub fn includes_site(&self, site_path: &str) -> bool {
        debug!(site = site_path, "checking whether to include site");
        for node in &self.nodes {
            match node {
                EvalNode::Startpoint(sp) => {
                    let mut site = sp.site.clone();
                    if !site.starts_with('/') {
                        site.insert(0, '/');
                    }
                    // The candidate must be a complete path-segment prefix
                    // of the startpoint's site.
                    if site.starts_with(site_path)
                        && (site_path.len() == 1
                            || site.len() == site_path.len()
                            || site.as_bytes().get(site_path.len()) == Some(&b'/'))
                    {
                        debug!(site = site_path, startpoint = %site, "site leads to startpoint; including");
                        return true;
                    }
                }
                EvalNode::PathRule(rule) => {
                    if match_exact(site_path, &rule.pattern) {
                        if rule.target == RuleTarget::Site {
                            debug!(site = site_path, pattern = %rule.pattern, action = %rule.action, "site exactly matched rule");
                            return rule.action == RuleAction::Include;
                        }
                    } else if rule.action == RuleAction::Include {
                        let required = match rule.target {
                            RuleTarget::Site => 0,
                            RuleTarget::Library | RuleTarget::List => 1,
                            RuleTarget::File | RuleTarget::Folder => 2,
                        };
                        if match_partial(site_path, &rule.pattern, required) {
                            debug!(site = site_path, pattern = %rule.pattern, target = %rule.target, "site partially matched deeper include rule; including");
                            return true;
                        }
                    }
                }
                EvalNode::MetadataRule(_) => {}
            }
        }
        debug!(site = site_path, "no rule matched site; excluding");
        false
    }

    /// Whether a document library should be crawled.
    #[must_use]
    pub fn includes_library(&self, library_path: &str) -> bool {
        debug!(library = library_path, "checking whether to include library");
        for node in &self.nodes {
            match node {
                EvalNode::Startpoint(sp) => {
                    if library_path == sp.library_path() {
                        debug!(library = library_path, "library matched startpoint; including");
                        return true;
                    }
                }
                EvalNode::PathRule(rule) => {
                    if match_exact(library_path, &rule.pattern) {
                        if rule.target == RuleTarget::Library {
                            debug!(library = library_path, pattern = %rule.pattern, action = %rule.action, "library exactly matched rule");
                            return rule.action == RuleAction::Include;
                        }
                    } else if matches!(rule.target, RuleTarget::File | RuleTarget::Folder)
                        && rule.action == RuleAction::Include
                        && match_partial(library_path, &rule.pattern, 1)
                    {
                        debug!(library = library_path, pattern = %rule.pattern, target = %rule.target, "library partially matched deeper include rule; including");
                        return true;
                    }
                }
                EvalNode::MetadataRule(_) => {}
            }
        }
        debug!(library = library_path, "no rule matched library; excluding");
        false
    }

    /// Whether a list should be crawled. Lists predate startpoints'
    /// library convention, so only explicit list rules apply.
    #[must_use]
    pub fn includes_list(&self, list_path: &str) -> bool {
        debug!(list = list_path, "checking whether to include list");
        for node in &self.nodes {
            if let EvalNode::PathRule(rule) = node {
                if match_exact(list_path, &rule.pattern) && rule.target == RuleTarget::List {
                    debug!(list = list_path, pattern = %rule.pattern, action = %rule.action, "list exactly matched rule");
                    return rule.action == RuleAction::Include;
                }
            }
        }
        debug!(list = list_path, "no rule matched list; excluding");
        false
    }

    /// Whether a file should be ingested. There are no partial matches at
    /// file depth; only exact file rules and startpoint subtrees apply.
    #[must_use]
    pub fn includes_file(&self, file_path: &str) -> bool {
        debug!(file = file_path, "checking whether to include file");
        let (path_part, file_part) = match file_path.rfind('/') {
            Some(index) => (&file_path[..index], &file_path[index + 1..]),
            None => ("", file_path),
        };

        for node in &self.nodes {
            match node {
                EvalNode::Startpoint(sp) => {
                    let prefix = format!("{}/{}/", sp.site, sp.library);
                    if !file_path.starts_with(&prefix) {
                        continue;
                    }
                    // Inside a startpoint subtree the child rules decide,
                    // exclude-by-default.
                    for file_rule in &sp.file_rules {
                        let source = match file_rule.part {
                            FileRulePart::FileName => file_part,
                            FileRulePart::Path => path_part.get(prefix.len()..).unwrap_or(""),
                        };
                        if match_exact(source, &file_rule.pattern) {
                            debug!(file = file_path, pattern = %file_rule.pattern, action = %file_rule.action, "file matched startpoint child rule");
                            return file_rule.action == RuleAction::Include;
                        }
                    }
                    debug!(file = file_path, "no startpoint child rule matched file; excluding");
                    return false;
                }
                EvalNode::PathRule(rule) => {
                    if match_exact(file_path, &rule.pattern) && rule.target == RuleTarget::File {
                        debug!(file = file_path, pattern = %rule.pattern, action = %rule.action, "file exactly matched rule");
                        return rule.action == RuleAction::Include;
                    }
                }
                EvalNode::MetadataRule(_) => {}
            }
        }
        debug!(file = file_path, "no rule matched file; excluding");
        false
    }

    /// Whether a list item should be ingested. There are no item-level
    /// rules; an item is in scope whenever its list is, so this always
    /// answers `true`.
    #[must_use]
    pub fn includes_list_item(&self, item_path: &str) -> bool {
        debug!(item = item_path, "list items are always included");
        true
    }

    /// Metadata selection for a document or item path: the first matching
    /// startpoint subtree or metadata rule decides; default is the empty
    /// selection.
    #[must_use]
    pub fn metadata(&self, file_path: &str) -> MetadataSelection {
        debug!(file = file_path, "finding metadata selection");
        for node in &self.nodes {
            match node {
                EvalNode::Startpoint(sp) => {
                    let prefix = format!("{}/{}/", sp.site, sp.library);
                    if file_path.starts_with(&prefix) {
                        return if sp.all_metadata {
                            MetadataSelection {
                                all_metadata: true,
                                fields: BTreeSet::new(),
                            }
                        } else {
                            MetadataSelection {
                                all_metadata: false,
                                fields: sp.metadata_fields.iter().cloned().collect(),
                            }
                        };
                    }
                }
                EvalNode::MetadataRule(rule) => {
                    if match_exact(file_path, &rule.pattern) {
                        // The rule fired; an exclude match yields the empty
                        // selection rather than falling through.
                        if rule.action == RuleAction::Include {
                            return if rule.all_metadata {
                                MetadataSelection {
                                    all_metadata: true,
                                    fields: BTreeSet::new(),
                                }
                            } else {
                                MetadataSelection {
                                    all_metadata: false,
                                    fields: rule.fields.iter().cloned().collect(),
                                }
                            };
                        }
                        return MetadataSelection::empty();
                    }
                }
                EvalNode::PathRule(_) => {}
            }
        }
        MetadataSelection::empty()
    }

    /// Forced ACL tokens for the job.
    ///
    /// `None` means security is disabled entirely; an empty slice means
    /// security is on and the object's native ACLs should be fetched.
    /// Tokens are sorted and deduplicated.
    #[must_use]
    pub fn forced_acls(&self) -> Option<&[String]> {
        self.security_enabled.then_some(self.access_tokens.as_slice())
    }

    /// Path-attribute configuration for the job.
    #[must_use]
    pub fn path_description(&self) -> &PathDescription {
        &self.path
    }
}
