//! Raw and typed forms of the job-specification tree.
//!
//! The framework hands the connector an ordered tree of string-typed nodes.
//! Everything here is decoded exactly once, when the specification is first
//! consulted, into a closed set of typed variants; attribute validation
//! happens at that point so a bad rule surfaces as one job-fatal
//! [`ConfigurationError`](crate::ConfigurationError) instead of leaking into
//! per-document evaluation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::ConfigurationError;

/// One node of the specification tree as supplied by the framework: a
/// string type discriminator, a flat attribute map, and ordered children.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawNode {
    /// Node type discriminator, e.g. `pathrule` or `startpoint`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Attribute name/value pairs.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Ordered child nodes.
    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl RawNode {
    pub(crate) fn require(&self, attribute: &str) -> Result<&str, ConfigurationError> {
        self.attributes
            .get(attribute)
            .map(String::as_str)
            .ok_or_else(|| ConfigurationError::MissingAttribute {
                node: self.kind.clone(),
                attribute: attribute.to_owned(),
            })
    }

    fn invalid(&self, attribute: &str, value: &str) -> ConfigurationError {
        ConfigurationError::InvalidAttribute {
            node: self.kind.clone(),
            attribute: attribute.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Action a matching rule applies to its candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleAction {
    /// Admit the candidate into the crawl scope.
    Include,
    /// Keep the candidate out of the crawl scope.
    Exclude,
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

/// Object type a path rule is written for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuleTarget {
    /// Rule describes a site path.
    Site,
    /// Rule describes a document library path.
    Library,
    /// Rule describes a list path.
    List,
    /// Rule describes a file path.
    File,
    /// Rule describes a folder path within a library.
    Folder,
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Site => f.write_str("site"),
            Self::Library => f.write_str("library"),
            Self::List => f.write_str("list"),
            Self::File => f.write_str("file"),
            Self::Folder => f.write_str("folder"),
        }
    }
}

/// What part of a file path a legacy startpoint child rule matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileRulePart {
    /// Match against the file name alone.
    FileName,
    /// Match against the folder path below the startpoint.
    Path,
}

/// Include/exclude child rule of a legacy startpoint.
#[derive(Clone, Debug)]
pub struct FileRule {
    /// Whether a match includes or excludes the file.
    pub action: RuleAction,
    /// Which part of the file path the pattern applies to.
    pub part: FileRulePart,
    /// Wildcard pattern.
    pub pattern: String,
}

/// Legacy crawl root: both a seed and an implicit include for its subtree.
#[derive(Clone, Debug)]
pub struct Startpoint {
    /// Site path of the startpoint, `` or `/sub/site` form.
    pub site: String,
    /// Library name beneath the site.
    pub library: String,
    /// Whether the startpoint requests all metadata for its documents.
    pub all_metadata: bool,
    /// Explicit metadata field names, when `all_metadata` is off.
    pub metadata_fields: Vec<String>,
    /// Ordered include/exclude rules for files beneath the startpoint.
    pub file_rules: Vec<FileRule>,
}

impl Startpoint {
    /// Canonical `site/library` path this startpoint anchors.
    #[must_use]
    pub fn library_path(&self) -> String {
        format!("{}/{}", self.site, self.library)
    }
}

/// Wildcard path rule from the job specification.
#[derive(Clone, Debug)]
pub struct PathRule {
    /// Wildcard pattern over canonical paths.
    pub pattern: String,
    /// Action taken on an exact match at the rule's own type.
    pub action: RuleAction,
    /// Object type the rule is written for.
    pub target: RuleTarget,
}

/// Metadata-selection rule; structurally a path rule carrying a field set.
#[derive(Clone, Debug)]
pub struct MetadataRule {
    /// Wildcard pattern over canonical document paths.
    pub pattern: String,
    /// Only `Include` rules contribute fields; an `Exclude` match resolves
    /// to the empty selection.
    pub action: RuleAction,
    /// Whether all metadata was requested.
    pub all_metadata: bool,
    /// Explicit field names, when `all_metadata` is off.
    pub fields: Vec<String>,
}

/// Specification nodes that participate in ordered rule evaluation.
#[derive(Clone, Debug)]
pub(crate) enum EvalNode {
    Startpoint(Startpoint),
    PathRule(PathRule),
    MetadataRule(MetadataRule),
}

fn parse_action(node: &RawNode, value: &str) -> Result<RuleAction, ConfigurationError> {
    match value {
        "include" => Ok(RuleAction::Include),
        "exclude" => Ok(RuleAction::Exclude),
        other => Err(node.invalid("action", other)),
    }
}

fn parse_target(node: &RawNode, value: &str) -> Result<RuleTarget, ConfigurationError> {
    match value {
        "site" => Ok(RuleTarget::Site),
        "library" => Ok(RuleTarget::Library),
        "list" => Ok(RuleTarget::List),
        "file" => Ok(RuleTarget::File),
        "folder" => Ok(RuleTarget::Folder),
        other => Err(node.invalid("type", other)),
    }
}

fn metafield_values(node: &RawNode) -> Result<Vec<String>, ConfigurationError> {
    let mut fields = Vec::new();
    for child in &node.children {
        if child.kind == "metafield" {
            fields.push(child.require("value")?.to_owned());
        }
    }
    Ok(fields)
}

fn all_metadata_flag(node: &RawNode) -> bool {
    node.attributes
        .get("allmetadata")
        .is_some_and(|value| value == "true")
}

pub(crate) fn decode_startpoint(node: &RawNode) -> Result<Startpoint, ConfigurationError> {
    let site = node.require("site")?.to_owned();
    let library = node.require("lib")?.to_owned();
    let mut file_rules = Vec::new();
    for child in &node.children {
        let action = match child.kind.as_str() {
            "include" => RuleAction::Include,
            "exclude" => RuleAction::Exclude,
            _ => continue,
        };
        let part = match child.require("type")? {
            "file" => FileRulePart::FileName,
            _ => FileRulePart::Path,
        };
        file_rules.push(FileRule {
            action,
            part,
            pattern: child.require("match")?.to_owned(),
        });
    }
    Ok(Startpoint {
        site,
        library,
        all_metadata: all_metadata_flag(node),
        metadata_fields: metafield_values(node)?,
        file_rules,
    })
}

pub(crate) fn decode_path_rule(node: &RawNode) -> Result<PathRule, ConfigurationError> {
    let pattern = node.require("match")?.to_owned();
    let action = parse_action(node, node.require("action")?)?;
    let target = parse_target(node, node.require("type")?)?;
    Ok(PathRule {
        pattern,
        action,
        target,
    })
}

pub(crate) fn decode_metadata_rule(node: &RawNode) -> Result<MetadataRule, ConfigurationError> {
    let pattern = node.require("match")?.to_owned();
    let action = parse_action(node, node.require("action")?)?;
    Ok(MetadataRule {
        pattern,
        action,
        all_metadata: all_metadata_flag(node),
        fields: metafield_values(node)?,
    })
}

pub(crate) fn decode_security(node: &RawNode) -> Result<bool, ConfigurationError> {
    match node.require("value")? {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(node.invalid("value", other)),
    }
}
