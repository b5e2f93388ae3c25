//! Path-attribute configuration: regex match/replace clauses applied to a
//! document's path before it is ingested as a metadata attribute.
//!
//! The serialized string form feeds the fingerprint tail so that editing a
//! mapping forces reprocessing of every document it could touch.

use regex::Regex;

use crate::ConfigurationError;

/// Ordered regex match/replace clauses.
///
/// Clauses fire in sequence: each clause replaces every match of its
/// expression in the output of the previous clause. Replacement text may
/// reference capture groups as `$(1)`, `$(2)`, ...; `$(0)` is the whole
/// match. A case modifier may follow the group number: `$(1u)` uppercases
/// the group, `$(1l)` lowercases it, `$(1m)` capitalizes the first
/// character and lowercases the rest.
#[derive(Clone, Debug, Default)]
pub struct PathMap {
    clauses: Vec<MapClause>,
}

#[derive(Clone, Debug)]
struct MapClause {
    pattern: String,
    regex: Regex,
    replacement: String,
}

impl PathMap {
    /// Appends one match/replace clause, compiling the match expression.
    pub(crate) fn push(
        &mut self,
        pattern: &str,
        replacement: &str,
    ) -> Result<(), ConfigurationError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPathMap {
            pattern: pattern.to_owned(),
            source,
        })?;
        self.clauses.push(MapClause {
            pattern: pattern.to_owned(),
            regex,
            replacement: replacement.to_owned(),
        });
        Ok(())
    }

    /// Returns `true` when no clauses are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of configured clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Runs the input through every clause in order.
    #[must_use]
    pub fn translate(&self, input: &str) -> String {
        let mut current = input.to_owned();
        for clause in &self.clauses {
            let mut output = String::new();
            let mut copied_to = 0;
            for captures in clause.regex.captures_iter(&current) {
                if let Some(whole) = captures.get(0) {
                    output.push_str(&current[copied_to..whole.start()]);
                    expand_replacement(&captures, &clause.replacement, &mut output);
                    copied_to = whole.end();
                }
            }
            output.push_str(&current[copied_to..]);
            current = output;
        }
        current
    }

    /// Serialized `match=replace&match=replace` form with `\`, `&`, and `=`
    /// escaped inside each side.
    #[must_use]
    pub fn serialized(&self) -> String {
        let mut output = String::new();
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                output.push('&');
            }
            stuff(&mut output, &clause.pattern);
            output.push('=');
            stuff(&mut output, &clause.replacement);
        }
        output
    }
}

fn stuff(output: &mut String, value: &str) {
    for ch in value.chars() {
        if ch == '\\' || ch == '&' || ch == '=' {
            output.push('\\');
        }
        output.push(ch);
    }
}

/// Expands `$(n)` group references, with optional case modifiers, in a
/// replacement description. Unknown characters inside the parentheses are
/// skipped, and an unparsable group number expands to nothing.
fn expand_replacement(captures: &regex::Captures<'_>, description: &str, output: &mut String) {
    let mut chars = description.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'(') {
            chars.next();
            let mut number = String::new();
            let mut upper = false;
            let mut lower = false;
            let mut mixed = false;
            for inner in chars.by_ref() {
                match inner {
                    ')' => break,
                    '0'..='9' => number.push(inner),
                    'u' | 'U' => upper = true,
                    'l' | 'L' => lower = true,
                    'm' | 'M' => mixed = true,
                    _ => {}
                }
            }
            if let Ok(group) = number.parse::<usize>() {
                if let Some(matched) = captures.get(group) {
                    push_cased(output, matched.as_str(), upper, lower, mixed);
                }
            }
        } else {
            output.push(ch);
        }
    }
}

fn push_cased(output: &mut String, value: &str, upper: bool, lower: bool, mixed: bool) {
    if upper {
        output.push_str(&value.to_uppercase());
    } else if lower {
        output.push_str(&value.to_lowercase());
    } else if mixed && !value.is_empty() {
        let mut rest = value.chars();
        if let Some(first) = rest.next() {
            output.extend(first.to_uppercase());
            output.push_str(&rest.as_str().to_lowercase());
        }
    } else {
        output.push_str(value);
    }
}

/// Path-attribute setup from the job specification: the metadata attribute
/// name to ingest a document's path under, plus the [`PathMap`] that
/// rewrites the path first.
#[derive(Clone, Debug, Default)]
pub struct PathDescription {
    pub(crate) attribute_name: Option<String>,
    pub(crate) map: PathMap,
}

impl PathDescription {
    /// Metadata attribute name the translated path is ingested under, when
    /// one is configured.
    #[must_use]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }

    /// The configured path mapping.
    #[must_use]
    pub fn map(&self) -> &PathMap {
        &self.map
    }

    /// Translated attribute value for a document path, or `None` when no
    /// attribute name is configured.
    #[must_use]
    pub fn attribute_value(&self, path: &str) -> Option<String> {
        self.attribute_name
            .as_ref()
            .map(|_| self.map.translate(path))
    }

    /// Fingerprint-tail component representing this configuration.
    ///
    /// Empty when no attribute name is set; otherwise
    /// `=<name>:<serialized map>`, so any edit to the attribute name or the
    /// mapping invalidates stored fingerprints.
    #[must_use]
    pub fn version_component(&self) -> String {
        match &self.attribute_name {
            Some(name) => format!("={name}:{}", self.map.serialized()),
            None => String::new(),
        }
    }
}
