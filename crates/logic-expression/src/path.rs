//! Path identifiers and coverage sets.
//!
//! A path identifier is `<route>#<signature>`. The route is the list of
//! accessors from the root of the source tree to a node, formatted as a JSON
//! Pointer. The signature describes the node's own shape:
//!
//! - mappings: `{k1,k2,...}` with keys sorted,
//! - sequences: `array(N)`,
//! - scalars: their JSON encoding.
//!
//! Identifiers depend only on the source tree, never on evaluated values, so a
//! display tree rebuilt from the same expression finds the same identifiers.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Structural signature of a source node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn of(value: &Value) -> Self {
        let text = match value {
            Value::Object(map) => {
                let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
                keys.sort_unstable();
                format!("{{{}}}", keys.join(","))
            }
            Value::Array(items) => format!("array({})", items.len()),
            scalar => serde_json::to_string(scalar).unwrap_or_default(),
        };
        Signature(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Escapes a route segment per RFC 6901.
fn escape_segment(segment: &str) -> String {
    if !segment.contains('/') && !segment.contains('~') {
        return segment.to_string();
    }
    segment.replace('~', "~0").replace('/', "~1")
}

/// Stable identifier of one node: traversal route plus structural signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathId {
    text: String,
    route_len: usize,
}

impl PathId {
    pub fn new(route: &[String], signature: &Signature) -> Self {
        let mut text = String::new();
        for segment in route {
            text.push('/');
            text.push_str(&escape_segment(segment));
        }
        let route_len = text.len();
        text.push('#');
        text.push_str(signature.as_str());
        PathId { text, route_len }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The route part of the identifier, as a JSON Pointer.
    pub fn route(&self) -> &str {
        &self.text[..self.route_len]
    }

    /// The signature part of the identifier.
    pub fn signature(&self) -> &str {
        &self.text[self.route_len + 1..]
    }
}

impl Serialize for PathId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Accumulated traversal route.
///
/// Shared by the diagnostic evaluator and the display-tree builder so both
/// derive identifiers the same way.
#[derive(Debug, Default)]
pub(crate) struct Route {
    segments: Vec<String>,
}

impl Route {
    /// Descends along `step` and returns the identifier of the node reached.
    pub(crate) fn enter(&mut self, step: &[String], signature: &Signature) -> PathId {
        self.segments.extend(step.iter().cloned());
        PathId::new(&self.segments, signature)
    }

    /// Undoes the matching `enter`.
    pub(crate) fn leave(&mut self, step: &[String]) {
        let len = self.segments.len().saturating_sub(step.len());
        self.segments.truncate(len);
    }
}

/// Set of path identifiers visited during one diagnostic pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverageSet {
    ids: BTreeSet<PathId>,
}

impl CoverageSet {
    pub fn new() -> Self {
        CoverageSet::default()
    }

    /// Records a visit. Returns `false` if the identifier was already present.
    pub fn insert(&mut self, id: PathId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &PathId) -> bool {
        self.ids.contains(id)
    }

    /// True if any recorded identifier has exactly this route.
    pub fn contains_route(&self, route: &str) -> bool {
        self.ids.iter().any(|id| id.route() == route)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathId> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a CoverageSet {
    type Item = &'a PathId;
    type IntoIter = std::collections::btree_set::Iter<'a, PathId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
