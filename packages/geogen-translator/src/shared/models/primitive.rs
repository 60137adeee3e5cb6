//! Raw primitive types
//!
//! These types represent elements read from the planet extract.
//! The translator never mutates them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tag key → value mapping (keys unique, ordered for deterministic output)
pub type Tags = BTreeMap<String, String>;

/// Kind of a raw primitive. Identifiers are unique within a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Point,
    Line,
    Relation,
}

impl PrimitiveKind {
    /// Kind of the children referenced by a primitive of this kind
    pub fn child_kind(self) -> Option<PrimitiveKind> {
        match self {
            PrimitiveKind::Point => None,
            PrimitiveKind::Line => Some(PrimitiveKind::Point),
            PrimitiveKind::Relation => Some(PrimitiveKind::Line),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Point => "point",
            PrimitiveKind::Line => "line",
            PrimitiveKind::Relation => "relation",
        }
    }
}

/// Identity of a primitive: (kind, id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrimitiveRef {
    pub kind: PrimitiveKind,
    pub id: i64,
}

impl PrimitiveRef {
    pub fn new(kind: PrimitiveKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn point(id: i64) -> Self {
        Self::new(PrimitiveKind::Point, id)
    }

    pub fn line(id: i64) -> Self {
        Self::new(PrimitiveKind::Line, id)
    }

    pub fn relation(id: i64) -> Self {
        Self::new(PrimitiveKind::Relation, id)
    }
}

impl fmt::Display for PrimitiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.id)
    }
}

/// Raw geographic primitive
///
/// `refs` holds child identifiers: point ids for a line, line ids for a
/// relation, empty for a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrimitive {
    pub kind: PrimitiveKind,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<i64>,
    #[serde(default)]
    pub tags: Tags,
}

impl RawPrimitive {
    pub fn point(id: i64) -> Self {
        Self {
            kind: PrimitiveKind::Point,
            id,
            refs: Vec::new(),
            tags: Tags::new(),
        }
    }

    pub fn line(id: i64, refs: Vec<i64>) -> Self {
        Self {
            kind: PrimitiveKind::Line,
            id,
            refs,
            tags: Tags::new(),
        }
    }

    pub fn relation(id: i64, members: Vec<i64>) -> Self {
        Self {
            kind: PrimitiveKind::Relation,
            id,
            refs: members,
            tags: Tags::new(),
        }
    }

    /// Builder-style tag insertion
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn reference(&self) -> PrimitiveRef {
        PrimitiveRef::new(self.kind, self.id)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tag(key) == Some(value)
    }

    /// Child references resolved to their kind
    pub fn child_refs(&self) -> impl Iterator<Item = PrimitiveRef> + '_ {
        let kind = self.kind.child_kind();
        self.refs
            .iter()
            .filter_map(move |id| kind.map(|k| PrimitiveRef::new(k, *id)))
    }

    /// A line whose first and last point coincide
    pub fn is_closed_line(&self) -> bool {
        self.kind == PrimitiveKind::Line
            && self.refs.len() >= 4
            && self.refs.first() == self.refs.last()
    }
}
