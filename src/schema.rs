//! Typedef schema model
//!
//! A typedef document is a JSON object of the shape
//!
//! ```json
//! {
//!   "type": "object",
//!   "properties": { "name": { "type": "string" }, "tags": { "type": "Tags", "optional": true } },
//!   "define": { "Tags": { "type": "list", "children": { "type": "string" } } }
//! }
//! ```
//!
//! Any type tag outside `string`, `number`, `object` and `list` names an
//! alias that must be visible through some enclosing `define` block when the
//! node is validated. Alias names are not checked here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, TypedefError};

/// Named aliases declared by a single node
pub type Aliases = BTreeMap<String, SchemaNode>;

/// Type tag of a schema node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    String,
    Number,
    Object,
    List,
    /// Reference to an alias resolved through the definition scope
    Alias(String),
}

impl SchemaKind {
    /// Parse a `type` tag. Unreserved tags become alias references.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "string" => SchemaKind::String,
            "number" => SchemaKind::Number,
            "object" => SchemaKind::Object,
            "list" => SchemaKind::List,
            other => SchemaKind::Alias(other.to_string()),
        }
    }

    /// The tag as written in a typedef document
    pub fn tag(&self) -> &str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Object => "object",
            SchemaKind::List => "list",
            SchemaKind::Alias(name) => name,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A declared object property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub schema: SchemaNode,
    /// Missing optional properties produce no finding
    pub optional: bool,
}

/// One node of a parsed typedef tree.
///
/// Nodes are only built by the parse constructors, so a `List` node always
/// carries its element schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    kind: SchemaKind,
    element: Option<Box<SchemaNode>>,
    properties: BTreeMap<String, Property>,
    definitions: Aliases,
}

/// Wire shape of a typedef node before structural checks
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    children: Option<Box<RawNode>>,
    #[serde(default)]
    properties: Option<BTreeMap<String, RawNode>>,
    #[serde(default)]
    define: Option<BTreeMap<String, RawNode>>,
    #[serde(default)]
    optional: Option<bool>,
}

const ROOT_LOCATION: &str = "$";

impl SchemaNode {
    /// Parse a typedef document from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawNode = serde_json::from_slice(bytes)
            .map_err(|e| TypedefError::malformed(ROOT_LOCATION, e.to_string()))?;
        Self::from_raw(raw, ROOT_LOCATION)
    }

    /// Parse a typedef document from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawNode = serde_json::from_value(value)
            .map_err(|e| TypedefError::malformed(ROOT_LOCATION, e.to_string()))?;
        Self::from_raw(raw, ROOT_LOCATION)
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Element schema; present exactly when the node is a `List`
    pub fn element(&self) -> Option<&SchemaNode> {
        self.element.as_deref()
    }

    /// Declared properties, sorted by name. Empty unless the node is an `Object`.
    pub fn properties(&self) -> &BTreeMap<String, Property> {
        &self.properties
    }

    /// Local aliases visible to this node and its descendants
    pub fn definitions(&self) -> &Aliases {
        &self.definitions
    }

    /// Whether this node references an alias
    pub fn is_alias(&self) -> bool {
        matches!(self.kind, SchemaKind::Alias(_))
    }

    fn from_raw(raw: RawNode, location: &str) -> Result<Self> {
        let kind = SchemaKind::parse(&raw.kind);

        let element = match (&kind, raw.children) {
            (SchemaKind::List, Some(child)) => {
                let child_location = format!("{}.children", location);
                Some(Box::new(Self::from_raw(*child, &child_location)?))
            }
            (SchemaKind::List, None) => {
                return Err(TypedefError::malformed(
                    location,
                    "list node has no 'children' element schema",
                ));
            }
            (_, Some(_)) => {
                return Err(TypedefError::malformed(
                    location,
                    format!("'children' is only allowed on list nodes, found type '{}'", kind),
                ));
            }
            (_, None) => None,
        };

        let mut properties = BTreeMap::new();
        if let Some(raw_properties) = raw.properties {
            if kind != SchemaKind::Object {
                return Err(TypedefError::malformed(
                    location,
                    format!("'properties' is only allowed on object nodes, found type '{}'", kind),
                ));
            }
            for (name, raw_property) in raw_properties {
                let optional = raw_property.optional.unwrap_or(false);
                let property_location = format!("{}.properties.{}", location, name);
                let schema = Self::from_raw(raw_property, &property_location)?;
                properties.insert(name, Property { schema, optional });
            }
        }

        let mut definitions = BTreeMap::new();
        for (name, raw_alias) in raw.define.unwrap_or_default() {
            let alias_location = format!("{}.define.{}", location, name);
            definitions.insert(name, Self::from_raw(raw_alias, &alias_location)?);
        }

        Ok(Self {
            kind,
            element,
            properties,
            definitions,
        })
    }
}

impl FromStr for SchemaNode {
    type Err = TypedefError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}
