/*!
 * Structure inference for untyped JSON documents.
 *
 * Walks a document depth-first and records, for every leaf field path,
 * the set of value types observed there. Nested objects only extend the
 * path; arrays of objects are sampled through their first element.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Runtime category of a leaf value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Str,
    Int,
    Float,
    Bool,
    NoneType,
    List,
}

impl TypeTag {
    /// Tag for a value; objects have no tag of their own
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::NoneType),
            Value::Bool(_) => Some(Self::Bool),
            Value::Number(n) if is_integer_literal(n) => Some(Self::Int),
            Value::Number(_) => Some(Self::Float),
            Value::String(_) => Some(Self::Str),
            Value::Array(_) => Some(Self::List),
            Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::NoneType => "NoneType",
            Self::List => "list",
        }
    }
}

// Integers wider than 64 bits keep their literal form, so classify by it.
fn is_integer_literal(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || !n.to_string().contains(['.', 'e', 'E'])
}

// Sets of tags render in name order, so ordering follows the name.
impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of tags observed at one path
pub type TypeSet = BTreeSet<TypeTag>;

/// Field path to observed tags, for one document
pub type StructureMap = BTreeMap<String, TypeSet>;

/// How arrays that cannot be descended into are treated
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListPolicy {
    /// Empty arrays and arrays of scalars leave no trace
    #[default]
    Skip,
    /// Empty arrays and arrays of scalars are recorded as `list`
    Tag,
}

/// Render a tag set as `a, b, c` in name order
pub fn render_types(types: &TypeSet) -> String {
    types
        .iter()
        .map(TypeTag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Infer the structure of a document with the default list policy
pub fn analyze(document: &Value) -> StructureMap {
    analyze_with(document, ListPolicy::default())
}

/// Infer the structure of a document.
///
/// Only an object root has fields; any other root yields an empty map.
pub fn analyze_with(document: &Value, policy: ListPolicy) -> StructureMap {
    match document {
        Value::Object(fields) => walk_object(fields, "", policy),
        _ => StructureMap::new(),
    }
}

fn walk_object(fields: &Map<String, Value>, prefix: &str, policy: ListPolicy) -> StructureMap {
    fields.iter().fold(StructureMap::new(), |acc, (key, value)| {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        merge(acc, walk_value(value, path, policy))
    })
}

fn walk_value(value: &Value, path: String, policy: ListPolicy) -> StructureMap {
    match value {
        Value::Object(fields) => walk_object(fields, &path, policy),
        Value::Array(items) => match items.first() {
            Some(Value::Object(first)) => walk_object(first, &path, policy),
            _ => match policy {
                ListPolicy::Skip => StructureMap::new(),
                ListPolicy::Tag => single(path, TypeTag::List),
            },
        },
        leaf => TypeTag::of(leaf)
            .map(|tag| single(path, tag))
            .unwrap_or_default(),
    }
}

fn single(path: String, tag: TypeTag) -> StructureMap {
    StructureMap::from([(path, TypeSet::from([tag]))])
}

/// Union of two maps; tag sets at shared paths are unioned
fn merge(mut left: StructureMap, right: StructureMap) -> StructureMap {
    for (path, types) in right {
        left.entry(path).or_default().extend(types);
    }
    left
}
