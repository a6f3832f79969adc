//! The tree data model: objects, arrays, primitives and null.
//!
//! Containers here only store and iterate. All merge, coercion and
//! transcoding rules live in [`crate::adapter`], which relies on two
//! guarantees from this module:
//!
//! - `Object` iterates in insertion order; overwriting a key keeps its
//!   position and removing a key keeps the order of the others.
//! - `Array` iterates in push order.

use std::fmt;

use indexmap::IndexMap;

use crate::number::Number;

/// One value in a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    /// Absent value. Not an empty container of any shape.
    #[default]
    Null,
    Object(Object),
    Array(Array),
    Primitive(Primitive),
}

/// The concrete shape of a node, including the scalar kind of primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Object,
    Array,
    String,
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Bool => "bool",
            NodeKind::Byte => "byte",
            NodeKind::Short => "short",
            NodeKind::Int => "int",
            NodeKind::Long => "long",
            NodeKind::Float => "float",
            NodeKind::Double => "double",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::Primitive(p) => p.kind(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Node::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// The string payload, if this is a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Renders compact JSON, used in error messages. Strings and keys use JSON
/// escaping; non-finite floats are written as Rust formats them.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Primitive(Primitive::String(s)) => write_json_str(f, s),
            Node::Primitive(p) => write!(f, "{}", p),
            Node::Array(arr) => {
                f.write_str("[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Node::Object(obj) => {
                f.write_str("{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_str(f, key)?;
                    write!(f, ":{}", value)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_json_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// Ordered string-keyed container.
///
/// Equality is order-sensitive: two objects with the same entries in a
/// different order are different trees.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Node>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        self.entries.insert(key.into(), value)
    }

    /// Remove a key, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.values()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl FromIterator<(String, Node)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Object {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Ordered sequence of nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Node>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: Node) {
        self.items.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }
}

impl FromIterator<Node> for Array {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Node> for Array {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Array {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// A single scalar. Numeric widths are kept distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Primitive {
    pub fn kind(&self) -> NodeKind {
        match self {
            Primitive::String(_) => NodeKind::String,
            Primitive::Bool(_) => NodeKind::Bool,
            Primitive::Byte(_) => NodeKind::Byte,
            Primitive::Short(_) => NodeKind::Short,
            Primitive::Int(_) => NodeKind::Int,
            Primitive::Long(_) => NodeKind::Long,
            Primitive::Float(_) => NodeKind::Float,
            Primitive::Double(_) => NodeKind::Double,
        }
    }

    /// The numeric payload; `None` for strings and booleans.
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            Primitive::Byte(v) => Some(Number::Byte(v)),
            Primitive::Short(v) => Some(Number::Short(v)),
            Primitive::Int(v) => Some(Number::Int(v)),
            Primitive::Long(v) => Some(Number::Long(v)),
            Primitive::Float(v) => Some(Number::Float(v)),
            Primitive::Double(v) => Some(Number::Double(v)),
            Primitive::String(_) | Primitive::Bool(_) => None,
        }
    }
}

impl From<Number> for Primitive {
    fn from(n: Number) -> Self {
        match n {
            Number::Byte(v) => Primitive::Byte(v),
            Number::Short(v) => Primitive::Short(v),
            Number::Int(v) => Primitive::Int(v),
            Number::Long(v) => Primitive::Long(v),
            Number::Float(v) => Primitive::Float(v),
            Number::Double(v) => Primitive::Double(v),
        }
    }
}

/// Best-effort string rendering. Strings are written verbatim.
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::String(s) => f.write_str(s),
            Primitive::Bool(b) => write!(f, "{}", b),
            Primitive::Byte(v) => write!(f, "{}", v),
            Primitive::Short(v) => write!(f, "{}", v),
            Primitive::Int(v) => write!(f, "{}", v),
            Primitive::Long(v) => write!(f, "{}", v),
            Primitive::Float(v) => write!(f, "{}", v),
            Primitive::Double(v) => write!(f, "{}", v),
        }
    }
}

// Conversions from common types

impl From<Primitive> for Node {
    fn from(p: Primitive) -> Self {
        Node::Primitive(p)
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Node::Primitive(n.into())
    }
}

impl From<Object> for Node {
    fn from(obj: Object) -> Self {
        Node::Object(obj)
    }
}

impl From<Array> for Node {
    fn from(arr: Array) -> Self {
        Node::Array(arr)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Primitive(Primitive::String(s))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Primitive(Primitive::String(s.to_string()))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Primitive(Primitive::Bool(b))
    }
}

impl From<i8> for Node {
    fn from(v: i8) -> Self {
        Node::Primitive(Primitive::Byte(v))
    }
}

impl From<i16> for Node {
    fn from(v: i16) -> Self {
        Node::Primitive(Primitive::Short(v))
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Node::Primitive(Primitive::Int(v))
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Primitive(Primitive::Long(v))
    }
}

impl From<f32> for Node {
    fn from(v: f32) -> Self {
        Node::Primitive(Primitive::Float(v))
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Primitive(Primitive::Double(v))
    }
}
