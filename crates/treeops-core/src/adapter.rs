//! `TreeOps` — the operations contract over [`Node`] trees.
//!
//! Two flavors share every line of logic and differ only in their [`Mode`]:
//!
//! - **strict**: numbers come from numeric/boolean primitives, strings from
//!   string primitives, map keys must be string primitives.
//! - **compressed**: numbers may also be parsed out of string primitives,
//!   any primitive renders to a string, any primitive may serve as a map key,
//!   and [`DynamicOps::compress_maps`] reports `true`.
//!
//! # Merge order
//!
//! The single-pair and bulk map merges deliberately use opposite
//! precedence. `merge_to_map` inserts the new pair first and copies the
//! existing entries over it, so an existing key keeps its value and a new key
//! lands in front. `merge_entries_to_map` copies the existing entries first
//! and then applies the new ones, so new values win and new keys land at the
//! end. Callers depend on both.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};
use crate::node::{Array, Node, Object, Primitive};
use crate::number::Number;
use crate::ops::{DynamicOps, ListConsumer, MapLike, Stream};
use crate::result::DataResult;

/// Coercion mode of a [`TreeOps`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Strict,
    Compressed,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Strict => f.write_str("strict"),
            Mode::Compressed => f.write_str("compressed"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Mode::Strict),
            "compressed" => Ok(Mode::Compressed),
            other => Err(format!(
                "unknown mode '{}', expected 'strict' or 'compressed'",
                other
            )),
        }
    }
}

/// Operations over [`Node`] trees.
///
/// Stateless and `Copy`; use the [`TreeOps::STRICT`] and
/// [`TreeOps::COMPRESSED`] instances or build one with [`TreeOps::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeOps {
    mode: Mode,
}

impl TreeOps {
    pub const STRICT: TreeOps = TreeOps::new(Mode::Strict);
    pub const COMPRESSED: TreeOps = TreeOps::new(Mode::Compressed);

    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn compressed(&self) -> bool {
        self.mode == Mode::Compressed
    }

    /// The map key a node stands for, under this instance's key rule.
    fn key_of(&self, key: &Node) -> Option<String> {
        key_string(key, self.compressed())
    }
}

impl fmt::Display for TreeOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Strict => f.write_str("TreeOps"),
            Mode::Compressed => f.write_str("TreeOps[compressed]"),
        }
    }
}

fn key_string(key: &Node, compressed: bool) -> Option<String> {
    match key {
        Node::Primitive(Primitive::String(s)) => Some(s.clone()),
        Node::Primitive(p) if compressed => Some(p.to_string()),
        _ => None,
    }
}

/// Parse an integer out of a string primitive for compressed mode.
fn parse_integer(s: &str) -> std::result::Result<Number, std::num::ParseIntError> {
    match s.parse::<i32>() {
        Ok(v) => Ok(Number::Int(v)),
        Err(_) => s.parse::<i64>().map(Number::Long),
    }
}

impl DynamicOps for TreeOps {
    type Value = Node;

    fn empty(&self) -> Node {
        Node::Null
    }

    fn empty_list(&self) -> Node {
        Node::Array(Array::new())
    }

    fn empty_map(&self) -> Node {
        Node::Object(Object::new())
    }

    fn create_numeric(&self, n: Number) -> Node {
        Node::from(n)
    }

    fn create_byte(&self, v: i8) -> Node {
        Node::Primitive(Primitive::Byte(v))
    }

    fn create_short(&self, v: i16) -> Node {
        Node::Primitive(Primitive::Short(v))
    }

    fn create_int(&self, v: i32) -> Node {
        Node::Primitive(Primitive::Int(v))
    }

    fn create_long(&self, v: i64) -> Node {
        Node::Primitive(Primitive::Long(v))
    }

    fn create_float(&self, v: f32) -> Node {
        Node::Primitive(Primitive::Float(v))
    }

    fn create_double(&self, v: f64) -> Node {
        Node::Primitive(Primitive::Double(v))
    }

    fn create_boolean(&self, v: bool) -> Node {
        Node::Primitive(Primitive::Bool(v))
    }

    fn create_string(&self, v: &str) -> Node {
        Node::Primitive(Primitive::String(v.to_string()))
    }

    fn create_list(&self, items: impl IntoIterator<Item = Node>) -> Node {
        Node::Array(items.into_iter().collect())
    }

    fn create_map(&self, pairs: impl IntoIterator<Item = (Node, Node)>) -> Node {
        let mut result = Object::new();
        for (key, value) in pairs {
            // Any primitive renders to a key here, independent of mode.
            match key {
                Node::Primitive(p) => {
                    result.insert(p.to_string(), value);
                }
                other => {
                    tracing::warn!(key = %other, "create_map: skipping non-primitive key");
                }
            }
        }
        Node::Object(result)
    }

    fn get_number_value(&self, input: &Node) -> DataResult<Number> {
        match input {
            Node::Primitive(Primitive::Bool(b)) => DataResult::success(Number::Int(*b as i32)),
            Node::Primitive(Primitive::String(s)) if self.compressed() => match parse_integer(s) {
                Ok(n) => DataResult::success(n),
                Err(e) => DataResult::error(OpsError::UnparsableNumber {
                    input: input.to_string(),
                    reason: e.to_string(),
                }),
            },
            Node::Primitive(p) => match p.as_number() {
                Some(n) => DataResult::success(n),
                None => DataResult::error(OpsError::NotANumber(input.to_string())),
            },
            _ => DataResult::error(OpsError::NotANumber(input.to_string())),
        }
    }

    fn get_string_value(&self, input: &Node) -> DataResult<String> {
        match input {
            Node::Primitive(Primitive::String(s)) => DataResult::success(s.clone()),
            Node::Primitive(p) if self.compressed() => DataResult::success(p.to_string()),
            _ => DataResult::error(OpsError::NotAString(input.to_string())),
        }
    }

    fn get_map_values<'a>(&self, input: &'a Node) -> DataResult<Stream<'a, (Node, Node)>> {
        match input {
            Node::Object(obj) => {
                let pairs: Stream<'a, (Node, Node)> = Box::new(
                    obj.iter()
                        .map(|(k, v)| (Node::from(k.as_str()), v.clone())),
                );
                DataResult::success(pairs)
            }
            _ => DataResult::error(OpsError::NotAMap(input.to_string())),
        }
    }

    fn get_map<'a>(&self, input: &'a Node) -> DataResult<Box<dyn MapLike<Node> + 'a>> {
        match input {
            Node::Object(obj) => {
                let view: Box<dyn MapLike<Node> + 'a> = Box::new(ObjectView::new(obj, *self));
                DataResult::success(view)
            }
            _ => DataResult::error(OpsError::NotAMap(input.to_string())),
        }
    }

    fn get_stream<'a>(&self, input: &'a Node) -> DataResult<Stream<'a, Node>> {
        match input {
            Node::Array(arr) => {
                let items: Stream<'a, Node> = Box::new(arr.iter().cloned());
                DataResult::success(items)
            }
            _ => DataResult::error(OpsError::NotAList(input.to_string())),
        }
    }

    fn get_list<'a>(&self, input: &'a Node) -> DataResult<ListConsumer<'a, Node>> {
        match input {
            Node::Array(arr) => {
                let consumer: ListConsumer<'a, Node> =
                    Box::new(move |sink: &mut dyn FnMut(Node)| {
                        for item in arr.iter() {
                            sink(item.clone());
                        }
                    });
                DataResult::success(consumer)
            }
            _ => DataResult::error(OpsError::NotAList(input.to_string())),
        }
    }

    fn merge_to_list(&self, list: &Node, value: Node) -> DataResult<Node> {
        match list {
            Node::Null => DataResult::success(Node::Array(std::iter::once(value).collect())),
            Node::Array(arr) => {
                let mut result = Array::with_capacity(arr.len() + 1);
                result.extend(arr.iter().cloned());
                result.push(value);
                DataResult::success(Node::Array(result))
            }
            _ => DataResult::error_with_partial(OpsError::NotAList(list.to_string()), list.clone()),
        }
    }

    fn merge_to_map(&self, map: &Node, key: Node, value: Node) -> DataResult<Node> {
        let Some(key) = self.key_of(&key) else {
            return DataResult::error_with_partial(
                OpsError::KeyNotString(key.to_string()),
                map.clone(),
            );
        };
        match map {
            Node::Null => {
                let mut result = Object::new();
                result.insert(key, value);
                DataResult::success(Node::Object(result))
            }
            Node::Object(existing) => {
                let mut result = Object::with_capacity(existing.len() + 1);
                result.insert(key, value);
                for (k, v) in existing.iter() {
                    result.insert(k.clone(), v.clone());
                }
                DataResult::success(Node::Object(result))
            }
            _ => DataResult::error_with_partial(OpsError::NotAMap(map.to_string()), map.clone()),
        }
    }

    fn merge_entries_to_map(
        &self,
        map: &Node,
        entries: impl IntoIterator<Item = (Node, Node)>,
    ) -> DataResult<Node> {
        let mut result = match map {
            Node::Null => Object::new(),
            Node::Object(existing) => existing.clone(),
            _ => {
                return DataResult::error_with_partial(
                    OpsError::NotAMap(map.to_string()),
                    map.clone(),
                )
            }
        };

        let mut missed = Vec::new();
        for (key, value) in entries {
            match self.key_of(&key) {
                Some(k) => {
                    result.insert(k, value);
                }
                None => missed.push(key.to_string()),
            }
        }

        if missed.is_empty() {
            DataResult::success(Node::Object(result))
        } else {
            DataResult::error_with_partial(OpsError::KeysNotStrings(missed), Node::Object(result))
        }
    }

    fn merge(&self, first: &Node, second: &Node) -> Result<Node> {
        match (first, second) {
            (Node::Null, _) => Ok(second.clone()),
            (_, Node::Null) => Ok(first.clone()),
            (Node::Object(a), Node::Object(b)) => {
                let mut result = a.clone();
                for (k, v) in b.iter() {
                    result.insert(k.clone(), v.clone());
                }
                Ok(Node::Object(result))
            }
            (Node::Array(a), Node::Array(b)) => Ok(Node::Array(
                a.iter().chain(b.iter()).cloned().collect(),
            )),
            _ => {
                tracing::debug!(%first, %second, "merge: incompatible shapes");
                Err(OpsError::CannotMerge {
                    first: first.to_string(),
                    second: second.to_string(),
                })
            }
        }
    }

    fn remove(&self, input: &Node, key: &str) -> Node {
        match input {
            Node::Object(obj) => Node::Object(
                obj.iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn convert_to<U: DynamicOps>(&self, out: &U, input: &Node) -> U::Value {
        match input {
            Node::Null => out.empty(),
            Node::Object(obj) => out.create_map(
                obj.iter()
                    .map(|(k, v)| (out.create_string(k), self.convert_to(out, v))),
            ),
            Node::Array(arr) => out.create_list(arr.iter().map(|v| self.convert_to(out, v))),
            Node::Primitive(p) => match p {
                Primitive::String(s) => out.create_string(s),
                Primitive::Bool(b) => out.create_boolean(*b),
                Primitive::Byte(v) => out.create_byte(*v),
                Primitive::Short(v) => out.create_short(*v),
                Primitive::Int(v) => out.create_int(*v),
                Primitive::Long(v) => out.create_long(*v),
                Primitive::Float(v) => out.create_float(*v),
                Primitive::Double(v) => out.create_double(*v),
            },
        }
    }

    fn compress_maps(&self) -> bool {
        self.compressed()
    }
}

/// Borrowing view over an [`Object`], returned by [`TreeOps::get_map`].
///
/// Lookups go straight to the object's index; nothing is copied until an
/// entry's key is rendered by [`MapLike::entries`].
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    object: &'a Object,
    ops: TreeOps,
}

impl<'a> ObjectView<'a> {
    pub fn new(object: &'a Object, ops: TreeOps) -> Self {
        Self { object, ops }
    }
}

impl MapLike<Node> for ObjectView<'_> {
    fn get(&self, key: &Node) -> Option<&Node> {
        match key {
            Node::Primitive(Primitive::String(s)) => self.object.get(s),
            _ => self.object.get(&self.ops.key_of(key)?),
        }
    }

    fn get_str(&self, key: &str) -> Option<&Node> {
        self.object.get(key)
    }

    fn entries(&self) -> Stream<'_, (Node, &Node)> {
        Box::new(self.object.iter().map(|(k, v)| (Node::from(k.as_str()), v)))
    }

    fn len(&self) -> usize {
        self.object.len()
    }
}
