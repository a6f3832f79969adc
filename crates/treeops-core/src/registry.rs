//! Identifier-keyed registries, encoded as string nodes.
//!
//! A registry maps namespaced identifiers (`namespace:path`) to values. Its
//! entries travel through any [`DynamicOps`] as plain strings: encoding
//! writes the entry's identifier, decoding parses the string back and looks
//! it up. Only `create_string`, `get_string_value` and `empty` are used, so
//! this works unchanged for every tree representation.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::OpsError;
use crate::ops::DynamicOps;
use crate::result::DataResult;

/// Namespace assumed when an identifier has no `namespace:` prefix.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A `namespace:path` registry key.
///
/// Namespaces may contain `[a-z0-9_.-]`; paths additionally allow `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub fn new(namespace: &str, path: &str) -> Result<Self, OpsError> {
        let invalid = |message: &str| OpsError::InvalidIdentifier {
            input: format!("{}:{}", namespace, path),
            message: message.to_string(),
        };
        if namespace.is_empty() {
            return Err(invalid("empty namespace"));
        }
        if path.is_empty() {
            return Err(invalid("empty path"));
        }
        if !namespace.chars().all(is_namespace_char) {
            return Err(invalid("namespace may only contain [a-z0-9_.-]"));
        }
        if !path.chars().all(|c| is_namespace_char(c) || c == '/') {
            return Err(invalid("path may only contain [a-z0-9_./-]"));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

impl FromStr for Identifier {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Identifier::new(namespace, path),
            None => Identifier::new(DEFAULT_NAMESPACE, s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Ordered `Identifier -> T` table.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: IndexMap<Identifier, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value, replacing any previous value under `id`.
    pub fn register(&mut self, id: Identifier, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    pub fn get(&self, id: &Identifier) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &T)> {
        self.entries.iter()
    }
}

impl<T: PartialEq> Registry<T> {
    /// Reverse lookup. Linear in the registry size.
    pub fn id_of(&self, value: &T) -> Option<&Identifier> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(id, _)| id)
    }
}

impl<T> FromIterator<(Identifier, T)> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = (Identifier, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

pub fn encode_identifier<O: DynamicOps>(ops: &O, id: &Identifier) -> O::Value {
    ops.create_string(&id.to_string())
}

pub fn decode_identifier<O: DynamicOps>(ops: &O, input: &O::Value) -> DataResult<Identifier> {
    ops.get_string_value(input)
        .flat_map(|s| match s.parse::<Identifier>() {
            Ok(id) => DataResult::success(id),
            Err(e) => DataResult::error(e),
        })
}

/// Encode a registry entry as its identifier string, or as the absent value
/// when the entry is not registered.
pub fn encode_entry<O: DynamicOps, T: PartialEq>(
    ops: &O,
    registry: &Registry<T>,
    value: &T,
) -> O::Value {
    match registry.id_of(value) {
        Some(id) => encode_identifier(ops, id),
        None => ops.empty(),
    }
}

/// Decode an identifier string and look it up in `registry`.
pub fn decode_entry<'r, O: DynamicOps, T>(
    ops: &O,
    registry: &'r Registry<T>,
    input: &O::Value,
) -> DataResult<&'r T> {
    match decode_identifier(ops, input) {
        DataResult::Success(id) => match registry.get(&id) {
            Some(value) => DataResult::success(value),
            None => DataResult::error(OpsError::UnknownEntry(id.to_string())),
        },
        DataResult::Error(err) => DataResult::error(err.error),
    }
}
