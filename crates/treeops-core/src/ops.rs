//! The generic tree-operations contract.
//!
//! A codec written against [`DynamicOps`] can build and take apart trees of
//! any representation: it never names the concrete tree type, it only calls
//! operations on an ops value. Two implementations ship with this crate:
//! [`crate::TreeOps`] over [`crate::Node`] and [`crate::JsonOps`] over
//! `serde_json::Value`.
//!
//! Every operation treats its inputs as read-only and returns new values.

use crate::number::Number;
use crate::result::DataResult;

/// A finite, single-pass sequence.
pub type Stream<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Push-style list consumption: call it with a sink and every element is
/// handed to the sink once, in order.
pub type ListConsumer<'a, T> = Box<dyn FnOnce(&mut dyn FnMut(T)) + 'a>;

/// Read-only view over the entries of a map node.
///
/// Implementations borrow the underlying map; creating a view and doing a
/// point lookup must not copy the map.
pub trait MapLike<T: 'static> {
    /// Look up by key node. Returns `None` if the key is not usable as a
    /// map key under the ops' rules, or if it is absent.
    fn get(&self, key: &T) -> Option<&T>;

    fn get_str(&self, key: &str) -> Option<&T>;

    /// Entries in map order, keys rendered as string nodes.
    fn entries(&self) -> Stream<'_, (T, &T)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Operations over one tree representation.
pub trait DynamicOps {
    type Value: Clone + 'static;

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// The absent value.
    fn empty(&self) -> Self::Value;

    fn empty_list(&self) -> Self::Value {
        self.create_list(std::iter::empty())
    }

    fn empty_map(&self) -> Self::Value {
        self.create_map(std::iter::empty())
    }

    /// Wrap a number, keeping its width if the representation can.
    fn create_numeric(&self, n: Number) -> Self::Value;

    fn create_byte(&self, v: i8) -> Self::Value {
        self.create_numeric(Number::Byte(v))
    }

    fn create_short(&self, v: i16) -> Self::Value {
        self.create_numeric(Number::Short(v))
    }

    fn create_int(&self, v: i32) -> Self::Value {
        self.create_numeric(Number::Int(v))
    }

    fn create_long(&self, v: i64) -> Self::Value {
        self.create_numeric(Number::Long(v))
    }

    fn create_float(&self, v: f32) -> Self::Value {
        self.create_numeric(Number::Float(v))
    }

    fn create_double(&self, v: f64) -> Self::Value {
        self.create_numeric(Number::Double(v))
    }

    /// Representations without a boolean scalar store `1`/`0` bytes.
    fn create_boolean(&self, v: bool) -> Self::Value {
        self.create_byte(v as i8)
    }

    fn create_string(&self, v: &str) -> Self::Value;

    /// Build a list from elements in iteration order.
    fn create_list(&self, items: impl IntoIterator<Item = Self::Value>) -> Self::Value;

    /// Build a map from `(key, value)` pairs. Keys are expected to be
    /// string-compatible already; this is a construction primitive, not a
    /// validating merge.
    fn create_map(
        &self,
        pairs: impl IntoIterator<Item = (Self::Value, Self::Value)>,
    ) -> Self::Value;

    // ------------------------------------------------------------------
    // Extraction
    // ------------------------------------------------------------------

    fn get_number_value(&self, input: &Self::Value) -> DataResult<Number>;

    fn get_string_value(&self, input: &Self::Value) -> DataResult<String>;

    fn get_boolean_value(&self, input: &Self::Value) -> DataResult<bool> {
        self.get_number_value(input).map(|n| n.is_truthy())
    }

    fn get_map_values<'a>(
        &self,
        input: &'a Self::Value,
    ) -> DataResult<Stream<'a, (Self::Value, Self::Value)>>;

    fn get_map<'a>(
        &self,
        input: &'a Self::Value,
    ) -> DataResult<Box<dyn MapLike<Self::Value> + 'a>>;

    fn get_stream<'a>(&self, input: &'a Self::Value) -> DataResult<Stream<'a, Self::Value>>;

    fn get_list<'a>(&self, input: &'a Self::Value) -> DataResult<ListConsumer<'a, Self::Value>> {
        self.get_stream(input).map(|stream| {
            let consumer: ListConsumer<'a, Self::Value> =
                Box::new(move |sink: &mut dyn FnMut(Self::Value)| stream.for_each(sink));
            consumer
        })
    }

    // ------------------------------------------------------------------
    // Merging
    // ------------------------------------------------------------------

    /// Append `value` to `list`; the absent value counts as an empty list.
    fn merge_to_list(&self, list: &Self::Value, value: Self::Value) -> DataResult<Self::Value>;

    /// Add one entry to `map`. If `map` already has `key`, its value wins.
    fn merge_to_map(
        &self,
        map: &Self::Value,
        key: Self::Value,
        value: Self::Value,
    ) -> DataResult<Self::Value>;

    /// Add many entries to `map`. Here the new entries win on conflict.
    fn merge_entries_to_map(
        &self,
        map: &Self::Value,
        entries: impl IntoIterator<Item = (Self::Value, Self::Value)>,
    ) -> DataResult<Self::Value>;

    /// Whole-tree merge.
    fn merge(
        &self,
        first: &Self::Value,
        second: &Self::Value,
    ) -> crate::error::Result<Self::Value>;

    /// Copy of `input` without `key`. Non-maps are returned unchanged.
    fn remove(&self, input: &Self::Value, key: &str) -> Self::Value;

    // ------------------------------------------------------------------
    // Transcoding
    // ------------------------------------------------------------------

    /// Rebuild `input` as a tree of another representation.
    fn convert_to<U: DynamicOps>(&self, out: &U, input: &Self::Value) -> U::Value;

    /// Transcode a list element by element. Non-lists become an empty list.
    fn convert_list<U: DynamicOps>(&self, out: &U, input: &Self::Value) -> U::Value {
        let items = self.get_stream(input).result().into_iter().flatten();
        out.create_list(items.map(|item| self.convert_to(out, &item)))
    }

    /// Transcode a map entry by entry. Non-maps become an empty map.
    fn convert_map<U: DynamicOps>(&self, out: &U, input: &Self::Value) -> U::Value {
        let pairs = self.get_map_values(input).result().into_iter().flatten();
        out.create_map(pairs.map(|(k, v)| (self.convert_to(out, &k), self.convert_to(out, &v))))
    }

    /// Whether callers should prefer compact map encodings.
    fn compress_maps(&self) -> bool {
        false
    }
}
