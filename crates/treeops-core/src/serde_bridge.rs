//! Conversions between `Node` and serde types.
//!
//! Both directions go through `serde_json::Value` and transcode with
//! [`JsonOps`]. Integers therefore come back as `Int` when they fit in 32
//! bits and `Long` otherwise; floats come back as `Double`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapter::TreeOps;
use crate::error::Result;
use crate::json::JsonOps;
use crate::node::Node;
use crate::ops::DynamicOps;

/// Convert a Rust value to a `Node` via serde.
pub fn to_node<T: Serialize>(data: &T) -> Result<Node> {
    let json = serde_json::to_value(data)?;
    Ok(JsonOps.convert_to(&TreeOps::STRICT, &json))
}

/// Convert a `Node` to a Rust value via serde.
pub fn from_node<T: DeserializeOwned>(node: &Node) -> Result<T> {
    let json = TreeOps::STRICT.convert_to(&JsonOps, node);
    Ok(serde_json::from_value(json)?)
}
