//! # treeops-core
//!
//! Generic operations over self-describing hierarchical data trees.
//!
//! A codec that wants to read or write structured data without committing to
//! one concrete tree type talks to a [`DynamicOps`] implementation instead.
//! The operations cover construction, extraction with mode-dependent
//! coercion, key- and list-based merging, lazy map views, push-style list
//! consumption and recursive transcoding between unrelated backends.
//!
//! ## Quick start
//!
//! ```rust
//! use treeops_core::{DynamicOps, JsonOps, Node, TreeOps};
//!
//! let ops = &TreeOps::STRICT;
//!
//! let map = ops
//!     .merge_to_map(&ops.empty(), ops.create_string("name"), ops.create_string("Alice"))
//!     .into_result()
//!     .unwrap();
//! let map = ops
//!     .merge_to_map(&map, ops.create_string("age"), ops.create_int(30))
//!     .into_result()
//!     .unwrap();
//!
//! // Single-pair merges put new keys in front of existing ones.
//! let keys: Vec<&str> = map.as_object().unwrap().keys().collect();
//! assert_eq!(keys, ["age", "name"]);
//!
//! // Transcode into serde_json and back without losing the int width.
//! let json = ops.convert_to(&JsonOps, &map);
//! assert_eq!(json, serde_json::json!({"age": 30, "name": "Alice"}));
//! let back: Node = JsonOps.convert_to(ops, &json);
//! assert_eq!(back, map);
//! ```
//!
//! ## Modules
//!
//! - [`node`] — the tree data model (`Node`, `Object`, `Array`, `Primitive`)
//! - [`number`] — width-preserving numeric payload
//! - [`ops`] — the `DynamicOps` contract and the `MapLike` view
//! - [`adapter`] — `TreeOps`, the strict and compressed adapters over `Node`
//! - [`json`] — `JsonOps`, the same contract over `serde_json::Value`
//! - [`result`] — `DataResult`, success or error with a partial value
//! - [`serde_bridge`] — serde types to and from `Node`
//! - [`registry`] — identifier-keyed registries encoded as string nodes
//! - [`error`] — error types

pub mod adapter;
pub mod error;
pub mod json;
pub mod node;
pub mod number;
pub mod ops;
pub mod registry;
pub mod result;
pub mod serde_bridge;

pub use adapter::{Mode, ObjectView, TreeOps};
pub use error::OpsError;
pub use json::JsonOps;
pub use node::{Array, Node, NodeKind, Object, Primitive};
pub use number::Number;
pub use ops::{DynamicOps, ListConsumer, MapLike, Stream};
pub use registry::{Identifier, Registry};
pub use result::{DataResult, PartialResult};
pub use serde_bridge::{from_node, to_node};
