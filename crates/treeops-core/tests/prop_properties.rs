/// Property-based tests for the tree operations.
///
/// Uses `proptest` to generate random `Node` trees and check the laws the
/// operations promise for every input:
/// - transcoding to the same representation is the identity
/// - `Node -> serde_json::Value -> Node` round-trips trees that only use the
///   widths JSON reads back (`Int`, `Long` outside the 32-bit range, `Double`)
/// - `Null` is the identity of whole-tree merge
/// - list merge appends, single-pair map merge keeps existing values, bulk map
///   merge lets new values win
/// - removal drops exactly one key and keeps the order of the rest
///
/// Floats are drawn from a finite range; NaN never equals itself.
use proptest::prelude::*;
use treeops_core::{DynamicOps, JsonOps, Node, Object, TreeOps};

const STRICT: TreeOps = TreeOps::STRICT;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,7}").unwrap()
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,16}",
        Just(String::new()),
        Just("42".to_string()),
        Just("caf\u{00e9}".to_string()),
    ]
}

/// Any primitive, every width.
fn arb_primitive() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::from),
        any::<i8>().prop_map(Node::from),
        any::<i16>().prop_map(Node::from),
        any::<i32>().prop_map(Node::from),
        any::<i64>().prop_map(Node::from),
        (-1.0e6f32..1.0e6f32).prop_map(Node::from),
        (-1.0e12f64..1.0e12f64).prop_map(Node::from),
        arb_string().prop_map(Node::from),
    ]
}

/// Primitives using only the widths JSON hands back unchanged.
fn arb_json_primitive() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::from),
        any::<i32>().prop_map(Node::from),
        prop_oneof![i64::MIN..(i32::MIN as i64), (i32::MAX as i64 + 1)..i64::MAX]
            .prop_map(Node::from),
        (-1.0e12f64..1.0e12f64).prop_map(Node::from),
        arb_string().prop_map(Node::from),
    ]
}

fn arb_tree(leaf: BoxedStrategy<Node>, depth: u32) -> BoxedStrategy<Node> {
    leaf.prop_recursive(depth, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec((arb_key(), inner.clone()), 0..5)
                .prop_map(|pairs| Node::Object(pairs.into_iter().collect::<Object>())),
            prop::collection::vec(inner, 0..5).prop_map(|items| STRICT.create_list(items)),
        ]
    })
    .boxed()
}

fn arb_node() -> BoxedStrategy<Node> {
    arb_tree(arb_primitive().boxed(), 3)
}

fn arb_json_node() -> BoxedStrategy<Node> {
    arb_tree(arb_json_primitive().boxed(), 3)
}

fn arb_object() -> impl Strategy<Value = Object> {
    prop::collection::vec((arb_key(), arb_primitive()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect::<Object>())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Transcoding into the same representation copies the tree exactly.
    #[test]
    fn convert_to_self_is_identity(node in arb_node()) {
        prop_assert_eq!(STRICT.convert_to(&STRICT, &node), node.clone());
        prop_assert_eq!(STRICT.convert_to(&TreeOps::COMPRESSED, &node), node);
    }

    /// JSON-representable trees survive a trip through `serde_json::Value`.
    #[test]
    fn json_roundtrip(node in arb_json_node()) {
        let json = STRICT.convert_to(&JsonOps, &node);
        let back = JsonOps.convert_to(&STRICT, &json);
        prop_assert_eq!(back, node);
    }

    /// `Null` is the identity on both sides of whole-tree merge.
    #[test]
    fn merge_null_identity(node in arb_node()) {
        prop_assert_eq!(STRICT.merge(&Node::Null, &node).unwrap(), node.clone());
        prop_assert_eq!(STRICT.merge(&node, &Node::Null).unwrap(), node);
    }

    /// Object merge keeps every key of both sides, second side's values winning.
    #[test]
    fn merge_objects_overlay(a in arb_object(), b in arb_object()) {
        let merged = STRICT
            .merge(&Node::Object(a.clone()), &Node::Object(b.clone()))
            .unwrap();
        let merged = merged.as_object().unwrap();
        for (k, v) in b.iter() {
            prop_assert_eq!(merged.get(k), Some(v));
        }
        for (k, v) in a.iter() {
            if !b.contains_key(k) {
                prop_assert_eq!(merged.get(k), Some(v));
            }
        }
    }

    /// List merge appends one element and leaves the prefix alone.
    #[test]
    fn merge_to_list_appends(
        items in prop::collection::vec(arb_primitive(), 0..8),
        value in arb_primitive(),
    ) {
        let list = STRICT.create_list(items.clone());
        let merged = STRICT.merge_to_list(&list, value.clone()).result().unwrap();
        let merged = merged.as_array().unwrap();
        prop_assert_eq!(merged.len(), items.len() + 1);
        prop_assert_eq!(&merged.as_slice()[..items.len()], items.as_slice());
        prop_assert_eq!(merged.get(items.len()), Some(&value));
    }

    /// Single-pair merge never overwrites and always puts the key first.
    #[test]
    fn merge_to_map_existing_wins(obj in arb_object(), key in arb_key(), value in arb_primitive()) {
        let map = Node::Object(obj.clone());
        let merged = STRICT
            .merge_to_map(&map, Node::from(key.as_str()), value.clone())
            .result()
            .unwrap();
        let merged = merged.as_object().unwrap();
        let expected = obj.get(&key).unwrap_or(&value);
        prop_assert_eq!(merged.get(&key), Some(expected));
        prop_assert_eq!(merged.keys().next(), Some(key.as_str()));
        prop_assert_eq!(merged.len(), obj.len() + usize::from(!obj.contains_key(&key)));
    }

    /// Bulk merge lets every incoming entry win.
    #[test]
    fn merge_entries_new_wins(a in arb_object(), b in arb_object()) {
        let entries: Vec<(Node, Node)> = b
            .iter()
            .map(|(k, v)| (Node::from(k.as_str()), v.clone()))
            .collect();
        let merged = STRICT
            .merge_entries_to_map(&Node::Object(a.clone()), entries)
            .result()
            .unwrap();
        let merged = merged.as_object().unwrap();
        for (k, v) in b.iter() {
            prop_assert_eq!(merged.get(k), Some(v));
        }
        // Existing keys keep their positions at the front.
        let prefix: Vec<&str> = merged.keys().take(a.len()).collect();
        let original: Vec<&str> = a.keys().collect();
        prop_assert_eq!(prefix, original);
    }

    /// Removal drops one key and keeps the order of everything else.
    #[test]
    fn remove_keeps_order(obj in arb_object(), key in arb_key()) {
        let removed = STRICT.remove(&Node::Object(obj.clone()), &key);
        let removed = removed.as_object().unwrap();
        prop_assert!(!removed.contains_key(&key));
        let expected: Vec<&str> = obj.keys().filter(|k| *k != key).collect();
        prop_assert_eq!(removed.keys().collect::<Vec<_>>(), expected);
    }

    /// The map view answers point lookups the same way the object does.
    #[test]
    fn map_view_matches_object(obj in arb_object(), lookup in arb_key()) {
        let node = Node::Object(obj.clone());
        let view = STRICT.get_map(&node).result().unwrap();
        prop_assert_eq!(view.len(), obj.len());
        prop_assert_eq!(view.get_str(&lookup), obj.get(&lookup));
        prop_assert_eq!(view.get(&Node::from(lookup.as_str())), obj.get(&lookup));
    }

    /// Operations never panic on arbitrary input, whatever its shape.
    #[test]
    fn operations_never_panic(node in arb_node(), other in arb_node()) {
        let _ = STRICT.get_number_value(&node);
        let _ = TreeOps::COMPRESSED.get_number_value(&node);
        let _ = TreeOps::COMPRESSED.get_string_value(&node);
        let _ = STRICT.merge_to_list(&node, other.clone());
        let _ = STRICT.merge_to_map(&node, other.clone(), Node::Null);
        let _ = STRICT.merge(&node, &other);
        let _ = STRICT.remove(&node, "a");
    }
}
