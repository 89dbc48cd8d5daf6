use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::hash::Hash;

use strata_utils::hash::HashMap;

use crate::context::SerializationContext;
use crate::deps::Dependencies;
use crate::error::SerialError;
use crate::node::{DataNode, MappingNode, NodeRef};
use crate::plugin::TypeSerializer;
use crate::validation::{NodeLocation, ValidationNode};

// -----------------------------------------------------------------------------
// MappingSerializer

/// Serializer for `BTreeMap<K, V>` and [`HashMap<K, V>`].
///
/// Keys and values are delegated to the serializers of `K` and `V`.
/// Repeated keys are rejected. Values the serializer of `V` considers
/// [absent](TypeSerializer::is_absent) are omitted unless `always_write`.
///
/// ```
/// use strata_serial::node::DataNode;
/// use strata_serial::SerializationManager;
///
/// let mut builder = SerializationManager::builder();
/// builder.register_hash_map::<String, i32>();
/// let manager = builder.build().unwrap();
///
/// let node: DataNode = serde_json::from_str(r#"{"a": 1, "b": "x", "a": 3}"#).unwrap();
/// let errors = manager
///     .validate::<strata_utils::hash::HashMap<String, i32>>(&node)
///     .unwrap()
///     .errors();
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors[0].path, "b");
/// assert_eq!(errors[1].path, "{a}");
/// assert_eq!(errors[1].message, "Duplicate key 'a'.");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MappingSerializer;

fn key_label(key: &DataNode) -> String {
    match key.as_str() {
        Some(text) => String::from(text),
        None => key.to_string(),
    }
}

fn duplicate_key(key: &DataNode) -> String {
    format!("Duplicate key '{}'.", key_label(key))
}

fn validate_entries<'a, K, V>(
    node: NodeRef<'a, MappingNode>,
    deps: &Dependencies<'_>,
) -> ValidationNode<'a>
where
    K: Send + 'static,
    V: Send + 'static,
{
    let manager = deps.manager();
    let map = node.into_node();
    let duplicates = map.duplicate_keys();

    let mut children = Vec::with_capacity(map.len() * 2);
    for (index, (key, value)) in map.iter().enumerate() {
        let label = key_label(key);
        let key_result = if duplicates.binary_search(&index).is_ok() {
            ValidationNode::invalid(key, duplicate_key(key))
        } else {
            manager.validate_nested::<K>(key)
        };
        children.push((NodeLocation::KeyOf(label.clone()), key_result));
        children.push((NodeLocation::Key(label), manager.validate_nested::<V>(value)));
    }
    ValidationNode::composite(node.source(), "Invalid mapping.", children)
}

macro_rules! impl_mapping_serializer {
    ($map:ident, $($key_bound:tt)+) => {
        impl<K, V> TypeSerializer<$map<K, V>> for MappingSerializer
        where
            K: $($key_bound)+ + Clone + Send + 'static,
            V: Clone + Send + 'static,
        {
            type Node = MappingNode;

            #[inline]
            fn validate<'a>(
                &self,
                node: NodeRef<'a, MappingNode>,
                deps: &Dependencies<'_>,
            ) -> ValidationNode<'a> {
                validate_entries::<K, V>(node, deps)
            }

            fn read(
                &self,
                node: &MappingNode,
                deps: &Dependencies<'_>,
                mut ctx: Option<&mut dyn SerializationContext>,
            ) -> Result<$map<K, V>, SerialError> {
                let manager = deps.manager();
                let mut map = <$map<K, V>>::default();
                for (key, value) in node.iter() {
                    let k = manager.read::<K>(key, ctx.as_deref_mut())?;
                    let v = manager.read::<V>(value, ctx.as_deref_mut())?;
                    if map.insert(k, v).is_some() {
                        return Err(SerialError::decode(duplicate_key(key), key.clone()));
                    }
                }
                Ok(map)
            }

            fn write(
                &self,
                value: &$map<K, V>,
                always_write: bool,
                deps: &Dependencies<'_>,
                mut ctx: Option<&mut dyn SerializationContext>,
            ) -> Result<DataNode, SerialError> {
                let manager = deps.manager();
                let mut node = MappingNode::with_capacity(value.len());
                for (k, v) in value {
                    if !always_write && manager.is_absent(v)? {
                        continue;
                    }
                    let key_node = manager.write(k, always_write, ctx.as_deref_mut())?;
                    let value_node = manager.write(v, always_write, ctx.as_deref_mut())?;
                    node.push(key_node, value_node);
                }
                Ok(DataNode::Mapping(node))
            }

            fn copy(
                &self,
                source: &$map<K, V>,
                mut target: $map<K, V>,
                deps: &Dependencies<'_>,
                mut ctx: Option<&mut dyn SerializationContext>,
            ) -> Result<$map<K, V>, SerialError> {
                let manager = deps.manager();
                target.retain(|k, _| source.contains_key(k));
                for (k, v) in source {
                    let old = target.remove(k).unwrap_or_else(|| v.clone());
                    let value = manager.copy(v, old, ctx.as_deref_mut())?;
                    target.insert(k.clone(), value);
                }
                Ok(target)
            }
        }
    };
}

impl_mapping_serializer!(BTreeMap, Ord);
impl_mapping_serializer!(HashMap, Eq + Hash);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use strata_utils::hash::HashMap;

    use crate::node::{DataNode, MappingNode, SequenceNode};
    use crate::{SerialError, SerializationManager};

    fn manager() -> SerializationManager {
        let mut builder = SerializationManager::builder();
        builder
            .register_btree_map::<String, u8>()
            .register_btree_map::<u8, Option<String>>()
            .register_hash_map::<String, Vec<i32>>();
        builder.build().unwrap()
    }

    #[test]
    fn keys_and_values_are_checked() {
        let manager = manager();
        let mut node = MappingNode::new();
        node.push("ok", "1");
        node.push("big", "300");
        node.push(SequenceNode::new(), "2");
        let node = DataNode::from(node);

        let result = manager.validate::<BTreeMap<String, u8>>(&node).unwrap();
        assert_eq!(result.message(), Some("Invalid mapping."));
        let errors = result.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "big");
        assert_eq!(errors[0].message, "Failed to parse '300' as u8.");
        assert_eq!(errors[1].path, "{[]}");
        assert_eq!(errors[1].message, "Expected a value node, found a sequence node.");
    }

    #[test]
    fn decoded_duplicates_fail_read() {
        let manager = manager();
        let mut node = MappingNode::new();
        node.push("1", "a");
        node.push("01", "b");
        let node = DataNode::from(node);

        // raw keys differ, so validation cannot see it
        assert!(manager.validate::<BTreeMap<u8, Option<String>>>(&node).unwrap().is_valid());
        match manager.read::<BTreeMap<u8, Option<String>>>(&node, None) {
            Err(SerialError::Decode(err)) => assert_eq!(err.message, "Duplicate key '01'."),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn absent_values_are_skipped_unless_always_write() {
        let manager = manager();
        let mut map = BTreeMap::new();
        map.insert(1u8, Some(String::from("one")));
        map.insert(2u8, None);

        let compact = manager.write(&map, false, None).unwrap();
        assert_eq!(compact.to_string(), "{1: one}");

        let full = manager.write(&map, true, None).unwrap();
        assert_eq!(full.to_string(), "{1: one, 2: null}");
        assert_eq!(manager.read::<BTreeMap<u8, Option<String>>>(&full, None).unwrap(), map);
    }

    #[test]
    fn hash_map_round_trip_and_copy() {
        let manager = manager();
        let node: DataNode = serde_json::from_str(r#"{"a": [1, 2], "b": []}"#).unwrap();
        let map = manager
            .read_validated::<HashMap<String, Vec<i32>>>(&node, None)
            .unwrap();
        assert_eq!(map["a"], vec![1, 2]);
        assert!(map["b"].is_empty());

        let written = manager.write(&map, false, None).unwrap();
        let again = manager.read::<HashMap<String, Vec<i32>>>(&written, None).unwrap();
        assert_eq!(again, map);

        let mut target = HashMap::default();
        target.insert(String::from("a"), Vec::with_capacity(16));
        target.insert(String::from("stale"), vec![9]);
        let copied = manager.copy(&map, target, None).unwrap();
        assert_eq!(copied, map);
        assert!(!copied.contains_key("stale"));
    }

    #[test]
    fn large_mapping_validation() {
        const LEN: usize = 50_000;

        let manager = manager();
        let mut node = MappingNode::with_capacity(LEN + 1);
        for i in 0..LEN {
            node.push(alloc::format!("k{i}"), "1");
        }
        let unique = DataNode::from(node.clone());
        assert!(manager.validate::<BTreeMap<String, u8>>(&unique).unwrap().is_valid());

        node.push("k7", "2");
        let node = DataNode::from(node);
        let errors = manager.validate::<BTreeMap<String, u8>>(&node).unwrap().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Duplicate key 'k7'.");
    }
}
