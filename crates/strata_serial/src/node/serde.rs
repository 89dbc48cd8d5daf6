//! Bridge between [`DataNode`] trees and serde data formats.
//!
//! Scalars of any kind are stored as their textual form, `()` and `None`
//! become `null`. Tags are not carried across the bridge, except that a
//! string spelling `null` or `~` reads back with [`ValueNode::LITERAL_TAG`]
//! and an absent value is written as the format's unit.

use alloc::string::{String, ToString};
use core::fmt;

use serde_core::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::node::{DataNode, MappingNode, SequenceNode, ValueNode};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for DataNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DataNode::Value(node) => node.serialize(serializer),
            DataNode::Sequence(node) => node.serialize(serializer),
            DataNode::Mapping(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for ValueNode {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_absent() {
            serializer.serialize_unit()
        } else {
            serializer.serialize_str(self.value())
        }
    }
}

/// Mapping key: scalars always go out as text, most formats reject unit keys.
struct KeyText<'a>(&'a DataNode);

impl Serialize for KeyText<'_> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            DataNode::Value(node) => serializer.serialize_str(node.value()),
            node => node.serialize(serializer),
        }
    }
}

impl Serialize for SequenceNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            state.serialize_element(item)?;
        }
        state.end()
    }
}

impl Serialize for MappingNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            state.serialize_entry(&KeyText(key), value)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

impl<'de> Deserialize<'de> for DataNode {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DataNodeVisitor)
    }
}

struct DataNodeVisitor;

impl DataNodeVisitor {
    #[inline]
    fn scalar<E>(text: impl ToString) -> Result<DataNode, E> {
        Ok(DataNode::value(text.to_string()))
    }

    fn text<E>(text: impl Into<String>) -> Result<DataNode, E> {
        let node = ValueNode::new(text);
        if node.is_null() {
            Ok(DataNode::Value(node.with_tag(ValueNode::LITERAL_TAG)))
        } else {
            Ok(DataNode::Value(node))
        }
    }
}

impl<'de> Visitor<'de> for DataNodeVisitor {
    type Value = DataNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a sequence or a mapping")
    }

    fn visit_bool<E>(self, v: bool) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_i128<E>(self, v: i128) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_u64<E>(self, v: u64) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_u128<E>(self, v: u128) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_f32<E>(self, v: f32) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_f64<E>(self, v: f64) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_char<E>(self, v: char) -> Result<DataNode, E> {
        Self::scalar(v)
    }

    fn visit_str<E>(self, v: &str) -> Result<DataNode, E> {
        Self::text(v)
    }

    fn visit_string<E>(self, v: String) -> Result<DataNode, E> {
        Self::text(v)
    }

    fn visit_unit<E>(self) -> Result<DataNode, E> {
        Ok(DataNode::null())
    }

    fn visit_none<E>(self) -> Result<DataNode, E> {
        Ok(DataNode::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DataNode, D::Error> {
        DataNode::deserialize(deserializer)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<DataNode, D::Error> {
        DataNode::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DataNode, A::Error> {
        let mut node = SequenceNode::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<DataNode>()? {
            node.push(item);
        }
        Ok(DataNode::Sequence(node))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DataNode, A::Error> {
        let mut node = MappingNode::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, value)) = map.next_entry::<DataNode, DataNode>()? {
            node.push(key, value);
        }
        Ok(DataNode::Mapping(node))
    }
}

// -----------------------------------------------------------------------------
// Tests
