//! `tf.train.Example` protocol buffer messages
//!
//! Field numbers match `tensorflow/core/example/{example,feature}.proto` so
//! the output is readable by any TFRecord consumer.

use std::collections::BTreeMap;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Example {
    #[prost(message, optional, tag = "1")]
    pub features: Option<Features>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Features {
    #[prost(btree_map = "string, message", tag = "1")]
    pub feature: BTreeMap<String, Feature>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Feature {
    #[prost(oneof = "feature::Kind", tags = "1, 2, 3")]
    pub kind: Option<feature::Kind>,
}

pub mod feature {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        BytesList(super::BytesList),
        #[prost(message, tag = "2")]
        FloatList(super::FloatList),
        #[prost(message, tag = "3")]
        Int64List(super::Int64List),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BytesList {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub value: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FloatList {
    #[prost(float, repeated, tag = "1")]
    pub value: Vec<f32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Int64List {
    #[prost(int64, repeated, tag = "1")]
    pub value: Vec<i64>,
}

impl Feature {
    pub fn int64(value: i64) -> Self {
        Feature {
            kind: Some(feature::Kind::Int64List(Int64List { value: vec![value] })),
        }
    }

    pub fn bytes(value: Vec<u8>) -> Self {
        Feature {
            kind: Some(feature::Kind::BytesList(BytesList { value: vec![value] })),
        }
    }

    /// First value of an int64 feature
    pub fn as_int64(&self) -> Option<i64> {
        match &self.kind {
            Some(feature::Kind::Int64List(list)) => list.value.first().copied(),
            _ => None,
        }
    }

    /// First value of a bytes feature
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            Some(feature::Kind::BytesList(list)) => list.value.first().map(Vec::as_slice),
            _ => None,
        }
    }
}

impl Example {
    pub fn from_features<I>(features: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Feature)>,
    {
        Example {
            features: Some(Features {
                feature: features
                    .into_iter()
                    .map(|(name, feature)| (name.to_string(), feature))
                    .collect(),
            }),
        }
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.as_ref()?.feature.get(name)
    }
}
