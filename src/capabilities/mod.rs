//! 能力声明 — 能力名称到需求描述的映射，以及本地二进制的能力提供者
//!
//! Capability declarations: the name → descriptor mapping carried by a
//! configuration, and the provider trait a binary implements to say which
//! names it understands.
//!
//! | Item | Description |
//! |------|-------------|
//! | [`Capability`] | Requirement descriptor for one capability name |
//! | [`CapabilitySet`] | Name-ordered mapping of capability names to descriptors |
//! | [`CapabilityProvider`] | What the local binary supports |
//! | [`contexts`] | Built-in providers for channel, orderer and application |
//! | [`CapabilityError`] | The single failure mode of a compatibility check |

pub mod contexts;
pub mod error;
pub mod provider;

pub use contexts::{ApplicationProvider, ChannelProvider, Context, OrdererProvider};
pub use error::CapabilityError;
pub use provider::{CapabilityProvider, StaticProvider};

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Requirement descriptor attached to a capability name.
///
/// An absent `required` flag decodes as `false`. Fields this crate does not
/// know about are kept in `extra` and never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Capability {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }
}

/// Capability names mapped to their descriptors.
///
/// Entries are kept in ascending name order so that every walk over the set,
/// and therefore every diagnostic derived from it, is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    entries: BTreeMap<String, Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate entries in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Capability)> {
        self.entries.iter().map(|(name, cap)| (name.as_str(), cap))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Names of the entries flagged as required.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, cap)| cap.required).map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Capability)> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = (S, Capability)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, cap)| (name.into(), cap))
                .collect(),
        }
    }
}

impl From<std::collections::HashMap<String, Capability>> for CapabilitySet {
    fn from(map: std::collections::HashMap<String, Capability>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Capability>> for CapabilitySet {
    fn from(entries: BTreeMap<String, Capability>) -> Self {
        Self { entries }
    }
}

// A null descriptor (`V2_0: ~`) is accepted and means "not required". Empty
// and repeated names are rejected: a later duplicate must never downgrade a
// required entry.
impl<'de> Deserialize<'de> for CapabilitySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CapabilitySetVisitor)
    }
}

struct CapabilitySetVisitor;

impl<'de> Visitor<'de> for CapabilitySetVisitor {
    type Value = CapabilitySet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of capability names to descriptors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some(name) = map.next_key::<String>()? {
            if name.is_empty() {
                return Err(de::Error::custom("capability name must not be empty"));
            }
            if entries.contains_key(&name) {
                return Err(de::Error::custom(format!("duplicate capability {}", name)));
            }
            let cap = map.next_value::<Option<Capability>>()?;
            entries.insert(name, cap.unwrap_or_default());
        }
        Ok(CapabilitySet { entries })
    }
}
