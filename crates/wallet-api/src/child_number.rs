use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WalletApiError;

/// Offset added to a hardened index in its raw BIP-32 serialization.
pub const HARDENED_OFFSET: u32 = 1 << 31;

/// A single BIP-32 derivation step.
///
/// The wrapped index of `Hardened` and `Normal` must be below 2^31; the
/// hardened bit is only ever applied by [`ChildNumber::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ChildNumberRepr", into = "ChildNumberRepr")]
pub enum ChildNumber {
    Hardened(u32),
    Normal(u32),
    Master,
}

impl ChildNumber {
    /// Hardened step. Panics if `index` has the hardened bit set.
    pub fn hardened(index: u32) -> Self {
        assert!(index < HARDENED_OFFSET, "hardened index {index} out of range");
        ChildNumber::Hardened(index)
    }

    /// Normal step. Panics if `index` has the hardened bit set.
    pub fn normal(index: u32) -> Self {
        assert!(index < HARDENED_OFFSET, "normal index {index} out of range");
        ChildNumber::Normal(index)
    }

    /// Raw 32-bit BIP-32 index: hardened steps carry the top bit, master is 0.
    ///
    /// Panics if the wrapped index is 2^31 or larger.
    pub fn index(&self) -> u32 {
        match *self {
            ChildNumber::Hardened(i) => {
                assert!(i < HARDENED_OFFSET, "hardened index {i} out of range");
                HARDENED_OFFSET + i
            }
            ChildNumber::Normal(i) => {
                assert!(i < HARDENED_OFFSET, "normal index {i} out of range");
                i
            }
            ChildNumber::Master => 0,
        }
    }

    /// Inverse of [`ChildNumber::index`] for non-master steps.
    pub fn from_index(number: u32) -> Self {
        if number & HARDENED_OFFSET != 0 {
            ChildNumber::Hardened(number & !HARDENED_OFFSET)
        } else {
            ChildNumber::Normal(number)
        }
    }

    pub fn is_hardened(&self) -> bool {
        match self {
            ChildNumber::Hardened(_) => true,
            ChildNumber::Normal(_) | ChildNumber::Master => false,
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildNumber::Hardened(i) => write!(f, "{i}'"),
            ChildNumber::Normal(i) => write!(f, "{i}"),
            ChildNumber::Master => write!(f, "m"),
        }
    }
}

/// Keyed wire form: exactly one of `hardened`, `normal` or `master`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ChildNumberRepr {
    Hardened(u32),
    Normal(u32),
    Master(MasterMarker),
}

/// Payload of the `master` key: written as null, any value accepted on read.
struct MasterMarker;

impl Serialize for MasterMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

impl<'de> Deserialize<'de> for MasterMarker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| MasterMarker)
    }
}

impl TryFrom<ChildNumberRepr> for ChildNumber {
    type Error = WalletApiError;

    fn try_from(repr: ChildNumberRepr) -> Result<Self, Self::Error> {
        match repr {
            ChildNumberRepr::Hardened(i) | ChildNumberRepr::Normal(i) if i >= HARDENED_OFFSET => {
                Err(WalletApiError::InvalidChildNumber(format!(
                    "index {i} out of range"
                )))
            }
            ChildNumberRepr::Hardened(i) => Ok(ChildNumber::Hardened(i)),
            ChildNumberRepr::Normal(i) => Ok(ChildNumber::Normal(i)),
            ChildNumberRepr::Master(_) => Ok(ChildNumber::Master),
        }
    }
}

impl From<ChildNumber> for ChildNumberRepr {
    fn from(child: ChildNumber) -> Self {
        match child {
            ChildNumber::Hardened(i) => ChildNumberRepr::Hardened(i),
            ChildNumber::Normal(i) => ChildNumberRepr::Normal(i),
            ChildNumber::Master => ChildNumberRepr::Master(MasterMarker),
        }
    }
}
