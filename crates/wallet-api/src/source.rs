use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WalletApiError;

/// Address derivation scheme that produced a key or output.
///
/// The discriminant is the persistence tag and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Source {
    Legacy0 = 0,
    Legacy0Change = 1,
    Legacy44 = 2,
    Legacy44Change = 3,
    LegacySegwit = 4,
    LegacySegwitChange = 5,
    Segwit0 = 6,
    Segwit0Change = 7,
    Segwit = 8,
    SegwitChange = 9,
    TaprootChange = 10,
    Taproot = 11,
}

impl Source {
    /// Every variant in tag order.
    pub const ALL: [Source; 12] = [
        Source::Legacy0,
        Source::Legacy0Change,
        Source::Legacy44,
        Source::Legacy44Change,
        Source::LegacySegwit,
        Source::LegacySegwitChange,
        Source::Segwit0,
        Source::Segwit0Change,
        Source::Segwit,
        Source::SegwitChange,
        Source::TaprootChange,
        Source::Taproot,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether this scheme derives change addresses.
    pub fn change(self) -> bool {
        match self {
            Source::Legacy0Change
            | Source::Legacy44Change
            | Source::LegacySegwitChange
            | Source::Segwit0Change
            | Source::SegwitChange
            | Source::TaprootChange => true,
            Source::Legacy0
            | Source::Legacy44
            | Source::LegacySegwit
            | Source::Segwit0
            | Source::Segwit
            | Source::Taproot => false,
        }
    }

    /// Whether outputs of this scheme are spent with witness data.
    pub fn witness(self) -> bool {
        match self {
            Source::Legacy0 | Source::Legacy0Change | Source::Legacy44 | Source::Legacy44Change => {
                false
            }
            Source::LegacySegwit
            | Source::LegacySegwitChange
            | Source::Segwit0
            | Source::Segwit0Change
            | Source::Segwit
            | Source::SegwitChange
            | Source::Taproot
            | Source::TaprootChange => true,
        }
    }

    /// Whether keys of this scheme serialize as x-only points.
    pub fn x_point(self) -> bool {
        match self {
            Source::Legacy0
            | Source::Legacy0Change
            | Source::Legacy44
            | Source::Legacy44Change
            | Source::LegacySegwit
            | Source::LegacySegwitChange
            | Source::Segwit0
            | Source::Segwit0Change
            | Source::Segwit
            | Source::SegwitChange => false,
            Source::Taproot | Source::TaprootChange => true,
        }
    }

    /// `self` followed by any scheme that shares its derivation path under a
    /// different address encoding.
    pub fn mirror(self) -> Vec<Source> {
        let counterpart = match self {
            Source::Legacy0 => Some(Source::Segwit0),
            Source::Legacy0Change => Some(Source::Segwit0Change),
            Source::Segwit0 => Some(Source::Legacy0),
            Source::Segwit0Change => Some(Source::Legacy0Change),
            Source::Legacy44
            | Source::Legacy44Change
            | Source::LegacySegwit
            | Source::LegacySegwitChange
            | Source::Segwit
            | Source::SegwitChange
            | Source::Taproot
            | Source::TaprootChange => None,
        };

        std::iter::once(self).chain(counterpart).collect()
    }

    /// Canonical schemes with one entry per derivation path: the mirrored
    /// `Segwit0` pair is left out.
    pub fn unique_cases() -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| match source {
                Source::Legacy0
                | Source::Legacy0Change
                | Source::Legacy44
                | Source::Legacy44Change
                | Source::LegacySegwit
                | Source::LegacySegwitChange
                | Source::Segwit
                | Source::SegwitChange
                | Source::Taproot
                | Source::TaprootChange => true,
                Source::Segwit0 | Source::Segwit0Change => false,
            })
            .collect()
    }
}

impl TryFrom<u8> for Source {
    type Error = WalletApiError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Source::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(WalletApiError::UnknownSource(tag))
    }
}

impl From<Source> for u8 {
    fn from(source: Source) -> Self {
        source.tag()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Legacy0 => "Legacy 0 repository",
            Source::Legacy0Change => "Legacy 0 Change repository",
            Source::Legacy44 => "Legacy 44 repository",
            Source::Legacy44Change => "Legacy 44 Change repository",
            Source::LegacySegwit => "Legacy Segwit repository",
            Source::LegacySegwitChange => "Legacy Segwit Change repository",
            Source::Segwit0 => "Segwit 0 repository",
            Source::Segwit0Change => "Segwit 0 Change repository",
            Source::Segwit => "Segwit repository",
            Source::SegwitChange => "Segwit Change repository",
            Source::Taproot => "Taproot repository",
            Source::TaprootChange => "Taproot Change repository",
        };
        f.write_str(name)
    }
}
