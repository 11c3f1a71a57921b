use bitcoin::constants::{
    PUBKEY_ADDRESS_PREFIX_MAIN, PUBKEY_ADDRESS_PREFIX_TEST, SCRIPT_ADDRESS_PREFIX_MAIN,
    SCRIPT_ADDRESS_PREFIX_TEST,
};
use bitcoin::Network;

use crate::child_number::ChildNumber;
use crate::error::WalletApiError;
use crate::path::Path;

/// Message-start magic, read as a little-endian `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NetworkMagic {
    Main = 0xD9B4_BEF9,
    Testnet = 0xDAB5_BFFA,
    Testnet3 = 0x0709_110B,
    Namecoin = 0xFEB4_BEF9,
}

impl NetworkMagic {
    pub fn value(self) -> u32 {
        self as u32
    }

    /// Wire bytes as they appear at the start of a P2P message.
    pub fn to_bytes(self) -> [u8; 4] {
        self.value().to_le_bytes()
    }
}

/// Extended key version prefixes (`xpub`/`xprv` style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionBytes {
    pub public: u32,
    pub private: u32,
}

/// A BIP-32 serialization scheme tied to an account layout.
pub trait VersionSerialization: Sized {
    fn version_bytes(&self) -> VersionBytes;

    fn from_version_bytes(bytes: VersionBytes) -> Option<Self>;

    /// Purpose level of the account path.
    fn purpose(&self) -> u32;

    /// BIP-44 coin type: 0 on mainnet, 1 on every test network.
    fn coin_type(&self) -> u32;

    /// `purpose'/coin'/0'/0`
    fn external_path(&self) -> Path {
        Path::from_steps(vec![
            ChildNumber::hardened(self.purpose()),
            ChildNumber::hardened(self.coin_type()),
            ChildNumber::hardened(0),
            ChildNumber::normal(0),
        ])
    }

    /// `purpose'/coin'/1'/0`
    fn change_path(&self) -> Path {
        Path::from_steps(vec![
            ChildNumber::hardened(self.purpose()),
            ChildNumber::hardened(self.coin_type()),
            ChildNumber::hardened(1),
            ChildNumber::normal(0),
        ])
    }
}

/// Legacy P2PKH (`xpub`/`tpub`) serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bip44 {
    Main,
    Testnet,
}

impl Bip44 {
    const MAIN: VersionBytes = VersionBytes {
        public: 0x0488_B21E,
        private: 0x0488_ADE4,
    };
    const TESTNET: VersionBytes = VersionBytes {
        public: 0x0435_87CF,
        private: 0x0435_8394,
    };
}

impl VersionSerialization for Bip44 {
    fn version_bytes(&self) -> VersionBytes {
        match self {
            Bip44::Main => Self::MAIN,
            Bip44::Testnet => Self::TESTNET,
        }
    }

    fn from_version_bytes(bytes: VersionBytes) -> Option<Self> {
        match bytes {
            Self::MAIN => Some(Bip44::Main),
            Self::TESTNET => Some(Bip44::Testnet),
            _ => None,
        }
    }

    fn purpose(&self) -> u32 {
        44
    }

    fn coin_type(&self) -> u32 {
        match self {
            Bip44::Main => 0,
            Bip44::Testnet => 1,
        }
    }
}

/// Native SegWit (`zpub`/`vpub`) serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bip84 {
    Main,
    Testnet,
}

impl Bip84 {
    const MAIN: VersionBytes = VersionBytes {
        public: 0x04B2_4746,
        private: 0x04B2_430C,
    };
    const TESTNET: VersionBytes = VersionBytes {
        public: 0x045F_1CF6,
        private: 0x045F_18BC,
    };
}

impl VersionSerialization for Bip84 {
    fn version_bytes(&self) -> VersionBytes {
        match self {
            Bip84::Main => Self::MAIN,
            Bip84::Testnet => Self::TESTNET,
        }
    }

    fn from_version_bytes(bytes: VersionBytes) -> Option<Self> {
        match bytes {
            Self::MAIN => Some(Bip84::Main),
            Self::TESTNET => Some(Bip84::Testnet),
            _ => None,
        }
    }

    fn purpose(&self) -> u32 {
        84
    }

    fn coin_type(&self) -> u32 {
        match self {
            Bip84::Main => 0,
            Bip84::Testnet => 1,
        }
    }
}

/// Base58 version bytes for legacy addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyAddressPrefix {
    pub pubkey_hash: u8,
    pub script_hash: u8,
}

impl LegacyAddressPrefix {
    pub const MAIN: LegacyAddressPrefix = LegacyAddressPrefix {
        pubkey_hash: PUBKEY_ADDRESS_PREFIX_MAIN,
        script_hash: SCRIPT_ADDRESS_PREFIX_MAIN,
    };
    pub const TESTNET: LegacyAddressPrefix = LegacyAddressPrefix {
        pubkey_hash: PUBKEY_ADDRESS_PREFIX_TEST,
        script_hash: SCRIPT_ADDRESS_PREFIX_TEST,
    };
}

/// Static constants for one supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParameters {
    pub bip44: Bip44,
    pub bip84: Bip84,
    pub magic: NetworkMagic,
    pub legacy_address_prefix: LegacyAddressPrefix,
    /// Bech32 human-readable part for witness addresses.
    pub witness_hrp: &'static str,
}

impl NetworkParameters {
    pub const MAIN: NetworkParameters = NetworkParameters {
        bip44: Bip44::Main,
        bip84: Bip84::Main,
        magic: NetworkMagic::Main,
        legacy_address_prefix: LegacyAddressPrefix::MAIN,
        witness_hrp: "bc",
    };

    pub const TESTNET: NetworkParameters = NetworkParameters {
        bip44: Bip44::Testnet,
        bip84: Bip84::Testnet,
        magic: NetworkMagic::Testnet3,
        legacy_address_prefix: LegacyAddressPrefix::TESTNET,
        witness_hrp: "tb",
    };

    /// Parameter table for a `bitcoin` crate network.
    pub fn for_network(network: Network) -> Result<&'static NetworkParameters, WalletApiError> {
        match network {
            Network::Bitcoin => Ok(&Self::MAIN),
            Network::Testnet => Ok(&Self::TESTNET),
            other => Err(WalletApiError::InvalidNetwork(format!(
                "{other} not supported"
            ))),
        }
    }

    /// Convert to the `bitcoin` crate's `Network` type, keyed on the magic.
    ///
    /// `NetworkMagic::Testnet` is the regtest message start and `Namecoin` is
    /// not a Bitcoin network; neither has a parameter table here.
    pub fn to_bitcoin_network(&self) -> Result<Network, WalletApiError> {
        match self.magic {
            NetworkMagic::Main => Ok(Network::Bitcoin),
            NetworkMagic::Testnet3 => Ok(Network::Testnet),
            NetworkMagic::Testnet | NetworkMagic::Namecoin => Err(WalletApiError::InvalidNetwork(
                format!("magic {:#010x} not supported", self.magic.value()),
            )),
        }
    }
}
