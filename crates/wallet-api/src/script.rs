use std::fmt;

use bitcoin::ScriptBuf;

use crate::error::WalletApiError;
use crate::source::Source;

/// A wallet-owned locking script with the derivation metadata that produced it.
///
/// `tag` is the persistence tag of the [`Source`] scheme and `index` the child
/// index within that scheme's account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptPubKey {
    pub tag: u8,
    pub index: u32,
    pub opcodes: Vec<u8>,
}

impl ScriptPubKey {
    pub fn new(source: Source, index: u32, opcodes: Vec<u8>) -> Self {
        Self {
            tag: source.tag(),
            index,
            opcodes,
        }
    }

    /// The derivation scheme named by `tag`.
    pub fn source(&self) -> Result<Source, WalletApiError> {
        Source::try_from(self.tag)
    }

    pub fn script(&self) -> ScriptBuf {
        ScriptBuf::from_bytes(self.opcodes.clone())
    }
}

impl fmt::Display for ScriptPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tag {} index {} opcodes({})[{}]",
            self.tag,
            self.index,
            self.opcodes.len(),
            hex::encode(&self.opcodes)
        )
    }
}
