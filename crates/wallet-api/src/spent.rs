use std::fmt;

use bitcoin::{OutPoint, Transaction};
use tracing::debug;

use crate::coin::Spent;
use crate::script::ScriptPubKey;

/// Change indices are stored as single bytes, so outputs from this position
/// on are never reported.
pub const MAX_CHANGE_OUTPUTS: usize = 255;

/// One output of a transaction spending a wallet coin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionOutput {
    /// Pays back to a wallet script.
    Refund(u64, ScriptPubKey),
    /// Pays to a foreign script, kept as raw bytes.
    Outgoing(u64, Vec<u8>),
}

impl TransactionOutput {
    pub fn amount(&self) -> u64 {
        match *self {
            TransactionOutput::Refund(amount, _) | TransactionOutput::Outgoing(amount, _) => amount,
        }
    }

    pub fn opcodes(&self) -> &[u8] {
        match self {
            TransactionOutput::Refund(_, script) => &script.opcodes,
            TransactionOutput::Outgoing(_, opcodes) => opcodes,
        }
    }

    pub fn is_refund(&self) -> bool {
        match self {
            TransactionOutput::Refund(..) => true,
            TransactionOutput::Outgoing(..) => false,
        }
    }
}

/// A wallet outpoint together with the transaction that spent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpentOutpoint {
    pub outpoint: OutPoint,
    pub outputs: Vec<TransactionOutput>,
    pub tx: Transaction,
}

impl SpentOutpoint {
    pub fn new(outpoint: OutPoint, outputs: Vec<TransactionOutput>, tx: Transaction) -> Self {
        Self {
            outpoint,
            outputs,
            tx,
        }
    }

    /// Indices of outputs that refund to a known change scheme.
    ///
    /// Only the first [`MAX_CHANGE_OUTPUTS`] outputs are considered.
    pub fn change_indices(&self) -> Vec<u8> {
        if self.outputs.len() > MAX_CHANGE_OUTPUTS {
            debug!(
                outpoint = %self.outpoint,
                outputs = self.outputs.len(),
                "ignoring outputs beyond change index range"
            );
        }

        self.outputs
            .iter()
            .take(MAX_CHANGE_OUTPUTS)
            .enumerate()
            .filter_map(|(index, output)| {
                let TransactionOutput::Refund(_, script) = output else {
                    return None;
                };
                match script.source() {
                    Ok(source) if source.change() => u8::try_from(index).ok(),
                    Ok(_) => None,
                    Err(err) => {
                        debug!(index, %err, "refund output with unrecognized script tag");
                        None
                    }
                }
            })
            .collect()
    }

    /// The spend record for a coin consumed by this transaction at `height`.
    pub fn spent(&self, height: u32) -> Spent {
        Spent {
            height,
            change_outs: self.change_indices(),
            tx: self.tx.clone(),
        }
    }
}

impl fmt::Display for SpentOutpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpentOutpoint({} txid {}", self.outpoint, self.tx.compute_txid())?;
        if let Some(first) = self.tx.output.first() {
            let opcodes = first.script_pubkey.as_bytes();
            write!(f, " opcodes({})[{}]", opcodes.len(), hex::encode(opcodes))?;
        }
        write!(f, ")")
    }
}
