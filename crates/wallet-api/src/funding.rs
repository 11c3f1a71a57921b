use std::fmt;

use bitcoin::OutPoint;
use tracing::debug;

use crate::coin::{Coin, ReceivedState, SpentState};
use crate::error::WalletApiError;
use crate::script::ScriptPubKey;
use crate::source::Source;

/// An output paying into the wallet, as found while scanning a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FundingOutpoint {
    pub outpoint: OutPoint,
    /// Value in satoshis.
    pub amount: u64,
    pub script_pub_key: ScriptPubKey,
}

impl FundingOutpoint {
    pub fn new(outpoint: OutPoint, amount: u64, script_pub_key: ScriptPubKey) -> Self {
        Self {
            outpoint,
            amount,
            script_pub_key,
        }
    }

    pub fn source(&self) -> Result<Source, WalletApiError> {
        self.script_pub_key.source()
    }

    /// An unranked, unspent coin for this output.
    pub fn coin(&self, received_state: ReceivedState) -> Result<Coin, WalletApiError> {
        let source = self.source()?;
        debug!(
            outpoint = %self.outpoint,
            amount = self.amount,
            %source,
            path = self.script_pub_key.index,
            %received_state,
            "funding outpoint to coin"
        );

        Ok(Coin::new(
            self.outpoint,
            self.amount,
            received_state,
            SpentState::Unspent,
            source,
            self.script_pub_key.index,
        ))
    }
}

impl fmt::Display for FundingOutpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FundingOutpoint({} amount {} {})",
            self.outpoint, self.amount, self.script_pub_key
        )
    }
}
