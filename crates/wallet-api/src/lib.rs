//! Wallet API core types for a Bitcoin HD wallet.
//!
//! Classifies keys and outputs by derivation path and address scheme, and
//! tracks the confirmation and spend lifecycle of wallet coins for coin
//! selection. Key derivation, signing and chain synchronization live
//! elsewhere; everything here is an immutable value.

pub mod child_number;
pub mod coin;
pub mod error;
pub mod funding;
pub mod network;
pub mod path;
pub mod script;
pub mod source;
pub mod spent;
pub mod tally;
pub mod years;

pub use child_number::ChildNumber;
pub use coin::{Coin, CoinId, ReceivedState, Spent, SpentState};
pub use error::WalletApiError;
pub use funding::FundingOutpoint;
pub use network::{Bip44, Bip84, NetworkMagic, NetworkParameters, VersionSerialization};
pub use path::Path;
pub use script::ScriptPubKey;
pub use source::Source;
pub use spent::{SpentOutpoint, TransactionOutput};
pub use tally::Tally;
pub use years::{BlockChainYear, SelectableYears};
