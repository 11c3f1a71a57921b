use thiserror::Error;

/// Wallet API decoding and arithmetic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletApiError {
    #[error("unknown source tag: {0}")]
    UnknownSource(u8),

    #[error("invalid child number: {0}")]
    InvalidChildNumber(String),

    #[error("amount overflow")]
    AmountOverflow,

    #[error("invalid network: {0}")]
    InvalidNetwork(String),
}
