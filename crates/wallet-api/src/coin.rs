use std::cmp::Ordering;
use std::fmt;

use bitcoin::{OutPoint, Transaction};

use crate::source::Source;

/// Confirmation status of a received output. Every state carries the block
/// height it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceivedState {
    Confirmed(u32),
    Unconfirmed(u32),
    Rollback(u32),
}

impl ReceivedState {
    /// Block height carried by the state.
    pub fn height(&self) -> u32 {
        match *self {
            ReceivedState::Confirmed(height)
            | ReceivedState::Unconfirmed(height)
            | ReceivedState::Rollback(height) => height,
        }
    }

    /// Seen in the mempool but not yet in a block.
    pub fn is_pending(&self) -> bool {
        match self {
            ReceivedState::Unconfirmed(_) => true,
            ReceivedState::Confirmed(_) | ReceivedState::Rollback(_) => false,
        }
    }

    /// Confirmed in a block.
    pub fn is_received(&self) -> bool {
        match self {
            ReceivedState::Confirmed(_) => true,
            ReceivedState::Unconfirmed(_) | ReceivedState::Rollback(_) => false,
        }
    }
}

impl fmt::Display for ReceivedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceivedState::Confirmed(height) => write!(f, "confirmed({height})"),
            ReceivedState::Unconfirmed(height) => write!(f, "unconfirmed({height})"),
            ReceivedState::Rollback(height) => write!(f, "rollback({height})"),
        }
    }
}

/// A transaction observed spending a coin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spent {
    pub height: u32,
    /// Output indices of `tx` that pay back to a wallet change scheme.
    pub change_outs: Vec<u8>,
    pub tx: Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpentState {
    Unspent,
    Pending(Spent),
    Spent(Spent),
}

impl SpentState {
    /// Not yet irrevocably spent.
    pub fn is_available(&self) -> bool {
        match self {
            SpentState::Unspent | SpentState::Pending(_) => true,
            SpentState::Spent(_) => false,
        }
    }

    /// A spending transaction is known but unconfirmed.
    pub fn is_pending(&self) -> bool {
        match self {
            SpentState::Pending(_) => true,
            SpentState::Unspent | SpentState::Spent(_) => false,
        }
    }

    /// No spending transaction observed.
    pub fn is_unspent(&self) -> bool {
        match self {
            SpentState::Unspent => true,
            SpentState::Pending(_) | SpentState::Spent(_) => false,
        }
    }
}

impl fmt::Display for SpentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpentState::Unspent => write!(f, "unspent"),
            SpentState::Pending(spent) => write!(f, "pending({})", spent.height),
            SpentState::Spent(spent) => write!(f, "spent({})", spent.height),
        }
    }
}

/// Store identity of a coin. `Unranked` until the owning store assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoinId {
    #[default]
    Unranked,
    Ranked(u64),
}

impl CoinId {
    /// Store id, or `None` while unranked.
    pub fn value(&self) -> Option<u64> {
        match *self {
            CoinId::Unranked => None,
            CoinId::Ranked(id) => Some(id),
        }
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinId::Unranked => write!(f, "unranked"),
            CoinId::Ranked(id) => write!(f, "{id}"),
        }
    }
}

/// One wallet UTXO and its lifecycle.
///
/// Coins are values: confirmation, rollback, spend observation and ranking
/// each produce a new `Coin` rather than mutating an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coin {
    outpoint: OutPoint,
    amount: u64,
    received_state: ReceivedState,
    spent_state: SpentState,
    source: Source,
    path: u32,
    id: CoinId,
}

impl Coin {
    /// A fresh, unranked coin.
    pub fn new(
        outpoint: OutPoint,
        amount: u64,
        received_state: ReceivedState,
        spent_state: SpentState,
        source: Source,
        path: u32,
    ) -> Self {
        Self {
            outpoint,
            amount,
            received_state,
            spent_state,
            source,
            path,
            id: CoinId::Unranked,
        }
    }

    /// The funding output this coin represents.
    pub fn outpoint(&self) -> OutPoint {
        self.outpoint
    }

    /// Value in satoshis.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Confirmation status of the funding output.
    pub fn received_state(&self) -> ReceivedState {
        self.received_state
    }

    /// Spend status, with the spending transaction once one is seen.
    pub fn spent_state(&self) -> &SpentState {
        &self.spent_state
    }

    /// Derivation scheme that owns the receiving script.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Child index within the source scheme's account.
    pub fn path(&self) -> u32 {
        self.path
    }

    /// Store identity.
    pub fn id(&self) -> CoinId {
        self.id
    }

    /// Copy carrying store id `id`. Re-ranking replaces any previous id.
    pub fn rank(&self, id: u64) -> Coin {
        Coin {
            id: CoinId::Ranked(id),
            ..self.clone()
        }
    }

    /// Copy with the store id cleared.
    pub fn unranked(&self) -> Coin {
        Coin {
            id: CoinId::Unranked,
            ..self.clone()
        }
    }

    /// Copy with a new confirmation status; identity is kept.
    pub fn with_received_state(&self, received_state: ReceivedState) -> Coin {
        Coin {
            received_state,
            ..self.clone()
        }
    }

    /// Copy with a new spend status; identity is kept.
    pub fn with_spent_state(&self, spent_state: SpentState) -> Coin {
        Coin {
            spent_state,
            ..self.clone()
        }
    }

    /// Only a confirmed, unspent coin may fund a new transaction.
    pub fn is_spendable(&self) -> bool {
        match (&self.received_state, &self.spent_state) {
            (ReceivedState::Confirmed(_), SpentState::Unspent) => true,
            (ReceivedState::Confirmed(_), SpentState::Pending(_))
            | (ReceivedState::Confirmed(_), SpentState::Spent(_))
            | (ReceivedState::Unconfirmed(_), SpentState::Unspent)
            | (ReceivedState::Unconfirmed(_), SpentState::Pending(_))
            | (ReceivedState::Unconfirmed(_), SpentState::Spent(_))
            | (ReceivedState::Rollback(_), SpentState::Unspent)
            | (ReceivedState::Rollback(_), SpentState::Pending(_))
            | (ReceivedState::Rollback(_), SpentState::Spent(_)) => false,
        }
    }

    /// Height of the received state, whatever its kind.
    pub fn received_height(&self) -> u32 {
        self.received_state.height()
    }

    /// Orders coins by received height alone; the kind of received state is
    /// ignored, so `Confirmed(100)` and `Rollback(100)` compare equal.
    pub fn cmp_received_height(&self, other: &Coin) -> Ordering {
        self.received_height().cmp(&other.received_height())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coin(id: {}, outpoint: {}, amount: {}, received: {}, spent: {}, source: {:?}, path: {})",
            self.id,
            self.outpoint,
            self.amount,
            self.received_state,
            self.spent_state,
            self.source,
            self.path
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bitcoin::absolute::LockTime;
    use bitcoin::hashes::Hash;
    use bitcoin::transaction::Version;
    use bitcoin::Txid;

    pub(crate) fn outpoint(seed: u8, vout: u32) -> OutPoint {
        OutPoint::new(Txid::from_byte_array([seed; 32]), vout)
    }

    pub(crate) fn empty_tx() -> Transaction {
        Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: Vec::new(),
            output: Vec::new(),
        }
    }

    pub(crate) fn spent(height: u32) -> Spent {
        Spent {
            height,
            change_outs: vec![1],
            tx: empty_tx(),
        }
    }

    pub(crate) fn coin(
        amount: u64,
        received_state: ReceivedState,
        spent_state: SpentState,
    ) -> Coin {
        Coin::new(outpoint(1, 0), amount, received_state, spent_state, Source::Segwit, 0)
    }

    #[test]
    fn spendable_truth_table() {
        let received = [
            ReceivedState::Confirmed(100),
            ReceivedState::Unconfirmed(100),
            ReceivedState::Rollback(100),
        ];
        let spent_states = [
            SpentState::Unspent,
            SpentState::Pending(spent(101)),
            SpentState::Spent(spent(101)),
        ];

        let mut spendable = 0;
        for r in received {
            for s in &spent_states {
                let c = coin(1_000, r, s.clone());
                let expected =
                    matches!((r, s), (ReceivedState::Confirmed(_), SpentState::Unspent));
                assert_eq!(c.is_spendable(), expected, "{r} / {s}");
                if c.is_spendable() {
                    spendable += 1;
                }
            }
        }
        assert_eq!(spendable, 1);
    }

    #[test]
    fn new_coin_is_unranked() {
        let c = coin(1, ReceivedState::Confirmed(1), SpentState::Unspent);
        assert_eq!(c.id(), CoinId::Unranked);
        assert_eq!(c.id().value(), None);
    }

    #[test]
    fn rank_and_unrank_return_new_values() {
        let fresh = coin(1, ReceivedState::Confirmed(1), SpentState::Unspent);
        let ranked = fresh.rank(42);
        assert_eq!(ranked.id(), CoinId::Ranked(42));
        assert_eq!(fresh.id(), CoinId::Unranked);

        let reverted = ranked.unranked();
        assert_eq!(reverted, fresh);
        assert_eq!(ranked.id().value(), Some(42));
    }

    #[test]
    fn ranking_keeps_other_fields() {
        let fresh = coin(7_500, ReceivedState::Unconfirmed(9), SpentState::Unspent);
        let ranked = fresh.rank(3);
        assert_eq!(ranked.amount(), 7_500);
        assert_eq!(ranked.outpoint(), fresh.outpoint());
        assert_eq!(ranked.received_state(), ReceivedState::Unconfirmed(9));
        assert_eq!(ranked.source(), Source::Segwit);
    }

    #[test]
    fn state_transitions_build_new_coins() {
        let pending = coin(5, ReceivedState::Unconfirmed(10), SpentState::Unspent).rank(1);
        let confirmed = pending.with_received_state(ReceivedState::Confirmed(10));
        assert!(!pending.is_spendable());
        assert!(confirmed.is_spendable());
        assert_eq!(confirmed.id(), CoinId::Ranked(1));

        let spending = confirmed.with_spent_state(SpentState::Pending(spent(11)));
        assert!(!spending.is_spendable());
        assert!(confirmed.is_spendable());
    }

    #[test]
    fn received_height_ignores_state_kind() {
        let heights: Vec<u32> = [
            ReceivedState::Confirmed(5),
            ReceivedState::Unconfirmed(6),
            ReceivedState::Rollback(7),
        ]
        .into_iter()
        .map(|state| coin(1, state, SpentState::Unspent).received_height())
        .collect();
        assert_eq!(heights, vec![5, 6, 7]);
    }

    #[test]
    fn ordering_compares_heights_only() {
        let confirmed = coin(1, ReceivedState::Confirmed(100), SpentState::Unspent);
        let rollback = coin(1, ReceivedState::Rollback(100), SpentState::Unspent);
        let later = coin(1, ReceivedState::Unconfirmed(101), SpentState::Unspent);

        assert_eq!(confirmed.cmp_received_height(&rollback), Ordering::Equal);
        assert_eq!(confirmed.cmp_received_height(&later), Ordering::Less);
        assert_eq!(later.cmp_received_height(&rollback), Ordering::Greater);
    }

    #[test]
    fn received_state_predicates() {
        assert!(ReceivedState::Unconfirmed(1).is_pending());
        assert!(!ReceivedState::Rollback(1).is_pending());
        assert!(ReceivedState::Confirmed(1).is_received());
        assert!(!ReceivedState::Rollback(1).is_received());
    }

    #[test]
    fn spent_state_predicates() {
        assert!(SpentState::Unspent.is_available());
        assert!(SpentState::Pending(spent(1)).is_available());
        assert!(!SpentState::Spent(spent(1)).is_available());
        assert!(SpentState::Pending(spent(1)).is_pending());
        assert!(SpentState::Unspent.is_unspent());
        assert!(!SpentState::Spent(spent(1)).is_unspent());
    }

    #[test]
    fn display() {
        let c = coin(2_500, ReceivedState::Confirmed(800_000), SpentState::Unspent).rank(9);
        let shown = c.to_string();
        assert!(shown.starts_with("Coin(id: 9"));
        assert!(shown.contains("received: confirmed(800000)"));
        assert!(shown.contains("spent: unspent"));
    }
}
