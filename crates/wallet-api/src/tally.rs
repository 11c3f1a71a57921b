use bitcoin::{ScriptBuf, Sequence, TxIn, Witness};
use tracing::trace;

use crate::coin::Coin;
use crate::error::WalletApiError;

/// An ordered collection of coins under consideration for spending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    coins: Vec<Coin>,
}

impl Tally {
    /// Wrap `coins`, keeping their order.
    pub fn new(coins: Vec<Coin>) -> Self {
        Self { coins }
    }

    /// Coins in their current order.
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Unwrap into the underlying coins.
    pub fn into_coins(self) -> Vec<Coin> {
        self.coins
    }

    /// Number of coins.
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// No coins at all.
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Coins in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.coins.iter()
    }

    /// Coins worth strictly more than `amount`, sorted ascending by amount.
    /// `None` when no coin qualifies.
    pub fn filter_greater(&self, amount: u64) -> Option<Tally> {
        self.filter_by(|coin| coin.amount() > amount)
    }

    /// Coins worth strictly less than `amount`, sorted ascending by amount.
    /// `None` when no coin qualifies.
    pub fn filter_smaller(&self, amount: u64) -> Option<Tally> {
        self.filter_by(|coin| coin.amount() < amount)
    }

    /// Coins that are confirmed and unspent, in their original order.
    pub fn spendable(&self) -> Tally {
        self.coins
            .iter()
            .filter(|coin| coin.is_spendable())
            .cloned()
            .collect()
    }

    fn filter_by(&self, predicate: impl Fn(&Coin) -> bool) -> Option<Tally> {
        let result: Tally = self
            .coins
            .iter()
            .filter(|&coin| predicate(coin))
            .cloned()
            .collect::<Tally>()
            .sorted();

        trace!(
            candidates = self.coins.len(),
            selected = result.len(),
            "filtered tally"
        );

        if result.is_empty() {
            None
        } else {
            Some(result)
        }
    }

    /// Stable ascending sort by amount.
    pub fn sort(&mut self) {
        self.coins.sort_by_key(Coin::amount);
    }

    /// Copy sorted like [`Tally::sort`].
    pub fn sorted(&self) -> Tally {
        let mut copy = self.clone();
        copy.sort();
        copy
    }

    /// Sum of all amounts. Fails instead of wrapping past `u64::MAX`.
    pub fn total(&self) -> Result<u64, WalletApiError> {
        self.coins.iter().try_fold(0u64, |sum, coin| {
            sum.checked_add(coin.amount())
                .ok_or(WalletApiError::AmountOverflow)
        })
    }

    /// Unsigned spend inputs: empty script sig and witness, sequence disabled.
    /// Signing is left to the transaction builder.
    pub fn inputs(&self) -> Vec<TxIn> {
        self.coins
            .iter()
            .map(|coin| TxIn {
                previous_output: coin.outpoint(),
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::default(),
            })
            .collect()
    }
}

impl From<Vec<Coin>> for Tally {
    fn from(coins: Vec<Coin>) -> Self {
        Self { coins }
    }
}

impl FromIterator<Coin> for Tally {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        Self {
            coins: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Tally {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.coins.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tally {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.coins.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::tests::{coin, outpoint, spent};
    use crate::coin::{ReceivedState, SpentState};
    use crate::source::Source;

    fn confirmed(amount: u64) -> Coin {
        coin(amount, ReceivedState::Confirmed(100), SpentState::Unspent)
    }

    fn amounts(tally: &Tally) -> Vec<u64> {
        tally.iter().map(Coin::amount).collect()
    }

    #[test]
    fn filter_greater_keeps_larger_sorted() {
        let tally = Tally::new(vec![confirmed(2_000), confirmed(500), confirmed(1_500)]);
        let selected = tally.filter_greater(1_000).unwrap();
        assert_eq!(amounts(&selected), vec![1_500, 2_000]);
    }

    #[test]
    fn filter_greater_is_strict() {
        let tally = Tally::new(vec![confirmed(1_000), confirmed(1_001)]);
        assert_eq!(amounts(&tally.filter_greater(1_000).unwrap()), vec![1_001]);
    }

    #[test]
    fn filter_greater_without_match_is_none() {
        let tally = Tally::new(vec![confirmed(500)]);
        assert!(tally.filter_greater(1_000).is_none());
        assert!(Tally::default().filter_greater(0).is_none());
    }

    #[test]
    fn filter_smaller_keeps_lesser_sorted() {
        let tally = Tally::new(vec![confirmed(900), confirmed(5_000), confirmed(100)]);
        let selected = tally.filter_smaller(1_000).unwrap();
        assert_eq!(amounts(&selected), vec![100, 900]);
        assert!(tally.filter_smaller(100).is_none());
    }

    #[test]
    fn sort_is_stable() {
        let first = Coin::new(
            outpoint(1, 0),
            300,
            ReceivedState::Confirmed(1),
            SpentState::Unspent,
            Source::Segwit,
            0,
        );
        let second = Coin::new(
            outpoint(2, 0),
            300,
            ReceivedState::Confirmed(1),
            SpentState::Unspent,
            Source::Segwit,
            1,
        );
        let mut tally = Tally::new(vec![confirmed(900), first.clone(), second.clone()]);
        tally.sort();
        assert_eq!(tally.coins()[0], first);
        assert_eq!(tally.coins()[1], second);
        assert_eq!(tally.coins()[2].amount(), 900);
    }

    #[test]
    fn sorted_leaves_original_untouched() {
        let tally = Tally::new(vec![confirmed(3), confirmed(1), confirmed(2)]);
        assert_eq!(amounts(&tally.sorted()), vec![1, 2, 3]);
        assert_eq!(amounts(&tally), vec![3, 1, 2]);
    }

    #[test]
    fn total_sums_amounts() {
        let tally = Tally::new(vec![confirmed(100), confirmed(200), confirmed(300)]);
        assert_eq!(tally.total(), Ok(600));
        assert_eq!(Tally::default().total(), Ok(0));
    }

    #[test]
    fn total_reports_overflow() {
        let tally = Tally::new(vec![confirmed(u64::MAX), confirmed(1)]);
        assert_eq!(tally.total(), Err(WalletApiError::AmountOverflow));
    }

    #[test]
    fn spendable_subset() {
        let tally = Tally::new(vec![
            confirmed(10),
            coin(20, ReceivedState::Unconfirmed(101), SpentState::Unspent),
            coin(30, ReceivedState::Confirmed(99), SpentState::Pending(spent(101))),
            confirmed(40),
        ]);
        assert_eq!(amounts(&tally.spendable()), vec![10, 40]);
    }

    #[test]
    fn inputs_are_unsigned_placeholders() {
        let a = Coin::new(
            outpoint(7, 1),
            1,
            ReceivedState::Confirmed(1),
            SpentState::Unspent,
            Source::Taproot,
            0,
        );
        let inputs = Tally::new(vec![a.clone()]).inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].previous_output, a.outpoint());
        assert!(inputs[0].script_sig.is_empty());
        assert!(inputs[0].witness.is_empty());
        assert_eq!(inputs[0].sequence, Sequence::MAX);
        assert!(!inputs[0].sequence.is_relative_lock_time());
        assert!(!inputs[0].sequence.is_rbf());
    }
}
