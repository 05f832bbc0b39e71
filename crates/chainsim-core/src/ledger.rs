use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Account balances for a single run. Unknown accounts read as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    balances: BTreeMap<String, i64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of an account overwrite earlier ones.
    pub fn from_accounts<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let balances = accounts
            .into_iter()
            .map(|(id, balance)| (id.into(), balance))
            .collect();
        Self { balances }
    }

    pub fn balance(&self, account: &str) -> i64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Moves `amount` from `from` to `to` if `from` can cover it.
    /// Returns false and leaves every balance untouched otherwise.
    pub fn try_transfer(&mut self, from: &str, to: &str, amount: i64) -> bool {
        if amount < 0 {
            return false;
        }
        let from_balance = self.balance(from);
        if from_balance < amount {
            debug!(from, to, amount, from_balance, "transfer rejected: insufficient balance");
            return false;
        }
        if from == to {
            // Net effect is zero; make sure the entry exists like any receiver.
            self.balances.entry(to.to_string()).or_insert(0);
            return true;
        }
        let Some(to_balance) = self.balance(to).checked_add(amount) else {
            debug!(from, to, amount, "transfer rejected: receiver balance overflow");
            return false;
        };
        self.balances.insert(from.to_string(), from_balance - amount);
        self.balances.insert(to.to_string(), to_balance);
        true
    }

    /// Unconditional credit, used for block rewards. Saturates at `i64::MAX`.
    pub fn credit(&mut self, account: &str, amount: i64) {
        let entry = self.balances.entry(account.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Balances ordered by account id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.balances.iter().map(|(id, bal)| (id.as_str(), *bal))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_account_reads_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance("nobody"), 0);
    }

    #[test]
    fn transfer_moves_funds_and_creates_receiver() {
        let mut ledger = Ledger::from_accounts([("A", 100)]);
        assert!(ledger.try_transfer("A", "B", 50));
        assert_eq!(ledger.balance("A"), 50);
        assert_eq!(ledger.balance("B"), 50);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn insufficient_balance_has_no_side_effect() {
        let mut ledger = Ledger::from_accounts([("A", 100)]);
        let before = ledger.clone();
        assert!(!ledger.try_transfer("A", "C", 200));
        assert_eq!(ledger, before);
        assert_eq!(ledger.balance("C"), 0);
    }

    #[test]
    fn exact_balance_is_enough() {
        let mut ledger = Ledger::from_accounts([("A", 10)]);
        assert!(ledger.try_transfer("A", "B", 10));
        assert_eq!(ledger.balance("A"), 0);
    }

    #[test]
    fn unknown_sender_can_send_zero() {
        let mut ledger = Ledger::new();
        assert!(ledger.try_transfer("ghost", "B", 0));
        assert!(!ledger.try_transfer("ghost", "B", 1));
    }

    #[test]
    fn negative_amount_rejected() {
        let mut ledger = Ledger::from_accounts([("A", 10)]);
        assert!(!ledger.try_transfer("A", "B", -5));
        assert_eq!(ledger.balance("A"), 10);
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut ledger = Ledger::from_accounts([("A", 10)]);
        assert!(ledger.try_transfer("A", "A", 7));
        assert_eq!(ledger.balance("A"), 10);
        assert!(!ledger.try_transfer("A", "A", 11));
    }

    #[test]
    fn receiver_overflow_rejected() {
        let mut ledger = Ledger::from_accounts([("A", 10), ("B", i64::MAX)]);
        assert!(!ledger.try_transfer("A", "B", 1));
        assert_eq!(ledger.balance("A"), 10);
    }

    #[test]
    fn credit_is_unconditional() {
        let mut ledger = Ledger::new();
        ledger.credit("MINER", 25);
        ledger.credit("MINER", 25);
        assert_eq!(ledger.balance("MINER"), 50);
    }

    #[test]
    fn duplicate_accounts_last_wins() {
        let ledger = Ledger::from_accounts([("A", 1), ("A", 9)]);
        assert_eq!(ledger.balance("A"), 9);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn iter_is_sorted_by_id() {
        let ledger = Ledger::from_accounts([("b", 2), ("A", 1), ("a", 3)]);
        let ids: Vec<&str> = ledger.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["A", "a", "b"]);
    }
}
