use crate::{ledger::Ledger, Transaction};
use std::cmp::Ordering;

/// Priority order for the pending pool: higher incentive first, then
/// receiver id ascending (byte order). Remaining ties keep input order.
pub fn priority(a: &Transaction, b: &Transaction) -> Ordering {
    b.incentive
        .cmp(&a.incentive)
        .then_with(|| a.to.as_bytes().cmp(b.to.as_bytes()))
}

/// Returns a sorted copy of the pool; `sort_by` is stable.
pub fn order(pool: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = pool.to_vec();
    sorted.sort_by(priority);
    sorted
}

/// Orders the pool and applies each transfer once against `ledger`.
/// Transactions the sender cannot cover at that point are dropped for good.
pub fn select_applied(pool: &[Transaction], ledger: &mut Ledger) -> Vec<Transaction> {
    order(pool)
        .into_iter()
        .filter(|t| ledger.try_transfer(&t.from, &t.to, t.amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_incentive_then_receiver() {
        let pool = vec![
            Transaction::new("A", "Z", 1, 1),
            Transaction::new("A", "C", 1, 5),
            Transaction::new("A", "B", 1, 5),
            Transaction::new("A", "a", 1, 1),
        ];
        let sorted = order(&pool);
        let keys: Vec<(i64, &str)> = sorted.iter().map(|t| (t.incentive, t.to.as_str())).collect();
        assert_eq!(keys, vec![(5, "B"), (5, "C"), (1, "Z"), (1, "a")]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let pool = vec![
            Transaction::new("first", "X", 1, 2),
            Transaction::new("second", "X", 2, 2),
            Transaction::new("third", "X", 3, 2),
        ];
        let senders: Vec<String> = order(&pool).into_iter().map(|t| t.from).collect();
        assert_eq!(senders, vec!["first", "second", "third"]);
    }

    #[test]
    fn negative_incentive_sorts_last() {
        let pool = vec![Transaction::new("A", "B", 1, -3), Transaction::new("A", "B", 1, 0)];
        assert_eq!(order(&pool)[0].incentive, 0);
    }

    #[test]
    fn insufficient_funds_dropped_without_retry() {
        let mut ledger = Ledger::from_accounts([("A", 100)]);
        let pool = vec![
            // Evaluated first, A only has 100 at that point.
            Transaction::new("A", "C", 200, 5),
            Transaction::new("B", "A", 150, 4),
            Transaction::new("A", "B", 50, 1),
        ];
        let applied = select_applied(&pool, &mut ledger);
        assert_eq!(applied, vec![Transaction::new("A", "B", 50, 1)]);
        assert_eq!(ledger.balance("A"), 50);
        assert_eq!(ledger.balance("B"), 50);
        assert_eq!(ledger.balance("C"), 0);
    }

    #[test]
    fn earlier_transfer_funds_later_one() {
        let mut ledger = Ledger::from_accounts([("A", 100)]);
        let pool = vec![
            Transaction::new("B", "C", 30, 1),
            Transaction::new("A", "B", 40, 9),
        ];
        let applied = select_applied(&pool, &mut ledger);
        assert_eq!(applied.len(), 2);
        assert_eq!(ledger.balance("C"), 30);
        assert_eq!(ledger.balance("B"), 10);
    }
}
