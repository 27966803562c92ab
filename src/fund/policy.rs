//! Choice of funding account among the node's accounts.

use std::str::FromStr;

use ethers::types::U256;

use crate::crypto::Address;

/// Which qualifying account pays for a funding transfer.
///
/// An account qualifies when its balance is strictly greater than the
/// required threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// The last qualifying account in the order the node lists them
    #[default]
    Last,
    /// The first qualifying account
    First,
    /// The qualifying account with the largest balance (earliest on ties)
    Richest,
}

impl SelectionPolicy {
    /// Picks an account from `(account, balance)` pairs in node order.
    pub fn select(
        self,
        balances: &[(Address, U256)],
        threshold: U256,
    ) -> Option<(Address, U256)> {
        let mut qualifying = balances
            .iter()
            .copied()
            .filter(|(_, balance)| *balance > threshold);

        match self {
            SelectionPolicy::Last => qualifying.last(),
            SelectionPolicy::First => qualifying.next(),
            SelectionPolicy::Richest => qualifying.fold(None, |best, candidate| match best {
                Some((_, best_balance)) if best_balance >= candidate.1 => best,
                _ => Some(candidate),
            }),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last" => Ok(SelectionPolicy::Last),
            "first" => Ok(SelectionPolicy::First),
            "richest" | "max" => Ok(SelectionPolicy::Richest),
            _ => Err(format!("Unknown selection policy: {}", s)),
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::Last => write!(f, "last"),
            SelectionPolicy::First => write!(f, "first"),
            SelectionPolicy::Richest => write!(f, "richest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    fn balances() -> Vec<(Address, U256)> {
        vec![
            (account(1), U256::from(5)),
            (account(2), U256::from(50)),
            (account(3), U256::from(10)),
            (account(4), U256::from(20)),
            (account(5), U256::from(50)),
        ]
    }

    #[test]
    fn test_last_wins() {
        let picked = SelectionPolicy::Last.select(&balances(), U256::from(10));
        assert_eq!(picked, Some((account(5), U256::from(50))));
    }

    #[test]
    fn test_first_wins() {
        let picked = SelectionPolicy::First.select(&balances(), U256::from(10));
        assert_eq!(picked, Some((account(2), U256::from(50))));
    }

    #[test]
    fn test_richest_prefers_earliest_on_tie() {
        let picked = SelectionPolicy::Richest.select(&balances(), U256::from(10));
        assert_eq!(picked, Some((account(2), U256::from(50))));
    }

    #[test]
    fn test_threshold_is_strict() {
        let only = vec![(account(1), U256::from(10))];
        for policy in [
            SelectionPolicy::Last,
            SelectionPolicy::First,
            SelectionPolicy::Richest,
        ] {
            assert_eq!(policy.select(&only, U256::from(10)), None);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("LAST".parse::<SelectionPolicy>(), Ok(SelectionPolicy::Last));
        assert_eq!("max".parse::<SelectionPolicy>(), Ok(SelectionPolicy::Richest));
        assert!("random".parse::<SelectionPolicy>().is_err());
    }
}
