//! Native-currency denominations.

use ethers::types::U256;

/// Wei per ether (10^18).
pub const E18: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Gas price attached to funding transfers (10^13 wei).
pub const DEFAULT_GAS_PRICE: U256 = U256([10_000_000_000_000, 0, 0, 0]);

/// Converts whole ether to wei. Cannot overflow: `u64::MAX * 10^18 < 2^128`.
pub fn ether_to_wei(ether: u64) -> U256 {
    U256::from(ether) * E18
}
