//! Command-line configuration for the `eth-testkit` binary.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use ethers::types::U256;

use crate::crypto::Address;
use crate::fund::{Confirmation, FundOptions, SelectionPolicy};
use crate::units::DEFAULT_GAS_PRICE;

/// Ethereum test-account toolkit
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate fresh key pairs
    Gen {
        /// Number of key pairs to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Print records as JSON lines
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Fund an address from a node-managed account
    Fund(FundArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FundArgs {
    /// JSON-RPC endpoint of the node
    #[arg(short, long, default_value = "http://127.0.0.1:8545")]
    pub rpc: String,

    /// Destination address
    #[arg(short, long)]
    pub to: String,

    /// Amount in whole ether
    #[arg(short, long)]
    pub amount: u64,

    /// Funding account selection: last, first, or richest
    #[arg(short, long, default_value = "last")]
    pub policy: SelectionPolicy,

    /// Gas price in wei (default: 10^13)
    #[arg(long)]
    pub gas_price: Option<u64>,

    /// Wait up to this many seconds for the transfer to be mined
    #[arg(short, long)]
    pub wait: Option<u64>,

    /// Receipt polling interval in milliseconds
    #[arg(long, default_value = "500")]
    pub poll_ms: u64,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.command {
            Command::Gen { count, .. } => {
                if *count == 0 {
                    return Err(ConfigError::InvalidArgument(
                        "Count must be at least 1".into(),
                    ));
                }
                Ok(())
            }
            Command::Fund(args) => args.validate(),
        }
    }
}

impl FundArgs {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc.starts_with("http://") || self.rpc.starts_with("https://")) {
            return Err(ConfigError::InvalidArgument(format!(
                "RPC endpoint must be an http(s) URL, got '{}'",
                self.rpc
            )));
        }

        if self.amount == 0 {
            return Err(ConfigError::InvalidArgument(
                "Amount must be positive".into(),
            ));
        }

        if self.wait.is_some() && self.poll_ms == 0 {
            return Err(ConfigError::InvalidArgument(
                "Poll interval must be positive".into(),
            ));
        }

        self.destination().map(|_| ())
    }

    /// Returns the parsed destination address
    pub fn destination(&self) -> Result<Address, ConfigError> {
        self.to
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.to.clone()))
    }

    /// Returns the dispenser options described by these arguments
    pub fn options(&self) -> FundOptions {
        let confirmation = match self.wait {
            Some(secs) => Confirmation::Receipt {
                timeout: Duration::from_secs(secs),
                poll_interval: Duration::from_millis(self.poll_ms),
            },
            None => Confirmation::None,
        };

        FundOptions {
            policy: self.policy,
            gas_price: self.gas_price.map(U256::from).unwrap_or(DEFAULT_GAS_PRICE),
            confirmation,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEST: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("eth-testkit").chain(args.iter().copied()))
            .unwrap()
    }

    fn fund_args(config: &Config) -> &FundArgs {
        match &config.command {
            Command::Fund(args) => args,
            other => panic!("expected fund, got {:?}", other),
        }
    }

    #[test]
    fn test_fund_defaults() {
        let config = parse(&["fund", "--to", DEST, "--amount", "10"]);
        assert!(config.validate().is_ok());

        let args = fund_args(&config);
        assert_eq!(args.rpc, "http://127.0.0.1:8545");
        assert_eq!(args.options(), FundOptions::default());
        assert_eq!(args.destination().unwrap().to_checksum(), DEST);
    }

    #[test]
    fn test_fund_options() {
        let config = parse(&[
            "fund", "-t", DEST, "-a", "1", "-p", "richest", "--gas-price", "7", "-w", "30",
            "--poll-ms", "100",
        ]);
        let options = fund_args(&config).options();
        assert_eq!(options.policy, SelectionPolicy::Richest);
        assert_eq!(options.gas_price, U256::from(7));
        assert_eq!(
            options.confirmation,
            Confirmation::Receipt {
                timeout: Duration::from_secs(30),
                poll_interval: Duration::from_millis(100),
            }
        );
    }

    #[test]
    fn test_invalid_fund_args() {
        let config = parse(&["fund", "--to", "0x1234", "--amount", "1"]);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAddress(_))));

        let config = parse(&["fund", "--to", DEST, "--amount", "0"]);
        assert!(config.validate().is_err());

        let config = parse(&["fund", "-r", "ws://localhost:8546", "--to", DEST, "-a", "1"]);
        assert!(config.validate().is_err());

        assert!(Config::try_parse_from(["eth-testkit", "fund", "--to", DEST, "-a", "1", "-p", "random"]).is_err());
    }

    #[test]
    fn test_gen() {
        let config = parse(&["gen", "-n", "3", "--json"]);
        assert!(config.validate().is_ok());
        assert!(matches!(config.command, Command::Gen { count: 3, json: true }));

        let config = parse(&["gen", "-n", "0"]);
        assert!(config.validate().is_err());
    }
}
