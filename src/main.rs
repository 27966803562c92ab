//! Ethereum test-account toolkit CLI
//!
//! Usage:
//!   eth-testkit gen -n 3                        # Print 3 fresh key pairs
//!   eth-testkit gen --json                      # One record as a JSON line
//!   eth-testkit fund -t 0xabc... -a 10          # Send 10 ether from a node account
//!   eth-testkit fund -t 0xabc... -a 1 -w 30     # ... and wait up to 30s for the receipt

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eth_testkit::config::{Command, FundArgs};
use eth_testkit::{AddressRecord, Config, FundDispenser};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    match config.command {
        Command::Gen { count, json } => generate(count, json),
        Command::Fund(args) => fund(&args),
    }
}

fn generate(count: usize, json: bool) {
    for index in 1..=count {
        let record = AddressRecord::generate();
        if json {
            match serde_json::to_string(&record) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("Failed to encode record: {}", e);
                    process::exit(1);
                }
            }
        } else {
            print_record(&record, index);
        }
    }
}

fn print_record(record: &AddressRecord, index: usize) {
    println!("=== Key #{} ===", index);
    println!("Address:     {}", record.address());
    println!("Private Key: {}", record.private_key_hex());
    println!("Public Key:  {}", record.public_key_hex());
    println!();
}

fn fund(args: &FundArgs) {
    let destination = match args.destination() {
        Ok(address) => address,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let dispenser = FundDispenser::new(args.options());
    match dispenser.fund_endpoint(&args.rpc, &destination, args.amount) {
        Ok(funding) => {
            println!("From:    {}", funding.from);
            println!("To:      {}", funding.to);
            println!("Value:   {} wei", funding.value);
            println!("Tx hash: {:?}", funding.tx_hash);
            if let Some(block) = funding.block_number {
                println!("Block:   {}", block);
            }
        }
        Err(e) => {
            eprintln!("Funding failed: {}", e);
            process::exit(1);
        }
    }
}
