//! Key generation and address derivation.
//!
//! This module provides:
//! - Secure random key generation using secp256k1
//! - Ethereum address derivation using Keccak-256
//! - `AddressRecord`, the hex-encoded identity returned to tests

mod address;
mod keypair;
mod record;

use tiny_keccak::{Hasher, Keccak};

pub use address::Address;
pub use keypair::{derive_address, Keypair};
pub use record::AddressRecord;

/// Keccak-256 of arbitrary bytes (output 32 bytes).
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(input);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Invalid key length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Secret key is not a valid secp256k1 scalar")]
    InvalidSecretKey,
    #[error("Public key does not match the private key")]
    PublicKeyMismatch,
    #[error("Address mismatch: derived {expected}, stored {found}")]
    AddressMismatch { expected: String, found: String },
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
