//! Hex-encoded identity handed to test code.

use secp256k1::SecretKey;
use serde::Serialize;

use super::{Address, KeyError, Keypair};

/// A generated identity: private key, public key and address, all as strings.
///
/// Both keys are lowercase hex without a `0x` prefix. The public key is the
/// 65-byte uncompressed encoding. The address is EIP-55 checksummed with a
/// `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    private_key_hex: String,
    public_key_hex: String,
    address: String,
}

impl AddressRecord {
    /// Generates a fresh random identity.
    pub fn generate() -> Self {
        Self::from(&Keypair::generate())
    }

    /// Rebuilds a record from a stored private key (`0x` prefix optional).
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Self, KeyError> {
        let keypair = Keypair::from_secret_key(decode_secret(private_key_hex)?)?;
        Ok(Self::from(&keypair))
    }

    pub fn private_key_hex(&self) -> &str {
        &self.private_key_hex
    }

    pub fn public_key_hex(&self) -> &str {
        &self.public_key_hex
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Converts the stored private key back into a usable secp256k1 key.
    pub fn secret_key(&self) -> Result<SecretKey, KeyError> {
        SecretKey::from_slice(&decode_secret(&self.private_key_hex)?)
            .map_err(|_| KeyError::InvalidSecretKey)
    }

    /// Parses the stored address.
    pub fn to_address(&self) -> Result<Address, KeyError> {
        self.address.parse()
    }

    /// Re-derives the public key and address from the private key and checks
    /// them against the stored fields.
    pub fn verify(&self) -> Result<(), KeyError> {
        let keypair = Keypair::from_secret_key(decode_secret(&self.private_key_hex)?)?;

        if keypair.public_key_hex() != self.public_key_hex {
            return Err(KeyError::PublicKeyMismatch);
        }
        if keypair.address().to_checksum() != self.address {
            return Err(KeyError::AddressMismatch {
                expected: keypair.address().to_checksum(),
                found: self.address.clone(),
            });
        }
        Ok(())
    }
}

impl From<&Keypair> for AddressRecord {
    fn from(keypair: &Keypair) -> Self {
        Self {
            private_key_hex: keypair.private_key_hex(),
            public_key_hex: keypair.public_key_hex(),
            address: keypair.address().to_checksum(),
        }
    }
}

fn decode_secret(hex_str: &str) -> Result<[u8; 32], KeyError> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(stripped)?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| KeyError::InvalidLength {
            expected: 32,
            found: b.len(),
        })
}
