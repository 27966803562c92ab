//! secp256k1 keypair generation.

use secp256k1::{PublicKey, Secp256k1, SecretKey};

use super::{keccak256, Address, KeyError};

/// A secp256k1 keypair together with its derived Ethereum address.
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The private key bytes (32 bytes)
    secret_key: [u8; 32],
    /// Uncompressed SEC1 public key (65 bytes, leading 0x04)
    public_key: [u8; 65],
    /// The derived Ethereum address
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair.
    ///
    /// Uses the thread-local CSPRNG. If the entropy source fails the RNG
    /// panics; there is no partially built keypair to return.
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut rand::thread_rng());
        Self::from_parts(&secret_key, &public_key)
    }

    /// Builds a keypair from an existing secret key.
    pub fn from_secret_key(secret_bytes: [u8; 32]) -> Result<Self, KeyError> {
        let secret_key =
            SecretKey::from_slice(&secret_bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        let public_key = PublicKey::from_secret_key(&Secp256k1::new(), &secret_key);
        Ok(Self::from_parts(&secret_key, &public_key))
    }

    fn from_parts(secret_key: &SecretKey, public_key: &PublicKey) -> Self {
        let public_key_bytes = public_key.serialize_uncompressed();
        Self {
            secret_key: secret_key.secret_bytes(),
            public_key: public_key_bytes,
            address: derive_address(&public_key_bytes),
        }
    }

    /// Returns the private key as a hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key)
    }

    /// Returns the uncompressed public key as hex (without 0x prefix).
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    /// Returns the uncompressed public key bytes.
    pub fn public_key_bytes(&self) -> &[u8; 65] {
        &self.public_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// Derives an Ethereum address from an uncompressed secp256k1 public key.
///
/// The leading 0x04 tag is dropped, the remaining 64 bytes are hashed with
/// Keccak-256 and the last 20 bytes of the digest form the address.
pub fn derive_address(uncompressed: &[u8; 65]) -> Address {
    let hash = keccak256(&uncompressed[1..]);

    let mut address_bytes = [0u8; 20];
    address_bytes.copy_from_slice(&hash[12..]);

    Address::from_bytes(address_bytes)
}
