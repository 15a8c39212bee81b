//! Ed25519 keypair loading for batch signers.
//!
//! Wraps `solana_keypair::Keypair`. Key storage is the caller's concern; these
//! helpers only turn secret material into a signer.

use crate::error::BatchError;
use solana_signer::Signer;

/// Re-export the underlying Solana Keypair type.
pub use solana_keypair::Keypair;

pub trait KeypairExt {
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, BatchError>;
    fn from_solana_secret_key(secret_key: &[u8]) -> Result<Keypair, BatchError>;
    fn from_base58_secret(secret: &str) -> Result<Keypair, BatchError>;
    fn address(&self) -> String;
}

impl KeypairExt for Keypair {
    /// Create a keypair from a 32-byte secret key (Ed25519 seed).
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, BatchError> {
        let bytes: [u8; 32] = secret_key.try_into().map_err(|_| {
            BatchError::DomainViolation(format!(
                "Secret key must be 32 bytes, got {}",
                secret_key.len()
            ))
        })?;
        Ok(Keypair::new_from_array(bytes))
    }

    /// Create a keypair from a 64-byte Solana secret key (secret + public concatenated).
    fn from_solana_secret_key(secret_key: &[u8]) -> Result<Keypair, BatchError> {
        if secret_key.len() != 64 {
            return Err(BatchError::DomainViolation(format!(
                "Solana secret key must be 64 bytes, got {}",
                secret_key.len()
            )));
        }
        Keypair::try_from(secret_key)
            .map_err(|e| BatchError::DomainViolation(format!("Invalid keypair: {}", e)))
    }

    /// Decode a base58 secret as exported by wallets: either the 32-byte seed
    /// or the 64-byte secret+public form.
    fn from_base58_secret(secret: &str) -> Result<Keypair, BatchError> {
        let bytes = solana_sdk::bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| BatchError::DomainViolation(format!("Invalid base58 secret: {}", e)))?;
        match bytes.len() {
            32 => Keypair::from_secret_key_bytes(&bytes),
            _ => Keypair::from_solana_secret_key(&bytes),
        }
    }

    /// Get the Solana address (base58-encoded public key).
    fn address(&self) -> String {
        self.pubkey().to_string()
    }
}
