//! Solana public key (address) helpers.
//!
//! Wraps `solana_pubkey::Pubkey`, which is the identity type used by every
//! account reference in this crate.

use crate::error::BatchError;
use crate::instructions::{ATA_PROGRAM_ID, TOKEN_PROGRAM_ID};
use std::str::FromStr;

/// Re-export the underlying Solana Pubkey type.
pub use solana_pubkey::Pubkey;

/// Extension trait for Pubkey to add crate-level error handling.
pub trait PubkeyExt {
    fn from_base58(address: &str) -> Result<Pubkey, BatchError>;
    fn from_bytes_checked(bytes: &[u8]) -> Result<Pubkey, BatchError>;
}

impl PubkeyExt for Pubkey {
    /// Create a Pubkey from a base58 string.
    fn from_base58(address: &str) -> Result<Pubkey, BatchError> {
        parse_identity("address", address)
    }

    /// Create a Pubkey from a byte slice with length validation.
    fn from_bytes_checked(bytes: &[u8]) -> Result<Pubkey, BatchError> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| {
            BatchError::DomainViolation(format!(
                "Invalid public key length: expected 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Pubkey::from(array))
    }
}

/// Parse a named identity field. An empty value counts as missing.
pub(crate) fn parse_identity(field: &'static str, value: &str) -> Result<Pubkey, BatchError> {
    if value.trim().is_empty() {
        return Err(BatchError::MissingIdentity(field));
    }
    Pubkey::from_str(value).map_err(|_| BatchError::InvalidIdentity {
        field,
        value: value.to_string(),
    })
}

/// Derive the associated token account of `wallet` for `mint`.
///
/// Seeds are `[wallet, token_program, mint]` under the associated token
/// account program.
pub fn associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    let seeds = &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()];
    let (ata, _bump) = Pubkey::find_program_address(seeds, &ATA_PROGRAM_ID);
    ata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base58() {
        let address = "FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH";
        let pubkey = Pubkey::from_base58(address).unwrap();
        assert_eq!(pubkey.to_string(), address);
    }

    #[test]
    fn test_from_bytes() {
        let bytes = [0u8; 32];
        let pubkey = Pubkey::from_bytes_checked(&bytes).unwrap();
        assert_eq!(pubkey.to_bytes(), bytes);
        assert_eq!(pubkey.to_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn test_invalid_length() {
        assert!(Pubkey::from_bytes_checked(&[0u8; 31]).is_err());
        assert!(Pubkey::from_bytes_checked(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_missing_vs_invalid() {
        assert_eq!(
            parse_identity("mint", "").unwrap_err(),
            BatchError::MissingIdentity("mint")
        );
        assert!(matches!(
            parse_identity("mint", "invalid!@#$"),
            Err(BatchError::InvalidIdentity { field: "mint", .. })
        ));
    }

    #[test]
    fn test_associated_token_address_is_deterministic_and_off_curve() {
        let wallet = Pubkey::from_base58("FKjSjCqByQRwSzZoMXA7bKnDbJe41YgJTHFFzBeC42bH").unwrap();
        let mint = Pubkey::from_base58("DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB").unwrap();
        let ata = associated_token_address(&wallet, &mint);
        assert_eq!(ata, associated_token_address(&wallet, &mint));
        assert_ne!(ata, associated_token_address(&mint, &wallet));
        assert!(!ata.is_on_curve());
    }
}
