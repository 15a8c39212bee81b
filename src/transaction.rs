//! Hand-off from a finalized [`Batch`] to a Solana legacy transaction.
//!
//! The batch becomes a `Message` (fee payer first, accounts merged and
//! ordered by the SDK) and then a `Transaction` with one empty signature slot
//! per required signer. Signing fills those slots; serialization uses bincode,
//! the standard Solana wire format.

use crate::batch::Batch;
use crate::error::BatchError;
use crate::instructions::InstructionDescriptor;
use crate::keypair::Keypair;
use base64::prelude::*;
use solana_address::Address;
use solana_pubkey::Pubkey;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::Message;
use solana_signature::Signature;
use solana_signer::Signer;

/// Re-export the underlying Solana Transaction type.
pub use solana_transaction::Transaction;

fn to_address(key: &Pubkey) -> Address {
    Address::new_from_array(key.to_bytes())
}

impl InstructionDescriptor {
    /// Convert into the SDK instruction type used for message compilation.
    pub fn to_sdk_instruction(&self) -> Instruction {
        Instruction {
            program_id: to_address(self.program_id()),
            accounts: self
                .accounts()
                .iter()
                .map(|a| AccountMeta {
                    pubkey: to_address(&a.pubkey),
                    is_signer: a.is_signer,
                    is_writable: a.is_writable,
                })
                .collect(),
            data: self.data().to_vec(),
        }
    }
}

impl Batch {
    /// Compile a finalized batch into an unsigned transaction.
    pub fn to_transaction(&self) -> Result<Transaction, BatchError> {
        let fee_payer = to_address(&self.finalized_fee_payer()?);
        let blockhash = *self
            .freshness_token()
            .ok_or_else(|| BatchError::state("batch is not finalized"))?
            .hash();

        let instructions: Vec<Instruction> = self
            .instructions()
            .iter()
            .map(InstructionDescriptor::to_sdk_instruction)
            .collect();

        let message = Message::new_with_blockhash(&instructions, Some(&fee_payer), &blockhash);
        Ok(Transaction::new_unsigned(message))
    }

    /// Serialized unsigned transaction (wire format).
    pub fn to_unsigned_bytes(&self) -> Result<Vec<u8>, BatchError> {
        self.to_transaction()?.to_bytes()
    }

    /// Sign a finalized batch with `signers`.
    ///
    /// Every required signer (fee payer included) must be present; the check
    /// runs before any signature is produced. Keypairs that are not required
    /// are ignored.
    pub fn sign(&self, signers: &[&Keypair]) -> Result<Transaction, BatchError> {
        let available: Vec<Pubkey> = signers.iter().map(|k| k.pubkey()).collect();
        self.verify_signers(&available)?;

        let mut tx = self.to_transaction()?;
        let payload = tx.signable_payload();
        for keypair in signers {
            let pubkey = keypair.pubkey();
            if tx.signer_index(&pubkey).is_none() {
                tracing::trace!(%pubkey, "skipping keypair that is not a required signer");
                continue;
            }
            let signature = keypair.sign_message(&payload);
            tx.add_signature(&pubkey, signature.as_ref())?;
        }
        tracing::debug!(
            signatures = tx.signatures.len(),
            "signed batch transaction"
        );
        Ok(tx)
    }
}

/// Extension trait for Transaction with crate-level error handling.
pub trait TransactionExt {
    /// Deserialize a transaction from raw bytes (wire format).
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, BatchError>;

    fn from_base64(encoded: &str) -> Result<Transaction, BatchError>;

    /// Serialize transaction to bytes (wire format).
    fn to_bytes(&self) -> Result<Vec<u8>, BatchError>;

    fn to_base64(&self) -> Result<String, BatchError>;

    /// Get the signable message bytes (what gets signed).
    fn signable_payload(&self) -> Vec<u8>;

    /// Index of `pubkey` among the signing accounts, if it is one.
    fn signer_index(&self, pubkey: &Pubkey) -> Option<usize>;

    /// Place a 64-byte Ed25519 signature in the slot of `pubkey`.
    fn add_signature(&mut self, pubkey: &Pubkey, signature: &[u8]) -> Result<(), BatchError>;

    /// Whether every signature slot holds a non-default signature.
    fn is_fully_signed(&self) -> bool;
}

impl TransactionExt for Transaction {
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, BatchError> {
        bincode::deserialize(bytes).map_err(|e| {
            BatchError::Serialization(format!("Failed to deserialize transaction: {}", e))
        })
    }

    fn from_base64(encoded: &str) -> Result<Transaction, BatchError> {
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| BatchError::Serialization(format!("Invalid base64: {}", e)))?;
        Transaction::from_bytes(&bytes)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, BatchError> {
        bincode::serialize(self).map_err(|e| {
            BatchError::Serialization(format!("Failed to serialize transaction: {}", e))
        })
    }

    fn to_base64(&self) -> Result<String, BatchError> {
        Ok(BASE64_STANDARD.encode(self.to_bytes()?))
    }

    fn signable_payload(&self) -> Vec<u8> {
        self.message.serialize()
    }

    fn signer_index(&self, pubkey: &Pubkey) -> Option<usize> {
        let target = to_address(pubkey);
        let num_signers = self.message.header.num_required_signatures as usize;
        self.message
            .account_keys
            .iter()
            .take(num_signers)
            .position(|key| *key == target)
    }

    fn add_signature(&mut self, pubkey: &Pubkey, signature: &[u8]) -> Result<(), BatchError> {
        let bytes: [u8; 64] = signature.try_into().map_err(|_| {
            BatchError::DomainViolation(format!(
                "Invalid signature length: expected 64 bytes, got {}",
                signature.len()
            ))
        })?;
        let index = self
            .signer_index(pubkey)
            .ok_or(BatchError::UnsatisfiedSigner(*pubkey))?;

        let num_signers = self.message.header.num_required_signatures as usize;
        if self.signatures.len() < num_signers {
            self.signatures.resize(num_signers, Signature::default());
        }
        self.signatures[index] = Signature::from(bytes);
        Ok(())
    }

    fn is_fully_signed(&self) -> bool {
        let num_signers = self.message.header.num_required_signatures as usize;
        self.signatures.len() == num_signers
            && self.signatures.iter().all(|s| *s != Signature::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FreshnessToken;
    use crate::instructions::{create_account, initialize_mint, FreezeAuthority, TOKEN_PROGRAM_ID};
    use crate::keypair::KeypairExt;
    use solana_sdk::hash::Hash;

    fn mint_batch(payer: &Keypair, mint: &Keypair) -> Batch {
        let mut batch = Batch::with_fee_payer(payer.pubkey());
        batch
            .append(
                create_account(
                    &payer.pubkey(),
                    &mint.pubkey(),
                    1_461_600u64,
                    82,
                    &TOKEN_PROGRAM_ID,
                )
                .unwrap(),
            )
            .unwrap();
        batch
            .append(
                initialize_mint(&mint.pubkey(), 9, &payer.pubkey(), FreezeAuthority::None)
                    .unwrap(),
            )
            .unwrap();
        batch
            .finalize(FreshnessToken::new(Hash::new_from_array([5; 32])))
            .unwrap();
        batch
    }

    #[test]
    fn test_unfinalized_batch_cannot_be_compiled() {
        let batch = Batch::with_fee_payer(Pubkey::new_unique());
        assert!(matches!(
            batch.to_transaction(),
            Err(BatchError::BatchState(_))
        ));
    }

    #[test]
    fn test_compiled_message_layout() {
        let payer = Keypair::from_secret_key_bytes(&[1u8; 32]).unwrap();
        let mint = Keypair::from_secret_key_bytes(&[2u8; 32]).unwrap();
        let tx = mint_batch(&payer, &mint).to_transaction().unwrap();

        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert_eq!(tx.message.instructions.len(), 2);
        assert_eq!(tx.signer_index(&payer.pubkey()), Some(0));
        assert_eq!(tx.signer_index(&mint.pubkey()), Some(1));
        assert_eq!(tx.signer_index(&TOKEN_PROGRAM_ID), None);
        assert_eq!(tx.message.instructions[0].data.len(), 52);
        assert_eq!(tx.message.instructions[1].data.len(), 35);
        assert!(!tx.is_fully_signed());
    }

    #[test]
    fn test_sign_requires_every_signer() {
        let payer = Keypair::from_secret_key_bytes(&[1u8; 32]).unwrap();
        let mint = Keypair::from_secret_key_bytes(&[2u8; 32]).unwrap();
        let batch = mint_batch(&payer, &mint);

        assert_eq!(
            batch.sign(&[&payer]).unwrap_err(),
            BatchError::UnsatisfiedSigner(mint.pubkey())
        );

        let stranger = Keypair::from_secret_key_bytes(&[3u8; 32]).unwrap();
        let tx = batch.sign(&[&mint, &stranger, &payer]).unwrap();
        assert!(tx.is_fully_signed());
        assert_eq!(tx.signatures.len(), 2);

        // Ed25519 is deterministic, so each slot must hold exactly this signature.
        let payload = tx.signable_payload();
        assert_eq!(
            tx.signatures[0].to_string(),
            payer.sign_message(&payload).to_string()
        );
        assert_eq!(
            tx.signatures[1].to_string(),
            mint.sign_message(&payload).to_string()
        );
    }

    #[test]
    fn test_bytes_and_base64_roundtrip() {
        let payer = Keypair::from_secret_key_bytes(&[1u8; 32]).unwrap();
        let mint = Keypair::from_secret_key_bytes(&[2u8; 32]).unwrap();
        let tx = mint_batch(&payer, &mint).sign(&[&payer, &mint]).unwrap();

        let decoded = Transaction::from_bytes(&tx.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, tx);
        let decoded = Transaction::from_base64(&tx.to_base64().unwrap()).unwrap();
        assert_eq!(decoded, tx);
        assert!(Transaction::from_bytes(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_add_signature_validation() {
        let payer = Keypair::from_secret_key_bytes(&[1u8; 32]).unwrap();
        let mint = Keypair::from_secret_key_bytes(&[2u8; 32]).unwrap();
        let mut tx = mint_batch(&payer, &mint).to_transaction().unwrap();

        assert!(tx.add_signature(&payer.pubkey(), &[0u8; 32]).is_err());
        assert!(tx.add_signature(&TOKEN_PROGRAM_ID, &[1u8; 64]).is_err());
        tx.add_signature(&mint.pubkey(), &[42u8; 64]).unwrap();
        assert_eq!(tx.signatures[1], Signature::from([42u8; 64]));
    }
}
