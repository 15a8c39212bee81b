//! WASM binding for batch building.
//!
//! Exposes:
//! - `buildBatch` - unsigned transaction bytes from an intent
//! - `requiredSigners` - who has to sign the batch an intent describes

use crate::builder::{self, BatchIntent};
use crate::transaction::TransactionExt;
use wasm_bindgen::prelude::*;

fn parse_intent(intent: JsValue) -> Result<BatchIntent, JsValue> {
    serde_wasm_bindgen::from_value(intent)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse batch intent: {}", e)))
}

/// Namespace for batch building operations.
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Build an atomic token batch from an intent structure.
    ///
    /// # Intent Structure
    ///
    /// ```json
    /// {
    ///   "feePayer": "DgT9qyYwYKBRDyDw3EfR12LHQCQjtNrKu2qMsXHuosmB",
    ///   "recentBlockhash": "GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4",
    ///   "instructions": [
    ///     { "type": "createMintAccount", "payer": "...", "mint": "..." },
    ///     { "type": "initializeMint", "mint": "...", "decimals": 9, "mintAuthority": "..." }
    ///   ]
    /// }
    /// ```
    ///
    /// # Instruction Types
    ///
    /// - `createAccount`: payer, newAccount, lamports, space, owner
    /// - `createMintAccount`: payer, mint, optional lamports (defaults to rent-exempt minimum)
    /// - `createTokenAccount`: payer, account, optional lamports
    /// - `initializeMint`: mint, decimals, mintAuthority, optional freezeAuthority
    /// - `initializeAccount`: account, mint, owner
    /// - `mintTo`: mint, destination, authority, amount
    /// - `transfer`: source, destination, owner, amount
    ///
    /// Amounts are decimal strings.
    ///
    /// @param intent - The batch intent as a JSON object
    /// @returns Serialized unsigned transaction bytes
    #[wasm_bindgen]
    pub fn build_batch(intent: JsValue) -> Result<Vec<u8>, JsValue> {
        let intent = parse_intent(intent)?;
        Ok(builder::build_transaction(intent)?)
    }

    /// Build the batch described by `intent` and return it as base64.
    #[wasm_bindgen]
    pub fn build_batch_base64(intent: JsValue) -> Result<String, JsValue> {
        let intent = parse_intent(intent)?;
        let batch = builder::build_batch(intent)?;
        Ok(batch.to_transaction()?.to_base64()?)
    }

    /// Addresses that must sign, fee payer first, without duplicates.
    #[wasm_bindgen]
    pub fn required_signers(intent: JsValue) -> Result<Vec<String>, JsValue> {
        let intent = parse_intent(intent)?;
        let batch = builder::build_batch(intent)?;
        let tx = batch.to_transaction()?;
        let num_signers = tx.message.header.num_required_signatures as usize;
        Ok(tx
            .message
            .account_keys
            .iter()
            .take(num_signers)
            .map(|k| k.to_string())
            .collect())
    }
}
