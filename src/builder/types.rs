//! Types for intent-based batch building.
//!
//! These types are designed to be deserialized from JSON (or JavaScript via
//! serde-wasm-bindgen). Public keys are base58 strings and amounts are decimal
//! strings, so that u64 values survive JavaScript's number limits.

use serde::Deserialize;

/// Intent to build a batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchIntent {
    /// The fee payer's public key (base58)
    #[serde(default)]
    pub fee_payer: String,
    /// Recent blockhash used as the freshness token (base58)
    #[serde(default)]
    pub recent_blockhash: String,
    /// Instructions in execution order
    pub instructions: Vec<Instruction>,
}

/// An instruction to include in the batch.
///
/// Tagged by the `type` field. Missing identity fields deserialize as empty
/// strings and are reported as missing identities when the batch is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Instruction {
    // ===== System Program =====
    /// Allocate an account with explicit funding and size
    CreateAccount {
        #[serde(default)]
        payer: String,
        #[serde(rename = "newAccount", default)]
        new_account: String,
        /// Lamports to fund the new account with (as string)
        lamports: String,
        /// Space to allocate in bytes
        space: u64,
        #[serde(default)]
        owner: String,
    },

    /// Allocate a mint account owned by the Token program, rent-exempt
    CreateMintAccount {
        #[serde(default)]
        payer: String,
        #[serde(default)]
        mint: String,
        /// Overrides the offline rent-exempt minimum (as string)
        #[serde(default)]
        lamports: Option<String>,
    },

    /// Allocate a token account owned by the Token program, rent-exempt
    CreateTokenAccount {
        #[serde(default)]
        payer: String,
        #[serde(default)]
        account: String,
        #[serde(default)]
        lamports: Option<String>,
    },

    // ===== SPL Token Program =====
    InitializeMint {
        #[serde(default)]
        mint: String,
        decimals: u8,
        #[serde(rename = "mintAuthority", default)]
        mint_authority: String,
        #[serde(rename = "freezeAuthority", default)]
        freeze_authority: Option<String>,
    },

    InitializeAccount {
        #[serde(default)]
        account: String,
        #[serde(default)]
        mint: String,
        #[serde(default)]
        owner: String,
    },

    MintTo {
        #[serde(default)]
        mint: String,
        #[serde(default)]
        destination: String,
        #[serde(default)]
        authority: String,
        /// Amount in base units (as string for BigInt compatibility)
        amount: String,
    },

    Transfer {
        #[serde(default)]
        source: String,
        #[serde(default)]
        destination: String,
        #[serde(default)]
        owner: String,
        amount: String,
    },
}
