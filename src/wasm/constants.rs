//! Program ids and account sizes exported via WASM.
//!
//! Lets JavaScript callers reference well-known ids and the rent-exempt
//! minimums without importing @solana/web3.js.

use wasm_bindgen::prelude::*;

use crate::error::BatchError;
use crate::instructions::{ATA_PROGRAM_ID, SYSTEM_PROGRAM_ID, SYSVAR_RENT_ID, TOKEN_PROGRAM_ID};
use crate::pubkey::{associated_token_address, parse_identity};
use crate::rent::{
    DefaultRent, RentSource, DEFAULT_DECIMALS, MINT_ACCOUNT_SPACE, TOKEN_ACCOUNT_SPACE,
};

/// System Program ID
#[wasm_bindgen]
pub fn system_program_id() -> String {
    SYSTEM_PROGRAM_ID.to_string()
}

/// Token Program ID (SPL Token)
#[wasm_bindgen]
pub fn token_program_id() -> String {
    TOKEN_PROGRAM_ID.to_string()
}

/// Associated Token Account Program ID
#[wasm_bindgen]
pub fn ata_program_id() -> String {
    ATA_PROGRAM_ID.to_string()
}

/// Rent sysvar address
#[wasm_bindgen]
pub fn sysvar_rent_id() -> String {
    SYSVAR_RENT_ID.to_string()
}

/// Mint account space in bytes (82)
#[wasm_bindgen]
pub fn mint_account_space() -> u64 {
    MINT_ACCOUNT_SPACE
}

/// Token account space in bytes (165)
#[wasm_bindgen]
pub fn token_account_space() -> u64 {
    TOKEN_ACCOUNT_SPACE
}

#[wasm_bindgen]
pub fn default_decimals() -> u8 {
    DEFAULT_DECIMALS
}

/// Rent-exempt minimum for `space` bytes under the default rent parameters.
#[wasm_bindgen]
pub fn minimum_balance_for_rent_exemption(space: u64) -> Result<u64, BatchError> {
    DefaultRent.minimum_balance(space)
}

/// Derive the Associated Token Account address for a given wallet and mint.
///
/// The ATA is a PDA derived from seeds: [wallet_address, token_program_id, mint_address]
///
/// @param wallet_address - Owner wallet address (base58)
/// @param mint_address - Token mint address (base58)
/// @returns The derived ATA address (base58)
#[wasm_bindgen]
pub fn get_associated_token_address(
    wallet_address: &str,
    mint_address: &str,
) -> Result<String, BatchError> {
    let wallet = parse_identity("walletAddress", wallet_address)?;
    let mint = parse_identity("mintAddress", mint_address)?;
    Ok(associated_token_address(&wallet, &mint).to_string())
}
