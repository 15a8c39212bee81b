//! WASM bindings for Solana public key (address) operations.

use crate::error::BatchError;
use crate::pubkey::{associated_token_address, Pubkey, PubkeyExt};
use wasm_bindgen::prelude::*;

/// WASM wrapper for Solana public key (address).
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmPubkey {
    inner: Pubkey,
}

#[wasm_bindgen]
impl WasmPubkey {
    /// Create a Pubkey from a base58 string.
    #[wasm_bindgen]
    pub fn from_base58(address: &str) -> Result<WasmPubkey, BatchError> {
        Pubkey::from_base58(address).map(|inner| WasmPubkey { inner })
    }

    /// Create a Pubkey from raw bytes (32 bytes).
    #[wasm_bindgen]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPubkey, BatchError> {
        Pubkey::from_bytes_checked(bytes).map(|inner| WasmPubkey { inner })
    }

    #[wasm_bindgen]
    pub fn to_base58(&self) -> String {
        self.inner.to_string()
    }

    #[wasm_bindgen]
    pub fn to_bytes(&self) -> js_sys::Uint8Array {
        let bytes = self.inner.to_bytes();
        js_sys::Uint8Array::from(&bytes[..])
    }

    #[wasm_bindgen]
    pub fn equals(&self, other: &WasmPubkey) -> bool {
        self.inner == other.inner
    }

    /// Check if this public key is on the Ed25519 curve.
    #[wasm_bindgen]
    pub fn is_on_curve(&self) -> bool {
        self.inner.is_on_curve()
    }

    /// Associated token account of this wallet for `mint`.
    #[wasm_bindgen]
    pub fn associated_token_address(&self, mint: &WasmPubkey) -> WasmPubkey {
        WasmPubkey {
            inner: associated_token_address(&self.inner, &mint.inner),
        }
    }
}
