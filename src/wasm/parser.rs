//! WASM binding for transaction parsing.

use crate::parser;
use crate::wasm::try_into_js_value::TryIntoJsValue;
use wasm_bindgen::prelude::*;

/// Namespace for transaction parsing operations.
#[wasm_bindgen]
pub struct ParserNamespace;

#[wasm_bindgen]
impl ParserNamespace {
    /// Parse a serialized transaction into structured data.
    ///
    /// Returns an object with:
    /// - `feePayer`: The fee payer address (base58)
    /// - `numSignatures`: Number of required signatures
    /// - `recentBlockhash`: The freshness token (base58)
    /// - `instructions`: Decoded instructions, each with a `type` field
    ///   (`CreateAccount`, `InitializeMint`, `InitializeAccount`, `MintTo`,
    ///   `Transfer`, or `Unknown` with base64 `data`)
    /// - `accountKeys`: Array of all account addresses (base58)
    /// - `signatures`: Base58 signatures, empty string for unsigned slots
    ///
    /// Amounts and lamports are BigInt.
    ///
    /// @param bytes - The raw transaction bytes (wire format)
    #[wasm_bindgen]
    pub fn parse_transaction(bytes: &[u8]) -> Result<JsValue, JsValue> {
        let parsed = parser::parse_transaction(bytes)?;
        Ok(parsed.try_to_js_value()?)
    }
}
