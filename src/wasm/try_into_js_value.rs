//! Conversion of parsed batch data into JavaScript values.
//!
//! u64 amounts become BigInt so that no precision is lost; public keys and
//! blockhashes become base58 strings.

use crate::batch::FreshnessToken;
use crate::instructions::TokenInstruction;
use crate::parser::{ParsedInstruction, ParsedTransaction};
use base64::prelude::*;
use solana_pubkey::Pubkey;
use wasm_bindgen::JsValue;

/// Error type for JS value conversion failures.
#[derive(Debug)]
pub struct JsConversionError(String);

impl JsConversionError {
    pub fn new(msg: &str) -> Self {
        JsConversionError(msg.to_string())
    }
}

impl std::fmt::Display for JsConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<JsConversionError> for JsValue {
    fn from(err: JsConversionError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Trait for converting Rust types to JavaScript values.
pub trait TryIntoJsValue {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError>;
}

// =============================================================================
// Primitive implementations
// =============================================================================

impl TryIntoJsValue for String {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for &str {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(self))
    }
}

impl TryIntoJsValue for u8 {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_f64(*self as f64))
    }
}

impl TryIntoJsValue for u64 {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(js_sys::BigInt::from(*self).into())
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Option<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        match self {
            Some(v) => v.try_to_js_value(),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

impl<T: TryIntoJsValue> TryIntoJsValue for Vec<T> {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        let arr = js_sys::Array::new();
        for item in self.iter() {
            arr.push(&item.try_to_js_value()?);
        }
        Ok(arr.into())
    }
}

impl TryIntoJsValue for Pubkey {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(&self.to_string()))
    }
}

impl TryIntoJsValue for FreshnessToken {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        Ok(JsValue::from_str(&self.to_string()))
    }
}

// =============================================================================
// Macro for building JS objects
// =============================================================================

/// Macro to create a JavaScript object from key-value pairs.
/// Each value must implement TryIntoJsValue.
#[macro_export]
macro_rules! js_obj {
    ( $( $key:expr => $value:expr ),* $(,)? ) => {{
        let obj = js_sys::Object::new();
        $(
            js_sys::Reflect::set(
                &obj,
                &wasm_bindgen::JsValue::from_str($key),
                &$crate::wasm::try_into_js_value::TryIntoJsValue::try_to_js_value(&$value)?
            ).map_err(|_| $crate::wasm::try_into_js_value::JsConversionError::new(
                concat!("Failed to set object property: ", $key)
            ))?;
        )*
        Ok::<wasm_bindgen::JsValue, $crate::wasm::try_into_js_value::JsConversionError>(obj.into())
    }};
}

pub use js_obj;

// =============================================================================
// Parsed batch data
// =============================================================================

impl TryIntoJsValue for TokenInstruction {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        match self {
            TokenInstruction::CreateAccount {
                payer,
                new_account,
                lamports,
                space,
                owner,
            } => js_obj!(
                "type" => "CreateAccount",
                "payer" => *payer,
                "newAccount" => *new_account,
                "lamports" => *lamports,
                "space" => *space,
                "owner" => *owner
            ),
            TokenInstruction::InitializeMint {
                mint,
                decimals,
                mint_authority,
                freeze_authority,
            } => js_obj!(
                "type" => "InitializeMint",
                "mint" => *mint,
                "decimals" => *decimals,
                "mintAuthority" => *mint_authority,
                "freezeAuthority" => freeze_authority.as_option().copied()
            ),
            TokenInstruction::InitializeAccount {
                account,
                mint,
                owner,
            } => js_obj!(
                "type" => "InitializeAccount",
                "account" => *account,
                "mint" => *mint,
                "owner" => *owner
            ),
            TokenInstruction::MintTo {
                mint,
                destination,
                authority,
                amount,
            } => js_obj!(
                "type" => "MintTo",
                "mint" => *mint,
                "destination" => *destination,
                "authority" => *authority,
                "amount" => *amount
            ),
            TokenInstruction::Transfer {
                source,
                destination,
                owner,
                amount,
            } => js_obj!(
                "type" => "Transfer",
                "source" => *source,
                "destination" => *destination,
                "owner" => *owner,
                "amount" => *amount
            ),
        }
    }
}

impl TryIntoJsValue for ParsedInstruction {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        match self {
            ParsedInstruction::Token(ix) => ix.try_to_js_value(),
            ParsedInstruction::Unknown {
                program_id,
                accounts,
                data,
            } => js_obj!(
                "type" => "Unknown",
                "programId" => *program_id,
                "accounts" => *accounts,
                "data" => BASE64_STANDARD.encode(data)
            ),
        }
    }
}

impl TryIntoJsValue for ParsedTransaction {
    fn try_to_js_value(&self) -> Result<JsValue, JsConversionError> {
        js_obj!(
            "feePayer" => self.fee_payer,
            "numSignatures" => self.num_signatures,
            "recentBlockhash" => self.recent_blockhash,
            "instructions" => self.instructions,
            "accountKeys" => self.account_keys,
            "signatures" => self.signatures
        )
    }
}
