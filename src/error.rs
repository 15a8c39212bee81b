use solana_pubkey::Pubkey;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors raised while encoding instructions or composing a batch.
///
/// Every variant is local and synchronous. Retrying the same call yields the
/// same error, so none of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The encoder wrote a different number of bytes than the opcode layout
    /// requires. This is a codec bug, not a caller error.
    #[error("schema violation: layout requires {expected} bytes, encoder produced {actual}")]
    SchemaViolation { expected: usize, actual: usize },

    /// A caller-supplied value is outside the domain of its field.
    #[error("domain violation: {0}")]
    DomainViolation(String),

    #[error("missing required identity: {0}")]
    MissingIdentity(&'static str),

    #[error("invalid identity for {field}: {value}")]
    InvalidIdentity { field: &'static str, value: String },

    /// The batch is not in a state that permits the requested operation.
    #[error("invalid batch state: {0}")]
    BatchState(String),

    /// `finalize` was called again with a different freshness token.
    #[error("batch was finalized with a different freshness token; rebuild it")]
    StaleFreshnessToken,

    #[error("required signer {0} has not signed")]
    UnsatisfiedSigner(Pubkey),

    #[error("malformed instruction: {0}")]
    MalformedInstruction(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl BatchError {
    pub fn state(msg: &str) -> BatchError {
        BatchError::BatchState(msg.to_string())
    }

    pub fn malformed(msg: &str) -> BatchError {
        BatchError::MalformedInstruction(msg.to_string())
    }
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
impl From<BatchError> for JsValue {
    fn from(err: BatchError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
