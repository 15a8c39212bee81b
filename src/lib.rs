//! wasm-spl-batch: atomic SPL Token batches for Solana, with WASM bindings.
//!
//! Encodes account allocation and SPL Token instructions (initialize mint,
//! initialize account, mint-to, transfer) into their exact on-chain byte
//! layouts, composes them into an ordered batch that executes all-or-nothing,
//! and hands the finalized batch off as a legacy Solana transaction.
//!
//! # Architecture
//!
//! 1. **Codec** (`instructions`, `cursor`) - fixed-width payload encoding and decoding
//! 2. **Composition** (`batch`, `rent`) - append-only batch, signer set, rent-exempt funding
//! 3. **Hand-off** (`transaction`, `builder`, `parser`) - wire bytes in and out
//! 4. **WASM bindings** (`wasm/`) - thin wrappers that expose the above to JavaScript
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_spl_batch::{
//!     instructions, rent, Batch, BatchError, FreezeAuthority, FreshnessToken, Pubkey,
//! };
//! use wasm_spl_batch::rent::{AccountKind, DefaultRent};
//!
//! # fn main() -> Result<(), BatchError> {
//! let payer = Pubkey::new_unique();
//! let mint = Pubkey::new_unique();
//!
//! let mut batch = Batch::with_fee_payer(payer);
//! batch.append(rent::create_account_for(&DefaultRent, AccountKind::Mint, &payer, &mint)?)?;
//! batch.append(instructions::initialize_mint(&mint, 9, &payer, FreezeAuthority::None)?)?;
//! batch.finalize("GWaQEymC3Z9SHM2gkh8u12xL1zJPMHPCSVR3pSDpEXE4".parse::<FreshnessToken>()?)?;
//!
//! assert_eq!(batch.required_signers(), vec![payer, mint]);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod builder;
mod cursor;
mod error;
pub mod instructions;
pub mod keypair;
pub mod parser;
pub mod pubkey;
pub mod rent;
pub mod transaction;
pub mod wasm;

// Re-export core types at crate root
pub use batch::{Batch, FreshnessToken};
pub use error::BatchError;
pub use instructions::{
    AccountRef, Amount, FreezeAuthority, InstructionDescriptor, Opcode, TokenInstruction,
};
pub use keypair::{Keypair, KeypairExt};
pub use parser::{parse_transaction, ParsedInstruction, ParsedTransaction};
pub use pubkey::{associated_token_address, Pubkey, PubkeyExt};
pub use transaction::{Transaction, TransactionExt};

// Re-export WASM types
pub use wasm::{BuilderNamespace, ParserNamespace, WasmPubkey};
