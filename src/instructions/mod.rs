//! Token and account-allocation instructions.
//!
//! - `schema`: the closed opcode table (tags, field widths, account roles)
//! - `encode`: one pure constructor per opcode
//! - `decode`: the inverse, for round trips and transaction parsing

mod decode;
mod encode;
mod schema;
mod types;

pub use decode::{decode_instruction, InstructionContext};
pub use encode::{create_account, initialize_account, initialize_mint, mint_to, transfer};
pub use schema::{Field, Opcode, OpcodeSchema, Role, Tag};
pub use types::*;
