//! Instruction decoding.
//!
//! Reverses the encoder: a program id, its positional accounts and a payload
//! become a [`TokenInstruction`]. Used for round-trip checks and by the
//! transaction parser.

use super::schema::{Opcode, Tag};
use super::types::*;
use crate::cursor::ReadCursor;
use crate::error::BatchError;
use solana_pubkey::Pubkey;

/// Context for decoding an instruction - provides account addresses.
pub struct InstructionContext<'a> {
    pub program_id: &'a Pubkey,
    pub accounts: &'a [Pubkey],
    pub data: &'a [u8],
}

/// Decode a single instruction into a [`TokenInstruction`].
pub fn decode_instruction(ctx: InstructionContext) -> Result<TokenInstruction, BatchError> {
    let opcode = Opcode::from_tag(ctx.program_id, ctx.data).ok_or_else(|| {
        BatchError::MalformedInstruction(format!(
            "unsupported instruction for program {}",
            ctx.program_id
        ))
    })?;
    let schema = opcode.schema();

    if ctx.accounts.len() < schema.accounts.len() {
        return Err(BatchError::MalformedInstruction(format!(
            "{:?} expects {} accounts, got {}",
            opcode,
            schema.accounts.len(),
            ctx.accounts.len()
        )));
    }
    let account = |i: usize| ctx.accounts[i];

    let mut cursor = ReadCursor::new(ctx.data);
    match schema.tag {
        Tag::U32(_) => cursor.read_u32_le().map(drop)?,
        Tag::U8(_) => cursor.read_u8().map(drop)?,
    }

    let instruction = match opcode {
        Opcode::CreateAccount => TokenInstruction::CreateAccount {
            payer: account(0),
            new_account: account(1),
            lamports: cursor.read_u64_le()?,
            space: cursor.read_u64_le()?,
            owner: cursor.read_pubkey()?,
        },
        Opcode::InitializeMint => {
            let decimals = cursor.read_u8()?;
            let mint_authority = cursor.read_pubkey()?;
            let freeze_authority = match cursor.read_u8()? {
                0 => FreezeAuthority::None,
                1 => FreezeAuthority::Some(cursor.read_pubkey()?),
                other => {
                    return Err(BatchError::MalformedInstruction(format!(
                        "invalid freeze authority flag {}",
                        other
                    )))
                }
            };
            TokenInstruction::InitializeMint {
                mint: account(0),
                decimals,
                mint_authority,
                freeze_authority,
            }
        }
        Opcode::InitializeAccount => TokenInstruction::InitializeAccount {
            account: account(0),
            mint: account(1),
            owner: account(2),
        },
        Opcode::MintTo => TokenInstruction::MintTo {
            mint: account(0),
            destination: account(1),
            authority: account(2),
            amount: cursor.read_u64_le()?,
        },
        Opcode::Transfer => TokenInstruction::Transfer {
            source: account(0),
            destination: account(1),
            owner: account(2),
            amount: cursor.read_u64_le()?,
        },
    };
    cursor.finish()?;
    Ok(instruction)
}

impl TokenInstruction {
    /// Decode a descriptor produced by this crate (or any byte-identical one).
    pub fn decode(descriptor: &InstructionDescriptor) -> Result<TokenInstruction, BatchError> {
        let accounts: Vec<Pubkey> = descriptor.accounts().iter().map(|a| a.pubkey).collect();
        decode_instruction(InstructionContext {
            program_id: descriptor.program_id(),
            accounts: &accounts,
            data: descriptor.data(),
        })
    }
}
