//! Instruction constructors.
//!
//! One pure function per operation. Each allocates the payload at the length
//! its schema computes, fills it through a [`WriteCursor`], and attaches the
//! schema's account roles to the supplied identities.

use super::schema::{Opcode, OpcodeSchema, Tag};
use super::types::*;
use crate::cursor::WriteCursor;
use crate::error::BatchError;
use solana_pubkey::Pubkey;

/// Allocate the payload for `schema`, run `fill` over it, and check that the
/// whole buffer was written.
fn encode_payload<F>(
    schema: &OpcodeSchema,
    present: &[bool],
    fill: F,
) -> Result<Vec<u8>, BatchError>
where
    F: FnOnce(&mut WriteCursor<'_>) -> Result<(), BatchError>,
{
    let mut data = vec![0u8; schema.payload_len(present)];
    let mut cursor = WriteCursor::new(&mut data);
    match schema.tag {
        Tag::U32(tag) => cursor.write_u32_le(tag)?,
        Tag::U8(tag) => cursor.write_u8(tag)?,
    };
    fill(&mut cursor)?;
    cursor.finish()?;
    Ok(data)
}

fn descriptor(
    schema: &OpcodeSchema,
    keys: &[Pubkey],
    data: Vec<u8>,
) -> Result<InstructionDescriptor, BatchError> {
    let accounts = schema.account_refs(keys)?;
    Ok(InstructionDescriptor::new(schema.program_id, accounts, data))
}

/// Resolve a caller amount into the u64 wire domain.
fn to_amount<A>(amount: A) -> Result<u64, BatchError>
where
    A: TryInto<Amount>,
    BatchError: From<A::Error>,
{
    Ok(amount.try_into()?.get())
}

/// System program `CreateAccount`: fund and allocate `new_account`, owned by
/// `owner`. Both `payer` and `new_account` must sign.
pub fn create_account<L>(
    payer: &Pubkey,
    new_account: &Pubkey,
    lamports: L,
    space: u64,
    owner: &Pubkey,
) -> Result<InstructionDescriptor, BatchError>
where
    L: TryInto<Amount>,
    BatchError: From<L::Error>,
{
    let lamports = to_amount(lamports)?;
    let schema = Opcode::CreateAccount.schema();
    let data = encode_payload(schema, &[], |c| {
        c.write_u64_le(lamports)?;
        c.write_u64_le(space)?;
        c.write_pubkey(owner)?;
        Ok(())
    })?;
    descriptor(schema, &[*payer, *new_account], data)
}

/// Token program `InitializeMint`.
pub fn initialize_mint(
    mint: &Pubkey,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: FreezeAuthority,
) -> Result<InstructionDescriptor, BatchError> {
    let schema = Opcode::InitializeMint.schema();
    let present = [freeze_authority.as_option().is_some()];
    let data = encode_payload(schema, &present, |c| {
        c.write_u8(decimals)?;
        c.write_pubkey(mint_authority)?;
        c.write_u8(freeze_authority.discriminant())?;
        if let FreezeAuthority::Some(key) = &freeze_authority {
            c.write_pubkey(key)?;
        }
        Ok(())
    })?;
    descriptor(schema, &[*mint, SYSVAR_RENT_ID], data)
}

/// Token program `InitializeAccount`: bind `account` to `mint` and `owner`.
pub fn initialize_account(
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<InstructionDescriptor, BatchError> {
    let schema = Opcode::InitializeAccount.schema();
    let data = encode_payload(schema, &[], |_| Ok(()))?;
    descriptor(schema, &[*account, *mint, *owner, SYSVAR_RENT_ID], data)
}

/// Token program `MintTo`. `authority` is the mint authority and must sign.
pub fn mint_to<A>(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: A,
) -> Result<InstructionDescriptor, BatchError>
where
    A: TryInto<Amount>,
    BatchError: From<A::Error>,
{
    let amount = to_amount(amount)?;
    let schema = Opcode::MintTo.schema();
    let data = encode_payload(schema, &[], |c| c.write_u64_le(amount).map(drop))?;
    descriptor(schema, &[*mint, *destination, *authority], data)
}

/// Token program `Transfer`. `owner` owns `source` and must sign.
pub fn transfer<A>(
    source: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: A,
) -> Result<InstructionDescriptor, BatchError>
where
    A: TryInto<Amount>,
    BatchError: From<A::Error>,
{
    let amount = to_amount(amount)?;
    let schema = Opcode::Transfer.schema();
    let data = encode_payload(schema, &[], |c| c.write_u64_le(amount).map(drop))?;
    descriptor(schema, &[*source, *destination, *owner], data)
}

impl TokenInstruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            TokenInstruction::CreateAccount { .. } => Opcode::CreateAccount,
            TokenInstruction::InitializeMint { .. } => Opcode::InitializeMint,
            TokenInstruction::InitializeAccount { .. } => Opcode::InitializeAccount,
            TokenInstruction::MintTo { .. } => Opcode::MintTo,
            TokenInstruction::Transfer { .. } => Opcode::Transfer,
        }
    }

    pub fn encode(&self) -> Result<InstructionDescriptor, BatchError> {
        match self {
            TokenInstruction::CreateAccount {
                payer,
                new_account,
                lamports,
                space,
                owner,
            } => create_account(payer, new_account, *lamports, *space, owner),
            TokenInstruction::InitializeMint {
                mint,
                decimals,
                mint_authority,
                freeze_authority,
            } => initialize_mint(mint, *decimals, mint_authority, *freeze_authority),
            TokenInstruction::InitializeAccount {
                account,
                mint,
                owner,
            } => initialize_account(account, mint, owner),
            TokenInstruction::MintTo {
                mint,
                destination,
                authority,
                amount,
            } => mint_to(mint, destination, authority, *amount),
            TokenInstruction::Transfer {
                source,
                destination,
                owner,
                amount,
            } => transfer(source, destination, owner, *amount),
        }
    }
}
