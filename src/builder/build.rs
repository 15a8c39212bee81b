//! Batch building from an intent.
//!
//! Every instruction is encoded before anything is appended, so a bad field
//! anywhere in the intent fails the whole build and no partial batch escapes.

use crate::batch::{Batch, FreshnessToken};
use crate::error::BatchError;
use crate::instructions::{self, Amount, FreezeAuthority, InstructionDescriptor};
use crate::pubkey::parse_identity;
use crate::rent::{self, AccountKind, DefaultRent, RentSource};
use crate::transaction::TransactionExt;
use solana_pubkey::Pubkey;

use super::types::{BatchIntent, Instruction as IntentInstruction};

/// Build and finalize a batch from an intent structure.
pub fn build_batch(intent: BatchIntent) -> Result<Batch, BatchError> {
    let fee_payer = parse_identity("feePayer", &intent.fee_payer)?;
    let token: FreshnessToken = intent.recent_blockhash.parse()?;

    let instructions = intent
        .instructions
        .into_iter()
        .map(build_instruction)
        .collect::<Result<Vec<_>, _>>()?;

    let mut batch = Batch::with_fee_payer(fee_payer);
    batch.extend(instructions)?;
    batch.finalize(token)?;
    Ok(batch)
}

/// Build a batch from an intent and return the serialized unsigned
/// transaction (wire format).
pub fn build_transaction(intent: BatchIntent) -> Result<Vec<u8>, BatchError> {
    let batch = build_batch(intent)?;
    let tx = batch.to_transaction()?;
    tracing::debug!(
        instructions = batch.len(),
        signers = tx.message.header.num_required_signatures,
        "built unsigned batch transaction"
    );
    tx.to_bytes()
}

fn parse_amount(field: &str, value: &str) -> Result<Amount, BatchError> {
    value
        .parse::<Amount>()
        .map_err(|e| BatchError::DomainViolation(format!("{}: {}", field, e)))
}

/// Allocate a Token-program account of `kind`, funded with `lamports` when the
/// intent overrides it and with the default rent-exempt minimum otherwise.
fn create_funded_account(
    field: &str,
    lamports: Option<&str>,
    kind: AccountKind,
    payer: &Pubkey,
    new_account: &Pubkey,
) -> Result<InstructionDescriptor, BatchError> {
    match lamports {
        Some(value) => {
            let fixed = FixedRent(parse_amount(field, value)?);
            rent::create_account_for(&fixed, kind, payer, new_account)
        }
        None => rent::create_account_for(&DefaultRent, kind, payer, new_account),
    }
}

/// Build a single instruction from the IntentInstruction enum.
fn build_instruction(ix: IntentInstruction) -> Result<InstructionDescriptor, BatchError> {
    match ix {
        // ===== System Program =====
        IntentInstruction::CreateAccount {
            payer,
            new_account,
            lamports,
            space,
            owner,
        } => {
            let payer = parse_identity("createAccount.payer", &payer)?;
            let new_account = parse_identity("createAccount.newAccount", &new_account)?;
            let owner = parse_identity("createAccount.owner", &owner)?;
            let lamports = parse_amount("createAccount.lamports", &lamports)?;
            instructions::create_account(&payer, &new_account, lamports, space, &owner)
        }

        IntentInstruction::CreateMintAccount {
            payer,
            mint,
            lamports,
        } => {
            let payer = parse_identity("createMintAccount.payer", &payer)?;
            let mint = parse_identity("createMintAccount.mint", &mint)?;
            create_funded_account(
                "createMintAccount.lamports",
                lamports.as_deref(),
                AccountKind::Mint,
                &payer,
                &mint,
            )
        }

        IntentInstruction::CreateTokenAccount {
            payer,
            account,
            lamports,
        } => {
            let payer = parse_identity("createTokenAccount.payer", &payer)?;
            let account = parse_identity("createTokenAccount.account", &account)?;
            create_funded_account(
                "createTokenAccount.lamports",
                lamports.as_deref(),
                AccountKind::TokenAccount,
                &payer,
                &account,
            )
        }

        // ===== SPL Token Program =====
        IntentInstruction::InitializeMint {
            mint,
            decimals,
            mint_authority,
            freeze_authority,
        } => {
            let mint = parse_identity("initializeMint.mint", &mint)?;
            let mint_authority = parse_identity("initializeMint.mintAuthority", &mint_authority)?;
            let freeze_authority = match freeze_authority.as_deref() {
                None | Some("") => FreezeAuthority::None,
                Some(value) => FreezeAuthority::Some(parse_identity(
                    "initializeMint.freezeAuthority",
                    value,
                )?),
            };
            instructions::initialize_mint(&mint, decimals, &mint_authority, freeze_authority)
        }

        IntentInstruction::InitializeAccount {
            account,
            mint,
            owner,
        } => {
            let account = parse_identity("initializeAccount.account", &account)?;
            let mint = parse_identity("initializeAccount.mint", &mint)?;
            let owner = parse_identity("initializeAccount.owner", &owner)?;
            instructions::initialize_account(&account, &mint, &owner)
        }

        IntentInstruction::MintTo {
            mint,
            destination,
            authority,
            amount,
        } => {
            let mint = parse_identity("mintTo.mint", &mint)?;
            let destination = parse_identity("mintTo.destination", &destination)?;
            let authority = parse_identity("mintTo.authority", &authority)?;
            let amount = parse_amount("mintTo.amount", &amount)?;
            instructions::mint_to(&mint, &destination, &authority, amount)
        }

        IntentInstruction::Transfer {
            source,
            destination,
            owner,
            amount,
        } => {
            let source = parse_identity("transfer.source", &source)?;
            let destination = parse_identity("transfer.destination", &destination)?;
            let owner = parse_identity("transfer.owner", &owner)?;
            let amount = parse_amount("transfer.amount", &amount)?;
            instructions::transfer(&source, &destination, &owner, amount)
        }
    }
}

/// Rent source that reports a balance already settled by the intent.
struct FixedRent(Amount);

impl RentSource for FixedRent {
    type Error = BatchError;

    fn minimum_balance(&self, _space: u64) -> Result<u64, BatchError> {
        Ok(self.0.get())
    }
}
