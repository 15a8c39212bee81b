//! High-level transaction parser.
//!
//! Deserializes legacy transaction bytes and decodes each instruction that
//! belongs to this crate's opcode table. Anything else (other programs, other
//! System or Token opcodes) is kept as raw program id, accounts and data.

use crate::batch::FreshnessToken;
use crate::error::BatchError;
use crate::instructions::{decode_instruction, InstructionContext, TokenInstruction};
use crate::transaction::{Transaction, TransactionExt};
use solana_pubkey::Pubkey;

/// A decoded instruction, or the raw parts of one this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInstruction {
    Token(TokenInstruction),
    Unknown {
        program_id: Pubkey,
        accounts: Vec<Pubkey>,
        data: Vec<u8>,
    },
}

/// A parsed Solana transaction with decoded instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    /// First account key; pays the fee.
    pub fee_payer: Pubkey,

    /// Number of required signatures.
    pub num_signatures: u8,

    pub recent_blockhash: FreshnessToken,

    /// Instructions in execution order.
    pub instructions: Vec<ParsedInstruction>,

    pub account_keys: Vec<Pubkey>,

    /// Signatures as base58. Unsigned placeholder slots are empty strings.
    pub signatures: Vec<String>,
}

/// Parse a serialized legacy transaction.
pub fn parse_transaction(bytes: &[u8]) -> Result<ParsedTransaction, BatchError> {
    let tx = Transaction::from_bytes(bytes)?;
    parse_message(&tx)
}

/// Parse an already deserialized transaction.
pub fn parse_message(tx: &Transaction) -> Result<ParsedTransaction, BatchError> {
    let msg = &tx.message;
    let account_keys: Vec<Pubkey> = msg
        .account_keys
        .iter()
        .map(|k| Pubkey::new_from_array(k.to_bytes()))
        .collect();

    let fee_payer = *account_keys
        .first()
        .ok_or_else(|| BatchError::malformed("transaction has no account keys"))?;

    let mut instructions = Vec::with_capacity(msg.instructions.len());
    for (idx, compiled) in msg.instructions.iter().enumerate() {
        let program_id = *account_keys
            .get(compiled.program_id_index as usize)
            .ok_or_else(|| {
                BatchError::MalformedInstruction(format!(
                    "invalid program id index in instruction {}",
                    idx
                ))
            })?;

        let accounts = compiled
            .accounts
            .iter()
            .map(|&i| {
                account_keys.get(i as usize).copied().ok_or_else(|| {
                    BatchError::MalformedInstruction(format!(
                        "invalid account index {} in instruction {}",
                        i, idx
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ctx = InstructionContext {
            program_id: &program_id,
            accounts: &accounts,
            data: &compiled.data,
        };
        let parsed = match decode_instruction(ctx) {
            Ok(ix) => ParsedInstruction::Token(ix),
            Err(e) => {
                tracing::trace!(idx, %program_id, error = %e, "keeping raw instruction");
                ParsedInstruction::Unknown {
                    program_id,
                    accounts,
                    data: compiled.data.clone(),
                }
            }
        };
        instructions.push(parsed);
    }

    // All-zero signatures are unsigned slots.
    let signatures = tx
        .signatures
        .iter()
        .map(|s| {
            let bytes: &[u8] = s.as_ref();
            if bytes.iter().all(|&b| b == 0) {
                String::new()
            } else {
                s.to_string()
            }
        })
        .collect();

    Ok(ParsedTransaction {
        fee_payer,
        num_signatures: msg.header.num_required_signatures,
        recent_blockhash: FreshnessToken::new(msg.recent_blockhash),
        instructions,
        account_keys,
        signatures,
    })
}
