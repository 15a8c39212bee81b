//! Account sizes and rent-exempt funding for allocated accounts.
//!
//! The byte sizes live next to the opcode schema so that the space requested
//! by `CreateAccount` always matches what the Token program expects for the
//! account it will initialize.

use crate::error::BatchError;
use crate::instructions::{self, InstructionDescriptor, TOKEN_PROGRAM_ID};
use solana_pubkey::Pubkey;

/// Size of a packed SPL Token mint.
pub const MINT_ACCOUNT_SPACE: u64 = 82;
/// Size of a packed SPL Token account.
pub const TOKEN_ACCOUNT_SPACE: u64 = 165;

/// Decimals conventionally used for new mints. A caller policy only; the
/// encoder accepts any `u8`.
pub const DEFAULT_DECIMALS: u8 = 9;

/// Kinds of account this crate allocates for the Token program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Mint,
    TokenAccount,
}

impl AccountKind {
    pub fn space(self) -> u64 {
        match self {
            AccountKind::Mint => MINT_ACCOUNT_SPACE,
            AccountKind::TokenAccount => TOKEN_ACCOUNT_SPACE,
        }
    }
}

/// Source of the minimum balance that keeps an account of `space` bytes
/// exempt from rent. Usually backed by an RPC query.
pub trait RentSource {
    type Error: From<BatchError>;

    fn minimum_balance(&self, space: u64) -> Result<u64, Self::Error>;
}

/// Offline rent using the runtime's default parameters.
///
/// `(ACCOUNT_STORAGE_OVERHEAD + space) * LAMPORTS_PER_BYTE_YEAR * EXEMPTION_THRESHOLD_YEARS`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRent;

impl DefaultRent {
    pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;
    pub const LAMPORTS_PER_BYTE_YEAR: u64 = 3480;
    pub const EXEMPTION_THRESHOLD_YEARS: u64 = 2;
}

impl RentSource for DefaultRent {
    type Error = BatchError;

    fn minimum_balance(&self, space: u64) -> Result<u64, BatchError> {
        Self::ACCOUNT_STORAGE_OVERHEAD
            .checked_add(space)
            .and_then(|bytes| bytes.checked_mul(Self::LAMPORTS_PER_BYTE_YEAR))
            .and_then(|per_year| per_year.checked_mul(Self::EXEMPTION_THRESHOLD_YEARS))
            .ok_or_else(|| {
                BatchError::DomainViolation(format!(
                    "rent for {} bytes overflows the lamport range",
                    space
                ))
            })
    }
}

/// Allocate an account of `kind` for the Token program, funded with the
/// rent-exempt minimum reported by `rent`.
pub fn create_account_for<R: RentSource + ?Sized>(
    rent: &R,
    kind: AccountKind,
    payer: &Pubkey,
    new_account: &Pubkey,
) -> Result<InstructionDescriptor, R::Error> {
    let lamports = rent.minimum_balance(kind.space())?;
    tracing::trace!(?kind, lamports, "funding new token-program account");
    Ok(instructions::create_account(
        payer,
        new_account,
        lamports,
        kind.space(),
        &TOKEN_PROGRAM_ID,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::TokenInstruction;
    use std::cell::RefCell;

    #[test]
    fn test_default_rent_matches_runtime_defaults() {
        assert_eq!(DefaultRent.minimum_balance(MINT_ACCOUNT_SPACE).unwrap(), 1_461_600);
        assert_eq!(DefaultRent.minimum_balance(TOKEN_ACCOUNT_SPACE).unwrap(), 2_039_280);
        assert_eq!(DefaultRent.minimum_balance(0).unwrap(), 890_880);
        assert!(DefaultRent.minimum_balance(u64::MAX).is_err());
    }

    /// Records which sizes were requested.
    struct RecordingRent {
        requested: RefCell<Vec<u64>>,
    }

    impl RentSource for RecordingRent {
        type Error = BatchError;

        fn minimum_balance(&self, space: u64) -> Result<u64, BatchError> {
            self.requested.borrow_mut().push(space);
            Ok(space * 10)
        }
    }

    #[test]
    fn test_create_account_for_requests_kind_size() {
        let rent = RecordingRent {
            requested: RefCell::new(Vec::new()),
        };
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let account = Pubkey::new_unique();

        let mint_ix = create_account_for(&rent, AccountKind::Mint, &payer, &mint).unwrap();
        let account_ix =
            create_account_for(&rent, AccountKind::TokenAccount, &payer, &account).unwrap();

        assert_eq!(*rent.requested.borrow(), vec![82, 165]);
        assert_eq!(
            TokenInstruction::decode(&mint_ix).unwrap(),
            TokenInstruction::CreateAccount {
                payer,
                new_account: mint,
                lamports: 820,
                space: 82,
                owner: TOKEN_PROGRAM_ID,
            }
        );
        assert_eq!(
            TokenInstruction::decode(&account_ix).unwrap(),
            TokenInstruction::CreateAccount {
                payer,
                new_account: account,
                lamports: 1650,
                space: 165,
                owner: TOKEN_PROGRAM_ID,
            }
        );
    }
}
