//! Instruction value types shared by the encoder, decoder and batch composer.

use crate::error::BatchError;
use solana_pubkey::{pubkey, Pubkey};
use std::convert::Infallible;
use std::str::FromStr;

/// System program: owns account allocation.
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");
/// SPL Token program: mint and token-account operations.
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
/// Associated Token Account program (address derivation only).
pub const ATA_PROGRAM_ID: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
/// Rent sysvar, passed read-only to the initialize instructions.
pub const SYSVAR_RENT_ID: Pubkey = pubkey!("SysvarRent111111111111111111111111111111111");

/// One positional account of an instruction with its role flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountRef {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Encoder output: target program, ordered accounts, payload.
///
/// Immutable once built. Appending it to a [`Batch`](crate::batch::Batch)
/// moves it into the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDescriptor {
    program_id: Pubkey,
    accounts: Vec<AccountRef>,
    data: Box<[u8]>,
}

impl InstructionDescriptor {
    pub(crate) fn new(program_id: Pubkey, accounts: Vec<AccountRef>, data: Vec<u8>) -> Self {
        InstructionDescriptor {
            program_id,
            accounts,
            data: data.into_boxed_slice(),
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn accounts(&self) -> &[AccountRef] {
        &self.accounts
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Identities this instruction needs a signature from, in account order.
    pub fn signers(&self) -> impl Iterator<Item = &Pubkey> {
        self.accounts
            .iter()
            .filter(|a| a.is_signer)
            .map(|a| &a.pubkey)
    }
}

/// Optional freeze authority of a mint.
///
/// The variant alone decides both the 1-byte discriminant and how many bytes
/// follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreezeAuthority {
    #[default]
    None,
    Some(Pubkey),
}

impl FreezeAuthority {
    pub fn discriminant(&self) -> u8 {
        match self {
            FreezeAuthority::None => 0,
            FreezeAuthority::Some(_) => 1,
        }
    }

    /// Bytes occupied in the payload, discriminant included.
    pub fn encoded_len(&self) -> usize {
        match self {
            FreezeAuthority::None => 1,
            FreezeAuthority::Some(_) => 1 + 32,
        }
    }

    pub fn as_option(&self) -> Option<&Pubkey> {
        match self {
            FreezeAuthority::None => None,
            FreezeAuthority::Some(key) => Some(key),
        }
    }
}

impl From<Option<Pubkey>> for FreezeAuthority {
    fn from(value: Option<Pubkey>) -> Self {
        value.map_or(FreezeAuthority::None, FreezeAuthority::Some)
    }
}

/// Token or lamport quantity, guaranteed to fit an unsigned 64-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    pub fn get(self) -> u64 {
        self.0
    }
}

macro_rules! amount_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Amount {
            fn from(value: $t) -> Self {
                Amount(u64::from(value))
            }
        }
    )*};
}

macro_rules! amount_try_from_wide {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for Amount {
            type Error = BatchError;

            fn try_from(value: $t) -> Result<Self, Self::Error> {
                u64::try_from(value).map(Amount).map_err(|_| {
                    BatchError::DomainViolation(format!(
                        "amount {} is outside the unsigned 64-bit range",
                        value
                    ))
                })
            }
        }
    )*};
}

amount_from_unsigned!(u8, u16, u32, u64);
amount_try_from_wide!(i32, i64, i128, u128, usize);

impl FromStr for Amount {
    type Err = BatchError;

    /// Parse a base-10 string. Signs and values past `u64::MAX` are rejected
    /// rather than wrapped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            return Ok(Amount(value));
        }
        match trimmed.parse::<i128>() {
            Ok(wide) => Amount::try_from(wide),
            Err(_) => Err(BatchError::DomainViolation(format!(
                "amount {:?} is not a base-10 integer",
                s
            ))),
        }
    }
}

impl From<Infallible> for BatchError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Typed form of every supported operation. Closed: adding an operation is a
/// compile-time exhaustiveness question for every `match` below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenInstruction {
    /// System program account allocation.
    CreateAccount {
        payer: Pubkey,
        new_account: Pubkey,
        lamports: u64,
        space: u64,
        owner: Pubkey,
    },
    InitializeMint {
        mint: Pubkey,
        decimals: u8,
        mint_authority: Pubkey,
        freeze_authority: FreezeAuthority,
    },
    InitializeAccount {
        account: Pubkey,
        mint: Pubkey,
        owner: Pubkey,
    },
    MintTo {
        mint: Pubkey,
        destination: Pubkey,
        authority: Pubkey,
        amount: u64,
    },
    Transfer {
        source: Pubkey,
        destination: Pubkey,
        owner: Pubkey,
        amount: u64,
    },
}
