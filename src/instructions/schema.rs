//! Static opcode schema table.
//!
//! Each supported operation has exactly one [`OpcodeSchema`] describing its
//! tag, payload fields and positional account roles. The encoder allocates
//! from [`OpcodeSchema::payload_len`] and the decoder validates against it, so
//! the two cannot disagree about a layout.

use super::types::{AccountRef, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::BatchError;
use solana_pubkey::Pubkey;

/// Operation kinds, one per wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    CreateAccount,
    InitializeMint,
    InitializeAccount,
    MintTo,
    Transfer,
}

/// Opcode tag as laid out at offset 0. The System program uses a 4-byte
/// little-endian enum index, the Token program a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    U32(u32),
    U8(u8),
}

impl Tag {
    pub const fn width(&self) -> usize {
        match self {
            Tag::U32(_) => 4,
            Tag::U8(_) => 1,
        }
    }
}

/// A payload field after the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub width: usize,
    /// Optional fields are preceded by a 1-byte presence flag and only occupy
    /// `width` bytes when present.
    pub optional: bool,
}

impl Field {
    const fn fixed(name: &'static str, width: usize) -> Field {
        Field {
            name,
            width,
            optional: false,
        }
    }

    const fn optional(name: &'static str, width: usize) -> Field {
        Field {
            name,
            width,
            optional: true,
        }
    }
}

/// Role of one positional account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub name: &'static str,
    pub is_signer: bool,
    pub is_writable: bool,
}

const fn role(name: &'static str, is_signer: bool, is_writable: bool) -> Role {
    Role {
        name,
        is_signer,
        is_writable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeSchema {
    pub opcode: Opcode,
    pub program_id: Pubkey,
    pub tag: Tag,
    pub fields: &'static [Field],
    pub accounts: &'static [Role],
}

static CREATE_ACCOUNT: OpcodeSchema = OpcodeSchema {
    opcode: Opcode::CreateAccount,
    program_id: SYSTEM_PROGRAM_ID,
    tag: Tag::U32(0),
    fields: &[
        Field::fixed("lamports", 8),
        Field::fixed("space", 8),
        Field::fixed("owner", 32),
    ],
    accounts: &[role("payer", true, true), role("new_account", true, true)],
};

static INITIALIZE_MINT: OpcodeSchema = OpcodeSchema {
    opcode: Opcode::InitializeMint,
    program_id: TOKEN_PROGRAM_ID,
    tag: Tag::U8(0),
    fields: &[
        Field::fixed("decimals", 1),
        Field::fixed("mint_authority", 32),
        Field::optional("freeze_authority", 32),
    ],
    accounts: &[role("mint", false, true), role("rent_sysvar", false, false)],
};

static INITIALIZE_ACCOUNT: OpcodeSchema = OpcodeSchema {
    opcode: Opcode::InitializeAccount,
    program_id: TOKEN_PROGRAM_ID,
    tag: Tag::U8(1),
    fields: &[],
    accounts: &[
        role("account", false, true),
        role("mint", false, false),
        role("owner", false, false),
        role("rent_sysvar", false, false),
    ],
};

static TRANSFER: OpcodeSchema = OpcodeSchema {
    opcode: Opcode::Transfer,
    program_id: TOKEN_PROGRAM_ID,
    tag: Tag::U8(3),
    fields: &[Field::fixed("amount", 8)],
    accounts: &[
        role("source", false, true),
        role("destination", false, true),
        role("owner", true, false),
    ],
};

static MINT_TO: OpcodeSchema = OpcodeSchema {
    opcode: Opcode::MintTo,
    program_id: TOKEN_PROGRAM_ID,
    tag: Tag::U8(7),
    fields: &[Field::fixed("amount", 8)],
    accounts: &[
        role("mint", false, true),
        role("destination", false, true),
        role("authority", true, false),
    ],
};

impl Opcode {
    pub const ALL: [Opcode; 5] = [
        Opcode::CreateAccount,
        Opcode::InitializeMint,
        Opcode::InitializeAccount,
        Opcode::MintTo,
        Opcode::Transfer,
    ];

    pub fn schema(self) -> &'static OpcodeSchema {
        match self {
            Opcode::CreateAccount => &CREATE_ACCOUNT,
            Opcode::InitializeMint => &INITIALIZE_MINT,
            Opcode::InitializeAccount => &INITIALIZE_ACCOUNT,
            Opcode::MintTo => &MINT_TO,
            Opcode::Transfer => &TRANSFER,
        }
    }

    /// Look up the opcode addressed by a program id and its leading tag bytes.
    pub fn from_tag(program_id: &Pubkey, data: &[u8]) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| {
            let schema = op.schema();
            if schema.program_id != *program_id {
                return false;
            }
            match schema.tag {
                Tag::U32(tag) => data.get(..4) == Some(&tag.to_le_bytes()[..]),
                Tag::U8(tag) => data.first() == Some(&tag),
            }
        })
    }
}

impl OpcodeSchema {
    /// Payload length for the given presence of each optional field, in
    /// declaration order. Missing entries count as absent.
    pub fn payload_len(&self, present: &[bool]) -> usize {
        let mut optional_index = 0;
        self.fields.iter().fold(self.tag.width(), |len, field| {
            if field.optional {
                let is_present = present.get(optional_index).copied().unwrap_or(false);
                optional_index += 1;
                len + 1 + if is_present { field.width } else { 0 }
            } else {
                len + field.width
            }
        })
    }

    /// Smallest and largest payload this layout can produce.
    pub fn payload_len_range(&self) -> (usize, usize) {
        (self.payload_len(&[]), self.payload_len(&[true; 4]))
    }

    /// Attach the template roles to caller-supplied identities, position by
    /// position.
    pub fn account_refs(&self, keys: &[Pubkey]) -> Result<Vec<AccountRef>, BatchError> {
        if keys.len() != self.accounts.len() {
            return Err(BatchError::SchemaViolation {
                expected: self.accounts.len(),
                actual: keys.len(),
            });
        }
        Ok(self
            .accounts
            .iter()
            .zip(keys)
            .map(|(role, key)| AccountRef {
                pubkey: *key,
                is_signer: role.is_signer,
                is_writable: role.is_writable,
            })
            .collect())
    }
}
