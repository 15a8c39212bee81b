//! Atomic batch composition.
//!
//! A [`Batch`] is an ordered, append-only list of instruction descriptors that
//! the runtime executes as one unit: either every instruction applies or none
//! does. The composer never reorders. Callers are responsible for putting
//! producers before consumers (allocate, then initialize, then mint, then
//! transfer), since a later instruction can only see the effects of earlier
//! ones.
//!
//! Lifecycle:
//!
//! 1. `append` descriptors (and `set_fee_payer`) while building
//! 2. `finalize` with a freshness token; the batch is then immutable
//! 3. `verify_signers` / hand off to [`crate::transaction`] for signing

use crate::error::BatchError;
use crate::instructions::InstructionDescriptor;
use solana_pubkey::Pubkey;
use solana_sdk::hash::Hash;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Recent blockhash proving the batch was built recently. Opaque to the
/// composer; only compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreshnessToken(Hash);

impl FreshnessToken {
    pub fn new(hash: Hash) -> Self {
        FreshnessToken(hash)
    }

    pub fn hash(&self) -> &Hash {
        &self.0
    }
}

impl From<Hash> for FreshnessToken {
    fn from(hash: Hash) -> Self {
        FreshnessToken(hash)
    }
}

impl FromStr for FreshnessToken {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(BatchError::state("missing freshness token"));
        }
        s.parse::<Hash>()
            .map(FreshnessToken)
            .map_err(|_| BatchError::DomainViolation(format!("Invalid blockhash: {}", s)))
    }
}

impl fmt::Display for FreshnessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Building,
    Finalized(FreshnessToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    instructions: Vec<InstructionDescriptor>,
    fee_payer: Option<Pubkey>,
    state: State,
}

impl Default for Batch {
    fn default() -> Self {
        Batch::new()
    }
}

impl Batch {
    pub fn new() -> Self {
        Batch {
            instructions: Vec::new(),
            fee_payer: None,
            state: State::Building,
        }
    }

    pub fn with_fee_payer(fee_payer: Pubkey) -> Self {
        Batch {
            fee_payer: Some(fee_payer),
            ..Batch::new()
        }
    }

    fn ensure_building(&self, action: &str) -> Result<(), BatchError> {
        match self.state {
            State::Building => Ok(()),
            State::Finalized(_) => Err(BatchError::BatchState(format!(
                "cannot {} a finalized batch",
                action
            ))),
        }
    }

    /// Append `instruction` at the end of the execution order.
    pub fn append(&mut self, instruction: InstructionDescriptor) -> Result<(), BatchError> {
        self.ensure_building("append to")?;
        self.instructions.push(instruction);
        Ok(())
    }

    /// Append several instructions, all or none.
    pub fn extend<I>(&mut self, instructions: I) -> Result<(), BatchError>
    where
        I: IntoIterator<Item = InstructionDescriptor>,
    {
        self.ensure_building("append to")?;
        self.instructions.extend(instructions);
        Ok(())
    }

    pub fn set_fee_payer(&mut self, fee_payer: Pubkey) -> Result<(), BatchError> {
        self.ensure_building("change the fee payer of")?;
        self.fee_payer = Some(fee_payer);
        Ok(())
    }

    /// Seal the batch with `token`.
    ///
    /// Fails if there are no instructions or no fee payer. Finalizing again
    /// with the same token is a no-op; a different token means the batch went
    /// stale and must be rebuilt.
    pub fn finalize(&mut self, token: FreshnessToken) -> Result<(), BatchError> {
        if let State::Finalized(current) = &self.state {
            return if *current == token {
                Ok(())
            } else {
                Err(BatchError::StaleFreshnessToken)
            };
        }
        if self.instructions.is_empty() {
            return Err(BatchError::state("cannot finalize an empty batch"));
        }
        let fee_payer = self
            .fee_payer
            .ok_or_else(|| BatchError::state("cannot finalize without a fee payer"))?;

        tracing::debug!(
            instructions = self.instructions.len(),
            %fee_payer,
            freshness = %token,
            "finalized batch"
        );
        self.state = State::Finalized(token);
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized(_))
    }

    pub fn instructions(&self) -> &[InstructionDescriptor] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.fee_payer.as_ref()
    }

    pub fn freshness_token(&self) -> Option<&FreshnessToken> {
        match &self.state {
            State::Building => None,
            State::Finalized(token) => Some(token),
        }
    }

    /// Deduplicated signer identities across all instructions, in order of
    /// first appearance.
    pub fn required_signers(&self) -> Vec<Pubkey> {
        let mut seen = HashSet::new();
        self.instructions
            .iter()
            .flat_map(InstructionDescriptor::signers)
            .filter(|key| seen.insert(**key))
            .copied()
            .collect()
    }

    /// Check that `available` covers the fee payer and every required signer.
    ///
    /// Only meaningful on a finalized batch, so that a failure here is caught
    /// locally instead of after a round trip to the runtime.
    pub fn verify_signers(&self, available: &[Pubkey]) -> Result<(), BatchError> {
        let fee_payer = self.finalized_fee_payer()?;
        let available: HashSet<&Pubkey> = available.iter().collect();
        std::iter::once(fee_payer)
            .chain(self.required_signers())
            .find(|key| !available.contains(key))
            .map_or(Ok(()), |missing| Err(BatchError::UnsatisfiedSigner(missing)))
    }

    /// Fee payer of a finalized batch.
    pub(crate) fn finalized_fee_payer(&self) -> Result<Pubkey, BatchError> {
        match (&self.state, self.fee_payer) {
            (State::Finalized(_), Some(fee_payer)) => Ok(fee_payer),
            _ => Err(BatchError::state("batch is not finalized")),
        }
    }
}
