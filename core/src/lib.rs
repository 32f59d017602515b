use std::fmt;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

pub mod claim_id;
pub mod config;
pub mod error;
pub mod event;
pub mod gadgets;
pub mod name;
pub mod price;
pub mod referral;
pub mod verifier;

pub use config::{
    EventKind, ReferralScope, VerifierConfig, ENS_CONTRACT_ADDR, REGISTRATION_EVENT_SCHEMA,
    RENEWAL_EVENT_SCHEMA,
};
pub use error::{ClaimError, Result};
pub use event::{AttestedClaim, AttestedValueProvider, AttestedWitness, EventLog};
pub use verifier::BatchVerifier;

/// Number of claim slots in every batch
pub const MAX_CLAIMS: usize = 10;

/// Location of a claimed event log
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimCoordinates {
    pub block_number: u64,
    /// Transaction index within the block
    pub tx_idx: u64,
    /// Log index within the transaction receipt
    pub log_idx: u64,
}

impl fmt::Display for ClaimCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} tx {} log {}", self.block_number, self.tx_idx, self.log_idx)
    }
}

/// Input data for a claim batch proof
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBatch {
    pub block_numbers: Vec<u64>,
    pub tx_idxs: Vec<u64>,
    pub log_idxs: Vec<u64>,
    /// Number of leading slots that are real claims; the rest is padding
    pub num_claims: u64,
}

impl ClaimBatch {
    /// Builds a batch of [`MAX_CLAIMS`] slots from the active claims, filling
    /// the padding with copies of the last claim so every slot points at a
    /// real event.
    pub fn padded(claims: &[(u64, u64, u64)]) -> Self {
        let last = claims.last().copied().unwrap_or_default();
        let slot = |i: usize| claims.get(i).copied().unwrap_or(last);
        let slots: Vec<_> = (0..MAX_CLAIMS.max(claims.len())).map(slot).collect();
        Self {
            block_numbers: slots.iter().map(|s| s.0).collect(),
            tx_idxs: slots.iter().map(|s| s.1).collect(),
            log_idxs: slots.iter().map(|s| s.2).collect(),
            num_claims: claims.len() as u64,
        }
    }

    /// Coordinates of slot `i`. Missing entries read as zero.
    pub fn coordinates(&self, i: usize) -> ClaimCoordinates {
        let at = |v: &[u64]| v.get(i).copied().unwrap_or_default();
        ClaimCoordinates {
            block_number: at(&self.block_numbers),
            tx_idx: at(&self.tx_idxs),
            log_idx: at(&self.log_idxs),
        }
    }
}

/// Output data committed to the journal, as four big-endian words
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Identifier of the first claim
    pub first_claim_id: U256,
    /// Identifier of the last active claim
    pub last_claim_id: U256,
    pub referrer_id: U256,
    /// Sum of base payments over active claims
    pub total_value: U256,
}

impl AggregateResult {
    /// Size of the committed journal in bytes.
    pub const JOURNAL_LEN: usize = 4 * 32;

    /// The result as big-endian 32-byte words, in output order.
    pub fn to_callback_words(&self) -> [B256; 4] {
        [
            self.first_claim_id,
            self.last_claim_id,
            self.referrer_id,
            self.total_value,
        ]
        .map(B256::from)
    }

    /// Reads back a journal made of the four callback words. Returns `None`
    /// unless `bytes` is exactly [`Self::JOURNAL_LEN`] long.
    pub fn from_journal(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::JOURNAL_LEN {
            return None;
        }
        let word = |i: usize| U256::from_be_slice(&bytes[32 * i..32 * (i + 1)]);
        Some(Self {
            first_claim_id: word(0),
            last_claim_id: word(1),
            referrer_id: word(2),
            total_value: word(3),
        })
    }
}

/// Everything the guest reads
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuestInput {
    pub config: VerifierConfig,
    pub batch: ClaimBatch,
    pub witness: AttestedWitness,
}
