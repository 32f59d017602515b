use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::ClaimCoordinates;

/// Every way a claim batch can be rejected. Any of these aborts the whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("invalid claim count: {num_claims} (expected 0 < n <= {max_claims})")]
    InvalidClaimCount { num_claims: u64, max_claims: usize },

    #[error("incorrect claim array length: {field} has {len} entries, expected {expected}")]
    MalformedInput {
        field: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("claim {index} is not strictly greater than claim {}", .index - 1)]
    OrderingViolation { index: usize },

    #[error("inconsistent referral code: claim {index} has {found}, expected {expected}")]
    ReferralMismatch {
        index: usize,
        expected: U256,
        found: U256,
    },

    #[error("registration duration of claim {index} is out of range")]
    ReferralOutOfRange { index: usize },

    #[error("event from unexpected contract: claim {index} emitted by {found}")]
    EmitterMismatch { index: usize, found: Address },

    #[error("event schema mismatch for claim {index}")]
    EventSchemaMismatch { index: usize },

    #[error("name bytes of claim {index} do not match the event data")]
    NameEncodingMismatch { index: usize },

    #[error("event field `{field}` of claim {index} is malformed")]
    MalformedEvent { index: usize, field: &'static str },

    #[error("no attested value for {coords}")]
    MissingAttestation { coords: ClaimCoordinates },

    #[error("total value overflows 256 bits")]
    ValueOverflow,
}

pub type Result<T> = core::result::Result<T, ClaimError>;
