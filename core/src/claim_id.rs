//! Canonical claim identifiers and the ordering rule over them.

use alloy_primitives::U256;
use tracing::debug;

use crate::error::{ClaimError, Result};
use crate::gadgets::{is_less_than, is_zero, mul, or};
use crate::{ClaimBatch, ClaimCoordinates};

const SHIFT: usize = 64;

/// Packs coordinates as `(block * 2^64 + tx) * 2^64 + log`.
pub fn compose_claim_id(coords: &ClaimCoordinates) -> U256 {
    let id = (U256::from(coords.block_number) << SHIFT) + U256::from(coords.tx_idx);
    (id << SHIFT) + U256::from(coords.log_idx)
}

/// Inverse of [`compose_claim_id`]. Bits above 192 are ignored.
pub fn unpack_claim_id(id: U256) -> ClaimCoordinates {
    let limbs = id.as_limbs();
    ClaimCoordinates {
        block_number: limbs[2],
        tx_idx: limbs[1],
        log_idx: limbs[0],
    }
}

/// Claim identifiers of one batch, one entry per slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedClaims {
    /// Packed identifier, zero for padding slots.
    pub claim_ids: Vec<U256>,
    /// `1` for the first `num_claims` slots, `0` after.
    pub active: Vec<U256>,
}

/// Validates the batch shape and composes every slot's identifier.
pub fn compose_claims(batch: &ClaimBatch, max_claims: usize) -> Result<ComposedClaims> {
    if batch.num_claims == 0 || batch.num_claims > max_claims as u64 {
        return Err(ClaimError::InvalidClaimCount {
            num_claims: batch.num_claims,
            max_claims,
        });
    }
    for (field, len) in [
        ("block_numbers", batch.block_numbers.len()),
        ("tx_idxs", batch.tx_idxs.len()),
        ("log_idxs", batch.log_idxs.len()),
    ] {
        if len != max_claims {
            return Err(ClaimError::MalformedInput {
                field,
                len,
                expected: max_claims,
            });
        }
    }

    let num_claims = U256::from(batch.num_claims);
    let mut claim_ids = Vec::with_capacity(max_claims);
    let mut active = Vec::with_capacity(max_claims);
    for i in 0..max_claims {
        let id = compose_claim_id(&batch.coordinates(i));
        let in_range = is_less_than(U256::from(i), num_claims);
        claim_ids.push(mul(id, in_range));
        active.push(in_range);
    }
    debug!(num_claims = batch.num_claims, "composed claim identifiers");

    Ok(ComposedClaims { claim_ids, active })
}

/// Each identifier must exceed its predecessor unless it is the zero padding value.
pub fn check_ordering(claim_ids: &[U256]) -> Result<()> {
    for i in 1..claim_ids.len() {
        let is_less = is_less_than(claim_ids[i - 1], claim_ids[i]);
        if or(is_less, is_zero(claim_ids[i])) != U256::ONE {
            return Err(ClaimError::OrderingViolation { index: i });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_CLAIMS;

    fn batch(claims: &[(u64, u64, u64)]) -> ClaimBatch {
        ClaimBatch::padded(claims)
    }

    #[test]
    fn test_claim_id_round_trip() {
        for (b, t, l) in [
            (5147955, 31, 0),
            (1, 0, 0),
            (u64::MAX, u64::MAX, u64::MAX),
            (0, u64::MAX, 1),
        ] {
            let coords = ClaimCoordinates {
                block_number: b,
                tx_idx: t,
                log_idx: l,
            };
            let id = compose_claim_id(&coords);
            assert!(id.bit_len() <= 192);
            assert_eq!(unpack_claim_id(id), coords);
        }
    }

    #[test]
    fn test_claim_id_packing() {
        let coords = ClaimCoordinates {
            block_number: 2,
            tx_idx: 3,
            log_idx: 4,
        };
        let expected = U256::from(2u64) * (U256::ONE << 128)
            + U256::from(3u64) * (U256::ONE << 64)
            + U256::from(4u64);
        assert_eq!(compose_claim_id(&coords), expected);
    }

    #[test]
    fn test_padding_is_zero() {
        let composed = compose_claims(&batch(&[(100, 1, 2), (100, 1, 3)]), MAX_CLAIMS).unwrap();
        assert_eq!(composed.claim_ids.len(), MAX_CLAIMS);
        assert!(composed.claim_ids[..2].iter().all(|id| !id.is_zero()));
        assert!(composed.claim_ids[2..].iter().all(|id| id.is_zero()));
        assert_eq!(composed.active[1], U256::ONE);
        assert_eq!(composed.active[2], U256::ZERO);
        assert!(check_ordering(&composed.claim_ids).is_ok());
    }

    #[test]
    fn test_invalid_claim_count() {
        let mut b = batch(&[(100, 1, 2)]);
        b.num_claims = 0;
        assert!(matches!(
            compose_claims(&b, MAX_CLAIMS),
            Err(ClaimError::InvalidClaimCount { num_claims: 0, .. })
        ));
        b.num_claims = MAX_CLAIMS as u64 + 1;
        assert!(matches!(
            compose_claims(&b, MAX_CLAIMS),
            Err(ClaimError::InvalidClaimCount { .. })
        ));
        b.num_claims = MAX_CLAIMS as u64;
        assert!(compose_claims(&b, MAX_CLAIMS).is_ok());
    }

    #[test]
    fn test_incorrect_array_length() {
        let mut b = batch(&[(100, 1, 2)]);
        b.tx_idxs.pop();
        assert_eq!(
            compose_claims(&b, MAX_CLAIMS),
            Err(ClaimError::MalformedInput {
                field: "tx_idxs",
                len: MAX_CLAIMS - 1,
                expected: MAX_CLAIMS,
            })
        );
    }

    #[test]
    fn test_descending_claims_rejected() {
        let composed = compose_claims(&batch(&[(200, 0, 0), (100, 0, 0)]), MAX_CLAIMS).unwrap();
        assert_eq!(
            check_ordering(&composed.claim_ids),
            Err(ClaimError::OrderingViolation { index: 1 })
        );
    }

    #[test]
    fn test_duplicate_claims_rejected() {
        let composed =
            compose_claims(&batch(&[(100, 1, 1), (100, 2, 0), (100, 2, 0)]), MAX_CLAIMS).unwrap();
        assert_eq!(
            check_ordering(&composed.claim_ids),
            Err(ClaimError::OrderingViolation { index: 2 })
        );
    }

    #[test]
    fn test_log_index_orders_within_tx() {
        let claims = batch(&[(100, 1, 1), (100, 1, 2), (101, 0, 0)]);
        let composed = compose_claims(&claims, MAX_CLAIMS).unwrap();
        assert!(check_ordering(&composed.claim_ids).is_ok());
    }
}
