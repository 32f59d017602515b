//! Referral codes.
//!
//! A referrer is identified by the number of seconds, modulo a day, that a
//! registration's duration carries beyond whole days. Every claim in a batch
//! has to carry the same code.

use alloy_primitives::U256;
use tracing::debug;

use crate::config::{EventKind, ReferralScope};
use crate::error::{ClaimError, Result};
use crate::gadgets::{is_equal, range_check};

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Durations wider than this cannot come from a real registration.
const DURATION_BITS: usize = 50;

/// The referral code carried by one event, or `None` if its duration is
/// negative or out of range.
pub fn referral_candidate(kind: EventKind, expires_at: u64, timestamp: u64) -> Option<U256> {
    let expires = U256::from(expires_at);
    let duration = if kind.uses_duration() {
        expires - U256::from(timestamp)
    } else {
        expires
    };
    range_check(duration, DURATION_BITS).then(|| duration % U256::from(SECONDS_PER_DAY))
}

/// Fixes the referrer from slot 0 and checks every other slot in `scope`
/// agrees with it. Slots outside the scope are not inspected.
pub fn check_referrals(
    candidates: &[Option<U256>],
    active: &[U256],
    scope: ReferralScope,
) -> Result<U256> {
    let mut referrer_id = U256::ZERO;
    for (i, candidate) in candidates.iter().enumerate() {
        let in_scope = match scope {
            ReferralScope::AllSlots => true,
            ReferralScope::ActiveOnly => active[i] == U256::ONE,
        };
        if !in_scope {
            continue;
        }
        let candidate = candidate.ok_or(ClaimError::ReferralOutOfRange { index: i })?;
        if i == 0 {
            referrer_id = candidate;
        } else if is_equal(referrer_id, candidate) != U256::ONE {
            return Err(ClaimError::ReferralMismatch {
                index: i,
                expected: referrer_id,
                found: candidate,
            });
        }
    }
    debug!(%referrer_id, "referral code consistent across batch");
    Ok(referrer_id)
}
