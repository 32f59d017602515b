use alloy_primitives::U256;
use tracing::{debug, warn};

use crate::claim_id::{check_ordering, compose_claims};
use crate::config::VerifierConfig;
use crate::error::{ClaimError, Result};
use crate::event::{AttestedValueProvider, RegistrationEvent};
use crate::gadgets::select_from_idx;
use crate::name::decoded_name_length;
use crate::price::{slot_amount, TierIndicators};
use crate::referral::{check_referrals, referral_candidate};
use crate::{AggregateResult, ClaimBatch};

/// Verifies claim batches against one immutable configuration.
#[derive(Clone, Debug, Default)]
pub struct BatchVerifier {
    config: VerifierConfig,
}

impl BatchVerifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verifies every slot of `batch` and aggregates the result. Any failed
    /// check rejects the whole batch.
    pub fn verify<P: AttestedValueProvider>(
        &self,
        batch: &ClaimBatch,
        provider: &P,
    ) -> Result<AggregateResult> {
        self.verify_inner(batch, provider)
            .inspect_err(|e| warn!(error = %e, "claim batch rejected"))
    }

    fn verify_inner<P: AttestedValueProvider>(
        &self,
        batch: &ClaimBatch,
        provider: &P,
    ) -> Result<AggregateResult> {
        let max_claims = self.config.max_claims;
        let composed = compose_claims(batch, max_claims)?;
        check_ordering(&composed.claim_ids)?;

        let mut candidates = Vec::with_capacity(max_claims);
        let mut total_value = U256::ZERO;
        for i in 0..max_claims {
            let coords = batch.coordinates(i);
            let log = provider.event_log(&coords)?;
            let timestamp = provider.block_timestamp(&coords)?;

            let event = RegistrationEvent::from_log(i, &log, &self.config)?;
            candidates.push(referral_candidate(self.config.event, event.expires_at, timestamp));

            let decoded_len = decoded_name_length(i, &event.name, event.name_len)?;
            let amount = slot_amount(decoded_len, event.paid, composed.active[i]);
            debug!(
                slot = i,
                %coords,
                decoded_len,
                tier = ?TierIndicators::new(decoded_len).tier(),
                %amount,
                "verified claim slot"
            );
            total_value = total_value.checked_add(amount).ok_or(ClaimError::ValueOverflow)?;
        }

        let referrer_id =
            check_referrals(&candidates, &composed.active, self.config.referral_scope)?;
        let last_claim_id = select_from_idx(&composed.claim_ids, U256::from(batch.num_claims - 1));

        Ok(AggregateResult {
            first_claim_id: composed.claim_ids[0],
            last_claim_id,
            referrer_id,
            total_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim_id::compose_claim_id;
    use crate::config::{EventKind, ReferralScope, ENS_CONTRACT_ADDR};
    use crate::event::{encode_event_data, AttestedClaim, AttestedWitness, EventLog};
    use crate::referral::SECONDS_PER_DAY;
    use crate::{ClaimCoordinates, MAX_CLAIMS};
    use alloy_primitives::{address, B256};

    const NOW: u64 = 1_700_000_000;
    const YEAR: u64 = 365 * SECONDS_PER_DAY;

    struct Registration<'a> {
        coords: (u64, u64, u64),
        paid: u64,
        name: &'a [u8],
        referrer: u64,
    }

    fn reg(coords: (u64, u64, u64), paid: u64, name: &[u8]) -> Registration<'_> {
        Registration {
            coords,
            paid,
            name,
            referrer: 42,
        }
    }

    fn attest(kind: EventKind, regs: &[Registration<'_>]) -> (ClaimBatch, AttestedWitness) {
        let coords: Vec<_> = regs.iter().map(|r| r.coords).collect();
        let batch = ClaimBatch::padded(&coords);
        let claims = regs
            .iter()
            .map(|r| {
                let (block_number, tx_idx, log_idx) = r.coords;
                let expires = match kind {
                    EventKind::Registration => NOW + YEAR + r.referrer,
                    EventKind::Renewal => 20_000 * SECONDS_PER_DAY + r.referrer,
                };
                AttestedClaim {
                    coords: ClaimCoordinates {
                        block_number,
                        tx_idx,
                        log_idx,
                    },
                    timestamp: NOW,
                    log: EventLog {
                        emitter: ENS_CONTRACT_ADDR,
                        topic0: kind.schema(),
                        data: encode_event_data(kind, U256::from(r.paid), expires, r.name),
                    },
                }
            })
            .collect();
        (batch, AttestedWitness { claims })
    }

    fn verifier() -> BatchVerifier {
        BatchVerifier::default()
    }

    #[test]
    fn test_single_three_char_claim() {
        let (batch, witness) = attest(
            EventKind::Registration,
            &[reg((5147955, 31, 0), 1_000_000, b"abc")],
        );
        let result = verifier().verify(&batch, &witness).unwrap();

        let claim_id = compose_claim_id(&batch.coordinates(0));
        assert_eq!(result.first_claim_id, claim_id);
        assert_eq!(result.last_claim_id, claim_id);
        assert_eq!(result.referrer_id, U256::from(42u64));
        assert_eq!(result.total_value, U256::from(7812u64));
    }

    #[test]
    fn test_sum_volume() {
        let full = 0x1b40f2169b330u64;
        let four = 38_356_164_383_559_120u64;
        let (batch, witness) = attest(
            EventKind::Registration,
            &[
                reg((5750330, 8, 10), four, b"abc\xc3\xa9"),
                reg((5750508, 6, 10), full, b"alice"),
                reg((5750600, 0, 1), 999, b"ab"),
            ],
        );
        let result = verifier().verify(&batch, &witness).unwrap();

        assert_eq!(result.total_value, U256::from(four / 32 + full));
        assert_eq!(result.first_claim_id, compose_claim_id(&batch.coordinates(0)));
        assert_eq!(result.last_claim_id, compose_claim_id(&batch.coordinates(2)));
    }

    #[test]
    fn test_full_batch() {
        let regs: Vec<_> = (0..MAX_CLAIMS as u64)
            .map(|i| reg((100 + i, 0, 0), 1000, b"emoji"))
            .collect();
        let (batch, witness) = attest(EventKind::Registration, &regs);
        let result = verifier().verify(&batch, &witness).unwrap();

        assert_eq!(result.total_value, U256::from(1000 * MAX_CLAIMS as u64));
        assert_eq!(
            result.last_claim_id,
            compose_claim_id(&batch.coordinates(MAX_CLAIMS - 1))
        );
    }

    #[test]
    fn test_descending_claims_rejected() {
        let (batch, witness) = attest(
            EventKind::Registration,
            &[reg((200, 0, 0), 1000, b"alice"), reg((100, 0, 0), 1000, b"bobby")],
        );
        assert_eq!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::OrderingViolation { index: 1 })
        );
    }

    #[test]
    fn test_referral_mismatch_rejected() {
        let mut second = reg((101, 0, 0), 1000, b"bobby");
        second.referrer = 43;
        let (batch, witness) = attest(
            EventKind::Registration,
            &[reg((100, 0, 0), 1000, b"alice"), second],
        );
        assert!(matches!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::ReferralMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_padding_slots_use_scope() {
        let (mut batch, mut witness) = attest(
            EventKind::Registration,
            &[reg((100, 0, 0), 1000, b"alice"), reg((101, 0, 0), 1000, b"bobby")],
        );
        // Point the padding slots at a registration with a different referrer.
        let mut stray = reg((300, 0, 0), 5, b"carol");
        stray.referrer = 7;
        witness
            .claims
            .extend(attest(EventKind::Registration, &[stray]).1.claims);
        for i in 2..MAX_CLAIMS {
            batch.block_numbers[i] = 300;
        }

        assert!(matches!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::ReferralMismatch { index: 2, .. })
        ));

        let active_only = BatchVerifier::new(VerifierConfig {
            referral_scope: ReferralScope::ActiveOnly,
            ..Default::default()
        });
        let result = active_only.verify(&batch, &witness).unwrap();
        assert_eq!(result.referrer_id, U256::from(42u64));
        assert_eq!(result.total_value, U256::from(2000u64));
    }

    #[test]
    fn test_unexpected_emitter_rejected() {
        let (batch, mut witness) =
            attest(EventKind::Registration, &[reg((100, 0, 0), 1000, b"alice")]);
        witness.claims[0].log.emitter = address!("253553366da8546fc250f225fe3d25d0c782303b");
        assert!(matches!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::EmitterMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_long_name_priced_in_full() {
        let name = vec![b'a'; 300];
        let (batch, witness) = attest(EventKind::Registration, &[reg((100, 0, 0), 1000, &name)]);
        assert_eq!(witness.claims[0].log.data[4], B256::from(U256::from(300u64)));

        let result = verifier().verify(&batch, &witness).unwrap();
        assert_eq!(result.total_value, U256::from(1000u64));
    }

    #[test]
    fn test_missing_attestation_rejected() {
        let (batch, mut witness) = attest(
            EventKind::Registration,
            &[reg((100, 0, 0), 1000, b"alice"), reg((101, 0, 0), 1000, b"bobby")],
        );
        witness.claims.pop();
        assert!(matches!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::MissingAttestation { .. })
        ));
    }

    #[test]
    fn test_renewal_batch() {
        let (batch, witness) = attest(
            EventKind::Renewal,
            &[
                reg((5203518, 112, 1), 3_187_500_000_003_559, b"renewal"),
                reg((5647069, 120, 1), 713_999_999_999_953_018, b"four"),
            ],
        );
        let renewals = BatchVerifier::new(VerifierConfig {
            event: EventKind::Renewal,
            ..Default::default()
        });
        let result = renewals.verify(&batch, &witness).unwrap();
        assert_eq!(result.referrer_id, U256::from(42u64));
        assert_eq!(
            result.total_value,
            U256::from(3_187_500_000_003_559u64 + 713_999_999_999_953_018u64 / 32)
        );

        assert!(matches!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::EventSchemaMismatch { index: 0 })
        ));
    }

    #[test]
    fn test_invalid_claim_count() {
        let (mut batch, witness) =
            attest(EventKind::Registration, &[reg((100, 0, 0), 1000, b"alice")]);
        batch.num_claims = 11;
        assert!(matches!(
            verifier().verify(&batch, &witness),
            Err(ClaimError::InvalidClaimCount { num_claims: 11, .. })
        ));
    }
}
