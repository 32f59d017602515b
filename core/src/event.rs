//! Attested event values and the provider interface that supplies them.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::config::{EventKind, VerifierConfig};
use crate::error::{ClaimError, Result};
use crate::gadgets::range_check;
use crate::name::NameWord;
use crate::ClaimCoordinates;

/// A receipt log as returned by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pub emitter: Address,
    pub topic0: B256,
    /// ABI data words of the log.
    pub data: Vec<B256>,
}

/// Supplies block and receipt values that are already bound to the claimed
/// coordinates. The verifier does not re-check that binding.
pub trait AttestedValueProvider {
    /// Timestamp of the block containing the claimed transaction.
    fn block_timestamp(&self, coords: &ClaimCoordinates) -> Result<u64>;

    /// The log at the claimed coordinates.
    fn event_log(&self, coords: &ClaimCoordinates) -> Result<EventLog>;
}

/// One provider answer, recorded so it can be replayed inside the guest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestedClaim {
    pub coords: ClaimCoordinates,
    pub timestamp: u64,
    pub log: EventLog,
}

/// Recorded provider answers for one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestedWitness {
    pub claims: Vec<AttestedClaim>,
}

impl AttestedWitness {
    /// Records the provider's answers for every slot in `coords`, skipping
    /// repeated coordinates.
    pub fn record<P: AttestedValueProvider>(
        provider: &P,
        coords: &[ClaimCoordinates],
    ) -> Result<Self> {
        let mut witness = Self::default();
        for c in coords {
            if witness.find(c).is_some() {
                continue;
            }
            witness.claims.push(AttestedClaim {
                coords: *c,
                timestamp: provider.block_timestamp(c)?,
                log: provider.event_log(c)?,
            });
        }
        Ok(witness)
    }

    fn find(&self, coords: &ClaimCoordinates) -> Option<&AttestedClaim> {
        self.claims.iter().find(|c| c.coords == *coords)
    }
}

impl AttestedValueProvider for AttestedWitness {
    fn block_timestamp(&self, coords: &ClaimCoordinates) -> Result<u64> {
        self.find(coords)
            .map(|c| c.timestamp)
            .ok_or(ClaimError::MissingAttestation { coords: *coords })
    }

    fn event_log(&self, coords: &ClaimCoordinates) -> Result<EventLog> {
        self.find(coords)
            .map(|c| c.log.clone())
            .ok_or(ClaimError::MissingAttestation { coords: *coords })
    }
}

/// The fields of one controller event the verifier works with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationEvent {
    pub emitter: Address,
    pub expires_at: u64,
    pub paid: U256,
    /// Raw byte length of the name.
    pub name_len: u64,
    pub name: NameWord,
}

impl RegistrationEvent {
    /// Checks emitter and schema, then reads the fields at the layout of `config.event`.
    pub fn from_log(index: usize, log: &EventLog, config: &VerifierConfig) -> Result<Self> {
        if log.emitter != config.contract {
            return Err(ClaimError::EmitterMismatch {
                index,
                found: log.emitter,
            });
        }
        if log.topic0 != config.event.schema() {
            return Err(ClaimError::EventSchemaMismatch { index });
        }

        let layout = config.event.layout();
        let word = |offset: usize, field: &'static str| {
            log.data
                .get(offset)
                .copied()
                .ok_or(ClaimError::MalformedEvent { index, field })
        };
        let small = |offset: usize, field: &'static str| {
            let value = U256::from_be_bytes(word(offset, field)?.0);
            if !range_check(value, 64) {
                return Err(ClaimError::MalformedEvent { index, field });
            }
            Ok(value.as_limbs()[0])
        };

        Ok(Self {
            emitter: log.emitter,
            expires_at: small(layout.expires, "expires")?,
            paid: U256::from_be_bytes(word(layout.paid, "paid")?.0),
            name_len: small(layout.name_len, "name_len")?,
            name: NameWord::from(word(layout.name, "name")?),
        })
    }
}

/// ABI data words of a controller event carrying `name`, for building
/// attestation fixtures.
pub fn encode_event_data(kind: EventKind, paid: U256, expires: u64, name: &[u8]) -> Vec<B256> {
    let layout = kind.layout();
    let mut data = vec![B256::ZERO; layout.name + 1];
    // Offset of the dynamic `name` argument, which is the first word of the tail.
    data[0] = B256::from(U256::from(32 * layout.name_len));
    data[layout.paid] = B256::from(paid);
    data[layout.expires] = B256::from(U256::from(expires));
    data[layout.name_len] = B256::from(U256::from(name.len()));
    let mut padded = [0u8; 32];
    let n = name.len().min(32);
    padded[..n].copy_from_slice(&name[..n]);
    data[layout.name] = B256::from(padded);
    data
}
