use alloy_primitives::{address, b256, Address, B256};
use serde::{Deserialize, Serialize};

use crate::MAX_CLAIMS;

/// ENS ETHRegistrarController on Sepolia.
pub const ENS_CONTRACT_ADDR: Address = address!("fed6a969aaa60e4961fcd3ebf1a2e8913ac65b72");

/// Topic 0 of `NameRegistered` logs emitted by the controller.
pub const REGISTRATION_EVENT_SCHEMA: B256 =
    b256!("b3d987963d01b2f68493b4bdb130988f157ea43070d4ad840fee0466ed9370d9");

/// Topic 0 of `NameRenewed(string,bytes32,uint256,uint256)`.
pub const RENEWAL_EVENT_SCHEMA: B256 =
    b256!("3da24c024582931cfaf8267d8ed24d13a82a8068d5bd337d30ec45cea4e506ae");

/// Data word offsets of the fields the verifier reads from an event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventLayout {
    pub paid: usize,
    pub expires: usize,
    pub name_len: usize,
    pub name: usize,
}

/// The controller event a batch is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `NameRegistered`. The referral code is read from the registration duration.
    #[default]
    Registration,
    /// `NameRenewed`. The referral code is read from the new expiry alone.
    Renewal,
}

impl EventKind {
    /// Topic 0 the claimed logs must carry.
    pub fn schema(&self) -> B256 {
        match self {
            EventKind::Registration => REGISTRATION_EVENT_SCHEMA,
            EventKind::Renewal => RENEWAL_EVENT_SCHEMA,
        }
    }

    pub fn layout(&self) -> EventLayout {
        match self {
            EventKind::Registration => EventLayout {
                paid: 1,
                expires: 3,
                name_len: 4,
                name: 5,
            },
            EventKind::Renewal => EventLayout {
                paid: 1,
                expires: 2,
                name_len: 3,
                name: 4,
            },
        }
    }

    /// Whether the block timestamp is subtracted from the expiry before
    /// deriving the referral code.
    pub fn uses_duration(&self) -> bool {
        matches!(self, EventKind::Registration)
    }
}

/// Which slots the referral code must agree across.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralScope {
    /// Every slot up to `max_claims`, padding included.
    #[default]
    AllSlots,
    /// Only the first `num_claims` slots.
    ActiveOnly,
}

/// Immutable verifier settings, fixed when the verifier is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// The only contract allowed to emit claimed events.
    pub contract: Address,
    pub event: EventKind,
    /// Fixed number of slots in every batch.
    pub max_claims: usize,
    pub referral_scope: ReferralScope,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            contract: ENS_CONTRACT_ADDR,
            event: EventKind::Registration,
            max_claims: MAX_CLAIMS,
            referral_scope: ReferralScope::AllSlots,
        }
    }
}
