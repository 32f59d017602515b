//! Price tiers by decoded name length.
//!
//! Three-character names cost 640 and four-character names 160 per year
//! against a base of 5, so the base payment is recovered by dividing by 128
//! and 32 respectively. Names of one or two characters earn nothing.

use alloy_primitives::U256;

use crate::gadgets::{is_equal, is_less_than, mul, sum};

pub const THREE_CHAR_DIVISOR: u64 = 640 / 5;
pub const FOUR_CHAR_DIVISOR: u64 = 160 / 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceTier {
    Full,
    ThreeChar,
    FourChar,
    None,
}

/// Mutually exclusive tier indicators for one decoded length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierIndicators {
    pub is_full: U256,
    pub is_three: U256,
    pub is_four: U256,
}

impl TierIndicators {
    pub fn new(decoded_len: u64) -> Self {
        let len = U256::from(decoded_len);
        Self {
            is_full: is_less_than(U256::from(4u64), len),
            is_three: is_equal(len, U256::from(3u64)),
            is_four: is_equal(len, U256::from(4u64)),
        }
    }

    pub fn tier(&self) -> PriceTier {
        if self.is_full == U256::ONE {
            PriceTier::Full
        } else if self.is_three == U256::ONE {
            PriceTier::ThreeChar
        } else if self.is_four == U256::ONE {
            PriceTier::FourChar
        } else {
            PriceTier::None
        }
    }

    /// The base amount attributed to a payment of `paid`.
    pub fn amount(&self, paid: U256) -> U256 {
        let full = mul(paid, self.is_full);
        let three = mul(paid / U256::from(THREE_CHAR_DIVISOR), self.is_three);
        let four = mul(paid / U256::from(FOUR_CHAR_DIVISOR), self.is_four);
        sum([full, three, four])
    }
}

/// Amount contributed by one slot, zero for padding.
pub fn slot_amount(decoded_len: u64, paid: U256, active: U256) -> U256 {
    mul(TierIndicators::new(decoded_len).amount(paid), active)
}
