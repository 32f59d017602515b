//! Name bytes and the character count the ENS controller computes for them.
//!
//! The controller prices a name by `StringUtils.strlen`, which walks the
//! UTF-8 bytes and skips continuation bytes by the width announced in each
//! leading byte. Only the first [`NAME_WINDOW_BYTES`] bytes of the name data
//! word take part: a name longer than that is priced at full price anyway,
//! and any declared length from 24 bytes up leaves every step in bounds.
//!
//! [`decode_length`] runs the walk as a fixed 24-step automaton. Every step
//! executes for every name, `in_bounds` decides whether a step counts, and
//! the skip counter is updated arithmetically rather than by branching.

use alloy_primitives::{B256, U256};
use tracing::trace;

use crate::error::{ClaimError, Result};
use crate::gadgets::{and, is_less_than, is_zero, mul, sum};

/// Number of name bytes reconstructed from the data word.
pub const NAME_WINDOW_BYTES: usize = 24;

/// Leading-byte thresholds. A byte below all of them is ASCII (width 1), a
/// byte below none of them announces a 6-byte sequence.
const WIDTH_THRESHOLDS: [u64; 5] = [0x80, 0xe0, 0xf0, 0xf8, 0xfc];

/// The name data word split into its two 128-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NameWord {
    pub hi: u128,
    pub lo: u128,
}

impl From<B256> for NameWord {
    fn from(word: B256) -> Self {
        let mut hi = [0u8; 16];
        let mut lo = [0u8; 16];
        hi.copy_from_slice(&word[..16]);
        lo.copy_from_slice(&word[16..]);
        Self {
            hi: u128::from_be_bytes(hi),
            lo: u128::from_be_bytes(lo),
        }
    }
}

/// The first 24 bytes of a name. Each byte is range checked by its type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameBytes(pub [u8; NAME_WINDOW_BYTES]);

impl NameBytes {
    /// Splits the name word into its leading bytes.
    pub fn from_word(word: &NameWord) -> Self {
        let mut bytes = [0u8; NAME_WINDOW_BYTES];
        bytes[..16].copy_from_slice(&word.hi.to_be_bytes());
        bytes[16..].copy_from_slice(&word.lo.to_be_bytes()[..8]);
        Self(bytes)
    }

    /// Asserts the byte-weighted sums match `word`: the first 16 bytes
    /// rebuild `hi`, the last 8 rebuild the top 64 bits of `lo`.
    pub fn check_against(&self, index: usize, word: &NameWord) -> Result<()> {
        let byte_base = U256::from(256u64);
        let weighted = |bytes: &[u8]| {
            bytes
                .iter()
                .fold(U256::ZERO, |acc, b| acc * byte_base + U256::from(*b))
        };
        let hi = weighted(&self.0[..16]);
        let lo = weighted(&self.0[16..]);
        if hi != U256::from(word.hi) || lo != U256::from(word.lo >> 64) {
            return Err(ClaimError::NameEncodingMismatch { index });
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Counts the characters among the first `name_len` bytes the way the
/// controller's `strlen` does.
pub fn decode_length(bytes: &NameBytes, name_len: u64) -> u64 {
    let name_len = U256::from(name_len);
    let mut len = U256::ZERO;
    let mut skip = U256::ZERO;
    for (i, byte) in bytes.0.iter().enumerate() {
        let byte = U256::from(*byte);
        let class_count = sum(WIDTH_THRESHOLDS
            .iter()
            .map(|t| is_less_than(byte, U256::from(*t))));

        let in_bounds = is_less_than(U256::from(i), name_len);
        let should_not_skip = is_zero(skip);
        let should_add_len = and(in_bounds, should_not_skip);

        let char_width_or_zero = mul(U256::from(6u64) - class_count, should_not_skip);
        skip = skip + char_width_or_zero - U256::ONE;
        len += should_add_len;
    }
    trace!(%len, "decoded name length");
    len.to::<u64>()
}

/// Reconstructs the name bytes of claim `index`, checks them against the
/// event word and returns the decoded character count. The declared length
/// is only compared against byte positions, so it has no upper bound.
pub fn decoded_name_length(index: usize, word: &NameWord, name_len: u64) -> Result<u64> {
    let bytes = NameBytes::from_word(word);
    bytes.check_against(index, word)?;
    Ok(decode_length(&bytes, name_len))
}
