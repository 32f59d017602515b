//! Indicator arithmetic.
//!
//! Every data-dependent decision in the verifier is expressed with these
//! helpers: comparisons yield a `0`/`1` value that is multiplied against the
//! candidates and summed, so the same sequence of operations runs for every
//! input. Assertions are the only place a batch can be rejected.

use alloy_primitives::U256;

/// `1` if `a < b`, else `0`.
pub fn is_less_than(a: U256, b: U256) -> U256 {
    U256::from(u64::from(a < b))
}

/// `1` if `a == 0`, else `0`.
pub fn is_zero(a: U256) -> U256 {
    U256::from(u64::from(a.is_zero()))
}

/// `1` if `a == b`, else `0`.
pub fn is_equal(a: U256, b: U256) -> U256 {
    U256::from(u64::from(a == b))
}

/// Conjunction of two indicators.
pub fn and(a: U256, b: U256) -> U256 {
    a * b
}

/// Disjunction of two indicators: `a + b - a*b`.
pub fn or(a: U256, b: U256) -> U256 {
    a + b - a * b
}

/// Gates `value` by an indicator.
pub fn mul(value: U256, indicator: U256) -> U256 {
    value * indicator
}

pub fn sum(values: impl IntoIterator<Item = U256>) -> U256 {
    values.into_iter().fold(U256::ZERO, |acc, v| acc + v)
}

/// Picks `values[idx]` by scanning every slot, so the access pattern does not
/// depend on `idx`. Yields zero when `idx` is out of range.
pub fn select_from_idx(values: &[U256], idx: U256) -> U256 {
    sum(values
        .iter()
        .enumerate()
        .map(|(j, v)| mul(*v, is_equal(U256::from(j), idx))))
}

/// `true` if `value < 2^bits`.
pub fn range_check(value: U256, bits: usize) -> bool {
    value.bit_len() <= bits
}
