use std::path::Path;

use anyhow::{ensure, Context, Result};
use ens_claims_core::{ClaimBatch, MAX_CLAIMS};
use serde::Deserialize;

/// A batch file as written by hand or by the input generator.
///
/// When `num_claims` is absent the arrays list only the active claims and are
/// padded to [`MAX_CLAIMS`] slots.
#[derive(Debug, Deserialize)]
pub struct BatchFile {
    pub block_numbers: Vec<u64>,
    pub tx_idxs: Vec<u64>,
    pub log_idxs: Vec<u64>,
    #[serde(default)]
    pub num_claims: Option<u64>,
}

impl BatchFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading batch {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing batch {}", path.display()))
    }

    pub fn into_batch(self) -> Result<ClaimBatch> {
        if let Some(num_claims) = self.num_claims {
            return Ok(ClaimBatch {
                block_numbers: self.block_numbers,
                tx_idxs: self.tx_idxs,
                log_idxs: self.log_idxs,
                num_claims,
            });
        }

        let n = self.block_numbers.len();
        ensure!(
            self.tx_idxs.len() == n && self.log_idxs.len() == n,
            "claim arrays differ in length"
        );
        ensure!(n > 0 && n <= MAX_CLAIMS, "expected 1 to {MAX_CLAIMS} claims, got {n}");
        let claims: Vec<_> = (0..n)
            .map(|i| (self.block_numbers[i], self.tx_idxs[i], self.log_idxs[i]))
            .collect();
        Ok(ClaimBatch::padded(&claims))
    }
}
