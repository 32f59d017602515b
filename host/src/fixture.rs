use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use ens_claims_core::{
    AttestedClaim, AttestedValueProvider, ClaimCoordinates, ClaimError, EventLog,
};
use tracing::debug;

/// Attested block and receipt values read from a JSON file.
///
/// Stands in for a provider that fetches and proves headers and receipts;
/// the file holds a list of [`AttestedClaim`] entries.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    entries: HashMap<ClaimCoordinates, AttestedClaim>,
}

impl FixtureProvider {
    pub fn new(claims: Vec<AttestedClaim>) -> Self {
        Self {
            entries: claims.into_iter().map(|c| (c.coords, c)).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading attestations {}", path.display()))?;
        let claims: Vec<AttestedClaim> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing attestations {}", path.display()))?;
        debug!(entries = claims.len(), "loaded attestation fixture");
        Ok(Self::new(claims))
    }

    fn entry(&self, coords: &ClaimCoordinates) -> ens_claims_core::Result<&AttestedClaim> {
        self.entries
            .get(coords)
            .ok_or(ClaimError::MissingAttestation { coords: *coords })
    }
}

impl AttestedValueProvider for FixtureProvider {
    fn block_timestamp(&self, coords: &ClaimCoordinates) -> ens_claims_core::Result<u64> {
        Ok(self.entry(coords)?.timestamp)
    }

    fn event_log(&self, coords: &ClaimCoordinates) -> ens_claims_core::Result<EventLog> {
        Ok(self.entry(coords)?.log.clone())
    }
}
