use anyhow::{Context, Result};
use ens_claims_core::{
    AggregateResult, AttestedValueProvider, AttestedWitness, ClaimBatch, GuestInput,
    VerifierConfig,
};
use methods::{ENS_CLAIMS_GUEST_ELF, ENS_CLAIMS_GUEST_ID};
use risc0_zkvm::{default_prover, ExecutorEnv, Receipt};
use tracing::info;

/// Records the provider's answers for every slot so the guest can replay them.
pub fn guest_input<P: AttestedValueProvider>(
    config: VerifierConfig,
    batch: ClaimBatch,
    provider: &P,
) -> Result<GuestInput> {
    let coords: Vec<_> = (0..config.max_claims).map(|i| batch.coordinates(i)).collect();
    let witness = AttestedWitness::record(provider, &coords).context("collecting attested values")?;
    Ok(GuestInput {
        config,
        batch,
        witness,
    })
}

/// Proves the batch in the zkVM, checks the receipt and reads the result
/// back from its journal.
pub fn prove(input: &GuestInput) -> Result<(Receipt, AggregateResult)> {
    let env = ExecutorEnv::builder()
        .write(input)
        .context("writing guest input")?
        .build()
        .context("building executor env")?;

    info!(num_claims = input.batch.num_claims, "proving claim batch");
    let prove_info = default_prover()
        .prove(env, ENS_CLAIMS_GUEST_ELF)
        .context("proving claim batch")?;
    let receipt = prove_info.receipt;

    receipt
        .verify(ENS_CLAIMS_GUEST_ID)
        .context("verifying receipt")?;
    let result = AggregateResult::from_journal(&receipt.journal.bytes).with_context(|| {
        format!(
            "journal holds {} bytes, expected {}",
            receipt.journal.bytes.len(),
            AggregateResult::JOURNAL_LEN
        )
    })?;
    Ok((receipt, result))
}
