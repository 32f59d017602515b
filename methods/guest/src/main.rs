#![no_main]

use ens_claims_core::{BatchVerifier, GuestInput};
use risc0_zkvm::guest::env;

risc0_zkvm::guest::entry!(main);

fn main() {
    // Read the batch, the verifier settings and the attested event values
    let input: GuestInput = env::read();

    // Verify every slot; a rejected batch aborts without a receipt
    let verifier = BatchVerifier::new(input.config);
    let result = match verifier.verify(&input.batch, &input.witness) {
        Ok(result) => result,
        Err(e) => panic!("claim batch rejected: {e}"),
    };

    // Commit the four result words to the journal (makes them public)
    for word in result.to_callback_words() {
        env::commit_slice(word.as_slice());
    }
}
