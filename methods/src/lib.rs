//! Embeds the claim batch guest so the host can prove it.
//!
//! Exposes `ENS_CLAIMS_GUEST_ELF` and `ENS_CLAIMS_GUEST_ID`.

include!(concat!(env!("OUT_DIR"), "/methods.rs"));
