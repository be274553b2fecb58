use async_trait::async_trait;

/// Produces and attaches a signature from raw seed material at the given
/// proof slot. Resolves to whether the signature was added; failure detail
/// stays with the collaborator.
#[async_trait]
pub trait SeedSigner: Send + Sync {
    async fn sign(&self, tx_json: &str, seed: &str, proof_index: usize) -> bool;
}

/// External signer capability (a WavesKeeper-style browser extension).
/// Present only when the host environment exposes it; the form invokes it
/// and awaits the boolean result, nothing more.
#[async_trait]
pub trait KeeperSigner: Send + Sync {
    async fn sign(&self, tx_json: &str) -> bool;
}
