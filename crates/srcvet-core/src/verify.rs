use crate::ReviewError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Blake3 hex digest over a file's full byte stream.
pub fn file_digest(path: &Path) -> Result<String, ReviewError> {
    let bytes = fs::read(path)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// The consistency gate: confirm the packaged build recipe is byte-identical
/// to the reference copy the reviewer believes they are reviewing.
///
/// Equal digests return the shared digest; a mismatch carries both digests
/// for diagnostics. Callers treat a mismatch as a hard stop — no build or
/// review work happens past it, so no build time is spent on the wrong
/// recipe.
pub fn verify_recipe(packaged: &Path, reference: &Path) -> Result<String, ReviewError> {
    let packaged_digest = file_digest(packaged)?;
    let reference_digest = file_digest(reference)?;
    debug!(
        "packaged {} reference {}",
        &packaged_digest[..12.min(packaged_digest.len())],
        &reference_digest[..12.min(reference_digest.len())]
    );

    if packaged_digest == reference_digest {
        Ok(packaged_digest)
    } else {
        Err(ReviewError::SpecMismatch {
            packaged: packaged_digest,
            reference: reference_digest,
        })
    }
}
