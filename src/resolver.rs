//! Flat playlist resolution — reference in, ordered item stubs out.

use crate::error::ResolutionError;
use crate::provider::MetadataProvider;
use crate::types::ItemStub;

/// Resolve a playlist reference into an ordered item list.
///
/// Uses the provider's flat resolution so the total item count is known
/// before any per-item metadata fetch. Any failure here is fatal to the
/// run: an empty reference, an unresolvable reference, or a playlist that
/// yields zero items.
pub(crate) async fn resolve_playlist(
    provider: &dyn MetadataProvider,
    reference: &str,
) -> std::result::Result<Vec<ItemStub>, ResolutionError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ResolutionError::EmptyReference);
    }

    let stubs = provider
        .resolve_flat(reference)
        .await
        .map_err(|e| ResolutionError::Unresolvable {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;

    if stubs.is_empty() {
        return Err(ResolutionError::EmptyPlaylist {
            reference: reference.to_string(),
        });
    }

    tracing::info!(
        reference = reference,
        total = stubs.len(),
        provider = provider.name(),
        "Playlist resolved"
    );
    Ok(stubs)
}
