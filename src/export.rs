use log::{debug, info};

use crate::capability::{Compositor, Gallery, GalleryAccess};
use crate::error::{ExportError, RenderError};
use crate::state::EditingSession;

/// Flattens the photo and the stickers, as drawn, into one image
pub async fn compose(editing: &EditingSession, compositor: &dyn Compositor) -> Result<Vec<u8>, RenderError> {
    let stickers = editing.displayed_stickers();
    compositor.render_composite(editing.photo(), &stickers).await
}

/// Renders the composite and stores it in the gallery, returning the stored bytes.
///
/// Drags still in progress are rendered where they are drawn and committed only
/// once the write succeeds, so a failed save leaves the model untouched. Nothing
/// is rendered or written unless write access is granted.
pub async fn export(
    editing: &mut EditingSession,
    gallery: &mut dyn Gallery,
    compositor: &dyn Compositor,
) -> Result<Vec<u8>, ExportError> {
    if !gallery
        .request_authorization(GalleryAccess::Write)
        .await
        .is_granted()
    {
        return Err(ExportError::PermissionDenied);
    }

    let encoded = compose(editing, compositor).await?;
    debug!(
        "Rendered composite of {} stickers ({} bytes)",
        editing.stickers().len(),
        encoded.len()
    );

    gallery.write(&encoded).await?;
    editing.commit_active_drags();
    info!("Saved photo {} to the gallery", editing.photo().id());
    Ok(encoded)
}
