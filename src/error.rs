use thiserror::Error;

use crate::capability::Capability;

/// Errors raised by a camera while taking a still
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera device error: {0}")]
    Device(String),
    #[error("failed to read camera source: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode camera frame: {0}")]
    Decode(#[from] image::ImageError),
}

/// Errors raised while flattening the photo and its stickers
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode photo: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode composite: {0}")]
    Encode(image::ImageError),
    #[error("photo has invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors raised by the gallery when storing an image
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("gallery rejected the image: {0}")]
    Rejected(String),
}

/// Errors raised by the gallery when picking an existing image
#[derive(Debug, Error)]
pub enum PickError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode picked image: {0}")]
    Decode(#[from] image::ImageError),
}

/// An operation was requested in a session state that does not allow it
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot {action} while {state}")]
pub struct TransitionError {
    pub action: &'static str,
    pub state: &'static str,
}

/// Failure of the save-to-gallery step.
///
/// None of these change the session; the user may retry.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("permission to save photos was denied")]
    PermissionDenied,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the camera and profile flows
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} access was denied")]
    AuthorizationDenied(Capability),
    #[error("capture failed: {0}")]
    CaptureFailed(#[from] CaptureError),
    #[error("picking a picture failed: {0}")]
    PickFailed(#[from] PickError),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}
