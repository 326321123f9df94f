//! Platform services the editor talks to through narrow contracts.
//!
//! Every call returns a boxed future so the state handlers can await it without
//! picking an executor. None of them can be cancelled from the inside; dropping
//! the future is the only way to abandon a call.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::error::{CaptureError, PickError, RenderError, WriteError};
use crate::sticker::Sticker;

pub mod desktop;

/// Answer of an authorization request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

impl Authorization {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Which platform service an authorization belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Camera,
    Gallery,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Gallery => write!(f, "gallery"),
        }
    }
}

/// Kind of gallery access being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAccess {
    Read,
    Write,
}

/// Handle to an encoded still image.
///
/// Cloning is cheap; the encoded bytes are shared.
#[derive(Clone)]
pub struct PhotoRef {
    id: Uuid,
    encoded: Arc<[u8]>,
    size: [u32; 2],
}

impl fmt::Debug for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoRef")
            .field("id", &self.id)
            .field("encoded_len", &self.encoded.len())
            .field("size", &self.size)
            .finish()
    }
}

impl PartialEq for PhotoRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl PhotoRef {
    pub fn new(encoded: Vec<u8>, size: [u32; 2]) -> Self {
        Self {
            id: Uuid::new_v4(),
            encoded: encoded.into(),
            size,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }
}

pub trait Camera: Send {
    /// Resolves immediately when access was already granted
    fn request_authorization(&mut self) -> BoxFuture<'_, Authorization>;

    fn capture(&mut self) -> BoxFuture<'_, Result<PhotoRef, CaptureError>>;
}

pub trait Gallery: Send {
    fn request_authorization(&mut self, access: GalleryAccess) -> BoxFuture<'_, Authorization>;

    fn write<'a>(&'a mut self, encoded: &'a [u8]) -> BoxFuture<'a, Result<(), WriteError>>;

    /// `Ok(None)` means the user backed out of the picker
    fn pick(&mut self) -> BoxFuture<'_, Result<Option<PhotoRef>, PickError>>;
}

pub trait Compositor: Send + Sync {
    /// Flattens `photo` with `stickers` drawn in list order, returning encoded bytes
    fn render_composite<'a>(
        &'a self,
        photo: &'a PhotoRef,
        stickers: &'a [Sticker],
    ) -> BoxFuture<'a, Result<Vec<u8>, RenderError>>;
}
