#![allow(dead_code)]

use std::sync::Arc;

use egui::Pos2;
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use selfie_stickers::capability::{
    Authorization, Camera, Compositor, Gallery, GalleryAccess, PhotoRef,
};
use selfie_stickers::error::{CaptureError, PickError, RenderError, WriteError};
use selfie_stickers::{AppState, Sticker};

pub fn photo() -> PhotoRef {
    PhotoRef::new(vec![0x89, b'P', b'N', b'G'], [640, 480])
}

#[derive(Debug, Clone)]
pub struct FakeCamera {
    pub authorization: Authorization,
    pub fail_capture: bool,
    pub captures: Arc<Mutex<usize>>,
}

impl FakeCamera {
    pub fn granted() -> Self {
        Self {
            authorization: Authorization::Granted,
            fail_capture: false,
            captures: Arc::default(),
        }
    }

    pub fn denied() -> Self {
        Self {
            authorization: Authorization::Denied,
            ..Self::granted()
        }
    }
}

impl Camera for FakeCamera {
    fn request_authorization(&mut self) -> BoxFuture<'_, Authorization> {
        let answer = self.authorization;
        async move { answer }.boxed()
    }

    fn capture(&mut self) -> BoxFuture<'_, Result<PhotoRef, CaptureError>> {
        async move {
            if self.fail_capture {
                return Err(CaptureError::Device("sensor unplugged".to_owned()));
            }
            *self.captures.lock() += 1;
            Ok(photo())
        }
        .boxed()
    }
}

#[derive(Debug, Clone)]
pub struct FakeGallery {
    pub authorization: Authorization,
    pub fail_write: bool,
    pub picked: Option<PhotoRef>,
    pub requests: Arc<Mutex<Vec<GalleryAccess>>>,
    pub writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl FakeGallery {
    pub fn granted() -> Self {
        Self {
            authorization: Authorization::Granted,
            fail_write: false,
            picked: None,
            requests: Arc::default(),
            writes: Arc::default(),
        }
    }

    pub fn denied() -> Self {
        Self {
            authorization: Authorization::Denied,
            ..Self::granted()
        }
    }
}

impl Gallery for FakeGallery {
    fn request_authorization(&mut self, access: GalleryAccess) -> BoxFuture<'_, Authorization> {
        self.requests.lock().push(access);
        let answer = self.authorization;
        async move { answer }.boxed()
    }

    fn write<'a>(&'a mut self, encoded: &'a [u8]) -> BoxFuture<'a, Result<(), WriteError>> {
        async move {
            if self.fail_write {
                return Err(WriteError::Rejected("disk full".to_owned()));
            }
            self.writes.lock().push(encoded.to_vec());
            Ok(())
        }
        .boxed()
    }

    fn pick(&mut self) -> BoxFuture<'_, Result<Option<PhotoRef>, PickError>> {
        let picked = self.picked.clone();
        async move { Ok(picked) }.boxed()
    }
}

/// Records which stickers were rendered and at what position
#[derive(Debug, Clone, Default)]
pub struct FakeCompositor {
    pub fail: bool,
    pub renders: Arc<Mutex<Vec<Vec<(String, Pos2)>>>>,
}

impl Compositor for FakeCompositor {
    fn render_composite<'a>(
        &'a self,
        _photo: &'a PhotoRef,
        stickers: &'a [Sticker],
    ) -> BoxFuture<'a, Result<Vec<u8>, RenderError>> {
        async move {
            if self.fail {
                return Err(RenderError::InvalidDimensions { width: 0, height: 0 });
            }
            let placed: Vec<(String, Pos2)> = stickers
                .iter()
                .map(|s| (s.glyph().to_owned(), s.position()))
                .collect();
            self.renders.lock().push(placed);
            Ok(b"composite".to_vec())
        }
        .boxed()
    }
}

/// An app state that has just taken a photo
pub fn editing_state(camera: &mut FakeCamera) -> AppState {
    let mut state = AppState::default();
    futures::executor::block_on(state.open_camera(&mut *camera)).unwrap();
    futures::executor::block_on(state.take_photo(&mut *camera)).unwrap();
    state
}
