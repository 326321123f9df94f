//! Desktop stand-ins for the phone's camera, photo library and view snapshot.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use futures::FutureExt;
use futures::future::BoxFuture;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::{debug, info};
use uuid::Uuid;

use super::{Authorization, Camera, Compositor, Gallery, GalleryAccess, PhotoRef};
use crate::config::Permission;
use crate::error::{CaptureError, PickError, RenderError, WriteError};
use crate::sticker::Sticker;

const TEST_PATTERN_SIZE: [u32; 2] = [640, 480];

fn authorize(permission: &mut Permission) -> Authorization {
    match *permission {
        Permission::Granted => Authorization::Granted,
        Permission::Denied => Authorization::Denied,
        Permission::Prompt => {
            *permission = Permission::Granted;
            Authorization::Granted
        }
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut encoded = Vec::new();
    image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;
    Ok(encoded)
}

fn photo_from_encoded(encoded: Vec<u8>) -> Result<PhotoRef, image::ImageError> {
    let decoded = image::load_from_memory(&encoded)?;
    Ok(PhotoRef::new(encoded, [decoded.width(), decoded.height()]))
}

/// Camera that serves a still image from disk, or a generated test pattern
#[derive(Debug, Clone)]
pub struct StillCamera {
    source: Option<PathBuf>,
    permission: Permission,
}

impl StillCamera {
    pub fn new(source: Option<PathBuf>, permission: Permission) -> Self {
        Self { source, permission }
    }

    fn test_pattern() -> RgbaImage {
        let [width, height] = TEST_PATTERN_SIZE;
        RgbaImage::from_fn(width, height, |x, y| {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            Rgba([r, g, 200, 255])
        })
    }

    fn shoot(&self) -> Result<PhotoRef, CaptureError> {
        if self.permission != Permission::Granted {
            return Err(CaptureError::Device("camera access has not been granted".to_owned()));
        }
        let photo = match &self.source {
            Some(path) => photo_from_encoded(fs::read(path)?)?,
            None => PhotoRef::new(encode_png(&Self::test_pattern())?, TEST_PATTERN_SIZE),
        };
        debug!("Camera produced {:?}", photo);
        Ok(photo)
    }
}

impl Camera for StillCamera {
    fn request_authorization(&mut self) -> BoxFuture<'_, Authorization> {
        let answer = authorize(&mut self.permission);
        async move { answer }.boxed()
    }

    fn capture(&mut self) -> BoxFuture<'_, Result<PhotoRef, CaptureError>> {
        async move { self.shoot() }.boxed()
    }
}

/// Photo library backed by a directory of image files
#[derive(Debug, Clone)]
pub struct FolderGallery {
    dir: PathBuf,
    permission: Permission,
    last_written: Option<PathBuf>,
}

impl FolderGallery {
    pub fn new(dir: impl Into<PathBuf>, permission: Permission) -> Self {
        Self {
            dir: dir.into(),
            permission,
            last_written: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    fn is_image(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg"))
    }

    fn store(&mut self, encoded: &[u8]) -> Result<(), WriteError> {
        if self.permission != Permission::Granted {
            return Err(WriteError::Rejected("gallery access has not been granted".to_owned()));
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("selfie-{}.png", Uuid::new_v4()));
        fs::write(&path, encoded)?;
        info!("Wrote {} bytes to {}", encoded.len(), path.display());
        self.last_written = Some(path);
        Ok(())
    }

    fn newest_image(&self) -> Result<Option<PhotoRef>, PickError> {
        if !self.dir.is_dir() {
            return Ok(None);
        }
        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !Self::is_image(&path) {
                continue;
            }
            let modified = fs::metadata(&path)?
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH);
            if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
                newest = Some((modified, path));
            }
        }
        let Some((_, path)) = newest else {
            return Ok(None);
        };
        debug!("Picked {}", path.display());
        Ok(Some(photo_from_encoded(fs::read(&path)?)?))
    }
}

impl Gallery for FolderGallery {
    fn request_authorization(&mut self, access: GalleryAccess) -> BoxFuture<'_, Authorization> {
        let answer = authorize(&mut self.permission);
        debug!("Gallery {:?} access: {:?}", access, answer);
        async move { answer }.boxed()
    }

    fn write<'a>(&'a mut self, encoded: &'a [u8]) -> BoxFuture<'a, Result<(), WriteError>> {
        async move { self.store(encoded) }.boxed()
    }

    fn pick(&mut self) -> BoxFuture<'_, Result<Option<PhotoRef>, PickError>> {
        async move { self.newest_image() }.boxed()
    }
}

/// Flattens stickers onto the photo as round badges.
///
/// Each badge is filled with a colour derived from its glyph and outlined in
/// white, centred on the sticker's committed position.
#[derive(Debug, Clone, Copy)]
pub struct BadgeCompositor {
    radius: f32,
}

impl Default for BadgeCompositor {
    fn default() -> Self {
        Self { radius: 24.0 }
    }
}

impl BadgeCompositor {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(1.0),
        }
    }

    pub fn glyph_color(glyph: &str) -> Rgba<u8> {
        let hash = glyph
            .chars()
            .fold(0x811c_9dc5_u32, |h, c| (h ^ c as u32).wrapping_mul(0x0100_0193));
        let [r, g, b, _] = hash.to_le_bytes();
        Rgba([r | 0x40, g | 0x40, b | 0x40, 255])
    }

    fn stamp(&self, canvas: &mut RgbaImage, sticker: &Sticker) {
        let center = sticker.position();
        let fill = Self::glyph_color(sticker.glyph());
        let rim = (self.radius - 3.0).max(0.0);
        let (width, height) = canvas.dimensions();

        let min_x = (center.x - self.radius).floor().max(0.0) as u32;
        let min_y = (center.y - self.radius).floor().max(0.0) as u32;
        let max_x = ((center.x + self.radius).ceil().max(0.0) as u32).min(width);
        let max_y = ((center.y + self.radius).ceil().max(0.0) as u32).min(height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance <= rim {
                    canvas.put_pixel(x, y, fill);
                } else if distance <= self.radius {
                    canvas.put_pixel(x, y, Rgba([255, 255, 255, 255]));
                }
            }
        }
    }

    pub fn flatten(&self, photo: &PhotoRef, stickers: &[Sticker]) -> Result<Vec<u8>, RenderError> {
        let decoded: DynamicImage =
            image::load_from_memory(photo.encoded()).map_err(RenderError::Decode)?;
        let mut canvas = decoded.to_rgba8();
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        for sticker in stickers {
            self.stamp(&mut canvas, sticker);
        }
        encode_png(&canvas).map_err(RenderError::Encode)
    }
}

impl Compositor for BadgeCompositor {
    fn render_composite<'a>(
        &'a self,
        photo: &'a PhotoRef,
        stickers: &'a [Sticker],
    ) -> BoxFuture<'a, Result<Vec<u8>, RenderError>> {
        async move { self.flatten(photo, stickers) }.boxed()
    }
}
