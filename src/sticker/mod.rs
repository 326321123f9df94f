use std::fmt;

use egui::Pos2;
use log::{debug, info};
use uuid::Uuid;

mod palette;

pub use palette::Palette;

/// Where a freshly placed sticker lands, in photo coordinates
pub const DEFAULT_STICKER_POSITION: Pos2 = Pos2::new(50.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickerId(Uuid);

impl StickerId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A glyph placed on top of the photo.
///
/// `id` and `glyph` never change once created; only the collection moves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    id: StickerId,
    glyph: String,
    position: Pos2,
}

impl Sticker {
    pub fn id(&self) -> StickerId {
        self.id
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// A copy of this sticker drawn at `position`; the collection is untouched
    pub fn moved_to(&self, position: Pos2) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

/// Stickers of one editing session, in creation order.
///
/// Creation order is the stacking order when drawn. Ids are unique.
#[derive(Debug, Clone)]
pub struct StickerCollection {
    stickers: Vec<Sticker>,
    default_position: Pos2,
}

impl Default for StickerCollection {
    fn default() -> Self {
        Self::new(DEFAULT_STICKER_POSITION)
    }
}

impl StickerCollection {
    pub fn new(default_position: Pos2) -> Self {
        Self {
            stickers: Vec::new(),
            default_position,
        }
    }

    /// Places `glyph` at the default position and returns a copy of the new sticker
    pub fn add(&mut self, glyph: impl Into<String>) -> Sticker {
        let sticker = Sticker {
            id: StickerId::generate(),
            glyph: glyph.into(),
            position: self.default_position,
        };
        info!("Placed sticker {} '{}' at {:?}", sticker.id, sticker.glyph, sticker.position);
        self.stickers.push(sticker.clone());
        sticker
    }

    /// Replaces the committed position of `id`. Returns false if no such sticker exists.
    pub fn move_to(&mut self, id: StickerId, position: Pos2) -> bool {
        match self.stickers.iter_mut().find(|s| s.id == id) {
            Some(sticker) => {
                debug!("Moved sticker {} from {:?} to {:?}", id, sticker.position, position);
                sticker.position = position;
                true
            }
            None => {
                debug!("Ignoring move of unknown sticker {}", id);
                false
            }
        }
    }

    pub fn remove(&mut self, id: StickerId) -> Option<Sticker> {
        let index = self.stickers.iter().position(|s| s.id == id)?;
        let removed = self.stickers.remove(index);
        info!("Removed sticker {} '{}'", removed.id, removed.glyph);
        Some(removed)
    }

    pub fn reset(&mut self) {
        if !self.stickers.is_empty() {
            debug!("Clearing {} stickers", self.stickers.len());
        }
        self.stickers.clear();
    }

    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StickerId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sticker> {
        self.stickers.iter()
    }

    pub fn as_slice(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn default_position(&self) -> Pos2 {
        self.default_position
    }
}
