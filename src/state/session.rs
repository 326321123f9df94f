//! The top-level mode of the screen.
//!
//! Exactly one session is active at a time:
//!
//! ```text
//! ┌──────────┐  open camera   ┌──────────────┐  shutter   ┌───────────┐
//! │          ├───────────────►│              ├───────────►│           │
//! │   Idle   │                │ CameraActive │            │  Editing  │
//! │          │◄───────────────┤              │            │           │
//! └────▲─────┘     cancel     └──────────────┘            └─────┬─────┘
//!      │                                                        │
//!      └────────────────────────── done ────────────────────────┘
//! ```
//!
//! Entering `Editing` always builds a fresh [`EditingSession`], so nothing
//! from an earlier photo leaks into the next one.
use egui::Pos2;

use crate::capability::PhotoRef;
use crate::gesture::{GestureConfig, GestureOutcome, GestureTracker};
use crate::sticker::{Sticker, StickerCollection, StickerId};

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    Idle,
    CameraActive,
    Editing(EditingSession),
}

impl Session {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CameraActive => "camera active",
            Self::Editing(_) => "editing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_camera_active(&self) -> bool {
        matches!(self, Self::CameraActive)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn editing(&self) -> Option<&EditingSession> {
        match self {
            Self::Editing(editing) => Some(editing),
            _ => None,
        }
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditingSession> {
        match self {
            Self::Editing(editing) => Some(editing),
            _ => None,
        }
    }
}

/// A captured photo and everything placed on it
#[derive(Debug)]
pub struct EditingSession {
    photo: PhotoRef,
    stickers: StickerCollection,
    gestures: GestureTracker,
}

impl EditingSession {
    pub fn new(photo: PhotoRef, default_position: Pos2, gesture: GestureConfig) -> Self {
        Self {
            photo,
            stickers: StickerCollection::new(default_position),
            gestures: GestureTracker::new(gesture),
        }
    }

    pub fn photo(&self) -> &PhotoRef {
        &self.photo
    }

    pub fn stickers(&self) -> &StickerCollection {
        &self.stickers
    }

    pub fn add_sticker(&mut self, glyph: &str) -> Sticker {
        self.stickers.add(glyph)
    }

    pub fn press(&mut self, id: StickerId, pointer: Pos2, now: f64) -> bool {
        self.gestures.press(&self.stickers, id, pointer, now)
    }

    pub fn pointer_moved(&mut self, id: StickerId, pointer: Pos2, now: f64) -> GestureOutcome {
        self.gestures.pointer_moved(&mut self.stickers, id, pointer, now)
    }

    pub fn release(&mut self, id: StickerId, pointer: Pos2, now: f64) -> GestureOutcome {
        self.gestures.release(&mut self.stickers, id, pointer, now)
    }

    /// Ends every touch when the pointer goes up, whichever sticker it is on
    pub fn release_all(&mut self, pointer: Option<Pos2>, now: f64) -> Vec<(StickerId, GestureOutcome)> {
        self.gestures.release_all(&mut self.stickers, pointer, now)
    }

    /// Fires long presses for stationary touches; returns the removed stickers
    pub fn poll_gestures(&mut self, now: f64) -> Vec<StickerId> {
        self.gestures.poll(&mut self.stickers, now)
    }

    pub fn displayed_position(&self, id: StickerId) -> Option<Pos2> {
        self.gestures.displayed_position(&self.stickers, id)
    }

    pub fn is_touching(&self, id: StickerId) -> bool {
        self.gestures.is_tracking(id)
    }

    pub fn has_active_gestures(&self) -> bool {
        !self.gestures.is_idle()
    }

    /// The stickers as drawn: live drag positions in place of committed ones
    pub fn displayed_stickers(&self) -> Vec<Sticker> {
        self.stickers
            .iter()
            .map(|sticker| match self.gestures.displayed_position(&self.stickers, sticker.id()) {
                Some(position) => sticker.moved_to(position),
                None => sticker.clone(),
            })
            .collect()
    }

    pub(crate) fn commit_active_drags(&mut self) -> usize {
        self.gestures.commit_active_drags(&mut self.stickers)
    }
}
