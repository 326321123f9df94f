use std::collections::HashMap;

use egui::Pos2;
use log::{debug, info};

mod drag;
mod recognizer;

pub use drag::DragSession;
pub use recognizer::{GestureConfig, GestureOutcome, StickerGesture};

use recognizer::Release;

use crate::sticker::{StickerCollection, StickerId};

/// Routes pointer events to one recognizer per touched sticker.
///
/// Gestures on different stickers never interact; they only meet the
/// collection when a drag commits or a long press removes its sticker.
#[derive(Debug, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    active: HashMap<StickerId, StickerGesture>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: HashMap::new(),
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Starts tracking a touch on `id`. Returns false for unknown stickers and
    /// for stickers already being touched.
    pub fn press(&mut self, stickers: &StickerCollection, id: StickerId, pointer: Pos2, now: f64) -> bool {
        if self.active.contains_key(&id) {
            return false;
        }
        let Some(sticker) = stickers.get(id) else {
            debug!("Press on unknown sticker {}", id);
            return false;
        };
        self.active
            .insert(id, StickerGesture::press(sticker, pointer, now, self.config));
        true
    }

    pub fn pointer_moved(
        &mut self,
        stickers: &mut StickerCollection,
        id: StickerId,
        pointer: Pos2,
        now: f64,
    ) -> GestureOutcome {
        let Some(gesture) = self.active.get_mut(&id) else {
            return GestureOutcome::None;
        };
        let outcome = gesture.pointer_moved(pointer, now);
        if outcome == GestureOutcome::LongPressed {
            self.active.remove(&id);
            Self::remove_held(stickers, id);
        }
        outcome
    }

    /// Fires pending long presses. Returns the stickers that were removed.
    ///
    /// A fired touch is forgotten right away: its sticker is gone, so no
    /// release for it can arrive.
    pub fn poll(&mut self, stickers: &mut StickerCollection, now: f64) -> Vec<StickerId> {
        let fired: Vec<StickerId> = self
            .active
            .iter_mut()
            .filter_map(|(id, gesture)| (gesture.poll(now) == GestureOutcome::LongPressed).then_some(*id))
            .collect();
        for id in &fired {
            self.active.remove(id);
            Self::remove_held(stickers, *id);
        }
        fired
    }

    pub fn release(
        &mut self,
        stickers: &mut StickerCollection,
        id: StickerId,
        pointer: Pos2,
        now: f64,
    ) -> GestureOutcome {
        let Some(gesture) = self.active.remove(&id) else {
            return GestureOutcome::None;
        };
        Self::finish(stickers, id, gesture.release(pointer, now))
    }

    /// Ends every touch at once, for a pointer that went up.
    ///
    /// Without a final pointer sample, drags commit where they were last drawn.
    pub fn release_all(
        &mut self,
        stickers: &mut StickerCollection,
        pointer: Option<Pos2>,
        now: f64,
    ) -> Vec<(StickerId, GestureOutcome)> {
        self.active
            .drain()
            .map(|(id, gesture)| {
                let release = match pointer {
                    Some(pointer) => gesture.release(pointer, now),
                    None => gesture.release_in_place(now),
                };
                (id, Self::finish(stickers, id, release))
            })
            .collect()
    }

    fn finish(stickers: &mut StickerCollection, id: StickerId, release: Release) -> GestureOutcome {
        match release {
            Release::Committed(drag) => GestureOutcome::DragCommitted(drag.commit(stickers)),
            Release::LongPressed => {
                Self::remove_held(stickers, id);
                GestureOutcome::LongPressed
            }
            Release::Tap => GestureOutcome::Tap,
            Release::Suppressed => GestureOutcome::None,
        }
    }

    /// Position to draw `id` at: the live drag position, else the committed one
    pub fn displayed_position(&self, stickers: &StickerCollection, id: StickerId) -> Option<Pos2> {
        self.active
            .get(&id)
            .and_then(StickerGesture::displayed_position)
            .or_else(|| stickers.get(id).map(|s| s.position()))
    }

    /// Commits every drag in progress without ending it
    pub fn commit_active_drags(&mut self, stickers: &mut StickerCollection) -> usize {
        let committed = self
            .active
            .values_mut()
            .filter_map(|gesture| gesture.commit_in_place(stickers))
            .count();
        if committed > 0 {
            debug!("Force-committed {} active drags", committed);
        }
        committed
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    pub fn is_tracking(&self, id: StickerId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    fn remove_held(stickers: &mut StickerCollection, id: StickerId) {
        if stickers.remove(id).is_some() {
            info!("Long press deleted sticker {}", id);
        }
    }
}
