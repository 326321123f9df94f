use egui::{Pos2, Vec2};
use log::debug;

use crate::sticker::{Sticker, StickerCollection, StickerId};

/// Transient state of one sticker drag.
///
/// The anchor is the committed position when the drag began. The displayed
/// position is always `anchor + delta`; the model only sees it on [`DragSession::commit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    sticker: StickerId,
    anchor: Pos2,
    delta: Vec2,
}

impl DragSession {
    pub fn begin(sticker: &Sticker) -> Self {
        Self {
            sticker: sticker.id(),
            anchor: sticker.position(),
            delta: Vec2::ZERO,
        }
    }

    pub fn sticker(&self) -> StickerId {
        self.sticker
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Takes the cumulative pointer delta since the drag began
    pub fn update(&mut self, delta: Vec2) {
        self.delta = delta;
    }

    pub fn position(&self) -> Pos2 {
        self.anchor + self.delta
    }

    /// Writes `anchor + delta` into the model and ends the drag
    pub fn commit(self, stickers: &mut StickerCollection) -> Pos2 {
        let position = self.position();
        if stickers.move_to(self.sticker, position) {
            debug!("Committed drag of {} to {:?}", self.sticker, position);
        }
        position
    }

    /// Commits the current position but keeps dragging from there
    pub(crate) fn commit_in_place(&mut self, stickers: &mut StickerCollection) -> Pos2 {
        let position = self.commit(stickers);
        self.anchor = position;
        self.delta = Vec2::ZERO;
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_adds_delta_to_anchor() {
        let mut stickers = StickerCollection::default();
        let star = stickers.add("⭐");

        let mut drag = DragSession::begin(&star);
        drag.update(Vec2::new(10.0, -5.0));
        assert_eq!(drag.position(), Pos2::new(60.0, 95.0));

        assert_eq!(drag.commit(&mut stickers), Pos2::new(60.0, 95.0));
        assert_eq!(stickers.get(star.id()).unwrap().position(), Pos2::new(60.0, 95.0));
    }

    #[test]
    fn test_updates_replace_rather_than_accumulate() {
        let mut stickers = StickerCollection::default();
        let star = stickers.add("⭐");

        let mut drag = DragSession::begin(&star);
        drag.update(Vec2::new(3.0, 3.0));
        drag.update(Vec2::new(4.0, 1.0));
        assert_eq!(drag.position(), Pos2::new(54.0, 101.0));
        assert_eq!(stickers.get(star.id()).unwrap().position(), Pos2::new(50.0, 100.0));
    }

    #[test]
    fn test_commit_in_place_rebases() {
        let mut stickers = StickerCollection::default();
        let star = stickers.add("⭐");

        let mut drag = DragSession::begin(&star);
        drag.update(Vec2::new(5.0, 0.0));
        drag.commit_in_place(&mut stickers);

        assert_eq!(drag.anchor(), Pos2::new(55.0, 100.0));
        assert_eq!(drag.delta(), Vec2::ZERO);
        assert_eq!(stickers.get(star.id()).unwrap().position(), Pos2::new(55.0, 100.0));
    }
}
