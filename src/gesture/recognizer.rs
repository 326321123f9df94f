use egui::Pos2;

use super::drag::DragSession;
use crate::sticker::{Sticker, StickerCollection, StickerId};

/// Thresholds used to tell a drag from a long hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Time the pointer must stay put before the hold counts as a long press (seconds)
    pub long_press_secs: f64,
    /// Pointer travel below which the pointer still counts as stationary
    pub drag_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_secs: 0.5,
            drag_slop: 5.0,
        }
    }
}

/// What a pointer event turned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    None,
    DragStarted(Pos2),
    DragMoved(Pos2),
    DragCommitted(Pos2),
    LongPressed,
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Pending,
    Dragging,
    /// The long press fired; the rest of this touch is ignored
    Held,
}

/// How a touch ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Release {
    Committed(DragSession),
    LongPressed,
    Tap,
    Suppressed,
}

/// Recognizer for a single touch on a single sticker.
///
/// A touch is either a drag or a long press, never both. Whichever threshold is
/// crossed first wins for the lifetime of the touch.
#[derive(Debug, Clone)]
pub struct StickerGesture {
    config: GestureConfig,
    drag: DragSession,
    origin: Pos2,
    pressed_at: f64,
    phase: Phase,
}

impl StickerGesture {
    pub fn press(sticker: &Sticker, pointer: Pos2, now: f64, config: GestureConfig) -> Self {
        Self {
            config,
            drag: DragSession::begin(sticker),
            origin: pointer,
            pressed_at: now,
            phase: Phase::Pending,
        }
    }

    pub fn sticker(&self) -> StickerId {
        self.drag.sticker()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Position to draw while dragging, `None` otherwise
    pub fn displayed_position(&self) -> Option<Pos2> {
        self.is_dragging().then(|| self.drag.position())
    }

    fn hold_elapsed(&self, now: f64) -> bool {
        now - self.pressed_at >= self.config.long_press_secs
    }

    pub fn pointer_moved(&mut self, pointer: Pos2, now: f64) -> GestureOutcome {
        match self.phase {
            Phase::Held => GestureOutcome::None,
            Phase::Dragging => {
                self.drag.update(pointer - self.origin);
                GestureOutcome::DragMoved(self.drag.position())
            }
            Phase::Pending => {
                if self.hold_elapsed(now) {
                    self.phase = Phase::Held;
                    GestureOutcome::LongPressed
                } else if (pointer - self.origin).length() > self.config.drag_slop {
                    self.phase = Phase::Dragging;
                    self.drag.update(pointer - self.origin);
                    GestureOutcome::DragStarted(self.drag.position())
                } else {
                    GestureOutcome::None
                }
            }
        }
    }

    /// Fires the long press when the pointer has been stationary long enough
    pub fn poll(&mut self, now: f64) -> GestureOutcome {
        if self.phase == Phase::Pending && self.hold_elapsed(now) {
            self.phase = Phase::Held;
            GestureOutcome::LongPressed
        } else {
            GestureOutcome::None
        }
    }

    pub(crate) fn release(mut self, pointer: Pos2, now: f64) -> Release {
        match self.phase {
            Phase::Held => Release::Suppressed,
            Phase::Dragging => {
                self.drag.update(pointer - self.origin);
                Release::Committed(self.drag)
            }
            Phase::Pending if self.hold_elapsed(now) => Release::LongPressed,
            Phase::Pending => Release::Tap,
        }
    }

    /// Ends the touch at the last pointer sample seen
    pub(crate) fn release_in_place(self, now: f64) -> Release {
        match self.phase {
            Phase::Held => Release::Suppressed,
            Phase::Dragging => Release::Committed(self.drag),
            Phase::Pending if self.hold_elapsed(now) => Release::LongPressed,
            Phase::Pending => Release::Tap,
        }
    }

    pub(crate) fn commit_in_place(&mut self, stickers: &mut StickerCollection) -> Option<Pos2> {
        if self.phase != Phase::Dragging {
            return None;
        }
        self.origin += self.drag.delta();
        Some(self.drag.commit_in_place(stickers))
    }
}
