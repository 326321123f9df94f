mod common;

use common::{FakeCamera, editing_state};
use egui::pos2;
use selfie_stickers::GestureOutcome;

#[test]
fn test_drag_scenario_commits_anchor_plus_delta() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();
    assert_eq!(star.position(), pos2(50.0, 100.0));

    let editing = state.editing_mut().unwrap();
    assert!(editing.press(star.id(), pos2(200.0, 200.0), 0.0));
    editing.pointer_moved(star.id(), pos2(205.0, 198.0), 0.05);
    editing.pointer_moved(star.id(), pos2(208.0, 196.0), 0.10);
    let outcome = editing.release(star.id(), pos2(210.0, 195.0), 0.15);

    assert_eq!(outcome, GestureOutcome::DragCommitted(pos2(60.0, 95.0)));
    assert_eq!(editing.stickers().get(star.id()).unwrap().position(), pos2(60.0, 95.0));
    assert!(!editing.has_active_gestures());
}

#[test]
fn test_moves_never_touch_the_model() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(0.0, 0.0), 0.0);
    for step in 1..=20 {
        let pointer = pos2(step as f32 * 6.0, step as f32 * 2.0);
        let outcome = editing.pointer_moved(star.id(), pointer, step as f64 * 0.01);
        assert!(matches!(
            outcome,
            GestureOutcome::DragStarted(_) | GestureOutcome::DragMoved(_)
        ));
        assert_eq!(editing.stickers().get(star.id()).unwrap().position(), pos2(50.0, 100.0));
        assert_eq!(
            editing.displayed_position(star.id()),
            Some(pos2(50.0 + step as f32 * 6.0, 100.0 + step as f32 * 2.0))
        );
    }

    editing.release(star.id(), pos2(60.0, 20.0), 0.3);
    assert_eq!(editing.stickers().get(star.id()).unwrap().position(), pos2(110.0, 120.0));
}

#[test]
fn test_long_press_removes_without_dragging() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();
    let heart = state.add_sticker("❤️").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(10.0, 10.0), 1.0);
    assert_eq!(editing.poll_gestures(1.2), vec![]);
    assert_eq!(editing.poll_gestures(1.6), vec![star.id()]);

    // Movement after the hold fired is not a drag
    assert_eq!(editing.pointer_moved(star.id(), pos2(90.0, 10.0), 1.7), GestureOutcome::None);
    assert_eq!(editing.release(star.id(), pos2(90.0, 10.0), 1.8), GestureOutcome::None);

    let remaining: Vec<_> = editing.stickers().iter().map(|s| s.id()).collect();
    assert_eq!(remaining, vec![heart.id()]);
}

#[test]
fn test_drag_cancels_pending_long_press() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(0.0, 0.0), 0.0);
    editing.pointer_moved(star.id(), pos2(30.0, 0.0), 0.1);

    assert!(editing.poll_gestures(2.0).is_empty());
    assert_eq!(
        editing.release(star.id(), pos2(30.0, 0.0), 2.0),
        GestureOutcome::DragCommitted(pos2(80.0, 100.0))
    );
    assert_eq!(editing.stickers().len(), 1);
}

#[test]
fn test_two_stickers_drag_independently() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();
    let heart = state.add_sticker("❤️").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(0.0, 0.0), 0.0);
    editing.press(heart.id(), pos2(100.0, 100.0), 0.0);
    editing.pointer_moved(star.id(), pos2(10.0, 0.0), 0.1);
    editing.pointer_moved(heart.id(), pos2(100.0, 140.0), 0.1);

    assert_eq!(
        editing.release(heart.id(), pos2(100.0, 140.0), 0.2),
        GestureOutcome::DragCommitted(pos2(50.0, 140.0))
    );
    assert_eq!(editing.stickers().get(star.id()).unwrap().position(), pos2(50.0, 100.0));
    assert_eq!(editing.displayed_position(star.id()), Some(pos2(60.0, 100.0)));

    assert_eq!(
        editing.release(star.id(), pos2(10.0, -20.0), 0.3),
        GestureOutcome::DragCommitted(pos2(60.0, 80.0))
    );
}

#[test]
fn test_quick_tap_is_not_a_drag() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(0.0, 0.0), 0.0);
    assert_eq!(editing.release(star.id(), pos2(1.0, 1.0), 0.1), GestureOutcome::Tap);
    assert_eq!(editing.stickers().get(star.id()).unwrap().position(), pos2(50.0, 100.0));
}

#[test]
fn test_long_press_leaves_no_touch_behind() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(10.0, 10.0), 0.0);
    assert_eq!(editing.poll_gestures(0.6), vec![star.id()]);

    assert!(!editing.stickers().contains(star.id()));
    assert!(!editing.is_touching(star.id()));
    assert!(!editing.has_active_gestures());
    assert!(editing.poll_gestures(1.0).is_empty());
    assert!(editing.release_all(None, 1.1).is_empty());
}

#[test]
fn test_pointer_up_without_position_ends_every_touch() {
    let mut camera = FakeCamera::granted();
    let mut state = editing_state(&mut camera);
    let star = state.add_sticker("⭐").unwrap();

    let editing = state.editing_mut().unwrap();
    editing.press(star.id(), pos2(0.0, 0.0), 0.0);
    editing.pointer_moved(star.id(), pos2(10.0, -5.0), 0.1);

    let ended = editing.release_all(None, 0.2);

    assert_eq!(ended, vec![(star.id(), GestureOutcome::DragCommitted(pos2(60.0, 95.0)))]);
    assert!(!editing.has_active_gestures());
    assert_eq!(editing.stickers().get(star.id()).unwrap().position(), pos2(60.0, 95.0));
}
