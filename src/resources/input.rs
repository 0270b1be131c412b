//! Per-frame button state resource.
//!
//! Five logical buttons drive the game. Their held state comes from a
//! [`ButtonSource`](crate::resources::buttonsource::ButtonSource) once per
//! frame and is folded into the [`ButtonPad`] resource, which also derives
//! press/release edges.
use bevy_ecs::prelude::*;
use smallvec::SmallVec;

use crate::events::input::ButtonEvent;

/// Number of logical buttons.
pub const BUTTON_COUNT: usize = 5;

/// Held state of every button for one frame.
pub type ButtonFrame = [bool; BUTTON_COUNT];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edge flags.
pub struct BoolState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Fold in a new held value and recompute the edge flags.
    pub fn update(&mut self, active: bool) {
        self.just_pressed = active && !self.active;
        self.just_released = !active && self.active;
        self.active = active;
    }

    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource capturing the state of the five buttons.
#[derive(Resource, Debug, Clone, Default)]
pub struct ButtonPad {
    pub buttons: [BoolState; BUTTON_COUNT],
}

impl ButtonPad {
    /// Apply a new frame of held states and return the resulting edges in
    /// slot order.
    pub fn apply_frame(&mut self, frame: ButtonFrame) -> SmallVec<[ButtonEvent; BUTTON_COUNT]> {
        let mut edges = SmallVec::new();
        for (slot, (state, active)) in self.buttons.iter_mut().zip(frame).enumerate() {
            state.update(active);
            if state.just_pressed {
                edges.push(ButtonEvent::press(slot));
            } else if state.just_released {
                edges.push(ButtonEvent::release(slot));
            }
        }
        edges
    }

    /// Keep held states but drop edges (a frame without new data).
    pub fn clear_edges(&mut self) {
        self.buttons.iter_mut().for_each(BoolState::clear_edges);
    }

    pub fn is_held(&self, slot: usize) -> bool {
        self.buttons.get(slot).is_some_and(|b| b.active)
    }

    /// Slots currently held, in order.
    pub fn held_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.active)
            .map(|(slot, _)| slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
    }

    #[test]
    fn test_press_hold_release_edges() {
        let mut pad = ButtonPad::default();
        let edges = pad.apply_frame([false, true, false, false, false]);
        assert_eq!(edges.as_slice(), &[ButtonEvent::press(1)]);
        assert!(pad.buttons[1].just_pressed);

        let edges = pad.apply_frame([false, true, false, false, false]);
        assert!(edges.is_empty());
        assert!(pad.is_held(1));
        assert!(!pad.buttons[1].just_pressed);

        let edges = pad.apply_frame([false; BUTTON_COUNT]);
        assert_eq!(edges.as_slice(), &[ButtonEvent::release(1)]);
        assert!(pad.buttons[1].just_released);
        assert!(!pad.is_held(1));
    }

    #[test]
    fn test_edges_are_reported_in_slot_order() {
        let mut pad = ButtonPad::default();
        pad.apply_frame([true, false, false, false, false]);
        let edges = pad.apply_frame([false, false, true, false, true]);
        assert_eq!(
            edges.as_slice(),
            &[
                ButtonEvent::release(0),
                ButtonEvent::press(2),
                ButtonEvent::press(4)
            ]
        );
        assert_eq!(pad.held_slots().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_clear_edges_keeps_held_state() {
        let mut pad = ButtonPad::default();
        pad.apply_frame([true, false, false, false, false]);
        pad.clear_edges();
        assert!(pad.is_held(0));
        assert!(!pad.buttons[0].just_pressed);
        assert!(!pad.is_held(7));
    }
}
