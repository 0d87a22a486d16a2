//! Player input as seen by the simulation.
//!
//! Continuous axes are sampled at arbitrary times and only the latest value
//! matters, so they are simply overwritten. Interaction is different: every
//! press must trigger exactly once however the fixed tick and the render frame
//! interleave, so presses go through a rising-edge latch that the next
//! processing step consumes.

use bevy::prelude::Resource;
use glam::Vec2;

/// Rising-edge detector for a digital button.
///
/// # Examples
///
/// ```
/// use gravflip::input::InteractLatch;
///
/// let mut latch = InteractLatch::default();
/// latch.observe(true);
/// latch.observe(true); // still held, no new press
/// assert!(latch.take());
/// assert!(!latch.take());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractLatch {
    held: bool,
    pending: bool,
}

impl InteractLatch {
    /// Records the current button level, latching a press on a rising edge.
    pub const fn observe(&mut self, held: bool) {
        if held && !self.held {
            self.pending = true;
        }
        self.held = held;
    }

    /// Latches a press reported directly by an event-driven source.
    pub const fn press(&mut self) {
        self.pending = true;
    }

    /// Whether a press is waiting to be consumed.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consumes the latched press, returning whether there was one.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Latest sampled player input.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    move_axis: Vec2,
    look_axis: Vec2,
    interact: InteractLatch,
}

impl InputState {
    /// Movement axis: `x` strafes right, `y` moves forward.
    #[must_use]
    pub const fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    /// Look axis: `x` turns right, `y` looks up.
    #[must_use]
    pub const fn look_axis(&self) -> Vec2 {
        self.look_axis
    }

    /// Overwrites the movement axis; non-finite samples are treated as idle.
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = finite_or_zero(axis);
    }

    /// Overwrites the look axis; non-finite samples are treated as idle.
    pub fn set_look_axis(&mut self, axis: Vec2) {
        self.look_axis = finite_or_zero(axis);
    }

    /// Feeds the interact button level into the edge latch.
    pub const fn set_interact_held(&mut self, held: bool) {
        self.interact.observe(held);
    }

    /// Latches an interact press from an event-driven source.
    pub const fn press_interact(&mut self) {
        self.interact.press();
    }

    /// Consumes a pending interact press.
    pub fn take_interact(&mut self) -> bool {
        self.interact.take()
    }

    /// Whether an interact press is waiting to be consumed.
    #[must_use]
    pub const fn interact_pending(&self) -> bool {
        self.interact.is_pending()
    }
}

fn finite_or_zero(axis: Vec2) -> Vec2 {
    if axis.is_finite() {
        axis
    } else {
        Vec2::ZERO
    }
}

/// Directional key states used to build the movement axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of exactly four directional keys."
)]
pub struct MoveKeys {
    /// Whether a forward key (W or `ArrowUp`) is pressed.
    pub forward: bool,
    /// Whether a backward key (S or `ArrowDown`) is pressed.
    pub backward: bool,
    /// Whether a left key (A or `ArrowLeft`) is pressed.
    pub left: bool,
    /// Whether a right key (D or `ArrowRight`) is pressed.
    pub right: bool,
}

/// Computes the movement axis from key states.
///
/// Opposing keys cancel and diagonals are normalised, so keyboard movement
/// never exceeds unit length.
///
/// # Examples
///
/// ```
/// use gravflip::input::{move_axis_from_keys, MoveKeys};
///
/// let axis = move_axis_from_keys(MoveKeys { forward: true, right: true, ..Default::default() });
/// assert!((axis.length() - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn move_axis_from_keys(keys: MoveKeys) -> Vec2 {
    const fn axis(neg: bool, pos: bool) -> f32 {
        match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    Vec2::new(axis(keys.left, keys.right), axis(keys.backward, keys.forward)).normalize_or_zero()
}

/// Converts a raw mouse delta (pixels, `+y` down the screen) into the look
/// axis (`+y` looks up).
#[must_use]
pub fn look_axis_from_mouse(delta: Vec2, scale: f32) -> Vec2 {
    Vec2::new(delta.x, -delta.y) * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn held_button_latches_once() {
        let mut latch = InteractLatch::default();
        latch.observe(true);
        assert!(latch.take());
        latch.observe(true);
        latch.observe(true);
        assert!(!latch.take(), "holding must not re-trigger");
    }

    #[rstest]
    fn release_and_press_latches_again() {
        let mut latch = InteractLatch::default();
        latch.observe(true);
        latch.observe(false);
        assert!(latch.take(), "a tap between steps must not be lost");
        latch.observe(true);
        assert!(latch.take());
    }

    #[rstest]
    fn unconsumed_presses_collapse_into_one() {
        let mut latch = InteractLatch::default();
        latch.press();
        latch.press();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[rstest]
    fn axes_are_last_value_wins() {
        let mut input = InputState::default();
        input.set_move_axis(Vec2::new(1.0, 0.0));
        input.set_move_axis(Vec2::new(0.0, -1.0));
        input.set_look_axis(Vec2::new(3.0, 4.0));
        assert_eq!(input.move_axis(), Vec2::new(0.0, -1.0));
        assert_eq!(input.look_axis(), Vec2::new(3.0, 4.0));
    }

    #[rstest]
    fn non_finite_axes_read_as_idle() {
        let mut input = InputState::default();
        input.set_look_axis(Vec2::new(f32::NAN, 1.0));
        assert_eq!(input.look_axis(), Vec2::ZERO);
    }

    #[rstest]
    #[case::none(MoveKeys::default(), Vec2::ZERO)]
    #[case::forward(MoveKeys { forward: true, ..Default::default() }, Vec2::new(0.0, 1.0))]
    #[case::left(MoveKeys { left: true, ..Default::default() }, Vec2::new(-1.0, 0.0))]
    #[case::cancel(MoveKeys { forward: true, backward: true, ..Default::default() }, Vec2::ZERO)]
    fn keys_map_to_axis(#[case] keys: MoveKeys, #[case] expected: Vec2) {
        let axis = move_axis_from_keys(keys);
        assert!(
            (axis - expected).length() < 1e-6,
            "expected {expected:?}, got {axis:?}"
        );
    }

    #[rstest]
    fn mouse_up_looks_up() {
        let axis = look_axis_from_mouse(Vec2::new(10.0, -20.0), 0.5);
        assert_eq!(axis, Vec2::new(5.0, 10.0));
    }
}
