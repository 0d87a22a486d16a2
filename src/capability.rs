//! Capabilities a ray target may opt into.
//!
//! Spatial queries hand back a capability handle directly, so callers never
//! probe a hit object for its concrete type.

/// Behaviour of a target whose state flips when the player interacts with it.
pub trait Toggleable {
    /// Flips the target's state. Each call is visible: two calls restore the
    /// starting state.
    fn toggle(&mut self);
}
