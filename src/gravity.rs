//! Toggleable per-body gravity.
//!
//! Each affected body carries a [`GravityField`] in place of global gravity.
//! Once per fixed tick the field is converted into a single vertical
//! acceleration and handed to the body's integrator.

use bevy::prelude::Component;
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::capability::Toggleable;
use crate::integrator::RigidBodyIntegrator;
use crate::{DEFAULT_GRAVITY_STRENGTH, WORLD_UP};

/// Binary gravity direction plus a magnitude for one body.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gravflip::GravityField;
///
/// let mut field = GravityField::new(9.81);
/// assert_eq!(field.tick_force(), Vec3::new(0.0, -9.81, 0.0));
/// field.toggle();
/// assert_eq!(field.tick_force(), Vec3::new(0.0, 9.81, 0.0));
/// ```
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityField {
    inverted: bool,
    strength: f32,
}

impl Default for GravityField {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_STRENGTH)
    }
}

impl GravityField {
    /// Creates a field pulling downwards with the given magnitude.
    #[must_use]
    pub const fn new(strength: f32) -> Self {
        Self {
            inverted: false,
            strength,
        }
    }

    /// Whether the field currently pushes the body upwards.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Acceleration magnitude in units per second squared.
    #[must_use]
    pub const fn strength(&self) -> f32 {
        self.strength
    }

    /// Flips the gravity direction.
    pub fn toggle(&mut self) {
        self.inverted = !self.inverted;
        debug!("gravity field toggled, inverted={}", self.inverted);
    }

    /// Acceleration contributed this tick: `+up` when inverted, `-up`
    /// otherwise, scaled by the strength.
    #[must_use]
    pub fn tick_force(&self) -> Vec3 {
        let direction = if self.inverted { WORLD_UP } else { -WORLD_UP };
        direction * self.strength
    }

    /// Feeds this tick's acceleration to the body's integrator.
    pub fn apply<I>(&self, body: &mut I)
    where
        I: RigidBodyIntegrator + ?Sized,
    {
        body.add_acceleration(self.tick_force());
    }
}

impl Toggleable for GravityField {
    fn toggle(&mut self) {
        Self::toggle(self);
    }
}
