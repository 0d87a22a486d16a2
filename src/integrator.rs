//! Boundary between gameplay code and the rigid-body integrator.
//!
//! Gameplay components never move bodies themselves. They read and write
//! linear velocity and contribute accelerations; the integrator owns position
//! integration. [`RigidBody`] is a minimal integrator used by the Bevy adapter
//! and by headless runs.

use bevy::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Velocity and acceleration access exposed by a rigid-body integrator.
#[cfg_attr(test, mockall::automock)]
pub trait RigidBodyIntegrator {
    /// Current linear velocity.
    fn velocity(&self) -> Vec3;

    /// Overwrites the linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Adds a mass-independent acceleration for the current tick.
    fn add_acceleration(&mut self, acceleration: Vec3);
}

/// Point-mass body integrated with semi-implicit Euler.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gravflip::{RigidBody, RigidBodyIntegrator};
///
/// let mut body = RigidBody::at(Vec3::ZERO);
/// body.add_acceleration(Vec3::new(0.0, -10.0, 0.0));
/// body.integrate(0.5);
/// assert_eq!(body.velocity(), Vec3::new(0.0, -5.0, 0.0));
/// assert_eq!(body.position, Vec3::new(0.0, -2.5, 0.0));
/// ```
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// World-space position.
    pub position: Vec3,
    /// Linear velocity in units per second.
    pub linear_velocity: Vec3,
    /// Accelerations accumulated since the last [`RigidBody::integrate`].
    #[serde(skip)]
    pending_acceleration: Vec3,
}

impl RigidBody {
    /// Creates a body at rest at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            linear_velocity: Vec3::ZERO,
            pending_acceleration: Vec3::ZERO,
        }
    }

    /// Returns the acceleration accumulated for the current tick.
    #[must_use]
    pub const fn pending_acceleration(&self) -> Vec3 {
        self.pending_acceleration
    }

    /// Advances the body by `dt` seconds and clears pending accelerations.
    ///
    /// Velocity is updated before position so a body released from rest moves
    /// on the very first step.
    pub fn integrate(&mut self, dt: f32) {
        self.linear_velocity += self.pending_acceleration * dt;
        self.position += self.linear_velocity * dt;
        self.pending_acceleration = Vec3::ZERO;
    }
}

impl RigidBodyIntegrator for RigidBody {
    fn velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn add_acceleration(&mut self, acceleration: Vec3) {
        self.pending_acceleration += acceleration;
    }
}
