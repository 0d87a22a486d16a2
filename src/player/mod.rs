//! First-person player agent.
//!
//! The agent owns its look angles and reads everything else through the
//! boundary traits: velocity through [`RigidBodyIntegrator`], ray hits through
//! [`SpatialQuery`] and cosmetic output through [`PresentationSink`]. Yaw turns
//! the whole body while pitch only tilts the camera pivot, so movement
//! direction never depends on where the camera is looking vertically.

mod config;

pub use config::PlayerConfig;

use bevy::prelude::Component;
use glam::{Quat, Vec2, Vec3};
use log::debug;

use crate::integrator::RigidBodyIntegrator;
use crate::presentation::{Beam, PresentationSink, SoundCue};
use crate::raycast::{Ray, SpatialQuery};
use crate::vector_math::{clamp_horizontal_speed, flatten_direction};
use crate::{LOCAL_FORWARD, LOCAL_RIGHT, MOVE_BLEND_FACTOR, PITCH_LIMIT_DEGREES};

/// Computes the velocity a body should have after one movement tick.
///
/// The desired planar velocity is built from the horizontal `forward` and
/// `right` basis, the current vertical velocity is carried over untouched,
/// the current velocity is blended towards that target by
/// [`MOVE_BLEND_FACTOR`] and the planar part is finally clamped to
/// `max_horizontal_speed`.
///
/// # Examples
///
/// ```
/// use glam::{Vec2, Vec3};
/// use gravflip::player::movement_velocity;
/// use gravflip::PlayerConfig;
///
/// let config = PlayerConfig::default();
/// let next = movement_velocity(Vec3::new(0.0, -3.0, 0.0), Vec3::Z, Vec3::X, Vec2::Y, &config);
/// assert!((next.z - 1.0).abs() < 1e-6);
/// assert_eq!(next.y, -3.0);
/// ```
#[must_use]
pub fn movement_velocity(
    current: Vec3,
    forward: Vec3,
    right: Vec3,
    move_axis: Vec2,
    config: &PlayerConfig,
) -> Vec3 {
    let mut desired = (forward * move_axis.y + right * move_axis.x) * config.move_speed;
    desired.y = current.y;
    let mut blended = current.lerp(desired, MOVE_BLEND_FACTOR);
    // Lerping a value with itself can still round; keep vertical exact.
    blended.y = current.y;
    clamp_horizontal_speed(blended, config.max_horizontal_speed)
}

/// What a single interaction produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractOutcome {
    /// The ray that was cast from the camera.
    pub ray: Ray,
    /// Where the beam ends: the hit point, or the end of the ray.
    pub endpoint: Vec3,
    /// Distance to the hit, if something was hit.
    pub hit_distance: Option<f32>,
    /// Whether a gravity capability was toggled.
    pub toggled: bool,
}

/// Per-player look state and configuration.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAgent {
    config: PlayerConfig,
    yaw_degrees: f32,
    pitch_degrees: f32,
}

impl Default for PlayerAgent {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl PlayerAgent {
    /// Creates an agent looking along `+Z` with a level camera.
    #[must_use]
    pub const fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
        }
    }

    /// The agent's configuration.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Accumulated body yaw in degrees. Not wrapped.
    #[must_use]
    pub const fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    /// Camera pitch in degrees; positive values look down.
    #[must_use]
    pub const fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Body orientation: yaw about world up.
    #[must_use]
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
    }

    /// Camera pivot rotation relative to the body: pitch only.
    #[must_use]
    pub fn camera_local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch_degrees.to_radians())
    }

    /// Camera orientation in world space.
    #[must_use]
    pub fn camera_rotation(&self) -> Quat {
        self.body_rotation() * self.camera_local_rotation()
    }

    /// Direction the camera looks along.
    #[must_use]
    pub fn camera_forward(&self) -> Vec3 {
        self.camera_rotation() * LOCAL_FORWARD
    }

    /// World position of the camera for a body at `body_position`.
    #[must_use]
    pub fn camera_position(&self, body_position: Vec3) -> Vec3 {
        body_position + self.body_rotation() * self.config.camera_offset
    }

    /// World position of the beam origin for a body at `body_position`.
    #[must_use]
    pub fn muzzle_position(&self, body_position: Vec3) -> Vec3 {
        self.camera_position(body_position) + self.camera_rotation() * self.config.muzzle_offset
    }

    /// Horizontal movement basis derived from the camera orientation.
    ///
    /// Pitch turns about the camera's right axis, so `right` always stays
    /// horizontal. Only `forward` collapses to zero when the camera looks
    /// straight up or down; forward input then adds no motion while strafing
    /// still works.
    #[must_use]
    pub fn movement_basis(&self) -> (Vec3, Vec3) {
        let rotation = self.camera_rotation();
        (
            flatten_direction(rotation * LOCAL_FORWARD),
            flatten_direction(rotation * LOCAL_RIGHT),
        )
    }

    /// Runs one fixed movement tick and writes the new velocity to `body`.
    pub fn fixed_tick<I>(&self, body: &mut I, move_axis: Vec2) -> Vec3
    where
        I: RigidBodyIntegrator + ?Sized,
    {
        let (forward, right) = self.movement_basis();
        let velocity = movement_velocity(body.velocity(), forward, right, move_axis, &self.config);
        body.set_velocity(velocity);
        velocity
    }

    /// Applies one frame of look input.
    ///
    /// `look_axis.x` turns the body, `look_axis.y` tilts the camera up. Pitch
    /// stays within `±PITCH_LIMIT_DEGREES`; yaw accumulates without bound.
    pub fn apply_look(&mut self, look_axis: Vec2) {
        if !look_axis.is_finite() {
            return;
        }
        let sensitivity = self.config.look_sensitivity;
        self.yaw_degrees += look_axis.x * sensitivity;
        self.pitch_degrees = (self.pitch_degrees - look_axis.y * sensitivity)
            .clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Fires the interaction ray from the camera.
    ///
    /// A hit target with a gravity capability is toggled; anything else,
    /// including a miss, is a normal outcome. A beam and a sound cue are sent
    /// to `sink` in every case.
    pub fn interact<Q, S>(
        &self,
        body_position: Vec3,
        scene: &mut Q,
        sink: &mut S,
    ) -> InteractOutcome
    where
        Q: SpatialQuery + ?Sized,
        S: PresentationSink + ?Sized,
    {
        sink.play_cue(SoundCue::Fire);

        let ray = Ray::new(
            self.camera_position(body_position),
            self.camera_forward(),
            self.config.interact_range,
        );
        let (endpoint, hit_distance, toggled) = match scene.cast_ray(&ray) {
            Some(hit) => {
                let toggled = hit.capability.is_some();
                if let Some(target) = hit.capability {
                    target.toggle();
                }
                (hit.point, Some(hit.distance), toggled)
            }
            None => (ray.end(), None, false),
        };
        debug!("interact ray hit={hit_distance:?} toggled={toggled}");

        sink.show_beam(Beam {
            from: self.muzzle_position(body_position),
            to: endpoint,
            duration: self.config.beam_duration,
        });

        InteractOutcome {
            ray,
            endpoint,
            hit_distance,
            toggled,
        }
    }
}
