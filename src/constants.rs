//! Tuning constants shared by the simulation and the engine adapter.
//!
//! Axis conventions follow the host scene: `+Y` is up, `+Z` is the body's
//! forward direction and `+X` its right.

use glam::Vec3;

/// World up axis.
pub const WORLD_UP: Vec3 = Vec3::Y;
/// Local forward axis of bodies and cameras.
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;
/// Local right axis of bodies and cameras.
pub const LOCAL_RIGHT: Vec3 = Vec3::X;

/// Default gravity magnitude in units per second squared.
pub const DEFAULT_GRAVITY_STRENGTH: f32 = 9.81;

/// Fixed simulation interval. Movement blending is tuned per tick, so this
/// value is part of the movement contract rather than a free parameter.
pub const FIXED_TIMESTEP_SECONDS: f64 = 0.02;

/// Fraction of the gap between current and desired velocity closed per tick.
pub const MOVE_BLEND_FACTOR: f32 = 0.2;

/// Camera pitch limit in degrees, applied symmetrically.
pub const PITCH_LIMIT_DEGREES: f32 = 90.0;

/// Ground speed at full movement input, in units per second.
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
/// Horizontal speed cap applied after every movement tick.
pub const DEFAULT_MAX_HORIZONTAL_SPEED: f32 = 7.0;
/// Degrees turned per unit of look input.
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 2.0;
/// Reach of the interaction ray.
pub const DEFAULT_INTERACT_RANGE: f32 = 50.0;
/// How long the cosmetic beam stays visible, in seconds.
pub const DEFAULT_BEAM_DURATION: f32 = 0.05;

/// Eye height of the camera pivot above the body origin.
pub const DEFAULT_CAMERA_HEIGHT: f32 = 0.6;

/// Volume assigned to every mixer channel when no preference exists.
pub const DEFAULT_VOLUME: f32 = 0.5;
/// Attenuation used for a fully muted channel, in decibels.
pub const SILENT_DECIBELS: f32 = -80.0;
