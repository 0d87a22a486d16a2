//! Static tuning for a player agent.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_BEAM_DURATION, DEFAULT_CAMERA_HEIGHT, DEFAULT_INTERACT_RANGE,
    DEFAULT_LOOK_SENSITIVITY, DEFAULT_MAX_HORIZONTAL_SPEED, DEFAULT_MOVE_SPEED,
};

/// Movement, look and interaction settings of a player.
///
/// Every field has a default, so configuration files only need to list the
/// values they change.
///
/// # Examples
///
/// ```
/// use gravflip::PlayerConfig;
///
/// let config: PlayerConfig = serde_json::from_str(r#"{ "move_speed": 8.0 }"#).unwrap();
/// assert_eq!(config.move_speed, 8.0);
/// assert_eq!(config.max_horizontal_speed, 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Target ground speed at full input, in units per second.
    pub move_speed: f32,
    /// Upper bound on horizontal speed after each tick.
    pub max_horizontal_speed: f32,
    /// Degrees of rotation per unit of look input.
    pub look_sensitivity: f32,
    /// Maximum reach of the interaction ray.
    pub interact_range: f32,
    /// Seconds the interaction beam stays visible.
    pub beam_duration: f32,
    /// Camera pivot position relative to the body origin.
    pub camera_offset: Vec3,
    /// Beam start point in camera space.
    pub muzzle_offset: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            max_horizontal_speed: DEFAULT_MAX_HORIZONTAL_SPEED,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            interact_range: DEFAULT_INTERACT_RANGE,
            beam_duration: DEFAULT_BEAM_DURATION,
            camera_offset: Vec3::new(0.0, DEFAULT_CAMERA_HEIGHT, 0.0),
            muzzle_offset: Vec3::new(0.25, -0.2, 0.5),
        }
    }
}
