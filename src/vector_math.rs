//! Horizontal-plane vector helpers.
//! Small helpers for projecting directions and limiting planar speed.
use glam::Vec3;

/// Planar length below which a direction is considered to have no heading.
const NORMALIZE_EPSILON: f32 = 1e-5;

/// Returns the `x`/`z` part of a vector with the vertical component zeroed.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use gravflip::vector_math::horizontal;
/// assert_eq!(horizontal(Vec3::new(1.0, 5.0, -2.0)), Vec3::new(1.0, 0.0, -2.0));
/// ```
#[must_use]
pub const fn horizontal(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Returns the magnitude of the horizontal part of a vector.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use gravflip::vector_math::horizontal_speed;
/// let speed = horizontal_speed(Vec3::new(3.0, 100.0, 4.0));
/// assert!((speed - 5.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn horizontal_speed(vector: Vec3) -> f32 {
    horizontal(vector).length()
}

/// Projects a direction onto the horizontal plane and renormalises it.
///
/// A (near-)vertical, zero or non-finite input has no horizontal heading, so
/// the result is `Vec3::ZERO`.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gravflip::flatten_direction;
/// let flat = flatten_direction(Vec3::new(3.0, 7.0, 4.0));
/// assert!((flat - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
///
/// assert_eq!(flatten_direction(Vec3::Y), Vec3::ZERO);
/// ```
#[must_use]
pub fn flatten_direction(direction: Vec3) -> Vec3 {
    if !direction.is_finite() {
        return Vec3::ZERO;
    }
    let planar = horizontal(direction);
    if planar.length() < NORMALIZE_EPSILON {
        return Vec3::ZERO;
    }
    planar.normalize()
}

/// Limits the horizontal speed of `velocity` to `max_speed`.
///
/// When the planar magnitude exceeds the limit the `x`/`z` components are
/// rescaled to exactly `max_speed`; the vertical component is returned
/// unchanged in every case.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gravflip::clamp_horizontal_speed;
/// let clamped = clamp_horizontal_speed(Vec3::new(6.0, -2.0, 8.0), 5.0);
/// assert!((clamped - Vec3::new(3.0, -2.0, 4.0)).length() < 1e-6);
/// ```
#[must_use]
pub fn clamp_horizontal_speed(velocity: Vec3, max_speed: f32) -> Vec3 {
    let planar = horizontal(velocity);
    if planar.length() <= max_speed {
        return velocity;
    }
    let limited = planar.normalize_or_zero() * max_speed;
    Vec3::new(limited.x, velocity.y, limited.z)
}
