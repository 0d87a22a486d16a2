//! Utility helpers for tests.
//!
//! Scene builders, a headless app builder, a recording presentation sink and
//! rspec plumbing shared by the integration tests.

pub mod app;
pub mod scene;
pub mod suite;

pub use app::HeadlessAppBuilder;
pub use scene::{cube, scene_with_block_ahead, RecordingSink};
pub use suite::{run_serial, SharedApp};

use glam::Vec3;

/// Assert that two vectors differ by at most `epsilon` in every component.
///
/// # Panics
/// Panics with both vectors in the message when any component is off.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// test_utils::assert_vec3_near(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.000_001), 1e-5);
/// ```
#[track_caller]
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, epsilon: f32) {
    assert!(
        actual.abs_diff_eq(expected, epsilon),
        "expected {expected:?} within {epsilon}, got {actual:?}"
    );
}
