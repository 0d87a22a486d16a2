//! Horizontal movement blending and speed limits.

use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use gravflip::player::movement_velocity;
use gravflip::{
    clamp_horizontal_speed, horizontal_speed, PlayerAgent, PlayerConfig, RigidBody,
    RigidBodyIntegrator,
};
use rstest::{fixture, rstest};
use test_utils::assert_vec3_near;

#[fixture]
fn config() -> PlayerConfig {
    PlayerConfig {
        move_speed: 5.0,
        max_horizontal_speed: 7.0,
        ..PlayerConfig::default()
    }
}

#[rstest]
fn full_diagonal_is_clamped_to_max_speed(config: PlayerConfig) {
    let current = Vec3::new(5.0, -2.0, 5.0);
    let next = movement_velocity(current, Vec3::Z, Vec3::X, Vec2::ONE, &config);

    assert_relative_eq!(horizontal_speed(next), 7.0, epsilon = 1e-5);
    assert_relative_eq!(next.x, 4.95, epsilon = 0.01);
    assert_relative_eq!(next.z, 4.95, epsilon = 0.01);
    assert_eq!(next.y, -2.0);
}

#[rstest]
#[case::still(Vec3::ZERO)]
#[case::forward(Vec3::new(0.0, 0.0, 6.0))]
#[case::sideways_falling(Vec3::new(-3.0, -9.0, 1.0))]
#[case::at_limit(Vec3::new(7.0, 4.0, 0.0))]
fn idle_input_only_slows_down(config: PlayerConfig, #[case] current: Vec3) {
    let next = movement_velocity(current, Vec3::Z, Vec3::X, Vec2::ZERO, &config);
    let before = horizontal_speed(current);
    let after = horizontal_speed(next);
    if before == 0.0 {
        assert_eq!(after, 0.0);
    } else {
        assert!(after < before, "{after} should be below {before}");
    }
    assert_eq!(next.y, current.y);
}

#[rstest]
#[case::x_only(Vec3::new(12.0, 3.0, 0.0), 7.0)]
#[case::diagonal(Vec3::new(-8.0, -1.5, 8.0), 7.0)]
#[case::tiny_limit(Vec3::new(1.0, 0.25, 1.0), 0.5)]
fn clamp_hits_limit_and_keeps_vertical(#[case] velocity: Vec3, #[case] limit: f32) {
    let clamped = clamp_horizontal_speed(velocity, limit);
    assert_relative_eq!(horizontal_speed(clamped), limit, epsilon = 1e-5);
    assert_eq!(clamped.y, velocity.y);
    // Heading is preserved.
    assert_relative_eq!(
        clamped.x * velocity.z,
        clamped.z * velocity.x,
        epsilon = 1e-4
    );
}

#[rstest]
fn repeated_ticks_converge_on_move_speed(config: PlayerConfig) {
    let agent = PlayerAgent::new(config);
    let mut body = RigidBody::at(Vec3::ZERO);
    body.set_velocity(Vec3::new(0.0, -1.0, 0.0));

    let mut previous = 0.0;
    for _ in 0..60 {
        let velocity = agent.fixed_tick(&mut body, Vec2::Y);
        let speed = horizontal_speed(velocity);
        assert!(speed >= previous - 1e-5 && speed <= 5.0 + 1e-4);
        previous = speed;
    }
    assert_vec3_near(body.velocity(), Vec3::new(0.0, -1.0, 5.0), 1e-3);
}

#[rstest]
#[case::down(-90.0)]
#[case::up(90.0)]
fn vertical_camera_drops_forward_but_keeps_strafe(config: PlayerConfig, #[case] look_y: f32) {
    let mut agent = PlayerAgent::new(config);
    agent.apply_look(Vec2::new(0.0, look_y));

    let mut walking = RigidBody::at(Vec3::ZERO);
    agent.fixed_tick(&mut walking, Vec2::Y);
    assert!(horizontal_speed(walking.velocity()) < 1e-3);

    let mut strafing = RigidBody::at(Vec3::ZERO);
    agent.fixed_tick(&mut strafing, Vec2::X);
    assert_vec3_near(strafing.velocity(), Vec3::new(1.0, 0.0, 0.0), 1e-4);
}
