//! Yaw and pitch accumulation.

use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use gravflip::{PlayerAgent, PlayerConfig, PITCH_LIMIT_DEGREES};
use rstest::{fixture, rstest};
use test_utils::assert_vec3_near;

#[fixture]
fn agent() -> PlayerAgent {
    PlayerAgent::new(PlayerConfig {
        look_sensitivity: 1.5,
        ..PlayerConfig::default()
    })
}

#[fixture]
fn deltas() -> Vec<Vec2> {
    vec![
        Vec2::new(12.0, 40.0),
        Vec2::new(-3.5, 70.0),
        Vec2::new(200.0, -15.0),
        Vec2::new(0.25, -300.0),
        Vec2::new(-90.0, 5.0),
        Vec2::new(33.0, 120.0),
        Vec2::new(-400.0, -2.0),
    ]
}

#[rstest]
fn pitch_stays_within_limits(mut agent: PlayerAgent, deltas: Vec<Vec2>) {
    for delta in deltas {
        agent.apply_look(delta);
        assert!(
            (-PITCH_LIMIT_DEGREES..=PITCH_LIMIT_DEGREES).contains(&agent.pitch_degrees()),
            "pitch escaped: {}",
            agent.pitch_degrees()
        );
    }
}

#[rstest]
fn yaw_is_the_sum_of_deltas(mut agent: PlayerAgent, deltas: Vec<Vec2>) {
    let expected: f32 = deltas.iter().map(|delta| delta.x * 1.5).sum();
    for delta in deltas {
        agent.apply_look(delta);
    }
    assert_relative_eq!(agent.yaw_degrees(), expected, epsilon = 1e-3);
}

#[rstest]
fn non_finite_input_is_ignored(mut agent: PlayerAgent) {
    agent.apply_look(Vec2::new(10.0, 10.0));
    let before = agent;
    agent.apply_look(Vec2::new(f32::NAN, 1.0));
    agent.apply_look(Vec2::new(1.0, f32::INFINITY));
    assert_eq!(agent, before);
}

#[rstest]
fn pitch_tilts_camera_without_turning_body(mut agent: PlayerAgent) {
    agent.apply_look(Vec2::new(60.0, 20.0));
    let body_forward = agent.body_rotation() * Vec3::Z;
    assert_relative_eq!(body_forward.y, 0.0, epsilon = 1e-6);
    assert!(agent.camera_forward().y > 0.4);
    assert_vec3_near(
        agent.movement_basis().0,
        body_forward.normalize(),
        1e-5,
    );
}
