//! Interaction rays toggling gravity on the nearest capable target.

use glam::{Vec2, Vec3};
use gravflip::raycast::{Collider, Ray, SpatialQuery, TargetSet};
use gravflip::{GravityField, PlayerAgent, PlayerConfig, SoundCue};
use rstest::{fixture, rstest};
use test_utils::{assert_vec3_near, cube, scene_with_block_ahead, RecordingSink};

#[fixture]
fn agent() -> PlayerAgent {
    PlayerAgent::new(PlayerConfig {
        camera_offset: Vec3::ZERO,
        interact_range: 50.0,
        ..PlayerConfig::default()
    })
}

fn inverted_flags(scene: &TargetSet) -> Vec<Option<bool>> {
    scene
        .iter()
        .map(|target| target.gravity.map(|field| field.is_inverted()))
        .collect()
}

#[rstest]
fn ray_at_ten_units_toggles_that_target_once(agent: PlayerAgent) {
    let (mut scene, block) = scene_with_block_ahead(10.0, 0.0, true);
    let mut sink = RecordingSink::default();

    let outcome = agent.interact(Vec3::ZERO, &mut scene, &mut sink);

    assert!(outcome.toggled);
    assert!(scene.gravity(block).is_some_and(GravityField::is_inverted));
    assert_eq!(sink.cues, vec![SoundCue::Fire]);
    assert_eq!(sink.beams.len(), 1);
    assert_vec3_near(outcome.endpoint, Vec3::new(0.0, 0.0, 9.5), 1e-4);
}

#[rstest]
fn only_the_nearest_capable_target_flips(agent: PlayerAgent) {
    let mut scene = TargetSet::default();
    scene.spawn(Vec3::new(0.0, 0.0, 20.0), cube(), Some(GravityField::default()));
    scene.spawn(Vec3::new(0.0, 0.0, 10.0), cube(), Some(GravityField::default()));
    scene.spawn(Vec3::new(3.0, 0.0, 10.0), cube(), Some(GravityField::default()));

    agent.interact(Vec3::ZERO, &mut scene, &mut RecordingSink::default());

    assert_eq!(
        inverted_flags(&scene),
        vec![Some(false), Some(true), Some(false)]
    );
}

#[rstest]
fn target_without_capability_blocks_the_ray(agent: PlayerAgent) {
    let mut scene = TargetSet::default();
    scene.spawn(Vec3::new(0.0, 0.0, 5.0), Collider::Sphere { radius: 1.0 }, None);
    scene.spawn(Vec3::new(0.0, 0.0, 10.0), cube(), Some(GravityField::default()));
    let mut sink = RecordingSink::default();

    let outcome = agent.interact(Vec3::ZERO, &mut scene, &mut sink);

    assert!(!outcome.toggled);
    assert!(outcome
        .hit_distance
        .is_some_and(|distance| (distance - 4.0).abs() < 1e-5));
    assert_eq!(inverted_flags(&scene), vec![None, Some(false)]);
    assert_eq!(sink.beams.len(), 1);
}

#[rstest]
fn miss_leaves_every_field_alone(mut agent: PlayerAgent) {
    let (mut scene, block) = scene_with_block_ahead(10.0, 0.0, true);
    // Default sensitivity doubles the input: a quarter turn to the right.
    agent.apply_look(Vec2::new(45.0, 0.0));
    let mut sink = RecordingSink::default();

    let outcome = agent.interact(Vec3::ZERO, &mut scene, &mut sink);

    assert!(!outcome.toggled);
    assert!(outcome.hit_distance.is_none());
    assert!(scene.gravity(block).is_some_and(|field| !field.is_inverted()));
    assert_vec3_near(outcome.endpoint, Vec3::new(50.0, 0.0, 0.0), 1e-3);
}

#[rstest]
fn targets_beyond_range_are_missed() {
    let (mut scene, _) = scene_with_block_ahead(60.0, 0.0, true);
    assert!(scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z, 50.0)).is_none());
}

#[rstest]
fn default_camera_height_hits_block_at_eye_level() {
    let agent = PlayerAgent::default();
    let (mut scene, block) = scene_with_block_ahead(10.0, 0.6, true);

    let outcome = agent.interact(Vec3::ZERO, &mut scene, &mut RecordingSink::default());

    assert!(outcome.toggled);
    assert!(scene.gravity(block).is_some_and(GravityField::is_inverted));
    // The ray leaves from the eye, not the muzzle.
    assert_vec3_near(outcome.ray.origin, Vec3::new(0.0, 0.6, 0.0), 1e-6);
}
