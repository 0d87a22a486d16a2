//! Engine-free scenes for interaction tests.

use glam::Vec3;
use gravflip::presentation::{Beam, PresentationSink, SoundCue};
use gravflip::raycast::{Collider, TargetId, TargetSet};
use gravflip::GravityField;

/// Unit cube collider.
#[must_use]
pub fn cube() -> Collider {
    Collider::Cuboid {
        half_extents: Vec3::splat(0.5),
    }
}

/// Builds a scene holding one unit cube centred `distance` units along `+Z`
/// at `height`, optionally carrying a default gravity field.
///
/// # Examples
/// ```
/// use test_utils::scene_with_block_ahead;
/// let (scene, block) = scene_with_block_ahead(10.0, 0.0, true);
/// assert_eq!(scene.len(), 1);
/// assert!(scene.gravity(block).is_some());
/// ```
#[must_use]
pub fn scene_with_block_ahead(distance: f32, height: f32, gravity: bool) -> (TargetSet, TargetId) {
    let mut scene = TargetSet::default();
    let block = scene.spawn(
        Vec3::new(0.0, height, distance),
        cube(),
        gravity.then(GravityField::default),
    );
    (scene, block)
}

/// Presentation sink that records everything it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Beams in arrival order.
    pub beams: Vec<Beam>,
    /// Cues in arrival order.
    pub cues: Vec<SoundCue>,
}

impl PresentationSink for RecordingSink {
    fn show_beam(&mut self, beam: Beam) {
        self.beams.push(beam);
    }

    fn play_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
