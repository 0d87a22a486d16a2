//! Cosmetic side effects of player actions.
//!
//! Beams and sound cues carry no gameplay state. The simulation emits them
//! through a [`PresentationSink`] and never reads anything back, so a
//! headless build can log them or drop them entirely.

use glam::Vec3;
use log::debug;

/// Transient line drawn from the muzzle to where the interaction ray ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    /// Start point, usually the muzzle.
    pub from: Vec3,
    /// End point: the hit point or the end of the ray.
    pub to: Vec3,
    /// Seconds the beam stays visible.
    pub duration: f32,
}

/// Fire-and-forget sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// The gravity gun was fired.
    Fire,
}

/// Receiver for cosmetic events.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationSink {
    /// Shows a beam for its duration.
    fn show_beam(&mut self, beam: Beam);

    /// Plays a one-shot sound cue.
    fn play_cue(&mut self, cue: SoundCue);
}

/// Sink that only logs events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn show_beam(&mut self, beam: Beam) {
        debug!(
            "beam {:?} -> {:?} for {:.3}s",
            beam.from, beam.to, beam.duration
        );
    }

    fn play_cue(&mut self, cue: SoundCue) {
        debug!("sound cue {cue:?}");
    }
}

/// Tracks the visible beam and hides it once its duration elapses.
///
/// Advanced on the frame cadence, so expiry follows wall-clock time rather
/// than simulation ticks.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gravflip::presentation::{Beam, BeamTimer};
///
/// let mut timer = BeamTimer::default();
/// timer.show(Beam { from: Vec3::ZERO, to: Vec3::Z, duration: 0.05 });
/// timer.advance(0.03);
/// assert!(timer.visible().is_some());
/// timer.advance(0.03);
/// assert!(timer.visible().is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BeamTimer {
    beam: Option<Beam>,
    remaining: f32,
}

impl BeamTimer {
    /// Shows `beam`, replacing any beam still visible and restarting the timer.
    pub const fn show(&mut self, beam: Beam) {
        self.remaining = beam.duration;
        self.beam = Some(beam);
    }

    /// Counts down by `dt` seconds, hiding the beam when the timer runs out.
    pub fn advance(&mut self, dt: f32) {
        if self.beam.is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.beam = None;
            self.remaining = 0.0;
        }
    }

    /// The beam currently on screen, if any.
    #[must_use]
    pub const fn visible(&self) -> Option<&Beam> {
        self.beam.as_ref()
    }
}

impl PresentationSink for BeamTimer {
    fn show_beam(&mut self, beam: Beam) {
        self.show(beam);
    }

    fn play_cue(&mut self, _cue: SoundCue) {}
}
