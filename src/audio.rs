//! Mixer volume settings.
//!
//! Volumes are stored as linear slider values in `[0, 1]` and pushed to the
//! mixer as decibels. The mixer itself lives outside the crate and is reached
//! through [`MixerSink`].

use std::collections::BTreeMap;

use bevy::prelude::Resource;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_VOLUME, SILENT_DECIBELS};

/// Mixer channel exposed in the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeChannel {
    /// Overall output level.
    Master,
    /// Background music.
    Music,
    /// Sound effects.
    Sfx,
}

impl VolumeChannel {
    /// Every channel, in menu order.
    pub const ALL: [Self; 3] = [Self::Master, Self::Music, Self::Sfx];

    /// Name of the exposed mixer parameter driven by this channel.
    #[must_use]
    pub const fn parameter(self) -> &'static str {
        match self {
            Self::Master => "masterVol",
            Self::Music => "musicVol",
            Self::Sfx => "sfxVol",
        }
    }
}

/// Converts a linear slider value to mixer attenuation.
///
/// Zero maps to [`SILENT_DECIBELS`]; anything else is `20 * log10(volume)`,
/// never quieter than silence.
///
/// # Examples
///
/// ```
/// use gravflip::audio::linear_to_decibels;
/// assert_eq!(linear_to_decibels(0.0), -80.0);
/// assert!((linear_to_decibels(1.0)).abs() < 1e-6);
/// assert!((linear_to_decibels(0.1) + 20.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn linear_to_decibels(volume: f32) -> f32 {
    if volume <= 0.0 || !volume.is_finite() {
        return SILENT_DECIBELS;
    }
    (20.0 * volume.log10()).max(SILENT_DECIBELS)
}

/// Percentage label shown next to a volume slider, truncated like the
/// slider's own readout.
///
/// # Examples
///
/// ```
/// use gravflip::audio::volume_label;
/// assert_eq!(volume_label(0.0), "0%");
/// assert_eq!(volume_label(0.505), "50%");
/// assert_eq!(volume_label(1.0), "100%");
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to [0, 100] before truncating to a whole percent."
)]
pub fn volume_label(volume: f32) -> String {
    if linear_to_decibels(volume) <= SILENT_DECIBELS {
        return "0%".to_owned();
    }
    let percent = (volume.clamp(0.0, 1.0) * 100.0).trunc() as i32;
    format!("{percent}%")
}

/// Receiver of mixer parameter updates.
#[cfg_attr(test, mockall::automock)]
pub trait MixerSink {
    /// Sets an exposed mixer parameter, in decibels.
    fn set_parameter(&mut self, parameter: &str, decibels: f32);
}

/// Mixer stand-in that remembers the last level written to each parameter.
///
/// Headless builds have no audio device; this keeps the mixer state
/// observable for diagnostics and tests.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MixerLevels {
    levels: BTreeMap<String, f32>,
}

impl MixerLevels {
    /// Last level written to `parameter`, in decibels.
    #[must_use]
    pub fn decibels(&self, parameter: &str) -> Option<f32> {
        self.levels.get(parameter).copied()
    }
}

impl MixerSink for MixerLevels {
    fn set_parameter(&mut self, parameter: &str, decibels: f32) {
        self.levels.insert(parameter.to_owned(), decibels);
    }
}

/// Linear volume of every channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSettings {
    /// Master channel volume.
    pub master: f32,
    /// Music channel volume.
    pub music: f32,
    /// Effects channel volume.
    pub sfx: f32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            master: DEFAULT_VOLUME,
            music: DEFAULT_VOLUME,
            sfx: DEFAULT_VOLUME,
        }
    }
}

impl VolumeSettings {
    /// Linear volume of `channel`.
    #[must_use]
    pub const fn get(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Master => self.master,
            VolumeChannel::Music => self.music,
            VolumeChannel::Sfx => self.sfx,
        }
    }

    /// Stores a slider value for `channel`, clamped to `[0, 1]`, and pushes it
    /// to the mixer.
    pub fn set<M>(&mut self, channel: VolumeChannel, volume: f32, mixer: &mut M)
    where
        M: MixerSink + ?Sized,
    {
        let clamped = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match channel {
            VolumeChannel::Master => self.master = clamped,
            VolumeChannel::Music => self.music = clamped,
            VolumeChannel::Sfx => self.sfx = clamped,
        }
        self.apply_channel(channel, mixer);
    }

    /// Pushes one channel's current volume to the mixer.
    pub fn apply_channel<M>(&self, channel: VolumeChannel, mixer: &mut M)
    where
        M: MixerSink + ?Sized,
    {
        let decibels = linear_to_decibels(self.get(channel));
        debug!("mixer {} -> {decibels:.2} dB", channel.parameter());
        mixer.set_parameter(channel.parameter(), decibels);
    }

    /// Pushes every channel to the mixer, as done once at startup.
    pub fn apply_all<M>(&self, mixer: &mut M)
    where
        M: MixerSink + ?Sized,
    {
        for channel in VolumeChannel::ALL {
            self.apply_channel(channel, mixer);
        }
    }

    /// Whether every channel lies within `[0, 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        VolumeChannel::ALL
            .into_iter()
            .all(|channel| (0.0..=1.0).contains(&self.get(channel)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mockall::predicate::{always, eq, function};
    use rstest::rstest;

    #[rstest]
    #[case::tiny(1e-6)]
    #[case::negative(-0.5)]
    #[case::nan(f32::NAN)]
    fn quiet_or_invalid_values_clamp_to_silence(#[case] volume: f32) {
        assert_relative_eq!(linear_to_decibels(volume), SILENT_DECIBELS);
    }

    #[rstest]
    fn defaults_are_half_volume() {
        let settings = VolumeSettings::default();
        for channel in VolumeChannel::ALL {
            assert_relative_eq!(settings.get(channel), 0.5);
        }
        assert!(settings.is_valid());
    }

    #[rstest]
    fn set_clamps_and_pushes_to_mixer() {
        let mut mixer = MockMixerSink::new();
        mixer
            .expect_set_parameter()
            .with(eq("musicVol"), function(|db: &f32| db.abs() < 1e-6))
            .times(1)
            .return_const(());

        let mut settings = VolumeSettings::default();
        settings.set(VolumeChannel::Music, 3.0, &mut mixer);
        assert_relative_eq!(settings.music, 1.0);
    }

    #[rstest]
    fn apply_all_touches_every_parameter() {
        let mut mixer = MockMixerSink::new();
        for channel in VolumeChannel::ALL {
            mixer
                .expect_set_parameter()
                .with(eq(channel.parameter()), always())
                .times(1)
                .return_const(());
        }
        VolumeSettings::default().apply_all(&mut mixer);
    }

    #[rstest]
    fn mixer_levels_keep_the_latest_value() {
        let mut levels = MixerLevels::default();
        let mut settings = VolumeSettings::default();
        settings.set(VolumeChannel::Sfx, 0.0, &mut levels);
        assert_eq!(levels.decibels("sfxVol"), Some(SILENT_DECIBELS));
        assert_eq!(levels.decibels("masterVol"), None);

        settings.apply_all(&mut levels);
        let master = levels.decibels("masterVol").unwrap_or_default();
        assert_relative_eq!(master, 20.0 * 0.5_f32.log10(), epsilon = 1e-5);
    }
}
