//! Builder for headless Bevy apps running the gravity flip plugin.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use gravflip::{GameConfig, GravityFlipPlugin};

/// Builder for test `App` instances with a deterministic clock.
///
/// Every `update` advances time by exactly one configured tick, although
/// Bevy reports a zero delta for the very first update.
pub struct HeadlessAppBuilder {
    config: GameConfig,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Starts from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    /// Overrides the configuration.
    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the app with `MinimalPlugins` and finalised plugins.
    #[must_use]
    pub fn build(self) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(GravityFlipPlugin::new(self.config))
            .insert_resource(TimeUpdateStrategy::ManualDuration(
                Duration::from_secs_f64(self.config.fixed_timestep_seconds),
            ));
        app.finish();
        app.cleanup();
        app
    }
}
