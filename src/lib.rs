#![cfg_attr(docsrs, feature(doc_cfg))]
//! Core logic for a first-person gravity toggle prototype.
//!
//! The simulation is split into engine-free pieces: [`GravityField`] adds a
//! constant acceleration that can be flipped, [`PlayerAgent`] turns input
//! into velocity, look angles and interaction rays, and the boundary traits
//! [`RigidBodyIntegrator`], [`SpatialQuery`] and [`PresentationSink`] stand in
//! for the physics, collision and cosmetic layers. [`GravityFlipPlugin`] runs
//! everything inside a Bevy app.
pub mod audio;
pub mod capability;
pub mod config;
pub mod constants;
pub mod gravity;
pub mod input;
pub mod integrator;
pub mod logging;
pub mod menu;
pub mod player;
pub mod plugin;
pub mod presentation;
pub mod raycast;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use audio::{MixerLevels, MixerSink, VolumeChannel, VolumeSettings};
pub use capability::Toggleable;
pub use config::{ConfigError, GameConfig};
pub use gravity::GravityField;
pub use input::InputState;
pub use integrator::{RigidBody, RigidBodyIntegrator};
pub use logging::init as init_logging;
pub use menu::{MainMenu, MenuCommand, PauseMenu};
pub use player::{InteractOutcome, PlayerAgent, PlayerConfig};
pub use plugin::{spawn_block, spawn_player, ActiveBeam, CameraPivot, GravityFlipPlugin};
pub use presentation::{Beam, BeamTimer, LogSink, PresentationSink, SoundCue};
pub use raycast::{Collider, Ray, RayHit, SpatialQuery, TargetSet};
pub use vector_math::{clamp_horizontal_speed, flatten_direction, horizontal_speed};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use gravflip::prelude::*;
    //! ```

    pub use crate::Collider;
    pub use crate::GameConfig;
    pub use crate::GravityField;
    pub use crate::GravityFlipPlugin;
    pub use crate::PlayerAgent;
    pub use crate::RigidBody;
    pub use crate::RigidBodyIntegrator;
    pub use crate::SpatialQuery;
    pub use crate::Toggleable;
}
