//! Bevy adapter for the player and gravity simulation.
//!
//! [`GravityFlipPlugin`] installs the fixed timestep and wires the engine-free
//! types into two schedules. `FixedUpdate` runs movement, gravity and
//! integration in that order; `Update` samples input, applies look, fires
//! interactions and expires beams. Physics lives in [`RigidBody`]
//! components and is mirrored onto `Transform` after each tick.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use log::{debug, info};

use crate::audio::MixerLevels;
use crate::capability::Toggleable;
use crate::config::GameConfig;
use crate::gravity::GravityField;
use crate::input::{look_axis_from_mouse, move_axis_from_keys, InputState, MoveKeys};
use crate::integrator::RigidBody;
use crate::menu::{PauseAction, PauseMenu};
use crate::player::PlayerAgent;
use crate::presentation::{Beam, BeamTimer, LogSink, PresentationSink, SoundCue};
use crate::raycast::{nearest_hit, Collider, Ray, RayHit, SpatialQuery};

/// Look-axis units per pixel of mouse motion.
pub const MOUSE_LOOK_SCALE: f32 = 0.05;

/// Camera pivot following a player.
///
/// The pivot's `Transform` is written in world space every frame from the
/// owner's body position, yaw and pitch.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraPivot {
    /// Player entity the pivot belongs to.
    pub owner: Entity,
}

/// Beam currently shown by the presentation layer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ActiveBeam(pub BeamTimer);

impl ActiveBeam {
    /// The visible beam, if any.
    #[must_use]
    pub const fn visible(&self) -> Option<&Beam> {
        self.0.visible()
    }
}

impl PresentationSink for ActiveBeam {
    fn show_beam(&mut self, beam: Beam) {
        LogSink.show_beam(beam);
        self.0.show(beam);
    }

    fn play_cue(&mut self, cue: SoundCue) {
        LogSink.play_cue(cue);
    }
}

/// Plugin running the gravity toggle prototype inside a Bevy app.
///
/// The app must also provide Bevy's time plugin, for example through
/// `MinimalPlugins` or `DefaultPlugins`. An unusable tick length in the
/// configuration is replaced by [`crate::FIXED_TIMESTEP_SECONDS`]; see
/// [`GameConfig::timestep_seconds`].
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use gravflip::{GameConfig, GravityFlipPlugin};
///
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins)
///     .add_plugins(GravityFlipPlugin::new(GameConfig::default()));
/// assert!(app.world().contains_resource::<GameConfig>());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GravityFlipPlugin {
    config: GameConfig,
}

impl GravityFlipPlugin {
    /// Creates the plugin with the given settings.
    #[must_use]
    pub const fn new(config: GameConfig) -> Self {
        Self { config }
    }
}

impl Plugin for GravityFlipPlugin {
    fn build(&self, app: &mut App) {
        let tick = self.config.timestep_seconds();
        info!(
            "gravity flip plugin: tick {tick}s, gravity {}",
            self.config.gravity_strength
        );
        app.insert_resource(Time::<Fixed>::from_seconds(tick))
        .insert_resource(self.config)
        .init_resource::<InputState>()
        .init_resource::<ActiveBeam>()
        .init_resource::<PauseMenu>()
        .init_resource::<MixerLevels>()
        // Present already when an input plugin is installed.
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<AccumulatedMouseMotion>()
        .add_systems(Startup, apply_volume_system)
        .add_systems(
            FixedUpdate,
            (
                player_movement_system,
                gravity_force_system,
                integrate_bodies_system,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                pause_menu_system,
                sample_input_system.run_if(gameplay_active),
                player_look_system.run_if(gameplay_active),
                camera_pivot_system,
                beam_expiry_system,
                player_interact_system.run_if(gameplay_active),
            )
                .chain(),
        );
    }
}

/// Run condition: true while no menu is open.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy run conditions take resources by value."
)]
#[must_use]
pub fn gameplay_active(menu: Res<PauseMenu>) -> bool {
    menu.is_playing()
}

/// Pushes the configured volumes to the mixer once at startup.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_volume_system(config: Res<GameConfig>, mut mixer: ResMut<MixerLevels>) {
    config.volume.apply_all(&mut *mixer);
}

/// Handles Escape and freezes virtual time while a menu is open.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn pause_menu_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<PauseMenu>,
    mut time: ResMut<Time<Virtual>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        menu.apply(PauseAction::Escape);
    }
    match (menu.is_playing(), time.is_paused()) {
        (true, true) => time.unpause(),
        (false, false) => time.pause(),
        _ => {}
    }
}

/// Samples keyboard and mouse into [`InputState`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sample_input_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut input: ResMut<InputState>,
) {
    let keys = MoveKeys {
        forward: keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp),
        backward: keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown),
        left: keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft),
        right: keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight),
    };
    input.set_move_axis(move_axis_from_keys(keys));
    input.set_look_axis(look_axis_from_mouse(mouse_motion.delta, MOUSE_LOOK_SCALE));
    input.set_interact_held(mouse_buttons.pressed(MouseButton::Left));
}

/// Sets each player's velocity from the movement axis.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_movement_system(
    input: Res<InputState>,
    mut players: Query<(&PlayerAgent, &mut RigidBody)>,
) {
    let move_axis = input.move_axis();
    for (agent, mut body) in &mut players {
        agent.fixed_tick(&mut *body, move_axis);
    }
}

/// Adds each gravity field's acceleration to its body.
pub fn gravity_force_system(mut bodies: Query<(&GravityField, &mut RigidBody)>) {
    for (field, mut body) in &mut bodies {
        field.apply(&mut *body);
    }
}

/// Integrates every body by the fixed timestep and mirrors the result onto
/// its `Transform`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn integrate_bodies_system(
    time: Res<Time>,
    mut bodies: Query<(&mut RigidBody, Option<&mut Transform>)>,
) {
    let dt = time.delta_secs();
    for (mut body, transform) in &mut bodies {
        body.integrate(dt);
        if let Some(mut transform) = transform {
            transform.translation = body.position;
        }
    }
}

/// Applies the look axis to every player and turns their bodies.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn player_look_system(
    input: Res<InputState>,
    mut players: Query<(&mut PlayerAgent, Option<&mut Transform>)>,
) {
    let look_axis = input.look_axis();
    for (mut agent, transform) in &mut players {
        agent.apply_look(look_axis);
        if let Some(mut transform) = transform {
            transform.rotation = agent.body_rotation();
        }
    }
}

/// Places each camera pivot at its owner's eye with the owner's view.
pub fn camera_pivot_system(
    players: Query<(&PlayerAgent, &RigidBody)>,
    mut pivots: Query<(&CameraPivot, &mut Transform), Without<PlayerAgent>>,
) {
    for (pivot, mut transform) in &mut pivots {
        let Ok((agent, body)) = players.get(pivot.owner) else {
            continue;
        };
        transform.translation = agent.camera_position(body.position);
        transform.rotation = agent.camera_rotation();
    }
}

/// Counts down the visible beam on the frame clock.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn beam_expiry_system(time: Res<Time>, mut beam: ResMut<ActiveBeam>) {
    beam.0.advance(time.delta_secs());
}

type TargetRow = (
    Entity,
    &'static RigidBody,
    &'static Collider,
    Option<&'static mut GravityField>,
);

/// Ray targets backed by an ECS query.
struct EcsTargets<'q, 'w, 's> {
    query: &'q mut Query<'w, 's, TargetRow, Without<PlayerAgent>>,
}

impl SpatialQuery for EcsTargets<'_, '_, '_> {
    fn cast_ray(&mut self, ray: &Ray) -> Option<RayHit<'_>> {
        let (entity, distance) = nearest_hit(
            ray,
            self.query
                .iter()
                .map(|(entity, body, collider, _)| (entity, body.position, collider)),
        )?;
        let (_, _, _, gravity) = self.query.get_mut(entity).ok()?;
        Some(RayHit {
            point: ray.point_at(distance),
            distance,
            capability: gravity.map(|field| field.into_inner() as &mut dyn Toggleable),
        })
    }
}

/// Fires the interaction ray for each player when a press is latched.
pub fn player_interact_system(
    mut input: ResMut<InputState>,
    mut beam: ResMut<ActiveBeam>,
    players: Query<(&PlayerAgent, &RigidBody)>,
    mut targets: Query<TargetRow, Without<PlayerAgent>>,
) {
    if !input.take_interact() {
        return;
    }
    for (agent, body) in &players {
        let mut scene = EcsTargets {
            query: &mut targets,
        };
        let outcome = agent.interact(body.position, &mut scene, &mut *beam);
        debug!(
            "interact from {:?}: endpoint {:?}, toggled {}",
            body.position, outcome.endpoint, outcome.toggled
        );
    }
}

/// Spawns a player body with its camera pivot and returns the body entity.
pub fn spawn_player(world: &mut World, agent: PlayerAgent, position: Vec3) -> Entity {
    let player = world
        .spawn((
            agent,
            RigidBody::at(position),
            Transform::from_translation(position).with_rotation(agent.body_rotation()),
        ))
        .id();
    world.spawn((
        CameraPivot { owner: player },
        Transform::from_translation(agent.camera_position(position))
            .with_rotation(agent.camera_rotation()),
    ));
    player
}

/// Spawns a ray target at rest, optionally carrying a gravity field.
pub fn spawn_block(
    world: &mut World,
    position: Vec3,
    collider: Collider,
    gravity: Option<GravityField>,
) -> Entity {
    let mut block = world.spawn((
        RigidBody::at(position),
        collider,
        Transform::from_translation(position),
    ));
    if let Some(field) = gravity {
        block.insert(field);
    }
    block.id()
}
