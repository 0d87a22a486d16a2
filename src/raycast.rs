//! Ray casting against simple colliders.
//!
//! The [`SpatialQuery`] trait is the boundary to whatever owns the scene: it
//! answers "what is the nearest thing along this ray" and, when that thing has
//! toggleable gravity, hands back the capability itself. [`TargetSet`] is an
//! in-memory scene used by headless runs and tests; the Bevy adapter provides
//! its own implementation over ECS queries.

use bevy::prelude::Component;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::capability::Toggleable;
use crate::gravity::GravityField;
use crate::integrator::RigidBody;

/// Slab-test threshold below which a ray is treated as parallel to an axis.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Half-line with a maximum length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction, or zero for a degenerate ray that hits nothing.
    pub direction: Vec3,
    /// Furthest distance considered.
    pub max_distance: f32,
}

impl Ray {
    /// Builds a ray, normalising `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            max_distance,
        }
    }

    /// Point at `distance` along the ray.
    #[must_use]
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Point at the far end of the ray.
    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.point_at(self.max_distance)
    }

    fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO || !self.origin.is_finite() || self.max_distance <= 0.0
    }
}

/// Collision shape centred on a body's position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    /// Sphere of the given radius.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Axis-aligned box.
    Cuboid {
        /// Half the box size along each axis.
        half_extents: Vec3,
    },
}

impl Collider {
    /// Distance along `ray` to the first surface hit, if any.
    ///
    /// Rays starting inside a shape do not report it, so the caster's own
    /// collider never blocks its ray.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec3;
    /// use gravflip::raycast::{Collider, Ray};
    ///
    /// let ray = Ray::new(Vec3::ZERO, Vec3::Z, 50.0);
    /// let sphere = Collider::Sphere { radius: 1.0 };
    /// let distance = sphere.intersect(Vec3::new(0.0, 0.0, 10.0), &ray).unwrap();
    /// assert!((distance - 9.0).abs() < 1e-5);
    /// ```
    #[must_use]
    pub fn intersect(&self, center: Vec3, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() {
            return None;
        }
        let distance = match *self {
            Self::Sphere { radius } => intersect_sphere(center, radius, ray)?,
            Self::Cuboid { half_extents } => {
                intersect_box(center - half_extents, center + half_extents, ray)?
            }
        };
        (distance <= ray.max_distance).then_some(distance)
    }
}

fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray) -> Option<f32> {
    let offset = ray.origin - center;
    let half_b = offset.dot(ray.direction);
    let c = offset.length_squared() - radius * radius;
    if c < 0.0 {
        return None;
    }
    let discriminant = half_b * half_b - c;
    if discriminant < 0.0 {
        return None;
    }
    let distance = -half_b - discriminant.sqrt();
    (distance >= 0.0).then_some(distance)
}

fn intersect_box(min: Vec3, max: Vec3, ray: &Ray) -> Option<f32> {
    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;
    let axes = ray
        .origin
        .to_array()
        .into_iter()
        .zip(ray.direction.to_array())
        .zip(min.to_array().into_iter().zip(max.to_array()));
    for ((origin, direction), (lo, hi)) in axes {
        if direction.abs() < PARALLEL_EPSILON {
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }
        let t1 = (lo - origin) / direction;
        let t2 = (hi - origin) / direction;
        near = near.max(t1.min(t2));
        far = far.min(t1.max(t2));
        if far < near {
            return None;
        }
    }
    // Negative entry means the origin is inside or the box is behind.
    (near >= 0.0).then_some(near)
}

/// Picks the closest hit among `(key, centre, collider)` candidates.
pub fn nearest_hit<'c, K, I>(ray: &Ray, candidates: I) -> Option<(K, f32)>
where
    I: IntoIterator<Item = (K, Vec3, &'c Collider)>,
{
    candidates
        .into_iter()
        .filter_map(|(key, center, collider)| {
            collider
                .intersect(center, ray)
                .map(|distance| (key, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Result of a successful ray cast.
pub struct RayHit<'a> {
    /// Surface point that was hit.
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    /// Gravity capability of the hit target, when it has one.
    pub capability: Option<&'a mut dyn Toggleable>,
}

impl std::fmt::Debug for RayHit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayHit")
            .field("point", &self.point)
            .field("distance", &self.distance)
            .field("toggleable", &self.capability.is_some())
            .finish()
    }
}

/// Nearest-hit ray queries against a scene.
pub trait SpatialQuery {
    /// Returns the nearest hit along `ray` within its maximum distance.
    fn cast_ray(&mut self, ray: &Ray) -> Option<RayHit<'_>>;
}

/// Index of a target inside a [`TargetSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

/// A body in a [`TargetSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Body state, integrated by [`TargetSet::step`].
    pub body: RigidBody,
    /// Shape used for ray casts.
    pub collider: Collider,
    /// Optional toggleable gravity.
    pub gravity: Option<GravityField>,
}

/// In-memory scene of ray targets with a minimal physics step.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use gravflip::raycast::{Collider, Ray, SpatialQuery, TargetSet};
/// use gravflip::{GravityField, Toggleable};
///
/// let mut scene = TargetSet::default();
/// let block = scene.spawn(
///     Vec3::new(0.0, 0.0, 10.0),
///     Collider::Sphere { radius: 0.5 },
///     Some(GravityField::default()),
/// );
/// let hit = scene.cast_ray(&Ray::new(Vec3::ZERO, Vec3::Z, 50.0)).unwrap();
/// hit.capability.unwrap().toggle();
/// assert!(scene.gravity(block).unwrap().is_inverted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    targets: Vec<Target>,
}

impl TargetSet {
    /// Adds a body at rest at `position`.
    pub fn spawn(
        &mut self,
        position: Vec3,
        collider: Collider,
        gravity: Option<GravityField>,
    ) -> TargetId {
        self.targets.push(Target {
            body: RigidBody::at(position),
            collider,
            gravity,
        });
        TargetId(self.targets.len() - 1)
    }

    /// Looks up a target.
    #[must_use]
    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    /// Gravity field of a target, if it has one.
    #[must_use]
    pub fn gravity(&self, id: TargetId) -> Option<&GravityField> {
        self.get(id).and_then(|target| target.gravity.as_ref())
    }

    /// Targets in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the scene has no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Applies every gravity field and integrates all bodies by `dt`.
    pub fn step(&mut self, dt: f32) {
        for target in &mut self.targets {
            if let Some(field) = &target.gravity {
                field.apply(&mut target.body);
            }
            target.body.integrate(dt);
        }
    }
}

impl SpatialQuery for TargetSet {
    fn cast_ray(&mut self, ray: &Ray) -> Option<RayHit<'_>> {
        let (index, distance) = nearest_hit(
            ray,
            self.targets
                .iter()
                .enumerate()
                .map(|(index, target)| (index, target.body.position, &target.collider)),
        )?;
        let target = self.targets.get_mut(index)?;
        Some(RayHit {
            point: ray.point_at(distance),
            distance,
            capability: target
                .gravity
                .as_mut()
                .map(|field| field as &mut dyn Toggleable),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::Z, 50.0)
    }

    #[rstest]
    #[case::sphere_ahead(Collider::Sphere { radius: 1.0 }, Vec3::new(0.0, 0.0, 5.0), Some(4.0))]
    #[case::sphere_behind(Collider::Sphere { radius: 1.0 }, Vec3::new(0.0, 0.0, -5.0), None)]
    #[case::sphere_beside(Collider::Sphere { radius: 1.0 }, Vec3::new(3.0, 0.0, 5.0), None)]
    #[case::sphere_out_of_range(Collider::Sphere { radius: 1.0 }, Vec3::new(0.0, 0.0, 60.0), None)]
    #[case::box_ahead(Collider::Cuboid { half_extents: Vec3::splat(0.5) }, Vec3::new(0.0, 0.0, 10.0), Some(9.5))]
    #[case::box_beside(Collider::Cuboid { half_extents: Vec3::splat(0.5) }, Vec3::new(0.0, 2.0, 10.0), None)]
    fn collider_intersections(
        #[case] collider: Collider,
        #[case] center: Vec3,
        #[case] expected: Option<f32>,
    ) {
        let actual = collider.intersect(center, &forward_ray());
        match (actual, expected) {
            (Some(a), Some(e)) => assert_relative_eq!(a, e, epsilon = 1e-5),
            (None, None) => {}
            (a, e) => panic!("mismatch: {a:?} vs {e:?}"),
        }
    }

    #[rstest]
    #[case::sphere(Collider::Sphere { radius: 2.0 })]
    #[case::cuboid(Collider::Cuboid { half_extents: Vec3::splat(2.0) })]
    fn ray_starting_inside_ignores_shape(#[case] collider: Collider) {
        assert!(collider.intersect(Vec3::ZERO, &forward_ray()).is_none());
    }

    #[rstest]
    fn zero_direction_hits_nothing() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO, 50.0);
        let sphere = Collider::Sphere { radius: 100.0 };
        assert!(sphere.intersect(Vec3::new(0.0, 0.0, 150.0), &ray).is_none());
    }

    #[rstest]
    fn nearest_target_wins() {
        let mut scene = TargetSet::default();
        let far = scene.spawn(
            Vec3::new(0.0, 0.0, 20.0),
            Collider::Sphere { radius: 1.0 },
            Some(GravityField::default()),
        );
        let near = scene.spawn(
            Vec3::new(0.0, 0.0, 8.0),
            Collider::Sphere { radius: 1.0 },
            Some(GravityField::default()),
        );

        let hit = scene.cast_ray(&forward_ray()).expect("ray should hit");
        assert_relative_eq!(hit.distance, 7.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point.z, 7.0, epsilon = 1e-5);
        hit.capability.expect("target has gravity").toggle();

        assert!(scene.gravity(near).is_some_and(GravityField::is_inverted));
        assert!(scene.gravity(far).is_some_and(|g| !g.is_inverted()));
    }

    #[rstest]
    fn plain_target_has_no_capability() {
        let mut scene = TargetSet::default();
        scene.spawn(
            Vec3::new(0.0, 0.0, 5.0),
            Collider::Cuboid {
                half_extents: Vec3::ONE,
            },
            None,
        );
        let hit = scene.cast_ray(&forward_ray()).expect("ray should hit wall");
        assert!(hit.capability.is_none());
    }

    #[rstest]
    fn step_applies_gravity_before_integrating() {
        let mut scene = TargetSet::default();
        let id = scene.spawn(
            Vec3::ZERO,
            Collider::Sphere { radius: 0.5 },
            Some(GravityField::new(10.0)),
        );
        scene.step(0.1);
        let target = scene.get(id).expect("target exists");
        assert_relative_eq!(target.body.linear_velocity.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(target.body.position.y, -0.1, epsilon = 1e-6);
    }
}
