use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Below this, a transform has collapsed at least one axis.
const MIN_DETERMINANT: f32 = 1e-12;

/// Axis-aligned bounding box in a node's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners (order-independent).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centered on `center` with the given half extents.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Slab test against a ray expressed in this box's space.
    ///
    /// `direction` need not be unit length; the returned parameter is in
    /// units of `direction`, which keeps distances in world units when a
    /// world ray is carried into local space by an affine inverse. Returns
    /// the entry parameter, or the exit parameter when `origin` is inside.
    #[must_use]
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        if !origin.is_finite() || !direction.is_finite() {
            return None;
        }
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 || !t_max.is_finite() {
            None
        } else if t_min >= 0.0 {
            Some(t_min)
        } else {
            Some(t_max)
        }
    }

    /// Intersect a world-space ray with this box placed by `world`.
    ///
    /// Returns the world-space distance along the ray.
    /// A degenerate placement (zero scale on any axis) is never hit.
    #[must_use]
    pub fn intersect_world(&self, ray: &Ray, world: &Affine3A) -> Option<f32> {
        if world.matrix3.determinant().abs() < MIN_DETERMINANT {
            return None;
        }
        let inverse = world.inverse();
        let origin = inverse.transform_point3(ray.origin);
        let direction = inverse.transform_vector3(ray.direction);
        self.intersect(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5))
    }

    #[test]
    fn hits_box_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = unit_box().intersect(ray.origin, ray.direction);
        assert_eq!(t, Some(4.5));
    }

    #[test]
    fn misses_box_to_the_side() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(unit_box().intersect(ray.origin, ray.direction).is_none());
    }

    #[test]
    fn box_behind_origin_is_not_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(unit_box().intersect(ray.origin, ray.direction).is_none());
    }

    #[test]
    fn origin_inside_reports_exit() {
        let t = unit_box().intersect(Vec3::ZERO, Vec3::X);
        assert_eq!(t, Some(0.5));
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        // Direction has zero y, origin above the box.
        let t = unit_box().intersect(Vec3::new(-3.0, 2.0, 0.0), Vec3::X);
        assert!(t.is_none());
    }

    #[test]
    fn world_transform_keeps_world_distance() {
        let world = Affine3A::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_y(0.7),
            Vec3::new(0.0, 0.0, -10.0),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = unit_box().intersect_world(&ray, &world).unwrap_or(f32::NAN);
        // The rotated face is entered 1/cos(0.7) before the box center.
        let expected = 10.0 - 1.0 / 0.7_f32.cos();
        assert!((t - expected).abs() < 1e-3, "distance {t}");
    }

    #[test]
    fn collapsed_placement_is_never_hit() {
        let world = Affine3A::from_scale(Vec3::ZERO);
        let toward = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let away = Ray::new(Vec3::new(100.0, 50.0, 10.0), Vec3::Z);
        assert!(unit_box().intersect_world(&toward, &world).is_none());
        assert!(unit_box().intersect_world(&away, &world).is_none());
    }

    #[test]
    fn non_finite_ray_misses() {
        let origin = Vec3::new(f32::NAN, 0.0, 5.0);
        assert!(unit_box().intersect(origin, Vec3::NEG_Z).is_none());
        assert!(unit_box().intersect(Vec3::ZERO, Vec3::splat(f32::INFINITY)).is_none());
    }
}
