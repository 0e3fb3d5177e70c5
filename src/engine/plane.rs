use std::fmt;

use super::{
    aabb::AABB,
    classification::PlaneClassification,
    line::Line,
    tolerance::{DISTANCE_EPSILON, PARALLEL_EPSILON},
};

/// The half-space `normal . p + dist >= 0`.
///
/// The normal is kept unit length. A plane built from points remembers one
/// of them as its pivot so that rotations keep a stable reference.
#[derive(Debug, Copy, Clone)]
pub struct Plane {
    normal: nalgebra_glm::Vec3,
    pub dist: f32,
    pivot: Option<nalgebra_glm::Vec3>,
}

impl Plane {
    pub fn new(normal: nalgebra_glm::Vec3, dist: f32) -> Self {
        let len = normal.norm();
        debug_assert!(len > 0.0, "plane normal must not be zero");
        Self {
            normal: normal / len,
            dist: dist / len,
            pivot: None,
        }
    }

    pub fn from_center_normal(center: nalgebra_glm::Vec3, normal: nalgebra_glm::Vec3) -> Self {
        let normal_normal = normal.normalize();
        Self {
            normal: normal_normal,
            dist: -normal_normal.dot(&center),
            pivot: Some(center),
        }
    }

    /// Plane through three points, facing the side from which `a, b, c`
    /// appear counter-clockwise.
    pub fn from_points(
        a: nalgebra_glm::Vec3,
        b: nalgebra_glm::Vec3,
        c: nalgebra_glm::Vec3,
    ) -> Self {
        Self::from_center_normal(a, (b - a).cross(&(c - a)))
    }

    pub fn normal(&self) -> nalgebra_glm::Vec3 {
        self.normal
    }

    pub fn dist(&self) -> f32 {
        self.dist
    }

    /// The reference point of the plane: the remembered pivot, or the
    /// point of the plane closest to the origin.
    pub fn pivot(&self) -> nalgebra_glm::Vec3 {
        self.pivot.unwrap_or(-self.normal * self.dist)
    }

    pub fn signed_distance(&self, point: &nalgebra_glm::Vec3) -> f32 {
        self.normal.dot(point) + self.dist
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        point - self.normal * self.signed_distance(point)
    }

    pub fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.dist -= self.normal.dot(v);
        if let Some(pivot) = self.pivot.as_mut() {
            *pivot += v;
        }
    }

    /// Applies the rigid transform `matrix` to the plane, rotating about
    /// `pivot` (the origin when `None`) before translating.
    pub fn transform(&mut self, matrix: &nalgebra_glm::Mat4, pivot: Option<nalgebra_glm::Vec3>) {
        let center = pivot.unwrap_or_else(nalgebra_glm::Vec3::zeros);
        let reference = self.pivot();
        let offset = reference - center;
        let rotated_offset = (matrix * nalgebra_glm::vec4(offset.x, offset.y, offset.z, 0.0)).xyz();
        let translation = (matrix * nalgebra_glm::vec4(0.0, 0.0, 0.0, 1.0)).xyz();
        let new_reference = center + rotated_offset + translation;
        let normal = (matrix * nalgebra_glm::vec4(self.normal.x, self.normal.y, self.normal.z, 0.0))
            .xyz()
            .normalize();

        self.normal = normal;
        self.dist = -normal.dot(&new_reference);
        if self.pivot.is_some() {
            self.pivot = Some(new_reference);
        }
    }

    pub fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>, pivot: Option<nalgebra_glm::Vec3>) {
        self.transform(&nalgebra_glm::quat_to_mat4(rotation), pivot);
    }

    /// Flips the plane so the other half-space is in front.
    pub fn negate(&mut self) {
        self.normal = -self.normal;
        self.dist = -self.dist;
    }

    /// The line shared with `other`, or `None` when the planes are parallel.
    pub fn intersect_plane(&self, other: &Plane) -> Option<Line> {
        let dir = self.normal.cross(&other.normal);
        let denom = nalgebra_glm::length2(&dir);
        if denom < PARALLEL_EPSILON {
            return None;
        }
        // Both normals are unit length, so 1 - k^2 == |dir|^2
        let k = self.normal.dot(&other.normal);
        let h1 = -self.dist;
        let h2 = -other.dist;
        let c1 = (h1 - h2 * k) / denom;
        let c2 = (h2 - h1 * k) / denom;
        Some(Line::new(self.normal * c1 + other.normal * c2, dir.normalize()))
    }

    /// Where `line` crosses the plane, or `None` when it runs parallel.
    pub fn intersect_line(&self, line: &Line) -> Option<nalgebra_glm::Vec3> {
        let denom = self.normal.dot(&line.dir);
        if denom.abs() < PARALLEL_EPSILON.sqrt() {
            return None;
        }
        let t = -self.signed_distance(&line.origin) / denom;
        Some(line.point_at(t))
    }

    pub fn classify_point(&self, point: &nalgebra_glm::Vec3) -> PlaneClassification {
        let distance = self.signed_distance(point);
        if distance < -DISTANCE_EPSILON {
            PlaneClassification::Behind
        } else if distance > DISTANCE_EPSILON {
            PlaneClassification::InFront
        } else {
            PlaneClassification::Coincident
        }
    }

    /// Classifies a box by its two support corners along the normal.
    pub fn classify_aabb(&self, aabb: &AABB) -> PlaneClassification {
        let furthest = aabb.get_furthest_corner(&self.normal);
        if self.signed_distance(&furthest) < -DISTANCE_EPSILON {
            return PlaneClassification::Behind;
        }
        let nearest = aabb.get_furthest_corner(&-self.normal);
        if self.signed_distance(&nearest) > DISTANCE_EPSILON {
            return PlaneClassification::InFront;
        }
        PlaneClassification::Coincident
    }

    pub fn classify_sphere(&self, center: &nalgebra_glm::Vec3, radius: f32) -> PlaneClassification {
        let distance = self.signed_distance(center);
        if distance < -radius - DISTANCE_EPSILON {
            PlaneClassification::Behind
        } else if distance > radius + DISTANCE_EPSILON {
            PlaneClassification::InFront
        } else {
            PlaneClassification::Coincident
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}, {:.4}, {:.4}]",
            self.normal.x, self.normal.y, self.normal.z, self.dist
        )
    }
}
