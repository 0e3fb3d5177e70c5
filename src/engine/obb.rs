use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    plane::Plane,
    tolerance::{DISTANCE_EPSILON, PARALLEL_EPSILON},
};

/// A box with arbitrary orientation.
///
/// `axes` holds the forward, side and up directions (orthonormal, right
/// handed) and `extents` the half sizes along each of them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrientedBox {
    pub center: nalgebra_glm::Vec3,
    axes: [nalgebra_glm::Vec3; 3],
    pub extents: nalgebra_glm::Vec3,
}

impl OrientedBox {
    /// Builds a box, re-orthonormalizing the forward and side axes. The up
    /// axis is derived from them, so `side` must not be parallel to
    /// `forward`.
    pub fn new(
        center: nalgebra_glm::Vec3,
        forward: nalgebra_glm::Vec3,
        side: nalgebra_glm::Vec3,
        extents: nalgebra_glm::Vec3,
    ) -> Self {
        debug_assert!(
            nalgebra_glm::length2(&forward.cross(&side))
                > PARALLEL_EPSILON * nalgebra_glm::length2(&forward) * nalgebra_glm::length2(&side),
            "box side must not be parallel to forward"
        );
        let forward = forward.normalize();
        let side = (side - forward * forward.dot(&side)).normalize();
        let up = forward.cross(&side);
        Self {
            center,
            axes: [forward, side, up],
            extents,
        }
    }

    pub fn from_aabb(aabb: &AABB) -> Self {
        Self {
            center: aabb.center(),
            axes: [
                nalgebra_glm::vec3(1.0, 0.0, 0.0),
                nalgebra_glm::vec3(0.0, 1.0, 0.0),
                nalgebra_glm::vec3(0.0, 0.0, 1.0),
            ],
            extents: aabb.extents(),
        }
    }

    pub fn axes(&self) -> &[nalgebra_glm::Vec3; 3] {
        &self.axes
    }

    pub fn forward(&self) -> nalgebra_glm::Vec3 {
        self.axes[0]
    }

    pub fn side(&self) -> nalgebra_glm::Vec3 {
        self.axes[1]
    }

    pub fn up(&self) -> nalgebra_glm::Vec3 {
        self.axes[2]
    }

    /// Coordinates of `point` in the box frame.
    pub fn to_local(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        let offset = point - self.center;
        nalgebra_glm::vec3(
            offset.dot(&self.axes[0]),
            offset.dot(&self.axes[1]),
            offset.dot(&self.axes[2]),
        )
    }

    fn from_local(&self, local: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        self.center + self.axes[0] * local.x + self.axes[1] * local.y + self.axes[2] * local.z
    }

    pub fn corners(&self) -> [nalgebra_glm::Vec3; 8] {
        let f = self.axes[0] * self.extents.x;
        let s = self.axes[1] * self.extents.y;
        let u = self.axes[2] * self.extents.z;
        [
            self.center - f - s - u,
            self.center - f - s + u,
            self.center - f + s - u,
            self.center - f + s + u,
            self.center + f - s - u,
            self.center + f - s + u,
            self.center + f + s - u,
            self.center + f + s + u,
        ]
    }

    pub fn bounding_box(&self) -> AABB {
        let mut half = nalgebra_glm::Vec3::zeros();
        for (axis, extent) in self.axes.iter().zip(self.extents.iter()) {
            half += axis.abs() * *extent;
        }
        AABB::from_center_extents(self.center, half)
    }

    /// Half length of the box's shadow on `axis`.
    pub fn projected_radius(&self, axis: &nalgebra_glm::Vec3) -> f32 {
        self.axes
            .iter()
            .zip(self.extents.iter())
            .map(|(a, e)| e * a.dot(axis).abs())
            .sum()
    }

    pub fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.center += v;
    }

    pub fn rotate(&mut self, rotation: &nalgebra_glm::Qua<f32>, pivot: &nalgebra_glm::Vec3) {
        self.center = pivot + nalgebra_glm::quat_rotate_vec3(rotation, &(self.center - pivot));
        for axis in self.axes.iter_mut() {
            *axis = nalgebra_glm::quat_rotate_vec3(rotation, axis).normalize();
        }
    }

    pub fn set_axes(&mut self, forward: nalgebra_glm::Vec3, side: nalgebra_glm::Vec3) {
        *self = Self::new(self.center, forward, side, self.extents);
    }

    pub fn contains_point(&self, point: &nalgebra_glm::Vec3) -> bool {
        let local = self.to_local(point);
        (0..3).all(|i| local[i].abs() <= self.extents[i] + DISTANCE_EPSILON)
    }

    pub fn contains_sphere(&self, center: &nalgebra_glm::Vec3, radius: f32) -> bool {
        let local = self.to_local(center);
        (0..3).all(|i| local[i].abs() + radius <= self.extents[i] + DISTANCE_EPSILON)
    }

    pub fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        let local = self.to_local(point);
        if (0..3).all(|i| local[i].abs() < self.extents[i] - DISTANCE_EPSILON) {
            IntersectionType::Inside
        } else if self.contains_point(point) {
            IntersectionType::Spanning
        } else {
            IntersectionType::Outside
        }
    }

    pub fn classify_sphere(&self, center: &nalgebra_glm::Vec3, radius: f32) -> IntersectionType {
        if self.distance_squared(center) > radius * radius {
            IntersectionType::Outside
        } else if self.contains_sphere(center, radius) {
            IntersectionType::Inside
        } else if self.distance_max_squared(center) <= radius * radius {
            IntersectionType::Enclosing
        } else {
            IntersectionType::Spanning
        }
    }

    /// Classifies the box `other` against this one.
    pub fn classify_obb(&self, other: &OrientedBox) -> IntersectionType {
        if !self.intersects_obb(other) {
            IntersectionType::Outside
        } else if other.corners().iter().all(|c| self.contains_point(c)) {
            IntersectionType::Inside
        } else if self.corners().iter().all(|c| other.contains_point(c)) {
            IntersectionType::Enclosing
        } else {
            IntersectionType::Spanning
        }
    }

    pub fn classify_aabb(&self, aabb: &AABB) -> IntersectionType {
        self.classify_obb(&OrientedBox::from_aabb(aabb))
    }

    pub fn classify_plane(&self, plane: &Plane) -> PlaneClassification {
        let radius = self.projected_radius(&plane.normal());
        let distance = plane.signed_distance(&self.center);
        if distance < -radius - DISTANCE_EPSILON {
            PlaneClassification::Behind
        } else if distance > radius + DISTANCE_EPSILON {
            PlaneClassification::InFront
        } else {
            PlaneClassification::Coincident
        }
    }

    /// Box-box separating axis test over the 3 + 3 face axes and the 9
    /// edge cross products.
    pub fn intersects_obb(&self, other: &OrientedBox) -> bool {
        let between = other.center - self.center;
        let mut candidates = Vec::with_capacity(15);
        candidates.extend_from_slice(&self.axes);
        candidates.extend_from_slice(&other.axes);
        for a in self.axes.iter() {
            for b in other.axes.iter() {
                candidates.push(a.cross(b));
            }
        }
        for axis in candidates.iter() {
            if nalgebra_glm::length2(axis) < PARALLEL_EPSILON {
                continue;
            }
            let distance = between.dot(axis).abs();
            if distance > self.projected_radius(axis) + other.projected_radius(axis) {
                return false;
            }
        }
        true
    }

    pub fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        let local = self.to_local(point);
        if (0..3).all(|i| local[i].abs() <= self.extents[i]) {
            return *point;
        }
        let clamped = nalgebra_glm::clamp_vec(&local, &-self.extents, &self.extents);
        self.from_local(&clamped)
    }

    pub fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        nalgebra_glm::distance2(&self.nearest_point(point), point)
    }

    pub fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        let local = self.to_local(point);
        let corner = nalgebra_glm::vec3(
            if local.x > 0.0 { -self.extents.x } else { self.extents.x },
            if local.y > 0.0 { -self.extents.y } else { self.extents.y },
            if local.z > 0.0 { -self.extents.z } else { self.extents.z },
        );
        self.from_local(&corner)
    }

    pub fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        nalgebra_glm::distance2(&self.farthest_point(point), point)
    }
}
