use super::{
    aabb::AABB,
    classification::{IntersectionType, PlaneClassification},
    obb::OrientedBox,
    plane::Plane,
    tolerance::DISTANCE_EPSILON,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: nalgebra_glm::Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: nalgebra_glm::Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn translate(&mut self, v: &nalgebra_glm::Vec3) {
        self.center += v;
    }

    pub fn bounding_box(&self) -> AABB {
        AABB::from_center_extents(
            self.center,
            nalgebra_glm::vec3(self.radius, self.radius, self.radius),
        )
    }

    /// Points within epsilon of the surface count as spanning.
    pub fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        let distance = nalgebra_glm::distance(&self.center, point);
        if distance < self.radius - DISTANCE_EPSILON {
            IntersectionType::Inside
        } else if distance <= self.radius + DISTANCE_EPSILON {
            IntersectionType::Spanning
        } else {
            IntersectionType::Outside
        }
    }

    pub fn classify_sphere(&self, center: &nalgebra_glm::Vec3, radius: f32) -> IntersectionType {
        let distance = nalgebra_glm::distance(&self.center, center);
        if distance > self.radius + radius + DISTANCE_EPSILON {
            IntersectionType::Outside
        } else if distance + radius <= self.radius + DISTANCE_EPSILON {
            IntersectionType::Inside
        } else if distance + self.radius <= radius + DISTANCE_EPSILON {
            IntersectionType::Enclosing
        } else {
            IntersectionType::Spanning
        }
    }

    pub fn classify_aabb(&self, aabb: &AABB) -> IntersectionType {
        let radius_squared = self.radius * self.radius;
        if aabb.distance_squared(&self.center) > radius_squared {
            IntersectionType::Outside
        } else if aabb.distance_max_squared(&self.center) <= radius_squared {
            IntersectionType::Inside
        } else if aabb.contains(&self.bounding_box()) {
            IntersectionType::Enclosing
        } else {
            IntersectionType::Spanning
        }
    }

    pub fn classify_obb(&self, obb: &OrientedBox) -> IntersectionType {
        let radius_squared = self.radius * self.radius;
        if obb.distance_squared(&self.center) > radius_squared {
            IntersectionType::Outside
        } else if obb.distance_max_squared(&self.center) <= radius_squared {
            IntersectionType::Inside
        } else if obb.contains_sphere(&self.center, self.radius) {
            IntersectionType::Enclosing
        } else {
            IntersectionType::Spanning
        }
    }

    pub fn classify_plane(&self, plane: &Plane) -> PlaneClassification {
        plane.classify_sphere(&self.center, self.radius)
    }

    pub fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        let offset = point - self.center;
        let distance = offset.norm();
        if distance <= self.radius {
            *point
        } else {
            self.center + offset * (self.radius / distance)
        }
    }

    pub fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        let distance = (nalgebra_glm::distance(&self.center, point) - self.radius).max(0.0);
        distance * distance
    }

    pub fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        let offset = self.center - point;
        let distance = offset.norm();
        if distance <= 0.0 {
            // Every surface point is equally far from the center
            self.center + nalgebra_glm::vec3(self.radius, 0.0, 0.0)
        } else {
            self.center + offset * (self.radius / distance)
        }
    }

    pub fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        let distance = nalgebra_glm::distance(&self.center, point) + self.radius;
        distance * distance
    }
}
