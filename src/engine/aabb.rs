use super::{classification::IntersectionType, tolerance::DISTANCE_EPSILON};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub min: nalgebra_glm::Vec3,
    pub max: nalgebra_glm::Vec3,
}

impl AABB {
    /// An empty box, ready to be grown with `expand_to_fit`.
    pub fn new() -> Self {
        Self {
            min: nalgebra_glm::vec3(f32::MAX, f32::MAX, f32::MAX),
            max: nalgebra_glm::vec3(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    pub fn from_min_max(min: nalgebra_glm::Vec3, max: nalgebra_glm::Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = nalgebra_glm::Vec3>) -> Self {
        let mut retval = AABB::new();
        retval.expand_to_fit(points);
        retval
    }

    pub fn from_center_extents(center: nalgebra_glm::Vec3, extents: nalgebra_glm::Vec3) -> Self {
        Self::from_min_max(center - extents, center + extents)
    }

    pub fn union(&self, b: AABB) -> AABB {
        AABB::from_min_max(
            nalgebra_glm::min2(&self.min, &b.min),
            nalgebra_glm::max2(&self.max, &b.max),
        )
    }

    pub fn center(&self) -> nalgebra_glm::Vec3 {
        (self.max + self.min) * 0.5
    }

    pub fn extents(&self) -> nalgebra_glm::Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn translate(&self, v: nalgebra_glm::Vec3) -> Self {
        Self {
            min: self.min + v,
            max: self.max + v,
        }
    }

    pub fn expand_to_fit(&mut self, points: impl IntoIterator<Item = nalgebra_glm::Vec3>) {
        for corner in points.into_iter() {
            self.min = nalgebra_glm::min2(&self.min, &corner);
            self.max = nalgebra_glm::max2(&self.max, &corner);
        }
    }

    pub fn intersects(&self, other: &AABB) -> bool {
        // Check for separation in the x-axis
        if self.max.x < other.min.x || self.min.x > other.max.x {
            return false;
        }
        // Check for separation in the y-axis
        if self.max.y < other.min.y || self.min.y > other.max.y {
            return false;
        }
        // Check for separation in the z-axis
        if self.max.z < other.min.z || self.min.z > other.max.z {
            return false;
        }

        // No separation found, the AABBs intersect
        true
    }

    pub fn contains(&self, other: &AABB) -> bool {
        let mut result = true;
        result = result && self.min.x <= other.min.x;
        result = result && self.min.y <= other.min.y;
        result = result && self.min.z <= other.min.z;
        result = result && other.max.x <= self.max.x;
        result = result && other.max.y <= self.max.y;
        result = result && other.max.z <= self.max.z;
        result
    }

    pub fn contains_point(&self, point: &nalgebra_glm::Vec3) -> bool {
        self.min.x <= point.x
            && self.min.y <= point.y
            && self.min.z <= point.z
            && point.x <= self.max.x
            && point.y <= self.max.y
            && point.z <= self.max.z
    }

    pub fn corners(&self) -> [nalgebra_glm::Vec3; 8] {
        [
            nalgebra_glm::Vec3::new(self.min.x, self.min.y, self.min.z),
            nalgebra_glm::Vec3::new(self.max.x, self.min.y, self.min.z),
            nalgebra_glm::Vec3::new(self.min.x, self.max.y, self.min.z),
            nalgebra_glm::Vec3::new(self.max.x, self.max.y, self.min.z),
            nalgebra_glm::Vec3::new(self.min.x, self.min.y, self.max.z),
            nalgebra_glm::Vec3::new(self.max.x, self.min.y, self.max.z),
            nalgebra_glm::Vec3::new(self.min.x, self.max.y, self.max.z),
            nalgebra_glm::Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    /// The support corner of the box along `direction`.
    pub fn get_furthest_corner(&self, direction: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        nalgebra_glm::vec3(
            if direction.x > 0.0 {
                self.max.x
            } else {
                self.min.x
            },
            // Y axis
            if direction.y > 0.0 {
                self.max.y
            } else {
                self.min.y
            },
            // Z axis
            if direction.z > 0.0 {
                self.max.z
            } else {
                self.min.z
            },
        )
    }

    pub fn classify_point(&self, point: &nalgebra_glm::Vec3) -> IntersectionType {
        let inner = AABB::from_min_max(
            self.min.add_scalar(DISTANCE_EPSILON),
            self.max.add_scalar(-DISTANCE_EPSILON),
        );
        if inner.contains_point(point) {
            IntersectionType::Inside
        } else if self.expanded(DISTANCE_EPSILON).contains_point(point) {
            IntersectionType::Spanning
        } else {
            IntersectionType::Outside
        }
    }

    /// Classifies the box `other` against this one.
    pub fn classify_aabb(&self, other: &AABB) -> IntersectionType {
        if nalgebra_glm::distance(&self.min, &other.min) <= DISTANCE_EPSILON
            && nalgebra_glm::distance(&self.max, &other.max) <= DISTANCE_EPSILON
        {
            IntersectionType::Same
        } else if !self.intersects(other) {
            IntersectionType::Outside
        } else if self.contains(other) {
            IntersectionType::Inside
        } else if other.contains(self) {
            IntersectionType::Enclosing
        } else {
            IntersectionType::Spanning
        }
    }

    pub fn nearest_point(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        nalgebra_glm::clamp_vec(point, &self.min, &self.max)
    }

    pub fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        nalgebra_glm::distance2(&self.nearest_point(point), point)
    }

    pub fn farthest_point(&self, point: &nalgebra_glm::Vec3) -> nalgebra_glm::Vec3 {
        let center = self.center();
        self.get_furthest_corner(&(center - point))
    }

    pub fn distance_max_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        nalgebra_glm::distance2(&self.farthest_point(point), point)
    }

    fn expanded(&self, margin: f32) -> AABB {
        AABB::from_min_max(self.min.add_scalar(-margin), self.max.add_scalar(margin))
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> AABB {
        AABB::from_min_max(nalgebra_glm::vec3(-1.0, -1.0, -1.0), nalgebra_glm::vec3(1.0, 1.0, 1.0))
    }

    #[test]
    fn from_points_encloses_all_points() {
        let aabb = AABB::from_points([
            nalgebra_glm::vec3(0.0, 0.0, 0.0),
            nalgebra_glm::vec3(1.0, 1.0, 1.0),
            nalgebra_glm::vec3(-1.0, -2.0, 3.0),
        ]);
        assert_eq!(aabb.min, nalgebra_glm::vec3(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, nalgebra_glm::vec3(1.0, 1.0, 3.0));
    }

    #[test]
    fn contains_point_checks_both_bounds() {
        let aabb = unit_box();
        assert!(aabb.contains_point(&nalgebra_glm::vec3(0.5, -0.5, 0.0)));
        assert!(!aabb.contains_point(&nalgebra_glm::vec3(1.5, 0.0, 0.0)));
        assert!(!aabb.contains_point(&nalgebra_glm::vec3(0.0, -1.5, 0.0)));
    }

    #[test]
    fn classify_aabb_reports_every_relation() {
        let aabb = unit_box();
        assert_eq!(aabb.classify_aabb(&unit_box()), IntersectionType::Same);
        assert_eq!(
            aabb.classify_aabb(&AABB::from_center_extents(
                nalgebra_glm::Vec3::zeros(),
                nalgebra_glm::vec3(0.5, 0.5, 0.5)
            )),
            IntersectionType::Inside
        );
        assert_eq!(
            aabb.classify_aabb(&AABB::from_center_extents(
                nalgebra_glm::Vec3::zeros(),
                nalgebra_glm::vec3(2.0, 2.0, 2.0)
            )),
            IntersectionType::Enclosing
        );
        assert_eq!(
            aabb.classify_aabb(&aabb.translate(nalgebra_glm::vec3(1.0, 0.0, 0.0))),
            IntersectionType::Spanning
        );
        assert_eq!(
            aabb.classify_aabb(&aabb.translate(nalgebra_glm::vec3(5.0, 0.0, 0.0))),
            IntersectionType::Outside
        );
    }

    #[test]
    fn classify_point_treats_faces_as_spanning() {
        let aabb = unit_box();
        assert_eq!(aabb.classify_point(&nalgebra_glm::Vec3::zeros()), IntersectionType::Inside);
        assert_eq!(
            aabb.classify_point(&nalgebra_glm::vec3(1.0, 0.0, 0.0)),
            IntersectionType::Spanning
        );
        assert_eq!(
            aabb.classify_point(&nalgebra_glm::vec3(2.0, 0.0, 0.0)),
            IntersectionType::Outside
        );
    }

    #[test]
    fn nearest_and_farthest_points_work() {
        let aabb = unit_box();
        let point = nalgebra_glm::vec3(3.0, 0.5, 0.0);
        assert_abs_diff_eq!(aabb.distance_squared(&point), 4.0);
        assert_abs_diff_eq!(aabb.distance_squared(&nalgebra_glm::Vec3::zeros()), 0.0);

        let far = aabb.farthest_point(&point);
        assert_eq!(far.x, -1.0);
        assert_eq!(far.y, -1.0);
        assert_abs_diff_eq!(aabb.distance_max_squared(&point), 16.0 + 2.25 + 1.0);
    }
}
