/// An infinite line through `origin` along `dir`.
#[derive(Debug, Copy, Clone)]
pub struct Line {
    pub origin: nalgebra_glm::Vec3,
    pub dir: nalgebra_glm::Vec3,
}

impl Line {
    pub fn new(origin: nalgebra_glm::Vec3, dir: nalgebra_glm::Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn point_at(&self, t: f32) -> nalgebra_glm::Vec3 {
        self.origin + self.dir * t
    }

    /// Distance from `point` to the closest point on the line.
    pub fn distance_squared(&self, point: &nalgebra_glm::Vec3) -> f32 {
        let len2 = nalgebra_glm::length2(&self.dir);
        let to_point = point - self.origin;
        if len2 <= 0.0 {
            return nalgebra_glm::length2(&to_point);
        }
        let t = to_point.dot(&self.dir) / len2;
        nalgebra_glm::distance2(&self.point_at(t), point)
    }
}

/// Closest point to `point` on the segment `[a, b]`.
pub fn nearest_point_on_segment(
    a: &nalgebra_glm::Vec3,
    b: &nalgebra_glm::Vec3,
    point: &nalgebra_glm::Vec3,
) -> nalgebra_glm::Vec3 {
    let ab = b - a;
    let len2 = nalgebra_glm::length2(&ab);
    if len2 <= 0.0 {
        return *a;
    }
    let t = ((point - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

pub fn segment_distance_squared(
    a: &nalgebra_glm::Vec3,
    b: &nalgebra_glm::Vec3,
    point: &nalgebra_glm::Vec3,
) -> f32 {
    nalgebra_glm::distance2(&nearest_point_on_segment(a, b, point), point)
}

/// Farthest point from `point` on the segment `[a, b]`, always an endpoint.
pub fn farthest_point_on_segment(
    a: &nalgebra_glm::Vec3,
    b: &nalgebra_glm::Vec3,
    point: &nalgebra_glm::Vec3,
) -> nalgebra_glm::Vec3 {
    if nalgebra_glm::distance2(a, point) >= nalgebra_glm::distance2(b, point) {
        *a
    } else {
        *b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn nearest_point_on_segment_clamps_to_endpoints() {
        let a = nalgebra_glm::vec3(0.0, 0.0, 0.0);
        let b = nalgebra_glm::vec3(2.0, 0.0, 0.0);

        let mid = nearest_point_on_segment(&a, &b, &nalgebra_glm::vec3(1.0, 3.0, 0.0));
        assert_abs_diff_eq!(nalgebra_glm::distance(&mid, &nalgebra_glm::vec3(1.0, 0.0, 0.0)), 0.0);

        let before = nearest_point_on_segment(&a, &b, &nalgebra_glm::vec3(-5.0, 1.0, 0.0));
        assert_abs_diff_eq!(nalgebra_glm::distance(&before, &a), 0.0);

        assert_abs_diff_eq!(
            segment_distance_squared(&a, &b, &nalgebra_glm::vec3(4.0, 0.0, 0.0)),
            4.0
        );
    }

    #[test]
    fn farthest_point_on_segment_picks_farther_endpoint() {
        let a = nalgebra_glm::vec3(0.0, 0.0, 0.0);
        let b = nalgebra_glm::vec3(2.0, 0.0, 0.0);
        let far = farthest_point_on_segment(&a, &b, &nalgebra_glm::vec3(0.5, 0.0, 0.0));
        assert_abs_diff_eq!(nalgebra_glm::distance(&far, &b), 0.0);
    }

    #[test]
    fn line_distance_ignores_extent() {
        let line = Line::new(nalgebra_glm::vec3(0.0, 0.0, 0.0), nalgebra_glm::vec3(0.0, 0.0, 2.0));
        assert_abs_diff_eq!(
            line.distance_squared(&nalgebra_glm::vec3(3.0, 0.0, -100.0)),
            9.0,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(line.point_at(0.5).z, 1.0);
    }
}
